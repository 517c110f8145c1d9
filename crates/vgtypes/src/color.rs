// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::ByteExt;
use crate::{colors, Error, Stream};

/// An RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Constructs a new opaque `Color`.
    #[inline]
    pub fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Constructs a new `Color` from RGBA values.
    #[inline]
    pub fn new_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Constructs a new `Color` set to black.
    #[inline]
    pub fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Constructs a fully transparent black.
    #[inline]
    pub fn transparent() -> Color {
        Color::new_rgba(0, 0, 0, 0)
    }

    /// Checks that the alpha channel is zero.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha == 0
    }

    /// Returns a copy with an alpha computed from a `0..=1` opacity.
    pub fn with_opacity(&self, opacity: f64) -> Color {
        let opacity = if opacity.is_nan() { 1.0 } else { opacity.max(0.0).min(1.0) };
        Color {
            alpha: (opacity * 255.0).round() as u8,
            ..*self
        }
    }

    /// Packs the color channels into `0xRRGGBB`.
    #[inline]
    pub fn to_rgb_u32(&self) -> u32 {
        (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    /// Parses a color from a string.
    ///
    /// Supports `#rgb`, `#rrggbb`, `rgb(r, g, b)` with integer or percent
    /// channels and the case-insensitive color keywords.
    ///
    /// # Errors
    ///
    ///  - Returns error if a color has an invalid format.
    ///  - Returns error if a color is followed by anything except spaces.
    fn from_str(text: &str) -> Result<Self, Error> {
        let mut s = Stream::from(text);
        let color = s.parse_color()?;

        s.skip_spaces();
        if !s.at_end() {
            return Err(Error::UnexpectedData(s.calc_char_pos()));
        }

        Ok(color)
    }
}

impl<'a> Stream<'a> {
    /// Parses a color.
    pub fn parse_color(&mut self) -> Result<Color, Error> {
        self.skip_spaces();

        let mut color = Color::black();

        if self.curr_byte()? == b'#' {
            self.advance(1);
            let hex = self.consume_bytes(|_, c| c.is_hex_digit()).as_bytes();
            match hex.len() {
                6 => {
                    color.red = hex_pair(hex[0], hex[1]);
                    color.green = hex_pair(hex[2], hex[3]);
                    color.blue = hex_pair(hex[4], hex[5]);
                }
                3 => {
                    color.red = short_hex(hex[0]);
                    color.green = short_hex(hex[1]);
                    color.blue = short_hex(hex[2]);
                }
                _ => {
                    return Err(Error::InvalidValue);
                }
            }
        } else {
            let name = self
                .consume_bytes(|_, c| c.is_letter())
                .to_ascii_lowercase();
            if name == "rgb" {
                self.skip_spaces();
                self.consume_byte(b'(')?;
                color.red = self.parse_channel()?;
                color.green = self.parse_channel()?;
                color.blue = self.parse_channel()?;
                self.skip_spaces();
                self.consume_byte(b')')?;
            } else {
                color = colors::from_str(&name).ok_or(Error::InvalidValue)?;
            }
        }

        Ok(color)
    }

    fn parse_channel(&mut self) -> Result<u8, Error> {
        self.skip_spaces();
        self.curr_byte()?;
        let start = self.pos();
        let n = self.parse_number()?;
        if n.is_nan() {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        let n = if self.starts_with(b"%") {
            self.advance(1);
            n * 255.0 / 100.0
        } else {
            n
        };

        self.skip_spaces();
        self.parse_list_separator();

        Ok(n.round().max(0.0).min(255.0) as u8)
    }
}

#[inline]
fn from_hex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[inline]
fn short_hex(c: u8) -> u8 {
    let h = from_hex(c);
    (h << 4) | h
}

#[inline]
fn hex_pair(c1: u8, c2: u8) -> u8 {
    (from_hex(c1) << 4) | from_hex(c2)
}
