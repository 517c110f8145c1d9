// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Error;

/// Maximum number of significant mantissa digits kept by the number parser.
const MAX_MANTISSA_DIGITS: u32 = 9;

/// Maximum number of exponent digits. The rest are ignored.
const MAX_EXPONENT_DIGITS: u32 = 3;

/// An effective exponent below this value produces zero.
const MIN_EXPONENT: i32 = -125;

/// An effective exponent at or above this value produces infinity.
const MAX_EXPONENT: i32 = 128;

/// Extension methods for XML-subset only operations.
pub(crate) trait ByteExt {
    /// Checks if a byte is a numeric sign.
    fn is_sign(&self) -> bool;

    /// Checks if a byte is a digit.
    ///
    /// `[0-9]`
    fn is_digit(&self) -> bool;

    /// Checks if a byte is a hex digit.
    ///
    /// `[0-9A-Fa-f]`
    fn is_hex_digit(&self) -> bool;

    /// Checks if a byte is a space.
    ///
    /// `[ \r\n\t]`
    fn is_space(&self) -> bool;

    /// Checks if a byte is an ASCII char.
    ///
    /// `[A-Za-z]`
    fn is_letter(&self) -> bool;

    /// Checks if a byte can start a number.
    fn is_number_start(&self) -> bool;
}

impl ByteExt for u8 {
    #[inline]
    fn is_sign(&self) -> bool {
        matches!(*self, b'+' | b'-')
    }

    #[inline]
    fn is_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9')
    }

    #[inline]
    fn is_hex_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
    }

    #[inline]
    fn is_space(&self) -> bool {
        matches!(*self, b' ' | b'\t' | b'\n' | b'\r')
    }

    #[inline]
    fn is_letter(&self) -> bool {
        matches!(*self, b'A'..=b'Z' | b'a'..=b'z')
    }

    #[inline]
    fn is_number_start(&self) -> bool {
        self.is_digit() || self.is_sign() || *self == b'.'
    }
}

/// Checks that a byte ends a number list without being a part of it.
///
/// Path command letters and a closing parenthesis.
#[inline]
pub(crate) fn is_list_terminator(c: u8) -> bool {
    matches!(
        c,
        b'M' | b'm'
            | b'Z'
            | b'z'
            | b'L'
            | b'l'
            | b'H'
            | b'h'
            | b'V'
            | b'v'
            | b'C'
            | b'c'
            | b'S'
            | b's'
            | b'Q'
            | b'q'
            | b'T'
            | b't'
            | b'A'
            | b'a'
            | b')'
    )
}

/// A streaming text parsing interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    /// Returns the current position in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Calculates the current position in chars.
    pub fn calc_char_pos(&self) -> usize {
        self.calc_char_pos_at(self.pos)
    }

    /// Calculates the current position in chars.
    pub fn calc_char_pos_at(&self, byte_pos: usize) -> usize {
        let mut pos = 1;
        for (idx, _) in self.text.char_indices() {
            if idx >= byte_pos {
                break;
            }

            pos += 1;
        }

        pos
    }

    /// Sets current position equal to the end.
    ///
    /// Used to indicate end of parsing on error.
    #[inline]
    pub fn jump_to_end(&mut self) {
        self.pos = self.text.len();
    }

    /// Checks if the stream is reached the end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Errors
    ///
    /// - `UnexpectedEndOfStream`
    #[inline]
    pub fn curr_byte(&self) -> Result<u8, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        Ok(self.curr_byte_unchecked())
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Panics
    ///
    /// - if the current position is after the end of the data
    #[inline]
    pub fn curr_byte_unchecked(&self) -> u8 {
        self.text.as_bytes()[self.pos]
    }

    /// Returns a current byte or `0` at the end of the stream.
    #[inline]
    fn peek(&self) -> u8 {
        self.text.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// Checks that current byte is equal to provided.
    ///
    /// Returns `false` if no bytes left.
    #[inline]
    pub fn is_curr_byte_eq(&self, c: u8) -> bool {
        if !self.at_end() {
            self.curr_byte_unchecked() == c
        } else {
            false
        }
    }

    /// Advances by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos += n;
    }

    /// Skips whitespaces.
    ///
    /// Accepted values: `' ' \n \r \t`.
    pub fn skip_spaces(&mut self) {
        while !self.at_end() && self.curr_byte_unchecked().is_space() {
            self.advance(1);
        }
    }

    /// Skips any amount of spaces and commas between numbers.
    pub fn skip_number_separators(&mut self) {
        self.skip_bytes(|_, c| c.is_space() || c == b',');
    }

    /// Checks that the stream starts with a selected text.
    #[inline]
    pub fn starts_with(&self, text: &[u8]) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(text)
    }

    /// Consumes current byte if it's equal to the provided byte.
    ///
    /// # Errors
    ///
    /// - `InvalidChar`
    /// - `UnexpectedEndOfStream`
    pub fn consume_byte(&mut self, c: u8) -> Result<(), Error> {
        if self.curr_byte()? != c {
            return Err(Error::InvalidChar {
                actual: self.curr_byte_unchecked() as char,
                expected: c as char,
                pos: self.calc_char_pos(),
            });
        }

        self.advance(1);
        Ok(())
    }

    /// Consumes bytes by the predicate and returns them.
    ///
    /// The result can be empty.
    pub fn consume_bytes<F>(&mut self, f: F) -> &'a str
    where
        F: Fn(&Stream, u8) -> bool,
    {
        let start = self.pos();
        self.skip_bytes(f);
        self.slice_back(start)
    }

    /// Consumes bytes by the predicate.
    pub fn skip_bytes<F>(&mut self, f: F)
    where
        F: Fn(&Stream, u8) -> bool,
    {
        while !self.at_end() {
            let c = self.curr_byte_unchecked();
            if f(self, c) {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Slices data from `pos` to the current position.
    #[inline]
    pub fn slice_back(&self, pos: usize) -> &'a str {
        &self.text[pos..self.pos]
    }

    /// Slices data from the current position to the end.
    #[inline]
    pub fn slice_tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Parses a number from the stream.
    ///
    /// The mantissa keeps at most 9 significant digits. Any extra integer
    /// digits only shift the exponent and extra fraction digits are dropped.
    /// Up to 3 exponent digits are honored.
    ///
    /// Returns `NaN` when the stream doesn't start with a number.
    /// Returns infinity when the effective exponent is `>= 128`
    /// and zero when it is `< -125`.
    ///
    /// Unlike other methods, does not skip leading spaces.
    ///
    /// # Errors
    ///
    /// - `InvalidNumber` on `e` that is not followed by digits
    ///   and on a decimal point without any digits around it.
    pub fn parse_number(&mut self) -> Result<f64, Error> {
        let start = self.pos;

        let mut mantissa: i64 = 0;
        let mut mantissa_digits = 0;
        let mut mantissa_read = false;
        let mut exponent: i32 = 0;
        let mut exponent_digits = 0;
        let mut exponent_adjust: i32 = 0;

        let mut negative = false;
        match self.peek() {
            b'-' => {
                negative = true;
                self.advance(1);
            }
            b'+' => self.advance(1),
            _ => {}
        }

        match self.peek() {
            b'.' => {}
            c if c.is_digit() => {
                mantissa_read = true;

                while self.peek() == b'0' {
                    self.advance(1);
                }

                while self.peek().is_digit() {
                    if mantissa_digits < MAX_MANTISSA_DIGITS {
                        mantissa = mantissa * 10 + i64::from(self.peek() - b'0');
                        mantissa_digits += 1;
                    } else {
                        exponent_adjust += 1;
                    }

                    self.advance(1);
                }
            }
            _ => return Ok(f64::NAN),
        }

        if self.peek() == b'.' {
            self.advance(1);

            if self.peek().is_digit() {
                if mantissa_digits == 0 {
                    while self.peek() == b'0' {
                        exponent_adjust -= 1;
                        self.advance(1);
                    }
                }

                while self.peek().is_digit() {
                    if mantissa_digits < MAX_MANTISSA_DIGITS {
                        mantissa = mantissa * 10 + i64::from(self.peek() - b'0');
                        mantissa_digits += 1;
                        exponent_adjust -= 1;
                    }

                    self.advance(1);
                }
            } else if !mantissa_read {
                return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
            }
        }

        if matches!(self.peek(), b'e' | b'E') {
            self.advance(1);

            let mut exponent_negative = false;
            match self.peek() {
                b'-' => {
                    exponent_negative = true;
                    self.advance(1);
                }
                b'+' => self.advance(1),
                _ => {}
            }

            if !self.peek().is_digit() {
                return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
            }

            while self.peek() == b'0' {
                self.advance(1);
            }

            while self.peek().is_digit() {
                if exponent_digits < MAX_EXPONENT_DIGITS {
                    exponent = exponent * 10 + i32::from(self.peek() - b'0');
                    exponent_digits += 1;
                }

                self.advance(1);
            }

            if exponent_negative {
                exponent = -exponent;
            }
        }

        if negative {
            mantissa = -mantissa;
        }

        Ok(build_number(mantissa, exponent + exponent_adjust))
    }

    /// Parses the next number of a list.
    ///
    /// Skips leading spaces, multiplies the result by `scale`
    /// and skips the separators that follow.
    pub fn next_number(&mut self, scale: f64) -> Result<f64, Error> {
        self.skip_spaces();
        let n = self.parse_number()?;
        self.skip_number_separators();
        Ok(n * scale)
    }

    /// Parses number from a list of numbers.
    ///
    /// Unlike [`next_number`](Stream::next_number), fails on a missing number.
    pub fn parse_list_number(&mut self) -> Result<f64, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        self.skip_spaces();
        let start = self.pos;
        let n = self.parse_number()?;
        if n.is_nan() {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        self.skip_spaces();
        self.parse_list_separator();
        Ok(n)
    }

    /// Parses number or percent from the stream.
    ///
    /// Percent value will be normalized.
    pub fn parse_number_or_percent(&mut self) -> Result<f64, Error> {
        self.skip_spaces();

        let start = self.pos;
        let n = self.parse_number()?;
        if n.is_nan() {
            return Err(Error::InvalidNumber(self.calc_char_pos_at(start)));
        }

        if self.starts_with(b"%") {
            self.advance(1);
            Ok(n / 100.0)
        } else {
            Ok(n)
        }
    }

    /// Skips digits.
    pub fn skip_digits(&mut self) {
        self.skip_bytes(|_, c| c.is_digit());
    }

    #[inline]
    pub(crate) fn parse_list_separator(&mut self) {
        if self.is_curr_byte_eq(b',') {
            self.advance(1);
        }
    }
}

/// Builds a number from a mantissa and a decimal exponent.
fn build_number(mantissa: i64, exponent: i32) -> f64 {
    if exponent < MIN_EXPONENT || mantissa == 0 {
        return 0.0;
    }

    if exponent >= MAX_EXPONENT {
        return if mantissa > 0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }

    // Powers of ten up to 1e22 are exact, so a single operation is correctly rounded.
    if exponent.abs() <= 22 {
        let mantissa = mantissa as f64;
        let pow = POW10[exponent.unsigned_abs() as usize];
        return if exponent >= 0 {
            mantissa * pow
        } else {
            mantissa / pow
        };
    }

    // Larger scales go through the correctly rounded decimal conversion.
    format!("{}e{}", mantissa, exponent)
        .parse()
        .unwrap_or_default()
}

const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Parses a whitespace/comma separated list of numbers.
///
/// Stops before a path command letter or a closing parenthesis.
/// A trailing fragment that is not a number is dropped.
///
/// ```
/// assert_eq!(vgtypes::parse_number_list("10, 20 -5e1"), vec![10.0, 20.0, -50.0]);
/// assert_eq!(vgtypes::parse_number_list("1 2 L 3"), vec![1.0, 2.0]);
/// assert_eq!(vgtypes::parse_number_list("1 2 q2w"), vec![1.0, 2.0]);
/// ```
pub fn parse_number_list(text: &str) -> Vec<f64> {
    let mut s = Stream::from(text);
    let mut list = Vec::new();

    loop {
        s.skip_number_separators();
        if s.at_end() || is_list_terminator(s.curr_byte_unchecked()) {
            break;
        }

        let start = s.pos();
        let n = match s.parse_number() {
            Ok(n) if !n.is_nan() => n,
            _ => {
                drop_fragment(&mut s, start);
                break;
            }
        };

        // A number must be followed by a separator, a terminator or another number.
        let c = s.peek();
        if !(s.at_end() || c.is_space() || c == b',' || c.is_number_start() || is_list_terminator(c))
        {
            drop_fragment(&mut s, start);
            break;
        }

        list.push(n);
    }

    list
}

fn drop_fragment(s: &mut Stream, start: usize) {
    s.pos = start;
    s.skip_bytes(|_, c| !(c.is_space() || c == b','));
    let fragment = &s.text[start..s.pos()];
    s.skip_number_separators();
    if !s.at_end() {
        log::warn!("Failed to parse a number list at '{}'. The rest is ignored.", fragment);
    }
}
