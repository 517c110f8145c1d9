// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

/// A tokenizer error.
///
/// Positions are character offsets, starting from 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The text ended in the middle of a value.
    UnexpectedEndOfStream,

    /// A value is followed by garbage.
    UnexpectedData(usize),

    /// The text is not a value of the requested type, like a color named `zzz`.
    InvalidValue,

    /// A separator or a bracket is missing.
    InvalidChar {
        /// The character that was found.
        actual: char,
        /// The character that was required.
        expected: char,
        /// Position of `actual`.
        pos: usize,
    },

    /// A malformed number, like `1e`, `1e+x` or a lone `.`.
    InvalidNumber(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnexpectedEndOfStream => f.write_str("the text ended too early"),
            Error::UnexpectedData(pos) => write!(f, "trailing data at {}", pos),
            Error::InvalidValue => f.write_str("not a valid value"),
            Error::InvalidChar {
                actual,
                expected,
                pos,
            } => write!(f, "'{}' expected at {}, found '{}'", expected, pos, actual),
            Error::InvalidNumber(pos) => write!(f, "malformed number at {}", pos),
        }
    }
}

impl std::error::Error for Error {}
