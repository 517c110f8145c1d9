// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
*vgtypes* contains the value parsers of the *vgscene* vector document engine.

## Supported types

- numbers and whitespace/comma separated number lists
- transform lists: `matrix`, `translate`, `scale`, `rotate`, `skewX` and `skewY`
- path data, with absolute and relative `M L H V C S Q T A Z` commands
- colors: `#rgb`, `#rrggbb`, `rgb()` and the color keywords

## Numbers

Numbers are parsed the same way on every platform: at most 9 significant
mantissa digits and 3 exponent digits are honored. An effective exponent
below -125 produces zero and one at or above 128 produces infinity.
Text without a number parses as `NaN` instead of an error.

## Safety

- The library should not panic.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod color;
#[rustfmt::skip] mod colors;
mod error;
mod path;
mod rect;
mod stream;
mod transform;

pub use crate::color::*;
pub use crate::error::*;
pub use crate::path::*;
pub use crate::rect::*;
pub use crate::stream::{parse_number_list, Stream};
pub use crate::transform::*;
