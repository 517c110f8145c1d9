// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`vgtree` is the scene tree of the *vgscene* vector document engine.

A [`Document`] is built once from a stream of [`XmlEvent`]s
(or from SVG text through `roxmltree`) and then derived any number of times.
A derivation turns raw attributes into transforms, paints and geometry
for a given scale factor and accumulates the document bounding box.

```
let opt = vgtree::Options::default();
let doc = vgtree::Document::parse_str(
    "<svg xmlns='http://www.w3.org/2000/svg'><rect width='10' height='5'/></svg>",
    &opt,
).unwrap();
assert_eq!(doc.bbox().width(), 10.0);
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

mod derivation;
mod paint_server;
mod shapes;
mod style;
mod text;
mod tree;
mod units;

pub use crate::derivation::*;
pub use crate::paint_server::*;
pub use crate::shapes::*;
pub use crate::style::*;
pub use crate::text::*;
pub use crate::tree::*;
pub use crate::units::{Context, Length, Unit};
pub use roxmltree;
pub use vgtypes;

/// List of all errors.
///
/// Every error aborts the build. Malformed attributes and broken references
/// are recovered locally and never show up here.
#[derive(Debug)]
pub enum Error {
    /// The first element is not `svg` or there are no elements at all.
    NoRootNode,

    /// Only UTF-8 content is supported.
    NotAnUtf8Str,

    /// We do not allow documents with more than 1_000_000 elements for security reasons.
    ElementsLimitReached,

    /// An end event doesn't match the currently open element.
    UnexpectedEnd {
        /// The currently open element. Empty when none is open.
        expected: String,
        /// The name from the end event.
        actual: String,
    },

    /// The event stream ended while elements were still open.
    UnclosedElements,

    /// Failed to parse an XML data.
    ParsingFailed(roxmltree::Error),
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NoRootNode => {
                write!(f, "document doesn't have a root 'svg' element")
            }
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::ElementsLimitReached => {
                write!(f, "the maximum number of elements has been reached")
            }
            Error::UnexpectedEnd {
                ref expected,
                ref actual,
            } => {
                if expected.is_empty() {
                    write!(f, "unexpected '</{}>' without an open element", actual)
                } else {
                    write!(f, "expected '</{}>' not '</{}>'", expected, actual)
                }
            }
            Error::UnclosedElements => {
                write!(f, "the document has unclosed elements")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "XML data parsing failed cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Build options.
#[derive(Clone, Debug)]
pub struct Options {
    /// The viewport size used when the root element declares no size.
    ///
    /// Also the base of percentage lengths in that case.
    ///
    /// Default: 100x100
    pub default_size: Size,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            default_size: Size::from_wh(100.0, 100.0),
        }
    }
}

/// A width and height pair.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size.
    ///
    /// Negative and `NaN` dimensions become zero.
    #[inline]
    pub fn from_wh(width: f64, height: f64) -> Self {
        Size {
            width: if width > 0.0 { width } else { 0.0 },
            height: if height > 0.0 { height } else { 0.0 },
        }
    }

    /// Returns the width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Checks that any dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
