// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use vgtypes::{Stream, Transform};

use crate::tree::{AId, SvgNode};
use crate::Size;

/// A length unit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Unit {
    None,
    Px,
    Percent,
}

/// A number with a unit.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Length {
    pub number: f64,
    pub unit: Unit,
}

impl Length {
    /// Creates a new length.
    #[inline]
    pub const fn new(number: f64, unit: Unit) -> Self {
        Length { number, unit }
    }

    /// Creates a zero length without a unit.
    #[inline]
    pub const fn zero() -> Self {
        Length::new(0.0, Unit::None)
    }
}

/// Parses a number followed by an optional `px` or `%` suffix.
pub(crate) fn parse_length(text: &str) -> Option<(f64, Unit)> {
    let mut s = Stream::from(text);
    s.skip_spaces();
    let n = s.parse_number().ok()?;
    if n.is_nan() {
        return None;
    }

    let unit = if s.starts_with(b"px") {
        s.advance(2);
        Unit::Px
    } else if s.starts_with(b"%") {
        s.advance(1);
        Unit::Percent
    } else {
        Unit::None
    };

    s.skip_spaces();
    if !s.at_end() {
        return None;
    }

    Some((n, unit))
}

/// Parses a plain number, surrounded by optional spaces.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    match parse_length(text)? {
        (n, Unit::None) => Some(n),
        _ => None,
    }
}

/// The state every derived value depends on.
///
/// Passed explicitly through the derivation instead of being stored globally,
/// so a derivation can run with any scale at any time.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Context {
    /// A factor applied to every coordinate and length.
    pub scale: f64,
    /// A base for percentage values, in unscaled units.
    pub viewport: Size,
}

impl Context {
    /// Creates a new context.
    #[inline]
    pub fn new(scale: f64, viewport: Size) -> Self {
        Context { scale, viewport }
    }

    /// Converts a length into a scaled user-space value.
    ///
    /// Percentages are resolved against the viewport dimension
    /// the attribute is tied to.
    pub fn convert_length(&self, length: Length, aid: AId) -> f64 {
        let n = match length.unit {
            Unit::None | Unit::Px => length.number,
            Unit::Percent => {
                let base = match aid {
                    AId::Cx | AId::Rx | AId::Width | AId::X | AId::X1 | AId::X2 => {
                        self.viewport.width()
                    }
                    AId::Cy | AId::Ry | AId::Height | AId::Y | AId::Y1 | AId::Y2 => {
                        self.viewport.height()
                    }
                    _ => {
                        let w = self.viewport.width();
                        let h = self.viewport.height();
                        ((w * w + h * h) / 2.0).sqrt()
                    }
                };

                base * length.number / 100.0
            }
        };

        n * self.scale
    }
}

/// Resolves a length attribute into a scaled user-space value.
///
/// Missing and malformed values fall back to `def`.
pub(crate) fn convert_length(node: SvgNode, aid: AId, ctx: &Context, def: Length) -> f64 {
    convert_value(node.attribute(aid), aid, ctx, def)
}

/// Resolves an inheritable length property, like `stroke-width`.
pub(crate) fn convert_inherited_length(
    node: SvgNode,
    aid: AId,
    ctx: &Context,
    def: Length,
) -> f64 {
    convert_value(node.find_attribute(aid), aid, ctx, def)
}

fn convert_value(value: Option<&str>, aid: AId, ctx: &Context, def: Length) -> f64 {
    let length = match value {
        Some(value) => match parse_length(value) {
            Some((number, unit)) => Length::new(number, unit),
            None => {
                log::warn!("Failed to parse {} value: '{}'.", aid, value);
                def
            }
        },
        None => def,
    };

    ctx.convert_length(length, aid)
}

/// Resolves a transform attribute in scaled user space.
///
/// Returns `None` for a missing or an identity transform.
/// A malformed transform list is treated as identity.
pub(crate) fn convert_transform(node: SvgNode, aid: AId, ctx: &Context) -> Option<Transform> {
    let value = node.attribute(aid)?;
    let ts = match Transform::from_str(value) {
        Ok(ts) => ts,
        Err(e) => {
            log::warn!("Failed to parse {} value: '{}' cause {}.", aid, value, e);
            return None;
        }
    };

    let ts = ts.scale_translation(ctx.scale);
    if ts.is_identity() {
        None
    } else {
        Some(ts)
    }
}

/// Resolves a property that is a plain number, like an opacity.
///
/// Returns `None` for missing and malformed values.
pub(crate) fn resolve_number(node: SvgNode, aid: AId) -> Option<f64> {
    let value = node.find_attribute(aid)?;
    let n = parse_number(value);
    if n.is_none() {
        log::warn!("Failed to parse {} value: '{}'.", aid, value);
    }
    n
}
