// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use vgtypes::{Color, Transform};

use crate::tree::{AId, EId, SvgNode};
use crate::units::{self, Context, Length, Unit};
use crate::OptionLog;

/// A spread method.
///
/// `spreadMethod` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

impl Default for SpreadMethod {
    fn default() -> Self {
        Self::Pad
    }
}

/// A gradient stop.
///
/// `stop` element in the SVG.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stop {
    /// Gradient stop offset, in the `0..=1` range.
    ///
    /// Never smaller than the offset of the previous stop.
    pub offset: f64,
    /// The stop color, with `stop-opacity` already applied.
    pub color: Color,
}

/// A gradient geometry.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ShaderKind {
    Linear { x1: f64, y1: f64, x2: f64, y2: f64 },
    Radial { cx: f64, cy: f64, r: f64 },
}

/// A resolved gradient.
///
/// Coordinates are in scaled user space.
#[derive(Clone, PartialEq, Debug)]
pub struct Shader {
    /// Element's ID.
    ///
    /// Taken from the SVG itself.
    /// Never empty.
    pub id: String,

    /// Gradient geometry.
    pub kind: ShaderKind,

    /// A list of at least one stop.
    pub stops: Vec<Stop>,

    /// Gradient transform.
    ///
    /// `gradientTransform` in SVG.
    pub transform: Transform,

    /// Gradient spreading method.
    ///
    /// `spreadMethod` in SVG.
    pub spread_method: SpreadMethod,
}

/// Resolves a gradient element into a shader.
///
/// Returns `None` for a gradient without stops, with a zero radius
/// or with a broken `href` chain.
pub(crate) fn convert(node: SvgNode, ctx: &Context) -> Option<Shader> {
    let id = node.element_id();
    if id.is_empty() {
        return None;
    }

    let stops = convert_stops(find_gradient_with_stops(node)?);
    if stops.is_empty() {
        log::warn!("Gradient '{}' has no stops. Skipped.", id);
        return None;
    }

    let kind = match node.tag_name()? {
        EId::LinearGradient => ShaderKind::Linear {
            x1: resolve_number(node, AId::X1, ctx, Length::zero()),
            y1: resolve_number(node, AId::Y1, ctx, Length::zero()),
            x2: resolve_number(node, AId::X2, ctx, Length::new(100.0, Unit::Percent)),
            y2: resolve_number(node, AId::Y2, ctx, Length::zero()),
        },
        EId::RadialGradient => {
            let r = resolve_number(node, AId::R, ctx, Length::new(50.0, Unit::Percent));
            if !(r > 0.0) {
                log::warn!("Radial gradient '{}' has an invalid radius. Skipped.", id);
                return None;
            }

            ShaderKind::Radial {
                cx: resolve_number(node, AId::Cx, ctx, Length::new(50.0, Unit::Percent)),
                cy: resolve_number(node, AId::Cy, ctx, Length::new(50.0, Unit::Percent)),
                r,
            }
        }
        _ => return None,
    };

    let transform = {
        let n = resolve_attr(node, AId::GradientTransform);
        units::convert_transform(n, AId::GradientTransform, ctx).unwrap_or_default()
    };

    Some(Shader {
        id: id.to_string(),
        kind,
        stops,
        transform,
        spread_method: convert_spread_method(node),
    })
}

fn convert_spread_method(node: SvgNode) -> SpreadMethod {
    let node = resolve_attr(node, AId::SpreadMethod);
    match node.attribute(AId::SpreadMethod).map(str::trim) {
        Some("pad") | None => SpreadMethod::Pad,
        Some("reflect") => SpreadMethod::Reflect,
        Some("repeat") => SpreadMethod::Repeat,
        Some(value) => {
            log::warn!("Unknown spreadMethod value: '{}'.", value);
            SpreadMethod::Pad
        }
    }
}

fn find_gradient_with_stops(node: SvgNode) -> Option<SvgNode> {
    for link in node.href_iter() {
        let tag_name = link.tag_name()?;
        if !tag_name.is_gradient() {
            log::warn!(
                "Gradient '{}' cannot reference '{}' via 'href'.",
                node.element_id(),
                tag_name
            );
            return None;
        }

        if link.children().any(|n| n.tag_name() == Some(EId::Stop)) {
            return Some(link);
        }
    }

    None.log_none(|| log::warn!("Gradient '{}' has no stops.", node.element_id()))
}

fn convert_stops(grad: SvgNode) -> Vec<Stop> {
    let mut stops = Vec::new();

    let mut prev_offset = 0.0;
    for stop in grad.children() {
        if stop.tag_name() != Some(EId::Stop) {
            continue;
        }

        // `offset` can be either a number or a percentage.
        let offset = match stop.attribute(AId::Offset) {
            Some(value) => match units::parse_length(value) {
                Some((n, Unit::None)) => n,
                Some((n, Unit::Percent)) => n / 100.0,
                _ => {
                    log::warn!("Failed to parse offset value: '{}'.", value);
                    prev_offset
                }
            },
            None => prev_offset,
        };
        let offset = offset.max(prev_offset).min(1.0);
        prev_offset = offset;

        let color = match stop.style_attribute(AId::StopColor) {
            Some(value) => match Color::from_str(value) {
                Ok(c) => c,
                Err(_) => {
                    log::warn!("Failed to parse stop-color value: '{}'.", value);
                    Color::black()
                }
            },
            None => Color::black(),
        };

        let opacity = units::resolve_number(stop, AId::StopOpacity).unwrap_or(1.0);
        stops.push(Stop {
            offset,
            color: apply_opacity(color, opacity),
        });
    }

    stops
}

/// Multiplies the color alpha by an opacity, clamped to `0..=1`.
pub(crate) fn apply_opacity(color: Color, opacity: f64) -> Color {
    color.with_opacity(color.alpha as f64 / 255.0 * opacity.max(0.0).min(1.0))
}

fn resolve_number(node: SvgNode, name: AId, ctx: &Context, def: Length) -> f64 {
    units::convert_length(resolve_attr(node, name), name, ctx, def)
}

fn resolve_attr(node: SvgNode, name: AId) -> SvgNode {
    if node.has_attribute(name) {
        return node;
    }

    let kind = match node.tag_name() {
        Some(v) => v,
        None => return node,
    };

    for link in node.href_iter() {
        let tag_name = match link.tag_name() {
            Some(v) => v,
            None => return node,
        };

        match (name, tag_name) {
            // Geometry can be resolved only from a gradient of the same kind.
              (AId::X1, EId::LinearGradient)
            | (AId::Y1, EId::LinearGradient)
            | (AId::X2, EId::LinearGradient)
            | (AId::Y2, EId::LinearGradient)
            | (AId::Cx, EId::RadialGradient)
            | (AId::Cy, EId::RadialGradient)
            | (AId::R,  EId::RadialGradient) => {
                if tag_name != kind {
                    break;
                }

                if link.has_attribute(name) {
                    return link;
                }
            }
              (AId::SpreadMethod, EId::LinearGradient)
            | (AId::SpreadMethod, EId::RadialGradient)
            | (AId::GradientTransform, EId::LinearGradient)
            | (AId::GradientTransform, EId::RadialGradient) => {
                if link.has_attribute(name) {
                    return link;
                }
            }
            _ => break,
        }
    }

    node
}
