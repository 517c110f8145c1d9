// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use vgtypes::{Color, Stream};

use crate::derivation::NodeState;
use crate::paint_server::{apply_opacity, Shader};
use crate::tree::{AId, SvgNode};
use crate::units::{self, Context, Length, Unit};
use crate::OptionLog;

/// A line cap.
///
/// `stroke-linecap` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        Self::Butt
    }
}

/// A line join.
///
/// `stroke-linejoin` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        Self::Miter
    }
}

/// A resolved fill or stroke paint.
#[derive(Clone, PartialEq, Debug)]
pub struct Paint {
    /// A solid color, with opacity already applied.
    ///
    /// When a shader is set, only the alpha channel is used.
    pub color: Color,

    /// A gradient that replaces the solid color.
    pub shader: Option<Shader>,

    /// A stroke width, in scaled user space.
    ///
    /// Zero for fills.
    pub width: f64,

    /// A stroke line cap.
    pub line_cap: LineCap,

    /// A stroke line join.
    pub line_join: LineJoin,
}

impl Paint {
    fn from_color(color: Color) -> Self {
        Paint {
            color,
            shader: None,
            width: 0.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
        }
    }
}

enum PaintValue<'a> {
    None,
    Color(Color),
    Url(&'a str, Option<Color>),
}

/// Parses a `fill` or `stroke` value.
///
/// Returns `Err` with a diagnostic for unparseable colors.
fn parse_paint(value: &str) -> Result<PaintValue, String> {
    let value = value.trim();
    if value == "none" {
        return Ok(PaintValue::None);
    }

    if let Some(rest) = value.strip_prefix("url(") {
        let end = rest
            .find(')')
            .ok_or_else(|| format!("unclosed url in '{}'", value))?;
        let link = rest[..end].trim();
        let link = link.strip_prefix('#').unwrap_or(link);

        // A fallback color can follow the link.
        let fallback = rest[end + 1..].trim();
        let fallback = if fallback.is_empty() || fallback == "none" {
            None
        } else {
            let mut s = Stream::from(fallback);
            s.parse_color().ok()
        };

        return Ok(PaintValue::Url(link, fallback));
    }

    Color::from_str(value)
        .map(PaintValue::Color)
        .map_err(|e| format!("'{}' cause {}", value, e))
}

fn resolve_opacity(node: SvgNode, aid: AId) -> f64 {
    units::resolve_number(node, AId::Opacity)
        .or_else(|| units::resolve_number(node, aid))
        .unwrap_or(1.0)
        .max(0.0)
        .min(1.0)
}

fn find_shader(node: SvgNode, link: &str, states: &[NodeState]) -> Option<Shader> {
    let server = node.document().element_by_id(link).log_none(|| {
        log::warn!(
            "Element '{}' references an unknown paint server '#{}'.",
            node.element_id(),
            link
        )
    })?;

    match states.get(server.id().get_usize()) {
        Some(NodeState::Gradient(shader)) => shader.clone(),
        _ => {
            log::warn!("'#{}' is not a valid paint server.", link);
            None
        }
    }
}

/// Resolves the fill of a figure.
///
/// A missing `fill` is opaque black. An unknown color is transparent.
pub(crate) fn resolve_fill(node: SvgNode, states: &[NodeState]) -> Option<Paint> {
    let opacity = resolve_opacity(node, AId::FillOpacity);

    let value = match node.find_attribute(AId::Fill) {
        Some(v) => v,
        None => return Some(Paint::from_color(Color::black().with_opacity(opacity))),
    };

    match parse_paint(value) {
        Ok(PaintValue::None) => None,
        Ok(PaintValue::Color(color)) => Some(Paint::from_color(apply_opacity(color, opacity))),
        Ok(PaintValue::Url(link, fallback)) => match find_shader(node, link, states) {
            Some(shader) => {
                let mut paint = Paint::from_color(Color::black().with_opacity(opacity));
                paint.shader = Some(shader);
                Some(paint)
            }
            None => fallback.map(|c| Paint::from_color(apply_opacity(c, opacity))),
        },
        Err(e) => {
            log::warn!("Failed to parse fill value: {}.", e);
            Some(Paint::from_color(Color::transparent()))
        }
    }
}

/// Resolves the stroke of a figure.
///
/// A stroke exists only when `stroke` resolves to a color or to a paint server.
pub(crate) fn resolve_stroke(node: SvgNode, ctx: &Context, states: &[NodeState]) -> Option<Paint> {
    let opacity = resolve_opacity(node, AId::StrokeOpacity);

    let mut paint = match parse_paint(node.find_attribute(AId::Stroke)?) {
        Ok(PaintValue::None) => return None,
        Ok(PaintValue::Color(color)) => Paint::from_color(apply_opacity(color, opacity)),
        Ok(PaintValue::Url(link, fallback)) => match find_shader(node, link, states) {
            Some(shader) => {
                let mut paint = Paint::from_color(Color::black().with_opacity(opacity));
                paint.shader = Some(shader);
                paint
            }
            None => Paint::from_color(apply_opacity(fallback?, opacity)),
        },
        Err(e) => {
            log::warn!("Failed to parse stroke value: {}.", e);
            return None;
        }
    };

    let width = units::convert_inherited_length(
        node,
        AId::StrokeWidth,
        ctx,
        Length::new(1.0, Unit::None),
    );
    if !(width > 0.0) {
        return None;
    }
    paint.width = width;

    paint.line_cap = match node.find_attribute(AId::StrokeLinecap).map(str::trim) {
        Some("butt") | None => LineCap::Butt,
        Some("round") => LineCap::Round,
        Some("square") => LineCap::Square,
        Some(value) => {
            log::warn!("Unknown stroke-linecap value: '{}'.", value);
            LineCap::Butt
        }
    };

    paint.line_join = match node.find_attribute(AId::StrokeLinejoin).map(str::trim) {
        Some("miter") | None => LineJoin::Miter,
        Some("round") => LineJoin::Round,
        Some("bevel") => LineJoin::Bevel,
        Some(value) => {
            log::warn!("Unknown stroke-linejoin value: '{}'.", value);
            LineJoin::Miter
        }
    };

    Some(paint)
}

/// Checks that an element is not hidden by `display:none`.
pub(crate) fn is_visible(node: SvgNode) -> bool {
    node.style_attribute(AId::Display).map(str::trim) != Some("none")
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, Options, Size};

    fn with_rect<F: Fn(SvgNode, &Document)>(attrs: &str, f: F) {
        let text = format!("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <linearGradient id='lg1'><stop/></linearGradient>
                <g fill='#00f' stroke-width='3'>
                    <rect id='r' width='10' height='10' {}/>
                </g>
            </svg>
        ", attrs);
        let doc = Document::parse_str(&text, &Options::default()).unwrap();
        let node = doc.element_by_id("r").unwrap();
        f(node, &doc);
    }

    fn ctx() -> Context {
        Context::new(2.0, Size::from_wh(100.0, 100.0))
    }

    #[test]
    fn fill_is_inherited() {
        with_rect("", |node, doc| {
            let fill = resolve_fill(node, &doc.states).unwrap();
            assert_eq!(fill.color, Color::new_rgb(0, 0, 255));
            assert!(fill.shader.is_none());
        });
    }

    #[test]
    fn fill_none() {
        with_rect("fill='none'", |node, doc| {
            assert!(resolve_fill(node, &doc.states).is_none());
        });
    }

    #[test]
    fn fill_unknown_color_is_transparent() {
        with_rect("fill='qwe'", |node, doc| {
            let fill = resolve_fill(node, &doc.states).unwrap();
            assert!(fill.color.is_transparent());
        });
    }

    #[test]
    fn fill_from_style() {
        with_rect("fill='red' style='fill:#0f0; fill-opacity:0.5'", |node, doc| {
            let fill = resolve_fill(node, &doc.states).unwrap();
            assert_eq!(fill.color, Color::new_rgba(0, 255, 0, 128));
        });
    }

    #[test]
    fn opacity_wins_over_fill_opacity() {
        with_rect("fill-opacity='0.5' opacity='0'", |node, doc| {
            let fill = resolve_fill(node, &doc.states).unwrap();
            assert_eq!(fill.color.alpha, 0);
        });
    }

    #[test]
    fn fill_url() {
        with_rect("fill='url(#lg1)'", |node, doc| {
            let fill = resolve_fill(node, &doc.states).unwrap();
            assert_eq!(fill.shader.unwrap().id, "lg1");
        });
    }

    #[test]
    fn fill_missing_url() {
        with_rect("fill='url(#lg2)'", |node, doc| {
            assert!(resolve_fill(node, &doc.states).is_none());
        });

        with_rect("fill='url(#lg2) red'", |node, doc| {
            let fill = resolve_fill(node, &doc.states).unwrap();
            assert_eq!(fill.color, Color::new_rgb(255, 0, 0));
        });
    }

    #[test]
    fn stroke_is_optional() {
        with_rect("", |node, doc| {
            assert!(resolve_stroke(node, &ctx(), &doc.states).is_none());
        });

        with_rect("stroke='qwe'", |node, doc| {
            assert!(resolve_stroke(node, &ctx(), &doc.states).is_none());
        });
    }

    #[test]
    fn stroke_props() {
        with_rect("stroke='red' stroke-linecap='round' stroke-linejoin='bevel'", |node, doc| {
            let stroke = resolve_stroke(node, &ctx(), &doc.states).unwrap();
            assert_eq!(stroke.color, Color::new_rgb(255, 0, 0));
            assert_eq!(stroke.width, 6.0);
            assert_eq!(stroke.line_cap, LineCap::Round);
            assert_eq!(stroke.line_join, LineJoin::Bevel);
        });
    }

    #[test]
    fn stroke_defaults() {
        with_rect("stroke='red' stroke-width='qwe' stroke-linecap='qwe'", |node, doc| {
            let stroke = resolve_stroke(node, &ctx(), &doc.states).unwrap();
            assert_eq!(stroke.width, 2.0);
            assert_eq!(stroke.line_cap, LineCap::Butt);
            assert_eq!(stroke.line_join, LineJoin::Miter);
        });
    }

    #[test]
    fn display() {
        with_rect("style='display:none'", |node, _| assert!(!is_visible(node)));
        with_rect("display='inline'", |node, _| assert!(is_visible(node)));
    }
}
