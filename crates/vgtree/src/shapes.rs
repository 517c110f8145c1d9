// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgtypes::{BBox, PathData, Rect};

use crate::tree::{AId, EId, SvgNode};
use crate::units::{self, Context, Length};

/// A resolved shape geometry, in scaled user space.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Shape {
    /// A rectangle. `rx` and `ry` are never larger than half of the size.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    /// A line. Stroke only.
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// A `path`, `polyline` or `polygon`.
    Path(PathData),
}

impl Shape {
    /// Returns the shape bounds.
    ///
    /// Path bounds include curve control points.
    pub fn bbox(&self) -> BBox {
        match *self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => BBox::from(Rect::from_xywh(x, y, width, height)),
            Shape::Circle { cx, cy, r } => {
                BBox::from(Rect::from_ltrb(cx - r, cy - r, cx + r, cy + r))
            }
            Shape::Ellipse { cx, cy, rx, ry } => {
                BBox::from(Rect::from_ltrb(cx - rx, cy - ry, cx + rx, cy + ry))
            }
            Shape::Line { x1, y1, x2, y2 } => BBox::from(Rect::from_ltrb(x1, y1, x2, y2)),
            Shape::Path(ref path) => path.bbox(),
        }
    }

    /// Checks that the shape produces any drawing.
    ///
    /// A circle or an ellipse with a non-positive radius still has bounds,
    /// but is never drawn.
    pub fn is_drawable(&self) -> bool {
        match *self {
            Shape::Rect { .. } | Shape::Line { .. } => true,
            Shape::Circle { r, .. } => r > 0.0,
            Shape::Ellipse { rx, ry, .. } => rx > 0.0 && ry > 0.0,
            Shape::Path(ref path) => !path.is_empty(),
        }
    }
}

pub(crate) fn convert(node: SvgNode, ctx: &Context) -> Option<Shape> {
    match node.tag_name()? {
        EId::Rect => convert_rect(node, ctx),
        EId::Circle => convert_circle(node, ctx),
        EId::Ellipse => convert_ellipse(node, ctx),
        EId::Line => convert_line(node, ctx),
        EId::Polyline => convert_polyline(node, ctx, false),
        EId::Polygon => convert_polyline(node, ctx, true),
        EId::Path => convert_path(node, ctx),
        _ => None,
    }
}

fn convert_rect(node: SvgNode, ctx: &Context) -> Option<Shape> {
    // 'width' and 'height' attributes must be positive and non-zero.
    let width = units::convert_length(node, AId::Width, ctx, Length::zero());
    let height = units::convert_length(node, AId::Height, ctx, Length::zero());
    if !(width > 0.0 && height > 0.0) {
        log::warn!(
            "Rect '{}' has an invalid size. Skipped.",
            node.element_id()
        );
        return None;
    }

    let x = units::convert_length(node, AId::X, ctx, Length::zero());
    let y = units::convert_length(node, AId::Y, ctx, Length::zero());

    let (rx, ry) = resolve_rx_ry(node, ctx);

    Some(Shape::Rect {
        x,
        y,
        width,
        height,
        rx: rx.min(width / 2.0),
        ry: ry.min(height / 2.0),
    })
}

fn resolve_rx_ry(node: SvgNode, ctx: &Context) -> (f64, f64) {
    let positive = |aid| {
        node.attribute(aid)?;
        let n = units::convert_length(node, aid, ctx, Length::zero());
        if n > 0.0 {
            Some(n)
        } else {
            None
        }
    };

    match (positive(AId::Rx), positive(AId::Ry)) {
        (None, None) => (0.0, 0.0),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    }
}

fn convert_circle(node: SvgNode, ctx: &Context) -> Option<Shape> {
    Some(Shape::Circle {
        cx: units::convert_length(node, AId::Cx, ctx, Length::zero()),
        cy: units::convert_length(node, AId::Cy, ctx, Length::zero()),
        r: units::convert_length(node, AId::R, ctx, Length::zero()),
    })
}

fn convert_ellipse(node: SvgNode, ctx: &Context) -> Option<Shape> {
    Some(Shape::Ellipse {
        cx: units::convert_length(node, AId::Cx, ctx, Length::zero()),
        cy: units::convert_length(node, AId::Cy, ctx, Length::zero()),
        rx: units::convert_length(node, AId::Rx, ctx, Length::zero()),
        ry: units::convert_length(node, AId::Ry, ctx, Length::zero()),
    })
}

fn convert_line(node: SvgNode, ctx: &Context) -> Option<Shape> {
    Some(Shape::Line {
        x1: units::convert_length(node, AId::X1, ctx, Length::zero()),
        y1: units::convert_length(node, AId::Y1, ctx, Length::zero()),
        x2: units::convert_length(node, AId::X2, ctx, Length::zero()),
        y2: units::convert_length(node, AId::Y2, ctx, Length::zero()),
    })
}

fn convert_polyline(node: SvgNode, ctx: &Context, close: bool) -> Option<Shape> {
    let numbers = vgtypes::parse_number_list(node.attribute(AId::Points).unwrap_or(""));

    // At least one coordinate pair is required. An odd trailing number is ignored.
    if numbers.len() < 2 {
        log::warn!(
            "{} '{}' has an invalid 'points' value. Skipped.",
            node.tag_name()?,
            node.element_id()
        );
        return None;
    }

    let mut path = PathData::new();
    for (i, pair) in numbers.chunks_exact(2).enumerate() {
        let x = pair[0] * ctx.scale;
        let y = pair[1] * ctx.scale;
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }

    if close {
        path.close();
    }

    Some(Shape::Path(path))
}

fn convert_path(node: SvgNode, ctx: &Context) -> Option<Shape> {
    let path = PathData::parse(node.attribute(AId::D)?, ctx.scale);
    if path.is_empty() {
        return None;
    }

    Some(Shape::Path(path))
}
