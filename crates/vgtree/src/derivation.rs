// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgtypes::{BBox, Transform};

use crate::paint_server::{self, Shader};
use crate::shapes::{self, Shape};
use crate::style::{self, Paint};
use crate::text::{self, Text};
use crate::tree::{AId, Document, EId, SvgNode};
use crate::units::{self, Context, Unit};
use crate::Size;

/// A derived state of a single node.
///
/// Replaced as a whole by every derivation.
#[derive(Clone, Debug)]
pub enum NodeState {
    /// A node that is never drawn by itself.
    ///
    /// Its children are still visited.
    None,
    /// A group.
    Group(Group),
    /// A shape or a text.
    Figure(Box<Figure>),
    /// A gradient definition. `None` when the gradient is invalid.
    Gradient(Option<Shader>),
}

/// A derived group.
///
/// `svg`, `g` and `a` elements in the SVG.
#[derive(Clone, PartialEq, Debug)]
pub struct Group {
    /// Element's transform, in scaled user space.
    pub transform: Option<Transform>,
    /// `false` when hidden by `display:none`.
    pub display: bool,
}

/// A derived drawable element.
#[derive(Clone, PartialEq, Debug)]
pub struct Figure {
    /// Element's transform, in scaled user space.
    pub transform: Option<Transform>,
    /// Fill paint. Always `None` for lines.
    pub fill: Option<Paint>,
    /// Stroke paint.
    pub stroke: Option<Paint>,
    /// `false` when hidden by `display:none`.
    pub display: bool,
    /// Figure geometry.
    pub kind: FigureKind,
    /// Figure bounds in document space.
    ///
    /// Empty for text.
    pub bbox: BBox,
}

/// A figure geometry.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum FigureKind {
    Shape(Shape),
    Text(Text),
}

impl Document {
    /// Returns the viewport used for percentage lengths.
    ///
    /// The root element size, when declared, otherwise the default size.
    pub fn viewport(&self) -> Size {
        let (width, height) = self.declared_size();
        self.viewport_from(width, height)
    }

    fn viewport_from(&self, width: Option<f64>, height: Option<f64>) -> Size {
        Size::from_wh(
            width.unwrap_or(self.default_size().width()),
            height.unwrap_or(self.default_size().height()),
        )
    }

    fn declared_size(&self) -> (Option<f64>, Option<f64>) {
        match self.root_element() {
            Some(root) => (declared_length(root, AId::Width), declared_length(root, AId::Height)),
            None => (None, None),
        }
    }

    /// Recomputes all derived state with the provided scale factor.
    ///
    /// The result depends only on the document and `scale`,
    /// so calling it twice with the same scale changes nothing.
    pub fn derive(&mut self, scale: f64) {
        let (width, height) = self.declared_size();
        let ctx = Context::new(scale, self.viewport_from(width, height));

        let mut states = vec![NodeState::None; self.len()];

        // Gradients first, so fills can reference any of them.
        for node in self.descendants() {
            if node.tag_name().map_or(false, |tag| tag.is_gradient()) {
                states[node.id().get_usize()] =
                    NodeState::Gradient(paint_server::convert(node, &ctx));
            }
        }

        let mut bbox = BBox::default();
        derive_children(self.root(), &ctx, Transform::default(), &mut states, &mut bbox);

        let size = Size::from_wh(
            width.map_or(0.0, |n| (n * scale).ceil()),
            height.map_or(0.0, |n| (n * scale).ceil()),
        );

        self.states = states;
        self.bbox = bbox;
        self.size = size;
        self.scale = scale;
    }

    /// Derives the document with a scale that fits its bounding box into the provided size.
    ///
    /// Returns the new scale factor. A document with empty or degenerate
    /// bounds keeps a scale of 1.
    pub fn rescale_to_fit(&mut self, width: f64, height: f64) -> f64 {
        self.derive(1.0);

        let scale = match self.bbox.to_rect() {
            Some(r) if r.width() > 0.0 && r.height() > 0.0 => {
                (width / r.width()).min(height / r.height())
            }
            _ => {
                log::warn!("Document has no bounding box. Rescaling is skipped.");
                return 1.0;
            }
        };

        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("Cannot fit a document into {}x{}. Rescaling is skipped.", width, height);
            return 1.0;
        }

        if scale != 1.0 {
            self.derive(scale);
        }

        scale
    }
}

/// Returns a root length in unscaled units, unless missing or relative.
fn declared_length(root: SvgNode, aid: AId) -> Option<f64> {
    let value = root.attribute(aid)?;
    match units::parse_length(value) {
        Some((n, Unit::None)) | Some((n, Unit::Px)) if n > 0.0 => Some(n),
        _ => {
            log::warn!("Unsupported root {} value: '{}'.", aid, value);
            None
        }
    }
}

fn derive_children(
    parent: SvgNode,
    ctx: &Context,
    ts: Transform,
    states: &mut [NodeState],
    bbox: &mut BBox,
) {
    for node in parent.children() {
        derive_node(node, ctx, ts, states, bbox);
    }
}

fn derive_node(
    node: SvgNode,
    ctx: &Context,
    ts: Transform,
    states: &mut [NodeState],
    bbox: &mut BBox,
) {
    let tag_name = match node.tag_name() {
        Some(v) => v,
        None => return,
    };

    if tag_name.is_non_rendering() {
        return;
    }

    if tag_name.is_group() {
        let transform = units::convert_transform(node, AId::Transform, ctx);
        let abs_ts = transform.map_or(ts, |t| ts.pre_concat(t));
        states[node.id().get_usize()] = NodeState::Group(Group {
            transform,
            display: style::is_visible(node),
        });

        derive_children(node, ctx, abs_ts, states, bbox);
    } else if tag_name.is_graphic() {
        if let Some(figure) = convert_figure(node, ctx, ts, states) {
            bbox.add_bbox(&figure.bbox);
            states[node.id().get_usize()] = NodeState::Figure(Box::new(figure));
        }

        // A figure transform applies only to the figure itself.
        derive_children(node, ctx, ts, states, bbox);
    } else {
        derive_children(node, ctx, ts, states, bbox);
    }
}

fn convert_figure(
    node: SvgNode,
    ctx: &Context,
    ts: Transform,
    states: &[NodeState],
) -> Option<Figure> {
    let kind = if node.tag_name()? == EId::Text {
        FigureKind::Text(text::convert(node, ctx)?)
    } else {
        FigureKind::Shape(shapes::convert(node, ctx)?)
    };

    let transform = units::convert_transform(node, AId::Transform, ctx);

    let bbox = match kind {
        FigureKind::Shape(ref shape) => {
            let abs_ts = transform.map_or(ts, |t| ts.pre_concat(t));
            shape.bbox().transform(&abs_ts)
        }
        FigureKind::Text(_) => BBox::default(),
    };

    let fill = match kind {
        FigureKind::Shape(Shape::Line { .. }) => None,
        _ => style::resolve_fill(node, states),
    };

    Some(Figure {
        transform,
        fill,
        stroke: style::resolve_stroke(node, ctx, states),
        display: style::is_visible(node),
        kind,
        bbox,
    })
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;
    use vgtypes::Rect;

    fn parse(text: &str) -> Document {
        Document::parse_str(text, &Options::default()).unwrap()
    }

    fn figure<'a>(doc: &'a Document, id: &str) -> &'a Figure {
        match *doc.element_by_id(id).unwrap().state() {
            NodeState::Figure(ref figure) => figure.as_ref(),
            _ => panic!("not a figure"),
        }
    }

    #[test]
    fn bbox_is_a_union() {
        let doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <rect x='10' y='10' width='10' height='10'/>
                <circle cx='50' cy='50' r='5'/>
            </svg>
        ");
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(10.0, 10.0, 55.0, 55.0));
    }

    #[test]
    fn bbox_uses_accumulated_transforms() {
        let doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <g transform='translate(10 20)'>
                    <rect id='r1' width='10' height='10' transform='scale(2)'/>
                </g>
            </svg>
        ");
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(10.0, 20.0, 30.0, 40.0));
        assert_eq!(figure(&doc, "r1").transform, Some(Transform::from_scale(2.0, 2.0)));
    }

    #[test]
    fn hidden_figures_have_bounds() {
        let doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <rect id='r1' width='10' height='10' display='none'/>
            </svg>
        ");
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        assert!(!figure(&doc, "r1").display);
    }

    #[test]
    fn defs_have_no_bounds() {
        let doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <defs><rect id='r1' width='100' height='100'/></defs>
                <rect width='10' height='10'/>
                <text x='500' y='500'>Text</text>
            </svg>
        ");
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(doc.element_by_id("r1").unwrap().state(), NodeState::None));
    }

    #[test]
    fn empty_document() {
        let doc = parse("<svg xmlns='http://www.w3.org/2000/svg'/>");
        assert!(doc.bbox().is_empty());
        assert_eq!(doc.size(), Size::default());
    }

    #[test]
    fn size() {
        let mut doc = parse("<svg xmlns='http://www.w3.org/2000/svg' width='10.5' height='20px'/>");
        assert_eq!(doc.size(), Size::from_wh(11.0, 20.0));
        doc.derive(2.0);
        assert_eq!(doc.size(), Size::from_wh(21.0, 40.0));
        assert_eq!(doc.viewport(), Size::from_wh(10.5, 20.0));
    }

    #[test]
    fn viewport_fallback() {
        let doc = parse("<svg xmlns='http://www.w3.org/2000/svg' width='50%'/>");
        assert_eq!(doc.size(), Size::default());
        assert_eq!(doc.viewport(), Size::from_wh(100.0, 100.0));
    }

    #[test]
    fn derive_is_idempotent() {
        let mut doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <linearGradient id='lg1'><stop/></linearGradient>
                <path id='p1' d='M 10 10 L 20 20' fill='url(#lg1)' stroke='red'/>
            </svg>
        ");
        doc.derive(3.0);
        let first = figure(&doc, "p1").clone();
        let bbox = doc.bbox();
        doc.derive(3.0);
        assert_eq!(*figure(&doc, "p1"), first);
        assert_eq!(doc.bbox(), bbox);
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(30.0, 30.0, 60.0, 60.0));
    }

    #[test]
    fn rescale() {
        let mut doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <rect x='10' y='10' width='20' height='10'/>
            </svg>
        ");
        let scale = doc.rescale_to_fit(100.0, 100.0);
        assert_eq!(scale, 5.0);
        assert_eq!(doc.scale(), 5.0);
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(50.0, 50.0, 150.0, 100.0));

        let bbox = doc.bbox();
        assert_eq!(doc.rescale_to_fit(100.0, 100.0), 5.0);
        assert_eq!(doc.bbox(), bbox);
    }

    #[test]
    fn rescale_degenerate() {
        let mut doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <line x1='10' x2='20'/>
            </svg>
        ");
        assert_eq!(doc.rescale_to_fit(100.0, 100.0), 1.0);
        assert_eq!(doc.scale(), 1.0);
    }

    #[test]
    fn line_has_no_fill() {
        let doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg'>
                <line id='l1' x2='10' stroke='red'/>
            </svg>
        ");
        let figure = figure(&doc, "l1");
        assert!(figure.fill.is_none());
        assert!(figure.stroke.is_some());
    }

    #[test]
    fn use_is_drawn_at_offset() {
        let doc = parse("
            <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
                <defs><rect id='r1' width='10' height='10'/></defs>
                <use xlink:href='#r1' x='5' y='7'/>
            </svg>
        ");
        assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(5.0, 7.0, 15.0, 17.0));
    }
}
