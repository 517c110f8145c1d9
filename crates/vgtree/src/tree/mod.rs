// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

use once_cell::unsync::OnceCell;
use vgtypes::BBox;

#[rustfmt::skip] mod names;
mod parse;

use crate::derivation::NodeState;
use crate::Size;
pub use names::{AId, EId};
pub use parse::XmlEvent;

/// Redraw interval of a document that contains animation markup.
pub const ANIMATION_DELAY: Duration = Duration::from_millis(300);

/// A document tree.
///
/// Contains only element nodes and the character data of text elements.
/// The structure is frozen after the build. Only the derived state
/// is replaced by [`Document::derive`].
pub struct Document {
    nodes: Vec<NodeData>,
    attrs: Vec<Attribute>,
    links: HashMap<String, NodeId>,
    default_size: Size,
    pub(crate) states: Vec<NodeState>,
    pub(crate) bbox: BBox,
    pub(crate) size: Size,
    pub(crate) scale: f64,
    animation: OnceCell<bool>,
}

impl Document {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> SvgNode {
        SvgNode {
            id: NodeId::new(0),
            d: &self.nodes[0],
            doc: self,
        }
    }

    /// Returns the root element.
    ///
    /// A successfully built document always has one.
    #[inline]
    pub fn root_element(&self) -> Option<SvgNode> {
        self.root().first_element_child()
    }

    /// Returns an iterator over document's descendant nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    #[inline]
    pub fn descendants(&self) -> Descendants {
        self.root().descendants()
    }

    /// Returns an element by ID.
    ///
    /// When several elements share an ID, the first one in document order wins.
    #[inline]
    pub fn element_by_id(&self, id: &str) -> Option<SvgNode> {
        let node_id = self.links.get(id)?;
        Some(self.get(*node_id))
    }

    /// Returns the number of nodes, the root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks that the document has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() < 2
    }

    /// Returns the viewport size that was used when the document declares none.
    #[inline]
    pub fn default_size(&self) -> Size {
        self.default_size
    }

    /// Returns the document-wide bounding box of the last derivation.
    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Returns the declared document size of the last derivation.
    ///
    /// A dimension is zero when the root element doesn't declare it.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the scale factor of the last derivation.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Checks that the document contains any animation element.
    ///
    /// Computed once, on the first call.
    pub fn has_animation(&self) -> bool {
        *self.animation.get_or_init(|| {
            self.descendants()
                .filter_map(|n| n.tag_name())
                .any(|tag| tag.is_animation())
        })
    }

    /// Returns the redraw interval.
    ///
    /// `None` means the document never has to be redrawn.
    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        if self.has_animation() {
            Some(ANIMATION_DELAY)
        } else {
            None
        }
    }

    #[inline]
    fn get(&self, id: NodeId) -> SvgNode {
        SvgNode {
            id,
            d: &self.nodes[id.get_usize()],
            doc: self,
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.descendants().filter(|n| n.is_element()).count())
            .field("links", &self.links.len())
            .field("scale", &self.scale)
            .field("size", &self.size)
            .field("bbox", &self.bbox)
            .finish()
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ShortRange {
    start: u32,
    end: u32,
}

impl ShortRange {
    #[inline]
    fn new(start: u32, end: u32) -> Self {
        ShortRange { start, end }
    }

    #[inline]
    fn to_urange(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// A node index inside a [`Document`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    #[inline]
    fn new(id: u32) -> Self {
        debug_assert!(id < u32::MAX);

        // `NonZeroU32` keeps `Option<NodeId>` the same size.
        NodeId(NonZeroU32::MIN.saturating_add(id))
    }

    #[inline]
    fn get(self) -> u32 {
        self.0.get() - 1
    }

    #[inline]
    pub(crate) fn get_usize(self) -> usize {
        self.get() as usize
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        // The build limits the number of nodes way below `u32::MAX`.
        debug_assert!(id <= u32::MAX as usize);
        NodeId::new(id as u32)
    }
}

pub(crate) enum NodeKind {
    Root,
    Element {
        tag_name: EId,
        attributes: ShortRange,
        styles: ShortRange,
    },
    Text(String),
}

struct NodeData {
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}

/// An attribute.
#[derive(Clone, PartialEq)]
pub struct Attribute {
    /// Attribute's name.
    pub name: AId,
    /// Attribute's raw value.
    pub value: String,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Attribute {{ name: {:?}, value: {} }}",
            self.name, self.value
        )
    }
}

/// A document node.
#[derive(Clone, Copy)]
pub struct SvgNode<'a> {
    id: NodeId,
    doc: &'a Document,
    d: &'a NodeData,
}

impl Eq for SvgNode<'_> {}

impl PartialEq for SvgNode<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc)
    }
}

impl<'a> SvgNode<'a> {
    /// Returns node's index.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks if the current node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element { .. })
    }

    /// Checks if the current node is a text.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.d.kind, NodeKind::Text(_))
    }

    /// Returns node's document.
    #[inline]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Returns element's tag name, unless the current node is text.
    #[inline]
    pub fn tag_name(&self) -> Option<EId> {
        match self.d.kind {
            NodeKind::Element { tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    /// Returns element's `id` attribute value.
    ///
    /// Returns an empty string otherwise.
    #[inline]
    pub fn element_id(&self) -> &'a str {
        self.attribute(AId::Id).unwrap_or("")
    }

    /// Returns a raw attribute value.
    ///
    /// Values from the `style` attribute are not taken into account.
    #[inline]
    pub fn attribute(&self, aid: AId) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name == aid)
            .map(|a| a.value.as_str())
    }

    /// Returns a property value.
    ///
    /// A declaration inside the `style` attribute takes precedence
    /// over a plain attribute with the same name.
    #[inline]
    pub fn style_attribute(&self, aid: AId) -> Option<&'a str> {
        self.styles()
            .iter()
            .find(|a| a.name == aid)
            .map(|a| a.value.as_str())
            .or_else(|| self.attribute(aid))
    }

    /// Returns a property value, looking at the ancestors for inheritable properties.
    pub fn find_attribute(&self, aid: AId) -> Option<&'a str> {
        if aid.is_inheritable() {
            self.ancestors().find_map(|n| n.style_attribute(aid))
        } else {
            self.style_attribute(aid)
        }
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, aid: AId) -> bool {
        self.attributes().iter().any(|a| a.name == aid)
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => &self.doc.attrs[attributes.to_urange()],
            _ => &[],
        }
    }

    /// Returns a list of all declarations of element's `style` attribute.
    #[inline]
    pub fn styles(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref styles, .. } => &self.doc.attrs[styles.to_urange()],
            _ => &[],
        }
    }

    /// Returns an element referenced by the `href` attribute.
    #[inline]
    pub fn href(&self) -> Option<SvgNode<'a>> {
        let value = self.attribute(AId::Href)?;
        let id = value.trim().strip_prefix('#')?;
        self.document().element_by_id(id)
    }

    /// Returns node's text data.
    ///
    /// For text nodes returns its content. For elements returns the content
    /// of all descendant text nodes, with whitespace runs collapsed into a single space.
    pub fn text(&self) -> String {
        match self.d.kind {
            NodeKind::Text(ref text) => text.clone(),
            NodeKind::Element { .. } => {
                let mut text = String::new();
                for node in self.descendants() {
                    if let NodeKind::Text(ref chunk) = node.d.kind {
                        for word in chunk.split_whitespace() {
                            if !text.is_empty() {
                                text.push(' ');
                            }
                            text.push_str(word);
                        }
                    }
                }
                text
            }
            NodeKind::Root => String::new(),
        }
    }

    /// Returns the derived state of the last derivation.
    #[inline]
    pub fn state(&self) -> &'a NodeState {
        static NONE: NodeState = NodeState::None;
        self.doc.states.get(self.id.get_usize()).unwrap_or(&NONE)
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.doc.get(id))
    }

    /// Returns the parent element.
    #[inline]
    pub fn parent_element(&self) -> Option<Self> {
        self.ancestors().skip(1).find(|n| n.is_element())
    }

    /// Returns the next sibling.
    #[inline]
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.doc.get(id))
    }

    /// Returns the first child.
    #[inline]
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.doc.get(id))
    }

    /// Returns the first child element.
    #[inline]
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().find(|n| n.is_element())
    }

    /// Returns the last child.
    #[inline]
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.doc.get(id))
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.d.children.is_some()
    }

    /// Returns an iterator over ancestor nodes starting at this node.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(Some(*self))
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children {
            front: self.first_child(),
            back: self.last_child(),
        }
    }

    #[inline]
    fn traverse(&self) -> Traverse<'a> {
        Traverse {
            root: *self,
            edge: None,
        }
    }

    /// Returns an iterator over this node and its descendants.
    #[inline]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }

    /// Returns an iterator over the `href` chain, starting at this node.
    ///
    /// Stops at the first reference back into the chain.
    #[inline]
    pub fn href_iter(&self) -> HrefIter<'a> {
        HrefIter {
            doc: self.document(),
            visited: vec![self.id()],
            curr: self.id(),
            is_first: true,
            is_finished: false,
        }
    }
}

impl std::fmt::Debug for SvgNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element { .. } => {
                write!(
                    f,
                    "Element {{ tag_name: {:?}, attributes: {:?} }}",
                    self.tag_name(),
                    self.attributes()
                )
            }
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
        }
    }
}

/// An iterator over ancestor nodes.
#[derive(Clone, Debug)]
pub struct Ancestors<'a>(Option<SvgNode<'a>>);

impl<'a> Iterator for Ancestors<'a> {
    type Item = SvgNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        self.0 = node.as_ref().and_then(SvgNode::parent);
        node
    }
}

/// An iterator over children nodes.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    front: Option<SvgNode<'a>>,
    back: Option<SvgNode<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = SvgNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front.take();
        if self.front == self.back {
            self.back = None;
        } else {
            self.front = node.as_ref().and_then(SvgNode::next_sibling);
        }
        node
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Edge<'a> {
    Open(SvgNode<'a>),
    Close(SvgNode<'a>),
}

#[derive(Clone, Debug)]
struct Traverse<'a> {
    root: SvgNode<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}

/// An iterator over a node and its descendants in document order.
#[derive(Clone, Debug)]
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Iterator for Descendants<'a> {
    type Item = SvgNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}

/// An iterator over an `href` chain.
#[derive(Clone, Debug)]
pub struct HrefIter<'a> {
    doc: &'a Document,
    visited: Vec<NodeId>,
    curr: NodeId,
    is_first: bool,
    is_finished: bool,
}

impl<'a> Iterator for HrefIter<'a> {
    type Item = SvgNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished {
            return None;
        }

        if self.is_first {
            self.is_first = false;
            return Some(self.doc.get(self.curr));
        }

        match self.doc.get(self.curr).href() {
            Some(link) => {
                if self.visited.contains(&link.id()) {
                    log::warn!(
                        "Element '#{}' cannot reference itself via 'href'.",
                        self.doc.get(self.visited[0]).element_id()
                    );
                    self.is_finished = true;
                    return None;
                }

                self.visited.push(link.id());
                self.curr = link.id();
                Some(link)
            }
            None => {
                self.is_finished = true;
                None
            }
        }
    }
}

impl EId {
    /// Checks that the element is drawn by the draw traversal.
    pub fn is_graphic(&self) -> bool {
        matches!(
            self,
            EId::Circle
                | EId::Ellipse
                | EId::Line
                | EId::Path
                | EId::Polygon
                | EId::Polyline
                | EId::Rect
                | EId::Text
        )
    }

    /// Checks that the element applies its transform to its children.
    pub fn is_group(&self) -> bool {
        matches!(self, EId::Svg | EId::G | EId::A)
    }

    /// Checks that the element is a gradient definition.
    pub fn is_gradient(&self) -> bool {
        matches!(self, EId::LinearGradient | EId::RadialGradient)
    }

    /// Checks that the element is animation markup.
    pub fn is_animation(&self) -> bool {
        matches!(
            self,
            EId::Animate | EId::AnimateColor | EId::AnimateMotion | EId::AnimateTransform | EId::Set
        )
    }

    /// Checks that the element content is never drawn in place.
    ///
    /// Such content is reachable only by reference.
    pub fn is_non_rendering(&self) -> bool {
        matches!(
            self,
            EId::Defs
                | EId::Symbol
                | EId::LinearGradient
                | EId::RadialGradient
                | EId::Pattern
                | EId::Marker
                | EId::Mask
                | EId::Filter
                | EId::Font
                | EId::Glyph
                | EId::MissingGlyph
                | EId::Title
                | EId::Desc
                | EId::Metadata
                | EId::Style
                | EId::Script
        )
    }

    /// Checks that the element keeps its character data.
    pub(crate) fn has_text_content(&self) -> bool {
        matches!(self, EId::Text | EId::Tspan | EId::TextPath | EId::AltGlyph)
    }
}

impl AId {
    /// Checks that the property can be declared inside a `style` attribute.
    pub(crate) fn is_presentation(&self) -> bool {
        matches!(
            self,
            AId::Display
                | AId::Fill
                | AId::FillOpacity
                | AId::FontFamily
                | AId::FontSize
                | AId::FontStyle
                | AId::FontWeight
                | AId::Opacity
                | AId::StopColor
                | AId::StopOpacity
                | AId::Stroke
                | AId::StrokeLinecap
                | AId::StrokeLinejoin
                | AId::StrokeOpacity
                | AId::StrokeWidth
                | AId::TextAnchor
        )
    }

    fn is_inheritable(&self) -> bool {
        self.is_presentation() && !is_non_inheritable(*self)
    }
}

fn is_non_inheritable(id: AId) -> bool {
    matches!(
        id,
        AId::Display | AId::Opacity | AId::StopColor | AId::StopOpacity
    )
}
