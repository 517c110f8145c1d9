// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::{HashMap, HashSet};

use once_cell::unsync::OnceCell;
use vgtypes::BBox;

use super::{AId, Attribute, Document, EId, NodeData, NodeId, NodeKind, ShortRange};
use crate::{units, Error, Options, Size};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// We do not allow documents with more than 1_000_000 elements for security reasons.
const ELEMENTS_LIMIT: usize = 1_000_000;

const DEPTH_LIMIT: usize = 1024;

/// A markup event consumed by the build.
///
/// Attributes belong to the latest `Start` and must precede
/// its first child or text.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum XmlEvent<'a> {
    /// An element start with a tag name.
    Start(&'a str),
    /// An attribute name and value.
    Attribute(&'a str, &'a str),
    /// Character data.
    Text(&'a str),
    /// An element end with a tag name.
    End(&'a str),
}

impl Document {
    /// Builds a document from a markup event stream.
    ///
    /// Runs the first derivation with a scale of 1.
    pub fn from_events<'a, I>(events: I, opt: &Options) -> Result<Document, Error>
    where
        I: IntoIterator<Item = XmlEvent<'a>>,
    {
        let mut builder = Builder::new(opt);
        for event in events {
            builder.process(event)?;
        }

        let mut doc = builder.finish()?;
        resolve_use_elements(&mut doc)?;
        doc.derive(1.0);
        Ok(doc)
    }

    /// Parses a document from an SVG string.
    pub fn parse_str(text: &str, opt: &Options) -> Result<Document, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let xml =
            roxmltree::Document::parse_with_options(text, xml_opt).map_err(Error::ParsingFailed)?;
        Self::parse_tree(&xml, opt)
    }

    /// Parses a document from an SVG data.
    pub fn parse_data(data: &[u8], opt: &Options) -> Result<Document, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Self::parse_str(text, opt)
    }

    /// Parses a document from a [`roxmltree::Document`].
    pub fn parse_tree(xml: &roxmltree::Document, opt: &Options) -> Result<Document, Error> {
        Self::from_events(xml_events(xml), opt)
    }

    pub(crate) fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.get_usize()].children.map(|(_, id)| id);

        if let Some(id) = last_child_id {
            self.nodes[id.get_usize()].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.get_usize()].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.get_usize()].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }

    /// Appends an element with a complete attribute set.
    fn append_element(
        &mut self,
        parent_id: NodeId,
        tag_name: EId,
        attributes: Vec<Attribute>,
        styles: Vec<Attribute>,
    ) -> NodeId {
        let start = self.attrs.len() as u32;
        self.attrs.extend(attributes);
        let mid = self.attrs.len() as u32;
        self.attrs.extend(styles);
        let end = self.attrs.len() as u32;

        self.append(
            parent_id,
            NodeKind::Element {
                tag_name,
                attributes: ShortRange::new(start, mid),
                styles: ShortRange::new(mid, end),
            },
        )
    }
}

/// An element whose attributes are still being collected.
struct PendingElement {
    parent_id: NodeId,
    tag_name: EId,
    attributes: Vec<Attribute>,
    style: Option<String>,
}

struct Builder {
    doc: Document,
    stack: Vec<(NodeId, EId)>,
    pending: Option<PendingElement>,
    skip_depth: usize,
    has_root: bool,
}

impl Builder {
    fn new(opt: &Options) -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            attrs: Vec::new(),
            links: HashMap::new(),
            default_size: opt.default_size,
            states: Vec::new(),
            bbox: BBox::default(),
            size: Size::default(),
            scale: 1.0,
            animation: OnceCell::new(),
        };

        doc.nodes.push(NodeData {
            parent: None,
            next_sibling: None,
            children: None,
            kind: NodeKind::Root,
        });

        Builder {
            doc,
            stack: Vec::new(),
            pending: None,
            skip_depth: 0,
            has_root: false,
        }
    }

    fn process(&mut self, event: XmlEvent) -> Result<(), Error> {
        match event {
            XmlEvent::Start(name) => self.start(name),
            XmlEvent::Attribute(name, value) => {
                self.attribute(name, value);
                Ok(())
            }
            XmlEvent::Text(text) => {
                self.text(text);
                Ok(())
            }
            XmlEvent::End(name) => self.end(name),
        }
    }

    fn start(&mut self, name: &str) -> Result<(), Error> {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }

        self.flush();

        let tag_name = EId::from_str(name);
        let parent_id = match self.stack.last() {
            Some(&(id, _)) => id,
            None => {
                if self.has_root {
                    log::warn!("Only one root element is allowed. '{}' will be skipped.", name);
                    self.skip_depth = 1;
                    return Ok(());
                }

                if tag_name != Some(EId::Svg) {
                    return Err(Error::NoRootNode);
                }

                self.has_root = true;
                self.doc.root().id()
            }
        };

        let tag_name = match tag_name {
            Some(v) => v,
            None => {
                log::debug!("Unknown element '{}'. Skipped.", name);
                self.skip_depth = 1;
                return Ok(());
            }
        };

        if self.stack.len() >= DEPTH_LIMIT || self.doc.nodes.len() >= ELEMENTS_LIMIT {
            return Err(Error::ElementsLimitReached);
        }

        self.pending = Some(PendingElement {
            parent_id,
            tag_name,
            attributes: Vec::new(),
            style: None,
        });

        Ok(())
    }

    fn attribute(&mut self, name: &str, value: &str) {
        if self.skip_depth > 0 {
            return;
        }

        let pending = match self.pending {
            Some(ref mut v) => v,
            None => {
                log::warn!("Attribute '{}' is not preceded by a start tag. Skipped.", name);
                return;
            }
        };

        let aid = match AId::from_str(name) {
            Some(v) => v,
            None => {
                log::trace!("Unknown attribute '{}'. Skipped.", name);
                return;
            }
        };

        if aid == AId::Style {
            pending.style = Some(value.to_string());
            return;
        }

        insert_attribute(&mut pending.attributes, aid, value);
    }

    fn text(&mut self, text: &str) {
        if self.skip_depth > 0 {
            return;
        }

        self.flush();

        if text.trim().is_empty() {
            return;
        }

        if let Some(&(parent_id, tag_name)) = self.stack.last() {
            if tag_name.has_text_content() {
                self.doc.append(parent_id, NodeKind::Text(text.to_string()));
            }
        }
    }

    fn end(&mut self, name: &str) -> Result<(), Error> {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }

        self.flush();

        match self.stack.pop() {
            Some((_, tag_name)) if tag_name.to_str() == name => Ok(()),
            Some((_, tag_name)) => Err(Error::UnexpectedEnd {
                expected: tag_name.to_str().to_string(),
                actual: name.to_string(),
            }),
            None => Err(Error::UnexpectedEnd {
                expected: String::new(),
                actual: name.to_string(),
            }),
        }
    }

    /// Appends the pending element, since its attribute list is complete.
    fn flush(&mut self) {
        let pending = match self.pending.take() {
            Some(v) => v,
            None => return,
        };

        let mut styles = Vec::new();
        if let Some(ref style) = pending.style {
            for declaration in simplecss::DeclarationTokenizer::from(style.as_str()) {
                match AId::from_str(declaration.name) {
                    Some(aid) if aid.is_presentation() => {
                        insert_attribute(&mut styles, aid, declaration.value);
                    }
                    _ => {
                        log::trace!("Unsupported style property '{}'. Skipped.", declaration.name);
                    }
                }
            }
        }

        let id = self.doc.append_element(
            pending.parent_id,
            pending.tag_name,
            pending.attributes,
            styles,
        );
        self.stack.push((id, pending.tag_name));
    }

    fn finish(mut self) -> Result<Document, Error> {
        self.flush();

        if self.skip_depth > 0 || !self.stack.is_empty() {
            return Err(Error::UnclosedElements);
        }

        if self.doc.root_element().is_none() {
            return Err(Error::NoRootNode);
        }

        let mut links = HashMap::new();
        for node in self.doc.descendants() {
            let id = node.element_id();
            if !id.is_empty() && !links.contains_key(id) {
                links.insert(id.to_string(), node.id());
            }
        }
        self.doc.links = links;

        Ok(self.doc)
    }
}

/// Inserts an attribute. The last value wins.
fn insert_attribute(list: &mut Vec<Attribute>, name: AId, value: &str) {
    let value = value.to_string();
    match list.iter_mut().find(|a| a.name == name) {
        Some(attr) => attr.value = value,
        None => list.push(Attribute { name, value }),
    }
}

/// Tracks already resolved `use` elements and the originals of copied nodes.
#[derive(Default)]
struct UseState {
    resolved: HashSet<NodeId>,
    origins: HashMap<NodeId, NodeId>,
}

impl UseState {
    fn origin(&self, id: NodeId) -> NodeId {
        self.origins.get(&id).copied().unwrap_or(id)
    }
}

/// Replaces every `use` element content with a synthetic group
/// that contains a copy of the referenced element.
///
/// Copies are processed too, so nested references are resolved
/// in the copied subtree as well.
fn resolve_use_elements(doc: &mut Document) -> Result<(), Error> {
    let mut state = UseState::default();
    let mut idx = 1;
    while idx < doc.nodes.len() {
        let id = NodeId::from(idx);
        idx += 1;

        if doc.get(id).tag_name() != Some(EId::Use) || state.resolved.contains(&id) {
            continue;
        }

        state.resolved.insert(id);
        resolve_use(doc, id, &mut state)?;
    }

    Ok(())
}

fn resolve_use(doc: &mut Document, use_id: NodeId, state: &mut UseState) -> Result<(), Error> {
    let node = doc.get(use_id);

    let mut attributes: Vec<Attribute> = node
        .attributes()
        .iter()
        .filter(|a| {
            !matches!(
                a.name,
                AId::X | AId::Y | AId::Width | AId::Height | AId::Href | AId::Transform
            )
        })
        .cloned()
        .collect();
    let styles = node.styles().to_vec();

    let x = node.attribute(AId::X);
    let y = node.attribute(AId::Y);
    let transform = node.attribute(AId::Transform);
    if transform.is_some() || x.is_some() || y.is_some() {
        let mut ts = transform.unwrap_or_default().to_string();
        if x.is_some() || y.is_some() {
            let x = x.map(|v| use_offset(v, AId::X)).unwrap_or(0.0);
            let y = y.map(|v| use_offset(v, AId::Y)).unwrap_or(0.0);
            if !ts.is_empty() {
                ts.push(' ');
            }
            ts.push_str(&format!("translate({} {})", x, y));
        }

        attributes.push(Attribute {
            name: AId::Transform,
            value: ts,
        });
    }

    let link = match node.href() {
        Some(link) => {
            // A copy is recursive when it lands inside a copy of itself.
            if node.ancestors().any(|n| state.origin(n.id()) == link.id()) {
                log::warn!(
                    "Recursive 'use' detected. '{}' will be skipped.",
                    node.attribute(AId::Href).unwrap_or_default()
                );
                None
            } else {
                Some(link.id())
            }
        }
        None => {
            log::warn!(
                "'use' references an unknown element '{}'. Skipped.",
                node.attribute(AId::Href).unwrap_or_default()
            );
            None
        }
    };

    let group_id = doc.append_element(use_id, EId::G, attributes, styles);
    if let Some(link) = link {
        let copy_id = copy_node(doc, link, group_id, state)?;

        // A referenced symbol is instantiated as a plain group.
        if let Some(copy_id) = copy_id {
            if let NodeKind::Element {
                ref mut tag_name, ..
            } = doc.nodes[copy_id.get_usize()].kind
            {
                if *tag_name == EId::Symbol {
                    *tag_name = EId::G;
                }
            }
        }
    }

    Ok(())
}

fn use_offset(value: &str, aid: AId) -> f64 {
    match units::parse_length(value) {
        Some((n, units::Unit::None)) | Some((n, units::Unit::Px)) => n,
        _ => {
            log::warn!("Unsupported 'use' {} value: '{}'. Fallback to 0.", aid, value);
            0.0
        }
    }
}

fn copy_node(
    doc: &mut Document,
    src: NodeId,
    parent_id: NodeId,
    state: &mut UseState,
) -> Result<Option<NodeId>, Error> {
    if doc.nodes.len() >= ELEMENTS_LIMIT {
        return Err(Error::ElementsLimitReached);
    }

    let kind = match doc.nodes[src.get_usize()].kind {
        NodeKind::Element {
            tag_name,
            attributes,
            styles,
        } => {
            let start = doc.attrs.len() as u32;
            doc.attrs.extend_from_within(attributes.to_urange());
            let mid = doc.attrs.len() as u32;
            doc.attrs.extend_from_within(styles.to_urange());
            let end = doc.attrs.len() as u32;

            NodeKind::Element {
                tag_name,
                attributes: ShortRange::new(start, mid),
                styles: ShortRange::new(mid, end),
            }
        }
        NodeKind::Text(ref text) => NodeKind::Text(text.clone()),
        NodeKind::Root => return Ok(None),
    };

    let new_id = doc.append(parent_id, kind);
    if state.resolved.contains(&src) {
        state.resolved.insert(new_id);
    }
    let origin = state.origin(src);
    state.origins.insert(new_id, origin);

    let children: Vec<NodeId> = doc.get(src).children().map(|n| n.id()).collect();
    for child in children {
        copy_node(doc, child, new_id, state)?;
    }

    Ok(Some(new_id))
}

/// Converts a parsed XML tree into a markup event stream.
///
/// Elements outside the SVG namespace are left out with their subtrees.
fn xml_events<'a, 'input: 'a>(xml: &'a roxmltree::Document<'input>) -> Vec<XmlEvent<'a>> {
    let mut events = Vec::new();
    for node in xml.root().children() {
        collect_events(node, &mut events);
    }

    events
}

fn collect_events<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    events: &mut Vec<XmlEvent<'a>>,
) {
    if node.is_text() {
        events.push(XmlEvent::Text(node.text().unwrap_or_default()));
        return;
    }

    if !node.is_element() {
        return;
    }

    if !matches!(node.tag_name().namespace(), None | Some(SVG_NS)) {
        return;
    }

    let tag_name = node.tag_name().name();
    events.push(XmlEvent::Start(tag_name));
    for attr in node.attributes() {
        match attr.namespace() {
            None | Some(SVG_NS) => {
                events.push(XmlEvent::Attribute(attr.name(), attr.value()));
            }
            Some(XLINK_NS) if attr.name() == "href" => {
                events.push(XmlEvent::Attribute("xlink:href", attr.value()));
            }
            _ => {}
        }
    }

    for child in node.children() {
        collect_events(child, events);
    }

    events.push(XmlEvent::End(tag_name));
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    fn build(events: &[XmlEvent]) -> Result<Document, Error> {
        Document::from_events(events.iter().copied(), &Options::default())
    }

    #[test]
    fn event_stream() {
        let doc = build(&[
            XmlEvent::Start("svg"),
            XmlEvent::Attribute("width", "10"),
            XmlEvent::Start("rect"),
            XmlEvent::Attribute("id", "r1"),
            XmlEvent::Attribute("fill", "red"),
            XmlEvent::Attribute("fill", "blue"),
            XmlEvent::Attribute("unknown", "1"),
            XmlEvent::End("rect"),
            XmlEvent::End("svg"),
        ]).unwrap();

        let rect = doc.element_by_id("r1").unwrap();
        assert_eq!(rect.tag_name(), Some(EId::Rect));
        assert_eq!(rect.attribute(AId::Fill), Some("blue"));
        assert_eq!(rect.attributes().len(), 2);
    }

    #[test]
    fn unknown_subtree_is_skipped() {
        let doc = build(&[
            XmlEvent::Start("svg"),
            XmlEvent::Start("unknown"),
            XmlEvent::Start("rect"),
            XmlEvent::End("rect"),
            XmlEvent::End("unknown"),
            XmlEvent::Start("circle"),
            XmlEvent::End("circle"),
            XmlEvent::End("svg"),
        ]).unwrap();

        let tags: Vec<_> = doc.descendants().filter_map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec![EId::Svg, EId::Circle]);
    }

    #[test]
    fn mismatched_end() {
        let err = build(&[
            XmlEvent::Start("svg"),
            XmlEvent::Start("g"),
            XmlEvent::End("svg"),
        ]).unwrap_err();

        assert_eq!(err.to_string(), "expected '</g>' not '</svg>'");
    }

    #[test]
    fn unclosed_elements() {
        let err = build(&[XmlEvent::Start("svg"), XmlEvent::Start("g")]).unwrap_err();
        assert!(matches!(err, Error::UnclosedElements));
    }

    #[test]
    fn no_root() {
        assert!(matches!(build(&[]).unwrap_err(), Error::NoRootNode));
        assert!(matches!(build(&[XmlEvent::Start("g"), XmlEvent::End("g")]).unwrap_err(),
                         Error::NoRootNode));
    }

    #[test]
    fn style_attribute_is_split() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <rect id='r' fill='red' style='fill:green; stroke : blue; x:5'/>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let rect = doc.element_by_id("r").unwrap();
        assert_eq!(rect.attribute(AId::Fill), Some("red"));
        assert_eq!(rect.style_attribute(AId::Fill), Some("green"));
        assert_eq!(rect.style_attribute(AId::Stroke), Some("blue"));
        // Not a presentation attribute.
        assert_eq!(rect.style_attribute(AId::X), None);
    }

    #[test]
    fn xlink_href() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>\
                <rect id='r'/>\
                <use id='u' xlink:href='#r'/>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let node = doc.element_by_id("u").unwrap();
        assert_eq!(node.attribute(AId::Href), Some("#r"));
        assert_eq!(node.href().unwrap().tag_name(), Some(EId::Rect));
    }

    #[test]
    fn foreign_elements_are_skipped() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com'>\
                <x:rect><rect/></x:rect>\
                <circle/>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let tags: Vec<_> = doc.descendants().filter_map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec![EId::Svg, EId::Circle]);
    }

    #[test]
    fn xml_tree_to_events() {
        let xml = roxmltree::Document::parse(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com'>\
                <!-- comment -->\
                <g id='g1'><x:g><rect/></x:g><text>Hi</text></g>\
            </svg>",
        ).unwrap();

        assert_eq!(xml_events(&xml), vec![
            XmlEvent::Start("svg"),
            XmlEvent::Start("g"),
            XmlEvent::Attribute("id", "g1"),
            XmlEvent::Start("text"),
            XmlEvent::Text("Hi"),
            XmlEvent::End("text"),
            XmlEvent::End("g"),
            XmlEvent::End("svg"),
        ]);
    }

    #[test]
    fn use_of_symbol() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <symbol id='s' fill='red'>\
                    <rect width='10' height='10'/>\
                    <use id='u2' href='#s'/>\
                </symbol>\
                <use id='u1' href='#s'/>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let group = doc.element_by_id("u1").unwrap().first_element_child().unwrap();
        let copy = group.first_element_child().unwrap();
        assert_eq!(copy.tag_name(), Some(EId::G));
        assert_eq!(copy.attribute(AId::Fill), Some("red"));
        assert_eq!(copy.first_element_child().unwrap().tag_name(), Some(EId::Rect));

        // The symbol itself stays a symbol.
        assert_eq!(doc.element_by_id("s").unwrap().tag_name(), Some(EId::Symbol));
        // Self references inside the symbol are not expanded.
        assert!(doc.len() < 20);
    }

    #[test]
    fn use_resolution() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <rect id='r' width='10' height='10'/>\
                <use id='u' href='#r' x='5' y='6' width='20' fill='red' transform='scale(2)'/>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let node = doc.element_by_id("u").unwrap();
        let group = node.first_element_child().unwrap();
        assert_eq!(group.tag_name(), Some(EId::G));
        assert_eq!(group.attribute(AId::Transform), Some("scale(2) translate(5 6)"));
        assert_eq!(group.attribute(AId::Fill), Some("red"));
        assert!(!group.has_attribute(AId::Width));
        assert!(!group.has_attribute(AId::Href));

        let copy = group.first_element_child().unwrap();
        assert_eq!(copy.tag_name(), Some(EId::Rect));
        assert_eq!(copy.attribute(AId::Width), Some("10"));
        // The original is still the one found by ID.
        assert_ne!(doc.element_by_id("r").unwrap(), copy);
    }

    #[test]
    fn use_with_unknown_reference() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <use id='u' href='#missing'/>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let group = doc.element_by_id("u").unwrap().first_element_child().unwrap();
        assert_eq!(group.tag_name(), Some(EId::G));
        assert!(!group.has_children());
    }

    #[test]
    fn recursive_use() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg'>\
                <g id='g1'>\
                    <use id='u1' href='#g1'/>\
                </g>\
                <g id='g2'><use id='u2' href='#g3'/></g>\
                <g id='g3'><use id='u3' href='#g2'/></g>\
            </svg>",
            &Options::default(),
        ).unwrap();

        let group = doc.element_by_id("u1").unwrap().first_element_child().unwrap();
        assert!(!group.has_children());
        // Finite in any case.
        assert!(doc.len() < 100);
    }
}
