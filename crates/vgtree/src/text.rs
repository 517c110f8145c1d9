// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::{AId, SvgNode};
use crate::units::{self, Context, Length, Unit};

/// A text anchor.
///
/// `text-anchor` attribute in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl Default for TextAnchor {
    fn default() -> Self {
        Self::Start
    }
}

/// A font description.
#[derive(Clone, PartialEq, Debug)]
pub struct Font {
    /// A font family list, as written in the document.
    pub family: Option<String>,
    /// A font size, in scaled user space.
    pub size: f64,
    /// Weight is `bold` or at least 600.
    pub bold: bool,
    /// Style is `italic` or `oblique`.
    pub italic: bool,
    /// Horizontal alignment relative to the text position.
    pub anchor: TextAnchor,
}

/// A resolved text element.
#[derive(Clone, PartialEq, Debug)]
pub struct Text {
    /// An anchor X position, in scaled user space.
    pub x: f64,
    /// A baseline Y position, in scaled user space.
    pub y: f64,
    /// Character data with whitespace runs collapsed.
    pub content: String,
    /// Font properties.
    pub font: Font,
}

pub(crate) fn convert(node: SvgNode, ctx: &Context) -> Option<Text> {
    let content = node.text();
    if content.is_empty() {
        return None;
    }

    let size = units::convert_inherited_length(
        node,
        AId::FontSize,
        ctx,
        Length::new(16.0, Unit::None),
    );

    let bold = match node.find_attribute(AId::FontWeight).map(str::trim) {
        Some("bold") | Some("bolder") => true,
        Some(value) => units::parse_number(value).map_or(false, |n| n >= 600.0),
        None => false,
    };

    let italic = matches!(
        node.find_attribute(AId::FontStyle).map(str::trim),
        Some("italic") | Some("oblique")
    );

    let anchor = match node.find_attribute(AId::TextAnchor).map(str::trim) {
        Some("middle") => TextAnchor::Middle,
        Some("end") => TextAnchor::End,
        _ => TextAnchor::Start,
    };

    Some(Text {
        x: units::convert_length(node, AId::X, ctx, Length::zero()),
        y: units::convert_length(node, AId::Y, ctx, Length::zero()),
        content,
        font: Font {
            family: node.find_attribute(AId::FontFamily).map(|s| s.trim().to_string()),
            size,
            bold,
            italic,
            anchor,
        },
    })
}
