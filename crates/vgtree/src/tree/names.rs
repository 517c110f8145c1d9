// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// An element that is allowed in a document.
///
/// Anything else is skipped together with its subtree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EId {
    A,
    AltGlyph,
    AltGlyphDef,
    Animate,
    AnimateColor,
    AnimateMotion,
    AnimateTransform,
    Circle,
    ColorProfile,
    Cursor,
    Defs,
    Desc,
    Ellipse,
    FeBlend,
    FeColorMatrix,
    FeComponentTransfer,
    FeComposite,
    FeConvolveMatrix,
    FeDiffuseLighting,
    FeDisplacementMap,
    FeDistantLight,
    FeFlood,
    FeGaussianBlur,
    FeImage,
    FeMerge,
    FeMorphology,
    FeOffset,
    FePointLight,
    FeSpecularLighting,
    FeSpotLight,
    FeTile,
    FeTurbulence,
    Filter,
    Font,
    FontFace,
    ForeignObject,
    G,
    Glyph,
    Image,
    Line,
    LinearGradient,
    Marker,
    Mask,
    Metadata,
    MissingGlyph,
    Path,
    Pattern,
    Polygon,
    Polyline,
    RadialGradient,
    Rect,
    Script,
    Set,
    Stop,
    Style,
    Svg,
    Switch,
    Symbol,
    Text,
    TextPath,
    Title,
    Tref,
    Tspan,
    Use,
    View,
}

impl EId {
    pub fn from_str(text: &str) -> Option<EId> {
        match text {
            "a" => Some(EId::A),
            "altGlyph" => Some(EId::AltGlyph),
            "altGlyphDef" => Some(EId::AltGlyphDef),
            "animate" => Some(EId::Animate),
            "animateColor" => Some(EId::AnimateColor),
            "animateMotion" => Some(EId::AnimateMotion),
            "animateTransform" => Some(EId::AnimateTransform),
            "circle" => Some(EId::Circle),
            "color-profile" => Some(EId::ColorProfile),
            "cursor" => Some(EId::Cursor),
            "defs" => Some(EId::Defs),
            "desc" => Some(EId::Desc),
            "ellipse" => Some(EId::Ellipse),
            "feBlend" => Some(EId::FeBlend),
            "feColorMatrix" => Some(EId::FeColorMatrix),
            "feComponentTransfer" => Some(EId::FeComponentTransfer),
            "feComposite" => Some(EId::FeComposite),
            "feConvolveMatrix" => Some(EId::FeConvolveMatrix),
            "feDiffuseLighting" => Some(EId::FeDiffuseLighting),
            "feDisplacementMap" => Some(EId::FeDisplacementMap),
            "feDistantLight" => Some(EId::FeDistantLight),
            "feFlood" => Some(EId::FeFlood),
            "feGaussianBlur" => Some(EId::FeGaussianBlur),
            "feImage" => Some(EId::FeImage),
            "feMerge" => Some(EId::FeMerge),
            "feMorphology" => Some(EId::FeMorphology),
            "feOffset" => Some(EId::FeOffset),
            "fePointLight" => Some(EId::FePointLight),
            "feSpecularLighting" => Some(EId::FeSpecularLighting),
            "feSpotLight" => Some(EId::FeSpotLight),
            "feTile" => Some(EId::FeTile),
            "feTurbulence" => Some(EId::FeTurbulence),
            "filter" => Some(EId::Filter),
            "font" => Some(EId::Font),
            "font-face" => Some(EId::FontFace),
            "foreignObject" => Some(EId::ForeignObject),
            "g" => Some(EId::G),
            "glyph" => Some(EId::Glyph),
            "image" => Some(EId::Image),
            "line" => Some(EId::Line),
            "linearGradient" => Some(EId::LinearGradient),
            "marker" => Some(EId::Marker),
            "mask" => Some(EId::Mask),
            "metadata" => Some(EId::Metadata),
            "missing-glyph" => Some(EId::MissingGlyph),
            "path" => Some(EId::Path),
            "pattern" => Some(EId::Pattern),
            "polygon" => Some(EId::Polygon),
            "polyline" => Some(EId::Polyline),
            "radialGradient" => Some(EId::RadialGradient),
            "rect" => Some(EId::Rect),
            "script" => Some(EId::Script),
            "set" => Some(EId::Set),
            "stop" => Some(EId::Stop),
            "style" => Some(EId::Style),
            "svg" => Some(EId::Svg),
            "switch" => Some(EId::Switch),
            "symbol" => Some(EId::Symbol),
            "text" => Some(EId::Text),
            "textPath" => Some(EId::TextPath),
            "title" => Some(EId::Title),
            "tref" => Some(EId::Tref),
            "tspan" => Some(EId::Tspan),
            "use" => Some(EId::Use),
            "view" => Some(EId::View),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            EId::A => "a",
            EId::AltGlyph => "altGlyph",
            EId::AltGlyphDef => "altGlyphDef",
            EId::Animate => "animate",
            EId::AnimateColor => "animateColor",
            EId::AnimateMotion => "animateMotion",
            EId::AnimateTransform => "animateTransform",
            EId::Circle => "circle",
            EId::ColorProfile => "color-profile",
            EId::Cursor => "cursor",
            EId::Defs => "defs",
            EId::Desc => "desc",
            EId::Ellipse => "ellipse",
            EId::FeBlend => "feBlend",
            EId::FeColorMatrix => "feColorMatrix",
            EId::FeComponentTransfer => "feComponentTransfer",
            EId::FeComposite => "feComposite",
            EId::FeConvolveMatrix => "feConvolveMatrix",
            EId::FeDiffuseLighting => "feDiffuseLighting",
            EId::FeDisplacementMap => "feDisplacementMap",
            EId::FeDistantLight => "feDistantLight",
            EId::FeFlood => "feFlood",
            EId::FeGaussianBlur => "feGaussianBlur",
            EId::FeImage => "feImage",
            EId::FeMerge => "feMerge",
            EId::FeMorphology => "feMorphology",
            EId::FeOffset => "feOffset",
            EId::FePointLight => "fePointLight",
            EId::FeSpecularLighting => "feSpecularLighting",
            EId::FeSpotLight => "feSpotLight",
            EId::FeTile => "feTile",
            EId::FeTurbulence => "feTurbulence",
            EId::Filter => "filter",
            EId::Font => "font",
            EId::FontFace => "font-face",
            EId::ForeignObject => "foreignObject",
            EId::G => "g",
            EId::Glyph => "glyph",
            EId::Image => "image",
            EId::Line => "line",
            EId::LinearGradient => "linearGradient",
            EId::Marker => "marker",
            EId::Mask => "mask",
            EId::Metadata => "metadata",
            EId::MissingGlyph => "missing-glyph",
            EId::Path => "path",
            EId::Pattern => "pattern",
            EId::Polygon => "polygon",
            EId::Polyline => "polyline",
            EId::RadialGradient => "radialGradient",
            EId::Rect => "rect",
            EId::Script => "script",
            EId::Set => "set",
            EId::Stop => "stop",
            EId::Style => "style",
            EId::Svg => "svg",
            EId::Switch => "switch",
            EId::Symbol => "symbol",
            EId::Text => "text",
            EId::TextPath => "textPath",
            EId::Title => "title",
            EId::Tref => "tref",
            EId::Tspan => "tspan",
            EId::Use => "use",
            EId::View => "view",
        }
    }
}

impl std::fmt::Display for EId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// An attribute that is preserved during the build.
///
/// `href` and `xlink:href` are the same attribute.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AId {
    AttributeName,
    Class,
    Cx,
    Cy,
    D,
    Display,
    Dur,
    Fill,
    FillOpacity,
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    From,
    GradientTransform,
    GradientUnits,
    Height,
    Href,
    Id,
    Offset,
    Opacity,
    Points,
    R,
    RepeatCount,
    Rx,
    Ry,
    SpreadMethod,
    StopColor,
    StopOpacity,
    Stroke,
    StrokeLinecap,
    StrokeLinejoin,
    StrokeOpacity,
    StrokeWidth,
    Style,
    TextAnchor,
    To,
    Transform,
    Width,
    X,
    X1,
    X2,
    Y,
    Y1,
    Y2,
}

impl AId {
    pub fn from_str(text: &str) -> Option<AId> {
        match text {
            "attributeName" => Some(AId::AttributeName),
            "class" => Some(AId::Class),
            "cx" => Some(AId::Cx),
            "cy" => Some(AId::Cy),
            "d" => Some(AId::D),
            "display" => Some(AId::Display),
            "dur" => Some(AId::Dur),
            "fill" => Some(AId::Fill),
            "fill-opacity" => Some(AId::FillOpacity),
            "font-family" => Some(AId::FontFamily),
            "font-size" => Some(AId::FontSize),
            "font-style" => Some(AId::FontStyle),
            "font-weight" => Some(AId::FontWeight),
            "from" => Some(AId::From),
            "gradientTransform" => Some(AId::GradientTransform),
            "gradientUnits" => Some(AId::GradientUnits),
            "height" => Some(AId::Height),
            "href" => Some(AId::Href),
            "id" => Some(AId::Id),
            "offset" => Some(AId::Offset),
            "opacity" => Some(AId::Opacity),
            "points" => Some(AId::Points),
            "r" => Some(AId::R),
            "repeatCount" => Some(AId::RepeatCount),
            "rx" => Some(AId::Rx),
            "ry" => Some(AId::Ry),
            "spreadMethod" => Some(AId::SpreadMethod),
            "stop-color" => Some(AId::StopColor),
            "stop-opacity" => Some(AId::StopOpacity),
            "stroke" => Some(AId::Stroke),
            "stroke-linecap" => Some(AId::StrokeLinecap),
            "stroke-linejoin" => Some(AId::StrokeLinejoin),
            "stroke-opacity" => Some(AId::StrokeOpacity),
            "stroke-width" => Some(AId::StrokeWidth),
            "style" => Some(AId::Style),
            "text-anchor" => Some(AId::TextAnchor),
            "to" => Some(AId::To),
            "transform" => Some(AId::Transform),
            "width" => Some(AId::Width),
            "x" => Some(AId::X),
            "x1" => Some(AId::X1),
            "x2" => Some(AId::X2),
            "y" => Some(AId::Y),
            "y1" => Some(AId::Y1),
            "y2" => Some(AId::Y2),
            "xlink:href" => Some(AId::Href),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            AId::AttributeName => "attributeName",
            AId::Class => "class",
            AId::Cx => "cx",
            AId::Cy => "cy",
            AId::D => "d",
            AId::Display => "display",
            AId::Dur => "dur",
            AId::Fill => "fill",
            AId::FillOpacity => "fill-opacity",
            AId::FontFamily => "font-family",
            AId::FontSize => "font-size",
            AId::FontStyle => "font-style",
            AId::FontWeight => "font-weight",
            AId::From => "from",
            AId::GradientTransform => "gradientTransform",
            AId::GradientUnits => "gradientUnits",
            AId::Height => "height",
            AId::Href => "href",
            AId::Id => "id",
            AId::Offset => "offset",
            AId::Opacity => "opacity",
            AId::Points => "points",
            AId::R => "r",
            AId::RepeatCount => "repeatCount",
            AId::Rx => "rx",
            AId::Ry => "ry",
            AId::SpreadMethod => "spreadMethod",
            AId::StopColor => "stop-color",
            AId::StopOpacity => "stop-opacity",
            AId::Stroke => "stroke",
            AId::StrokeLinecap => "stroke-linecap",
            AId::StrokeLinejoin => "stroke-linejoin",
            AId::StrokeOpacity => "stroke-opacity",
            AId::StrokeWidth => "stroke-width",
            AId::Style => "style",
            AId::TextAnchor => "text-anchor",
            AId::To => "to",
            AId::Transform => "transform",
            AId::Width => "width",
            AId::X => "x",
            AId::X1 => "x1",
            AId::X2 => "x2",
            AId::Y => "y",
            AId::Y1 => "y1",
            AId::Y2 => "y2",
        }
    }
}

impl std::fmt::Display for AId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
