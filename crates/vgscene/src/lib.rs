// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`vgscene` draws [`vgtree`] documents onto an abstract [`Canvas`].

A [`Scene`] owns a document and exposes what a host shell needs:
the intrinsic size, the bounding box, the animation interval,
rescaling and rendering. [`SkiaCanvas`] rasterizes onto a `tiny-skia` pixmap
and [`RecordingCanvas`] keeps the issued commands.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]

use std::time::Duration;

use vgtree::vgtypes::BBox;
use vgtree::{Document, Options, Size};

pub use tiny_skia;
pub use vgtree;

mod canvas;
mod render;
mod skia;

pub use crate::canvas::*;
pub use crate::skia::SkiaCanvas;

/// A renderable document.
#[derive(Debug)]
pub struct Scene {
    doc: Document,
}

impl Scene {
    /// Parses a scene from SVG text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str, opt: &Options) -> Result<Self, vgtree::Error> {
        Document::parse_str(text, opt).map(Scene::from_document)
    }

    /// Parses a scene from raw SVG data.
    pub fn from_data(data: &[u8], opt: &Options) -> Result<Self, vgtree::Error> {
        Document::parse_data(data, opt).map(Scene::from_document)
    }

    /// Wraps an already built document.
    pub fn from_document(doc: Document) -> Self {
        Scene { doc }
    }

    /// Returns the underlying document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Consumes the scene and returns the underlying document.
    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Returns the intrinsic size at the current scale.
    pub fn size(&self) -> Size {
        self.doc.size()
    }

    /// Returns the document bounding box at the current scale.
    pub fn bbox(&self) -> BBox {
        self.doc.bbox()
    }

    /// Returns the current scale factor.
    pub fn scale(&self) -> f64 {
        self.doc.scale()
    }

    /// Checks that the document contains animation markup.
    pub fn has_animation(&self) -> bool {
        self.doc.has_animation()
    }

    /// Returns the redraw interval, if any.
    pub fn delay(&self) -> Option<Duration> {
        self.doc.delay()
    }

    /// Rederives the document so that its bounds fit into the provided size.
    ///
    /// Returns the applied scale factor.
    pub fn rescale_to_fit(&mut self, width: f64, height: f64) -> f64 {
        self.doc.rescale_to_fit(width, height)
    }

    /// Draws the scene.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        render(&self.doc, canvas)
    }
}

/// Draws a document onto a canvas.
///
/// Calls are issued in the paint order. `save` and `restore` are always balanced.
pub fn render(doc: &Document, canvas: &mut dyn Canvas) {
    render::render_nodes(doc.root(), canvas);
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
