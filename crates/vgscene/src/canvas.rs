// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgtree::vgtypes::Transform;
use vgtree::{Paint, Shape, Text};

/// An abstract drawing surface.
///
/// The draw traversal issues calls in the order they should be painted.
/// Coordinates are in scaled user space, mapped by the current transform.
pub trait Canvas {
    /// Pushes a copy of the current transform.
    fn save(&mut self);

    /// Pops the transform pushed by the matching [`Canvas::save`].
    fn restore(&mut self);

    /// Pre-concatenates a transform to the current one.
    fn concat(&mut self, ts: &Transform);

    /// Fills a shape.
    fn fill_shape(&mut self, shape: &Shape, paint: &Paint);

    /// Strokes a shape outline.
    fn stroke_shape(&mut self, shape: &Shape, paint: &Paint);

    /// Draws a text run at its anchor position.
    fn draw_text(&mut self, text: &Text, paint: &Paint);
}

/// A recorded drawing call.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    Save,
    Restore,
    Concat(Transform),
    FillShape(Shape, Paint),
    StrokeShape(Shape, Paint),
    DrawText(Text, Paint),
}

/// A surface that stores every call instead of drawing it.
#[derive(Clone, Default, Debug)]
pub struct RecordingCanvas {
    /// Recorded calls in the issue order.
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    pub fn new() -> Self {
        RecordingCanvas::default()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn concat(&mut self, ts: &Transform) {
        self.commands.push(DrawCommand::Concat(*ts));
    }

    fn fill_shape(&mut self, shape: &Shape, paint: &Paint) {
        self.commands
            .push(DrawCommand::FillShape(shape.clone(), paint.clone()));
    }

    fn stroke_shape(&mut self, shape: &Shape, paint: &Paint) {
        self.commands
            .push(DrawCommand::StrokeShape(shape.clone(), paint.clone()));
    }

    fn draw_text(&mut self, text: &Text, paint: &Paint) {
        self.commands
            .push(DrawCommand::DrawText(text.clone(), paint.clone()));
    }
}
