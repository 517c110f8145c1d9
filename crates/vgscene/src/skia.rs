// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgtree::vgtypes::{self, PathSegment, Transform};
use vgtree::{LineCap, LineJoin, Paint, Shader, ShaderKind, Shape, SpreadMethod, Text};

use crate::canvas::Canvas;
use crate::OptionLog;

/// Arcs are flattened to cubics with this accuracy.
const ARC_TOLERANCE: f64 = 0.1;

/// A surface that rasterizes onto a `tiny_skia` pixmap.
pub struct SkiaCanvas<'a> {
    pixmap: tiny_skia::PixmapMut<'a>,
    transform: tiny_skia::Transform,
    stack: Vec<tiny_skia::Transform>,
}

impl<'a> From<tiny_skia::PixmapMut<'a>> for SkiaCanvas<'a> {
    fn from(pixmap: tiny_skia::PixmapMut<'a>) -> Self {
        SkiaCanvas {
            pixmap,
            transform: tiny_skia::Transform::identity(),
            stack: Vec::new(),
        }
    }
}

impl std::fmt::Debug for SkiaCanvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SkiaCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("transform", &self.transform)
            .finish()
    }
}

impl SkiaCanvas<'_> {
    /// Returns the current transform.
    pub fn transform(&self) -> tiny_skia::Transform {
        self.transform
    }

    /// Pre-concatenates a root transform, like a zoom factor.
    pub fn apply_transform(&mut self, ts: tiny_skia::Transform) {
        self.transform = self.transform.pre_concat(ts);
    }
}

impl Canvas for SkiaCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(ts) => self.transform = ts,
            None => log::warn!("Unbalanced canvas restore."),
        }
    }

    fn concat(&mut self, ts: &Transform) {
        self.apply_transform(convert_transform(ts));
    }

    fn fill_shape(&mut self, shape: &Shape, paint: &Paint) {
        let path = match convert_shape(shape) {
            Some(v) => v,
            None => return,
        };

        if let Some(paint) = convert_paint(paint) {
            self.pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    fn stroke_shape(&mut self, shape: &Shape, paint: &Paint) {
        let path = match convert_shape(shape) {
            Some(v) => v,
            None => return,
        };

        let stroke = tiny_skia::Stroke {
            width: paint.width as f32,
            line_cap: match paint.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match paint.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..tiny_skia::Stroke::default()
        };

        if let Some(paint) = convert_paint(paint) {
            self.pixmap
                .stroke_path(&path, &paint, &stroke, self.transform, None);
        }
    }

    fn draw_text(&mut self, text: &Text, _: &Paint) {
        // There is no font stack to shape glyphs with.
        log::debug!("Text '{}' is not rendered.", text.content);
    }
}

fn convert_transform(ts: &Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(
        ts.a as f32,
        ts.b as f32,
        ts.c as f32,
        ts.d as f32,
        ts.e as f32,
        ts.f as f32,
    )
}

fn convert_shape(shape: &Shape) -> Option<tiny_skia::Path> {
    match *shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => {
            if rx > 0.0 && ry > 0.0 {
                rounded_rect(x, y, width, height, rx, ry)
            } else {
                let rect =
                    tiny_skia::Rect::from_xywh(x as f32, y as f32, width as f32, height as f32)?;
                Some(tiny_skia::PathBuilder::from_rect(rect))
            }
        }
        Shape::Circle { cx, cy, r } => oval(cx, cy, r, r),
        Shape::Ellipse { cx, cy, rx, ry } => oval(cx, cy, rx, ry),
        Shape::Line { x1, y1, x2, y2 } => {
            let mut builder = tiny_skia::PathBuilder::new();
            builder.move_to(x1 as f32, y1 as f32);
            builder.line_to(x2 as f32, y2 as f32);
            builder.finish()
        }
        Shape::Path(ref path) => {
            let mut builder = tiny_skia::PathBuilder::new();
            for segment in path.segments() {
                match *segment {
                    PathSegment::MoveTo { x, y } => builder.move_to(x as f32, y as f32),
                    PathSegment::LineTo { x, y } => builder.line_to(x as f32, y as f32),
                    PathSegment::CubicTo {
                        x1,
                        y1,
                        x2,
                        y2,
                        x,
                        y,
                    } => builder.cubic_to(
                        x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                    ),
                    PathSegment::ArcTo(ref arc) => append_arc(&mut builder, arc),
                    PathSegment::ClosePath => builder.close(),
                }
            }

            builder.finish()
        }
    }
}

fn oval(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<tiny_skia::Path> {
    let rect = tiny_skia::Rect::from_ltrb(
        (cx - rx) as f32,
        (cy - ry) as f32,
        (cx + rx) as f32,
        (cy + ry) as f32,
    )?;
    tiny_skia::PathBuilder::from_oval(rect)
}

fn rounded_rect(x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) -> Option<tiny_skia::Path> {
    let corner = |cx, cy, start_angle: f64| vgtypes::Arc {
        cx,
        cy,
        rx,
        ry,
        x_axis_rotation: 0.0,
        start_angle,
        sweep_angle: 90.0,
    };

    let mut builder = tiny_skia::PathBuilder::new();
    builder.move_to((x + rx) as f32, y as f32);

    builder.line_to((x + w - rx) as f32, y as f32);
    append_arc(&mut builder, &corner(x + w - rx, y + ry, -90.0));

    builder.line_to((x + w) as f32, (y + h - ry) as f32);
    append_arc(&mut builder, &corner(x + w - rx, y + h - ry, 0.0));

    builder.line_to((x + rx) as f32, (y + h) as f32);
    append_arc(&mut builder, &corner(x + rx, y + h - ry, 90.0));

    builder.line_to(x as f32, (y + ry) as f32);
    append_arc(&mut builder, &corner(x + rx, y + ry, 180.0));

    builder.close();
    builder.finish()
}

/// Appends an arc that starts at the current point as a list of cubics.
fn append_arc(builder: &mut tiny_skia::PathBuilder, arc: &vgtypes::Arc) {
    let arc = kurbo::Arc {
        center: kurbo::Point::new(arc.cx, arc.cy),
        radii: kurbo::Vec2::new(arc.rx, arc.ry),
        start_angle: arc.start_angle.to_radians(),
        sweep_angle: arc.sweep_angle.to_radians(),
        x_rotation: arc.x_axis_rotation.to_radians(),
    };

    for el in arc.append_iter(ARC_TOLERANCE) {
        match el {
            kurbo::PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            kurbo::PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            kurbo::PathEl::QuadTo(p1, p) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p.x as f32, p.y as f32)
            }
            kurbo::PathEl::CurveTo(p1, p2, p) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            kurbo::PathEl::ClosePath => builder.close(),
        }
    }
}

fn convert_paint(paint: &Paint) -> Option<tiny_skia::Paint<'static>> {
    let c = paint.color;
    let shader = match paint.shader {
        Some(ref shader) => convert_shader(shader, c.alpha)?,
        None => tiny_skia::Shader::SolidColor(tiny_skia::Color::from_rgba8(
            c.red, c.green, c.blue, c.alpha,
        )),
    };

    Some(tiny_skia::Paint {
        shader,
        anti_alias: true,
        ..tiny_skia::Paint::default()
    })
}

fn convert_shader(shader: &Shader, alpha: u8) -> Option<tiny_skia::Shader<'static>> {
    let mode = match shader.spread_method {
        SpreadMethod::Pad => tiny_skia::SpreadMode::Pad,
        SpreadMethod::Reflect => tiny_skia::SpreadMode::Reflect,
        SpreadMethod::Repeat => tiny_skia::SpreadMode::Repeat,
    };

    let transform = convert_transform(&shader.transform);

    let mut points = Vec::with_capacity(shader.stops.len());
    for stop in &shader.stops {
        let a = (stop.color.alpha as u32 * alpha as u32 + 127) / 255;
        let color =
            tiny_skia::Color::from_rgba8(stop.color.red, stop.color.green, stop.color.blue, a as u8);
        points.push(tiny_skia::GradientStop::new(stop.offset as f32, color));
    }

    let result = match shader.kind {
        ShaderKind::Linear { x1, y1, x2, y2 } => tiny_skia::LinearGradient::new(
            tiny_skia::Point::from_xy(x1 as f32, y1 as f32),
            tiny_skia::Point::from_xy(x2 as f32, y2 as f32),
            points,
            mode,
            transform,
        ),
        ShaderKind::Radial { cx, cy, r } => tiny_skia::RadialGradient::new(
            tiny_skia::Point::from_xy(cx as f32, cy as f32),
            tiny_skia::Point::from_xy(cx as f32, cy as f32),
            r as f32,
            points,
            mode,
            transform,
        ),
    };

    result.log_none(|| log::warn!("Gradient '{}' cannot be rendered.", shader.id))
}
