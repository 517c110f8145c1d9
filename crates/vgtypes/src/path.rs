// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::ByteExt;
use crate::{BBox, Rect, Stream};

/// An elliptical arc in center parameterization.
///
/// Angles are in degrees. `start_angle` and `sweep_angle` are parametric
/// angles on the ellipse before the `x_axis_rotation` is applied.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Arc {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub x_axis_rotation: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl Arc {
    /// Returns the unrotated ellipse bounds.
    #[inline]
    pub fn oval(&self) -> Rect {
        Rect::from_ltrb(
            self.cx - self.rx,
            self.cy - self.ry,
            self.cx + self.rx,
            self.cy + self.ry,
        )
    }

    /// Returns a point on the ellipse at a parametric angle in degrees.
    pub fn point_at(&self, angle: f64) -> (f64, f64) {
        let (sin_t, cos_t) = angle.to_radians().sin_cos();
        let (sin_r, cos_r) = self.x_axis_rotation.to_radians().sin_cos();
        let x = self.cx + self.rx * cos_t * cos_r - self.ry * sin_t * sin_r;
        let y = self.cy + self.rx * cos_t * sin_r + self.ry * sin_t * cos_r;
        (x, y)
    }

    /// Returns the arc end point.
    #[inline]
    pub fn end_point(&self) -> (f64, f64) {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    /// Adds the arc ends and every axis extreme inside the swept range.
    fn add_to_bbox(&self, bbox: &mut BBox) {
        let (x, y) = self.point_at(self.start_angle);
        bbox.add_point(x, y);
        let (x, y) = self.end_point();
        bbox.add_point(x, y);

        let (lo, hi) = if self.sweep_angle >= 0.0 {
            (self.start_angle, self.start_angle + self.sweep_angle)
        } else {
            (self.start_angle + self.sweep_angle, self.start_angle)
        };

        let (sin_r, cos_r) = self.x_axis_rotation.to_radians().sin_cos();
        let extremes = [
            (-self.ry * sin_r).atan2(self.rx * cos_r).to_degrees(),
            (self.ry * cos_r).atan2(self.rx * sin_r).to_degrees(),
        ];

        for base in extremes {
            let mut n = ((lo - base) / 180.0).ceil();
            while base + n * 180.0 <= hi {
                let (x, y) = self.point_at(base + n * 180.0);
                bbox.add_point(x, y);
                n += 1.0;
            }
        }
    }
}

/// An absolute path segment.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    /// An arc that starts at the current point.
    ArcTo(Arc),
    ClosePath,
}

/// A resolved path outline.
///
/// Contains only absolute move, line, cubic and arc segments
/// plus the bounding box of every emitted point.
///
/// The bounding box includes curve control points,
/// so it can be larger than the tight outline bounds.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct PathData {
    segments: Vec<PathSegment>,
    bbox: BBox,
}

impl PathData {
    /// Creates an empty path.
    #[inline]
    pub fn new() -> Self {
        PathData::default()
    }

    /// Interprets the path mini-language.
    ///
    /// All coordinates and radii are multiplied by `scale`.
    /// Arc rotation and flags are not.
    ///
    /// Parsing never fails. Unknown commands are skipped one character at a time
    /// and a malformed number stops parsing, keeping the segments before it.
    ///
    /// ```
    /// use vgtypes::{PathData, PathSegment};
    ///
    /// let path = PathData::parse("M10-20l30 5-5-20z", 1.0);
    /// assert_eq!(path.segments(), &[
    ///     PathSegment::MoveTo { x: 10.0, y: -20.0 },
    ///     PathSegment::LineTo { x: 40.0, y: -15.0 },
    ///     PathSegment::LineTo { x: 35.0, y: -35.0 },
    ///     PathSegment::ClosePath,
    /// ]);
    /// ```
    pub fn parse(text: &str, scale: f64) -> Self {
        let mut p = PathInterpreter::new(scale);
        p.run(text);
        p.path
    }

    /// Returns path segments.
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the coarse bounding box.
    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Checks that the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Starts a new subpath.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.bbox.add_point(x, y);
        self.segments.push(PathSegment::MoveTo { x, y });
    }

    /// Adds a straight line.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.bbox.add_point(x, y);
        self.segments.push(PathSegment::LineTo { x, y });
    }

    /// Adds a cubic Bézier curve.
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.bbox.add_point(x1, y1);
        self.bbox.add_point(x2, y2);
        self.bbox.add_point(x, y);
        self.segments.push(PathSegment::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    /// Adds an elliptical arc.
    pub fn arc_to(&mut self, arc: Arc) {
        arc.add_to_bbox(&mut self.bbox);
        self.segments.push(PathSegment::ArcTo(arc));
    }

    /// Closes the current subpath.
    ///
    /// Closing an already closed subpath is a no-op.
    pub fn close(&mut self) {
        match self.segments.last() {
            Some(PathSegment::ClosePath) | None => {}
            _ => self.segments.push(PathSegment::ClosePath),
        }
    }
}

struct PathInterpreter {
    path: PathData,
    scale: f64,
    x: f64,
    y: f64,
    start_x: f64,
    start_y: f64,
    prev_cubic: Option<(f64, f64)>,
    prev_quad: Option<(f64, f64)>,
}

impl PathInterpreter {
    fn new(scale: f64) -> Self {
        PathInterpreter {
            path: PathData::new(),
            scale,
            x: 0.0,
            y: 0.0,
            start_x: 0.0,
            start_y: 0.0,
            prev_cubic: None,
            prev_quad: None,
        }
    }

    fn run(&mut self, text: &str) {
        let mut s = Stream::from(text);
        s.skip_spaces();

        let mut cmd = 0u8;
        while !s.at_end() {
            let c = s.curr_byte_unchecked();
            let explicit = !c.is_number_start();
            if explicit {
                cmd = c;
                s.advance(1);
            } else if cmd == b'M' {
                cmd = b'L';
            } else if cmd == b'm' {
                cmd = b'l';
            } else if matches!(cmd, b'Z' | b'z') {
                log::warn!("Path data has numbers after a close command. The rest is ignored.");
                break;
            }

            match self.exec(cmd, &mut s) {
                Some(true) => {}
                Some(false) => {
                    log::warn!("Malformed path data at position {}.", s.calc_char_pos());
                    break;
                }
                None => {
                    if explicit {
                        log::warn!("Invalid path command '{}'. Skipped.", cmd as char);
                    } else {
                        s.advance(1);
                    }

                    cmd = 0;
                }
            }

            s.skip_spaces();
        }
    }

    /// Executes a single command.
    ///
    /// Returns `None` for an unknown command
    /// and `Some(false)` when its arguments cannot be parsed.
    fn exec(&mut self, cmd: u8, s: &mut Stream) -> Option<bool> {
        let abs = cmd.is_ascii_uppercase();
        let (rel_x, rel_y) = if abs { (0.0, 0.0) } else { (self.x, self.y) };
        let scale = self.scale;
        let mut cubic = None;
        let mut quad = None;

        macro_rules! coord {
            () => {
                match next_number(s) {
                    Some(n) => n * scale,
                    None => return Some(false),
                }
            };
        }

        match cmd.to_ascii_uppercase() {
            b'M' => {
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                self.path.move_to(x, y);
                self.set_point(x, y);
                self.start_x = x;
                self.start_y = y;
            }
            b'Z' => {
                self.path.close();
                self.set_point(self.start_x, self.start_y);
            }
            b'L' => {
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                self.line_to(x, y);
            }
            b'H' => {
                let x = coord!() + rel_x;
                self.line_to(x, self.y);
            }
            b'V' => {
                let y = coord!() + rel_y;
                self.line_to(self.x, y);
            }
            b'C' => {
                let x1 = coord!() + rel_x;
                let y1 = coord!() + rel_y;
                let x2 = coord!() + rel_x;
                let y2 = coord!() + rel_y;
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                self.path.cubic_to(x1, y1, x2, y2, x, y);
                self.set_point(x, y);
                cubic = Some((x2, y2));
            }
            b'S' => {
                let x2 = coord!() + rel_x;
                let y2 = coord!() + rel_y;
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                let (x1, y1) = self.reflect(self.prev_cubic);
                self.path.cubic_to(x1, y1, x2, y2, x, y);
                self.set_point(x, y);
                cubic = Some((x2, y2));
            }
            b'Q' => {
                let qx = coord!() + rel_x;
                let qy = coord!() + rel_y;
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                self.quad_to(qx, qy, x, y);
                quad = Some((qx, qy));
            }
            b'T' => {
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                let (qx, qy) = self.reflect(self.prev_quad);
                self.quad_to(qx, qy, x, y);
                quad = Some((qx, qy));
            }
            b'A' => {
                let rx = coord!();
                let ry = coord!();
                let angle = match next_number(s) {
                    Some(n) => n,
                    None => return Some(false),
                };
                let large_arc = match next_flag(s) {
                    Some(f) => f,
                    None => return Some(false),
                };
                let sweep = match next_flag(s) {
                    Some(f) => f,
                    None => return Some(false),
                };
                let x = coord!() + rel_x;
                let y = coord!() + rel_y;
                self.arc_to(rx, ry, angle, large_arc, sweep, x, y);
            }
            _ => return None,
        }

        self.prev_cubic = cubic;
        self.prev_quad = quad;
        Some(true)
    }

    fn set_point(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
        self.set_point(x, y);
    }

    /// Reflects a previous control point across the current point.
    ///
    /// Falls back to the current point when there is no previous curve.
    fn reflect(&self, ctrl: Option<(f64, f64)>) -> (f64, f64) {
        match ctrl {
            Some((cx, cy)) => (2.0 * self.x - cx, 2.0 * self.y - cy),
            None => (self.x, self.y),
        }
    }

    fn quad_to(&mut self, qx: f64, qy: f64, x: f64, y: f64) {
        let x1 = self.x + 2.0 / 3.0 * (qx - self.x);
        let y1 = self.y + 2.0 / 3.0 * (qy - self.y);
        let x2 = x + 2.0 / 3.0 * (qx - x);
        let y2 = y + 2.0 / 3.0 * (qy - y);
        self.path.cubic_to(x1, y1, x2, y2, x, y);
        self.set_point(x, y);
    }

    #[allow(clippy::too_many_arguments)]
    fn arc_to(&mut self, rx: f64, ry: f64, angle: f64, large_arc: bool, sweep: bool, x: f64, y: f64) {
        let (x0, y0) = (self.x, self.y);
        self.set_point(x, y);

        if x0 == x && y0 == y {
            return;
        }

        match endpoint_to_center(x0, y0, x, y, rx, ry, angle, large_arc, sweep) {
            Some(arc) => self.path.arc_to(arc),
            None => self.path.line_to(x, y),
        }
    }
}

fn next_number(s: &mut Stream) -> Option<f64> {
    match s.next_number(1.0) {
        Ok(n) if !n.is_nan() => Some(n),
        _ => None,
    }
}

/// Parses a single-digit arc flag. Flags don't need separators.
fn next_flag(s: &mut Stream) -> Option<bool> {
    s.skip_spaces();
    let flag = match s.curr_byte().ok()? {
        b'0' => false,
        b'1' => true,
        _ => return None,
    };
    s.advance(1);
    s.skip_number_separators();
    Some(flag)
}

/// Converts an endpoint-parameterized arc into a center-parameterized one.
///
/// Returns `None` when a radius is zero and the arc degenerates into a line.
#[allow(clippy::too_many_arguments)]
fn endpoint_to_center(
    x0: f64,
    y0: f64,
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    angle: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<Arc> {
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return None;
    }

    let angle = angle % 360.0;
    let (sin_a, cos_a) = angle.to_radians().sin_cos();

    // Midpoint in the rotated frame.
    let dx2 = (x0 - x) / 2.0;
    let dy2 = (y0 - y) / 2.0;
    let x1 = cos_a * dx2 + sin_a * dy2;
    let y1 = -sin_a * dx2 + cos_a * dy2;

    // Enlarge radii that cannot span the chord.
    let check = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    if check > 1.0 {
        rx *= check.sqrt();
        ry *= check.sqrt();
    }

    let prx = rx * rx;
    let pry = ry * ry;
    let px1 = x1 * x1;
    let py1 = y1 * y1;

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let sq = ((prx * pry) - (prx * py1) - (pry * px1)) / ((prx * py1) + (pry * px1));
    let coef = sign * sq.max(0.0).sqrt();
    let cx1 = coef * ((rx * y1) / ry);
    let cy1 = coef * -((ry * x1) / rx);

    let cx = (x0 + x) / 2.0 + (cos_a * cx1 - sin_a * cy1);
    let cy = (y0 + y) / 2.0 + (sin_a * cx1 + cos_a * cy1);

    let ux = (x1 - cx1) / rx;
    let uy = (y1 - cy1) / ry;
    let vx = (-x1 - cx1) / rx;
    let vy = (-y1 - cy1) / ry;

    let n = (ux * ux + uy * uy).sqrt();
    let sign = if uy < 0.0 { -1.0 } else { 1.0 };
    let start_angle = (sign * (ux / n).clamp(-1.0, 1.0).acos()).to_degrees();

    let n = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
    let p = ux * vx + uy * vy;
    let sign = if ux * vy - uy * vx < 0.0 { -1.0 } else { 1.0 };
    let mut sweep_angle = (sign * (p / n).clamp(-1.0, 1.0).acos()).to_degrees();
    if !sweep && sweep_angle > 0.0 {
        sweep_angle -= 360.0;
    } else if sweep && sweep_angle < 0.0 {
        sweep_angle += 360.0;
    }

    Some(Arc {
        cx,
        cy,
        rx,
        ry,
        x_axis_rotation: angle,
        start_angle: start_angle % 360.0,
        sweep_angle: sweep_angle % 360.0,
    })
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $( $seg:expr ),*) => (
            #[test]
            fn $name() {
                let path = PathData::parse($text, 1.0);
                let expected: &[PathSegment] = &[$( $seg ),*];
                assert_eq!(path.segments(), expected);
            }
        )
    }

    test!(null, "", );
    test!(not_a_path, "q", );
    test!(not_a_move_to, "L 20 30", PathSegment::LineTo { x: 20.0, y: 30.0 });
    test!(stop_on_err_1, "M 10 20 L 30 40 L 50",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 40.0 }
    );

    test!(move_to_1, "M 10 20", PathSegment::MoveTo { x: 10.0, y: 20.0 });
    test!(move_to_2, "m 10 20", PathSegment::MoveTo { x: 10.0, y: 20.0 });
    test!(move_to_3, "M 10 20 30 40 50 60",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 40.0 },
        PathSegment::LineTo { x: 50.0, y: 60.0 }
    );
    test!(move_to_4, "m 10 20 30 40 m 1 1 2 2",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 40.0, y: 60.0 },
        PathSegment::MoveTo { x: 41.0, y: 61.0 },
        PathSegment::LineTo { x: 43.0, y: 63.0 }
    );

    test!(arc_flags_1, "M 10 20 A 5 5 30 1 1 20 20",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::ArcTo(endpoint_to_center(10.0, 20.0, 20.0, 20.0, 5.0, 5.0, 30.0, true, true).unwrap())
    );

    test!(arc_flags_2, "M 10 20 a5 5 30 0120 20",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::ArcTo(endpoint_to_center(10.0, 20.0, 30.0, 40.0, 5.0, 5.0, 30.0, false, true).unwrap())
    );

    test!(arc_zero_radius, "M 10 20 A 0 5 0 0 1 30 20",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 20.0 }
    );

    test!(arc_same_point, "M 10 20 A 5 5 0 0 1 10 20",
        PathSegment::MoveTo { x: 10.0, y: 20.0 }
    );

    test!(h_v_1, "M 10 20 H 30 v 5 h -5 V 0",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 25.0 },
        PathSegment::LineTo { x: 25.0, y: 25.0 },
        PathSegment::LineTo { x: 25.0, y: 0.0 }
    );

    test!(close_path_1, "M 10 20 L 30 40 Z l 5 5",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 40.0 },
        PathSegment::ClosePath,
        PathSegment::LineTo { x: 15.0, y: 25.0 }
    );

    test!(close_path_2, "M 10 20 L 30 40 zZz",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 40.0 },
        PathSegment::ClosePath
    );

    test!(close_path_3, "M 10 20 Z 5 5",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::ClosePath
    );

    test!(unknown_command_1, "M 10 20 X L 30 40",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 40.0 }
    );

    test!(unknown_command_2, "M 10 20 L 30 40 ###",
        PathSegment::MoveTo { x: 10.0, y: 20.0 },
        PathSegment::LineTo { x: 30.0, y: 40.0 }
    );

    test!(quad_1, "M 0 0 Q 30 30 60 0 T 120 0",
        PathSegment::MoveTo { x: 0.0, y: 0.0 },
        PathSegment::CubicTo { x1: 20.0, y1: 20.0, x2: 40.0, y2: 20.0, x: 60.0, y: 0.0 },
        PathSegment::CubicTo { x1: 80.0, y1: -20.0, x2: 100.0, y2: -20.0, x: 120.0, y: 0.0 }
    );

    test!(smooth_without_curve, "M 10 10 S 20 20 30 10",
        PathSegment::MoveTo { x: 10.0, y: 10.0 },
        PathSegment::CubicTo { x1: 10.0, y1: 10.0, x2: 20.0, y2: 20.0, x: 30.0, y: 10.0 }
    );

    #[test]
    fn smooth_cubic_reflection() {
        let path = PathData::parse("M0,0 C0,0 10,0 10,10 S20,20 20,0", 1.0);
        assert_eq!(path.segments()[2], PathSegment::CubicTo {
            x1: 10.0, y1: 20.0, x2: 20.0, y2: 20.0, x: 20.0, y: 0.0
        });
    }

    #[test]
    fn smooth_cubic_relative() {
        let path = PathData::parse("M0,0 c0,0 10,0 10,10 s10,10 10,-10", 1.0);
        assert_eq!(path.segments()[2], PathSegment::CubicTo {
            x1: 10.0, y1: 20.0, x2: 20.0, y2: 20.0, x: 20.0, y: 0.0
        });
    }

    #[test]
    fn smooth_cubic_after_line() {
        let path = PathData::parse("M0,0 C0,0 10,0 10,10 L 20 10 S30,20 30,10", 1.0);
        assert_eq!(path.segments()[3], PathSegment::CubicTo {
            x1: 20.0, y1: 10.0, x2: 30.0, y2: 20.0, x: 30.0, y: 10.0
        });
    }

    #[test]
    fn rect_bbox() {
        let path = PathData::parse("M0,0 L10,0 L10,10 L0,10 Z", 1.0);
        let r = path.bbox().to_rect().unwrap();
        assert_eq!(r, Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn bbox_includes_control_points() {
        let path = PathData::parse("M0,0 C0,-10 10,-10 10,0", 1.0);
        let r = path.bbox().to_rect().unwrap();
        assert_eq!(r, Rect::from_ltrb(0.0, -10.0, 10.0, 0.0));
    }

    #[test]
    fn scaled_path() {
        let path = PathData::parse("M 10 20 l 5 5 A 5 5 90 0 1 40 50", 2.0);
        assert_eq!(path.segments()[0], PathSegment::MoveTo { x: 20.0, y: 40.0 });
        assert_eq!(path.segments()[1], PathSegment::LineTo { x: 30.0, y: 50.0 });
        match path.segments()[2] {
            PathSegment::ArcTo(arc) => {
                assert_eq!(arc.x_axis_rotation, 90.0);
                let (x, y) = arc.end_point();
                assert!(approx_eq!(f64, x, 80.0, epsilon = 1e-6));
                assert!(approx_eq!(f64, y, 100.0, epsilon = 1e-6));
            }
            _ => panic!("expected an arc"),
        }
    }

    #[test]
    fn half_circle_arc() {
        let arc = endpoint_to_center(0.0, 0.0, 10.0, 0.0, 5.0, 5.0, 0.0, false, true).unwrap();
        assert!(approx_eq!(f64, arc.cx, 5.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, arc.cy, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, arc.start_angle.abs(), 180.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, arc.sweep_angle, 180.0, epsilon = 1e-9));

        let (x, y) = arc.end_point();
        assert!(approx_eq!(f64, x, 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, y, 0.0, epsilon = 1e-9));

        // A positive sweep is clockwise in a y-down system.
        let mut bbox = BBox::default();
        arc.add_to_bbox(&mut bbox);
        let r = bbox.to_rect().unwrap();
        assert!(approx_eq!(f64, r.top, -5.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, r.bottom, 0.0, epsilon = 1e-9));
    }

    #[test]
    fn small_radii_are_enlarged() {
        let arc = endpoint_to_center(0.0, 0.0, 10.0, 0.0, 1.0, 1.0, 0.0, false, false).unwrap();
        assert!(approx_eq!(f64, arc.rx, 5.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, arc.ry, 5.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, arc.sweep_angle, -180.0, epsilon = 1e-9));
    }

    #[test]
    fn arc_oval() {
        let arc = endpoint_to_center(0.0, 0.0, 10.0, 0.0, 5.0, 5.0, 0.0, false, true).unwrap();
        let oval = arc.oval();
        assert!(approx_eq!(f64, oval.width(), 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, oval.height(), 10.0, epsilon = 1e-9));
    }
}
