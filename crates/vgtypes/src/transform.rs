// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::ByteExt;
use crate::{Error, Stream};

/// A 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a translate transform.
    #[inline]
    pub fn from_translate(tx: f64, ty: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Constructs a scale transform.
    #[inline]
    pub fn from_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a rotate transform. The angle is in degrees.
    #[inline]
    pub fn from_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        Transform::new(a, b, -b, a, 0.0, 0.0)
    }

    /// Constructs a horizontal shear. The angle is in degrees.
    #[inline]
    pub fn from_skew_x(angle: f64) -> Self {
        Transform::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    /// Constructs a vertical shear. The angle is in degrees.
    #[inline]
    pub fn from_skew_y(angle: f64) -> Self {
        Transform::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Checks that transform is identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }

    /// Returns `self * other`.
    ///
    /// `other` becomes the innermost operation,
    /// so it is applied to a point before `self`.
    #[inline]
    pub fn pre_concat(&self, other: Transform) -> Self {
        multiply(self, &other)
    }

    /// Returns `other * self`.
    #[inline]
    pub fn post_concat(&self, other: Transform) -> Self {
        multiply(&other, self)
    }

    /// Pre-concatenates a translation.
    #[inline]
    pub fn pre_translate(&self, tx: f64, ty: f64) -> Self {
        self.pre_concat(Transform::from_translate(tx, ty))
    }

    /// Pre-concatenates a scale.
    #[inline]
    pub fn pre_scale(&self, sx: f64, sy: f64) -> Self {
        self.pre_concat(Transform::from_scale(sx, sy))
    }

    /// Pre-concatenates a rotation around the origin.
    #[inline]
    pub fn pre_rotate(&self, angle: f64) -> Self {
        self.pre_concat(Transform::from_rotate(angle))
    }

    /// Multiplies only the translation part by `scale`.
    ///
    /// Used when user-space coordinates are uniformly scaled,
    /// since the linear part is scale-invariant.
    #[inline]
    pub fn scale_translation(&self, scale: f64) -> Self {
        Transform {
            e: self.e * scale,
            f: self.f * scale,
            ..*self
        }
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

/// A single function of a transform list.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TransformFunction<'a> {
    /// `matrix(a b c d e f)`
    Matrix(Transform),
    /// `translate(tx [ty])`, `ty` defaults to 0.
    Translate(f64, f64),
    /// `scale(sx [sy])`, `sy` defaults to `sx`.
    Scale(f64, f64),
    /// `rotate(angle [cx cy])`
    Rotate {
        /// Angle in degrees.
        angle: f64,
        /// Rotation center.
        center: Option<(f64, f64)>,
    },
    /// `skewX(angle)`
    SkewX(f64),
    /// `skewY(angle)`
    SkewY(f64),
    /// A well-formed function with an unsupported name. Arguments are skipped.
    Unknown(&'a str),
}

impl TransformFunction<'_> {
    /// Converts the function into a matrix.
    ///
    /// Returns `None` for unknown functions.
    pub fn to_transform(&self) -> Option<Transform> {
        let ts = match *self {
            TransformFunction::Matrix(ts) => ts,
            TransformFunction::Translate(tx, ty) => Transform::from_translate(tx, ty),
            TransformFunction::Scale(sx, sy) => Transform::from_scale(sx, sy),
            TransformFunction::Rotate { angle, center: None } => Transform::from_rotate(angle),
            TransformFunction::Rotate {
                angle,
                center: Some((cx, cy)),
            } => Transform::from_translate(cx, cy)
                .pre_rotate(angle)
                .pre_translate(-cx, -cy),
            TransformFunction::SkewX(angle) => Transform::from_skew_x(angle),
            TransformFunction::SkewY(angle) => Transform::from_skew_y(angle),
            TransformFunction::Unknown(_) => return None,
        };

        Some(ts)
    }
}

/// A pull-based transform list parser.
///
/// Stops after the first error.
///
/// ```
/// use vgtypes::{TransformFunction, TransformFunctions};
///
/// let mut p = TransformFunctions::from("scale(2) rotate(45, 5 5)");
/// assert_eq!(p.next(), Some(Ok(TransformFunction::Scale(2.0, 2.0))));
/// assert_eq!(
///     p.next(),
///     Some(Ok(TransformFunction::Rotate { angle: 45.0, center: Some((5.0, 5.0)) }))
/// );
/// assert_eq!(p.next(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TransformFunctions<'a> {
    stream: Stream<'a>,
}

impl<'a> From<&'a str> for TransformFunctions<'a> {
    fn from(text: &'a str) -> Self {
        TransformFunctions {
            stream: Stream::from(text),
        }
    }
}

impl<'a> Iterator for TransformFunctions<'a> {
    type Item = Result<TransformFunction<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.skip_number_separators();
        if self.stream.at_end() {
            return None;
        }

        let res = parse_function(&mut self.stream);
        if res.is_err() {
            self.stream.jump_to_end();
        }

        Some(res)
    }
}

fn parse_function<'a>(s: &mut Stream<'a>) -> Result<TransformFunction<'a>, Error> {
    let start = s.pos();
    let name = s.consume_bytes(|_, c| c.is_letter());
    if name.is_empty() {
        return Err(Error::UnexpectedData(s.calc_char_pos_at(start)));
    }

    s.skip_spaces();
    s.consume_byte(b'(')?;

    let known = matches!(
        name,
        "matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY"
    );

    if !known {
        s.skip_bytes(|_, c| c != b')');
        s.consume_byte(b')')?;
        return Ok(TransformFunction::Unknown(name));
    }

    let mut args = [0.0; 6];
    let len = parse_arguments(s, &mut args)?;
    s.consume_byte(b')')?;

    let func = match (name, &args[..len]) {
        ("matrix", &[a, b, c, d, e, f]) => {
            TransformFunction::Matrix(Transform::new(a, b, c, d, e, f))
        }
        ("translate", &[tx]) => TransformFunction::Translate(tx, 0.0),
        ("translate", &[tx, ty]) => TransformFunction::Translate(tx, ty),
        ("scale", &[sx]) => TransformFunction::Scale(sx, sx),
        ("scale", &[sx, sy]) => TransformFunction::Scale(sx, sy),
        ("rotate", &[angle]) => TransformFunction::Rotate { angle, center: None },
        ("rotate", &[angle, cx, cy]) => TransformFunction::Rotate {
            angle,
            center: Some((cx, cy)),
        },
        ("skewX", &[angle]) => TransformFunction::SkewX(angle),
        ("skewY", &[angle]) => TransformFunction::SkewY(angle),
        _ => return Err(Error::InvalidValue),
    };

    Ok(func)
}

/// Reads from one to `args.len()` numbers up to the closing bracket.
fn parse_arguments(s: &mut Stream, args: &mut [f64]) -> Result<usize, Error> {
    let mut len = 0;
    loop {
        args[len] = s.parse_list_number()?;
        len += 1;

        s.skip_spaces();
        if len == args.len() || s.is_curr_byte_eq(b')') {
            return Ok(len);
        }

        if s.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }
    }
}

impl std::str::FromStr for Transform {
    type Err = Error;

    /// Parses a transform list into a single matrix.
    ///
    /// Each function is pre-concatenated, so the leftmost one is the outermost.
    /// Unknown functions are skipped with a warning.
    fn from_str(text: &str) -> Result<Self, Error> {
        let mut ts = Transform::default();
        for func in TransformFunctions::from(text) {
            match func? {
                TransformFunction::Unknown(name) => {
                    log::warn!("Unsupported transform function '{}'. Skipped.", name);
                }
                func => {
                    if let Some(v) = func.to_transform() {
                        ts = ts.pre_concat(v);
                    }
                }
            }
        }

        Ok(ts)
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}
