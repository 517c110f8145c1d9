// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Transform;

/// A rectangle defined by its edges.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Creates a new rectangle from its edges.
    #[inline]
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a new rectangle from a position and a size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect::from_ltrb(x, y, x + width, y + height)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.left
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// An axis-aligned bounding box that grows monotonically.
///
/// A new box is mathematically empty: its minimum is `+inf`
/// and its maximum is `-inf`, so the first added point defines it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Default for BBox {
    #[inline]
    fn default() -> Self {
        BBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

impl From<Rect> for BBox {
    fn from(r: Rect) -> Self {
        let mut bbox = BBox::default();
        bbox.add_point(r.left, r.top);
        bbox.add_point(r.right, r.bottom);
        bbox
    }
}

impl BBox {
    /// Checks that no points were added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    /// Extends the box to include a point.
    ///
    /// `NaN` coordinates are ignored.
    #[inline]
    pub fn add_point(&mut self, x: f64, y: f64) {
        if x.is_nan() || y.is_nan() {
            return;
        }

        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Extends the box to include another one.
    #[inline]
    pub fn add_bbox(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }

        self.add_point(other.min_x, other.min_y);
        self.add_point(other.max_x, other.max_y);
    }

    /// Returns the bounds of the box corners mapped by `ts`.
    pub fn transform(&self, ts: &Transform) -> BBox {
        if self.is_empty() || ts.is_identity() {
            return *self;
        }

        let mut bbox = BBox::default();
        for (x, y) in [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ] {
            let (x, y) = ts.apply(x, y);
            bbox.add_point(x, y);
        }

        bbox
    }

    /// Converts into a rectangle, unless empty.
    #[inline]
    pub fn to_rect(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(Rect::from_ltrb(self.min_x, self.min_y, self.max_x, self.max_y))
        }
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Returns the box width. Negative infinity when empty.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the box height. Negative infinity when empty.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bbox() {
        let bbox = BBox::default();
        assert!(bbox.is_empty());
        assert_eq!(bbox.min_x(), f64::INFINITY);
        assert_eq!(bbox.max_y(), f64::NEG_INFINITY);
        assert_eq!(bbox.to_rect(), None);
    }

    #[test]
    fn add_points() {
        let mut bbox = BBox::default();
        bbox.add_point(5.0, 5.0);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.width(), 0.0);

        bbox.add_point(-1.0, 10.0);
        bbox.add_point(f64::NAN, 100.0);
        assert_eq!(bbox.to_rect(), Some(Rect::from_ltrb(-1.0, 5.0, 5.0, 10.0)));
    }

    #[test]
    fn add_empty_bbox() {
        let mut bbox = BBox::from(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        bbox.add_bbox(&BBox::default());
        assert_eq!(bbox.to_rect(), Some(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn transform_bbox() {
        let bbox = BBox::from(Rect::from_xywh(0.0, 0.0, 10.0, 20.0));
        let ts = Transform::from_translate(5.0, 5.0).pre_scale(2.0, 2.0);
        assert_eq!(bbox.transform(&ts).to_rect(), Some(Rect::from_ltrb(5.0, 5.0, 25.0, 45.0)));
    }
}
