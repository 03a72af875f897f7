// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use core::ops::{Add, Sub};

use crate::common::clamp;
use crate::{
    path_intersects_rect, rect_intersects_segment, Circle, Ellipse, GeomError, PathElement,
    PathIterator, PathWindingRule, Point, Segment, Shape, Translate, Triangle, Vec2,
};

/// A rectangle.
///
/// The rectangle is axis-aligned. `x0 <= x1` and `y0 <= y1` is the usual
/// case; a rectangle built field by field may break that, and [`Rect::abs`]
/// restores it.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (bottom edge, y-up).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (top edge, y-up).
    pub y1: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0., 0., 0., 0.);

    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result has non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x, p0.y, p1.x, p1.y).abs()
    }

    /// A new rectangle from an origin and a size.
    ///
    /// A negative width or height extends the rectangle the other way from
    /// `origin`.
    #[inline]
    pub fn from_origin_size(origin: impl Into<Point>, width: f64, height: f64) -> Rect {
        let origin = origin.into();
        Rect::from_points(origin, origin + Vec2::new(width, height))
    }

    /// A new rectangle from an origin and a size, rejecting negative sizes.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NegativeDimension`] if `width` or `height` is
    /// negative or NaN.
    pub fn try_from_origin_size(
        origin: impl Into<Point>,
        width: f64,
        height: f64,
    ) -> Result<Rect, GeomError> {
        if !(width >= 0.0 && height >= 0.0) {
            return Err(GeomError::NegativeDimension);
        }
        let origin = origin.into();
        Ok(Rect::new(origin.x, origin.y, origin.x + width, origin.y + height))
    }

    /// The width of the rectangle.
    ///
    /// Note: nothing forbids negative width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    ///
    /// Note: nothing forbids negative height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The minimum corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Is the width or the height zero or negative?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Take the absolute value of width and height.
    ///
    /// The resulting rect has the same extents as the original, but is
    /// guaranteed to have non-negative width and height.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Compute the union with one point.
    ///
    /// This method includes the perimeter of zero-area rectangles.
    /// Thus, a succession of `union_pt` operations on a series of
    /// points yields their enclosing rectangle.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// The intersection of two rectangles.
    ///
    /// The result is zero-area if either input has negative width or
    /// height. The result always has non-negative width and height.
    #[inline]
    pub fn intersect(&self, other: Rect) -> Rect {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        Rect::new(x0, y0, x1.max(x0), y1.max(y0))
    }

    /// Expand by `dx` horizontally and `dy` vertically on each side.
    #[inline]
    pub fn inflate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x0 - dx, self.y0 - dy, self.x1 + dx, self.y1 + dy)
    }

    /// Is this rectangle [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.x1.is_finite() && self.y0.is_finite() && self.y1.is_finite()
    }

    /// The four corners, in path order.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ]
    }
}

impl From<(Point, Point)> for Rect {
    #[inline(always)]
    fn from(points: (Point, Point)) -> Rect {
        Rect::from_points(points.0, points.1)
    }
}

impl Add<Vec2> for Rect {
    type Output = Rect;

    #[inline]
    fn add(self, v: Vec2) -> Rect {
        Rect::new(self.x0 + v.x, self.y0 + v.y, self.x1 + v.x, self.y1 + v.y)
    }
}

impl Sub<Vec2> for Rect {
    type Output = Rect;

    #[inline]
    fn sub(self, v: Vec2) -> Rect {
        Rect::new(self.x0 - v.x, self.y0 - v.y, self.x1 - v.x, self.y1 - v.y)
    }
}

/// The path of a rectangle: its four corners counter-clockwise from the
/// minimum corner, then a close.
#[derive(Debug)]
pub struct RectPathIter {
    rect: Rect,
    ix: usize,
}

impl Iterator for RectPathIter {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let [a, b, c, d] = self.rect.corners();
        self.ix += 1;
        match self.ix {
            1 => Some(PathElement::MoveTo { to: a }),
            2 => Some(PathElement::LineTo { from: a, to: b }),
            3 => Some(PathElement::LineTo { from: b, to: c }),
            4 => Some(PathElement::LineTo { from: c, to: d }),
            5 => Some(PathElement::Close { from: d, to: a }),
            _ => None,
        }
    }
}

impl PathIterator for RectPathIter {
    #[inline]
    fn has_next(&self) -> bool {
        self.ix < 5
    }

    #[inline]
    fn winding_rule(&self) -> PathWindingRule {
        PathWindingRule::NonZero
    }

    #[inline]
    fn is_polyline(&self) -> bool {
        false
    }

    #[inline]
    fn is_curved(&self) -> bool {
        false
    }

    #[inline]
    fn is_polygon(&self) -> bool {
        true
    }

    #[inline]
    fn is_multi_parts(&self) -> bool {
        false
    }

    fn restart_iterations(&self) -> Self {
        self.rect.path_iter()
    }
}

impl Shape for Rect {
    type PathIter<'iter> = RectPathIter;

    #[inline]
    fn path_iter(&self) -> RectPathIter {
        RectPathIter { rect: *self, ix: 0 }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        self.abs()
    }

    /// The border is part of the rectangle.
    #[inline]
    fn contains(&self, pt: Point) -> bool {
        let r = self.abs();
        pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
    }

    #[inline]
    fn contains_rect(&self, rect: Rect) -> bool {
        let (r, rect) = (self.abs(), rect.abs());
        rect.x0 >= r.x0 && rect.x1 <= r.x1 && rect.y0 >= r.y0 && rect.y1 <= r.y1
    }

    /// Rectangles that only share a border do not intersect.
    #[inline]
    fn intersects_rect(&self, rect: Rect) -> bool {
        let (r, rect) = (self.abs(), rect.abs());
        r.x0 < rect.x1 && rect.x0 < r.x1 && r.y0 < rect.y1 && rect.y0 < r.y1
    }

    #[inline]
    fn intersects_circle(&self, circle: Circle) -> bool {
        circle.intersects_rect(*self)
    }

    #[inline]
    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        ellipse.intersects_rect(*self)
    }

    #[inline]
    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        triangle.intersects_rect(*self)
    }

    #[inline]
    fn intersects_segment(&self, segment: Segment) -> bool {
        rect_intersects_segment(*self, segment)
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        path_intersects_rect(iter, *self)
    }

    fn closest_point(&self, pt: Point) -> Point {
        let r = self.abs();
        Point::new(clamp(pt.x, r.x0, r.x1), clamp(pt.y, r.y0, r.y1))
    }

    /// The corner diagonally opposite the quadrant of `pt`.
    fn farthest_point(&self, pt: Point) -> Point {
        let r = self.abs();
        let c = r.center();
        Point::new(
            if pt.x <= c.x { r.x1 } else { r.x0 },
            if pt.y <= c.y { r.y1 } else { r.y0 },
        )
    }

    #[inline]
    fn distance_squared(&self, pt: Point) -> f64 {
        pt.distance_squared(self.closest_point(pt))
    }

    #[inline(always)]
    fn as_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl Translate for Rect {
    #[inline]
    fn translate(&mut self, v: Vec2) {
        *self = *self + v;
    }
}
