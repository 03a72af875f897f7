// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Implementation of circle shape.

use core::ops::{Add, Sub};

use crate::{
    distance_squared_segment_point, path_intersects_circle, Ellipse, GeomError, PathElement,
    PathIterator, PathWindingRule, Point, Rect, Segment, Shape, Translate, Triangle, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Distance of the cubic control points from the on-curve points, relative
/// to the radius, for a quarter circle.
pub(crate) const KAPPA: f64 = 0.5522847498307936;

/// A circle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
}

impl Circle {
    /// A new circle from center and radius.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        if radius < 0.0 {
            panic!("circle radius must not be negative, got {radius}");
        }
        Circle {
            center: center.into(),
            radius,
        }
    }

    /// A new circle, rejecting a negative radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NegativeDimension`] if `radius` is negative.
    pub fn try_new(center: impl Into<Point>, radius: f64) -> Result<Circle, GeomError> {
        if radius < 0.0 {
            return Err(GeomError::NegativeDimension);
        }
        Ok(Circle {
            center: center.into(),
            radius,
        })
    }

    /// Is this circle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }

    /// Is this circle NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.center.is_nan() || self.radius.is_nan()
    }

    #[inline]
    fn radius_squared(&self) -> f64 {
        self.radius * self.radius
    }
}

impl Add<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn add(self, v: Vec2) -> Circle {
        Circle {
            center: self.center + v,
            radius: self.radius,
        }
    }
}

impl Sub<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn sub(self, v: Vec2) -> Circle {
        Circle {
            center: self.center - v,
            radius: self.radius,
        }
    }
}

/// The path of a circle: four cubic quarter arcs counter-clockwise from
/// angle zero, then a close.
#[derive(Debug)]
pub struct CirclePathIter {
    circle: Circle,
    ix: usize,
}

const QUADRANTS: [Vec2; 5] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, 0.0),
];

impl Iterator for CirclePathIter {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let Circle { center, radius } = self.circle;
        let start = center + radius * QUADRANTS[0];
        self.ix += 1;
        match self.ix {
            1 => Some(PathElement::MoveTo { to: start }),
            ix @ 2..=5 => {
                let d0 = QUADRANTS[ix - 2];
                let d1 = QUADRANTS[ix - 1];
                let arm = KAPPA * radius;
                Some(PathElement::CurveTo {
                    from: center + radius * d0,
                    ctrl1: center + radius * d0 + arm * d0.turn_90(),
                    ctrl2: center + radius * d1 - arm * d1.turn_90(),
                    to: center + radius * d1,
                })
            }
            6 => Some(PathElement::Close {
                from: start,
                to: start,
            }),
            _ => None,
        }
    }
}

impl PathIterator for CirclePathIter {
    #[inline]
    fn has_next(&self) -> bool {
        self.ix < 6
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
        true
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
        self.circle.path_iter()
    }
}

impl Shape for Circle {
    type PathIter<'iter> = CirclePathIter;

    #[inline]
    fn path_iter(&self) -> CirclePathIter {
        CirclePathIter {
            circle: *self,
            ix: 0,
        }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        let r = self.radius.abs();
        let (x, y) = self.center.into();
        Rect::new(x - r, y - r, x + r, y + r)
    }

    /// The circumference is part of the circle.
    #[inline]
    fn contains(&self, pt: Point) -> bool {
        (pt - self.center).hypot2() <= self.radius_squared()
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        rect.corners().into_iter().all(|p| self.contains(p))
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        self.center.distance_squared(rect.closest_point(self.center)) < self.radius_squared()
    }

    /// Circles that only touch do not intersect.
    #[inline]
    fn intersects_circle(&self, circle: Circle) -> bool {
        let r = self.radius + circle.radius;
        self.center.distance_squared(circle.center) < r * r
    }

    #[inline]
    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        ellipse.intersects_circle(*self)
    }

    #[inline]
    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        triangle.intersects_circle(*self)
    }

    #[inline]
    fn intersects_segment(&self, segment: Segment) -> bool {
        distance_squared_segment_point(segment, self.center) < self.radius_squared()
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        path_intersects_circle(iter, *self)
    }

    fn closest_point(&self, pt: Point) -> Point {
        let v = pt - self.center;
        let len = v.hypot();
        if len <= self.radius {
            pt
        } else {
            self.center + v * (self.radius / len)
        }
    }

    /// From the center, every point of the circumference is equally far and
    /// the one at angle zero is returned.
    fn farthest_point(&self, pt: Point) -> Point {
        match (self.center - pt).try_normalize() {
            Ok(dir) => self.center + dir * self.radius,
            Err(_) => self.center + Vec2::new(self.radius, 0.0),
        }
    }

    fn distance_squared(&self, pt: Point) -> f64 {
        let d = (pt.distance(self.center) - self.radius).max(0.0);
        d * d
    }

    #[inline(always)]
    fn as_circle(&self) -> Option<Circle> {
        Some(*self)
    }
}

impl Translate for Circle {
    #[inline]
    fn translate(&mut self, v: Vec2) {
        self.center += v;
    }
}
