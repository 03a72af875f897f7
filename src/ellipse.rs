// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Implementation of axis-aligned ellipse shape.

use core::ops::{Add, Sub};

use crate::circle::KAPPA;
use crate::{
    closest_point_segment_point, path_intersects_ellipse, Circle, GeomError, PathElement,
    PathIterator, PathWindingRule, Point, Rect, Segment, Shape, Translate, Triangle, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Bisection steps are bounded by the number of distinct doubles between
/// the two brackets.
const MAX_BISECTIONS: usize = 1100;

/// An ellipse whose axes are parallel to the coordinate axes.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// The center.
    pub center: Point,
    /// The horizontal and vertical radii.
    pub radii: Vec2,
}

impl Ellipse {
    /// A new ellipse from center and radii.
    ///
    /// # Panics
    ///
    /// Panics if either radius is negative.
    #[inline]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>) -> Ellipse {
        let radii = radii.into();
        if radii.x < 0.0 || radii.y < 0.0 {
            panic!("ellipse radii must not be negative, got {radii:?}");
        }
        Ellipse {
            center: center.into(),
            radii,
        }
    }

    /// A new ellipse, rejecting negative radii.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NegativeDimension`] if either radius is negative.
    pub fn try_new(center: impl Into<Point>, radii: impl Into<Vec2>) -> Result<Ellipse, GeomError> {
        let radii = radii.into();
        if radii.x < 0.0 || radii.y < 0.0 {
            return Err(GeomError::NegativeDimension);
        }
        Ok(Ellipse {
            center: center.into(),
            radii,
        })
    }

    /// The ellipse inscribed in `rect`.
    pub fn from_rect(rect: Rect) -> Ellipse {
        let rect = rect.abs();
        Ellipse {
            center: rect.center(),
            radii: Vec2::new(rect.width() / 2.0, rect.height() / 2.0),
        }
    }

    /// The rectangle the ellipse is inscribed in.
    #[inline]
    pub fn frame(&self) -> Rect {
        let (rx, ry) = self.abs_radii();
        Rect::new(
            self.center.x - rx,
            self.center.y - ry,
            self.center.x + rx,
            self.center.y + ry,
        )
    }

    /// Is either radius zero?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radii.x == 0.0 || self.radii.y == 0.0
    }

    /// Is this ellipse finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radii.is_finite()
    }

    #[inline]
    fn abs_radii(&self) -> (f64, f64) {
        (self.radii.x.abs(), self.radii.y.abs())
    }

    /// `p` in the coordinates where this ellipse is the unit circle.
    #[inline]
    fn to_unit(&self, p: Point) -> Vec2 {
        let (rx, ry) = self.abs_radii();
        Vec2::new((p.x - self.center.x) / rx, (p.y - self.center.y) / ry)
    }

    /// Like [`intersects_segment`](Shape::intersects_segment), but a
    /// segment tangent to the ellipse counts as intersecting.
    pub fn intersects_segment_with_ends(&self, segment: Segment) -> bool {
        self.segment_hits(segment, true)
    }

    fn segment_hits(&self, segment: Segment, touching: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let p = self.to_unit(segment.p0);
        let v = self.to_unit(segment.p1) - p;
        let a = v.hypot2();
        if a == 0.0 {
            let c = p.hypot2();
            return c < 1.0 || (touching && c == 1.0);
        }
        let b = 2.0 * p.dot(v);
        let c = p.hypot2() - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return false;
        }
        if discriminant == 0.0 {
            let t = -b / (2.0 * a);
            return touching && (0.0..=1.0).contains(&t);
        }
        let root = discriminant.sqrt();
        let t_out = (-b + root) / (2.0 * a);
        let t_in = (-b - root) / (2.0 * a);
        if touching {
            t_out >= 0.0 && t_in <= 1.0
        } else {
            t_out > 0.0 && t_in < 1.0
        }
    }
}

/// The point of the solid ellipse centered at `center` with radii `rx` and
/// `ry` nearest to `p`.
fn closest_point_solid(center: Point, rx: f64, ry: f64, p: Point) -> Point {
    if rx == 0.0 || ry == 0.0 {
        let r = Vec2::new(rx, ry);
        return closest_point_segment_point(Segment::new(center - r, center + r), p);
    }
    let d = p - center;
    if (d.x / rx) * (d.x / rx) + (d.y / ry) * (d.y / ry) <= 1.0 {
        return p;
    }
    // The quadrant solver needs the major axis first.
    let swap = rx < ry;
    let (x, y) = if swap {
        let (a, b) = closest_in_quadrant(ry, rx, d.y.abs(), d.x.abs());
        (b, a)
    } else {
        closest_in_quadrant(rx, ry, d.x.abs(), d.y.abs())
    };
    center + Vec2::new(x.copysign(d.x), y.copysign(d.y))
}

/// Nearest point of the ellipse outline with semi-axes `e0 >= e1 > 0` to a
/// point `(y0, y1)` of the first quadrant.
fn closest_in_quadrant(e0: f64, e1: f64, y0: f64, y1: f64) -> (f64, f64) {
    if y1 > 0.0 {
        if y0 > 0.0 {
            let z0 = y0 / e0;
            let z1 = y1 / e1;
            let g = z0 * z0 + z1 * z1 - 1.0;
            if g == 0.0 {
                return (y0, y1);
            }
            let r0 = (e0 / e1) * (e0 / e1);
            let s = bisect_root(r0, z0, z1, g);
            return (r0 * y0 / (s + r0), y1 / (s + 1.0));
        }
        return (0.0, e1);
    }
    let numer = e0 * y0;
    let denom = e0 * e0 - e1 * e1;
    if numer < denom {
        let t = numer / denom;
        (e0 * t, e1 * (1.0 - t * t).sqrt())
    } else {
        (e0, 0.0)
    }
}

/// Root of `(r0 z0 / (s + r0))² + (z1 / (s + 1))² = 1`, found by bisection.
fn bisect_root(r0: f64, z0: f64, z1: f64, g: f64) -> f64 {
    let n0 = r0 * z0;
    let mut s0 = z1 - 1.0;
    let mut s1 = if g < 0.0 { 0.0 } else { n0.hypot(z1) - 1.0 };
    let mut s = s0;
    for _ in 0..MAX_BISECTIONS {
        s = 0.5 * (s0 + s1);
        if s == s0 || s == s1 {
            break;
        }
        let ratio0 = n0 / (s + r0);
        let ratio1 = z1 / (s + 1.0);
        let g = ratio0 * ratio0 + ratio1 * ratio1 - 1.0;
        if g > 0.0 {
            s0 = s;
        } else if g < 0.0 {
            s1 = s;
        } else {
            break;
        }
    }
    s
}

impl Add<Vec2> for Ellipse {
    type Output = Ellipse;

    #[inline]
    fn add(self, v: Vec2) -> Ellipse {
        Ellipse {
            center: self.center + v,
            radii: self.radii,
        }
    }
}

impl Sub<Vec2> for Ellipse {
    type Output = Ellipse;

    #[inline]
    fn sub(self, v: Vec2) -> Ellipse {
        Ellipse {
            center: self.center - v,
            radii: self.radii,
        }
    }
}

impl From<Circle> for Ellipse {
    fn from(c: Circle) -> Ellipse {
        Ellipse {
            center: c.center,
            radii: Vec2::new(c.radius, c.radius),
        }
    }
}

/// The path of an ellipse: four cubic quarter arcs counter-clockwise from
/// angle zero, then a close.
#[derive(Debug)]
pub struct EllipsePathIter {
    ellipse: Ellipse,
    ix: usize,
}

const AXES: [Vec2; 5] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, 0.0),
];

impl Iterator for EllipsePathIter {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let Ellipse { center, radii } = self.ellipse;
        let at = |v: Vec2| center + Vec2::new(v.x * radii.x, v.y * radii.y);
        self.ix += 1;
        match self.ix {
            1 => Some(PathElement::MoveTo { to: at(AXES[0]) }),
            ix @ 2..=5 => {
                let d0 = AXES[ix - 2];
                let d1 = AXES[ix - 1];
                Some(PathElement::CurveTo {
                    from: at(d0),
                    ctrl1: at(d0 + KAPPA * d0.turn_90()),
                    ctrl2: at(d1 - KAPPA * d1.turn_90()),
                    to: at(d1),
                })
            }
            6 => Some(PathElement::Close {
                from: at(AXES[0]),
                to: at(AXES[0]),
            }),
            _ => None,
        }
    }
}

impl PathIterator for EllipsePathIter {
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
        self.ellipse.path_iter()
    }
}

impl Shape for Ellipse {
    type PathIter<'iter> = EllipsePathIter;

    #[inline]
    fn path_iter(&self) -> EllipsePathIter {
        EllipsePathIter {
            ellipse: *self,
            ix: 0,
        }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        self.frame()
    }

    /// The outline is part of the ellipse. An empty ellipse contains
    /// nothing.
    fn contains(&self, pt: Point) -> bool {
        !self.is_empty() && self.to_unit(pt).hypot2() <= 1.0
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        !rect.abs().is_empty() && rect.corners().into_iter().all(|p| self.contains(p))
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        let rect = rect.abs();
        if rect.is_empty() || self.is_empty() {
            return false;
        }
        let near = self.to_unit(rect.closest_point(self.center));
        near.hypot2() < 1.0
    }

    fn intersects_circle(&self, circle: Circle) -> bool {
        let (rx, ry) = self.abs_radii();
        let near = closest_point_solid(self.center, rx, ry, circle.center);
        near.distance_squared(circle.center) < circle.radius * circle.radius
    }

    /// A segment that only touches the outline does not intersect.
    fn intersects_segment(&self, segment: Segment) -> bool {
        self.segment_hits(segment, false)
    }

    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        if self.is_empty() || ellipse.is_empty() {
            return false;
        }
        // Map `self` onto the unit circle; `ellipse` stays axis-aligned.
        let (rx, ry) = self.abs_radii();
        let (ox, oy) = ellipse.abs_radii();
        let center = self.to_unit(ellipse.center).to_point();
        let near = closest_point_solid(center, ox / rx, oy / ry, Point::ZERO);
        near.to_vec2().hypot2() < 1.0
    }

    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        triangle.intersects_ellipse(*self)
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        path_intersects_ellipse(iter, *self)
    }

    fn closest_point(&self, pt: Point) -> Point {
        let (rx, ry) = self.abs_radii();
        closest_point_solid(self.center, rx, ry, pt)
    }

    #[inline(always)]
    fn as_ellipse(&self) -> Option<Ellipse> {
        Some(*self)
    }
}

impl Translate for Ellipse {
    #[inline]
    fn translate(&mut self, v: Vec2) {
        self.center += v;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        path_contains_point, Circle, Ellipse, GeomError, Point, Rect, Segment, Shape, Triangle,
        Vec2,
    };

    fn assert_approx_eq(x: f64, y: f64) {
        assert!((x - y).abs() < 1e-9, "{x} != {y}");
    }

    #[test]
    fn construction() {
        assert_eq!(
            Ellipse::try_new((0.0, 0.0), (-1.0, 2.0)),
            Err(GeomError::NegativeDimension)
        );
        let e = Ellipse::from_rect(Rect::new(4.0, 2.0, 0.0, 0.0));
        assert_eq!(e, Ellipse::new((2.0, 1.0), (2.0, 1.0)));
        assert_eq!(e.frame(), Rect::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(Ellipse::from(Circle::new((1.0, 1.0), 3.0)).radii, Vec2::new(3.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn negative_radii_panic() {
        let _ = Ellipse::new((0.0, 0.0), (1.0, -2.0));
    }

    #[test]
    fn containment() {
        let e = Ellipse::new((0.0, 0.0), (4.0, 2.0));
        assert!(e.contains(Point::new(4.0, 0.0)));
        assert!(e.contains(Point::new(2.0, 1.5)));
        assert!(!e.contains(Point::new(3.0, 1.5)));
        assert!(!Ellipse::new((0.0, 0.0), (0.0, 2.0)).contains(Point::ZERO));
        assert!(e.contains_rect(Rect::new(-2.0, -1.0, 2.0, 1.0)));
        assert!(!e.contains_rect(Rect::new(-3.0, -1.5, 3.0, 1.5)));
        // The cubic outline agrees away from the border.
        assert!(path_contains_point(e.path_iter(), Point::new(2.0, 1.5)));
        assert!(!path_contains_point(e.path_iter(), Point::new(3.0, 1.5)));
    }

    #[test]
    fn closest_point_lies_on_outline() {
        let e = Ellipse::new((1.0, -1.0), (4.0, 2.0));
        assert_eq!(e.closest_point(Point::new(2.0, -1.0)), Point::new(2.0, -1.0));
        assert_eq!(e.closest_point(Point::new(9.0, -1.0)), Point::new(5.0, -1.0));
        assert_eq!(e.closest_point(Point::new(1.0, 7.0)), Point::new(1.0, 1.0));
        for p in [Point::new(7.0, 3.0), Point::new(-6.0, -4.0), Point::new(2.0, 5.0)] {
            let q = e.closest_point(p);
            let u = Vec2::new((q.x - 1.0) / 4.0, (q.y + 1.0) / 2.0);
            assert_approx_eq(u.hypot2(), 1.0);
            // No sampled outline point is nearer.
            let d = q.distance(p);
            for i in 0..360 {
                let (s, c) = (f64::from(i)).to_radians().sin_cos();
                let o = Point::new(1.0 + 4.0 * c, -1.0 + 2.0 * s);
                assert!(o.distance(p) >= d - 1e-9, "{p:?}: {o:?} beats {q:?}");
            }
        }
        // A tall ellipse goes through the swapped axes.
        let tall = Ellipse::new((0.0, 0.0), (1.0, 3.0));
        let q = tall.closest_point(Point::new(2.0, 2.0));
        assert_approx_eq(q.x * q.x + q.y * q.y / 9.0, 1.0);
        assert!(q.x > 0.0 && q.y > 0.0);
    }

    #[test]
    fn intersections() {
        let e = Ellipse::new((0.0, 0.0), (4.0, 2.0));
        assert!(e.intersects_rect(Rect::new(3.0, -0.5, 5.0, 0.5)));
        assert!(!e.intersects_rect(Rect::new(3.0, 1.5, 5.0, 3.0)));
        assert!(e.intersects_circle(Circle::new((5.0, 0.0), 1.5)));
        assert!(!e.intersects_circle(Circle::new((5.0, 0.0), 1.0)));
        assert!(e.intersects_segment(Segment::new((-5.0, 1.0), (5.0, 1.0))));
        // Inside entirely.
        assert!(e.intersects_segment(Segment::new((-1.0, 0.0), (1.0, 0.0))));
        // Tangent at the top.
        let tangent = Segment::new((-1.0, 2.0), (1.0, 2.0));
        assert!(!e.intersects_segment(tangent));
        assert!(e.intersects_segment_with_ends(tangent));
        assert!(!e.intersects_segment(Segment::new((5.0, -3.0), (5.0, 3.0))));

        assert!(e.intersects_ellipse(Ellipse::new((6.0, 0.0), (2.5, 1.0))));
        assert!(!e.intersects_ellipse(Ellipse::new((6.0, 0.0), (1.5, 1.0))));
        assert!(e.intersects_ellipse(Ellipse::new((0.0, 0.0), (0.5, 0.5))));
        assert!(e.intersects_triangle(Triangle::new((3.0, 0.0), (8.0, -1.0), (8.0, 1.0))));
        assert!(!e.intersects_triangle(Triangle::new((5.0, 0.0), (8.0, -1.0), (8.0, 1.0))));
    }

    #[test]
    fn shape_queries_route_through_ellipse() {
        let e = Ellipse::new((0.0, 0.0), (4.0, 2.0));
        let r = Rect::new(-1.0, -1.0, 1.0, 1.0);
        assert!(r.intersects(&e));
        assert!(e.intersects(&r));
        assert!(!Rect::new(3.5, 1.5, 5.0, 3.0).intersects(&e));
        assert!(e.to_path().intersects(&Circle::new((4.5, 0.0), 1.0)));
    }
}
