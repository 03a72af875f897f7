// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3D line segments.

use core::ops::{Add, Sub};

use crate::common::{clamp, is_epsilon_zero, EPSILON};
use crate::d3::{Point3, Prism, Shape3, Sphere, Vec3};

/// A 3D line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment3 {
    /// The start point.
    pub p0: Point3,
    /// The end point.
    pub p1: Point3,
}

impl Segment3 {
    /// Create a new segment.
    #[inline]
    pub fn new(p0: impl Into<Point3>, p1: impl Into<Point3>) -> Segment3 {
        Segment3 {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The vector from `p0` to `p1`.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.p1 - self.p0
    }

    /// The length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Is this segment a single point?
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    /// The point at parameter `t`, 0 being `p0` and 1 being `p1`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point3 {
        self.p0.lerp(self.p1, t)
    }

    /// The point of the segment closest to `other`, and the squared distance
    /// between the two segments.
    ///
    /// This is the same clamped minimization as
    /// [`closest_point_segment_segment`](crate::closest_point_segment_segment).
    pub fn closest_point_to_segment(&self, other: Segment3) -> (Point3, f64) {
        let u = self.direction();
        let v = other.direction();
        let w = self.p0 - other.p0;
        let aa = u.dot(u);
        let bb = u.dot(v);
        let cc = v.dot(v);
        let d = u.dot(w);
        let e = v.dot(w);

        if cc == 0.0 {
            let p = self.closest_point(other.p0);
            return (p, p.distance_squared(other.p0));
        }
        if aa == 0.0 {
            let q = other.closest_point(self.p0);
            return (self.p0, self.p0.distance_squared(q));
        }

        let denom = aa * cc - bb * bb;
        let (mut s_n, mut s_d) = (0.0, denom);
        let (mut t_n, mut t_d) = (e, cc);
        if denom <= EPSILON * aa * cc {
            s_d = 1.0;
        } else {
            s_n = bb * e - cc * d;
            t_n = aa * e - bb * d;
            t_d = denom;
            if s_n < 0.0 {
                s_n = 0.0;
                t_n = e;
                t_d = cc;
            } else if s_n > s_d {
                s_n = s_d;
                t_n = e + bb;
                t_d = cc;
            }
        }

        if t_n < 0.0 {
            t_n = 0.0;
            (s_n, s_d) = clamp_fraction(-d, aa, s_d);
        } else if t_n > t_d {
            t_n = t_d;
            (s_n, s_d) = clamp_fraction(bb - d, aa, s_d);
        }

        let sc = if is_epsilon_zero(s_n, EPSILON) {
            0.0
        } else {
            s_n / s_d
        };
        let tc = if is_epsilon_zero(t_n, EPSILON) {
            0.0
        } else {
            t_n / t_d
        };
        let dp = w + sc * u - tc * v;
        (self.p0 + sc * u, dp.length_squared())
    }

    /// Squared distance between two segments.
    #[inline]
    pub fn distance_squared_to_segment(&self, other: Segment3) -> f64 {
        self.closest_point_to_segment(other).1
    }
}

/// Clamp the fraction `n / d` to [0, 1], keeping `s_d` as denominator at the
/// ends.
#[inline]
fn clamp_fraction(n: f64, d: f64, s_d: f64) -> (f64, f64) {
    if n < 0.0 {
        (0.0, s_d)
    } else if n > d {
        (s_d, s_d)
    } else {
        (n, d)
    }
}

impl Add<Vec3> for Segment3 {
    type Output = Segment3;

    #[inline]
    fn add(self, v: Vec3) -> Segment3 {
        Segment3::new(self.p0 + v, self.p1 + v)
    }
}

impl Sub<Vec3> for Segment3 {
    type Output = Segment3;

    #[inline]
    fn sub(self, v: Vec3) -> Segment3 {
        Segment3::new(self.p0 - v, self.p1 - v)
    }
}

impl Shape3 for Segment3 {
    #[inline]
    fn bounding_box(&self) -> Prism {
        Prism::from_points(self.p0, self.p1)
    }

    fn contains(&self, p: Point3) -> bool {
        is_epsilon_zero(self.distance_squared(p), EPSILON)
    }

    fn intersects_prism(&self, prism: Prism) -> bool {
        prism.intersects_segment(*self)
    }

    fn intersects_sphere(&self, sphere: Sphere) -> bool {
        sphere.intersects_segment(*self)
    }

    fn intersects_segment(&self, segment: Segment3) -> bool {
        is_epsilon_zero(self.distance_squared_to_segment(segment), EPSILON)
    }

    fn closest_point(&self, p: Point3) -> Point3 {
        let v = self.direction();
        let len2 = v.length_squared();
        if len2 == 0.0 {
            return self.p0;
        }
        self.eval(clamp((p - self.p0).dot(v) / len2, 0.0, 1.0))
    }

    fn farthest_point(&self, p: Point3) -> Point3 {
        if p.distance_squared(self.p0) >= p.distance_squared(self.p1) {
            self.p0
        } else {
            self.p1
        }
    }

    fn translate(&mut self, v: Vec3) {
        *self = *self + v;
    }
}

#[cfg(test)]
mod tests {
    use crate::d3::{Point3, Segment3, Shape3};

    #[test]
    fn point_queries() {
        let s = Segment3::new((0.0, 0.0, 0.0), (2.0, 0.0, 0.0));
        assert_eq!(s.closest_point(Point3::new(1.0, 3.0, 4.0)), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(s.distance(Point3::new(1.0, 3.0, 4.0)), 5.0);
        assert_eq!(s.closest_point(Point3::new(-5.0, 0.0, 0.0)), s.p0);
        assert_eq!(s.farthest_point(Point3::new(-5.0, 0.0, 0.0)), s.p1);
        assert!(s.contains(Point3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn skew_segments() {
        let a = Segment3::new((-1.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let b = Segment3::new((0.0, -1.0, 2.0), (0.0, 1.0, 2.0));
        let (p, d2) = a.closest_point_to_segment(b);
        assert_eq!(p, Point3::ZERO);
        assert_eq!(d2, 4.0);
        assert!(!a.intersects_segment(b));
        let c = Segment3::new((0.0, -1.0, 0.0), (0.0, 1.0, 0.0));
        assert!(a.intersects_segment(c));
    }

    #[test]
    fn self_closest_point_is_itself() {
        let s = Segment3::new((1.0, 2.0, 3.0), (4.0, -2.0, 0.5));
        let (_, d2) = s.closest_point_to_segment(s);
        assert!(d2 < 1e-20);
    }

    #[test]
    fn parallel_and_clamped() {
        let a = Segment3::new((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let b = Segment3::new((3.0, 1.0, 0.0), (5.0, 1.0, 0.0));
        let (p, d2) = a.closest_point_to_segment(b);
        assert_eq!(p, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(d2, 5.0);
    }
}
