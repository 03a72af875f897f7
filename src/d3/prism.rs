// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned boxes in 3D.

use core::ops::{Add, Sub};

use crate::common::clamp;
use crate::d3::{Point3, Segment3, Shape3, Sphere, Vec3};

/// An axis-aligned box in 3D.
///
/// The border is part of the prism.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prism {
    /// The minimum corner.
    pub min: Point3,
    /// The maximum corner.
    pub max: Point3,
}

impl Prism {
    /// A new prism from its minimum and maximum corners, taken as they are.
    #[inline(always)]
    pub const fn new(min: Point3, max: Point3) -> Prism {
        Prism { min, max }
    }

    /// The smallest prism containing both points.
    pub fn from_points(p0: impl Into<Point3>, p1: impl Into<Point3>) -> Prism {
        let (a, b) = (p0.into(), p1.into());
        Prism::new(
            Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        )
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along z.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// The center point.
    #[inline]
    pub fn center(&self) -> Point3 {
        self.min.midpoint(self.max)
    }

    /// The smallest prism enclosing both prisms.
    pub fn union(&self, other: Prism) -> Prism {
        Prism::new(
            Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Do the prisms overlap, borders included?
    pub(crate) fn touches(&self, other: Prism) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }
}

impl Add<Vec3> for Prism {
    type Output = Prism;

    #[inline]
    fn add(self, v: Vec3) -> Prism {
        Prism::new(self.min + v, self.max + v)
    }
}

impl Sub<Vec3> for Prism {
    type Output = Prism;

    #[inline]
    fn sub(self, v: Vec3) -> Prism {
        Prism::new(self.min - v, self.max - v)
    }
}

impl Shape3 for Prism {
    #[inline]
    fn bounding_box(&self) -> Prism {
        *self
    }

    fn contains(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Prisms that only share a face do not intersect.
    fn intersects_prism(&self, prism: Prism) -> bool {
        self.min.x < prism.max.x
            && prism.min.x < self.max.x
            && self.min.y < prism.max.y
            && prism.min.y < self.max.y
            && self.min.z < prism.max.z
            && prism.min.z < self.max.z
    }

    fn intersects_sphere(&self, sphere: Sphere) -> bool {
        sphere.intersects_prism(*self)
    }

    /// Slab clipping of the segment against the three axes. The clipped
    /// piece must have a positive length, so a segment reduced to a point
    /// never intersects.
    fn intersects_segment(&self, segment: Segment3) -> bool {
        if segment.is_degenerate() {
            return false;
        }
        let d = segment.direction();
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        let axes = [
            (segment.p0.x, d.x, self.min.x, self.max.x),
            (segment.p0.y, d.y, self.min.y, self.max.y),
            (segment.p0.z, d.z, self.min.z, self.max.z),
        ];
        for (p, dp, lo, hi) in axes {
            if dp == 0.0 {
                if p < lo || p > hi {
                    return false;
                }
                continue;
            }
            let (ta, tb) = ((lo - p) / dp, (hi - p) / dp);
            t0 = t0.max(ta.min(tb));
            t1 = t1.min(ta.max(tb));
            if t0 >= t1 {
                return false;
            }
        }
        true
    }

    fn closest_point(&self, p: Point3) -> Point3 {
        Point3::new(
            clamp(p.x, self.min.x, self.max.x),
            clamp(p.y, self.min.y, self.max.y),
            clamp(p.z, self.min.z, self.max.z),
        )
    }

    /// The corner diagonally opposite the octant of `p`.
    fn farthest_point(&self, p: Point3) -> Point3 {
        let c = self.center();
        let pick = |v: f64, c: f64, lo: f64, hi: f64| if v <= c { hi } else { lo };
        Point3::new(
            pick(p.x, c.x, self.min.x, self.max.x),
            pick(p.y, c.y, self.min.y, self.max.y),
            pick(p.z, c.z, self.min.z, self.max.z),
        )
    }

    fn translate(&mut self, v: Vec3) {
        *self = *self + v;
    }
}
