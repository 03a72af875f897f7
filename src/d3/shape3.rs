// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 3D shape trait.

use crate::d3::{Point3, Prism, Segment3, Sphere, Vec3};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A solid in 3D space.
///
/// Unlike [`Shape`](crate::Shape) there is no path representation; every
/// query is answered analytically by the implementing type.
pub trait Shape3 {
    /// The smallest axis-aligned prism enclosing the shape.
    fn bounding_box(&self) -> Prism;

    /// Is the point inside the shape? The border counts as inside.
    fn contains(&self, p: Point3) -> bool;

    /// Does the shape intersect the prism?
    fn intersects_prism(&self, prism: Prism) -> bool;

    /// Does the shape intersect the sphere?
    fn intersects_sphere(&self, sphere: Sphere) -> bool;

    /// Does the shape intersect the segment?
    fn intersects_segment(&self, segment: Segment3) -> bool;

    /// The point of the shape closest to `p`.
    fn closest_point(&self, p: Point3) -> Point3;

    /// The point of the shape farthest from `p`.
    fn farthest_point(&self, p: Point3) -> Point3;

    /// Squared distance from the shape to `p`.
    #[inline]
    fn distance_squared(&self, p: Point3) -> f64 {
        self.closest_point(p).distance_squared(p)
    }

    /// Distance from the shape to `p`.
    #[inline]
    fn distance(&self, p: Point3) -> f64 {
        self.distance_squared(p).sqrt()
    }

    /// Move the shape by `v`.
    fn translate(&mut self, v: Vec3);
}

#[cfg(test)]
mod tests {
    use crate::d3::{Point3, Prism, Segment3, Shape3, Sphere, Vec3};

    fn distance_via_trait(s: &dyn Shape3, p: Point3) -> f64 {
        s.distance(p)
    }

    #[test]
    fn object_safe_defaults() {
        let prism = Prism::from_points((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        let sphere = Sphere::new((0.0, 0.0, 0.0), 1.0);
        let seg = Segment3::new((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
        let p = Point3::new(0.0, 0.0, 3.0);
        assert_eq!(distance_via_trait(&prism, p), 2.0);
        assert_eq!(distance_via_trait(&sphere, p), 2.0);
        assert_eq!(distance_via_trait(&seg, p), 2.0);
    }

    #[test]
    fn translate_moves_bounds() {
        let mut sphere = Sphere::new((0.0, 0.0, 0.0), 1.0);
        sphere.translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sphere.bounding_box().center(), Point3::new(1.0, 2.0, 3.0));
    }
}
