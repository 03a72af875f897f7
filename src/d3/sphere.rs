// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spheres.

use crate::d3::{Point3, Prism, Segment3, Shape3, Vec3};
use crate::GeomError;

/// A sphere. The surface is part of the sphere.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// The center.
    pub center: Point3,
    /// The radius.
    pub radius: f64,
}

impl Sphere {
    /// A new sphere from center and radius.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative.
    pub fn new(center: impl Into<Point3>, radius: f64) -> Sphere {
        if radius < 0.0 {
            panic!("sphere radius must not be negative, got {radius}");
        }
        Sphere {
            center: center.into(),
            radius,
        }
    }

    /// A new sphere, rejecting a negative radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NegativeDimension`] if `radius` is negative.
    pub fn try_new(center: impl Into<Point3>, radius: f64) -> Result<Sphere, GeomError> {
        if radius < 0.0 {
            return Err(GeomError::NegativeDimension);
        }
        Ok(Sphere {
            center: center.into(),
            radius,
        })
    }

    #[inline]
    fn radius_squared(&self) -> f64 {
        self.radius * self.radius
    }
}

impl Shape3 for Sphere {
    fn bounding_box(&self) -> Prism {
        let r = Vec3::new(self.radius, self.radius, self.radius);
        Prism::new(self.center - r, self.center + r)
    }

    #[inline]
    fn contains(&self, p: Point3) -> bool {
        p.distance_squared(self.center) <= self.radius_squared()
    }

    fn intersects_prism(&self, prism: Prism) -> bool {
        prism.closest_point(self.center).distance_squared(self.center) < self.radius_squared()
    }

    fn intersects_sphere(&self, sphere: Sphere) -> bool {
        let r = self.radius + sphere.radius;
        self.center.distance_squared(sphere.center) < r * r
    }

    fn intersects_segment(&self, segment: Segment3) -> bool {
        segment.distance_squared(self.center) < self.radius_squared()
    }

    fn closest_point(&self, p: Point3) -> Point3 {
        let v = p - self.center;
        let len = v.length();
        if len <= self.radius {
            p
        } else {
            self.center + v * (self.radius / len)
        }
    }

    fn farthest_point(&self, p: Point3) -> Point3 {
        match (self.center - p).try_normalize() {
            Ok(dir) => self.center + dir * self.radius,
            Err(_) => self.center + Vec3::new(self.radius, 0.0, 0.0),
        }
    }

    fn distance_squared(&self, p: Point3) -> f64 {
        let d = (p.distance(self.center) - self.radius).max(0.0);
        d * d
    }

    fn translate(&mut self, v: Vec3) {
        self.center += v;
    }
}

#[cfg(test)]
mod tests {
    use crate::d3::{Point3, Prism, Segment3, Shape3, Sphere};
    use crate::GeomError;

    #[test]
    fn construction() {
        assert_eq!(Sphere::try_new((0.0, 0.0, 0.0), -0.5), Err(GeomError::NegativeDimension));
        let s = Sphere::new((1.0, 1.0, 1.0), 1.0);
        assert_eq!(
            s.bounding_box(),
            Prism::from_points((0.0, 0.0, 0.0), (2.0, 2.0, 2.0))
        );
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn negative_radius_panics() {
        let _ = Sphere::new((0.0, 0.0, 0.0), -1.0);
    }

    #[test]
    fn queries() {
        let s = Sphere::new((0.0, 0.0, 0.0), 2.0);
        assert!(s.contains(Point3::new(0.0, 2.0, 0.0)));
        assert!(s.intersects_sphere(Sphere::new((3.0, 0.0, 0.0), 1.5)));
        assert!(!s.intersects_sphere(Sphere::new((3.0, 0.0, 0.0), 1.0)));
        assert!(s.intersects_segment(Segment3::new((-5.0, 1.0, 0.0), (5.0, 1.0, 0.0))));
        assert!(!s.intersects_segment(Segment3::new((-5.0, 2.0, 0.0), (5.0, 2.0, 0.0))));
        assert_eq!(s.closest_point(Point3::new(0.0, 0.0, 4.0)), Point3::new(0.0, 0.0, 2.0));
        assert_eq!(s.farthest_point(Point3::new(0.0, 0.0, 4.0)), Point3::new(0.0, 0.0, -2.0));
        assert_eq!(s.distance(Point3::new(0.0, 3.0, 4.0)), 3.0);
    }
}
