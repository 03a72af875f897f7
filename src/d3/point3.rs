// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3D points and vectors.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::GeomError;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A 3D point.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The z coordinate.
    pub z: f64,
}

/// A 3D vector.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The z coordinate.
    pub z: f64,
}

impl Point3 {
    /// The point (0, 0, 0).
    pub const ZERO: Point3 = Point3::new(0., 0., 0.);

    /// Create a new `Point3`.
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Point3 {
        Point3 { x, y, z }
    }

    /// Convert this point into a `Vec3`.
    #[inline(always)]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point3, t: f64) -> Point3 {
        self + t * (other - self)
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Point3) -> Point3 {
        self.lerp(other, 0.5)
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point3) -> f64 {
        (self - other).length()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Point3) -> f64 {
        (self - other).length_squared()
    }

    /// Is this point [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Vec3 {
    /// The vector (0, 0, 0).
    pub const ZERO: Vec3 = Vec3::new(0., 0., 0.);

    /// Create a new vector.
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    /// Convert this vector into a `Point3`.
    #[inline(always)]
    pub const fn to_point3(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Magnitude of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Magnitude squared of the vector.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// A vector of length 1 pointing the same way.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::ZeroLengthVector`] when `self` has zero length.
    pub fn try_normalize(self) -> Result<Vec3, GeomError> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Err(GeomError::ZeroLengthVector);
        }
        Ok(self / len)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline(always)]
    fn from(v: (f64, f64, f64)) -> Point3 {
        Point3::new(v.0, v.1, v.2)
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    #[inline(always)]
    fn from(v: (f64, f64, f64)) -> Vec3 {
        Vec3::new(v.0, v.1, v.2)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, v: Vec3) -> Point3 {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign<Vec3> for Point3 {
    #[inline]
    fn add_assign(&mut self, v: Vec3) {
        *self = *self + v;
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, v: Vec3) -> Point3 {
        Point3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl SubAssign<Vec3> for Point3 {
    #[inline]
    fn sub_assign(&mut self, v: Vec3) {
        *self = *self - v;
    }
}

impl Sub<Point3> for Point3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, other: Point3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;

    /// Note: division by a scalar is implemented by multiplying by the
    /// reciprocal.
    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, s: f64) -> Vec3 {
        self * s.recip()
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(feature = "mint")]
impl From<Point3> for mint::Point3<f64> {
    #[inline(always)]
    fn from(p: Point3) -> mint::Point3<f64> {
        mint::Point3 {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point3<f64>> for Point3 {
    #[inline(always)]
    fn from(p: mint::Point3<f64>) -> Point3 {
        Point3::new(p.x, p.y, p.z)
    }
}

#[cfg(feature = "mint")]
impl From<Vec3> for mint::Vector3<f64> {
    #[inline(always)]
    fn from(v: Vec3) -> mint::Vector3<f64> {
        mint::Vector3 {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Vector3<f64>> for Vec3 {
    #[inline(always)]
    fn from(v: mint::Vector3<f64>) -> Vec3 {
        Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use crate::d3::{Point3, Vec3};
    use crate::GeomError;

    #[test]
    fn arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert_eq!(b - a, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.midpoint(b), Point3::new(2.5, 4.0, 3.0));
        assert_eq!(a + Vec3::new(1.0, 1.0, 1.0), Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn products() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(y), 0.0);
        let n = Vec3::new(0.0, 3.0, 4.0).try_normalize().unwrap();
        assert!((n - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
        assert_eq!(Vec3::ZERO.try_normalize(), Err(GeomError::ZeroLengthVector));
    }
}
