// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-dimensional primitives.
//!
//! The 3D side is deliberately smaller than the planar one: points and
//! vectors, segments, axis-aligned prisms, spheres, and a composite. Every
//! query is answered analytically through [`Shape3`]; there are no paths.

mod multi_shape3;
mod point3;
mod prism;
mod segment3;
mod shape3;
mod sphere;

pub use multi_shape3::MultiShape3;
pub use point3::{Point3, Vec3};
pub use prism::Prism;
pub use segment3::Segment3;
pub use shape3::Shape3;
pub use sphere::Sphere;
