// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 3D shape made of an ordered list of shapes.

use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::d3::{Point3, Prism, Segment3, Shape3, Sphere, Vec3};

/// A composite 3D shape with a cached bounding prism.
#[derive(Clone)]
pub struct MultiShape3<S> {
    children: Vec<S>,
    bounds: Cell<Option<Prism>>,
}

impl<S> Default for MultiShape3<S> {
    fn default() -> Self {
        MultiShape3 {
            children: Vec::new(),
            bounds: Cell::new(None),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for MultiShape3<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiShape3")
            .field("children", &self.children)
            .field("bounds", &self.bounds.get())
            .finish()
    }
}

impl<S> MultiShape3<S> {
    /// An empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached bounding prism.
    #[inline]
    pub fn on_backend_changed(&self) {
        self.bounds.set(None);
    }

    /// Append a child.
    pub fn push(&mut self, shape: S) {
        self.children.push(shape);
        self.on_backend_changed();
    }

    /// Insert a child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, shape: S) {
        self.children.insert(index, shape);
        self.on_backend_changed();
    }

    /// Remove and return the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> S {
        let shape = self.children.remove(index);
        self.on_backend_changed();
        shape
    }

    /// Replace the child at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, shape: S) -> S {
        let old = core::mem::replace(&mut self.children[index], shape);
        self.on_backend_changed();
        old
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.children.clear();
        self.on_backend_changed();
    }

    /// The child at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&S> {
        self.children.get(index)
    }

    /// Mutable access to the child at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut S> {
        // The returned borrow keeps `self` locked, so the cache cannot be
        // read again before the edit is finished.
        self.on_backend_changed();
        self.children.get_mut(index)
    }

    /// The number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Is there no child?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over the children.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, S> {
        self.children.iter()
    }
}

impl<S: Shape3> MultiShape3<S> {
    fn bbox_rejects(&self, other: Prism) -> bool {
        self.is_empty() || !self.bounding_box().touches(other)
    }
}

impl<S> FromIterator<S> for MultiShape3<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        MultiShape3 {
            children: iter.into_iter().collect(),
            bounds: Cell::new(None),
        }
    }
}

impl<S: Shape3> Shape3 for MultiShape3<S> {
    /// The union of the children's prisms, or a zero prism at the origin when
    /// there is no child.
    fn bounding_box(&self) -> Prism {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = self
            .children
            .iter()
            .map(Shape3::bounding_box)
            .reduce(|a, b| a.union(b))
            .unwrap_or_default();
        self.bounds.set(Some(bounds));
        bounds
    }

    fn contains(&self, p: Point3) -> bool {
        !self.bbox_rejects(Prism::new(p, p)) && self.children.iter().any(|c| c.contains(p))
    }

    fn intersects_prism(&self, prism: Prism) -> bool {
        !self.bbox_rejects(prism) && self.children.iter().any(|c| c.intersects_prism(prism))
    }

    fn intersects_sphere(&self, sphere: Sphere) -> bool {
        !self.bbox_rejects(sphere.bounding_box())
            && self.children.iter().any(|c| c.intersects_sphere(sphere))
    }

    fn intersects_segment(&self, segment: Segment3) -> bool {
        !self.bbox_rejects(segment.bounding_box())
            && self.children.iter().any(|c| c.intersects_segment(segment))
    }

    /// The closest point over all children, or a point at infinity when
    /// there is no child.
    fn closest_point(&self, p: Point3) -> Point3 {
        let mut best = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut best_d2 = f64::INFINITY;
        for child in &self.children {
            let q = child.closest_point(p);
            let d2 = q.distance_squared(p);
            if d2 < best_d2 {
                best = q;
                best_d2 = d2;
            }
        }
        best
    }

    fn farthest_point(&self, p: Point3) -> Point3 {
        let mut best = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut best_d2 = -1.0;
        for child in &self.children {
            let q = child.farthest_point(p);
            let d2 = q.distance_squared(p);
            if d2 > best_d2 {
                best = q;
                best_d2 = d2;
            }
        }
        best
    }

    fn distance_squared(&self, p: Point3) -> f64 {
        self.children
            .iter()
            .map(|c| c.distance_squared(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn translate(&mut self, v: Vec3) {
        for child in &mut self.children {
            child.translate(v);
        }
        self.on_backend_changed();
    }
}

#[cfg(test)]
mod tests {
    use crate::d3::{MultiShape3, Point3, Prism, Segment3, Shape3, Sphere, Vec3};

    fn sample() -> MultiShape3<Sphere> {
        [
            Sphere::new((0.0, 0.0, 0.0), 1.0),
            Sphere::new((5.0, 0.0, 0.0), 1.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn bounds_follow_mutations() {
        let mut m = sample();
        assert_eq!(
            m.bounding_box(),
            Prism::from_points((-1.0, -1.0, -1.0), (6.0, 1.0, 1.0))
        );
        if let Some(s) = m.get_mut(1) {
            s.radius = 2.0;
        }
        assert_eq!(m.bounding_box().max.x, 7.0);
        m.push(Sphere::new((0.0, 0.0, -10.0), 1.0));
        assert_eq!(m.bounding_box().min.z, -11.0);
        m.remove(2);
        m.translate(Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(m.bounding_box().min.z, -1.0);
        m.clear();
        assert_eq!(m.bounding_box(), Prism::default());
        assert!(!m.contains(Point3::ZERO));
    }

    #[test]
    fn queries() {
        let m = sample();
        assert!(m.contains(Point3::new(5.5, 0.0, 0.0)));
        assert!(!m.contains(Point3::new(2.5, 0.0, 0.0)));
        assert!(m.intersects_segment(Segment3::new((2.5, 0.0, 0.0), (5.0, 0.5, 0.0))));
        assert!(!m.intersects_prism(Prism::from_points((2.0, -1.0, -1.0), (3.0, 1.0, 1.0))));
        assert_eq!(m.closest_point(Point3::new(3.5, 0.0, 0.0)), Point3::new(4.0, 0.0, 0.0));
        assert_eq!(m.farthest_point(Point3::new(3.5, 0.0, 0.0)), Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(m.distance(Point3::new(3.5, 0.0, 0.0)), 0.5);
    }
}
