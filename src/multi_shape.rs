// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shape made of an ordered list of shapes.

use alloc::vec::{Drain, Vec};
use core::cell::Cell;
use core::fmt;
use core::ops::{Deref, DerefMut, RangeBounds};

use crate::{
    Circle, Ellipse, PathElement, PathFlags, PathIterator, PathWindingRule, Point, Rect, Segment,
    Shape, ShapePart, Translate, Triangle, Vec2,
};

/// A composite shape.
///
/// The children are kept in order. The bounding box of the whole is cached,
/// and every mutation goes through
/// [`on_backend_changed`](MultiShape::on_backend_changed), which drops the
/// cache. Queries reject against the cached box before looking at the
/// children.
#[derive(Clone)]
pub struct MultiShape<S> {
    children: Vec<S>,
    winding_rule: PathWindingRule,
    bounds: Cell<Option<Rect>>,
}

impl<S> Default for MultiShape<S> {
    fn default() -> Self {
        MultiShape {
            children: Vec::new(),
            winding_rule: PathWindingRule::NonZero,
            bounds: Cell::new(None),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for MultiShape<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiShape")
            .field("children", &self.children)
            .field("winding_rule", &self.winding_rule)
            .field("bounds", &self.bounds.get())
            .finish()
    }
}

/// Closed overlap of two boxes; touching borders count.
#[inline]
fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

impl<S> MultiShape<S> {
    /// An empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// The winding rule reported by [`Shape::path_iter`].
    #[inline]
    pub fn winding_rule(&self) -> PathWindingRule {
        self.winding_rule
    }

    /// Change the winding rule reported by [`Shape::path_iter`].
    pub fn set_winding_rule(&mut self, winding_rule: PathWindingRule) {
        self.winding_rule = winding_rule;
    }

    /// Drop the cached bounding box.
    ///
    /// Every mutation of the children calls this. Call it after changing a
    /// child through any other route.
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

    /// Keep only the children for which `f` returns true.
    pub fn retain(&mut self, f: impl FnMut(&S) -> bool) {
        self.children.retain(f);
        self.on_backend_changed();
    }

    /// Remove the children in `range` and iterate over them.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn drain(&mut self, range: impl RangeBounds<usize>) -> Drain<'_, S> {
        // The drain borrows `self` until it is dropped, so nothing can read
        // the cache before the children are gone.
        self.on_backend_changed();
        self.children.drain(range)
    }

    /// The child at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&S> {
        self.children.get(index)
    }

    /// Mutable access to the child at `index`.
    ///
    /// The cached bounds are dropped when the guard goes away.
    pub fn get_mut(&mut self, index: usize) -> Option<ChildMut<'_, S>> {
        let MultiShape {
            children, bounds, ..
        } = self;
        let child = children.get_mut(index)?;
        Some(ChildMut { child, bounds })
    }

    /// Mutable access to all children, without structural changes.
    ///
    /// The cached bounds are dropped when the guard goes away.
    pub fn children_mut(&mut self) -> ChildrenMut<'_, S> {
        let MultiShape {
            children, bounds, ..
        } = self;
        ChildrenMut {
            children: children.as_mut_slice(),
            bounds,
        }
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

    /// The children as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[S] {
        &self.children
    }
}

impl<S: Shape> MultiShape<S> {
    /// The first child that intersects `other`.
    pub fn first_shape_intersecting<T: Shape + ?Sized>(&self, other: &T) -> Option<&S> {
        if self.is_empty() || !touches(self.bounding_box(), other.bounding_box()) {
            return None;
        }
        self.children.iter().find(|c| c.intersects(other))
    }

    /// Every child that intersects `other`, in order.
    pub fn shapes_intersecting<T: Shape + ?Sized>(&self, other: &T) -> Vec<&S> {
        if self.is_empty() || !touches(self.bounding_box(), other.bounding_box()) {
            return Vec::new();
        }
        self.children.iter().filter(|c| c.intersects(other)).collect()
    }

    fn bbox_rejects(&self, other: Rect) -> bool {
        self.is_empty() || !touches(self.bounding_box(), other)
    }
}

impl<S> FromIterator<S> for MultiShape<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        MultiShape {
            children: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<S> Extend<S> for MultiShape<S> {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.children.extend(iter);
        self.on_backend_changed();
    }
}

impl<'a, S> IntoIterator for &'a MultiShape<S> {
    type Item = &'a S;
    type IntoIter = core::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// Mutable access to one child of a [`MultiShape`].
pub struct ChildMut<'a, S> {
    child: &'a mut S,
    bounds: &'a Cell<Option<Rect>>,
}

impl<S: fmt::Debug> fmt::Debug for ChildMut<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChildMut").field(&self.child).finish()
    }
}

impl<S> Deref for ChildMut<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.child
    }
}

impl<S> DerefMut for ChildMut<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.child
    }
}

impl<S> Drop for ChildMut<'_, S> {
    fn drop(&mut self) {
        self.bounds.set(None);
    }
}

/// Mutable access to the children of a [`MultiShape`].
pub struct ChildrenMut<'a, S> {
    children: &'a mut [S],
    bounds: &'a Cell<Option<Rect>>,
}

impl<S: fmt::Debug> fmt::Debug for ChildrenMut<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChildrenMut").field(&self.children).finish()
    }
}

impl<S> Deref for ChildrenMut<'_, S> {
    type Target = [S];

    fn deref(&self) -> &[S] {
        self.children
    }
}

impl<S> DerefMut for ChildrenMut<'_, S> {
    fn deref_mut(&mut self) -> &mut [S] {
        self.children
    }
}

impl<S> Drop for ChildrenMut<'_, S> {
    fn drop(&mut self) {
        self.bounds.set(None);
    }
}

/// The elements of every child of a [`MultiShape`], one after the other.
pub struct MultiShapePathIter<'a, S: Shape + 'a> {
    children: &'a [S],
    ix: usize,
    current: Option<S::PathIter<'a>>,
    winding_rule: PathWindingRule,
    flags: PathFlags,
}

impl<'a, S: Shape + 'a> MultiShapePathIter<'a, S> {
    fn new(children: &'a [S], winding_rule: PathWindingRule) -> Self {
        let flags = PathFlags::scan(
            children
                .iter()
                .flat_map(|c| c.path_iter().map(|el| el.kind())),
        );
        MultiShapePathIter {
            children,
            ix: 0,
            current: None,
            winding_rule,
            flags,
        }
    }
}

impl<'a, S: Shape + 'a> fmt::Debug for MultiShapePathIter<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiShapePathIter")
            .field("children", &self.children.len())
            .field("ix", &self.ix)
            .field("winding_rule", &self.winding_rule)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl<'a, S: Shape + 'a> Iterator for MultiShapePathIter<'a, S> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        loop {
            if let Some(it) = &mut self.current {
                if let Some(el) = it.next() {
                    return Some(el);
                }
                self.current = None;
            }
            let child = self.children.get(self.ix)?;
            self.ix += 1;
            self.current = Some(child.path_iter());
        }
    }
}

impl<'a, S: Shape + 'a> PathIterator for MultiShapePathIter<'a, S> {
    fn has_next(&self) -> bool {
        self.current.as_ref().is_some_and(|it| it.has_next())
            || self.children[self.ix..]
                .iter()
                .any(|c| c.path_iter().has_next())
    }

    #[inline]
    fn winding_rule(&self) -> PathWindingRule {
        self.winding_rule
    }

    #[inline]
    fn is_polyline(&self) -> bool {
        self.flags.polyline
    }

    #[inline]
    fn is_curved(&self) -> bool {
        self.flags.curved
    }

    #[inline]
    fn is_polygon(&self) -> bool {
        self.flags.polygon
    }

    #[inline]
    fn is_multi_parts(&self) -> bool {
        self.flags.multi_parts
    }

    fn restart_iterations(&self) -> Self {
        MultiShapePathIter {
            children: self.children,
            ix: 0,
            current: None,
            winding_rule: self.winding_rule,
            flags: self.flags,
        }
    }
}

impl<S: Shape> Shape for MultiShape<S> {
    type PathIter<'iter>
        = MultiShapePathIter<'iter, S>
    where
        Self: 'iter;

    fn path_iter(&self) -> MultiShapePathIter<'_, S> {
        MultiShapePathIter::new(&self.children, self.winding_rule)
    }

    /// The union of the children's boxes, or [`Rect::ZERO`] when there is no
    /// child.
    fn bounding_box(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = self
            .children
            .iter()
            .map(Shape::bounding_box)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO);
        self.bounds.set(Some(bounds));
        bounds
    }

    fn contains(&self, pt: Point) -> bool {
        !self.bbox_rejects(Rect::from_points(pt, pt))
            && self.children.iter().any(|c| c.contains(pt))
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        !self.bbox_rejects(rect) && self.children.iter().any(|c| c.contains_rect(rect))
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        !self.bbox_rejects(rect) && self.children.iter().any(|c| c.intersects_rect(rect))
    }

    fn intersects_circle(&self, circle: Circle) -> bool {
        !self.bbox_rejects(circle.bounding_box())
            && self.children.iter().any(|c| c.intersects_circle(circle))
    }

    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        !self.bbox_rejects(ellipse.frame())
            && self.children.iter().any(|c| c.intersects_ellipse(ellipse))
    }

    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        !self.bbox_rejects(triangle.bounding_box())
            && self.children.iter().any(|c| c.intersects_triangle(triangle))
    }

    fn intersects_segment(&self, segment: Segment) -> bool {
        !self.bbox_rejects(segment.bounding_box())
            && self.children.iter().any(|c| c.intersects_segment(segment))
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        self.children
            .iter()
            .any(|c| c.intersects_path(iter.restart_iterations()))
    }

    /// The closest point over all children, or a point at infinity when
    /// there is no child.
    fn closest_point(&self, pt: Point) -> Point {
        let mut best = Point::new(f64::INFINITY, f64::INFINITY);
        let mut best_d2 = f64::INFINITY;
        for child in &self.children {
            let p = child.closest_point(pt);
            let d2 = p.distance_squared(pt);
            if d2 < best_d2 {
                best = p;
                best_d2 = d2;
            }
        }
        best
    }

    /// The farthest point over all children, or a point at infinity when
    /// there is no child.
    fn farthest_point(&self, pt: Point) -> Point {
        let mut best = Point::new(f64::INFINITY, f64::INFINITY);
        let mut best_d2 = -1.0;
        for child in &self.children {
            let p = child.farthest_point(pt);
            let d2 = p.distance_squared(pt);
            if d2 > best_d2 {
                best = p;
                best_d2 = d2;
            }
        }
        best
    }

    fn distance_squared(&self, pt: Point) -> f64 {
        self.children
            .iter()
            .map(|c| c.distance_squared(pt))
            .fold(f64::INFINITY, f64::min)
    }

    fn visit_parts(&self, f: &mut dyn FnMut(ShapePart<'_>) -> bool) -> bool {
        self.children.iter().any(|c| c.visit_parts(f))
    }
}

impl<S: Translate> Translate for MultiShape<S> {
    fn translate(&mut self, v: Vec2) {
        for child in &mut self.children {
            child.translate(v);
        }
        self.on_backend_changed();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{
        AnyShape, Circle, MultiShape, PathIterator, Point, Rect, Segment, Shape, Translate, Vec2,
    };

    fn sample() -> MultiShape<AnyShape> {
        [
            AnyShape::from(Rect::new(0.0, 0.0, 2.0, 2.0)),
            Circle::new((10.0, 0.0), 1.0).into(),
            Segment::new((0.0, 10.0), (4.0, 10.0)).into(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn aggregate_bounds_follow_mutations() {
        let mut m = sample();
        assert_eq!(m.bounding_box(), Rect::new(0.0, -1.0, 11.0, 10.0));
        m.push(Rect::new(-5.0, 0.0, -4.0, 1.0).into());
        assert_eq!(m.bounding_box(), Rect::new(-5.0, -1.0, 11.0, 10.0));
        m.remove(3);
        assert_eq!(m.bounding_box().x0, 0.0);
        if let Some(mut child) = m.get_mut(1) {
            child.translate(Vec2::new(10.0, 0.0));
        }
        assert_eq!(m.bounding_box().x1, 21.0);
        for child in m.children_mut().iter_mut() {
            child.translate(Vec2::new(0.0, 1.0));
        }
        assert_eq!(m.bounding_box().y1, 11.0);
        m.set(2, Rect::new(0.0, 0.0, 1.0, 1.0).into());
        m.retain(|s| s.as_circle().is_none());
        assert_eq!(m.bounding_box(), Rect::new(0.0, 0.0, 2.0, 3.0));
        let drained: Vec<_> = m.drain(..1).collect();
        assert_eq!(drained.len(), 1);
        assert_eq!(m.bounding_box(), Rect::new(0.0, 0.0, 1.0, 1.0));
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.bounding_box(), Rect::ZERO);
    }

    #[test]
    fn queries_aggregate_children() {
        let m = sample();
        assert!(m.contains(Point::new(1.0, 1.0)));
        assert!(m.contains(Point::new(10.5, 0.0)));
        assert!(!m.contains(Point::new(5.0, 5.0)));
        assert!(m.contains_rect(Rect::new(0.5, 0.5, 1.5, 1.5)));
        assert!(!m.contains_rect(Rect::new(0.5, 0.5, 10.0, 1.5)));
        assert!(m.intersects_rect(Rect::new(3.0, 9.0, 4.0, 11.0)));
        assert!(!m.intersects_rect(Rect::new(5.0, 5.0, 6.0, 6.0)));
        assert!(m.intersects(&Circle::new((9.0, 0.0), 0.5)));
        assert!(!m.intersects(&Circle::new((50.0, 0.0), 0.5)));
    }

    #[test]
    fn distances_track_extremes() {
        let m = sample();
        assert_eq!(m.closest_point(Point::new(3.0, 1.0)), Point::new(2.0, 1.0));
        assert_eq!(m.distance_squared(Point::new(3.0, 1.0)), 1.0);
        assert_eq!(m.farthest_point(Point::new(0.0, 0.0)), Point::new(11.0, 0.0));
        let empty = MultiShape::<Rect>::new();
        assert!(empty.distance(Point::ZERO).is_infinite());
    }

    #[test]
    fn intersecting_children() {
        let m = sample();
        let query = Rect::new(1.0, -1.0, 10.0, 1.0);
        let hits = m.shapes_intersecting(&query);
        assert_eq!(hits.len(), 2);
        assert_eq!(m.first_shape_intersecting(&query), m.get(0));
        assert!(m.first_shape_intersecting(&Rect::new(50.0, 50.0, 51.0, 51.0)).is_none());
    }

    #[test]
    fn chained_path_and_translate() {
        let mut m = sample();
        let it = m.path_iter();
        assert!(it.is_multi_parts() && it.is_curved());
        assert_eq!(it.count(), 5 + 6 + 2);
        m.translate(Vec2::new(1.0, 1.0));
        assert_eq!(m.bounding_box(), Rect::new(1.0, 0.0, 12.0, 11.0));
        let path = m.to_path();
        assert_eq!(path.len(), 13);
    }
}
