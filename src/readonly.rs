// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only views of shapes.

use crate::{
    Circle, Ellipse, MultiShape, Path, PathIter, PathIterator, PathWindingRule, Point, Rect,
    Segment, Shape, ShapePart, Triangle,
};

/// A read-only view of a value.
///
/// The view borrows the value and forwards its read methods. It offers no
/// way to mutate the value or to reach a mutable reference to it, so code
/// holding a view can query the shape but cannot change it.
#[derive(Debug)]
pub struct ReadOnly<'a, T: ?Sized> {
    inner: &'a T,
}

impl<T: ?Sized> Clone for ReadOnly<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ReadOnly<'_, T> {}

impl<'a, T: ?Sized> ReadOnly<'a, T> {
    /// A view of `inner`.
    #[inline]
    pub fn new(inner: &'a T) -> Self {
        ReadOnly { inner }
    }
}

impl<'a, T: ?Sized> From<&'a T> for ReadOnly<'a, T> {
    fn from(inner: &'a T) -> Self {
        ReadOnly::new(inner)
    }
}

impl<T: Shape + ?Sized> Shape for ReadOnly<'_, T> {
    type PathIter<'iter>
        = T::PathIter<'iter>
    where
        Self: 'iter;

    #[inline]
    fn path_iter(&self) -> T::PathIter<'_> {
        self.inner.path_iter()
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        self.inner.bounding_box()
    }

    fn contains(&self, pt: Point) -> bool {
        self.inner.contains(pt)
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        self.inner.contains_rect(rect)
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        self.inner.intersects_rect(rect)
    }

    fn intersects_circle(&self, circle: Circle) -> bool {
        self.inner.intersects_circle(circle)
    }

    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        self.inner.intersects_ellipse(ellipse)
    }

    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        self.inner.intersects_triangle(triangle)
    }

    fn intersects_segment(&self, segment: Segment) -> bool {
        self.inner.intersects_segment(segment)
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        self.inner.intersects_path(iter)
    }

    fn closest_point(&self, pt: Point) -> Point {
        self.inner.closest_point(pt)
    }

    fn farthest_point(&self, pt: Point) -> Point {
        self.inner.farthest_point(pt)
    }

    fn distance_squared(&self, pt: Point) -> f64 {
        self.inner.distance_squared(pt)
    }

    fn to_path(&self) -> Path {
        self.inner.to_path()
    }

    fn visit_parts(&self, f: &mut dyn FnMut(ShapePart<'_>) -> bool) -> bool {
        self.inner.visit_parts(f)
    }

    fn as_rect(&self) -> Option<Rect> {
        self.inner.as_rect()
    }

    fn as_circle(&self) -> Option<Circle> {
        self.inner.as_circle()
    }

    fn as_ellipse(&self) -> Option<Ellipse> {
        self.inner.as_ellipse()
    }

    fn as_triangle(&self) -> Option<Triangle> {
        self.inner.as_triangle()
    }

    fn as_segment(&self) -> Option<Segment> {
        self.inner.as_segment()
    }
}

impl<'a> ReadOnly<'a, Path> {
    /// See [`Path::iter`].
    #[inline]
    pub fn iter(&self) -> PathIter<'a> {
        self.inner.iter()
    }

    /// See [`Path::len`].
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// See [`Path::is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// See [`Path::winding_rule`].
    #[inline]
    pub fn winding_rule(&self) -> PathWindingRule {
        self.inner.winding_rule()
    }

    /// See [`Path::current_point`].
    pub fn current_point(&self) -> Option<Point> {
        self.inner.current_point()
    }

    /// See [`Path::length`].
    pub fn length(&self) -> f64 {
        self.inner.length()
    }

    /// See [`Path::control_point_bounding_box`].
    pub fn control_point_bounding_box(&self) -> Rect {
        self.inner.control_point_bounding_box()
    }

    /// See [`Path::is_polyline`].
    pub fn is_polyline(&self) -> bool {
        self.inner.is_polyline()
    }

    /// See [`Path::is_polygon`].
    pub fn is_polygon(&self) -> bool {
        self.inner.is_polygon()
    }

    /// See [`Path::is_curved`].
    pub fn is_curved(&self) -> bool {
        self.inner.is_curved()
    }

    /// See [`Path::is_multi_parts`].
    pub fn is_multi_parts(&self) -> bool {
        self.inner.is_multi_parts()
    }
}

impl<'a, S> ReadOnly<'a, MultiShape<S>> {
    /// A view of the child at `index`.
    pub fn get(&self, index: usize) -> Option<ReadOnly<'a, S>> {
        self.inner.get(index).map(ReadOnly::new)
    }

    /// Views of the children, in order.
    pub fn iter(&self) -> impl Iterator<Item = ReadOnly<'a, S>> + 'a {
        self.inner.iter().map(ReadOnly::new)
    }

    /// See [`MultiShape::len`].
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// See [`MultiShape::is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// See [`MultiShape::winding_rule`].
    #[inline]
    pub fn winding_rule(&self) -> PathWindingRule {
        self.inner.winding_rule()
    }
}

impl<'a, S: Shape> ReadOnly<'a, MultiShape<S>> {
    /// See [`MultiShape::first_shape_intersecting`].
    pub fn first_shape_intersecting<T: Shape + ?Sized>(
        &self,
        other: &T,
    ) -> Option<ReadOnly<'a, S>> {
        self.inner.first_shape_intersecting(other).map(ReadOnly::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Circle, MultiShape, Path, Point, ReadOnly, Rect, Shape, Translate, Vec2,
    };

    #[test]
    fn path_view_forwards_reads() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((3.0, 0.0));
        path.line_to((3.0, 4.0));
        path.close_path();
        let view = ReadOnly::new(&path);
        assert_eq!(view.len(), 4);
        assert_eq!(view.length(), 12.0);
        assert!(view.is_polygon());
        assert!(view.contains(Point::new(2.0, 1.0)));
        assert_eq!(view.bounding_box(), path.bounding_box());
        assert_eq!(view.iter().count(), 4);
        assert_eq!(view.to_path(), path);
    }

    #[test]
    fn multi_shape_view_hands_out_views() {
        let mut multi = MultiShape::new();
        multi.push(Circle::new((0.0, 0.0), 1.0));
        multi.push(Circle::new((5.0, 0.0), 1.0));
        let view = ReadOnly::new(&multi);
        let first = view.get(0).unwrap();
        assert_eq!(first.as_circle(), Some(Circle::new((0.0, 0.0), 1.0)));
        assert_eq!(view.iter().count(), 2);
        let hit = view.first_shape_intersecting(&Rect::new(4.5, -0.5, 5.5, 0.5));
        assert_eq!(hit.and_then(|c| c.as_circle()).map(|c| c.center.x), Some(5.0));
        // A view is a shape in its own right.
        assert!(Rect::new(-0.5, -0.5, 0.5, 0.5).intersects(&view));

        // The owner keeps full access.
        multi.translate(Vec2::new(1.0, 0.0));
        assert_eq!(multi.bounding_box(), Rect::new(0.0, -1.0, 7.0, 1.0));
    }
}
