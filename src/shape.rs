// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A generic trait for shapes.

use alloc::borrow::Cow;

use crate::{
    path_closest_point, path_contains_point, path_contains_rect, path_farthest_point,
    path_intersects_circle, path_intersects_ellipse, path_intersects_path, path_intersects_rect,
    path_intersects_segment, path_intersects_triangle, Affine, Circle, CirclePathIter, Ellipse,
    EllipsePathIter, FlatteningPathIter, GeomFactory, Path, PathElement, PathIter, PathIterator,
    PathWindingRule, Point, Rect, RectPathIter, Segment, SegmentPathIter, TransformedPathIter,
    Triangle, TrianglePathIter, Vec2, DEFAULT_FACTORY,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A generic trait for open and closed shapes.
///
/// Only [`path_iter`](Shape::path_iter) and
/// [`bounding_box`](Shape::bounding_box) are required. Every query has a
/// default that runs the crossing engine over the path; primitives override
/// them with closed forms.
pub trait Shape {
    /// The iterator returned by the [`path_iter`] method.
    ///
    /// [`path_iter`]: Shape::path_iter
    type PathIter<'iter>: PathIterator + 'iter
    where
        Self: 'iter;

    /// The outline of the shape, as a path iterator.
    fn path_iter(&self) -> Self::PathIter<'_>;

    /// The smallest rectangle that encloses the shape.
    fn bounding_box(&self) -> Rect;

    /// Is `pt` inside the shape?
    fn contains(&self, pt: Point) -> bool {
        path_contains_point(self.path_iter(), pt)
    }

    /// Is `rect` entirely inside the shape?
    fn contains_rect(&self, rect: Rect) -> bool {
        path_contains_rect(self.path_iter(), rect)
    }

    /// Does this shape intersect `other`?
    ///
    /// `other` is decomposed into its parts with
    /// [`visit_parts`](Shape::visit_parts), and each part goes to the
    /// matching `intersects_*` method of `self`.
    fn intersects<S: Shape + ?Sized>(&self, other: &S) -> bool {
        other.visit_parts(&mut |part| match part {
            ShapePart::Rect(r) => self.intersects_rect(r),
            ShapePart::Circle(c) => self.intersects_circle(c),
            ShapePart::Ellipse(e) => self.intersects_ellipse(e),
            ShapePart::Triangle(t) => self.intersects_triangle(t),
            ShapePart::Segment(s) => self.intersects_segment(s),
            ShapePart::Path(p) => self.intersects_path(p.iter()),
        })
    }

    /// Does this shape intersect `rect`?
    fn intersects_rect(&self, rect: Rect) -> bool {
        path_intersects_rect(self.path_iter(), rect)
    }

    /// Does this shape intersect `circle`?
    fn intersects_circle(&self, circle: Circle) -> bool {
        path_intersects_circle(self.path_iter(), circle)
    }

    /// Does this shape intersect `ellipse`?
    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        path_intersects_ellipse(self.path_iter(), ellipse)
    }

    /// Does this shape intersect `triangle`?
    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        path_intersects_triangle(self.path_iter(), triangle)
    }

    /// Does this shape intersect `segment`?
    fn intersects_segment(&self, segment: Segment) -> bool {
        path_intersects_segment(self.path_iter(), segment)
    }

    /// Does this shape intersect the path produced by `iter`?
    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        path_intersects_path(self.path_iter(), iter)
    }

    /// The point of the shape nearest to `pt`.
    fn closest_point(&self, pt: Point) -> Point {
        path_closest_point(self.path_iter(), pt)
    }

    /// The point of the shape farthest from `pt`.
    fn farthest_point(&self, pt: Point) -> Point {
        path_farthest_point(self.path_iter(), pt)
    }

    /// The squared Euclidean distance from `pt` to the shape.
    fn distance_squared(&self, pt: Point) -> f64 {
        pt.distance_squared(self.closest_point(pt))
    }

    /// The Euclidean distance from `pt` to the shape.
    #[inline]
    fn distance(&self, pt: Point) -> f64 {
        self.distance_squared(pt).sqrt()
    }

    /// The Manhattan distance from `pt` to the closest point of the shape.
    fn distance_l1(&self, pt: Point) -> f64 {
        pt.distance_l1(self.closest_point(pt))
    }

    /// The Chebyshev distance from `pt` to the closest point of the shape.
    fn distance_linf(&self, pt: Point) -> f64 {
        pt.distance_linf(self.closest_point(pt))
    }

    /// The outline with its curves replaced by lines.
    fn flattened_path_iter(&self, flatness: f64) -> FlatteningPathIter<Self::PathIter<'_>> {
        FlatteningPathIter::new(self.path_iter(), flatness)
    }

    /// The outline mapped through `affine`.
    fn transformed_path_iter(&self, affine: Affine) -> TransformedPathIter<Self::PathIter<'_>> {
        TransformedPathIter::new(self.path_iter(), affine)
    }

    /// Materialize the outline as a [`Path`].
    fn to_path(&self) -> Path {
        self.to_path_with(&DEFAULT_FACTORY)
    }

    /// Materialize the outline through `factory`.
    ///
    /// The points are snapped to the factory's grid, and the path keeps
    /// that grid.
    fn to_path_with<F: GeomFactory>(&self, factory: &F) -> Path {
        factory.path_from(self.path_iter())
    }

    /// The outline mapped through `affine`, as a new [`Path`].
    fn transformed(&self, affine: Affine) -> Path {
        self.transformed_with(affine, &DEFAULT_FACTORY)
    }

    /// The outline mapped through `affine`, materialized through `factory`.
    fn transformed_with<F: GeomFactory>(&self, affine: Affine, factory: &F) -> Path {
        factory.path_from(self.transformed_path_iter(affine))
    }

    /// Call `f` on each part of the shape until it returns `true`.
    ///
    /// Returns whether `f` did. A simple shape is its own single part,
    /// passed through the `as_*` hooks when one applies.
    fn visit_parts(&self, f: &mut dyn FnMut(ShapePart<'_>) -> bool) -> bool {
        if let Some(rect) = self.as_rect() {
            f(ShapePart::Rect(rect))
        } else if let Some(circle) = self.as_circle() {
            f(ShapePart::Circle(circle))
        } else if let Some(ellipse) = self.as_ellipse() {
            f(ShapePart::Ellipse(ellipse))
        } else if let Some(triangle) = self.as_triangle() {
            f(ShapePart::Triangle(triangle))
        } else if let Some(segment) = self.as_segment() {
            f(ShapePart::Segment(segment))
        } else {
            f(ShapePart::Path(Cow::Owned(self.to_path())))
        }
    }

    /// If the shape is a rectangle, make it available.
    fn as_rect(&self) -> Option<Rect> {
        None
    }

    /// If the shape is a circle, make it available.
    fn as_circle(&self) -> Option<Circle> {
        None
    }

    /// If the shape is an ellipse, make it available.
    fn as_ellipse(&self) -> Option<Ellipse> {
        None
    }

    /// If the shape is a triangle, make it available.
    fn as_triangle(&self) -> Option<Triangle> {
        None
    }

    /// If the shape is a line segment, make it available.
    fn as_segment(&self) -> Option<Segment> {
        None
    }
}

/// Shapes that can be moved in place.
pub trait Translate {
    /// Move the shape by `v`.
    fn translate(&mut self, v: Vec2);
}

/// One part of a shape, as seen by [`Shape::visit_parts`].
#[derive(Clone, Debug)]
pub enum ShapePart<'a> {
    /// A rectangle.
    Rect(Rect),
    /// A circle.
    Circle(Circle),
    /// An ellipse.
    Ellipse(Ellipse),
    /// A triangle.
    Triangle(Triangle),
    /// A line segment.
    Segment(Segment),
    /// Anything else, as a path.
    Path(Cow<'a, Path>),
}

/// One of the concrete shapes, for heterogeneous collections such as
/// `MultiShape<AnyShape>`.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyShape {
    /// A rectangle.
    Rect(Rect),
    /// A circle.
    Circle(Circle),
    /// An ellipse.
    Ellipse(Ellipse),
    /// A triangle.
    Triangle(Triangle),
    /// A line segment.
    Segment(Segment),
    /// A path.
    Path(Path),
}

impl From<Rect> for AnyShape {
    fn from(r: Rect) -> Self {
        AnyShape::Rect(r)
    }
}

impl From<Circle> for AnyShape {
    fn from(c: Circle) -> Self {
        AnyShape::Circle(c)
    }
}

impl From<Ellipse> for AnyShape {
    fn from(e: Ellipse) -> Self {
        AnyShape::Ellipse(e)
    }
}

impl From<Triangle> for AnyShape {
    fn from(t: Triangle) -> Self {
        AnyShape::Triangle(t)
    }
}

impl From<Segment> for AnyShape {
    fn from(s: Segment) -> Self {
        AnyShape::Segment(s)
    }
}

impl From<Path> for AnyShape {
    fn from(p: Path) -> Self {
        AnyShape::Path(p)
    }
}

/// The path iterator of an [`AnyShape`].
#[derive(Debug)]
pub enum AnyShapePathIter<'a> {
    /// A rectangle's outline.
    Rect(RectPathIter),
    /// A circle's outline.
    Circle(CirclePathIter),
    /// An ellipse's outline.
    Ellipse(EllipsePathIter),
    /// A triangle's outline.
    Triangle(TrianglePathIter),
    /// A segment's outline.
    Segment(SegmentPathIter),
    /// A path's elements.
    Path(PathIter<'a>),
}

macro_rules! dispatch {
    ($e:expr, $v:ident => $body:expr) => {
        match $e {
            AnyShape::Rect($v) => $body,
            AnyShape::Circle($v) => $body,
            AnyShape::Ellipse($v) => $body,
            AnyShape::Triangle($v) => $body,
            AnyShape::Segment($v) => $body,
            AnyShape::Path($v) => $body,
        }
    };
}

macro_rules! dispatch_iter {
    ($e:expr, $v:ident => $body:expr) => {
        match $e {
            AnyShapePathIter::Rect($v) => $body,
            AnyShapePathIter::Circle($v) => $body,
            AnyShapePathIter::Ellipse($v) => $body,
            AnyShapePathIter::Triangle($v) => $body,
            AnyShapePathIter::Segment($v) => $body,
            AnyShapePathIter::Path($v) => $body,
        }
    };
}

impl Iterator for AnyShapePathIter<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        dispatch_iter!(self, it => it.next())
    }
}

impl PathIterator for AnyShapePathIter<'_> {
    fn has_next(&self) -> bool {
        dispatch_iter!(self, it => it.has_next())
    }

    fn winding_rule(&self) -> PathWindingRule {
        dispatch_iter!(self, it => it.winding_rule())
    }

    fn is_polyline(&self) -> bool {
        dispatch_iter!(self, it => it.is_polyline())
    }

    fn is_curved(&self) -> bool {
        dispatch_iter!(self, it => it.is_curved())
    }

    fn is_polygon(&self) -> bool {
        dispatch_iter!(self, it => it.is_polygon())
    }

    fn is_multi_parts(&self) -> bool {
        dispatch_iter!(self, it => it.is_multi_parts())
    }

    fn restart_iterations(&self) -> Self {
        match self {
            AnyShapePathIter::Rect(it) => AnyShapePathIter::Rect(it.restart_iterations()),
            AnyShapePathIter::Circle(it) => AnyShapePathIter::Circle(it.restart_iterations()),
            AnyShapePathIter::Ellipse(it) => AnyShapePathIter::Ellipse(it.restart_iterations()),
            AnyShapePathIter::Triangle(it) => AnyShapePathIter::Triangle(it.restart_iterations()),
            AnyShapePathIter::Segment(it) => AnyShapePathIter::Segment(it.restart_iterations()),
            AnyShapePathIter::Path(it) => AnyShapePathIter::Path(it.restart_iterations()),
        }
    }
}

impl Shape for AnyShape {
    type PathIter<'iter> = AnyShapePathIter<'iter>;

    fn path_iter(&self) -> AnyShapePathIter<'_> {
        match self {
            AnyShape::Rect(r) => AnyShapePathIter::Rect(r.path_iter()),
            AnyShape::Circle(c) => AnyShapePathIter::Circle(c.path_iter()),
            AnyShape::Ellipse(e) => AnyShapePathIter::Ellipse(e.path_iter()),
            AnyShape::Triangle(t) => AnyShapePathIter::Triangle(t.path_iter()),
            AnyShape::Segment(s) => AnyShapePathIter::Segment(s.path_iter()),
            AnyShape::Path(p) => AnyShapePathIter::Path(p.iter()),
        }
    }

    fn bounding_box(&self) -> Rect {
        dispatch!(self, s => s.bounding_box())
    }

    fn contains(&self, pt: Point) -> bool {
        dispatch!(self, s => s.contains(pt))
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        dispatch!(self, s => s.contains_rect(rect))
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        dispatch!(self, s => s.intersects_rect(rect))
    }

    fn intersects_circle(&self, circle: Circle) -> bool {
        dispatch!(self, s => s.intersects_circle(circle))
    }

    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        dispatch!(self, s => s.intersects_ellipse(ellipse))
    }

    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        dispatch!(self, s => s.intersects_triangle(triangle))
    }

    fn intersects_segment(&self, segment: Segment) -> bool {
        dispatch!(self, s => s.intersects_segment(segment))
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        dispatch!(self, s => s.intersects_path(iter))
    }

    fn closest_point(&self, pt: Point) -> Point {
        dispatch!(self, s => s.closest_point(pt))
    }

    fn farthest_point(&self, pt: Point) -> Point {
        dispatch!(self, s => s.farthest_point(pt))
    }

    fn distance_squared(&self, pt: Point) -> f64 {
        dispatch!(self, s => s.distance_squared(pt))
    }

    fn to_path(&self) -> Path {
        dispatch!(self, s => s.to_path())
    }

    fn visit_parts(&self, f: &mut dyn FnMut(ShapePart<'_>) -> bool) -> bool {
        dispatch!(self, s => s.visit_parts(f))
    }

    fn as_rect(&self) -> Option<Rect> {
        dispatch!(self, s => s.as_rect())
    }

    fn as_circle(&self) -> Option<Circle> {
        dispatch!(self, s => s.as_circle())
    }

    fn as_ellipse(&self) -> Option<Ellipse> {
        dispatch!(self, s => s.as_ellipse())
    }

    fn as_triangle(&self) -> Option<Triangle> {
        dispatch!(self, s => s.as_triangle())
    }

    fn as_segment(&self) -> Option<Segment> {
        dispatch!(self, s => s.as_segment())
    }
}

impl Translate for AnyShape {
    fn translate(&mut self, v: Vec2) {
        dispatch!(self, s => s.translate(v));
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        AnyShape, Affine, Circle, Ellipse, Path, PathElement, PathIterator, Point, Rect, Segment,
        Shape, Translate, Triangle, Vec2,
    };

    fn triangle() -> Path {
        let mut p = Path::new();
        p.move_to((0.0, 0.0));
        p.line_to((6.0, 0.0));
        p.line_to((0.0, 6.0));
        p.close_path();
        p
    }

    #[test]
    fn intersects_dispatches_on_parts() {
        let tri = triangle();
        assert!(tri.intersects(&Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!tri.intersects(&Rect::new(4.0, 4.0, 5.0, 5.0)));
        assert!(tri.intersects(&Circle::new((4.0, 4.0), 1.5)));
        assert!(!tri.intersects(&Circle::new((4.0, 4.0), 1.0)));
        assert!(tri.intersects(&Segment::new((-1.0, 1.0), (1.0, 1.0))));
        assert!(tri.intersects(&Ellipse::new((4.0, 4.0), (2.0, 1.0))));
        assert!(!tri.intersects(&Ellipse::new((5.0, 5.0), (1.0, 2.0))));
        assert!(tri.intersects(&Triangle::new((2.0, 2.0), (5.0, 2.0), (2.0, 5.0))));
        assert!(!tri.intersects(&Triangle::new((4.0, 4.0), (7.0, 4.0), (4.0, 7.0))));
        assert!(Rect::new(1.0, 1.0, 2.0, 2.0).intersects(&tri));

        let mut far = triangle();
        far.translate(Vec2::new(20.0, 0.0));
        assert!(!tri.intersects(&far));
        far.translate(Vec2::new(-17.0, 0.0));
        assert!(tri.intersects(&far));
    }

    #[test]
    fn default_queries_use_the_engine() {
        let tri = triangle();
        assert!(tri.contains(Point::new(1.0, 1.0)));
        assert!(!tri.contains(Point::new(4.0, 4.0)));
        assert!(tri.contains_rect(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!tri.contains_rect(Rect::new(2.0, 2.0, 4.0, 4.0)));
        assert_eq!(tri.closest_point(Point::new(-1.0, 3.0)), Point::new(0.0, 3.0));
        assert_eq!(tri.distance_l1(Point::new(-1.0, -2.0)), 3.0);
        assert_eq!(tri.distance_linf(Point::new(-1.0, -2.0)), 2.0);
    }

    #[test]
    fn to_path_and_transformed() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        let p = r.to_path();
        assert_eq!(p.len(), 5);
        let moved = r.transformed(Affine::translate((2.0, 0.0)));
        assert_eq!(moved.control_point_bounding_box(), Rect::new(2.0, 0.0, 3.0, 1.0));
        let mut flat = Circle::new((0.0, 0.0), 1.0).flattened_path_iter(0.01);
        assert!(!flat.is_curved());
        assert!(flat.all(|el| !matches!(el, PathElement::CurveTo { .. })));
    }

    #[test]
    fn any_shape_forwards() {
        let shapes: [AnyShape; 6] = [
            Rect::new(0.0, 0.0, 2.0, 2.0).into(),
            Circle::new((1.0, 1.0), 1.0).into(),
            Ellipse::new((1.0, 1.0), (1.0, 0.5)).into(),
            Triangle::new((0.0, 0.0), (3.0, 0.0), (0.0, 3.0)).into(),
            Segment::new((0.0, 0.0), (2.0, 2.0)).into(),
            triangle().into(),
        ];
        for s in &shapes {
            assert!(s.contains(Point::new(1.0, 1.0)), "{s:?}");
            assert!(s.intersects(&Rect::new(0.5, 0.5, 1.5, 1.5)), "{s:?}");
            assert_eq!(s.path_iter().restart_iterations().count(), s.path_iter().count());
        }
        assert_eq!(shapes[1].as_circle(), Some(Circle::new((1.0, 1.0), 1.0)));
        assert_eq!(shapes[2].as_ellipse(), Some(Ellipse::new((1.0, 1.0), (1.0, 0.5))));
        assert!(shapes[3].as_triangle().is_some());
        assert!(shapes[2].intersects(&shapes[3]));
        let mut s = shapes[0].clone();
        s.translate(Vec2::new(1.0, 0.0));
        assert_eq!(s.bounding_box(), Rect::new(1.0, 0.0, 3.0, 2.0));
    }
}
