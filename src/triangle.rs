// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle shape.

use core::ops::{Add, Sub};

use crate::{
    closest_point_segment_point, distance_squared_segment_point, path_intersects_triangle,
    rect_intersects_segment, segments_intersect_with_ends, Circle, Ellipse, PathElement,
    PathIterator, PathWindingRule, Point, Rect, Segment, Shape, Translate, Vec2,
};

/// A triangle.
//     a
//     *
//    / \
//   /   \
//  *-----*
//  b     c
#[derive(Clone, Copy, Default, PartialEq, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// vertex a.
    pub a: Point,
    /// vertex b.
    pub b: Point,
    /// vertex c.
    pub c: Point,
}

impl Triangle {
    /// A new [`Triangle`] from three vertices.
    #[inline(always)]
    pub fn new(a: impl Into<Point>, b: impl Into<Point>, c: impl Into<Point>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    /// The signed area, positive when the vertices run counter-clockwise.
    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * (self.b - self.a).cross(self.c - self.a)
    }

    /// Whether this [`Triangle`] has zero area.
    #[inline]
    pub fn is_zero_area(&self) -> bool {
        self.area() == 0.0
    }

    /// The three vertices.
    #[inline]
    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges `a → b`, `b → c` and `c → a`.
    #[inline]
    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.c, self.a),
        ]
    }

    /// The lowest and highest vertices.
    ///
    /// Ties are broken towards the larger x, which is where the crossing
    /// engine casts its rays from.
    pub(crate) fn y_extremes(&self) -> (Point, Point) {
        let mut lo = self.a;
        let mut hi = self.a;
        for p in [self.b, self.c] {
            if p.y < lo.y || (p.y == lo.y && p.x > lo.x) {
                lo = p;
            }
            if p.y > hi.y || (p.y == hi.y && p.x > hi.x) {
                hi = p;
            }
        }
        (lo, hi)
    }

    /// Squared distance from `p` to the solid triangle.
    fn distance_squared_to(&self, p: Point) -> f64 {
        if self.contains(p) {
            return 0.0;
        }
        self.edges()
            .into_iter()
            .map(|e| distance_squared_segment_point(e, p))
            .fold(f64::INFINITY, f64::min)
    }
}

impl Add<Vec2> for Triangle {
    type Output = Triangle;

    #[inline]
    fn add(self, v: Vec2) -> Triangle {
        Triangle::new(self.a + v, self.b + v, self.c + v)
    }
}

impl Sub<Vec2> for Triangle {
    type Output = Triangle;

    #[inline]
    fn sub(self, v: Vec2) -> Triangle {
        Triangle::new(self.a - v, self.b - v, self.c - v)
    }
}

/// The path of a triangle: its vertices in order, then a close.
#[derive(Debug)]
pub struct TrianglePathIter {
    triangle: Triangle,
    ix: usize,
}

impl Iterator for TrianglePathIter {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let Triangle { a, b, c } = self.triangle;
        self.ix += 1;
        match self.ix {
            1 => Some(PathElement::MoveTo { to: a }),
            2 => Some(PathElement::LineTo { from: a, to: b }),
            3 => Some(PathElement::LineTo { from: b, to: c }),
            4 => Some(PathElement::Close { from: c, to: a }),
            _ => None,
        }
    }
}

impl PathIterator for TrianglePathIter {
    #[inline]
    fn has_next(&self) -> bool {
        self.ix < 4
    }

    #[inline]
    fn winding_rule(&self) -> PathWindingRule {
        PathWindingRule::NonZero
    }

    #[inline]
    fn is_polyline(&self) -> bool {
        false
    }

    #[inline]
    fn is_curved(&self) -> bool {
        false
    }

    #[inline]
    fn is_polygon(&self) -> bool {
        true
    }

    #[inline]
    fn is_multi_parts(&self) -> bool {
        false
    }

    fn restart_iterations(&self) -> Self {
        self.triangle.path_iter()
    }
}

impl Shape for Triangle {
    type PathIter<'iter> = TrianglePathIter;

    #[inline]
    fn path_iter(&self) -> TrianglePathIter {
        TrianglePathIter {
            triangle: *self,
            ix: 0,
        }
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_points(self.a, self.b).union_pt(self.c)
    }

    /// The border is part of the triangle. A flat triangle contains
    /// nothing.
    fn contains(&self, pt: Point) -> bool {
        let Triangle { a, b, c } = *self;
        let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if denom == 0.0 {
            return false;
        }
        let l0 = ((b.y - c.y) * (pt.x - c.x) + (c.x - b.x) * (pt.y - c.y)) / denom;
        let l1 = ((c.y - a.y) * (pt.x - c.x) + (a.x - c.x) * (pt.y - c.y)) / denom;
        let l2 = 1.0 - l0 - l1;
        [l0, l1, l2].into_iter().all(|l| (0.0..=1.0).contains(&l))
    }

    fn contains_rect(&self, rect: Rect) -> bool {
        !rect.abs().is_empty() && rect.corners().into_iter().all(|p| self.contains(p))
    }

    fn intersects_rect(&self, rect: Rect) -> bool {
        self.edges()
            .into_iter()
            .any(|e| rect_intersects_segment(rect, e))
            || self.contains_rect(rect)
    }

    fn intersects_circle(&self, circle: Circle) -> bool {
        self.distance_squared_to(circle.center) < circle.radius * circle.radius
    }

    /// Touching the border counts as intersecting.
    fn intersects_segment(&self, segment: Segment) -> bool {
        self.contains(segment.p0)
            || self
                .edges()
                .into_iter()
                .any(|e| segments_intersect_with_ends(e, segment))
    }

    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        if ellipse.is_empty() {
            return false;
        }
        let rx = ellipse.radii.x.abs();
        let ry = ellipse.radii.y.abs();
        let unit = |p: Point| {
            Point::new(
                (p.x - ellipse.center.x) / rx,
                (p.y - ellipse.center.y) / ry,
            )
        };
        Triangle::new(unit(self.a), unit(self.b), unit(self.c)).distance_squared_to(Point::ZERO)
            < 1.0
    }

    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        triangle.vertices().into_iter().any(|p| self.contains(p))
            || self.vertices().into_iter().any(|p| triangle.contains(p))
            || self.edges().into_iter().any(|e| {
                triangle
                    .edges()
                    .into_iter()
                    .any(|f| segments_intersect_with_ends(e, f))
            })
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        path_intersects_triangle(iter, *self)
    }

    fn closest_point(&self, pt: Point) -> Point {
        if self.contains(pt) {
            return pt;
        }
        let mut best = self.a;
        let mut best_d2 = f64::INFINITY;
        for e in self.edges() {
            let q = closest_point_segment_point(e, pt);
            let d2 = q.distance_squared(pt);
            if d2 < best_d2 {
                best = q;
                best_d2 = d2;
            }
        }
        best
    }

    /// The farthest point is always a vertex.
    fn farthest_point(&self, pt: Point) -> Point {
        let mut best = self.a;
        for p in [self.b, self.c] {
            if p.distance_squared(pt) > best.distance_squared(pt) {
                best = p;
            }
        }
        best
    }

    fn distance_squared(&self, pt: Point) -> f64 {
        self.distance_squared_to(pt)
    }

    #[inline(always)]
    fn as_triangle(&self) -> Option<Triangle> {
        Some(*self)
    }
}

impl Translate for Triangle {
    #[inline]
    fn translate(&mut self, v: Vec2) {
        *self = *self + v;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Circle, Ellipse, Path, Point, Rect, Segment, Shape, Translate, Triangle, Vec2};

    fn tri() -> Triangle {
        Triangle::new((0.0, 0.0), (6.0, 0.0), (0.0, 6.0))
    }

    #[test]
    fn basics() {
        let t = tri();
        assert_eq!(t.area(), 18.0);
        assert!(Triangle::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0)).is_zero_area());
        assert_eq!(t.bounding_box(), Rect::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(t.path_iter().count(), 4);
        assert_eq!(t.to_path().len(), 4);
        let (lo, hi) = t.y_extremes();
        assert_eq!((lo, hi), (Point::new(6.0, 0.0), Point::new(0.0, 6.0)));
    }

    #[test]
    fn containment() {
        let t = tri();
        assert!(t.contains(Point::new(1.0, 1.0)));
        assert!(t.contains(Point::new(3.0, 3.0)));
        assert!(t.contains(Point::new(6.0, 0.0)));
        assert!(!t.contains(Point::new(4.0, 4.0)));
        // Orientation does not matter.
        let cw = Triangle::new(t.a, t.c, t.b);
        assert!(cw.contains(Point::new(1.0, 1.0)));
        assert!(!Triangle::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0)).contains(Point::new(1.0, 1.0)));
        assert!(t.contains_rect(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!t.contains_rect(Rect::new(2.0, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn intersections() {
        let t = tri();
        assert!(t.intersects_rect(Rect::new(2.0, 2.0, 4.0, 4.0)));
        assert!(t.intersects_rect(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(t.intersects_rect(Rect::new(-1.0, -1.0, 7.0, 7.0)));
        assert!(!t.intersects_rect(Rect::new(4.0, 4.0, 5.0, 5.0)));
        assert!(t.intersects_circle(Circle::new((4.0, 4.0), 1.5)));
        assert!(!t.intersects_circle(Circle::new((4.0, 4.0), 1.0)));
        assert!(t.intersects_segment(Segment::new((1.0, 1.0), (2.0, 1.0))));
        assert!(t.intersects_segment(Segment::new((-1.0, 3.0), (1.0, 3.0))));
        assert!(!t.intersects_segment(Segment::new((4.0, 4.0), (5.0, 5.0))));
        assert!(t.intersects_ellipse(Ellipse::new((5.0, 5.0), (4.0, 2.0))));
        assert!(!t.intersects_ellipse(Ellipse::new((5.0, 5.0), (1.0, 1.0))));
        assert!(t.intersects_triangle(Triangle::new((1.0, 1.0), (2.0, 1.0), (1.0, 2.0))));
        assert!(t.intersects_triangle(Triangle::new((-1.0, 1.0), (9.0, 1.0), (4.0, -5.0))));
        assert!(!t.intersects_triangle(Triangle::new((4.0, 4.0), (8.0, 4.0), (4.0, 8.0))));
    }

    #[test]
    fn distances() {
        let t = tri();
        assert_eq!(t.closest_point(Point::new(1.0, 1.0)), Point::new(1.0, 1.0));
        assert_eq!(t.closest_point(Point::new(-2.0, 3.0)), Point::new(0.0, 3.0));
        assert_eq!(t.closest_point(Point::new(4.0, 4.0)), Point::new(3.0, 3.0));
        assert_eq!(t.closest_point(Point::new(8.0, -1.0)), Point::new(6.0, 0.0));
        assert_eq!(t.farthest_point(Point::new(1.0, 0.0)), Point::new(0.0, 6.0));
        assert_eq!(t.distance_squared(Point::new(4.0, 4.0)), 2.0);
        assert_eq!(t.distance(Point::new(-3.0, -4.0)), 5.0);
    }

    #[test]
    fn shapes_route_through_triangle() {
        let t = tri();
        let mut square = Path::new();
        square.move_to((2.0, 2.0));
        square.line_to((5.0, 2.0));
        square.line_to((5.0, 5.0));
        square.line_to((2.0, 5.0));
        square.close_path();
        assert!(square.intersects(&t));
        assert!(t.intersects(&square));
        assert!(Circle::new((4.0, 4.0), 1.5).intersects(&t));
        let mut far = t;
        far.translate(Vec2::new(10.0, 0.0));
        assert!(!square.intersects(&far));
        assert!(!far.intersects(&square));
    }
}
