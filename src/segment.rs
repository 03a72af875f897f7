// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line segments and the low-level segment primitives.
//!
//! Everything here is a pure function of its arguments. The `crossings_*`
//! rules at the bottom of the file are the per-edge steps of the crossing
//! engine.

use core::ops::{Add, Sub};

use crate::common::{clamp, is_epsilon_zero, EPSILON};
use crate::{
    path_intersects_segment, Circle, Crossings, Ellipse, PathElement, PathIterator,
    PathWindingRule, Point, Rect, Shape, Translate, Triangle, Vec2,
};

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The segment's start point.
    pub p0: Point,
    /// The segment's end point.
    pub p1: Point,
}

impl Segment {
    /// Create a new segment.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Segment {
        Segment {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The vector from `p0` to `p1`.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.p1 - self.p0
    }

    /// The length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().hypot()
    }

    /// The squared length of the segment.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.direction().hypot2()
    }

    /// The midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// Do both endpoints coincide?
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    /// The segment with its endpoints swapped.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The point at parameter `t`, where 0 is `p0` and 1 is `p1`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    /// The point where `self` and `other` cross, if they do.
    #[inline]
    pub fn intersection_point(&self, other: Segment) -> Option<Point> {
        intersection_point_segment_segment(*self, other)
    }
}

impl From<(Point, Point)> for Segment {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Segment {
        Segment::new(from, to)
    }
}

impl Add<Vec2> for Segment {
    type Output = Segment;

    #[inline]
    fn add(self, v: Vec2) -> Segment {
        Segment::new(self.p0 + v, self.p1 + v)
    }
}

impl Sub<Vec2> for Segment {
    type Output = Segment;

    #[inline]
    fn sub(self, v: Vec2) -> Segment {
        Segment::new(self.p0 - v, self.p1 - v)
    }
}

/// An iterator over the two elements of a [`Segment`].
#[derive(Debug)]
pub struct SegmentPathIter {
    segment: Segment,
    ix: usize,
}

impl Shape for Segment {
    type PathIter<'iter> = SegmentPathIter;

    #[inline]
    fn path_iter(&self) -> SegmentPathIter {
        SegmentPathIter {
            segment: *self,
            ix: 0,
        }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }

    fn contains(&self, pt: Point) -> bool {
        is_epsilon_zero(distance_squared_segment_point(*self, pt), EPSILON)
    }

    /// Only a rectangle without area that lies on the segment is contained.
    fn contains_rect(&self, rect: Rect) -> bool {
        (rect.width() == 0.0 || rect.height() == 0.0)
            && self.contains(Point::new(rect.x0, rect.y0))
            && self.contains(Point::new(rect.x1, rect.y1))
    }

    #[inline]
    fn intersects_rect(&self, rect: Rect) -> bool {
        crate::rect_intersects_segment(rect, *self)
    }

    #[inline]
    fn intersects_circle(&self, circle: Circle) -> bool {
        circle.intersects_segment(*self)
    }

    #[inline]
    fn intersects_segment(&self, segment: Segment) -> bool {
        segments_intersect_with_ends(*self, segment)
    }

    #[inline]
    fn intersects_ellipse(&self, ellipse: Ellipse) -> bool {
        ellipse.intersects_segment(*self)
    }

    #[inline]
    fn intersects_triangle(&self, triangle: Triangle) -> bool {
        triangle.intersects_segment(*self)
    }

    fn intersects_path<I: PathIterator>(&self, iter: I) -> bool {
        path_intersects_segment(iter, *self)
    }

    #[inline]
    fn closest_point(&self, pt: Point) -> Point {
        closest_point_segment_point(*self, pt)
    }

    #[inline]
    fn farthest_point(&self, pt: Point) -> Point {
        farthest_point_segment_point(*self, pt)
    }

    #[inline]
    fn distance_squared(&self, pt: Point) -> f64 {
        distance_squared_segment_point(*self, pt)
    }

    #[inline(always)]
    fn as_segment(&self) -> Option<Segment> {
        Some(*self)
    }
}

impl Translate for Segment {
    fn translate(&mut self, v: Vec2) {
        *self = *self + v;
    }
}

impl Iterator for SegmentPathIter {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        self.ix += 1;
        match self.ix {
            1 => Some(PathElement::MoveTo {
                to: self.segment.p0,
            }),
            2 => Some(PathElement::LineTo {
                from: self.segment.p0,
                to: self.segment.p1,
            }),
            _ => None,
        }
    }
}

impl PathIterator for SegmentPathIter {
    #[inline]
    fn has_next(&self) -> bool {
        self.ix < 2
    }

    #[inline]
    fn winding_rule(&self) -> PathWindingRule {
        PathWindingRule::NonZero
    }

    #[inline]
    fn is_polyline(&self) -> bool {
        true
    }

    #[inline]
    fn is_curved(&self) -> bool {
        false
    }

    #[inline]
    fn is_polygon(&self) -> bool {
        false
    }

    #[inline]
    fn is_multi_parts(&self) -> bool {
        false
    }

    fn restart_iterations(&self) -> Self {
        self.segment.path_iter()
    }
}

/// The parameter along `segment` of the projection of `p` onto its line.
///
/// 0 is `p0`, 1 is `p1`. The result is not clamped. A degenerate segment
/// yields 0.
pub fn projected_point_factor(segment: Segment, p: Point) -> f64 {
    let v = segment.direction();
    let len2 = v.hypot2();
    if len2 == 0.0 {
        return 0.0;
    }
    (p - segment.p0).dot(v) / len2
}

/// The point of `segment` closest to `p`.
pub fn closest_point_segment_point(segment: Segment, p: Point) -> Point {
    let t = clamp(projected_point_factor(segment, p), 0.0, 1.0);
    segment.eval(t)
}

/// The endpoint of `segment` farthest from `p`.
pub fn farthest_point_segment_point(segment: Segment, p: Point) -> Point {
    if p.distance_squared(segment.p0) >= p.distance_squared(segment.p1) {
        segment.p0
    } else {
        segment.p1
    }
}

/// Squared distance from `p` to the closest point of `segment`.
pub fn distance_squared_segment_point(segment: Segment, p: Point) -> f64 {
    closest_point_segment_point(segment, p).distance_squared(p)
}

/// Squared distance from `p` to the infinite line through `line`.
///
/// A degenerate line is treated as a point.
pub fn distance_squared_line_point(line: Segment, p: Point) -> f64 {
    let v = line.direction();
    let len2 = v.hypot2();
    if len2 == 0.0 {
        return p.distance_squared(line.p0);
    }
    let c = (p - line.p0).cross(v);
    c * c / len2
}

/// The point of `a` closest to `b`, together with the squared distance
/// between the two segments.
///
/// This is the clamped two-parameter minimization of
/// `|a(s) - b(t)|²`. When the segments are (nearly) parallel `s` is forced
/// to 0 and `t` is solved alone.
pub fn closest_point_segment_segment(a: Segment, b: Segment) -> (Point, f64) {
    let u = a.direction();
    let v = b.direction();
    let w = a.p0 - b.p0;
    let aa = u.dot(u);
    let bb = u.dot(v);
    let cc = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    if cc == 0.0 {
        let p = closest_point_segment_point(a, b.p0);
        return (p, p.distance_squared(b.p0));
    }
    if aa == 0.0 {
        let q = closest_point_segment_point(b, a.p0);
        return (a.p0, a.p0.distance_squared(q));
    }

    let denom = aa * cc - bb * bb;
    let mut s_d = denom;
    let mut t_d = denom;
    let mut s_n;
    let mut t_n;
    if denom <= EPSILON * aa * cc {
        s_n = 0.0;
        s_d = 1.0;
        t_n = e;
        t_d = cc;
    } else {
        s_n = bb * e - cc * d;
        t_n = aa * e - bb * d;
        if s_n < 0.0 {
            s_n = 0.0;
            t_n = e;
            t_d = cc;
        } else if s_n > s_d {
            s_n = s_d;
            t_n = e + bb;
            t_d = cc;
        }
    }

    if t_n < 0.0 {
        t_n = 0.0;
        if -d < 0.0 {
            s_n = 0.0;
        } else if -d > aa {
            s_n = s_d;
        } else {
            s_n = -d;
            s_d = aa;
        }
    } else if t_n > t_d {
        t_n = t_d;
        if -d + bb < 0.0 {
            s_n = 0.0;
        } else if -d + bb > aa {
            s_n = s_d;
        } else {
            s_n = -d + bb;
            s_d = aa;
        }
    }

    let sc = if is_epsilon_zero(s_n, EPSILON) {
        0.0
    } else {
        s_n / s_d
    };
    let tc = if is_epsilon_zero(t_n, EPSILON) {
        0.0
    } else {
        t_n / t_d
    };
    let dp = w + sc * u - tc * v;
    (a.p0 + sc * u, dp.hypot2())
}

/// Squared distance between two segments.
#[inline]
pub fn distance_squared_segment_segment(a: Segment, b: Segment) -> f64 {
    closest_point_segment_segment(a, b).1
}

/// The point of `a` farthest from `b`.
///
/// The distance to a segment is convex along `a`, so the answer is always
/// one of the endpoints of `a`.
pub fn farthest_point_segment_segment(a: Segment, b: Segment) -> Point {
    if distance_squared_segment_point(b, a.p0) >= distance_squared_segment_point(b, a.p1) {
        a.p0
    } else {
        a.p1
    }
}

/// Which side of the directed line `p1 → p2` is `p` on?
///
/// Returns 1, -1 or 0. With the y axis pointing up, a positive answer
/// means `p` is to the right of the line. Cross products within `epsilon`
/// of zero count as colinear.
pub fn side_line_point(p1: Point, p2: Point, p: Point, epsilon: f64) -> i32 {
    let side = (p - p1).cross(p2 - p1);
    if is_epsilon_zero(side, epsilon) {
        0
    } else if side < 0.0 {
        -1
    } else {
        1
    }
}

/// Counter-clockwise classification of `p` relative to the segment
/// `p1 → p2`.
///
/// Off the line this is [`side_line_point`]. For colinear points the
/// projection decides: -1 when `p` lies behind `p1`, 1 when it lies beyond
/// `p2`, and 0 when it lies on the segment.
pub fn ccw(p1: Point, p2: Point, p: Point, epsilon: f64) -> i32 {
    let v = p2 - p1;
    let mut rel = p - p1;
    let mut c = rel.cross(v);
    if is_epsilon_zero(c, epsilon) {
        c = rel.dot(v);
        if c > 0.0 {
            rel -= v;
            c = rel.dot(v);
            if c < 0.0 {
                c = 0.0;
            }
        }
    }
    if c < 0.0 {
        -1
    } else if c > 0.0 {
        1
    } else {
        0
    }
}

/// Outcome of a one-directional segment intersection test.
///
/// `No` is definite. `Perhaps` must be confirmed by the test in the other
/// direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaybeCrossing {
    No,
    Perhaps,
}

impl From<bool> for MaybeCrossing {
    #[inline]
    fn from(b: bool) -> Self {
        if b {
            Self::Perhaps
        } else {
            Self::No
        }
    }
}

fn probe_with_ends(base: Segment, other: Segment) -> MaybeCrossing {
    let v = base.direction();
    let len2 = v.hypot2();
    if len2 == 0.0 {
        return MaybeCrossing::Perhaps;
    }
    let a = other.p0 - base.p0;
    let b = other.p1 - base.p0;
    let f1 = a.cross(v);
    let f2 = b.cross(v);
    let sign = f1 * f2;
    if sign < 0.0 {
        return MaybeCrossing::Perhaps;
    }
    if sign > 0.0 {
        return MaybeCrossing::No;
    }
    match (f1 == 0.0, f2 == 0.0) {
        (true, true) => {
            let t1 = a.dot(v) / len2;
            let t2 = b.dot(v) / len2;
            ((t1 >= 0.0 || t2 >= 0.0) && (t1 <= 1.0 || t2 <= 1.0)).into()
        }
        (true, false) => {
            let t1 = a.dot(v) / len2;
            (0.0..=1.0).contains(&t1).into()
        }
        (false, true) => {
            let t2 = b.dot(v) / len2;
            (0.0..=1.0).contains(&t2).into()
        }
        (false, false) => MaybeCrossing::No,
    }
}

fn probe_without_ends(base: Segment, other: Segment) -> MaybeCrossing {
    let v = base.direction();
    let len2 = v.hypot2();
    if len2 == 0.0 {
        return MaybeCrossing::No;
    }
    let a = other.p0 - base.p0;
    let b = other.p1 - base.p0;
    let f1 = a.cross(v);
    let f2 = b.cross(v);
    let sign = f1 * f2;
    if sign < 0.0 {
        return MaybeCrossing::Perhaps;
    }
    if sign > 0.0 || f1 != 0.0 || f2 != 0.0 {
        return MaybeCrossing::No;
    }
    let t1 = a.dot(v) / len2;
    let t2 = b.dot(v) / len2;
    ((t1 > 0.0 || t2 > 0.0) && (t1 < 1.0 || t2 < 1.0)).into()
}

/// Do the two segments share at least one point, endpoints included?
///
/// # Examples
///
/// ```
/// use geokern::{segments_intersect_with_ends, Segment};
///
/// let a = Segment::new((0.0, 0.0), (4.0, 4.0));
/// let b = Segment::new((0.0, 4.0), (4.0, 0.0));
/// assert!(segments_intersect_with_ends(a, b));
///
/// let c = Segment::new((5.0, 5.0), (6.0, 6.0));
/// let d = Segment::new((0.0, 0.0), (1.0, 1.0));
/// assert!(!segments_intersect_with_ends(c, d));
/// ```
pub fn segments_intersect_with_ends(a: Segment, b: Segment) -> bool {
    if a.is_degenerate() && b.is_degenerate() {
        return a.p0 == b.p0;
    }
    probe_with_ends(a, b) == MaybeCrossing::Perhaps
        && probe_with_ends(b, a) == MaybeCrossing::Perhaps
}

/// Do the two segments cross, ignoring contacts at their endpoints?
///
/// Colinear segments intersect when their overlap has a non-zero length.
pub fn segments_intersect_without_ends(a: Segment, b: Segment) -> bool {
    probe_without_ends(a, b) == MaybeCrossing::Perhaps
        && probe_without_ends(b, a) == MaybeCrossing::Perhaps
}

/// The parameter along `a` where the infinite lines through `a` and `b`
/// meet.
///
/// Returns `None` for parallel lines.
pub fn intersection_factor_line_line(a: Segment, b: Segment) -> Option<f64> {
    let v1 = a.direction();
    let v2 = b.direction();
    let det = v1.cross(v2);
    if det == 0.0 {
        return None;
    }
    Some(v2.cross(a.p0 - b.p0) / det)
}

/// The parameter along `a` where `a` and `b` cross.
///
/// Returns `None` when the segments are parallel or do not reach each
/// other.
pub fn intersection_factor_segment_segment(a: Segment, b: Segment) -> Option<f64> {
    let v1 = a.direction();
    let v2 = b.direction();
    let det = v1.cross(v2);
    if det == 0.0 {
        return None;
    }
    let w = a.p0 - b.p0;
    let on_b = v1.cross(w) / det;
    if !(0.0..=1.0).contains(&on_b) {
        return None;
    }
    let on_a = v2.cross(w) / det;
    (0.0..=1.0).contains(&on_a).then_some(on_a)
}

/// The point where `a` and `b` cross, if any.
pub fn intersection_point_segment_segment(a: Segment, b: Segment) -> Option<Point> {
    intersection_factor_segment_segment(a, b).map(|t| a.eval(t))
}

/// Crossing contribution of the edge `p0 → p1` for a ray cast from `p`
/// towards positive x.
///
/// Upward edges count 1 and downward edges count -1. The ray is half-open
/// in y (`y0 <= py < y1`) so that a shared vertex is counted once, and a
/// point exactly on the edge does not count.
pub fn crossings_point_edge(p: Point, p0: Point, p1: Point) -> i32 {
    if p.y < p0.y && p.y < p1.y {
        return 0;
    }
    if p.y >= p0.y && p.y >= p1.y {
        return 0;
    }
    if p.x >= p0.x && p.x >= p1.x {
        return 0;
    }
    let dir = if p0.y < p1.y { 1 } else { -1 };
    if p.x < p0.x && p.x < p1.x {
        return dir;
    }
    let x_intercept = p0.x + (p.y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    if p.x >= x_intercept {
        0
    } else {
        dir
    }
}

/// Like [`crossings_point_edge`] but with strict comparisons, so that the
/// ray also counts edges ending exactly at `p.y`.
pub fn crossings_point_edge_without_equality(p: Point, p0: Point, p1: Point) -> i32 {
    if p.y < p0.y && p.y < p1.y {
        return 0;
    }
    if p.y > p0.y && p.y > p1.y {
        return 0;
    }
    if p.x > p0.x && p.x > p1.x {
        return 0;
    }
    let dir = if p0.y < p1.y { 1 } else { -1 };
    if p.x < p0.x && p.x < p1.x {
        return dir;
    }
    if p0.y == p1.y {
        return 0;
    }
    let x_intercept = p0.x + (p.y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    if p.x > x_intercept {
        0
    } else {
        dir
    }
}

/// Count crossings for an edge lying wholly to the right of a target whose
/// vertical extent is `[ymin, ymax]`.
///
/// An edge that spans the whole band counts twice, once at each end.
#[inline]
fn band_crossings(mut crossings: i32, ymin: f64, ymax: f64, p0: Point, p1: Point) -> i32 {
    if p0.y < p1.y {
        if p0.y <= ymin {
            crossings += 1;
        }
        if p1.y >= ymax {
            crossings += 1;
        }
    } else if p1.y < p0.y {
        if p1.y <= ymin {
            crossings -= 1;
        }
        if p0.y >= ymax {
            crossings -= 1;
        }
    }
    crossings
}

/// Crossing rule of an edge against a rectangle's right-hand shadow.
///
/// Returns [`Crossings::Intersects`] as soon as the edge enters the
/// rectangle's interior.
pub fn crossings_rect_edge(crossings: i32, rect: Rect, p0: Point, p1: Point) -> Crossings {
    let Rect { x0, y0, x1, y1 } = rect.abs();
    if p0.y >= y1 && p1.y >= y1 {
        return Crossings::Count(crossings);
    }
    if p0.y <= y0 && p1.y <= y0 {
        return Crossings::Count(crossings);
    }
    if p0.x <= x0 && p1.x <= x0 {
        return Crossings::Count(crossings);
    }
    if p0.x >= x1 && p1.x >= x1 {
        return Crossings::Count(band_crossings(crossings, y0, y1, p0, p1));
    }
    let inside = |p: Point| p.x > x0 && p.x < x1 && p.y > y0 && p.y < y1;
    if inside(p0) || inside(p1) {
        return Crossings::Intersects;
    }
    // x positions where the edge enters and leaves the band
    let mut xi0 = p0.x;
    if p0.y < y0 {
        xi0 += (y0 - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    } else if p0.y > y1 {
        xi0 += (y1 - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    }
    let mut xi1 = p1.x;
    if p1.y < y0 {
        xi1 += (y0 - p1.y) * (p0.x - p1.x) / (p0.y - p1.y);
    } else if p1.y > y1 {
        xi1 += (y1 - p1.y) * (p0.x - p1.x) / (p0.y - p1.y);
    }
    if xi0 <= x0 && xi1 <= x0 {
        return Crossings::Count(crossings);
    }
    if xi0 >= x1 && xi1 >= x1 {
        return Crossings::Count(band_crossings(crossings, y0, y1, p0, p1));
    }
    Crossings::Intersects
}

/// Crossing rule of an edge against a circle's right-hand shadow.
///
/// The edge either passes to the right of the whole circle, touches its
/// disk (an intersection), or is classified by rays cast from the top and
/// bottom of the circle.
pub fn crossings_circle_edge(crossings: i32, circle: Circle, p0: Point, p1: Point) -> Crossings {
    let r = circle.radius.abs();
    let c = circle.center;
    let xmin = c.x - r;
    let ymin = c.y - r;
    let ymax = c.y + r;
    if p0.y <= ymin && p1.y <= ymin {
        return Crossings::Count(crossings);
    }
    if p0.y >= ymax && p1.y >= ymax {
        return Crossings::Count(crossings);
    }
    if p0.x <= xmin && p1.x <= xmin {
        return Crossings::Count(crossings);
    }
    if p0.x >= c.x + r && p1.x >= c.x + r {
        return Crossings::Count(band_crossings(crossings, ymin, ymax, p0, p1));
    }
    if circle.intersects_segment(Segment::new(p0, p1)) {
        return Crossings::Intersects;
    }
    Crossings::Count(
        crossings
            + crossings_point_edge(Point::new(c.x, ymin), p0, p1)
            + crossings_point_edge(Point::new(c.x, ymax), p0, p1),
    )
}

/// Crossing rule of an edge against an ellipse's right-hand shadow.
///
/// Like [`crossings_circle_edge`], except that an edge tangent to the
/// ellipse already counts as an intersection.
pub fn crossings_ellipse_edge(crossings: i32, ellipse: Ellipse, p0: Point, p1: Point) -> Crossings {
    let Rect {
        x0: xmin,
        y0: ymin,
        x1: xmax,
        y1: ymax,
    } = ellipse.frame();
    if p0.y <= ymin && p1.y <= ymin {
        return Crossings::Count(crossings);
    }
    if p0.y >= ymax && p1.y >= ymax {
        return Crossings::Count(crossings);
    }
    if p0.x <= xmin && p1.x <= xmin {
        return Crossings::Count(crossings);
    }
    if p0.x >= xmax && p1.x >= xmax {
        return Crossings::Count(band_crossings(crossings, ymin, ymax, p0, p1));
    }
    if ellipse.intersects_segment_with_ends(Segment::new(p0, p1)) {
        return Crossings::Intersects;
    }
    let cx = ellipse.center.x;
    Crossings::Count(
        crossings
            + crossings_point_edge(Point::new(cx, ymin), p0, p1)
            + crossings_point_edge(Point::new(cx, ymax), p0, p1),
    )
}

/// Crossing rule of an edge against a triangle's right-hand shadow.
///
/// Rays are cast from the lowest and the highest vertex of the triangle.
pub fn crossings_triangle_edge(
    crossings: i32,
    triangle: Triangle,
    p0: Point,
    p1: Point,
) -> Crossings {
    let Rect {
        x0: xmin,
        y0: ymin,
        x1: xmax,
        y1: ymax,
    } = triangle.bounding_box();
    if p0.y <= ymin && p1.y <= ymin {
        return Crossings::Count(crossings);
    }
    if p0.y >= ymax && p1.y >= ymax {
        return Crossings::Count(crossings);
    }
    if p0.x <= xmin && p1.x <= xmin {
        return Crossings::Count(crossings);
    }
    if p0.x >= xmax && p1.x >= xmax {
        return Crossings::Count(band_crossings(crossings, ymin, ymax, p0, p1));
    }
    if triangle.intersects_segment(Segment::new(p0, p1)) {
        return Crossings::Intersects;
    }
    let (lo, hi) = triangle.y_extremes();
    Crossings::Count(
        crossings + crossings_point_edge(lo, p0, p1) + crossings_point_edge(hi, p0, p1),
    )
}

/// Crossing rule of an edge against a target segment's right-hand shadow.
pub fn crossings_segment_edge(crossings: i32, target: Segment, p0: Point, p1: Point) -> Crossings {
    let Rect {
        x0: xmin,
        y0: ymin,
        x1: xmax,
        y1: ymax,
    } = target.bounding_box();
    if p0.y <= ymin && p1.y <= ymin {
        return Crossings::Count(crossings);
    }
    if p0.y >= ymax && p1.y >= ymax {
        return Crossings::Count(crossings);
    }
    if p0.x <= xmin && p1.x <= xmin {
        return Crossings::Count(crossings);
    }
    if p0.x >= xmax && p1.x >= xmax {
        return Crossings::Count(band_crossings(crossings, ymin, ymax, p0, p1));
    }
    if segments_intersect_with_ends(Segment::new(p0, p1), target) {
        return Crossings::Intersects;
    }
    let (lo, hi) = if target.p0.y <= target.p1.y {
        (target.p0, target.p1)
    } else {
        (target.p1, target.p0)
    };
    let side0 = side_line_point(lo, hi, p0, 0.0);
    let side1 = side_line_point(lo, hi, p1, 0.0);
    if side0 > 0 || side1 > 0 {
        let n1 = crossings_point_edge(target.p0, p0, p1);
        let n2 = if n1 != 0 {
            crossings_point_edge_without_equality(target.p1, p0, p1)
        } else {
            crossings_point_edge(target.p1, p0, p1)
        };
        return Crossings::Count(crossings + n1 + n2);
    }
    Crossings::Count(crossings)
}
