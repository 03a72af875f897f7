// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The crossing-number engine.
//!
//! Containment and intersection against a path are decided by casting rays
//! towards positive x and counting signed edge crossings. Upward edges count
//! 1 and downward edges count -1. Targets with an area (rectangles, circles,
//! segments) cast one ray from each end of their vertical extent, so a full
//! crossing of their shadow counts 2.
//!
//! As soon as an edge is found to actually touch the target, the walk stops
//! and reports [`Crossings::Intersects`].

use crate::common::SPLINE_APPROXIMATION_RATIO;
use crate::{
    crossings_circle_edge, crossings_ellipse_edge, crossings_point_edge, crossings_rect_edge,
    crossings_segment_edge, crossings_triangle_edge, Circle, Ellipse, FlatteningPathIter,
    GeomError, PathElement, PathIterator, PathShadow, Point, Rect, Segment, Triangle,
};

/// The result of a crossing computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crossings {
    /// A signed crossing count.
    Count(i32),
    /// A path edge touches the target. No count is meaningful any more.
    Intersects,
}

impl Crossings {
    /// No crossings.
    pub const ZERO: Crossings = Crossings::Count(0);

    /// Combine two results. [`Intersects`](Crossings::Intersects) absorbs
    /// everything.
    #[must_use]
    #[inline]
    pub fn add(self, other: Crossings) -> Crossings {
        match (self, other) {
            (Self::Count(a), Self::Count(b)) => Self::Count(a + b),
            _ => Self::Intersects,
        }
    }

    /// Is this the definite-intersection result?
    #[inline]
    pub fn is_intersects(self) -> bool {
        matches!(self, Self::Intersects)
    }

    /// The crossing count, if there is one.
    #[inline]
    pub fn count(self) -> Option<i32> {
        match self {
            Self::Count(n) => Some(n),
            Self::Intersects => None,
        }
    }

    /// Does this result select the inside of the path under `mask`?
    ///
    /// `mask` is one of [`PathWindingRule::point_mask`] or
    /// [`PathWindingRule::area_mask`]. An intersection always matches.
    ///
    /// [`PathWindingRule::point_mask`]: crate::PathWindingRule::point_mask
    /// [`PathWindingRule::area_mask`]: crate::PathWindingRule::area_mask
    #[inline]
    pub fn matches(self, mask: i32) -> bool {
        match self {
            Self::Count(n) => n & mask != 0,
            Self::Intersects => true,
        }
    }
}

impl Default for Crossings {
    fn default() -> Self {
        Self::ZERO
    }
}

/// How sub-paths that do not end where they started are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpenPathPolicy {
    /// Count the edges as they are.
    #[default]
    Standard,
    /// Add the missing closing edge to every open sub-path.
    AutoClose,
    /// With any open sub-path, only an intersection is reported. Counts are
    /// replaced by zero.
    SimpleIntersection,
}

/// A query target of the crossing engine.
///
/// The engine feeds every edge of the flattened path to
/// [`edge_crossings`](CrossingTarget::edge_crossings) along with the running
/// count.
pub trait CrossingTarget {
    /// Does a path vertex landing on `p` count as an intersection?
    fn hits_vertex(&self, p: Point) -> bool {
        let _ = p;
        false
    }

    /// Called at the start of every sub-path.
    fn begin_subpath(&mut self, start: Point) {
        let _ = start;
    }

    /// Fold the edge `p0 → p1` into `crossings`.
    ///
    /// The edge is never degenerate.
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings;
}

impl CrossingTarget for Point {
    #[inline]
    fn hits_vertex(&self, p: Point) -> bool {
        *self == p
    }

    #[inline]
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        Crossings::Count(crossings + crossings_point_edge(*self, p0, p1))
    }
}

impl CrossingTarget for Rect {
    #[inline]
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        crossings_rect_edge(crossings, *self, p0, p1)
    }
}

impl CrossingTarget for Circle {
    #[inline]
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        crossings_circle_edge(crossings, *self, p0, p1)
    }
}

impl CrossingTarget for Ellipse {
    #[inline]
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        crossings_ellipse_edge(crossings, *self, p0, p1)
    }
}

impl CrossingTarget for Triangle {
    #[inline]
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        crossings_triangle_edge(crossings, *self, p0, p1)
    }
}

impl CrossingTarget for Segment {
    #[inline]
    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        crossings_segment_edge(crossings, *self, p0, p1)
    }
}

/// Outcome of one traversal.
pub(crate) struct Walk {
    pub(crate) crossings: Crossings,
    /// At least one sub-path did not end at its start point.
    pub(crate) open: bool,
}

fn step<T: CrossingTarget + ?Sized>(
    target: &mut T,
    crossings: Crossings,
    p0: Point,
    p1: Point,
) -> Crossings {
    let Crossings::Count(n) = crossings else {
        return crossings;
    };
    let next = if target.hits_vertex(p1) {
        Crossings::Intersects
    } else if p0 == p1 {
        crossings
    } else {
        target.edge_crossings(n, p0, p1)
    };
    if next.is_intersects() {
        log::trace!("crossing walk stopped at edge {p0:?} -> {p1:?}");
    }
    next
}

pub(crate) fn walk<I: PathIterator, T: CrossingTarget + ?Sized>(
    iter: I,
    target: &mut T,
    auto_close: bool,
) -> Walk {
    let mut iter = FlatteningPathIter::new(iter, SPLINE_APPROXIMATION_RATIO);
    let start = match iter.next() {
        None => {
            return Walk {
                crossings: Crossings::ZERO,
                open: false,
            }
        }
        Some(PathElement::MoveTo { to }) => to,
        Some(_) => panic!("missing initial moveto in path definition"),
    };
    target.begin_subpath(start);
    let mut crossings = Crossings::ZERO;
    let mut open = false;
    let mut mov = start;
    let mut cur = start;

    for el in iter {
        match el {
            PathElement::MoveTo { to } => {
                if cur != mov {
                    open = true;
                    if auto_close {
                        crossings = step(target, crossings, cur, mov);
                        if crossings.is_intersects() {
                            return Walk { crossings, open };
                        }
                    }
                }
                mov = to;
                cur = to;
                target.begin_subpath(to);
            }
            PathElement::LineTo { to, .. }
            | PathElement::QuadTo { to, .. }
            | PathElement::CurveTo { to, .. } => {
                crossings = step(target, crossings, cur, to);
                if crossings.is_intersects() {
                    return Walk { crossings, open };
                }
                cur = to;
            }
            PathElement::Close { .. } => {
                if cur != mov {
                    crossings = step(target, crossings, cur, mov);
                    if crossings.is_intersects() {
                        return Walk { crossings, open };
                    }
                }
                cur = mov;
            }
        }
    }
    if cur != mov {
        open = true;
        if auto_close {
            crossings = step(target, crossings, cur, mov);
        }
    }
    Walk { crossings, open }
}

/// Run the crossing engine over `iter` against `target`.
///
/// Curves are flattened on the fly. An empty path yields a zero count.
///
/// # Panics
///
/// Panics if the first element of a non-empty path is not a
/// [`MoveTo`](PathElement::MoveTo).
pub fn crossings<I: PathIterator, T: CrossingTarget + ?Sized>(
    iter: I,
    target: &mut T,
    policy: OpenPathPolicy,
) -> Crossings {
    match policy {
        OpenPathPolicy::Standard => walk(iter, target, false).crossings,
        OpenPathPolicy::AutoClose => walk(iter, target, true).crossings,
        OpenPathPolicy::SimpleIntersection => {
            let Walk { crossings, open } = walk(iter, target, false);
            if open && !crossings.is_intersects() {
                Crossings::ZERO
            } else {
                crossings
            }
        }
    }
}

/// Like [`crossings`], for paths whose sub-paths must all be closed.
///
/// # Errors
///
/// Returns [`GeomError::OpenPath`] when a sub-path does not end at its
/// start point and no intersection was found first.
///
/// # Panics
///
/// Panics if the first element of a non-empty path is not a
/// [`MoveTo`](PathElement::MoveTo).
pub fn closed_crossings<I: PathIterator, T: CrossingTarget + ?Sized>(
    iter: I,
    target: &mut T,
) -> Result<Crossings, GeomError> {
    let Walk { crossings, open } = walk(iter, target, false);
    if open && !crossings.is_intersects() {
        return Err(GeomError::OpenPath);
    }
    Ok(crossings)
}

/// Crossings of a ray cast from `pt` towards positive x.
pub fn crossings_from_point<I: PathIterator>(
    iter: I,
    mut pt: Point,
    policy: OpenPathPolicy,
) -> Crossings {
    crossings(iter, &mut pt, policy)
}

/// Crossings against the right-hand shadow of `rect`.
pub fn crossings_from_rect<I: PathIterator>(
    iter: I,
    rect: Rect,
    policy: OpenPathPolicy,
) -> Crossings {
    crossings(iter, &mut rect.abs(), policy)
}

/// Crossings against the right-hand shadow of `circle`.
pub fn crossings_from_circle<I: PathIterator>(
    iter: I,
    mut circle: Circle,
    policy: OpenPathPolicy,
) -> Crossings {
    crossings(iter, &mut circle, policy)
}

/// Crossings against the right-hand shadow of `ellipse`.
pub fn crossings_from_ellipse<I: PathIterator>(
    iter: I,
    mut ellipse: Ellipse,
    policy: OpenPathPolicy,
) -> Crossings {
    crossings(iter, &mut ellipse, policy)
}

/// Crossings against the right-hand shadow of `triangle`.
pub fn crossings_from_triangle<I: PathIterator>(
    iter: I,
    mut triangle: Triangle,
    policy: OpenPathPolicy,
) -> Crossings {
    crossings(iter, &mut triangle, policy)
}

/// Crossings against the right-hand shadow of `segment`.
pub fn crossings_from_segment<I: PathIterator>(
    iter: I,
    mut segment: Segment,
    policy: OpenPathPolicy,
) -> Crossings {
    crossings(iter, &mut segment, policy)
}

/// Crossings of `iter` against the path shadowed by `shadow`.
pub fn crossings_from_path<I: PathIterator, J: PathIterator>(
    iter: I,
    shadow: &mut PathShadow<J>,
    policy: OpenPathPolicy,
) -> Crossings {
    shadow.crossings(iter, policy)
}

/// Is `pt` inside the path, according to its winding rule?
///
/// Points on a path vertex are inside. Other boundary points follow the
/// half-open ray rule: points on a left or bottom edge are inside, points on
/// a right or top edge are not.
///
/// # Examples
///
/// ```
/// use geokern::{path_contains_point, Path, Point};
///
/// let mut square = Path::new();
/// square.move_to((0.0, 0.0));
/// square.line_to((4.0, 0.0));
/// square.line_to((4.0, 4.0));
/// square.line_to((0.0, 4.0));
/// square.close_path();
///
/// assert!(path_contains_point(square.iter(), Point::new(2.0, 2.0)));
/// assert!(!path_contains_point(square.iter(), Point::new(5.0, 5.0)));
/// ```
pub fn path_contains_point<I: PathIterator>(iter: I, pt: Point) -> bool {
    let mask = iter.winding_rule().point_mask();
    crossings_from_point(iter, pt, OpenPathPolicy::SimpleIntersection).matches(mask)
}

/// Is all of `rect` inside the path?
///
/// Open sub-paths are closed for the test. An empty rectangle is never
/// contained.
pub fn path_contains_rect<I: PathIterator>(iter: I, rect: Rect) -> bool {
    let rect = rect.abs();
    if rect.is_empty() {
        return false;
    }
    let mask = iter.winding_rule().area_mask();
    let c = crossings_from_rect(iter, rect, OpenPathPolicy::AutoClose);
    !c.is_intersects() && c.matches(mask)
}

/// Does the path touch or enclose any part of `rect`?
///
/// An empty rectangle never intersects.
pub fn path_intersects_rect<I: PathIterator>(iter: I, rect: Rect) -> bool {
    if rect.abs().is_empty() {
        return false;
    }
    let mask = iter.winding_rule().area_mask();
    crossings_from_rect(iter, rect, OpenPathPolicy::SimpleIntersection).matches(mask)
}

/// Does the path touch or enclose any part of `circle`?
pub fn path_intersects_circle<I: PathIterator>(iter: I, circle: Circle) -> bool {
    let mask = iter.winding_rule().area_mask();
    crossings_from_circle(iter, circle, OpenPathPolicy::SimpleIntersection).matches(mask)
}

/// Does the path touch or enclose any part of `segment`?
pub fn path_intersects_segment<I: PathIterator>(iter: I, segment: Segment) -> bool {
    let mask = iter.winding_rule().area_mask();
    crossings_from_segment(iter, segment, OpenPathPolicy::SimpleIntersection).matches(mask)
}

/// Does the path touch or enclose any part of `ellipse`?
///
/// An ellipse with a zero radius never intersects.
pub fn path_intersects_ellipse<I: PathIterator>(iter: I, ellipse: Ellipse) -> bool {
    if ellipse.is_empty() {
        return false;
    }
    let mask = iter.winding_rule().area_mask();
    crossings_from_ellipse(iter, ellipse, OpenPathPolicy::SimpleIntersection).matches(mask)
}

/// Does the path touch or enclose any part of `triangle`?
pub fn path_intersects_triangle<I: PathIterator>(iter: I, triangle: Triangle) -> bool {
    let mask = iter.winding_rule().area_mask();
    crossings_from_triangle(iter, triangle, OpenPathPolicy::SimpleIntersection).matches(mask)
}

/// Do two paths touch, or does one enclose part of the other?
pub fn path_intersects_path<I: PathIterator, J: PathIterator>(iter: I, other: J) -> bool {
    let mut shadow = PathShadow::new(other);
    shadow
        .crossings(iter, OpenPathPolicy::SimpleIntersection)
        .is_intersects()
}
