// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path-versus-path crossings.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::common::SPLINE_APPROXIMATION_RATIO;
use crate::crossings::{walk, Walk};
use crate::{
    path_contains_point, segments_intersect_with_ends, side_line_point, CrossingTarget,
    Crossings, FlatteningPathIter, OpenPathPolicy, PathElement, PathIterator, Point, Rect,
    Segment,
};

/// The shadow of a path, used to test another path against it.
///
/// The shadow keeps the bounding box of the shadowed path, computed when
/// the shadow is built, and its flattened edges, computed on the first query
/// from a fresh cursor. Each sub-path of the shadowed path contributes a
/// reference point, its lowest vertex (the rightmost one on ties), from
/// which a ray is cast against the other path.
///
/// A query reports [`Crossings::Intersects`] when an edge of the other path
/// touches an edge of the shadowed path, when the other path encloses a
/// reference point, or when the shadowed path encloses the start of a
/// sub-path of the other path. Sub-paths without any edge take no part on
/// either side. Otherwise it reports the crossing count of
/// the first reference point.
#[derive(Debug)]
pub struct PathShadow<I> {
    iter: I,
    bounds: Option<Rect>,
    edges: Option<Vec<Segment>>,
    references: SmallVec<[Point; 4]>,
    ref_crossings: SmallVec<[i32; 4]>,
    other_starts: SmallVec<[Point; 4]>,
    pending_start: Option<Point>,
}

#[inline]
fn boxes_touch(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Lower than `best`, or as low and farther right.
#[inline]
fn lower(p: Point, best: Point) -> bool {
    p.y < best.y || (p.y == best.y && p.x > best.x)
}

impl<I: PathIterator> PathShadow<I> {
    /// Shadow the path produced by `iter`.
    ///
    /// `iter` itself is never advanced. Every traversal goes through
    /// [`restart_iterations`](PathIterator::restart_iterations).
    pub fn new(iter: I) -> Self {
        let bounds = iter.restart_iterations().fold(None, |acc: Option<Rect>, el| {
            let mut acc = acc;
            let mut add = |p: Point| {
                acc = Some(match acc {
                    Some(r) => r.union_pt(p),
                    None => Rect::from_points(p, p),
                });
            };
            match el {
                PathElement::MoveTo { to } | PathElement::LineTo { to, .. } => add(to),
                PathElement::QuadTo { ctrl, to, .. } => {
                    add(ctrl);
                    add(to);
                }
                PathElement::CurveTo {
                    ctrl1, ctrl2, to, ..
                } => {
                    add(ctrl1);
                    add(ctrl2);
                    add(to);
                }
                PathElement::Close { .. } => {}
            }
            acc
        });
        PathShadow {
            iter,
            bounds,
            edges: None,
            references: SmallVec::new(),
            ref_crossings: SmallVec::new(),
            other_starts: SmallVec::new(),
            pending_start: None,
        }
    }

    /// The control-point bounding box of the shadowed path, or `None` when
    /// the path is empty.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// The lowest vertex of each sub-path that has at least one edge.
    pub fn reference_points(&self) -> &[Point] {
        &self.references
    }

    /// Flatten the shadowed path into edges and pick the reference points.
    ///
    /// # Panics
    ///
    /// Panics if the shadowed path does not start with a move.
    fn ensure_edges(&mut self) {
        if self.edges.is_some() {
            return;
        }
        let mut edges = Vec::new();
        let mut references = SmallVec::new();
        let mut mov = Point::ZERO;
        let mut cur = Point::ZERO;
        let mut lowest: Option<Point> = None;
        let mut first = true;
        let flat =
            FlatteningPathIter::new(self.iter.restart_iterations(), SPLINE_APPROXIMATION_RATIO);
        for el in flat {
            let to = match el {
                PathElement::MoveTo { to } => {
                    references.extend(lowest.take());
                    mov = to;
                    cur = to;
                    first = false;
                    continue;
                }
                _ if first => panic!("missing initial moveto in path definition"),
                PathElement::Close { .. } => mov,
                el => el.end(),
            };
            if to != cur {
                edges.push(Segment::new(cur, to));
                for p in [cur, to] {
                    if lowest.map_or(true, |best| lower(p, best)) {
                        lowest = Some(p);
                    }
                }
            }
            cur = to;
        }
        references.extend(lowest);
        log::debug!(
            "path shadow built with {} edges and {} reference points",
            edges.len(),
            references.len()
        );
        self.edges = Some(edges);
        self.references = references;
    }

    /// Compute the crossings of `other` against the shadowed path.
    ///
    /// # Panics
    ///
    /// Panics if either path does not start with a move.
    pub fn crossings<J: PathIterator>(&mut self, other: J, policy: OpenPathPolicy) -> Crossings {
        self.ensure_edges();
        self.other_starts.clear();
        self.pending_start = None;
        self.ref_crossings.clear();
        self.ref_crossings.resize(self.references.len(), 0);
        if self.bounds.is_none() {
            return Crossings::ZERO;
        }
        let mask = other.winding_rule().point_mask();
        let Walk { crossings, open } = walk(other, self, policy == OpenPathPolicy::AutoClose);
        if crossings.is_intersects() {
            return crossings;
        }
        let open_ignored = open && policy == OpenPathPolicy::SimpleIntersection;
        if !open_ignored && self.ref_crossings.iter().any(|&n| n & mask != 0) {
            return Crossings::Intersects;
        }
        for &start in &self.other_starts {
            if path_contains_point(self.iter.restart_iterations(), start) {
                return Crossings::Intersects;
            }
        }
        if open_ignored {
            return Crossings::ZERO;
        }
        Crossings::Count(self.ref_crossings.first().copied().unwrap_or(0))
    }
}

impl<I: PathIterator> CrossingTarget for PathShadow<I> {
    fn begin_subpath(&mut self, start: Point) {
        self.pending_start = Some(start);
    }

    fn edge_crossings(&mut self, crossings: i32, p0: Point, p1: Point) -> Crossings {
        self.other_starts.extend(self.pending_start.take());
        let Some(bounds) = self.bounds else {
            return Crossings::Count(crossings);
        };
        let edge_box = Rect::from_points(p0, p1);
        if boxes_touch(edge_box, bounds) {
            let edge = Segment::new(p0, p1);
            let hit = self.edges.iter().flatten().any(|b| {
                boxes_touch(edge_box, Rect::from_points(b.p0, b.p1))
                    && segments_intersect_with_ends(edge, *b)
            });
            if hit {
                return Crossings::Intersects;
            }
        }
        let (lo, hi, dir) = if p0.y <= p1.y {
            (p0, p1, 1)
        } else {
            (p1, p0, -1)
        };
        for (r, n) in self.references.iter().zip(self.ref_crossings.iter_mut()) {
            if lo.y <= r.y && r.y < hi.y && side_line_point(lo, hi, *r, 0.0) < 0 {
                *n += dir;
            }
        }
        Crossings::Count(crossings)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        crossings_from_path, path_intersects_path, Crossings, OpenPathPolicy, Path, PathShadow,
        PathWindingRule, Point, Rect, Shape,
    };

    fn square(x: f64, y: f64, size: f64) -> Path {
        Rect::new(x, y, x + size, y + size).to_path()
    }

    #[test]
    fn reference_points() {
        let mut p = Path::new();
        p.move_to((0.0, 2.0));
        p.line_to((3.0, 0.0));
        p.line_to((1.0, 0.0));
        p.line_to((2.0, 4.0));
        p.close_path();
        p.move_to((10.0, 10.0));
        p.line_to((12.0, 11.0));
        // A lone move contributes nothing.
        p.move_to((20.0, 20.0));
        let mut shadow = PathShadow::new(p.iter());
        assert_eq!(shadow.bounds(), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        shadow.crossings(square(50.0, 50.0, 1.0).iter(), OpenPathPolicy::Standard);
        assert_eq!(
            shadow.reference_points(),
            &[Point::new(3.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn overlapping_and_disjoint() {
        let a = square(0.0, 0.0, 4.0);
        assert!(path_intersects_path(a.iter(), square(2.0, 2.0, 4.0).iter()));
        assert!(!path_intersects_path(a.iter(), square(5.0, 0.0, 1.0).iter()));
        // Touching at a corner.
        assert!(path_intersects_path(a.iter(), square(4.0, 4.0, 1.0).iter()));
    }

    #[test]
    fn nested_paths() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(3.0, 3.0, 2.0);
        assert!(path_intersects_path(outer.iter(), inner.iter()));
        assert!(path_intersects_path(inner.iter(), outer.iter()));
    }

    #[test]
    fn shadow_is_reusable() {
        let outer = square(0.0, 0.0, 10.0);
        let mut shadow = PathShadow::new(outer.iter());
        for _ in 0..2 {
            assert_eq!(
                shadow.crossings(square(20.0, 0.0, 1.0).iter(), OpenPathPolicy::Standard),
                Crossings::ZERO
            );
            assert!(shadow
                .crossings(square(3.0, 3.0, 1.0).iter(), OpenPathPolicy::Standard)
                .is_intersects());
        }
    }

    #[test]
    fn open_polyline_against_polygon() {
        let poly = square(0.0, 0.0, 4.0);
        let mut line = Path::new();
        line.move_to((-1.0, 2.0));
        line.line_to((5.0, 2.0));
        assert!(path_intersects_path(line.iter(), poly.iter()));

        let mut outside = Path::new();
        outside.move_to((-3.0, -1.0));
        outside.line_to((-3.0, 5.0));
        outside.line_to((7.0, 5.0));
        assert!(!path_intersects_path(outside.iter(), poly.iter()));
    }

    #[test]
    fn lone_move_is_ignored_both_ways() {
        let a = square(0.0, 0.0, 10.0);
        let mut b = square(20.0, 20.0, 1.0);
        b.move_to((5.0, 5.0));
        assert!(!path_intersects_path(a.iter(), b.iter()));
        assert!(!path_intersects_path(b.iter(), a.iter()));

        // Once the sub-path has an edge, its start counts.
        b.line_to((6.0, 5.0));
        assert!(path_intersects_path(a.iter(), b.iter()));
        assert!(path_intersects_path(b.iter(), a.iter()));
    }

    #[test]
    fn even_odd_count_around_reference() {
        let shadowed = square(0.0, 0.0, 1.0);
        let mut twice = Path::with_winding_rule(PathWindingRule::EvenOdd);
        twice.extend(square(-2.0, -2.0, 5.0).iter());
        twice.extend(square(-3.0, -3.0, 7.0).iter());
        let mut shadow = PathShadow::new(shadowed.iter());
        assert_eq!(
            crossings_from_path(twice.iter(), &mut shadow, OpenPathPolicy::Standard),
            Crossings::Count(2)
        );
        assert!(!path_intersects_path(twice.iter(), shadowed.iter()));

        twice.set_winding_rule(PathWindingRule::NonZero);
        assert!(crossings_from_path(twice.iter(), &mut shadow, OpenPathPolicy::Standard)
            .is_intersects());
        assert!(path_intersects_path(twice.iter(), shadowed.iter()));
    }

    #[test]
    fn open_path_policies_through_shadow() {
        let shadowed = square(0.0, 0.0, 1.0);
        // Crosses the ray from (1, 0) upwards twice, and its closing edge
        // crosses it downwards once.
        let mut open = Path::with_winding_rule(PathWindingRule::EvenOdd);
        open.move_to((5.0, -1.0));
        open.line_to((5.0, 2.0));
        open.line_to((-3.0, 2.0));
        open.line_to((-3.0, -1.0));
        open.line_to((6.0, -1.0));
        open.line_to((6.0, 2.0));
        let mut shadow = PathShadow::new(shadowed.iter());
        assert_eq!(
            crossings_from_path(open.iter(), &mut shadow, OpenPathPolicy::Standard),
            Crossings::Count(2)
        );
        assert!(crossings_from_path(open.iter(), &mut shadow, OpenPathPolicy::AutoClose)
            .is_intersects());
        assert_eq!(
            crossings_from_path(open.iter(), &mut shadow, OpenPathPolicy::SimpleIntersection),
            Crossings::ZERO
        );
    }

    #[test]
    fn intersection_is_symmetric() {
        let mut shapes = [
            square(0.0, 0.0, 10.0),
            square(3.0, 3.0, 2.0),
            square(9.0, 9.0, 4.0),
            square(20.0, 0.0, 1.0),
            Path::new(),
        ];
        shapes[3].move_to((4.0, 4.0));
        shapes[4].move_to((1.0, 1.0));
        for a in &shapes {
            for b in &shapes {
                assert_eq!(
                    path_intersects_path(a.iter(), b.iter()),
                    path_intersects_path(b.iter(), a.iter()),
                    "{a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn empty_shadow() {
        let empty = Path::new();
        assert!(!path_intersects_path(square(0.0, 0.0, 1.0).iter(), empty.iter()));
    }
}
