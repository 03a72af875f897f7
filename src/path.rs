// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths made of lines and Bézier curves, possibly with several sub-paths.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::common::SPLINE_APPROXIMATION_RATIO;
use crate::{
    closest_point_segment_point, farthest_point_segment_point, path_contains_point, Affine,
    FlatteningPathIter, GeomError, GeomFactory, Grid, PathElement, PathElementType, PathFlags,
    PathIterator, PathWindingRule, Point, Rect, Segment, Shape, ShapePart, Translate, Vec2,
};

/// A path.
///
/// Element kinds and their coordinates are stored in two parallel vectors.
/// A `MoveTo` or `LineTo` owns one point, a `QuadTo` two, a `CurveTo` three,
/// and a `Close` none. The `from` point of each element is recovered while
/// iterating.
///
/// A well-formed path begins with a `MoveTo`. The builders enforce this by
/// panicking, and [`Path::try_from_elements`] reports it as an error.
///
/// Every point that enters the path, or is moved by a transform, is snapped
/// to the path's [`Grid`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    kinds: Vec<PathElementType>,
    points: Vec<Point>,
    winding_rule: PathWindingRule,
    #[cfg_attr(feature = "serde", serde(default))]
    grid: Grid,
}

impl Path {
    /// Create a new, empty path with the non-zero winding rule.
    #[inline]
    pub fn new() -> Path {
        Path::default()
    }

    /// Create a new, empty path with the given winding rule.
    #[inline]
    pub fn with_winding_rule(winding_rule: PathWindingRule) -> Path {
        Path {
            winding_rule,
            ..Path::default()
        }
    }

    /// Create a new, empty path whose points are kept on `grid`.
    #[inline]
    pub fn with_grid(winding_rule: PathWindingRule, grid: Grid) -> Path {
        Path {
            winding_rule,
            grid,
            ..Path::default()
        }
    }

    /// Build a path from a sequence of elements.
    ///
    /// Only the end points and control points of the elements are used; the
    /// `from` points are implied by the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::MissingMoveTo`] if the sequence is not empty and
    /// does not begin with a `MoveTo`.
    pub fn try_from_elements(
        elements: impl IntoIterator<Item = PathElement>,
    ) -> Result<Path, GeomError> {
        let mut elements = elements.into_iter().peekable();
        let mut path = Path::new();
        match elements.peek() {
            None | Some(PathElement::MoveTo { .. }) => {}
            Some(_) => return Err(GeomError::MissingMoveTo),
        }
        path.extend(elements);
        Ok(path)
    }

    /// The winding rule.
    #[inline]
    pub fn winding_rule(&self) -> PathWindingRule {
        self.winding_rule
    }

    /// Change the winding rule.
    #[inline]
    pub fn set_winding_rule(&mut self, winding_rule: PathWindingRule) {
        self.winding_rule = winding_rule;
    }

    /// The grid the points are kept on.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Change the grid, snapping the stored points to it.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.snap_all();
    }

    fn snap_all(&mut self) {
        if self.grid != Grid::Double {
            for p in &mut self.points {
                *p = self.grid.snap(*p);
            }
        }
    }

    /// Start a new sub-path at `p`.
    ///
    /// A move directly following another move replaces it.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        let p = self.grid.snap(p.into());
        if self.kinds.last() == Some(&PathElementType::MoveTo) {
            if let Some(last) = self.points.last_mut() {
                *last = p;
                return;
            }
        }
        self.kinds.push(PathElementType::MoveTo);
        self.points.push(p);
    }

    /// Push a line from the current point to `p`.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.require_move();
        self.kinds.push(PathElementType::LineTo);
        self.points.push(self.grid.snap(p.into()));
    }

    /// Push a quadratic Bézier curve from the current point to `p2`.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty.
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) {
        self.require_move();
        self.kinds.push(PathElementType::QuadTo);
        let g = self.grid;
        self.points.extend([g.snap(p1.into()), g.snap(p2.into())]);
    }

    /// Push a cubic Bézier curve from the current point to `p3`.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty.
    pub fn curve_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, p3: impl Into<Point>) {
        self.require_move();
        self.kinds.push(PathElementType::CurveTo);
        let g = self.grid;
        self.points
            .extend([g.snap(p1.into()), g.snap(p2.into()), g.snap(p3.into())]);
    }

    /// Close the current sub-path.
    ///
    /// Does nothing right after a move or a close.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty.
    pub fn close_path(&mut self) {
        match self.kinds.last() {
            Some(PathElementType::MoveTo | PathElementType::Close) => {}
            _ => {
                self.require_move();
                self.kinds.push(PathElementType::Close);
            }
        }
    }

    /// Push an element, dispatching to the matching builder.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty and `el` is not a `MoveTo`.
    pub fn push(&mut self, el: PathElement) {
        match el {
            PathElement::MoveTo { to } => self.move_to(to),
            PathElement::LineTo { to, .. } => self.line_to(to),
            PathElement::QuadTo { ctrl, to, .. } => self.quad_to(ctrl, to),
            PathElement::CurveTo {
                ctrl1, ctrl2, to, ..
            } => self.curve_to(ctrl1, ctrl2, to),
            PathElement::Close { .. } => self.close_path(),
        }
    }

    /// Append the elements of `iter`.
    ///
    /// When `connect` is set and this path is not empty, a leading move of
    /// `iter` becomes a line, joining the two paths.
    pub fn append<I: PathIterator>(&mut self, iter: I, connect: bool) {
        let mut first = connect && !self.is_empty();
        for el in iter {
            match el {
                PathElement::MoveTo { to } if first => self.line_to(to),
                el => self.push(el),
            }
            first = false;
        }
    }

    fn require_move(&self) {
        if self.kinds.is_empty() {
            panic!("missing initial moveto in path definition");
        }
    }

    /// Remove the last element.
    pub fn remove_last(&mut self) {
        if let Some(kind) = self.kinds.pop() {
            let n = self.points.len() - kind.point_count();
            self.points.truncate(n);
        }
    }

    /// Remove the first element that has `p` among its points.
    ///
    /// Returns whether an element was removed. Removing the move of the first
    /// sub-path leaves a path that no longer starts with a move.
    pub fn remove(&mut self, p: Point) -> bool {
        let mut start = 0;
        for (ix, kind) in self.kinds.iter().enumerate() {
            let end = start + kind.point_count();
            if self.points[start..end].contains(&p) {
                self.kinds.remove(ix);
                self.points.drain(start..end);
                return true;
            }
            start = end;
        }
        false
    }

    /// Replace the last stored point.
    ///
    /// # Panics
    ///
    /// Panics if the path has no points.
    pub fn set_last_point(&mut self, p: impl Into<Point>) {
        if self.try_set_last_point(p).is_err() {
            panic!("cannot set the last point of an empty path");
        }
    }

    /// Replace the last stored point.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::EmptyPath`] if the path has no points.
    pub fn try_set_last_point(&mut self, p: impl Into<Point>) -> Result<(), GeomError> {
        let grid = self.grid;
        let last = self.points.last_mut().ok_or(GeomError::EmptyPath)?;
        *last = grid.snap(p.into());
        Ok(())
    }

    /// Remove all elements. The winding rule and the grid are kept.
    pub fn clear(&mut self) {
        self.kinds.clear();
        self.points.clear();
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Is there no element at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// The point a new line would start from.
    ///
    /// After a close this is the start of the closed sub-path.
    pub fn current_point(&self) -> Option<Point> {
        self.iter().last().map(|el| el.end())
    }

    /// Is `p` one of the stored points, control points included?
    pub fn contains_control_point(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    /// An iterator over the elements.
    #[inline]
    pub fn iter(&self) -> PathIter<'_> {
        PathIter {
            path: self,
            kind_ix: 0,
            point_ix: 0,
            current: Point::ZERO,
            mov: Point::ZERO,
            flags: self.flags(),
        }
    }

    fn flags(&self) -> PathFlags {
        PathFlags::scan(self.kinds.iter().copied())
    }

    /// A single move followed only by lines.
    pub fn is_polyline(&self) -> bool {
        self.flags().polyline
    }

    /// Does the path contain curves?
    pub fn is_curved(&self) -> bool {
        self.kinds
            .iter()
            .any(|k| matches!(k, PathElementType::QuadTo | PathElementType::CurveTo))
    }

    /// More than one sub-path.
    pub fn is_multi_parts(&self) -> bool {
        self.flags().multi_parts
    }

    /// A single closed sub-path.
    pub fn is_polygon(&self) -> bool {
        self.flags().polygon
    }

    /// The bounding box of every stored point, control points included.
    ///
    /// An empty path yields [`Rect::ZERO`].
    pub fn control_point_bounding_box(&self) -> Rect {
        bounds_of(self.points.iter().copied())
    }

    /// The length of the flattened path, closing edges included.
    pub fn length(&self) -> f64 {
        FlatteningPathIter::new(self.iter(), SPLINE_APPROXIMATION_RATIO)
            .map(|el| match el {
                PathElement::LineTo { from, to } | PathElement::Close { from, to } => {
                    from.distance(to)
                }
                _ => 0.0,
            })
            .sum()
    }

    /// Apply an affine transform to every point in place.
    pub fn transform(&mut self, affine: Affine) {
        for p in &mut self.points {
            *p = affine * *p;
        }
        self.snap_all();
    }
}

fn bounds_of(mut points: impl Iterator<Item = Point>) -> Rect {
    let Some(first) = points.next() else {
        return Rect::ZERO;
    };
    points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
}

impl Extend<PathElement> for Path {
    /// # Panics
    ///
    /// Panics if the path is empty and the first element is not a `MoveTo`.
    fn extend<T: IntoIterator<Item = PathElement>>(&mut self, iter: T) {
        for el in iter {
            self.push(el);
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = PathElement;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> PathIter<'a> {
        self.iter()
    }
}

/// The cursor over the elements of a [`Path`].
#[derive(Debug)]
pub struct PathIter<'a> {
    path: &'a Path,
    kind_ix: usize,
    point_ix: usize,
    current: Point,
    mov: Point,
    flags: PathFlags,
}

impl Iterator for PathIter<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let kind = *self.path.kinds.get(self.kind_ix)?;
        self.kind_ix += 1;
        let pts = &self.path.points[self.point_ix..self.point_ix + kind.point_count()];
        self.point_ix += pts.len();
        let from = self.current;
        let el = match kind {
            PathElementType::MoveTo => {
                self.mov = pts[0];
                PathElement::MoveTo { to: pts[0] }
            }
            PathElementType::LineTo => PathElement::LineTo { from, to: pts[0] },
            PathElementType::QuadTo => PathElement::QuadTo {
                from,
                ctrl: pts[0],
                to: pts[1],
            },
            PathElementType::CurveTo => PathElement::CurveTo {
                from,
                ctrl1: pts[0],
                ctrl2: pts[1],
                to: pts[2],
            },
            PathElementType::Close => PathElement::Close { from, to: self.mov },
        };
        self.current = el.end();
        Some(el)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.path.kinds.len() - self.kind_ix;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PathIter<'_> {}

impl PathIterator for PathIter<'_> {
    #[inline]
    fn has_next(&self) -> bool {
        self.kind_ix < self.path.kinds.len()
    }

    #[inline]
    fn winding_rule(&self) -> PathWindingRule {
        self.path.winding_rule
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
        self.path.iter()
    }
}

impl Shape for Path {
    type PathIter<'iter> = PathIter<'iter>;

    #[inline]
    fn path_iter(&self) -> PathIter<'_> {
        self.iter()
    }

    /// The bounding box of the flattened path. Control points outside the
    /// curves do not count.
    fn bounding_box(&self) -> Rect {
        bounds_of(
            FlatteningPathIter::new(self.iter(), SPLINE_APPROXIMATION_RATIO).map(|el| el.end()),
        )
    }

    fn to_path(&self) -> Path {
        self.clone()
    }

    fn visit_parts(&self, f: &mut dyn FnMut(ShapePart<'_>) -> bool) -> bool {
        f(ShapePart::Path(Cow::Borrowed(self)))
    }
}

impl Translate for Path {
    fn translate(&mut self, v: Vec2) {
        for p in &mut self.points {
            *p += v;
        }
        self.snap_all();
    }
}

/// The point of the path nearest to `pt`.
///
/// Curves are flattened. A point inside the path, by its winding rule, is its
/// own closest point. An empty path yields a point at infinity.
pub fn path_closest_point<I: PathIterator>(iter: I, pt: Point) -> Point {
    if path_contains_point(iter.restart_iterations(), pt) {
        return pt;
    }
    let mut best = Point::new(f64::INFINITY, f64::INFINITY);
    let mut best_d2 = f64::INFINITY;
    for el in FlatteningPathIter::new(iter, SPLINE_APPROXIMATION_RATIO) {
        let candidate = match el {
            PathElement::LineTo { from, to } | PathElement::Close { from, to } => {
                closest_point_segment_point(Segment::new(from, to), pt)
            }
            el => el.end(),
        };
        let d2 = candidate.distance_squared(pt);
        if d2 < best_d2 {
            best = candidate;
            best_d2 = d2;
        }
    }
    best
}

/// The point of the path farthest from `pt`.
///
/// Curves are flattened. An empty path yields a point at infinity.
pub fn path_farthest_point<I: PathIterator>(iter: I, pt: Point) -> Point {
    let mut best = Point::new(f64::INFINITY, f64::INFINITY);
    let mut best_d2 = -1.0;
    for el in FlatteningPathIter::new(iter, SPLINE_APPROXIMATION_RATIO) {
        let candidate = match el {
            PathElement::LineTo { from, to } | PathElement::Close { from, to } => {
                farthest_point_segment_point(Segment::new(from, to), pt)
            }
            el => el.end(),
        };
        let d2 = candidate.distance_squared(pt);
        if d2 > best_d2 {
            best = candidate;
            best_d2 = d2;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{
        path_closest_point, path_farthest_point, Affine, GeomError, Grid, Path, PathElement,
        PathIterator, PathWindingRule, Point, Rect, Shape, Translate, Vec2,
    };

    fn square() -> Path {
        let mut p = Path::new();
        p.move_to((0.0, 0.0));
        p.line_to((4.0, 0.0));
        p.line_to((4.0, 4.0));
        p.line_to((0.0, 4.0));
        p.close_path();
        p
    }

    #[test]
    fn square_containment() {
        let p = square();
        assert!(p.contains(Point::new(2.0, 2.0)));
        assert!(!p.contains(Point::new(5.0, 5.0)));
        // Right edge is outside, left edge inside; repeated calls agree.
        for _ in 0..3 {
            assert!(!p.contains(Point::new(4.0, 2.0)));
            assert!(p.contains(Point::new(0.0, 2.0)));
        }
        // Vertices count as inside.
        assert!(p.contains(Point::new(4.0, 4.0)));
    }

    #[test]
    fn builder_rules() {
        let mut p = Path::new();
        p.move_to((1.0, 1.0));
        p.move_to((2.0, 2.0));
        assert_eq!(p.len(), 1);
        p.close_path();
        assert_eq!(p.len(), 1);
        p.line_to((3.0, 2.0));
        p.close_path();
        p.close_path();
        assert_eq!(p.len(), 3);
        assert_eq!(p.current_point(), Some(Point::new(2.0, 2.0)));
        p.line_to((2.0, 5.0));
        let els: Vec<_> = p.iter().collect();
        assert_eq!(
            els[3],
            PathElement::LineTo {
                from: Point::new(2.0, 2.0),
                to: Point::new(2.0, 5.0)
            }
        );
    }

    #[test]
    #[should_panic(expected = "missing initial moveto")]
    fn line_without_move_panics() {
        Path::new().line_to((1.0, 1.0));
    }

    #[test]
    fn removal() {
        let mut p = square();
        assert!(p.remove(Point::new(4.0, 4.0)));
        assert!(!p.remove(Point::new(4.0, 4.0)));
        assert_eq!(p.len(), 4);
        p.remove_last();
        assert_eq!(p.current_point(), Some(Point::new(0.0, 4.0)));
        p.set_last_point((1.0, 5.0));
        assert_eq!(p.current_point(), Some(Point::new(1.0, 5.0)));
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.try_set_last_point((0.0, 0.0)), Err(GeomError::EmptyPath));
        p.remove_last();
        assert!(p.is_empty());
    }

    #[test]
    fn from_elements() {
        let p = square();
        let copy = Path::try_from_elements(p.iter()).unwrap();
        assert_eq!(copy, p);
        let bad = [PathElement::LineTo {
            from: Point::ZERO,
            to: Point::new(1.0, 0.0),
        }];
        assert_eq!(Path::try_from_elements(bad), Err(GeomError::MissingMoveTo));
        assert!(Path::try_from_elements([]).unwrap().is_empty());
    }

    #[test]
    fn append_connects() {
        let mut a = Path::new();
        a.move_to((0.0, 0.0));
        a.line_to((1.0, 0.0));
        let mut b = Path::new();
        b.move_to((2.0, 0.0));
        b.line_to((3.0, 0.0));
        let mut joined = a.clone();
        joined.append(b.iter(), true);
        assert!(joined.is_polyline());
        assert_eq!(joined.len(), 4);
        a.append(b.iter(), false);
        assert!(a.is_multi_parts());
    }

    #[test]
    fn flags_and_iter_flags() {
        let mut p = square();
        assert!(p.is_polygon() && !p.is_polyline() && !p.is_curved());
        let it = p.iter();
        assert!(it.is_polygon());
        p.move_to((10.0, 10.0));
        p.quad_to((11.0, 12.0), (12.0, 10.0));
        assert!(p.is_multi_parts() && p.is_curved() && !p.is_polygon());
    }

    #[test]
    fn bounding_boxes() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0));
        p.quad_to((2.0, 4.0), (4.0, 0.0));
        assert_eq!(p.control_point_bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        let bb = p.bounding_box();
        assert_eq!((bb.x0, bb.x1), (0.0, 4.0));
        assert!(bb.y1 > 1.8 && bb.y1 <= 2.0, "{bb:?}");
        assert_eq!(Path::new().bounding_box(), Rect::ZERO);
    }

    #[test]
    fn length_and_transform() {
        let mut p = square();
        assert_eq!(p.length(), 16.0);
        p.transform(Affine::scale(2.0));
        assert_eq!(p.length(), 32.0);
        p.translate(Vec2::new(1.0, 1.0));
        assert_eq!(p.control_point_bounding_box(), Rect::new(1.0, 1.0, 9.0, 9.0));
    }

    #[test]
    fn closest_and_farthest() {
        let p = square();
        assert_eq!(path_closest_point(p.iter(), Point::new(2.0, 2.0)), Point::new(2.0, 2.0));
        assert_eq!(path_closest_point(p.iter(), Point::new(6.0, 2.0)), Point::new(4.0, 2.0));
        assert_eq!(path_farthest_point(p.iter(), Point::new(1.0, 1.0)), Point::new(4.0, 4.0));
        assert_eq!(p.distance(Point::new(7.0, 8.0)), 5.0);
        assert!(path_closest_point(Path::new().iter(), Point::ZERO).x.is_infinite());
    }

    #[test]
    fn integer_grid() {
        let mut p = Path::with_grid(PathWindingRule::NonZero, Grid::Integer);
        p.move_to((0.4, 0.6));
        p.quad_to((2.5, 3.7), (4.2, -0.2));
        p.close_path();
        assert_eq!(p.control_point_bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        p.set_last_point((1.4, 1.6));
        assert_eq!(p.current_point(), Some(Point::new(0.0, 1.0)));
        p.transform(Affine::scale(0.5));
        assert!(p.iter().all(|el| el.end() == el.end().round()));

        let mut q = square();
        q.translate(Vec2::new(0.25, 0.25));
        assert_eq!(q.grid(), Grid::Double);
        q.set_grid(Grid::Integer);
        assert_eq!(q.control_point_bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        q.clear();
        assert_eq!(q.grid(), Grid::Integer);
    }

    #[test]
    fn even_odd_hole() {
        let mut p = Path::with_winding_rule(PathWindingRule::EvenOdd);
        p.extend(square().iter());
        p.move_to((1.0, 1.0));
        p.line_to((3.0, 1.0));
        p.line_to((3.0, 3.0));
        p.line_to((1.0, 3.0));
        p.close_path();
        assert!(!p.contains(Point::new(2.0, 2.0)));
        assert!(p.contains(Point::new(0.5, 2.0)));
        p.set_winding_rule(PathWindingRule::NonZero);
        assert!(p.contains(Point::new(2.0, 2.0)));
    }
}
