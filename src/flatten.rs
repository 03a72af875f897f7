// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening of curved paths into polylines.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::{
    distance_squared_segment_point, PathElement, PathIterator, PathWindingRule, Point, Segment,
};

/// The default maximum subdivision depth of a [`FlatteningPathIter`].
pub const DEFAULT_FLATTENING_LIMIT: usize = 10;

/// The largest subdivision depth a [`FlatteningPathIter`] accepts.
pub const MAX_LIMIT: usize = 16;

/// Number of points the subdivision buffer grows by when full.
const GROW_SIZE: usize = 24;

/// A path iterator that replaces quadratic and cubic curves by line
/// segments.
///
/// Each curve is split in half with de Casteljau's algorithm until all of
/// its control points lie within `flatness` of the chord, or until the
/// subdivision depth reaches the limit. A curve that is still not flat at
/// the limit is emitted as is.
///
/// Pending halves live on a single stack of points. Each pending curve is
/// stored back to front and shares its first point with the end of the
/// curve above it, so a curve of degree `n` costs `n` points. The depth of
/// each pending curve is kept on a parallel stack.
///
/// # Examples
///
/// ```
/// use geokern::{FlatteningPathIter, Path, PathElement, PathIterator};
///
/// let mut path = Path::new();
/// path.move_to((0.0, 0.0));
/// path.quad_to((2.0, 4.0), (4.0, 0.0));
///
/// let flat = FlatteningPathIter::new(path.iter(), 0.01);
/// assert!(!flat.is_curved());
/// assert!(flat.skip(1).all(|el| matches!(el, PathElement::LineTo { .. })));
/// ```
#[derive(Debug)]
pub struct FlatteningPathIter<I> {
    inner: I,
    flatness: f64,
    sq_flatness: f64,
    limit: usize,
    hold: Vec<Point>,
    levels: ArrayVec<u8, { MAX_LIMIT + 1 }>,
    degree: usize,
    current: Point,
    move_point: Point,
}

impl<I: PathIterator> FlatteningPathIter<I> {
    /// Flatten `inner` to within `flatness`, with the default depth limit.
    ///
    /// # Panics
    ///
    /// Panics if `flatness` is not a finite positive number.
    pub fn new(inner: I, flatness: f64) -> Self {
        Self::with_limit(inner, flatness, DEFAULT_FLATTENING_LIMIT)
    }

    /// Flatten `inner` to within `flatness`, subdividing at most `limit`
    /// times. The limit is capped at [`MAX_LIMIT`].
    ///
    /// # Panics
    ///
    /// Panics if `flatness` is not a finite positive number.
    pub fn with_limit(inner: I, flatness: f64, limit: usize) -> Self {
        assert!(
            flatness.is_finite() && flatness > 0.0,
            "flatness must be a finite positive number, got {flatness}"
        );
        FlatteningPathIter {
            inner,
            flatness,
            sq_flatness: flatness * flatness,
            limit: limit.min(MAX_LIMIT),
            hold: Vec::new(),
            levels: ArrayVec::new(),
            degree: 0,
            current: Point::ZERO,
            move_point: Point::ZERO,
        }
    }

    /// The flatness this iterator was built with.
    #[inline]
    pub fn flatness(&self) -> f64 {
        self.flatness
    }

    /// The subdivision depth limit.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn push(&mut self, p: Point) {
        if self.hold.len() == self.hold.capacity() {
            self.hold.reserve_exact(GROW_SIZE);
        }
        self.hold.push(p);
    }

    /// Start refining a curve given as its control points after the
    /// current point.
    fn begin_curve(&mut self, ctrl: &[Point]) {
        self.degree = ctrl.len();
        self.hold.clear();
        self.levels.clear();
        for &p in ctrl.iter().rev() {
            self.push(p);
        }
        self.push(self.current);
        self.levels.push(0);
    }

    /// Squared distance from the farthest control point of the top curve to
    /// its chord.
    fn top_flatness(&self, base: usize) -> f64 {
        let n = self.degree;
        let chord = Segment::new(self.hold[base + n], self.hold[base]);
        self.hold[base + 1..base + n]
            .iter()
            .map(|&p| distance_squared_segment_point(chord, p))
            .fold(0.0, f64::max)
    }

    /// Replace the top curve by its two halves.
    fn subdivide_top(&mut self, base: usize, level: u8) {
        let n = self.degree;
        let mut c = [Point::ZERO; 4];
        for (i, slot) in c.iter_mut().take(n + 1).enumerate() {
            *slot = self.hold[base + n - i];
        }
        self.hold.truncate(base);
        if n == 3 {
            let a = c[0].midpoint(c[1]);
            let b = c[1].midpoint(c[2]);
            let e = c[2].midpoint(c[3]);
            let d = a.midpoint(b);
            let f = b.midpoint(e);
            let m = d.midpoint(f);
            for p in [c[3], e, f, m, d, a, c[0]] {
                self.push(p);
            }
        } else {
            let a = c[0].midpoint(c[1]);
            let b = c[1].midpoint(c[2]);
            let m = a.midpoint(b);
            for p in [c[2], b, m, a, c[0]] {
                self.push(p);
            }
        }
        self.levels.pop();
        self.levels.push(level + 1);
        self.levels.push(level + 1);
    }

    /// Emit the next line of the curve being refined, if there is one.
    fn next_flattened(&mut self) -> Option<PathElement> {
        loop {
            let &level = self.levels.last()?;
            let n = self.degree;
            let base = self.hold.len() - 1 - n;
            let flat = self.top_flatness(base);
            if usize::from(level) < self.limit && flat >= self.sq_flatness {
                self.subdivide_top(base, level);
                continue;
            }
            if flat >= self.sq_flatness {
                log::trace!(
                    "curve accepted at subdivision depth {level} with squared flatness {flat}"
                );
            }
            let to = self.hold[base];
            self.hold.truncate(base + 1);
            self.levels.pop();
            if self.levels.is_empty() {
                self.hold.clear();
            }
            let from = self.current;
            self.current = to;
            return Some(PathElement::LineTo { from, to });
        }
    }
}

impl<I: PathIterator> Iterator for FlatteningPathIter<I> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        if let Some(line) = self.next_flattened() {
            return Some(line);
        }
        match self.inner.next()? {
            PathElement::MoveTo { to } => {
                self.current = to;
                self.move_point = to;
                Some(PathElement::MoveTo { to })
            }
            PathElement::LineTo { to, .. } => {
                let from = self.current;
                self.current = to;
                Some(PathElement::LineTo { from, to })
            }
            PathElement::QuadTo { ctrl, to, .. } => {
                self.begin_curve(&[ctrl, to]);
                self.next_flattened()
            }
            PathElement::CurveTo {
                ctrl1, ctrl2, to, ..
            } => {
                self.begin_curve(&[ctrl1, ctrl2, to]);
                self.next_flattened()
            }
            PathElement::Close { .. } => {
                let from = self.current;
                self.current = self.move_point;
                Some(PathElement::Close {
                    from,
                    to: self.move_point,
                })
            }
        }
    }
}

impl<I: PathIterator> PathIterator for FlatteningPathIter<I> {
    fn has_next(&self) -> bool {
        !self.levels.is_empty() || self.inner.has_next()
    }

    fn winding_rule(&self) -> PathWindingRule {
        self.inner.winding_rule()
    }

    fn is_polyline(&self) -> bool {
        self.inner.is_polyline()
    }

    #[inline]
    fn is_curved(&self) -> bool {
        false
    }

    fn is_polygon(&self) -> bool {
        self.inner.is_polygon()
    }

    fn is_multi_parts(&self) -> bool {
        self.inner.is_multi_parts()
    }

    fn restart_iterations(&self) -> Self {
        FlatteningPathIter::with_limit(self.inner.restart_iterations(), self.flatness, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{
        distance_squared_segment_point, FlatteningPathIter, Path, PathElement, PathIterator,
        Point, Segment,
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn quad(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
        let mt = 1.0 - t;
        (p0.to_vec2() * (mt * mt) + p1.to_vec2() * (2.0 * mt * t) + p2.to_vec2() * (t * t))
            .to_point()
    }

    fn cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
        let mt = 1.0 - t;
        (p0.to_vec2() * (mt * mt * mt)
            + p1.to_vec2() * (3.0 * mt * mt * t)
            + p2.to_vec2() * (3.0 * mt * t * t)
            + p3.to_vec2() * (t * t * t))
            .to_point()
    }

    fn lines(flat: impl Iterator<Item = PathElement>) -> Vec<Segment> {
        flat.filter_map(|el| match el {
            PathElement::LineTo { from, to } => Some(Segment::new(from, to)),
            _ => None,
        })
        .collect()
    }

    /// Largest distance from a sampled curve point to the polyline.
    fn deviation(segments: &[Segment], curve: impl Fn(f64) -> Point) -> f64 {
        (0..=1000)
            .map(|i| {
                let p = curve(f64::from(i) / 1000.0);
                segments
                    .iter()
                    .map(|s| distance_squared_segment_point(*s, p))
                    .fold(f64::INFINITY, f64::min)
                    .sqrt()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn quad_within_flatness() {
        let (p0, p1, p2) = (Point::new(0., 0.), Point::new(2., 4.), Point::new(4., 0.));
        let mut path = Path::new();
        path.move_to(p0);
        path.quad_to(p1, p2);
        let flat = FlatteningPathIter::new(path.iter(), 0.01);
        let segs = lines(flat);
        assert!(segs.len() > 1);
        assert_eq!(segs[0].p0, p0);
        assert_eq!(segs.last().unwrap().p1, p2);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].p1, pair[1].p0);
        }
        let dev = deviation(&segs, |t| quad(p0, p1, p2, t));
        assert!(dev <= 0.01, "deviation {dev}");
    }

    #[test]
    fn cubic_convergence() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut pt = || {
                Point::new(
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                )
            };
            let (p0, p1, p2, p3) = (pt(), pt(), pt(), pt());
            let mut path = Path::new();
            path.move_to(p0);
            path.curve_to(p1, p2, p3);
            let mut last_count = 0;
            for flatness in [4.0, 1.0, 0.25, 0.0625] {
                let segs = lines(FlatteningPathIter::with_limit(path.iter(), flatness, 16));
                let dev = deviation(&segs, |t| cubic(p0, p1, p2, p3, t));
                assert!(dev <= flatness + 1e-9, "deviation {dev} at {flatness}");
                // A smaller tolerance only ever refines the previous polyline.
                assert!(segs.len() >= last_count);
                last_count = segs.len();
            }
        }
    }

    #[test]
    fn depth_limit_is_respected() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        let segs = lines(FlatteningPathIter::with_limit(path.iter(), 1e-6, 3));
        assert_eq!(segs.len(), 8);
        let segs = lines(FlatteningPathIter::with_limit(path.iter(), 1e-6, 0));
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn lines_and_closes_pass_through() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.quad_to((1.0, 1.0), (2.0, 0.0));
        path.line_to((2.0, -1.0));
        path.close_path();
        let els: Vec<_> = FlatteningPathIter::new(path.iter(), 0.1).collect();
        let n = els.len();
        assert_eq!(
            els[n - 2],
            PathElement::LineTo {
                from: Point::new(2.0, 0.0),
                to: Point::new(2.0, -1.0),
            }
        );
        assert_eq!(
            els[n - 1],
            PathElement::Close {
                from: Point::new(2.0, -1.0),
                to: Point::new(0.0, 0.0),
            }
        );
    }

    #[test]
    fn restart_and_flags() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.curve_to((1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        let mut flat = FlatteningPathIter::new(path.iter(), 0.05);
        assert!(path.iter().is_curved());
        assert!(!flat.is_curved());
        assert!(flat.has_next());
        let first: Vec<_> = flat.by_ref().collect();
        assert!(!flat.has_next());
        let again: Vec<_> = flat.restart_iterations().collect();
        assert_eq!(first, again);
    }

    #[test]
    #[should_panic(expected = "flatness must be a finite positive number")]
    fn zero_flatness_panics() {
        let path = Path::new();
        drop(FlatteningPathIter::new(path.iter(), 0.0));
    }
}
