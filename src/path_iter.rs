// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path iterator protocol.

use crate::{Affine, GeomError, PathElement, PathElementType};

/// Policy for turning a crossing count into an inside/outside answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathWindingRule {
    /// Any nonzero crossing count is inside.
    #[default]
    NonZero,
    /// Only odd crossing counts are inside.
    EvenOdd,
}

impl PathWindingRule {
    /// Mask applied to the crossing count of a single ray.
    ///
    /// `count & mask != 0` means inside.
    #[inline]
    pub const fn point_mask(self) -> i32 {
        match self {
            Self::NonZero => -1,
            Self::EvenOdd => 1,
        }
    }

    /// Mask applied to the crossing count of an area target.
    ///
    /// Area targets (rectangles, circles, segments) count two rays, one at
    /// each end of their vertical extent, so even-odd tests bit 1.
    #[inline]
    pub const fn area_mask(self) -> i32 {
        match self {
            Self::NonZero => -1,
            Self::EvenOdd => 2,
        }
    }
}

/// A single-pass cursor over the elements of a path.
///
/// The sequence is always finite. A second traversal is obtained with
/// [`restart_iterations`](PathIterator::restart_iterations), which builds an
/// independent cursor and leaves `self` untouched.
///
/// The first element of a non-empty path must be a
/// [`MoveTo`](PathElement::MoveTo). Consumers treat anything else as a
/// programming error.
pub trait PathIterator: Iterator<Item = PathElement> {
    /// Is there at least one more element?
    fn has_next(&self) -> bool;

    /// The next element.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NoSuchElement`] when the iterator is exhausted.
    fn next_element(&mut self) -> Result<PathElement, GeomError> {
        self.next().ok_or(GeomError::NoSuchElement)
    }

    /// The winding rule of the underlying path.
    fn winding_rule(&self) -> PathWindingRule;

    /// One move followed only by at least one line.
    fn is_polyline(&self) -> bool;

    /// Does the path contain quadratic or cubic curves?
    fn is_curved(&self) -> bool;

    /// One sub-path that ends with a close.
    fn is_polygon(&self) -> bool;

    /// More than one sub-path.
    fn is_multi_parts(&self) -> bool;

    /// A fresh cursor positioned at the first element.
    #[must_use]
    fn restart_iterations(&self) -> Self
    where
        Self: Sized;
}

/// Classification flags of a path, computed once from its element kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathFlags {
    /// See [`PathIterator::is_polyline`].
    pub polyline: bool,
    /// See [`PathIterator::is_curved`].
    pub curved: bool,
    /// See [`PathIterator::is_polygon`].
    pub polygon: bool,
    /// See [`PathIterator::is_multi_parts`].
    pub multi_parts: bool,
}

impl PathFlags {
    /// Scan a sequence of element kinds.
    pub fn scan(kinds: impl IntoIterator<Item = PathElementType>) -> PathFlags {
        let mut moves = 0_usize;
        let mut lines = 0_usize;
        let mut others = 0_usize;
        let mut curved = false;
        let mut first = None;
        let mut last = None;
        for kind in kinds {
            if first.is_none() {
                first = Some(kind);
            }
            last = Some(kind);
            match kind {
                PathElementType::MoveTo => moves += 1,
                PathElementType::LineTo => lines += 1,
                PathElementType::QuadTo | PathElementType::CurveTo => {
                    curved = true;
                    others += 1;
                }
                PathElementType::Close => others += 1,
            }
        }
        let starts_with_move = first == Some(PathElementType::MoveTo);
        PathFlags {
            polyline: starts_with_move && moves == 1 && lines > 0 && others == 0,
            curved,
            polygon: starts_with_move && moves == 1 && last == Some(PathElementType::Close),
            multi_parts: moves > 1,
        }
    }
}

/// A path iterator that maps every emitted coordinate through an
/// [`Affine`].
///
/// The transform is applied lazily, one element at a time.
#[derive(Debug)]
pub struct TransformedPathIter<I> {
    inner: I,
    transform: Affine,
}

impl<I: PathIterator> TransformedPathIter<I> {
    /// Wrap `inner`, applying `transform` to everything it yields.
    pub fn new(inner: I, transform: Affine) -> Self {
        TransformedPathIter { inner, transform }
    }

    /// The transform being applied.
    pub fn transform(&self) -> Affine {
        self.transform
    }
}

impl<I: PathIterator> Iterator for TransformedPathIter<I> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        self.inner.next().map(|el| el.transform(self.transform))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: PathIterator> PathIterator for TransformedPathIter<I> {
    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn winding_rule(&self) -> PathWindingRule {
        self.inner.winding_rule()
    }

    fn is_polyline(&self) -> bool {
        self.inner.is_polyline()
    }

    fn is_curved(&self) -> bool {
        self.inner.is_curved()
    }

    fn is_polygon(&self) -> bool {
        self.inner.is_polygon()
    }

    fn is_multi_parts(&self) -> bool {
        self.inner.is_multi_parts()
    }

    fn restart_iterations(&self) -> Self {
        TransformedPathIter::new(self.inner.restart_iterations(), self.transform)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{
        Affine, GeomError, Path, PathElement, PathElementType, PathFlags, PathIterator,
        PathWindingRule, Point, TransformedPathIter,
    };

    #[test]
    fn masks() {
        assert_eq!(PathWindingRule::NonZero.point_mask(), -1);
        assert_eq!(PathWindingRule::EvenOdd.point_mask(), 1);
        assert_eq!(PathWindingRule::EvenOdd.area_mask(), 2);
        assert_eq!(PathWindingRule::default(), PathWindingRule::NonZero);
    }

    #[test]
    fn flags() {
        use PathElementType::*;
        let polyline = PathFlags::scan([MoveTo, LineTo, LineTo]);
        assert!(polyline.polyline && !polyline.polygon && !polyline.curved);

        let polygon = PathFlags::scan([MoveTo, LineTo, QuadTo, Close]);
        assert!(!polygon.polyline && polygon.polygon && polygon.curved);

        let multi = PathFlags::scan([MoveTo, LineTo, Close, MoveTo, LineTo]);
        assert!(multi.multi_parts && !multi.polygon);

        assert!(!PathFlags::scan([MoveTo]).polyline);
    }

    #[test]
    fn exhausted_iterator_reports_error() {
        let mut path = Path::new();
        path.move_to((1.0, 1.0));
        let mut it = path.iter();
        assert!(it.has_next());
        assert!(it.next_element().is_ok());
        assert!(!it.has_next());
        assert_eq!(it.next_element(), Err(GeomError::NoSuchElement));
    }

    #[test]
    fn transformed_iter_is_lazy_and_restartable() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        let mut it = TransformedPathIter::new(path.iter(), Affine::translate((2.0, 3.0)));
        let first = it.next();
        assert_eq!(first, Some(PathElement::MoveTo { to: Point::new(2.0, 3.0) }));

        let again: Vec<_> = it.restart_iterations().collect();
        assert_eq!(again.len(), 2);
        assert_eq!(
            again[1],
            PathElement::LineTo {
                from: Point::new(2.0, 3.0),
                to: Point::new(3.0, 3.0),
            }
        );
        // The original cursor was not rewound.
        assert_eq!(it.count(), 1);
    }
}
