// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path elements, as produced by a [`PathIterator`](crate::PathIterator).

use crate::{Affine, Point};

/// The kind of a [`PathElement`], without its coordinates.
///
/// This is also the tag stored by [`Path`](crate::Path) next to its
/// coordinate buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathElementType {
    /// Start a new sub-path.
    MoveTo,
    /// A straight line.
    LineTo,
    /// A quadratic Bézier curve.
    QuadTo,
    /// A cubic Bézier curve.
    CurveTo,
    /// Close the current sub-path.
    Close,
}

impl PathElementType {
    /// The number of points stored for an element of this kind.
    #[inline]
    pub const fn point_count(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::QuadTo => 2,
            Self::CurveTo => 3,
            Self::Close => 0,
        }
    }
}

/// One element of a path.
///
/// Unlike the storage in [`Path`](crate::Path), every drawing element
/// carries its start point so that consumers never need to track the
/// current point themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathElement {
    /// Move directly to the point without drawing anything, starting a new
    /// sub-path.
    MoveTo {
        /// The new current point.
        to: Point,
    },
    /// Draw a line from the current location to the point.
    LineTo {
        /// The start of the line.
        from: Point,
        /// The end of the line.
        to: Point,
    },
    /// Draw a quadratic Bézier.
    QuadTo {
        /// The start of the curve.
        from: Point,
        /// The control point.
        ctrl: Point,
        /// The end of the curve.
        to: Point,
    },
    /// Draw a cubic Bézier.
    CurveTo {
        /// The start of the curve.
        from: Point,
        /// The first control point.
        ctrl1: Point,
        /// The second control point.
        ctrl2: Point,
        /// The end of the curve.
        to: Point,
    },
    /// Close the sub-path, drawing back to its starting point.
    Close {
        /// The current point before closing.
        from: Point,
        /// The start of the sub-path.
        to: Point,
    },
}

impl PathElement {
    /// The kind of this element.
    #[inline]
    pub fn kind(&self) -> PathElementType {
        match self {
            Self::MoveTo { .. } => PathElementType::MoveTo,
            Self::LineTo { .. } => PathElementType::LineTo,
            Self::QuadTo { .. } => PathElementType::QuadTo,
            Self::CurveTo { .. } => PathElementType::CurveTo,
            Self::Close { .. } => PathElementType::Close,
        }
    }

    /// The point this element starts from.
    ///
    /// For a move this is the target point.
    #[inline]
    pub fn start(&self) -> Point {
        match *self {
            Self::MoveTo { to } => to,
            Self::LineTo { from, .. }
            | Self::QuadTo { from, .. }
            | Self::CurveTo { from, .. }
            | Self::Close { from, .. } => from,
        }
    }

    /// The point this element ends at.
    #[inline]
    pub fn end(&self) -> Point {
        match *self {
            Self::MoveTo { to }
            | Self::LineTo { to, .. }
            | Self::QuadTo { to, .. }
            | Self::CurveTo { to, .. }
            | Self::Close { to, .. } => to,
        }
    }

    /// Does this element draw something?
    ///
    /// Moves never draw, and neither do elements whose points all
    /// coincide.
    pub fn is_drawable(&self) -> bool {
        match *self {
            Self::MoveTo { .. } => false,
            Self::LineTo { from, to } | Self::Close { from, to } => from != to,
            Self::QuadTo { from, ctrl, to } => from != ctrl || ctrl != to,
            Self::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => from != ctrl1 || ctrl1 != ctrl2 || ctrl2 != to,
        }
    }

    /// Apply an affine map to every point of this element.
    #[must_use]
    pub fn transform(self, affine: Affine) -> PathElement {
        let t = |p: Point| affine.transform_point(p);
        match self {
            Self::MoveTo { to } => Self::MoveTo { to: t(to) },
            Self::LineTo { from, to } => Self::LineTo {
                from: t(from),
                to: t(to),
            },
            Self::QuadTo { from, ctrl, to } => Self::QuadTo {
                from: t(from),
                ctrl: t(ctrl),
                to: t(to),
            },
            Self::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Self::CurveTo {
                from: t(from),
                ctrl1: t(ctrl1),
                ctrl2: t(ctrl2),
                to: t(to),
            },
            Self::Close { from, to } => Self::Close {
                from: t(from),
                to: t(to),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, PathElement, PathElementType, Point};

    #[test]
    fn element_endpoints() {
        let el = PathElement::QuadTo {
            from: Point::new(0., 0.),
            ctrl: Point::new(2., 4.),
            to: Point::new(4., 0.),
        };
        assert_eq!(el.kind(), PathElementType::QuadTo);
        assert_eq!(el.start(), Point::new(0., 0.));
        assert_eq!(el.end(), Point::new(4., 0.));
        assert!(el.is_drawable());

        let moved = el.transform(Affine::translate((1.0, 1.0)));
        assert_eq!(moved.end(), Point::new(5., 1.));
    }

    #[test]
    fn degenerate_elements_do_not_draw() {
        let p = Point::new(1., 1.);
        assert!(!PathElement::MoveTo { to: p }.is_drawable());
        assert!(!PathElement::LineTo { from: p, to: p }.is_drawable());
        assert!(!PathElement::Close { from: p, to: p }.is_drawable());
    }
}
