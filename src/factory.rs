// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Factories for geometric values.
//!
//! A factory decides the coordinate grid of everything it builds. The two
//! provided factories are immutable process-wide values: [`DEFAULT_FACTORY`]
//! keeps coordinates as they are, and [`INTEGER_FACTORY`] snaps them to the
//! nearest integer.
//!
//! Paths remember the [`Grid`] of the factory that built them, so points
//! added or moved later land on the same grid.

use crate::{
    Circle, Path, PathElement, PathIterator, PathWindingRule, Point, Rect, Segment, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Builds points, vectors, paths, boxes and segments on a coordinate grid.
pub trait GeomFactory {
    /// Move `p` onto the grid of this factory.
    fn snap(&self, p: Point) -> Point;

    /// The grid that paths built by this factory keep snapping to.
    fn grid(&self) -> Grid {
        Grid::Double
    }

    /// A new point.
    fn new_point(&self, x: f64, y: f64) -> Point {
        self.snap(Point::new(x, y))
    }

    /// A new vector.
    fn new_vector(&self, x: f64, y: f64) -> Vec2 {
        self.snap(Point::new(x, y)).to_vec2()
    }

    /// A new, empty path.
    fn new_path(&self, winding_rule: PathWindingRule) -> Path {
        Path::with_grid(winding_rule, self.grid())
    }

    /// A new box spanning two corners.
    fn new_box(&self, p0: Point, p1: Point) -> Rect {
        Rect::from_points(self.snap(p0), self.snap(p1))
    }

    /// A new segment.
    fn new_segment(&self, p0: Point, p1: Point) -> Segment {
        Segment::new(self.snap(p0), self.snap(p1))
    }

    /// A new circle. The radius is snapped like a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the snapped radius is negative.
    fn new_circle(&self, center: Point, radius: f64) -> Circle {
        Circle::new(self.snap(center), self.snap(Point::new(radius, 0.0)).x)
    }

    /// A new path holding the elements of `iter`, every point snapped.
    ///
    /// # Panics
    ///
    /// Panics if `iter` does not start with a move.
    fn path_from<I: PathIterator>(&self, iter: I) -> Path
    where
        Self: Sized,
    {
        let mut path = self.new_path(iter.winding_rule());
        path.extend(iter.map(|el| snap_element(self, el)));
        path
    }
}

fn snap_element<F: GeomFactory + ?Sized>(factory: &F, el: PathElement) -> PathElement {
    let s = |p| factory.snap(p);
    match el {
        PathElement::MoveTo { to } => PathElement::MoveTo { to: s(to) },
        PathElement::LineTo { from, to } => PathElement::LineTo {
            from: s(from),
            to: s(to),
        },
        PathElement::QuadTo { from, ctrl, to } => PathElement::QuadTo {
            from: s(from),
            ctrl: s(ctrl),
            to: s(to),
        },
        PathElement::CurveTo {
            from,
            ctrl1,
            ctrl2,
            to,
        } => PathElement::CurveTo {
            from: s(from),
            ctrl1: s(ctrl1),
            ctrl2: s(ctrl2),
            to: s(to),
        },
        PathElement::Close { from, to } => PathElement::Close {
            from: s(from),
            to: s(to),
        },
    }
}

/// The factory for double-precision coordinates. Nothing is snapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoubleFactory;

impl GeomFactory for DoubleFactory {
    #[inline(always)]
    fn snap(&self, p: Point) -> Point {
        p
    }

    #[inline]
    fn grid(&self) -> Grid {
        Grid::Double
    }
}

/// The factory for integer coordinates.
///
/// Every coordinate is rounded to the nearest integer, halves away from
/// zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegerFactory;

impl GeomFactory for IntegerFactory {
    #[inline]
    fn snap(&self, p: Point) -> Point {
        Point::new(p.x.round(), p.y.round())
    }

    #[inline]
    fn grid(&self) -> Grid {
        Grid::Integer
    }
}

/// The coordinate grid a [`Path`] keeps its points on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grid {
    /// Any double-precision coordinate.
    #[default]
    Double,
    /// Integer coordinates only.
    Integer,
}

impl GeomFactory for Grid {
    #[inline]
    fn snap(&self, p: Point) -> Point {
        match self {
            Grid::Double => DoubleFactory.snap(p),
            Grid::Integer => IntegerFactory.snap(p),
        }
    }

    #[inline]
    fn grid(&self) -> Grid {
        *self
    }
}

/// The shared double-precision factory.
pub static DEFAULT_FACTORY: DoubleFactory = DoubleFactory;

/// The shared integer factory.
pub static INTEGER_FACTORY: IntegerFactory = IntegerFactory;

#[cfg(test)]
mod tests {
    use crate::{
        Circle, GeomFactory, Grid, PathElement, PathWindingRule, Point, Rect, Segment, Shape,
        Translate, Vec2, DEFAULT_FACTORY, INTEGER_FACTORY,
    };

    #[test]
    fn double_factory_is_identity() {
        assert_eq!(DEFAULT_FACTORY.new_point(0.25, -1.5), Point::new(0.25, -1.5));
        assert_eq!(DEFAULT_FACTORY.new_vector(1.5, 2.0), Vec2::new(1.5, 2.0));
        let b = DEFAULT_FACTORY.new_box(Point::new(2.0, 0.5), Point::new(0.0, 1.0));
        assert_eq!(b, Rect::new(0.0, 0.5, 2.0, 1.0));
    }

    #[test]
    fn integer_factory_rounds() {
        assert_eq!(INTEGER_FACTORY.new_point(0.4, -1.5), Point::new(0.0, -2.0));
        assert_eq!(INTEGER_FACTORY.new_vector(2.5, 2.49), Vec2::new(3.0, 2.0));
        let s = INTEGER_FACTORY.new_segment(Point::new(0.6, 0.6), Point::new(3.2, 0.9));
        assert_eq!((s.p0, s.p1), (Point::new(1.0, 1.0), Point::new(3.0, 1.0)));
        let p = INTEGER_FACTORY.new_path(PathWindingRule::EvenOdd);
        assert!(p.is_empty());
        assert_eq!(p.winding_rule(), PathWindingRule::EvenOdd);
        assert_eq!(p.grid(), Grid::Integer);
        assert_eq!(
            INTEGER_FACTORY.new_circle(Point::new(0.4, 1.6), 2.5),
            Circle::new((0.0, 2.0), 3.0)
        );
    }

    #[test]
    fn integer_grid_shape_end_to_end() {
        let c = Circle::new((0.4, 0.2), 2.2);
        let mut path = c.to_path_with(&INTEGER_FACTORY);
        assert_eq!(path.grid(), Grid::Integer);
        assert_eq!(path.control_point_bounding_box(), Rect::new(-2.0, -2.0, 3.0, 2.0));

        // Later edits stay on the grid.
        path.translate(Vec2::new(0.4, 0.6));
        assert_eq!(path.control_point_bounding_box(), Rect::new(-2.0, -1.0, 3.0, 3.0));
        assert!(path.contains(Point::new(0.0, 1.0)));
        assert!(!path.contains(Point::new(3.5, 3.5)));

        path.move_to((10.2, 10.7));
        path.line_to((12.6, 10.1));
        assert!(path.iter().all(|el| el.end() == el.end().round()));
        assert_eq!(path.current_point(), Some(Point::new(13.0, 10.0)));
        assert!(path.intersects(&Segment::new((11.0, 9.0), (11.0, 12.0))));

        // The double grid leaves the same outline untouched.
        assert_eq!(c.to_path_with(&DEFAULT_FACTORY), c.to_path());
        assert_eq!(c.to_path().grid(), Grid::Double);
    }

    #[test]
    fn integer_path_from_circle() {
        let c = Circle::new((0.3, 0.0), 2.2);
        let path = INTEGER_FACTORY.path_from(c.path_iter());
        for el in path.iter() {
            if let PathElement::CurveTo { ctrl1, to, .. } = el {
                assert_eq!(ctrl1, ctrl1.round());
                assert_eq!(to, to.round());
            }
        }
        assert_eq!(DEFAULT_FACTORY.path_from(c.path_iter()), c.to_path());
    }
}
