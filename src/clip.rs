// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cohen–Sutherland clipping of segments against rectangles.

use core::ops::{BitAnd, BitOr};

use crate::{Point, Rect, Segment};

/// The Cohen–Sutherland region code of a point relative to a rectangle.
///
/// Each bit records one side of the rectangle the point lies outside of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutCode(u8);

impl OutCode {
    /// Inside, or on the border of, the rectangle.
    pub const INSIDE: OutCode = OutCode(0);
    /// Left of the rectangle (`x < x0`).
    pub const LEFT: OutCode = OutCode(1);
    /// Right of the rectangle (`x > x1`).
    pub const RIGHT: OutCode = OutCode(2);
    /// Below the rectangle (`y < y0`).
    pub const BOTTOM: OutCode = OutCode(4);
    /// Above the rectangle (`y > y1`).
    pub const TOP: OutCode = OutCode(8);

    /// Compute the code of `p` against `rect`.
    ///
    /// `rect` is expected to have non-negative width and height.
    pub fn of(rect: Rect, p: Point) -> OutCode {
        let mut code = 0;
        if p.x < rect.x0 {
            code |= Self::LEFT.0;
        } else if p.x > rect.x1 {
            code |= Self::RIGHT.0;
        }
        if p.y < rect.y0 {
            code |= Self::BOTTOM.0;
        } else if p.y > rect.y1 {
            code |= Self::TOP.0;
        }
        OutCode(code)
    }

    /// The raw bits.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// No bit set.
    #[inline]
    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// Are all the bits of `other` set in `self`?
    #[inline]
    pub fn contains(self, other: OutCode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OutCode {
    type Output = OutCode;

    #[inline]
    fn bitor(self, rhs: OutCode) -> OutCode {
        OutCode(self.0 | rhs.0)
    }
}

impl BitAnd for OutCode {
    type Output = OutCode;

    #[inline]
    fn bitand(self, rhs: OutCode) -> OutCode {
        OutCode(self.0 & rhs.0)
    }
}

/// Clip the segment `p0 → p1` to `rect`.
///
/// Returns the visible part, or `None` when the segment lies entirely
/// outside. Each round moves the outside endpoint onto the first violated
/// border, until both codes are zero or share a bit.
pub fn clip_segment(rect: Rect, mut p0: Point, mut p1: Point) -> Option<(Point, Point)> {
    let rect = rect.abs();
    let mut c0 = OutCode::of(rect, p0);
    let mut c1 = OutCode::of(rect, p1);
    loop {
        if (c0 | c1).is_inside() {
            return Some((p0, p1));
        }
        if !(c0 & c1).is_inside() {
            return None;
        }
        let code = if c0.is_inside() { c1 } else { c0 };
        // The endpoints straddle the chosen border, so the divisors are
        // never zero here.
        let p = if code.contains(OutCode::TOP) {
            Point::new(
                p0.x + (p1.x - p0.x) * (rect.y1 - p0.y) / (p1.y - p0.y),
                rect.y1,
            )
        } else if code.contains(OutCode::BOTTOM) {
            Point::new(
                p0.x + (p1.x - p0.x) * (rect.y0 - p0.y) / (p1.y - p0.y),
                rect.y0,
            )
        } else if code.contains(OutCode::RIGHT) {
            Point::new(
                rect.x1,
                p0.y + (p1.y - p0.y) * (rect.x1 - p0.x) / (p1.x - p0.x),
            )
        } else {
            Point::new(
                rect.x0,
                p0.y + (p1.y - p0.y) * (rect.x0 - p0.x) / (p1.x - p0.x),
            )
        };
        if code == c0 {
            p0 = p;
            c0 = OutCode::of(rect, p0);
        } else {
            p1 = p;
            c1 = OutCode::of(rect, p1);
        }
    }
}

/// Does `segment` touch `rect`?
///
/// A segment reduced to a single point never intersects, even when the
/// point lies inside the rectangle.
pub fn rect_intersects_segment(rect: Rect, segment: Segment) -> bool {
    match clip_segment(rect, segment.p0, segment.p1) {
        Some((a, b)) => a != b,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::{clip_segment, rect_intersects_segment, OutCode, Point, Rect, Segment};

    #[test]
    fn codes() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(OutCode::of(r, Point::new(5.0, 5.0)), OutCode::INSIDE);
        assert_eq!(OutCode::of(r, Point::new(10.0, 0.0)), OutCode::INSIDE);
        assert_eq!(
            OutCode::of(r, Point::new(-1.0, 11.0)),
            OutCode::LEFT | OutCode::TOP
        );
        assert_eq!(OutCode::of(r, Point::new(12.0, -3.0)).bits(), 2 | 4);
    }

    #[test]
    fn clipping() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (a, b) = clip_segment(r, Point::new(-5.0, 5.0), Point::new(15.0, 5.0)).unwrap();
        assert_eq!(a, Point::new(0.0, 5.0));
        assert_eq!(b, Point::new(10.0, 5.0));

        let (a, b) = clip_segment(r, Point::new(-5.0, -5.0), Point::new(5.0, 5.0)).unwrap();
        assert!((a - Point::new(0.0, 0.0)).hypot() < 1e-12);
        assert_eq!(b, Point::new(5.0, 5.0));

        // Passes outside a corner.
        assert!(clip_segment(r, Point::new(-5.0, 8.0), Point::new(2.0, 15.0)).is_none());
        // Both endpoints share an outside region.
        assert!(clip_segment(r, Point::new(-5.0, 1.0), Point::new(-2.0, 8.0)).is_none());
    }

    #[test]
    fn rect_segment() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect_intersects_segment(
            r,
            Segment::new((-1.0, 5.0), (1.0, 5.0))
        ));
        assert!(!rect_intersects_segment(
            r,
            Segment::new((5.0, 5.0), (5.0, 5.0))
        ));
        assert!(!rect_intersects_segment(
            r,
            Segment::new((11.0, 0.0), (11.0, 10.0))
        ));
    }
}
