// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small computational geometry kernel, in 2D and 3D.
//!
//! The planar side is built around one engine: a crossing-number walk over
//! a [`PathIterator`]. Points, rectangles, circles, ellipses, triangles,
//! segments and whole paths are tested against a path by counting how its
//! edges cross a ray, and the [`Shape`] trait answers containment and
//! intersection queries that way unless a shape knows better. Curved
//! elements are flattened into line segments on the fly by
//! [`FlatteningPathIter`].
//!
//! The 3D side, in [`d3`], answers the same kind of questions analytically
//! for segments, prisms and spheres.
//!
//! # Examples
//!
//! Containment follows the path's winding rule:
//!
//! ```
//! use geokern::{Path, PathWindingRule, Point, Shape};
//!
//! let mut path = Path::with_winding_rule(PathWindingRule::EvenOdd);
//! path.move_to((0.0, 0.0));
//! path.line_to((10.0, 0.0));
//! path.line_to((10.0, 10.0));
//! path.line_to((0.0, 10.0));
//! path.close_path();
//! path.move_to((3.0, 3.0));
//! path.line_to((7.0, 3.0));
//! path.line_to((7.0, 7.0));
//! path.line_to((3.0, 7.0));
//! path.close_path();
//!
//! assert!(path.contains(Point::new(1.0, 1.0)));
//! assert!(!path.contains(Point::new(5.0, 5.0)));
//! ```
//!
//! Any two shapes can be tested against each other:
//!
//! ```
//! use geokern::{Circle, Rect, Segment, Shape};
//!
//! let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
//! assert!(rect.intersects(&Circle::new((5.0, 2.0), 1.5)));
//! assert!(!rect.intersects(&Segment::new((5.0, 0.0), (5.0, 4.0))));
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The `alloc` crate is used regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    reason = "numeric code with short names and literal constants"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("geokern requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod circle;
mod clip;
pub mod common;
mod crossings;
pub mod d3;
mod ellipse;
mod error;
mod factory;
mod flatten;
mod multi_shape;
mod path;
mod path_element;
mod path_iter;
mod point;
mod readonly;
mod rect;
mod segment;
mod shadow;
mod shape;
mod triangle;
mod vec2;

pub use crate::affine::*;
pub use crate::circle::*;
pub use crate::clip::*;
pub use crate::crossings::*;
pub use crate::ellipse::*;
pub use crate::error::*;
pub use crate::factory::*;
pub use crate::flatten::*;
pub use crate::multi_shape::*;
pub use crate::path::*;
pub use crate::path_element::*;
pub use crate::path_iter::*;
pub use crate::point::*;
pub use crate::readonly::*;
pub use crate::rect::*;
pub use crate::segment::*;
pub use crate::shadow::*;
pub use crate::shape::*;
pub use crate::triangle::*;
pub use crate::vec2::*;
