// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by fallible geometry operations.

use core::fmt;

/// An error returned by a checked geometry operation.
///
/// Programming errors that cannot be recovered from, such as feeding the
/// crossing engine a path that does not begin with a move, panic instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeomError {
    /// An iterator was asked for an element after it was exhausted.
    NoSuchElement,
    /// The transform has a zero determinant and cannot be inverted.
    SingularTransform,
    /// A zero-length vector cannot be normalized.
    ZeroLengthVector,
    /// A width, height or radius was negative.
    NegativeDimension,
    /// A sequence of path elements did not begin with a move.
    MissingMoveTo,
    /// A crossing computation that requires closed sub-paths met an open one.
    OpenPath,
    /// The operation needs a path with at least one element.
    EmptyPath,
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchElement => write!(f, "no more path elements"),
            Self::SingularTransform => write!(f, "transform is not invertible"),
            Self::ZeroLengthVector => write!(f, "cannot normalize a zero-length vector"),
            Self::NegativeDimension => write!(f, "negative width, height or radius"),
            Self::MissingMoveTo => write!(f, "missing initial moveto in path definition"),
            Self::OpenPath => write!(f, "path is not closed"),
            Self::EmptyPath => write!(f, "path is empty"),
        }
    }
}

impl core::error::Error for GeomError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::GeomError;

    #[test]
    fn error_messages() {
        assert_eq!(
            GeomError::MissingMoveTo.to_string(),
            "missing initial moveto in path definition"
        );
        assert_eq!(GeomError::NoSuchElement.to_string(), "no more path elements");
    }
}
