// Copyright 2024 the Geokern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common numeric helpers shared by the geometry modules.

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident/$lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            /// Special implementation for signum, because libm doesn't have it.
            fn signum(self) -> Self;

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f32 {
            #[inline]
            fn signum(self) -> f32 {
                if self.is_nan() {
                    f32::NAN
                } else {
                    1.0_f32.copysign(self)
                }
            }

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lfname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("geokern requires either the `std` or `libm` feature")
            })+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            #[inline]
            fn signum(self) -> f64 {
                if self.is_nan() {
                    f64::NAN
                } else {
                    1.0_f64.copysign(self)
                }
            }

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("geokern requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs/fabsf;
    fn copysign(self, sign: Self) -> Self => copysign/copysignf;
    fn floor(self) -> Self => floor/floorf;
    fn hypot(self, other: Self) -> Self => hypot/hypotf;
    fn powi(self, n: i32) -> Self => pow/powf;
    fn round(self) -> Self => round/roundf;
    fn sin_cos(self) -> (Self, Self) => sincos/sincosf;
    fn sqrt(self) -> Self => sqrt/sqrtf;
}

/// Default tolerance used when an epsilon-aware comparison is not given one.
pub const EPSILON: f64 = 1e-10;

/// The flatness used when a curve is flattened internally, for example by
/// the crossing engine or by [`Path::length`](crate::Path::length).
pub const SPLINE_APPROXIMATION_RATIO: f64 = 0.1;

/// Is `value` zero within `epsilon`?
///
/// With `epsilon == 0.0` this is an exact test.
///
/// # Examples
///
/// ```
/// use geokern::common::is_epsilon_zero;
///
/// assert!(is_epsilon_zero(1e-12, 1e-10));
/// assert!(!is_epsilon_zero(1e-12, 0.0));
/// ```
#[inline]
pub fn is_epsilon_zero(value: f64, epsilon: f64) -> bool {
    value.abs() <= epsilon
}

/// Are `a` and `b` equal within `epsilon`?
#[inline]
pub fn is_epsilon_equal(a: f64, b: f64, epsilon: f64) -> bool {
    if a.is_infinite() {
        return b.is_infinite() && a.signum() == b.signum();
    }
    (a - b).abs() <= epsilon
}

/// Three-way comparison where values closer than `epsilon` compare equal.
///
/// Returns -1, 0 or 1.
#[inline]
pub fn compare_epsilon(a: f64, b: f64, epsilon: f64) -> i32 {
    let v = a - b;
    if v.abs() <= epsilon {
        0
    } else if v < 0.0 {
        -1
    } else {
        1
    }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics, a reversed range is treated as
/// the range between the two bounds.
#[inline]
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{clamp, compare_epsilon, is_epsilon_equal, is_epsilon_zero};

    #[test]
    fn epsilon_zero() {
        assert!(is_epsilon_zero(0.0, 0.0));
        assert!(is_epsilon_zero(-1e-11, 1e-10));
        assert!(!is_epsilon_zero(1e-9, 1e-10));
    }

    #[test]
    fn epsilon_compare() {
        assert_eq!(compare_epsilon(1.0, 1.0 + 1e-12, 1e-10), 0);
        assert_eq!(compare_epsilon(1.0, 2.0, 1e-10), -1);
        assert_eq!(compare_epsilon(2.0, 1.0, 1e-10), 1);
        assert!(is_epsilon_equal(f64::INFINITY, f64::INFINITY, 0.0));
        assert!(!is_epsilon_equal(f64::INFINITY, f64::NEG_INFINITY, 0.0));
    }

    #[test]
    fn clamp_reversed_range() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 1.0, 0.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }
}
