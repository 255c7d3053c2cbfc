//! Scalar type the world is generic over.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// `f32` or `f64`.
///
/// Math goes through `libm`, so a world behaves the same on `no_std`
/// targets as it does with `std` linked in.
pub trait Float:
    Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + Debug
{
    fn zero() -> Self;
    fn one() -> Self;
    fn half() -> Self;
    fn two() -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    /// Returns `other` when the comparison is unordered.
    fn min(self, other: Self) -> Self;
    /// Returns `other` when the comparison is unordered.
    fn max(self, other: Self) -> Self;
    /// Lossless for `f64`; used for literals in generic code.
    fn from_f32(v: f32) -> Self;
    fn is_finite(self) -> bool;
    fn from_usize(n: usize) -> Self;
    /// Truncates toward zero; saturates at the `usize` range, NaN gives 0.
    fn to_usize(self) -> usize;

    fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

macro_rules! impl_float {
    ($t:ty, $sqrt:path, $sin:path, $cos:path, $fabs:path, $floor:path) => {
        impl Float for $t {
            #[inline] fn zero() -> Self { 0.0 }
            #[inline] fn one() -> Self { 1.0 }
            #[inline] fn half() -> Self { 0.5 }
            #[inline] fn two() -> Self { 2.0 }
            #[inline] fn sqrt(self) -> Self { $sqrt(self) }
            #[inline] fn sin(self) -> Self { $sin(self) }
            #[inline] fn cos(self) -> Self { $cos(self) }
            #[inline] fn abs(self) -> Self { $fabs(self) }
            #[inline] fn floor(self) -> Self { $floor(self) }
            #[inline] fn min(self, other: Self) -> Self { if self < other { self } else { other } }
            #[inline] fn max(self, other: Self) -> Self { if self > other { self } else { other } }
            #[inline] fn from_f32(v: f32) -> Self { v as $t }
            #[inline] fn is_finite(self) -> bool { <$t>::is_finite(self) }
            #[inline] fn from_usize(n: usize) -> Self { n as $t }
            #[inline] fn to_usize(self) -> usize { self as usize }
        }
    };
}

impl_float!(f32, libm::sqrtf, libm::sinf, libm::cosf, libm::fabsf, libm::floorf);
impl_float!(f64, libm::sqrt, libm::sin, libm::cos, libm::fabs, libm::floor);
