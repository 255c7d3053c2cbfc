//! Vector math shared by particles, constraints and shapes.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operations particle and spring code needs from a position type.
///
/// [`Vec3`] is the only implementation the world uses.
pub trait Vec:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    type Scalar: Float;

    fn zero() -> Self;
    fn splat(value: Self::Scalar) -> Self;
    fn dot(self, other: Self) -> Self::Scalar;
    fn scale(self, s: Self::Scalar) -> Self;
    fn component_mul(self, other: Self) -> Self;
    /// False if any component is NaN or infinite.
    fn is_finite(self) -> bool;

    fn length_sq(self) -> Self::Scalar {
        self.dot(self)
    }

    fn length(self) -> Self::Scalar {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction, or zero for (near) zero input.
    fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(Self::Scalar::from_f32(1e-10)) {
            return Self::zero();
        }
        self.scale(Self::Scalar::one() / len)
    }

    fn distance(self, other: Self) -> Self::Scalar {
        (self - other).length()
    }

    fn distance_sq(self, other: Self) -> Self::Scalar {
        (self - other).length_sq()
    }

    /// `self` at `t = 0`, `other` at `t = 1`.
    fn lerp(self, other: Self, t: Self::Scalar) -> Self {
        self + (other - self).scale(t)
    }
}

/// 3D vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    pub const fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn x_axis() -> Self { Vec3::new(F::one(), F::zero(), F::zero()) }
    pub fn y_axis() -> Self { Vec3::new(F::zero(), F::one(), F::zero()) }
    pub fn z_axis() -> Self { Vec3::new(F::zero(), F::zero(), F::one()) }

    /// Right-handed: `x_axis().cross(y_axis()) == z_axis()`.
    pub fn cross(self, other: Self) -> Self {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<F: Float> $trait for Vec3<F> {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self {
                Vec3::new(self.x $op rhs.x, self.y $op rhs.y, self.z $op rhs.z)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl<F: Float> Vec for Vec3<F> {
    type Scalar = F;
    fn zero() -> Self { Vec3::splat(F::zero()) }
    fn splat(value: F) -> Self { Vec3::new(value, value, value) }
    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    fn scale(self, s: F) -> Self {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
    fn component_mul(self, other: Self) -> Self {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }
    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
