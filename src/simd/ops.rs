//! Operator overloads for [`Packed`].
//!
//! Vector-vector operators are generic over the lane traits. Operators
//! with a scalar operand (`v + 1`, `2 * v`, `v << 3`) and the conversions
//! from fixed-size arrays are generated per lane type.
//!
//! Integer `+ - *` wrap modulo `2^bits`. Integer `/` truncates toward zero
//! and yields `0` for a zero divisor; `%` yields the dividend for a zero
//! divisor. Shifts by a count at or above the lane width give `0`, or the
//! sign fill for the arithmetic right shift of signed lanes.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use super::backend;
use super::constants::{SIGN_32, SIGN_64};
use super::packed::Packed;
use super::traits::{Arithmetic, IntegerArithmetic, Lane};

macro_rules! vector_op {
    ($bound:ident, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:ident) => {
        impl<E: $bound> $trait for Packed<E> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_register(E::$kernel(self.register(), rhs.register()))
            }
        }

        impl<E: $bound> $assign_trait for Packed<E> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $trait::$method(*self, rhs);
            }
        }
    };
}

vector_op!(Arithmetic, Add, add, AddAssign, add_assign, add_lanes);
vector_op!(Arithmetic, Sub, sub, SubAssign, sub_assign, sub_lanes);
vector_op!(Arithmetic, Mul, mul, MulAssign, mul_assign, mul_lanes);
vector_op!(Arithmetic, Div, div, DivAssign, div_assign, div_lanes);
vector_op!(IntegerArithmetic, Rem, rem, RemAssign, rem_assign, rem_lanes);
vector_op!(IntegerArithmetic, Shl, shl, ShlAssign, shl_assign, shl_lanes);
vector_op!(IntegerArithmetic, Shr, shr, ShrAssign, shr_assign, shr_lanes);

macro_rules! bitwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:ident) => {
        impl<E: Lane> $trait for Packed<E> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_register(backend::$kernel(self.register(), rhs.register()))
            }
        }

        impl<E: Lane> $assign_trait for Packed<E> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $trait::$method(*self, rhs);
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, and);
bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, or);
bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

impl<E: Lane> Not for Packed<E> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self::from_register(backend::not(self.register()))
    }
}

impl<E: IntegerArithmetic> Shl<u32> for Packed<E> {
    type Output = Self;

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        Self::from_register(E::shl_scalar(self.register(), count))
    }
}

impl<E: IntegerArithmetic> ShlAssign<u32> for Packed<E> {
    #[inline(always)]
    fn shl_assign(&mut self, count: u32) {
        *self = *self << count;
    }
}

impl<E: IntegerArithmetic> Shr<u32> for Packed<E> {
    type Output = Self;

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        Self::from_register(E::shr_scalar(self.register(), count))
    }
}

impl<E: IntegerArithmetic> ShrAssign<u32> for Packed<E> {
    #[inline(always)]
    fn shr_assign(&mut self, count: u32) {
        *self = *self >> count;
    }
}

/// `op(vector, scalar)`, `op(scalar, vector)` and `op=(vector, scalar)` for one lane type.
macro_rules! scalar_op {
    ($ty:ty, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $trait<$ty> for Packed<$ty> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: $ty) -> Self {
                $trait::$method(self, Packed::<$ty>::splat(rhs))
            }
        }

        impl $trait<Packed<$ty>> for $ty {
            type Output = Packed<$ty>;

            #[inline(always)]
            fn $method(self, rhs: Packed<$ty>) -> Packed<$ty> {
                $trait::$method(Packed::<$ty>::splat(self), rhs)
            }
        }

        impl $assign_trait<$ty> for Packed<$ty> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: $ty) {
                *self = $trait::$method(*self, rhs);
            }
        }
    };
}

macro_rules! impl_lane_type {
    (common $ty:ty, $lanes:expr) => {
        impl From<[$ty; $lanes]> for Packed<$ty> {
            #[inline(always)]
            fn from(array: [$ty; $lanes]) -> Self {
                Self::from_array(array)
            }
        }

        impl From<Packed<$ty>> for [$ty; $lanes] {
            #[inline(always)]
            fn from(vector: Packed<$ty>) -> Self {
                vector.to_array()
            }
        }

        impl PartialEq<$ty> for Packed<$ty> {
            /// Every lane equals `rhs`.
            #[inline(always)]
            fn eq(&self, rhs: &$ty) -> bool {
                *self == Packed::<$ty>::splat(*rhs)
            }
        }

        scalar_op!($ty, Add, add, AddAssign, add_assign);
        scalar_op!($ty, Sub, sub, SubAssign, sub_assign);
        scalar_op!($ty, Mul, mul, MulAssign, mul_assign);
        scalar_op!($ty, Div, div, DivAssign, div_assign);
    };
    (integer $ty:ty, $lanes:expr) => {
        impl_lane_type!(common $ty, $lanes);

        impl Eq for Packed<$ty> {}

        impl std::hash::Hash for Packed<$ty> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.to_array().hash(state);
            }
        }

        scalar_op!($ty, Rem, rem, RemAssign, rem_assign);
        scalar_op!($ty, BitAnd, bitand, BitAndAssign, bitand_assign);
        scalar_op!($ty, BitOr, bitor, BitOrAssign, bitor_assign);
        scalar_op!($ty, BitXor, bitxor, BitXorAssign, bitxor_assign);
    };
    (signed $ty:ty, $lanes:expr) => {
        impl_lane_type!(integer $ty, $lanes);

        impl Neg for Packed<$ty> {
            type Output = Self;

            /// Two's-complement negation; `MIN` stays `MIN`.
            #[inline(always)]
            fn neg(self) -> Self {
                Self::zero() - self
            }
        }
    };
    (float $ty:ty, $lanes:expr, $sign:expr) => {
        impl_lane_type!(common $ty, $lanes);

        impl Neg for Packed<$ty> {
            type Output = Self;

            /// Flips the sign bit of every lane, NaN included.
            #[inline(always)]
            fn neg(self) -> Self {
                Self::from_register(backend::xor(self.register(), $sign))
            }
        }
    };
}

impl_lane_type!(signed i8, 32);
impl_lane_type!(integer u8, 32);
impl_lane_type!(signed i16, 16);
impl_lane_type!(integer u16, 16);
impl_lane_type!(signed i32, 8);
impl_lane_type!(integer u32, 8);
impl_lane_type!(signed i64, 4);
impl_lane_type!(integer u64, 4);
impl_lane_type!(float f32, 8, SIGN_32);
impl_lane_type!(float f64, 4, SIGN_64);
