//! Lane descriptors and the kernel traits every backend implements.
//!
//! A lane type `E` fixes everything a [`Packed`](super::Packed) vector needs to
//! know at compile time: the lane width, how many lanes fit in 256 bits, the
//! signedness and the display name. The kernel traits map each element-wise
//! operation to a function over raw [`Register`] values; the active backend
//! (`avx2` or `fallback`) provides one implementation per lane type.

use std::fmt;

use super::math::Elementary;
use super::Register;

mod sealed {
    pub trait Sealed {}
}

/// Compile-time description of one lane of a 256-bit vector.
///
/// The trait is sealed: the ten scalar types `i8`, `u8`, `i16`, `u16`, `i32`,
/// `u32`, `i64`, `u64`, `f32` and `f64` are the only lane types.
pub trait Lane:
    sealed::Sealed + Copy + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Width of one lane in bits.
    const LANE_BITS: usize;

    /// Number of lanes in a 256-bit register (`256 / LANE_BITS`).
    const LANES: usize;

    /// Whether the lane is interpreted as a signed quantity.
    const SIGNED: bool;

    /// Whether the lane holds an IEEE-754 value.
    const FLOAT: bool;

    /// Name of the packed vector type, used by `Display`.
    const NAME: &'static str;

    /// Dense array holding exactly `LANES` elements.
    type Array: Copy
        + Default
        + fmt::Debug
        + PartialEq
        + AsRef<[Self]>
        + AsMut<[Self]>
        + Send
        + Sync
        + 'static;

    /// Scalar addition with the same overflow rule as the vector form.
    fn lane_add(self, rhs: Self) -> Self;

    /// Scalar subtraction with the same overflow rule as the vector form.
    fn lane_sub(self, rhs: Self) -> Self;

    /// Scalar multiplication with the same overflow rule as the vector form.
    fn lane_mul(self, rhs: Self) -> Self;
}

/// Element-wise arithmetic shared by every lane type.
pub trait Arithmetic: Lane {
    /// Register with every lane set to `value`.
    fn splat(value: Self) -> Register;

    /// Lane-wise addition (modular for integers).
    fn add_lanes(a: Register, b: Register) -> Register;

    /// Lane-wise subtraction (modular for integers).
    fn sub_lanes(a: Register, b: Register) -> Register;

    /// Lane-wise multiplication keeping the low half of each product.
    fn mul_lanes(a: Register, b: Register) -> Register;

    /// Lane-wise division, truncated toward zero for integers.
    ///
    /// Integer lanes divided by zero yield zero.
    fn div_lanes(a: Register, b: Register) -> Register;

    /// `true` when every lane of `a` equals the matching lane of `b`.
    ///
    /// Bitwise for integers; IEEE-754 for floats.
    fn eq_lanes(a: Register, b: Register) -> bool;
}

/// Operations that only make sense on integer lanes.
pub trait IntegerArithmetic: Arithmetic {
    /// Lane-wise remainder `a - (a / b) * b`; a zero divisor yields `a`.
    fn rem_lanes(a: Register, b: Register) -> Register;

    /// Shifts every lane left by `count` bits.
    fn shl_scalar(a: Register, count: u32) -> Register;

    /// Shifts every lane right by `count` bits, arithmetic for signed lanes.
    fn shr_scalar(a: Register, count: u32) -> Register;

    /// Shifts each lane left by the matching lane of `counts`.
    fn shl_lanes(a: Register, counts: Register) -> Register;

    /// Shifts each lane right by the matching lane of `counts`.
    fn shr_lanes(a: Register, counts: Register) -> Register;
}

/// Operations on signed integer lanes.
pub trait SignedArithmetic: IntegerArithmetic {
    /// Absolute value of every lane, wrapping so that `MIN` maps to itself.
    fn abs_lanes(a: Register) -> Register;
}

/// Operations that only make sense on floating-point lanes.
pub trait FloatArithmetic: Arithmetic + num::Float {
    /// Clears the sign bit of every lane.
    fn abs_lanes(a: Register) -> Register;

    /// Whole-register kernel for `function`, when the backend has one.
    fn vectorised(function: Elementary) -> Option<fn(Register) -> Register>;
}

macro_rules! impl_integer_lane {
    ($($ty:ty => $bits:expr, $signed:expr, $name:expr;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Lane for $ty {
                const LANE_BITS: usize = $bits;
                const LANES: usize = 256 / $bits;
                const SIGNED: bool = $signed;
                const FLOAT: bool = false;
                const NAME: &'static str = $name;

                type Array = [$ty; 256 / $bits];

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_float_lane {
    ($($ty:ty => $bits:expr, $name:expr;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Lane for $ty {
                const LANE_BITS: usize = $bits;
                const LANES: usize = 256 / $bits;
                const SIGNED: bool = true;
                const FLOAT: bool = true;
                const NAME: &'static str = $name;

                type Array = [$ty; 256 / $bits];

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )*
    };
}

impl_integer_lane! {
    i8 => 8, true, "I8x32";
    u8 => 8, false, "U8x32";
    i16 => 16, true, "I16x16";
    u16 => 16, false, "U16x16";
    i32 => 32, true, "I32x8";
    u32 => 32, false, "U32x8";
    i64 => 64, true, "I64x4";
    u64 => 64, false, "U64x4";
}

impl_float_lane! {
    f32 => 32, "F32x8";
    f64 => 64, "F64x4";
}
