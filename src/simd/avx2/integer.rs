//! Integer lane kernels.
//!
//! 16-bit and 32-bit lanes map onto native instructions for everything but
//! division; 8-bit and 64-bit lanes lean on [`super::emulate`]. 64-bit
//! division has no float format wide enough, so it runs per lane.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::emulate::{self, count};
use super::{bits_eq, Register};
use crate::simd::scalar::zip_map;
use crate::simd::traits::{Arithmetic, IntegerArithmetic, SignedArithmetic};

/// Remainder from a quotient kernel: `a - q * b`, with `q = 0` where `b = 0`.
macro_rules! rem_from_div {
    ($ty:ty, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        let q = <$ty as Arithmetic>::div_lanes(a, b);
        <$ty as Arithmetic>::sub_lanes(a, <$ty as Arithmetic>::mul_lanes(q, b))
    }};
}

macro_rules! impl_epi8 {
    ($ty:ty, $signed:expr) => {
        impl Arithmetic for $ty {
            #[inline(always)]
            fn splat(value: Self) -> Register {
                unsafe { _mm256_set1_epi8(value as i8) }
            }

            #[inline(always)]
            fn add_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_add_epi8(a, b) }
            }

            #[inline(always)]
            fn sub_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_sub_epi8(a, b) }
            }

            #[inline(always)]
            fn mul_lanes(a: Register, b: Register) -> Register {
                unsafe { emulate::mul_epi8(a, b) }
            }

            #[inline(always)]
            fn div_lanes(a: Register, b: Register) -> Register {
                unsafe { emulate::div_epi8(a, b, $signed) }
            }

            #[inline(always)]
            fn eq_lanes(a: Register, b: Register) -> bool {
                bits_eq(a, b)
            }
        }

        impl IntegerArithmetic for $ty {
            #[inline(always)]
            fn rem_lanes(a: Register, b: Register) -> Register {
                rem_from_div!($ty, a, b)
            }

            #[inline(always)]
            fn shl_scalar(a: Register, n: u32) -> Register {
                unsafe { emulate::sll_epi8(a, n) }
            }

            #[inline(always)]
            fn shr_scalar(a: Register, n: u32) -> Register {
                if $signed {
                    unsafe { emulate::sra_epi8(a, n) }
                } else {
                    unsafe { emulate::srl_epi8(a, n) }
                }
            }

            #[inline(always)]
            fn shl_lanes(a: Register, counts: Register) -> Register {
                unsafe { emulate::sllv_epi8(a, counts) }
            }

            #[inline(always)]
            fn shr_lanes(a: Register, counts: Register) -> Register {
                unsafe { emulate::srv_epi8(a, counts, $signed) }
            }
        }
    };
}

macro_rules! impl_epi16 {
    ($ty:ty, $signed:expr) => {
        impl Arithmetic for $ty {
            #[inline(always)]
            fn splat(value: Self) -> Register {
                unsafe { _mm256_set1_epi16(value as i16) }
            }

            #[inline(always)]
            fn add_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_add_epi16(a, b) }
            }

            #[inline(always)]
            fn sub_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_sub_epi16(a, b) }
            }

            #[inline(always)]
            fn mul_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_mullo_epi16(a, b) }
            }

            #[inline(always)]
            fn div_lanes(a: Register, b: Register) -> Register {
                unsafe { emulate::div_epi16(a, b, $signed) }
            }

            #[inline(always)]
            fn eq_lanes(a: Register, b: Register) -> bool {
                bits_eq(a, b)
            }
        }

        impl IntegerArithmetic for $ty {
            #[inline(always)]
            fn rem_lanes(a: Register, b: Register) -> Register {
                rem_from_div!($ty, a, b)
            }

            #[inline(always)]
            fn shl_scalar(a: Register, n: u32) -> Register {
                unsafe { _mm256_sll_epi16(a, count(n)) }
            }

            #[inline(always)]
            fn shr_scalar(a: Register, n: u32) -> Register {
                if $signed {
                    unsafe { _mm256_sra_epi16(a, count(n)) }
                } else {
                    unsafe { _mm256_srl_epi16(a, count(n)) }
                }
            }

            #[inline(always)]
            fn shl_lanes(a: Register, counts: Register) -> Register {
                unsafe { emulate::sllv_epi16(a, counts) }
            }

            #[inline(always)]
            fn shr_lanes(a: Register, counts: Register) -> Register {
                unsafe { emulate::srv_epi16(a, counts, $signed) }
            }
        }
    };
}

macro_rules! impl_epi32 {
    ($ty:ty, $signed:expr) => {
        impl Arithmetic for $ty {
            #[inline(always)]
            fn splat(value: Self) -> Register {
                unsafe { _mm256_set1_epi32(value as i32) }
            }

            #[inline(always)]
            fn add_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_add_epi32(a, b) }
            }

            #[inline(always)]
            fn sub_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_sub_epi32(a, b) }
            }

            #[inline(always)]
            fn mul_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_mullo_epi32(a, b) }
            }

            #[inline(always)]
            fn div_lanes(a: Register, b: Register) -> Register {
                unsafe { emulate::div_epi32(a, b, $signed) }
            }

            #[inline(always)]
            fn eq_lanes(a: Register, b: Register) -> bool {
                bits_eq(a, b)
            }
        }

        impl IntegerArithmetic for $ty {
            #[inline(always)]
            fn rem_lanes(a: Register, b: Register) -> Register {
                rem_from_div!($ty, a, b)
            }

            #[inline(always)]
            fn shl_scalar(a: Register, n: u32) -> Register {
                unsafe { _mm256_sll_epi32(a, count(n)) }
            }

            #[inline(always)]
            fn shr_scalar(a: Register, n: u32) -> Register {
                if $signed {
                    unsafe { _mm256_sra_epi32(a, count(n)) }
                } else {
                    unsafe { _mm256_srl_epi32(a, count(n)) }
                }
            }

            #[inline(always)]
            fn shl_lanes(a: Register, counts: Register) -> Register {
                unsafe { _mm256_sllv_epi32(a, counts) }
            }

            #[inline(always)]
            fn shr_lanes(a: Register, counts: Register) -> Register {
                if $signed {
                    unsafe { _mm256_srav_epi32(a, counts) }
                } else {
                    unsafe { _mm256_srlv_epi32(a, counts) }
                }
            }
        }
    };
}

macro_rules! impl_epi64 {
    ($ty:ty, $signed:expr) => {
        impl Arithmetic for $ty {
            #[inline(always)]
            fn splat(value: Self) -> Register {
                unsafe { _mm256_set1_epi64x(value as i64) }
            }

            #[inline(always)]
            fn add_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_add_epi64(a, b) }
            }

            #[inline(always)]
            fn sub_lanes(a: Register, b: Register) -> Register {
                unsafe { _mm256_sub_epi64(a, b) }
            }

            #[inline(always)]
            fn mul_lanes(a: Register, b: Register) -> Register {
                unsafe { emulate::mullo_epi64(a, b) }
            }

            #[inline(always)]
            fn div_lanes(a: Register, b: Register) -> Register {
                zip_map::<$ty>(a, b, |x, y| if y == 0 { 0 } else { x.wrapping_div(y) })
            }

            #[inline(always)]
            fn eq_lanes(a: Register, b: Register) -> bool {
                bits_eq(a, b)
            }
        }

        impl IntegerArithmetic for $ty {
            #[inline(always)]
            fn rem_lanes(a: Register, b: Register) -> Register {
                zip_map::<$ty>(a, b, |x, y| if y == 0 { x } else { x.wrapping_rem(y) })
            }

            #[inline(always)]
            fn shl_scalar(a: Register, n: u32) -> Register {
                unsafe { _mm256_sll_epi64(a, count(n)) }
            }

            #[inline(always)]
            fn shr_scalar(a: Register, n: u32) -> Register {
                if $signed {
                    unsafe { emulate::sra_epi64(a, n) }
                } else {
                    unsafe { _mm256_srl_epi64(a, count(n)) }
                }
            }

            #[inline(always)]
            fn shl_lanes(a: Register, counts: Register) -> Register {
                unsafe { _mm256_sllv_epi64(a, counts) }
            }

            #[inline(always)]
            fn shr_lanes(a: Register, counts: Register) -> Register {
                if $signed {
                    unsafe { emulate::srav_epi64(a, counts) }
                } else {
                    unsafe { _mm256_srlv_epi64(a, counts) }
                }
            }
        }
    };
}

impl_epi8!(i8, true);
impl_epi8!(u8, false);
impl_epi16!(i16, true);
impl_epi16!(u16, false);
impl_epi32!(i32, true);
impl_epi32!(u32, false);
impl_epi64!(i64, true);
impl_epi64!(u64, false);

macro_rules! impl_abs {
    ($($ty:ty => $abs:path),* $(,)?) => {
        $(
            impl SignedArithmetic for $ty {
                #[inline(always)]
                fn abs_lanes(a: Register) -> Register {
                    unsafe { $abs(a) }
                }
            }
        )*
    };
}

impl_abs! {
    i8 => _mm256_abs_epi8,
    i16 => _mm256_abs_epi16,
    i32 => _mm256_abs_epi32,
    i64 => emulate::abs_epi64,
}
