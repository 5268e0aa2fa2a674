//! Floating-point lane kernels.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{and, elementary, Register};
use crate::simd::constants::{NO_SIGN_32, NO_SIGN_64};
use crate::simd::math::Elementary;
use crate::simd::traits::{Arithmetic, FloatArithmetic};

#[inline(always)]
fn ps(a: Register) -> __m256 {
    unsafe { _mm256_castsi256_ps(a) }
}

#[inline(always)]
fn pd(a: Register) -> __m256d {
    unsafe { _mm256_castsi256_pd(a) }
}

#[inline(always)]
fn from_ps(a: __m256) -> Register {
    unsafe { _mm256_castps_si256(a) }
}

#[inline(always)]
fn from_pd(a: __m256d) -> Register {
    unsafe { _mm256_castpd_si256(a) }
}

impl Arithmetic for f32 {
    #[inline(always)]
    fn splat(value: Self) -> Register {
        from_ps(unsafe { _mm256_set1_ps(value) })
    }

    #[inline(always)]
    fn add_lanes(a: Register, b: Register) -> Register {
        from_ps(unsafe { _mm256_add_ps(ps(a), ps(b)) })
    }

    #[inline(always)]
    fn sub_lanes(a: Register, b: Register) -> Register {
        from_ps(unsafe { _mm256_sub_ps(ps(a), ps(b)) })
    }

    #[inline(always)]
    fn mul_lanes(a: Register, b: Register) -> Register {
        from_ps(unsafe { _mm256_mul_ps(ps(a), ps(b)) })
    }

    #[inline(always)]
    fn div_lanes(a: Register, b: Register) -> Register {
        from_ps(unsafe { _mm256_div_ps(ps(a), ps(b)) })
    }

    /// Ordered, non-signalling compare: `+0 == -0`, NaN equals nothing.
    #[inline(always)]
    fn eq_lanes(a: Register, b: Register) -> bool {
        unsafe { _mm256_movemask_ps(_mm256_cmp_ps::<_CMP_EQ_OQ>(ps(a), ps(b))) == 0xFF }
    }
}

impl FloatArithmetic for f32 {
    #[inline(always)]
    fn abs_lanes(a: Register) -> Register {
        and(a, NO_SIGN_32)
    }

    fn vectorised(function: Elementary) -> Option<fn(Register) -> Register> {
        match function {
            Elementary::Asin => Some(|a: Register| from_ps(unsafe { elementary::asin_ps(ps(a)) })),
            Elementary::Acos => Some(|a: Register| from_ps(unsafe { elementary::acos_ps(ps(a)) })),
            Elementary::Atan => Some(|a: Register| from_ps(unsafe { elementary::atan_ps(ps(a)) })),
            _ => None,
        }
    }
}

impl Arithmetic for f64 {
    #[inline(always)]
    fn splat(value: Self) -> Register {
        from_pd(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    fn add_lanes(a: Register, b: Register) -> Register {
        from_pd(unsafe { _mm256_add_pd(pd(a), pd(b)) })
    }

    #[inline(always)]
    fn sub_lanes(a: Register, b: Register) -> Register {
        from_pd(unsafe { _mm256_sub_pd(pd(a), pd(b)) })
    }

    #[inline(always)]
    fn mul_lanes(a: Register, b: Register) -> Register {
        from_pd(unsafe { _mm256_mul_pd(pd(a), pd(b)) })
    }

    #[inline(always)]
    fn div_lanes(a: Register, b: Register) -> Register {
        from_pd(unsafe { _mm256_div_pd(pd(a), pd(b)) })
    }

    #[inline(always)]
    fn eq_lanes(a: Register, b: Register) -> bool {
        unsafe { _mm256_movemask_pd(_mm256_cmp_pd::<_CMP_EQ_OQ>(pd(a), pd(b))) == 0xF }
    }
}

impl FloatArithmetic for f64 {
    #[inline(always)]
    fn abs_lanes(a: Register) -> Register {
        and(a, NO_SIGN_64)
    }

    fn vectorised(_function: Elementary) -> Option<fn(Register) -> Register> {
        None
    }
}
