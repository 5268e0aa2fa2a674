//! Recipes for operations AVX2 lacks at the requested lane width.
//!
//! Narrow lanes are processed with the crate pattern: split the register
//! into the even and odd sub-lanes of each wider lane, run the wide
//! instruction on both halves, mask the spill-over and merge. Integer
//! division widens to a float format whose mantissa holds every operand
//! exactly (8/16-bit through f32, 32-bit through f64), divides, and
//! truncates back.
//!
//! All functions here are `unsafe` only because they call intrinsics; they
//! have no memory preconditions.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::Register;
use crate::simd::constants::{CRATE_16_32, CRATE_8_16, CRATE_8_16_INVERSE, CRATE_8_32, ZERO};

/// Shift count operand for the `sll`/`srl`/`sra` family.
#[inline(always)]
pub(super) unsafe fn count(n: u32) -> __m128i {
    // counts are read as unsigned 64-bit, so anything >= 2^31 still saturates
    _mm_cvtsi32_si128(n as i32)
}

// ================================================================================================
// 8-BIT LANES
// ================================================================================================

/// Splits 8-bit lanes into the even bytes and the odd bytes of each 16-bit group,
/// both moved to the low byte.
#[inline(always)]
unsafe fn split_8_16(v: Register) -> (Register, Register) {
    let even = _mm256_and_si256(v, CRATE_8_16);
    let odd = _mm256_srli_si256::<1>(_mm256_and_si256(v, CRATE_8_16_INVERSE));
    (even, odd)
}

/// Inverse of [`split_8_16`], discarding anything above the low byte.
#[inline(always)]
unsafe fn join_8_16(even: Register, odd: Register) -> Register {
    let even = _mm256_and_si256(even, CRATE_8_16);
    let odd = _mm256_slli_si256::<1>(_mm256_and_si256(odd, CRATE_8_16));
    _mm256_or_si256(even, odd)
}

#[inline(always)]
pub(super) unsafe fn mul_epi8(a: Register, b: Register) -> Register {
    let (a_even, a_odd) = split_8_16(a);
    let (b_even, b_odd) = split_8_16(b);
    join_8_16(
        _mm256_mullo_epi16(a_even, b_even),
        _mm256_mullo_epi16(a_odd, b_odd),
    )
}

#[inline(always)]
pub(super) unsafe fn sll_epi8(a: Register, n: u32) -> Register {
    let even = _mm256_and_si256(_mm256_sll_epi16(a, count(n)), CRATE_8_16);
    // the odd byte is the top of the 16-bit lane, overflow falls off the end
    let odd = _mm256_sll_epi16(_mm256_and_si256(a, CRATE_8_16_INVERSE), count(n));
    _mm256_or_si256(even, odd)
}

#[inline(always)]
pub(super) unsafe fn srl_epi8(a: Register, n: u32) -> Register {
    let even = _mm256_srl_epi16(_mm256_and_si256(a, CRATE_8_16), count(n));
    let odd = _mm256_and_si256(_mm256_srl_epi16(a, count(n)), CRATE_8_16_INVERSE);
    _mm256_or_si256(even, odd)
}

#[inline(always)]
pub(super) unsafe fn sra_epi8(a: Register, n: u32) -> Register {
    // move the even byte to the top so the 16-bit arithmetic shift sees its sign
    let even = _mm256_sra_epi16(_mm256_slli_epi16::<8>(a), count(n.saturating_add(8)));
    let odd = _mm256_sra_epi16(a, count(n));
    _mm256_or_si256(
        _mm256_and_si256(even, CRATE_8_16),
        _mm256_and_si256(odd, CRATE_8_16_INVERSE),
    )
}

/// Byte `k` of every 32-bit lane, sign- or zero-extended to 32 bits.
#[inline(always)]
unsafe fn quarter_8(v: Register, k: u32, signed: bool) -> Register {
    if signed {
        _mm256_sra_epi32(_mm256_sll_epi32(v, count(24 - 8 * k)), count(24))
    } else {
        _mm256_and_si256(_mm256_srl_epi32(v, count(8 * k)), CRATE_8_32)
    }
}

/// Puts the low byte of every 32-bit lane of `q` back at byte `k`.
#[inline(always)]
unsafe fn place_8(q: Register, k: u32) -> Register {
    _mm256_sll_epi32(_mm256_and_si256(q, CRATE_8_32), count(8 * k))
}

#[inline(always)]
pub(super) unsafe fn div_epi8(a: Register, b: Register, signed: bool) -> Register {
    let mut quotient = ZERO;
    for k in 0..4 {
        let fa = _mm256_cvtepi32_ps(quarter_8(a, k, signed));
        let fb = _mm256_cvtepi32_ps(quarter_8(b, k, signed));
        let q = _mm256_cvttps_epi32(_mm256_div_ps(fa, fb));
        quotient = _mm256_or_si256(quotient, place_8(q, k));
    }
    _mm256_andnot_si256(_mm256_cmpeq_epi8(b, ZERO), quotient)
}

#[inline(always)]
pub(super) unsafe fn sllv_epi8(a: Register, counts: Register) -> Register {
    let mut out = ZERO;
    for k in 0..4 {
        let shifted = _mm256_sllv_epi32(quarter_8(a, k, false), quarter_8(counts, k, false));
        out = _mm256_or_si256(out, place_8(shifted, k));
    }
    out
}

#[inline(always)]
pub(super) unsafe fn srv_epi8(a: Register, counts: Register, signed: bool) -> Register {
    let mut out = ZERO;
    for k in 0..4 {
        let value = quarter_8(a, k, signed);
        let n = quarter_8(counts, k, false);
        let shifted = if signed {
            _mm256_srav_epi32(value, n)
        } else {
            _mm256_srlv_epi32(value, n)
        };
        out = _mm256_or_si256(out, place_8(shifted, k));
    }
    out
}

// ================================================================================================
// 16-BIT LANES
// ================================================================================================

/// Splits 16-bit lanes into the even and odd halves of each 32-bit lane,
/// sign- or zero-extended to 32 bits.
#[inline(always)]
unsafe fn split_16_32(v: Register, signed: bool) -> (Register, Register) {
    if signed {
        let even = _mm256_srai_epi32::<16>(_mm256_slli_epi32::<16>(v));
        let odd = _mm256_srai_epi32::<16>(v);
        (even, odd)
    } else {
        let even = _mm256_and_si256(v, CRATE_16_32);
        let odd = _mm256_srli_si256::<2>(_mm256_andnot_si256(CRATE_16_32, v));
        (even, odd)
    }
}

#[inline(always)]
unsafe fn join_16_32(even: Register, odd: Register) -> Register {
    _mm256_or_si256(
        _mm256_and_si256(even, CRATE_16_32),
        _mm256_slli_epi32::<16>(odd),
    )
}

#[inline(always)]
pub(super) unsafe fn div_epi16(a: Register, b: Register, signed: bool) -> Register {
    let (a_even, a_odd) = split_16_32(a, signed);
    let (b_even, b_odd) = split_16_32(b, signed);

    let even = _mm256_cvttps_epi32(_mm256_div_ps(
        _mm256_cvtepi32_ps(a_even),
        _mm256_cvtepi32_ps(b_even),
    ));
    let odd = _mm256_cvttps_epi32(_mm256_div_ps(
        _mm256_cvtepi32_ps(a_odd),
        _mm256_cvtepi32_ps(b_odd),
    ));

    _mm256_andnot_si256(_mm256_cmpeq_epi16(b, ZERO), join_16_32(even, odd))
}

#[cfg(not(avx512))]
#[inline(always)]
pub(super) unsafe fn sllv_epi16(a: Register, counts: Register) -> Register {
    let (even, odd) = split_16_32(a, false);
    let (n_even, n_odd) = split_16_32(counts, false);
    join_16_32(_mm256_sllv_epi32(even, n_even), _mm256_sllv_epi32(odd, n_odd))
}

#[cfg(avx512)]
#[inline(always)]
pub(super) unsafe fn sllv_epi16(a: Register, counts: Register) -> Register {
    _mm256_sllv_epi16(a, counts)
}

#[cfg(not(avx512))]
#[inline(always)]
pub(super) unsafe fn srv_epi16(a: Register, counts: Register, signed: bool) -> Register {
    let (even, odd) = split_16_32(a, signed);
    let (n_even, n_odd) = split_16_32(counts, false);
    if signed {
        join_16_32(_mm256_srav_epi32(even, n_even), _mm256_srav_epi32(odd, n_odd))
    } else {
        join_16_32(_mm256_srlv_epi32(even, n_even), _mm256_srlv_epi32(odd, n_odd))
    }
}

#[cfg(avx512)]
#[inline(always)]
pub(super) unsafe fn srv_epi16(a: Register, counts: Register, signed: bool) -> Register {
    if signed {
        _mm256_srav_epi16(a, counts)
    } else {
        _mm256_srlv_epi16(a, counts)
    }
}

// ================================================================================================
// 32-BIT LANES
// ================================================================================================

const TWO_POW_31: f64 = 2_147_483_648.0;

#[inline(always)]
unsafe fn u32_to_pd(v: __m128i) -> __m256d {
    // bias into the signed range, convert, then undo the bias
    let biased = _mm_xor_si128(v, _mm_set1_epi32(i32::MIN));
    _mm256_add_pd(_mm256_cvtepi32_pd(biased), _mm256_set1_pd(TWO_POW_31))
}

#[inline(always)]
unsafe fn pd_to_u32(q: __m256d) -> __m128i {
    let truncated = _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(q);
    let biased = _mm256_cvttpd_epi32(_mm256_sub_pd(truncated, _mm256_set1_pd(TWO_POW_31)));
    _mm_xor_si128(biased, _mm_set1_epi32(i32::MIN))
}

#[inline(always)]
unsafe fn div_half_epi32(a: __m128i, b: __m128i, signed: bool) -> __m128i {
    if signed {
        _mm256_cvttpd_epi32(_mm256_div_pd(_mm256_cvtepi32_pd(a), _mm256_cvtepi32_pd(b)))
    } else {
        pd_to_u32(_mm256_div_pd(u32_to_pd(a), u32_to_pd(b)))
    }
}

#[inline(always)]
pub(super) unsafe fn div_epi32(a: Register, b: Register, signed: bool) -> Register {
    let lo = div_half_epi32(
        _mm256_castsi256_si128(a),
        _mm256_castsi256_si128(b),
        signed,
    );
    let hi = div_half_epi32(
        _mm256_extracti128_si256::<1>(a),
        _mm256_extracti128_si256::<1>(b),
        signed,
    );
    _mm256_andnot_si256(_mm256_cmpeq_epi32(b, ZERO), _mm256_set_m128i(hi, lo))
}

// ================================================================================================
// 64-BIT LANES
// ================================================================================================

#[cfg(not(avx512))]
#[inline(always)]
pub(super) unsafe fn mullo_epi64(a: Register, b: Register) -> Register {
    // lo(a)*lo(b) + ((hi(a)*lo(b) + lo(a)*hi(b)) << 32), everything mod 2^64
    let lo_lo = _mm256_mul_epu32(a, b);
    let hi_lo = _mm256_mul_epu32(_mm256_srli_epi64::<32>(a), b);
    let lo_hi = _mm256_mul_epu32(a, _mm256_srli_epi64::<32>(b));
    let cross = _mm256_slli_epi64::<32>(_mm256_add_epi64(hi_lo, lo_hi));
    _mm256_add_epi64(lo_lo, cross)
}

#[cfg(avx512)]
#[inline(always)]
pub(super) unsafe fn mullo_epi64(a: Register, b: Register) -> Register {
    _mm256_mullo_epi64(a, b)
}

#[cfg(not(avx512))]
#[inline(always)]
pub(super) unsafe fn sra_epi64(a: Register, n: u32) -> Register {
    // flip negative lanes, shift in zeros, flip back
    let sign = _mm256_cmpgt_epi64(ZERO, a);
    _mm256_xor_si256(_mm256_srl_epi64(_mm256_xor_si256(a, sign), count(n)), sign)
}

#[cfg(avx512)]
#[inline(always)]
pub(super) unsafe fn sra_epi64(a: Register, n: u32) -> Register {
    _mm256_sra_epi64(a, count(n))
}

#[cfg(not(avx512))]
#[inline(always)]
pub(super) unsafe fn srav_epi64(a: Register, counts: Register) -> Register {
    let sign = _mm256_cmpgt_epi64(ZERO, a);
    _mm256_xor_si256(_mm256_srlv_epi64(_mm256_xor_si256(a, sign), counts), sign)
}

#[cfg(avx512)]
#[inline(always)]
pub(super) unsafe fn srav_epi64(a: Register, counts: Register) -> Register {
    _mm256_srav_epi64(a, counts)
}

#[cfg(not(avx512))]
#[inline(always)]
pub(super) unsafe fn abs_epi64(a: Register) -> Register {
    // two's complement negate where the sign mask is set; MIN stays MIN
    let sign = _mm256_cmpgt_epi64(ZERO, a);
    _mm256_sub_epi64(_mm256_xor_si256(a, sign), sign)
}

#[cfg(avx512)]
#[inline(always)]
pub(super) unsafe fn abs_epi64(a: Register) -> Register {
    _mm256_abs_epi64(a)
}
