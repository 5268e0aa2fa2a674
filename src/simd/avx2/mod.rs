//! AVX2 backend.
//!
//! The storage unit is `__m256i` for every lane type; float kernels
//! reinterpret it with the zero-cost `_mm256_castsi256_ps` /
//! `_mm256_castsi256_pd` casts.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 (Haswell and later). Built with `cfg(avx512)` the
//!   kernels also use AVX-512 F, BW, DQ and VL instructions on 256-bit
//!   registers.
//! - **Target Architecture**: x86 / x86_64
//!
//! # Emulated operations
//!
//! AVX2 has no 8-bit multiply, no 8/16-bit variable shift, no 8-bit shift
//! at all, no 64-bit multiply-low, no 64-bit arithmetic shift and no integer
//! division. Those live in [`emulate`] and are assembled from wider-lane
//! instructions and the crate masks of [`crate::simd::constants`].

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::constants::ONES;

mod elementary;
mod emulate;
mod float;
mod integer;

/// Opaque 256-bit register holding the lanes of a packed vector.
pub type Register = __m256i;

#[inline(always)]
pub(crate) const fn from_bytes(bytes: [u8; 32]) -> Register {
    unsafe { std::mem::transmute::<[u8; 32], __m256i>(bytes) }
}

#[inline(always)]
pub(crate) fn and(a: Register, b: Register) -> Register {
    unsafe { _mm256_and_si256(a, b) }
}

#[inline(always)]
pub(crate) fn or(a: Register, b: Register) -> Register {
    unsafe { _mm256_or_si256(a, b) }
}

#[inline(always)]
pub(crate) fn xor(a: Register, b: Register) -> Register {
    unsafe { _mm256_xor_si256(a, b) }
}

#[inline(always)]
pub(crate) fn not(a: Register) -> Register {
    unsafe { _mm256_xor_si256(a, ONES) }
}

/// `true` when all 256 bits of `a` and `b` are identical.
#[inline(always)]
pub(crate) fn bits_eq(a: Register, b: Register) -> bool {
    unsafe {
        let diff = _mm256_xor_si256(a, b);
        _mm256_testz_si256(diff, diff) == 1
    }
}

/// Loads 32 bytes from `ptr`, which may be unaligned.
///
/// # Safety
///
/// `ptr` must be valid for reading 32 bytes.
#[inline(always)]
pub(crate) unsafe fn load_unaligned(ptr: *const u8) -> Register {
    _mm256_loadu_si256(ptr as *const __m256i)
}

/// Stores 32 bytes at `ptr`, which may be unaligned.
///
/// # Safety
///
/// `ptr` must be valid for writing 32 bytes.
#[inline(always)]
pub(crate) unsafe fn store_unaligned(register: Register, ptr: *mut u8) {
    _mm256_storeu_si256(ptr as *mut __m256i, register)
}

/// Stores 32 bytes at a 32-byte aligned `ptr`.
///
/// # Safety
///
/// `ptr` must be valid for writing 32 bytes and aligned to 32 bytes.
#[inline(always)]
pub(crate) unsafe fn store_aligned(register: Register, ptr: *mut u8) {
    _mm256_store_si256(ptr as *mut __m256i, register)
}
