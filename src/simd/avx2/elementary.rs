//! Vectorised inverse trigonometric kernels for binary32 lanes.
//!
//! These supersede the lane-wise scalar table for `asin`, `acos` and `atan`
//! on [`F32x8`](crate::simd::F32x8). Polynomials are evaluated with plain
//! multiply/add so that only AVX2 is required. The absolute error stays
//! below 1e-5 over the whole domain.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::f32::consts::FRAC_PI_2;

// asin(x) = x + x^3 * P(x^2) on [0, 0.5]
const ASIN_P0: f32 = 0.166_666_67;
const ASIN_P1: f32 = 0.075;
const ASIN_P2: f32 = 0.044_642_857;
const ASIN_P3: f32 = 0.030_381_944;
const ASIN_P4: f32 = 0.022_372_159;
const ASIN_P5: f32 = 0.017_352_764;
const ASIN_P6: f32 = 0.013_964_844;

// atan(x) = x * Q(x^2) on [0, 1]
const ATAN_Q: [f32; 9] = [
    0.999_999_9,
    -0.333_325_24,
    0.199_848_85,
    -0.141_548_07,
    0.104_775_39,
    -0.071_943_84,
    0.039_345_413,
    -0.014_152_348,
    0.002_398_139,
];

#[inline(always)]
unsafe fn horner(z: __m256, coefficients: &[f32]) -> __m256 {
    let mut iter = coefficients.iter().rev();
    let mut p = _mm256_set1_ps(iter.next().copied().unwrap_or(0.0));
    for &c in iter {
        p = _mm256_add_ps(_mm256_mul_ps(p, z), _mm256_set1_ps(c));
    }
    p
}

/// Arcsine of every lane; NaN outside `[-1, 1]`.
///
/// For `|x| >= 0.5` the argument is reduced with
/// `asin(x) = pi/2 - 2 * asin(sqrt((1 - x) / 2))`.
#[inline(always)]
pub(super) unsafe fn asin_ps(d: __m256) -> __m256 {
    let sign_mask = _mm256_set1_ps(-0.0);
    let one = _mm256_set1_ps(1.0);
    let half = _mm256_set1_ps(0.5);

    let abs_d = _mm256_andnot_ps(sign_mask, d);
    let out_of_domain = _mm256_cmp_ps::<_CMP_GT_OQ>(abs_d, one);
    let large = _mm256_cmp_ps::<_CMP_GE_OQ>(abs_d, half);

    let reduced = _mm256_sqrt_ps(_mm256_mul_ps(_mm256_sub_ps(one, abs_d), half));
    let x = _mm256_blendv_ps(abs_d, reduced, large);
    let x2 = _mm256_mul_ps(x, x);

    let p = horner(
        x2,
        &[ASIN_P0, ASIN_P1, ASIN_P2, ASIN_P3, ASIN_P4, ASIN_P5, ASIN_P6],
    );
    let small_result = _mm256_add_ps(x, _mm256_mul_ps(_mm256_mul_ps(p, x2), x));

    let large_result = _mm256_sub_ps(
        _mm256_set1_ps(FRAC_PI_2),
        _mm256_add_ps(small_result, small_result),
    );

    let magnitude = _mm256_blendv_ps(small_result, large_result, large);
    let signed = _mm256_or_ps(magnitude, _mm256_and_ps(d, sign_mask));

    _mm256_blendv_ps(signed, _mm256_set1_ps(f32::NAN), out_of_domain)
}

/// Arccosine of every lane, `pi/2 - asin(x)`.
#[inline(always)]
pub(super) unsafe fn acos_ps(d: __m256) -> __m256 {
    _mm256_sub_ps(_mm256_set1_ps(FRAC_PI_2), asin_ps(d))
}

/// Arctangent of every lane.
///
/// For `|x| >= 1` the argument is reduced with `atan(x) = pi/2 - atan(1/x)`.
#[inline(always)]
pub(super) unsafe fn atan_ps(x: __m256) -> __m256 {
    let sign_mask = _mm256_set1_ps(-0.0);
    let one = _mm256_set1_ps(1.0);

    let abs_x = _mm256_andnot_ps(sign_mask, x);
    let large = _mm256_cmp_ps::<_CMP_GE_OQ>(abs_x, one);
    let reduced = _mm256_blendv_ps(abs_x, _mm256_div_ps(one, abs_x), large);

    let x2 = _mm256_mul_ps(reduced, reduced);
    let result = _mm256_mul_ps(horner(x2, &ATAN_Q), reduced);

    let magnitude = _mm256_blendv_ps(
        result,
        _mm256_sub_ps(_mm256_set1_ps(FRAC_PI_2), result),
        large,
    );

    _mm256_or_ps(magnitude, _mm256_and_ps(x, sign_mask))
}
