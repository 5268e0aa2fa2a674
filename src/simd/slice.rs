//! Element-wise arithmetic over slices of lanes.
//!
//! Each operation comes in three flavours:
//! - `simd_*`: walks the inputs in blocks of `LANES` elements, finishing with
//!   one zero-padded partial block for the tail
//! - `par_simd_*`: splits the output into `LANES`-aligned chunks processed on
//!   the rayon thread pool; inputs at or below [`PARALLEL_SIMD_THRESHOLD`]
//!   take the `simd_*` path
//! - `scalar_*`: a plain loop with the same overflow rules
//!
//! All three return identical results.
//!
//! # Panics
//!
//! Every method panics when the two slices have different lengths.

use rayon::prelude::*;

use super::packed::Packed;
use super::traits::Arithmetic;

/// Inputs at or below this many elements are not worth splitting across threads.
pub const PARALLEL_SIMD_THRESHOLD: usize = 1 << 14;

/// Target number of elements handled by one rayon task.
pub const PARALLEL_CHUNK_SIZE: usize = 1 << 14;

/// Element-wise addition of two slices.
///
/// ```rust
/// use lanes256::simd::LaneAdd;
///
/// let a = [250u8, 1, 2];
/// let b = [10u8, 2, 3];
/// assert_eq!(a.as_slice().simd_add(b.as_slice()), vec![4, 3, 5]);
/// assert_eq!(a.as_slice().scalar_add(b.as_slice()), vec![4, 3, 5]);
/// ```
pub trait LaneAdd<Rhs> {
    type Output;

    /// Wrapping sum, one packed vector at a time.
    fn simd_add(self, rhs: Rhs) -> Self::Output;

    /// Wrapping sum, split across the rayon pool for large inputs.
    fn par_simd_add(self, rhs: Rhs) -> Self::Output;

    /// Wrapping sum, one element at a time.
    fn scalar_add(self, rhs: Rhs) -> Self::Output;
}

/// Element-wise subtraction of two slices.
///
/// ```rust
/// use lanes256::simd::LaneSub;
///
/// let a = vec![1i16, 0, -5];
/// let b = vec![2i16, i16::MIN, -5];
/// assert_eq!(a.simd_sub(&b), vec![-1, i16::MIN, 0]);
/// ```
pub trait LaneSub<Rhs> {
    type Output;

    /// Wrapping difference, one packed vector at a time.
    fn simd_sub(self, rhs: Rhs) -> Self::Output;

    /// Wrapping difference, split across the rayon pool for large inputs.
    fn par_simd_sub(self, rhs: Rhs) -> Self::Output;

    /// Wrapping difference, one element at a time.
    fn scalar_sub(self, rhs: Rhs) -> Self::Output;
}

/// Element-wise multiplication of two slices.
///
/// ```rust
/// use lanes256::simd::LaneMul;
///
/// let a = vec![1.5f32, -2.0, 3.0];
/// let b = vec![2.0f32, 4.0, 0.5];
/// assert_eq!(a.par_simd_mul(&b), vec![3.0, -8.0, 1.5]);
/// ```
pub trait LaneMul<Rhs> {
    type Output;

    /// Lane-wise product, one packed vector at a time.
    fn simd_mul(self, rhs: Rhs) -> Self::Output;

    /// Lane-wise product, split across the rayon pool for large inputs.
    fn par_simd_mul(self, rhs: Rhs) -> Self::Output;

    /// Lane-wise product, one element at a time.
    fn scalar_mul(self, rhs: Rhs) -> Self::Output;
}

#[inline(always)]
#[track_caller]
fn check_lengths<E>(a: &[E], b: &[E]) {
    assert_eq!(
        a.len(),
        b.len(),
        "Slices must be the same length ({} != {})",
        a.len(),
        b.len()
    );
}

/// Runs `op` over matching `LANES`-sized blocks of `a` and `b`, writing into `out`.
#[inline(always)]
fn blocks<E: Arithmetic>(
    a: &[E],
    b: &[E],
    out: &mut [E],
    op: impl Fn(Packed<E>, Packed<E>) -> Packed<E>,
) {
    let step = E::LANES;

    let mut a_blocks = a.chunks_exact(step);
    let mut b_blocks = b.chunks_exact(step);
    let mut out_blocks = out.chunks_exact_mut(step);

    for ((a_block, b_block), out_block) in (&mut a_blocks).zip(&mut b_blocks).zip(&mut out_blocks)
    {
        let result = op(Packed::from_lanes(a_block), Packed::from_lanes(b_block));
        out_block.copy_from_slice(result.to_array().as_ref());
    }

    let out_tail = out_blocks.into_remainder();
    if !out_tail.is_empty() {
        let result = op(
            Packed::from_lanes(a_blocks.remainder()),
            Packed::from_lanes(b_blocks.remainder()),
        );
        out_tail.copy_from_slice(&result.to_array().as_ref()[..out_tail.len()]);
    }
}

#[inline(always)]
fn simd_apply<E: Arithmetic>(
    a: &[E],
    b: &[E],
    op: impl Fn(Packed<E>, Packed<E>) -> Packed<E>,
) -> Vec<E> {
    let mut out = vec![E::default(); a.len()];
    blocks(a, b, &mut out, op);
    out
}

#[inline(always)]
fn par_simd_apply<E: Arithmetic>(
    a: &[E],
    b: &[E],
    op: impl Fn(Packed<E>, Packed<E>) -> Packed<E> + Sync,
) -> Vec<E> {
    if a.len() <= PARALLEL_SIMD_THRESHOLD {
        return simd_apply(a, b, op);
    }

    let step = E::LANES;
    // keep chunk boundaries on whole blocks so only the last chunk has a tail
    let chunk_size = ((PARALLEL_CHUNK_SIZE / step) * step).max(step);

    let mut out = vec![E::default(); a.len()];
    out.par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_idx, out_chunk)| {
            let start = chunk_idx * chunk_size;
            let end = start + out_chunk.len();
            blocks(&a[start..end], &b[start..end], out_chunk, &op);
        });
    out
}

#[inline(always)]
fn scalar_apply<E: Copy>(a: &[E], b: &[E], op: impl Fn(E, E) -> E) -> Vec<E> {
    a.iter().zip(b).map(|(&x, &y)| op(x, y)).collect()
}

macro_rules! impl_slice_op {
    ($trait:ident, $simd:ident, $par:ident, $scalar:ident, $op:tt, $lane_op:ident) => {
        impl<'b, E: Arithmetic> $trait<&'b [E]> for &[E] {
            type Output = Vec<E>;

            #[inline(always)]
            #[track_caller]
            fn $simd(self, rhs: &'b [E]) -> Vec<E> {
                check_lengths(self, rhs);
                simd_apply(self, rhs, |x, y| x $op y)
            }

            #[inline(always)]
            #[track_caller]
            fn $par(self, rhs: &'b [E]) -> Vec<E> {
                check_lengths(self, rhs);
                par_simd_apply(self, rhs, |x, y| x $op y)
            }

            #[inline(always)]
            #[track_caller]
            fn $scalar(self, rhs: &'b [E]) -> Vec<E> {
                check_lengths(self, rhs);
                scalar_apply(self, rhs, E::$lane_op)
            }
        }

        impl<'b, E: Arithmetic> $trait<&'b Vec<E>> for &Vec<E> {
            type Output = Vec<E>;

            #[inline(always)]
            #[track_caller]
            fn $simd(self, rhs: &'b Vec<E>) -> Vec<E> {
                self.as_slice().$simd(rhs.as_slice())
            }

            #[inline(always)]
            #[track_caller]
            fn $par(self, rhs: &'b Vec<E>) -> Vec<E> {
                self.as_slice().$par(rhs.as_slice())
            }

            #[inline(always)]
            #[track_caller]
            fn $scalar(self, rhs: &'b Vec<E>) -> Vec<E> {
                self.as_slice().$scalar(rhs.as_slice())
            }
        }
    };
}

impl_slice_op!(LaneAdd, simd_add, par_simd_add, scalar_add, +, lane_add);
impl_slice_op!(LaneSub, simd_sub, par_simd_sub, scalar_sub, -, lane_sub);
impl_slice_op!(LaneMul, simd_mul, par_simd_mul, scalar_mul, *, lane_mul);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simd_add_with_tail() {
        let a: Vec<i32> = (0..19).collect();
        let b: Vec<i32> = (0..19).map(|x| x * 10).collect();
        let expected: Vec<i32> = (0..19).map(|x| x * 11).collect();
        assert_eq!(a.simd_add(&b), expected);
        assert_eq!(a.scalar_add(&b), expected);
    }

    #[test]
    fn test_shorter_than_one_block() {
        let a = [1.5f64, 2.5];
        let b = [0.5f64, 0.5];
        assert_eq!(a[..].simd_mul(&b[..]), vec![0.75, 1.25]);
    }

    #[test]
    fn test_empty_slices() {
        let a: [u8; 0] = [];
        assert!(a[..].simd_sub(&a[..]).is_empty());
        assert!(a[..].par_simd_sub(&a[..]).is_empty());
    }

    #[test]
    fn test_wrapping_matches_scalar() {
        let a = vec![u8::MAX; 70];
        let b = vec![3u8; 70];
        assert_eq!(a.simd_add(&b), a.scalar_add(&b));
        assert_eq!(a.simd_mul(&b), vec![253u8; 70]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let size = PARALLEL_SIMD_THRESHOLD * 3 + 5;
        let a: Vec<i16> = (0..size).map(|i| i as i16).collect();
        let b: Vec<i16> = (0..size).map(|i| (i * 7) as i16).collect();
        assert_eq!(a.par_simd_sub(&b), a.scalar_sub(&b));
        assert_eq!(a.par_simd_mul(&b), a.simd_mul(&b));
    }

    #[test]
    #[should_panic(expected = "Slices must be the same length")]
    fn test_length_mismatch_panics() {
        let a = [1i64, 2, 3];
        let b = [1i64, 2];
        let _ = a[..].simd_add(&b[..]);
    }
}
