//! Horizontal reduction over sequences of packed vectors.
//!
//! [`sum`] folds left to right from the zero vector, so the result is
//! `((0 + v1) + v2) + ...` lane by lane with no reassociation. For integer
//! lanes wrapping addition is associative, which lets [`par_sum`] split the
//! work across the rayon thread pool and still return the same bits.

use std::iter::Sum;

use rayon::prelude::*;

use super::packed::Packed;
use super::traits::{Arithmetic, IntegerArithmetic};

/// Lane-wise sum of `vectors`, accumulated in iteration order.
///
/// An empty sequence gives the zero vector.
pub fn sum<E, I>(vectors: I) -> Packed<E>
where
    E: Arithmetic,
    I: IntoIterator<Item = Packed<E>>,
{
    vectors
        .into_iter()
        .fold(Packed::zero(), |acc, vector| acc + vector)
}

/// Lane-wise sum of `vectors` computed in parallel.
///
/// Only available for integer lanes, where the result is identical to
/// [`sum`] regardless of how the work is split.
pub fn par_sum<E: IntegerArithmetic>(vectors: &[Packed<E>]) -> Packed<E> {
    vectors
        .par_iter()
        .copied()
        .reduce(Packed::zero, |a, b| a + b)
}

impl<E: Arithmetic> Sum for Packed<E> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        sum(iter)
    }
}

impl<'a, E: Arithmetic> Sum<&'a Packed<E>> for Packed<E> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        sum(iter.copied())
    }
}
