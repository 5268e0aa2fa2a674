//! Lane-by-lane helpers used where no register instruction exists.

use super::traits::Lane;
use super::{backend, Register};

#[inline(always)]
pub(crate) fn to_array<E: Lane>(register: Register) -> E::Array {
    let mut out = E::Array::default();
    // `E::Array` is exactly 32 bytes
    unsafe { backend::store_unaligned(register, out.as_mut().as_mut_ptr().cast::<u8>()) };
    out
}

#[inline(always)]
pub(crate) fn from_array<E: Lane>(array: &E::Array) -> Register {
    unsafe { backend::load_unaligned(array.as_ref().as_ptr().cast::<u8>()) }
}

/// Applies `f` to every lane of `a`.
#[inline(always)]
pub(crate) fn map<E: Lane>(a: Register, f: impl Fn(E) -> E) -> Register {
    let mut lanes = to_array::<E>(a);
    for lane in lanes.as_mut() {
        *lane = f(*lane);
    }
    from_array::<E>(&lanes)
}

/// Applies `f` to every pair of matching lanes of `a` and `b`.
#[inline(always)]
pub(crate) fn zip_map<E: Lane>(a: Register, b: Register, f: impl Fn(E, E) -> E) -> Register {
    let mut lanes = to_array::<E>(a);
    let rhs = to_array::<E>(b);
    for (lane, &other) in lanes.as_mut().iter_mut().zip(rhs.as_ref()) {
        *lane = f(*lane, other);
    }
    from_array::<E>(&lanes)
}

/// `true` when `f` holds for every pair of matching lanes.
#[inline(always)]
pub(crate) fn all_lanes<E: Lane>(a: Register, b: Register, f: impl Fn(E, E) -> bool) -> bool {
    let lhs = to_array::<E>(a);
    let rhs = to_array::<E>(b);
    lhs.as_ref().iter().zip(rhs.as_ref()).all(|(&x, &y)| f(x, y))
}
