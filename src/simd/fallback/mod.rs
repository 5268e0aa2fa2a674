//! Portable backend.
//!
//! Used on every target without AVX2. The storage unit is a 32-byte aligned
//! byte array and each kernel walks the lanes with scalar wrapping
//! arithmetic, reproducing the overflow, rounding and shift-count rules of
//! the AVX2 backend bit for bit.

use crate::simd::constants::{NO_SIGN_32, NO_SIGN_64};
use crate::simd::math::Elementary;
use crate::simd::scalar::{all_lanes, map, zip_map};
use crate::simd::traits::{Arithmetic, FloatArithmetic, IntegerArithmetic, SignedArithmetic};

/// Opaque 256-bit register holding the lanes of a packed vector.
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Raw256(pub [u8; 32]);

/// Opaque 256-bit register holding the lanes of a packed vector.
pub type Register = Raw256;

#[inline(always)]
pub(crate) const fn from_bytes(bytes: [u8; 32]) -> Register {
    Raw256(bytes)
}

#[inline(always)]
fn bytewise(a: Register, b: Register, f: impl Fn(u8, u8) -> u8) -> Register {
    let mut out = a;
    for (x, y) in out.0.iter_mut().zip(b.0) {
        *x = f(*x, y);
    }
    out
}

#[inline(always)]
pub(crate) fn and(a: Register, b: Register) -> Register {
    bytewise(a, b, |x, y| x & y)
}

#[inline(always)]
pub(crate) fn or(a: Register, b: Register) -> Register {
    bytewise(a, b, |x, y| x | y)
}

#[inline(always)]
pub(crate) fn xor(a: Register, b: Register) -> Register {
    bytewise(a, b, |x, y| x ^ y)
}

#[inline(always)]
pub(crate) fn not(a: Register) -> Register {
    Raw256(a.0.map(|x| !x))
}

#[inline(always)]
pub(crate) fn bits_eq(a: Register, b: Register) -> bool {
    a == b
}

/// Loads 32 bytes from `ptr`, which may be unaligned.
///
/// # Safety
///
/// `ptr` must be valid for reading 32 bytes.
#[inline(always)]
pub(crate) unsafe fn load_unaligned(ptr: *const u8) -> Register {
    std::ptr::read_unaligned(ptr as *const Raw256)
}

/// Stores 32 bytes at `ptr`, which may be unaligned.
///
/// # Safety
///
/// `ptr` must be valid for writing 32 bytes.
#[inline(always)]
pub(crate) unsafe fn store_unaligned(register: Register, ptr: *mut u8) {
    std::ptr::write_unaligned(ptr as *mut Raw256, register)
}

/// Stores 32 bytes at a 32-byte aligned `ptr`.
///
/// # Safety
///
/// `ptr` must be valid for writing 32 bytes and aligned to 32 bytes.
#[inline(always)]
pub(crate) unsafe fn store_aligned(register: Register, ptr: *mut u8) {
    std::ptr::write(ptr as *mut Raw256, register)
}

/// Per-lane shift count: the lane read as unsigned, saturated into `u32`.
macro_rules! lane_count {
    ($value:expr, $unsigned:ty) => {
        u32::try_from($value as $unsigned).unwrap_or(u32::MAX)
    };
}

macro_rules! impl_integer {
    ($($ty:ty => $unsigned:ty, $signed:expr;)*) => {
        $(
            impl Arithmetic for $ty {
                #[inline(always)]
                fn splat(value: Self) -> Register {
                    let mut out = Raw256::default();
                    for chunk in out.0.chunks_exact_mut(std::mem::size_of::<$ty>()) {
                        chunk.copy_from_slice(&value.to_le_bytes());
                    }
                    out
                }

                #[inline(always)]
                fn add_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x.wrapping_add(y))
                }

                #[inline(always)]
                fn sub_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x.wrapping_sub(y))
                }

                #[inline(always)]
                fn mul_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x.wrapping_mul(y))
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
                    map::<$ty>(a, |x| x.checked_shl(n).unwrap_or(0))
                }

                #[inline(always)]
                fn shr_scalar(a: Register, n: u32) -> Register {
                    map::<$ty>(a, |x| shr_lane(x, n))
                }

                #[inline(always)]
                fn shl_lanes(a: Register, counts: Register) -> Register {
                    zip_map::<$ty>(a, counts, |x, c| {
                        x.checked_shl(lane_count!(c, $unsigned)).unwrap_or(0)
                    })
                }

                #[inline(always)]
                fn shr_lanes(a: Register, counts: Register) -> Register {
                    zip_map::<$ty>(a, counts, |x, c| shr_lane(x, lane_count!(c, $unsigned)))
                }
            }

            impl ShrLane for $ty {
                #[inline(always)]
                fn shr_lane(self, n: u32) -> Self {
                    if $signed {
                        // oversized counts fill the lane with the sign bit
                        self >> n.min(<$ty>::BITS - 1)
                    } else {
                        self.checked_shr(n).unwrap_or(0)
                    }
                }
            }
        )*
    };
}

trait ShrLane: Sized {
    fn shr_lane(self, n: u32) -> Self;
}

#[inline(always)]
fn shr_lane<T: ShrLane>(x: T, n: u32) -> T {
    x.shr_lane(n)
}

impl_integer! {
    i8 => u8, true;
    u8 => u8, false;
    i16 => u16, true;
    u16 => u16, false;
    i32 => u32, true;
    u32 => u32, false;
    i64 => u64, true;
    u64 => u64, false;
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl SignedArithmetic for $ty {
                #[inline(always)]
                fn abs_lanes(a: Register) -> Register {
                    map::<$ty>(a, <$ty>::wrapping_abs)
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64);

macro_rules! impl_float {
    ($($ty:ty => $no_sign:expr;)*) => {
        $(
            impl Arithmetic for $ty {
                #[inline(always)]
                fn splat(value: Self) -> Register {
                    let mut out = Raw256::default();
                    for chunk in out.0.chunks_exact_mut(std::mem::size_of::<$ty>()) {
                        chunk.copy_from_slice(&value.to_le_bytes());
                    }
                    out
                }

                #[inline(always)]
                fn add_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x + y)
                }

                #[inline(always)]
                fn sub_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x - y)
                }

                #[inline(always)]
                fn mul_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x * y)
                }

                #[inline(always)]
                fn div_lanes(a: Register, b: Register) -> Register {
                    zip_map::<$ty>(a, b, |x, y| x / y)
                }

                #[inline(always)]
                fn eq_lanes(a: Register, b: Register) -> bool {
                    all_lanes::<$ty>(a, b, |x, y| x == y)
                }
            }

            impl FloatArithmetic for $ty {
                #[inline(always)]
                fn abs_lanes(a: Register) -> Register {
                    and(a, $no_sign)
                }

                fn vectorised(_function: Elementary) -> Option<fn(Register) -> Register> {
                    None
                }
            }
        )*
    };
}

impl_float! {
    f32 => NO_SIGN_32;
    f64 => NO_SIGN_64;
}
