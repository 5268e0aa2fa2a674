//! The packed vector value type.
//!
//! [`Packed<E>`] owns one 256-bit [`Register`] holding `E::LANES` lanes of
//! `E` in ascending order: lane `i` occupies bits `[i * bits, (i + 1) * bits)`,
//! which matches the little-endian layout of `[E; LANES]` in memory. The
//! register is the only state, so copies are bitwise and independent.
//!
//! # Supported Operations
//!
//! ## Construction
//! - [`Packed::zero`] / `Default` - all lanes zero
//! - [`Packed::splat`] - every lane set to one scalar
//! - `From<Register>` / [`Packed::from_register`] - adopt a raw register
//! - `From<[E; N]>` / [`Packed::from_array`] - dense array
//! - [`Packed::from_lanes`] / `FromIterator` - zero-padded sequence
//! - `TryFrom<&[E]>` - exact slice conversion, fails when too short
//! - [`Packed::load`] - unaligned load from a raw pointer
//!
//! ## Storing
//! - [`Packed::save`], [`Packed::save_aligned`] - raw pointer stores
//! - [`Packed::save_array`], [`Packed::save_to_slice`], [`Packed::to_array`]
//!
//! ## Access
//! - `v[i]` - checked, panics on `i >= LANES`
//! - [`Packed::try_get`] - checked, returns an error
//! - [`Packed::get_wrapping`] - reads lane `i mod LANES`
//!
//! Arithmetic, bitwise and shift operators are implemented in the `ops`
//! module; byte strings in [`super::bytes`].

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use super::constants::ZERO;
use super::scalar::{from_array, to_array};
use super::traits::{Arithmetic, Lane};
use super::{backend, Register, VECTOR_BYTES};
use crate::error::{self, Result};

/// A 256-bit vector of `E::LANES` packed lanes of type `E`.
///
/// # Usage
///
/// ```rust
/// use lanes256::simd::{I32x8, U32x8};
///
/// let a = I32x8::from([10, 20, 30, 40, 50, 60, 70, 80]);
/// assert_eq!(a % 3, I32x8::from([1, 2, 0, 1, 2, 0, 1, 2]));
///
/// let input = [1u32, 2, 4, 5, 6, 10, 2, 5];
/// let mut output = [0u32; 8];
/// let v = unsafe { U32x8::load(input.as_ptr()) }.unwrap();
/// ((v + 5) * 2).save_array(&mut output);
/// assert_eq!(output, [12, 14, 18, 20, 22, 30, 14, 20]);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Packed<E: Lane> {
    register: Register,
    lane: PhantomData<E>,
}

pub type I8x32 = Packed<i8>;
pub type U8x32 = Packed<u8>;
pub type I16x16 = Packed<i16>;
pub type U16x16 = Packed<u16>;
pub type I32x8 = Packed<i32>;
pub type U32x8 = Packed<u32>;
pub type I64x4 = Packed<i64>;
pub type U64x4 = Packed<u64>;
pub type F32x8 = Packed<f32>;
pub type F64x4 = Packed<f64>;

impl<E: Lane> Packed<E> {
    /// Number of lanes in the vector.
    pub const LANES: usize = E::LANES;

    /// Adopts `register` verbatim.
    #[inline(always)]
    pub const fn from_register(register: Register) -> Self {
        Self {
            register,
            lane: PhantomData,
        }
    }

    /// The raw register, by value.
    #[inline(always)]
    pub fn register(self) -> Register {
        self.register
    }

    /// Vector with every bit cleared, i.e. every lane `0`.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::from_register(ZERO)
    }

    /// Lane `i` is `array[i]`.
    #[inline(always)]
    pub fn from_array(array: E::Array) -> Self {
        Self::from_register(from_array::<E>(&array))
    }

    /// Lane `i` is `lanes[i]` for `i < min(lanes.len(), LANES)`; the rest are zero.
    ///
    /// Elements past `LANES` are ignored.
    pub fn from_lanes(lanes: &[E]) -> Self {
        let mut array = E::Array::default();
        let n = lanes.len().min(E::LANES);
        array.as_mut()[..n].copy_from_slice(&lanes[..n]);
        Self::from_array(array)
    }

    /// Loads `LANES` contiguous elements from `ptr`. The pointer may be unaligned.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPointer`](crate::error::LaneError::InvalidPointer)
    /// when `ptr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be valid for reading `LANES` elements of `E`.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn load(ptr: *const E) -> Result<Self> {
        if ptr.is_null() {
            return Err(error::invalid_pointer("Packed::load"));
        }
        Ok(Self::from_register(backend::load_unaligned(ptr.cast::<u8>())))
    }

    /// Overwrites every lane with `LANES` contiguous elements read from `ptr`.
    ///
    /// On error the vector is left untouched.
    ///
    /// # Safety
    ///
    /// Same contract as [`Packed::load`].
    #[inline(always)]
    #[track_caller]
    pub unsafe fn load_from(&mut self, ptr: *const E) -> Result<()> {
        *self = Self::load(ptr)?;
        Ok(())
    }

    /// Writes the `LANES` elements to `ptr`. The pointer may be unaligned.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPointer`](crate::error::LaneError::InvalidPointer)
    /// when `ptr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be valid for writing `LANES` elements of `E`.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn save(self, ptr: *mut E) -> Result<()> {
        if ptr.is_null() {
            return Err(error::invalid_pointer("Packed::save"));
        }
        backend::store_unaligned(self.register, ptr.cast::<u8>());
        Ok(())
    }

    /// Writes the `LANES` elements to a 32-byte aligned `ptr`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidPointer`](crate::error::LaneError::InvalidPointer)
    /// when `ptr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be valid for writing `LANES` elements of `E` and
    /// aligned to [`VECTOR_BYTES`]; a misaligned pointer is undefined
    /// behaviour.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn save_aligned(self, ptr: *mut E) -> Result<()> {
        if ptr.is_null() {
            return Err(error::invalid_pointer("Packed::save_aligned"));
        }
        debug_assert!(
            (ptr as usize) % VECTOR_BYTES == 0,
            "Pointer must be aligned to {VECTOR_BYTES} bytes"
        );
        backend::store_aligned(self.register, ptr.cast::<u8>());
        Ok(())
    }

    /// Writes the lanes into `out`.
    #[inline(always)]
    pub fn save_array(self, out: &mut E::Array) {
        *out = self.to_array();
    }

    /// Writes the lanes into the first `LANES` elements of `out`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidArgument`](crate::error::LaneError::InvalidArgument)
    /// when `out` is shorter than `LANES`; nothing is written in that case.
    pub fn save_to_slice(self, out: &mut [E]) -> Result<()> {
        if out.len() < E::LANES {
            return Err(error::invalid_argument(
                E::LANES,
                out.len(),
                "destination slice too short",
            ));
        }
        out[..E::LANES].copy_from_slice(self.to_array().as_ref());
        Ok(())
    }

    /// The lanes as a dense array.
    #[inline(always)]
    pub fn to_array(self) -> E::Array {
        to_array::<E>(self.register)
    }

    /// The lanes as a `Vec`.
    pub fn to_vec(self) -> Vec<E> {
        self.to_array().as_ref().to_vec()
    }

    /// Value of lane `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`](crate::error::LaneError::IndexOutOfRange)
    /// when `index >= LANES`.
    #[inline(always)]
    pub fn try_get(&self, index: usize) -> Result<E> {
        if index >= E::LANES {
            return Err(error::index_out_of_range(index, E::LANES));
        }
        Ok(*self.lane_ref(index))
    }

    /// Value of lane `index mod LANES`.
    #[inline(always)]
    pub fn get_wrapping(&self, index: usize) -> E {
        *self.lane_ref(index % E::LANES)
    }

    #[inline(always)]
    fn lane_ref(&self, index: usize) -> &E {
        debug_assert!(index < E::LANES);
        // the register is 32 bytes, aligned to at least `align_of::<E>()`
        unsafe { &*(&self.register as *const Register).cast::<E>().add(index) }
    }
}

impl<E: Arithmetic> Packed<E> {
    /// Every lane set to `value`.
    #[inline(always)]
    pub fn splat(value: E) -> Self {
        Self::from_register(E::splat(value))
    }
}

impl<E: Lane> Default for Packed<E> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<E: Lane> From<Register> for Packed<E> {
    #[inline(always)]
    fn from(register: Register) -> Self {
        Self::from_register(register)
    }
}

impl<E: Lane> FromIterator<E> for Packed<E> {
    /// Takes at most `LANES` items; missing lanes are zero.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut array = E::Array::default();
        for (lane, value) in array.as_mut().iter_mut().zip(iter) {
            *lane = value;
        }
        Self::from_array(array)
    }
}

impl<'a, E: Lane> TryFrom<&'a [E]> for Packed<E> {
    type Error = error::LaneError;

    /// Reads the first `LANES` elements of `slice`.
    ///
    /// Unlike [`Packed::from_lanes`] there is no padding: a slice shorter than
    /// `LANES` is an [`InvalidArgument`](crate::error::LaneError::InvalidArgument).
    fn try_from(slice: &'a [E]) -> Result<Self> {
        if slice.len() < E::LANES {
            return Err(error::invalid_argument(
                E::LANES,
                slice.len(),
                "slice too short to fill every lane",
            ));
        }
        Ok(Self::from_lanes(&slice[..E::LANES]))
    }
}

impl<E: Lane> Index<usize> for Packed<E> {
    type Output = E;

    /// # Panics
    ///
    /// Panics when `index >= LANES`.
    #[inline(always)]
    #[track_caller]
    fn index(&self, index: usize) -> &E {
        if index >= E::LANES {
            panic!("{}", error::index_out_of_range(index, E::LANES));
        }
        self.lane_ref(index)
    }
}

impl<E: Arithmetic> PartialEq for Packed<E> {
    /// Bitwise for integer lanes. Float lanes compare with IEEE-754 rules:
    /// `+0.0 == -0.0` and NaN is unequal to everything.
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        E::eq_lanes(self.register, other.register)
    }
}

impl<E: Lane> fmt::Display for Packed<E> {
    /// `Name(v0, v1, …, vN-1)` with lanes in ascending order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", E::NAME)?;
        for (i, lane) in self.to_array().as_ref().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{lane}")?;
        }
        write!(f, ")")
    }
}

impl<E: Lane> fmt::Debug for Packed<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple(E::NAME);
        for lane in self.to_array().as_ref() {
            tuple.field(lane);
        }
        tuple.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;
    use std::alloc::{alloc, dealloc, Layout};

    fn alloc_aligned<T>(count: usize, align: usize) -> *mut T {
        let layout = Layout::from_size_align(count * std::mem::size_of::<T>(), align)
            .expect("Invalid layout");
        unsafe { alloc(layout) as *mut T }
    }

    fn dealloc_aligned<T>(ptr: *mut T, count: usize, align: usize) {
        let layout = Layout::from_size_align(count * std::mem::size_of::<T>(), align)
            .expect("Invalid layout");
        unsafe { dealloc(ptr as *mut u8, layout) };
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_default_is_zero() {
            assert_eq!(I32x8::default().to_array(), [0; 8]);
            assert_eq!(F64x4::default().to_array(), [0.0; 4]);
            assert_eq!(U8x32::zero().to_array(), [0; 32]);
        }

        #[test]
        fn test_splat() {
            assert_eq!(I16x16::splat(-7).to_array(), [-7; 16]);
            assert_eq!(U64x4::splat(u64::MAX).to_array(), [u64::MAX; 4]);
            assert_eq!(F32x8::splat(2.5).to_array(), [2.5; 8]);
        }

        #[test]
        fn test_from_array_preserves_order() {
            let lanes = [1i64, -2, 3, -4];
            assert_eq!(I64x4::from_array(lanes).to_array(), lanes);
        }

        #[test]
        fn test_from_register_adopts_bits() {
            let a = U32x8::from_array([9, 8, 7, 6, 5, 4, 3, 2]);
            let b = U32x8::from(a.register());
            assert_eq!(a, b);

            let reinterpreted = Packed::<u8>::from_register(a.register());
            assert_eq!(&reinterpreted.to_array()[..4], &[9, 0, 0, 0]);
        }

        #[test]
        fn test_from_lanes_zero_pads() {
            let v = I32x8::from_lanes(&[1, 2, 3]);
            assert_eq!(v.to_array(), [1, 2, 3, 0, 0, 0, 0, 0]);
        }

        #[test]
        fn test_from_lanes_discards_extra() {
            let v = I64x4::from_lanes(&[1, 2, 3, 4, 5, 6]);
            assert_eq!(v.to_array(), [1, 2, 3, 4]);
        }

        #[test]
        fn test_from_iterator() {
            let v: U16x16 = (1..=20u16).collect();
            let expected: [u16; 16] = std::array::from_fn(|i| i as u16 + 1);
            assert_eq!(v.to_array(), expected);

            let short: F64x4 = [1.5f64].into_iter().collect();
            assert_eq!(short.to_array(), [1.5, 0.0, 0.0, 0.0]);
        }

        #[test]
        fn test_try_from_slice() {
            let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
            let v = F32x8::try_from(&data[..]).expect("nine elements are enough");
            assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

            let error = F32x8::try_from(&data[..3]).unwrap_err();
            assert_eq!(
                error,
                LaneError::InvalidArgument {
                    expected: 8,
                    got: 3,
                    message: "slice too short to fill every lane".to_string(),
                }
            );
        }

        #[test]
        fn test_copies_are_independent() {
            let a = I32x8::splat(1);
            let mut b = a;
            b += I32x8::splat(1);
            assert_eq!(a.to_array(), [1; 8]);
            assert_eq!(b.to_array(), [2; 8]);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_load_unaligned() {
            let data: Vec<u16> = (0..17).collect();
            // offset by one element so the pointer is not 32-byte aligned
            let v = unsafe { U16x16::load(data.as_ptr().add(1)) }.expect("valid pointer");
            let expected: [u16; 16] = std::array::from_fn(|i| i as u16 + 1);
            assert_eq!(v.to_array(), expected);
        }

        #[test]
        fn test_load_null_pointer() {
            let result = unsafe { I8x32::load(std::ptr::null()) };
            match result {
                Err(LaneError::InvalidPointer { function, location }) => {
                    assert_eq!(function, "Packed::load");
                    assert_eq!(location.file(), file!());
                }
                other => panic!("expected InvalidPointer, got {other:?}"),
            }
        }

        #[test]
        fn test_load_from_overwrites() {
            let data = [5i32; 8];
            let mut v = I32x8::splat(1);
            unsafe { v.load_from(data.as_ptr()) }.expect("valid pointer");
            assert_eq!(v.to_array(), data);
        }

        #[test]
        fn test_load_from_null_leaves_vector_untouched() {
            let mut v = I32x8::splat(3);
            let result = unsafe { v.load_from(std::ptr::null()) };
            assert!(result.is_err());
            assert_eq!(v.to_array(), [3; 8]);
        }
    }

    mod store_tests {
        use super::*;

        #[test]
        fn test_save_unaligned() {
            let v = I64x4::from_array([1, 2, 3, 4]);
            let mut out = [0i64; 5];
            unsafe { v.save(out.as_mut_ptr().add(1)) }.expect("valid pointer");
            assert_eq!(out, [0, 1, 2, 3, 4]);
        }

        #[test]
        fn test_save_aligned() {
            let ptr = alloc_aligned::<f64>(4, VECTOR_BYTES);
            let v = F64x4::from_array([1.0, -2.0, 3.5, 0.25]);
            unsafe { v.save_aligned(ptr) }.expect("valid pointer");
            let stored = unsafe { std::slice::from_raw_parts(ptr, 4) }.to_vec();
            dealloc_aligned(ptr, 4, VECTOR_BYTES);
            assert_eq!(stored, vec![1.0, -2.0, 3.5, 0.25]);
        }

        #[test]
        fn test_save_null_pointer() {
            let v = U32x8::splat(1);
            assert!(matches!(
                unsafe { v.save(std::ptr::null_mut()) },
                Err(LaneError::InvalidPointer { function: "Packed::save", .. })
            ));
            assert!(matches!(
                unsafe { v.save_aligned(std::ptr::null_mut()) },
                Err(LaneError::InvalidPointer { function: "Packed::save_aligned", .. })
            ));
        }

        #[test]
        fn test_save_array() {
            let mut out = [0u8; 32];
            U8x32::splat(0xAB).save_array(&mut out);
            assert_eq!(out, [0xAB; 32]);
        }

        #[test]
        fn test_save_to_slice() {
            let v = I16x16::splat(4);
            let mut out = vec![0i16; 20];
            v.save_to_slice(&mut out).expect("long enough");
            assert_eq!(&out[..16], &[4; 16]);
            assert_eq!(&out[16..], &[0; 4]);

            let mut short = vec![0i16; 15];
            assert!(v.save_to_slice(&mut short).is_err());
            assert_eq!(short, vec![0; 15]);
        }
    }

    mod roundtrip_tests {
        use super::*;

        #[test]
        fn test_load_save_roundtrip_bitwise() {
            // NaN payloads and negative zero survive unchanged
            let bits = [0x7FC0_0001u32, 0x8000_0000, 0xFF80_0000, 1, 2, 3, 4, 5];
            let input = bits.map(f32::from_bits);
            let v = unsafe { F32x8::load(input.as_ptr()) }.expect("valid pointer");
            let mut out = [0.0f32; 8];
            unsafe { v.save(out.as_mut_ptr()) }.expect("valid pointer");
            assert_eq!(out.map(f32::to_bits), bits);
        }

        #[test]
        fn test_aligned_roundtrip() {
            let ptr = alloc_aligned::<u64>(4, VECTOR_BYTES);
            let v = U64x4::from_array([u64::MAX, 0, 1 << 63, 42]);
            unsafe { v.save_aligned(ptr) }.expect("valid pointer");
            let back = unsafe { U64x4::load(ptr) }.expect("valid pointer");
            dealloc_aligned(ptr, 4, VECTOR_BYTES);
            assert_eq!(back, v);
        }
    }

    mod indexing_tests {
        use super::*;

        #[test]
        fn test_index_every_lane() {
            let lanes: [i8; 32] = std::array::from_fn(|i| i as i8 - 10);
            let v = I8x32::from_array(lanes);
            for (i, expected) in lanes.iter().enumerate() {
                assert_eq!(v[i], *expected);
            }
        }

        #[test]
        #[should_panic(expected = "Index out of range")]
        fn test_index_out_of_range_panics() {
            let v = I32x8::zero();
            let _ = v[8];
        }

        #[test]
        fn test_try_get() {
            let v = F64x4::from_array([1.0, 2.0, 3.0, 4.0]);
            assert_eq!(v.try_get(3), Ok(4.0));
            assert_eq!(v.try_get(4), Err(error::index_out_of_range(4, 4)));
        }

        #[test]
        fn test_get_wrapping() {
            let v = U32x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
            assert_eq!(v.get_wrapping(9), 1);
            assert_eq!(v.get_wrapping(8 * 1000 + 7), 7);
        }
    }

    mod formatting_tests {
        use super::*;

        #[test]
        fn test_display_integers() {
            let v = I32x8::from_array([1, -2, 3, -4, 5, -6, 7, -8]);
            assert_eq!(v.to_string(), "I32x8(1, -2, 3, -4, 5, -6, 7, -8)");
        }

        #[test]
        fn test_display_bytes_as_numbers() {
            let v = U8x32::splat(b'A');
            let text = v.to_string();
            assert!(text.starts_with("U8x32(65, 65"));
            assert_eq!(text.matches("65").count(), 32);
        }

        #[test]
        fn test_display_signed_bytes_as_numbers() {
            let lanes: [i8; 32] = std::array::from_fn(|i| if i % 2 == 0 { -1 } else { i8::MIN });
            let text = I8x32::from_array(lanes).to_string();
            assert!(text.starts_with("I8x32(-1, -128, -1, -128"), "{text}");
            assert!(text.ends_with("-1, -128)"), "{text}");
            assert_eq!(text.matches("-1,").count(), 16);
        }

        #[test]
        fn test_display_floats() {
            let v = F64x4::from_array([1.5, -0.25, 0.0, 100.0]);
            assert_eq!(v.to_string(), "F64x4(1.5, -0.25, 0, 100)");
        }

        #[test]
        fn test_debug() {
            let v = I64x4::from_array([1, 2, 3, 4]);
            assert_eq!(format!("{v:?}"), "I64x4(1, 2, 3, 4)");
        }
    }
}
