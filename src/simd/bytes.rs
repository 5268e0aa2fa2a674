//! Raw byte access and string conversions.
//!
//! Every packed vector can be viewed as its 32 little-endian bytes. The
//! 8-bit types additionally convert from and to text, treating the register
//! as a NUL-padded 32-byte string.

use super::backend;
use super::packed::Packed;
use super::traits::Lane;
use super::VECTOR_BYTES;

impl<E: Lane> Packed<E> {
    /// Builds a vector from the first `min(bytes.len(), 32)` bytes; the
    /// remaining bytes are zero.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut raw = [0u8; VECTOR_BYTES];
        let n = bytes.len().min(VECTOR_BYTES);
        raw[..n].copy_from_slice(&bytes[..n]);
        Self::from_register(unsafe { backend::load_unaligned(raw.as_ptr()) })
    }

    /// The 32 bytes of the register in memory order.
    pub fn to_bytes(self) -> [u8; VECTOR_BYTES] {
        let mut raw = [0u8; VECTOR_BYTES];
        unsafe { backend::store_unaligned(self.register(), raw.as_mut_ptr()) };
        raw
    }
}

macro_rules! impl_text {
    ($($ty:ty),*) => {
        $(
            impl From<&str> for Packed<$ty> {
                /// First 32 bytes of the UTF-8 encoding, zero padded.
                fn from(text: &str) -> Self {
                    Self::from_bytes(text.as_bytes())
                }
            }

            impl Packed<$ty> {
                /// Reads the register as a NUL-terminated string.
                ///
                /// Stops at the first zero byte (or after 32 bytes); invalid
                /// UTF-8 is replaced with `U+FFFD`.
                pub fn to_string_lossy(self) -> String {
                    let bytes = self.to_bytes();
                    let end = bytes.iter().position(|&b| b == 0).unwrap_or(VECTOR_BYTES);
                    String::from_utf8_lossy(&bytes[..end]).into_owned()
                }
            }
        )*
    };
}

impl_text!(u8, i8);
