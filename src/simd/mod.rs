//! 256-bit packed-lane vectors.
//!
//! The backend is picked at compile time. x86 code generated with AVX2
//! enabled (`-C target-cpu=native` or `-C target-feature=+avx2`) uses the
//! intrinsic backend, and the AVX-512 paths inside it additionally need the
//! `avx512` flag `build.rs` emits on nightly. Everything else uses the
//! portable lane-wise backend. Both produce bit-identical results.

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2"))]
pub(crate) mod avx2;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2"))]
pub(crate) use avx2 as backend;

#[cfg(not(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2")))]
pub(crate) mod fallback;

#[cfg(not(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2")))]
pub(crate) use fallback as backend;

pub mod bytes;
pub mod constants;
pub mod math;
mod ops;
pub mod packed;
pub mod reduce;
pub(crate) mod scalar;
pub mod slice;
pub mod traits;

pub use backend::Register;
pub use math::Elementary;
pub use packed::{
    F32x8, F64x4, I16x16, I32x8, I64x4, I8x32, Packed, U16x16, U32x8, U64x4, U8x32,
};
pub use reduce::{par_sum, sum};
pub use slice::{LaneAdd, LaneMul, LaneSub};
pub use traits::{Arithmetic, FloatArithmetic, IntegerArithmetic, Lane, SignedArithmetic};

/// Size of a packed vector in bytes and the alignment `save_aligned` expects.
pub const VECTOR_BYTES: usize = 32;
