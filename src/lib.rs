#![cfg_attr(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        rustc_channel = "nightly",
        avx512
    ),
    feature(avx512_target_feature, stdarch_x86_avx512)
)]

//! Fixed-width 256-bit vector value types.
//!
//! Each type packs N lanes of one scalar type into a single 256-bit
//! register and behaves like an ordinary value: it is `Copy`, compares with
//! `==`, prints as `Name(v0, v1, …)` and supports the usual arithmetic,
//! bitwise and shift operators lane by lane.
//!
//! ```rust
//! use lanes256::simd::{I32x8, U16x16};
//!
//! let a = I32x8::from([1, 2, 3, 4, 5, 6, 7, 8]);
//! let b = I32x8::from([8, 7, 6, 5, 4, 3, 2, 1]);
//! assert_eq!(a + b, I32x8::splat(9));
//!
//! let wrapped = U16x16::splat(0xFFFF) + 1;
//! assert_eq!(wrapped, U16x16::zero());
//! ```

pub mod error;
pub mod simd;
