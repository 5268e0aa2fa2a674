//! Read-only 256-bit constants shared by the emulation kernels.
//!
//! Every constant is a `const` item folded at compile time from a byte
//! pattern, so there is no initialisation order to worry about.
//!
//! The `CRATE_<from>_<to>` masks keep the even `from`-bit lanes inside
//! each `to`-bit group (the low end of the wider lane); `_INVERSE` keeps the
//! odd ones. Together they split a register into two halves that can be
//! processed with wider-lane instructions and then merged back.

use super::{backend, Register};

const fn splat8(value: u8) -> [u8; 32] {
    [value; 32]
}

const fn splat16(value: u16) -> [u8; 32] {
    let bytes = value.to_le_bytes();
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = bytes[i % 2];
        i += 1;
    }
    out
}

const fn splat32(value: u32) -> [u8; 32] {
    let bytes = value.to_le_bytes();
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = bytes[i % 4];
        i += 1;
    }
    out
}

const fn splat64(value: u64) -> [u8; 32] {
    let bytes = value.to_le_bytes();
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = bytes[i % 8];
        i += 1;
    }
    out
}

/// All 256 bits cleared.
pub const ZERO: Register = backend::from_bytes(splat8(0));

/// All 256 bits set.
pub const ONES: Register = backend::from_bytes(splat8(0xFF));

pub const UNIT_8: Register = backend::from_bytes(splat8(1));
pub const UNIT_16: Register = backend::from_bytes(splat16(1));
pub const UNIT_32: Register = backend::from_bytes(splat32(1));
pub const UNIT_64: Register = backend::from_bytes(splat64(1));
pub const UNIT_F32: Register = backend::from_bytes(splat32(0x3F80_0000));
pub const UNIT_F64: Register = backend::from_bytes(splat64(0x3FF0_0000_0000_0000));

pub const CRATE_8_16: Register = backend::from_bytes(splat16(0x00FF));
pub const CRATE_8_16_INVERSE: Register = backend::from_bytes(splat16(0xFF00));
pub const CRATE_8_32: Register = backend::from_bytes(splat32(0x0000_00FF));
pub const CRATE_16_32: Register = backend::from_bytes(splat32(0x0000_FFFF));
pub const CRATE_16_32_INVERSE: Register = backend::from_bytes(splat32(0xFFFF_0000));
pub const CRATE_32_64: Register = backend::from_bytes(splat64(0x0000_0000_FFFF_FFFF));

pub const SIGN_8: Register = backend::from_bytes(splat8(0x80));
pub const SIGN_16: Register = backend::from_bytes(splat16(0x8000));
pub const SIGN_32: Register = backend::from_bytes(splat32(0x8000_0000));
pub const SIGN_64: Register = backend::from_bytes(splat64(0x8000_0000_0000_0000));

/// Strips the sign bit of binary32 lanes.
pub const NO_SIGN_32: Register = backend::from_bytes(splat32(0x7FFF_FFFF));

/// Strips the sign bit of binary64 lanes.
pub const NO_SIGN_64: Register = backend::from_bytes(splat64(0x7FFF_FFFF_FFFF_FFFF));
