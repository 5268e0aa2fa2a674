//! Algebraic properties that must hold for every lane type.
//!
//! Inputs come from a seeded `StdRng` so failures are reproducible.

use lanes256::simd::{
    sum, F32x8, F64x4, I16x16, I32x8, I64x4, I8x32, Packed, U16x16, U32x8, U64x4, U8x32,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ROUNDS: usize = 200;

fn rng() -> StdRng {
    StdRng::seed_from_u64(12345)
}

fn random_bytes(rng: &mut StdRng) -> [u8; 32] {
    std::array::from_fn(|_| rng.random())
}

/// Properties shared by every lane type: raw storage and bitwise algebra.
macro_rules! storage_properties {
    ($($module:ident => $vector:ty, $lane:ty;)*) => {
        $(
            mod $module {
                use super::*;

                #[test]
                fn test_load_save_roundtrip() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let bytes = random_bytes(&mut rng);
                        let value = <$vector>::from_bytes(&bytes);

                        let mut buffer = [<$lane>::default(); 256 / (8 * std::mem::size_of::<$lane>())];
                        unsafe { value.save(buffer.as_mut_ptr()) }.expect("valid pointer");
                        let reloaded = unsafe { <$vector>::load(buffer.as_ptr()) }.expect("valid pointer");

                        assert_eq!(reloaded.to_bytes(), bytes);
                    }
                }

                #[test]
                fn test_construct_then_index() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let lanes = <$vector>::from_bytes(&random_bytes(&mut rng)).to_array();
                        let v = <$vector>::from(lanes);
                        for (i, lane) in lanes.iter().enumerate() {
                            assert_eq!(v[i].to_le_bytes(), lane.to_le_bytes(), "lane {i}");
                        }
                    }
                }

                #[test]
                fn test_mask_distributivity() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let a = <$vector>::from_bytes(&random_bytes(&mut rng));
                        let m = <$vector>::from_bytes(&random_bytes(&mut rng));
                        assert_eq!(((a & m) | (a & !m)).to_bytes(), a.to_bytes());
                        assert_eq!(((a ^ m) ^ m).to_bytes(), a.to_bytes());
                    }
                }

                #[test]
                fn test_not_involution() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let a = <$vector>::from_bytes(&random_bytes(&mut rng));
                        assert_eq!((!!a).to_bytes(), a.to_bytes());
                        assert_eq!((a ^ !a).to_bytes(), [0xFF; 32]);
                    }
                }
            }
        )*
    };
}

storage_properties! {
    storage_i8 => I8x32, i8;
    storage_u8 => U8x32, u8;
    storage_i16 => I16x16, i16;
    storage_u16 => U16x16, u16;
    storage_i32 => I32x8, i32;
    storage_u32 => U32x8, u32;
    storage_i64 => I64x4, i64;
    storage_u64 => U64x4, u64;
    storage_f32 => F32x8, f32;
    storage_f64 => F64x4, f64;
}

/// Arithmetic identities for integer lanes.
macro_rules! integer_properties {
    ($($module:ident => $vector:ty, $lane:ty;)*) => {
        $(
            mod $module {
                use super::*;

                fn random_vector(rng: &mut StdRng) -> $vector {
                    <$vector>::from_bytes(&random_bytes(rng))
                }

                #[test]
                fn test_additive_identity() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let a = random_vector(&mut rng);
                        assert_eq!(a + <$vector>::zero(), a);
                        assert_eq!(a - <$vector>::zero(), a);
                    }
                }

                #[test]
                fn test_multiplicative_identity() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let a = random_vector(&mut rng);
                        assert_eq!(a * <$vector>::splat(1), a);
                        assert_eq!(a / <$vector>::splat(1), a);
                    }
                }

                #[test]
                fn test_division_remainder_identity() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let a = random_vector(&mut rng);
                        let mut b = random_vector(&mut rng).to_array();
                        for lane in b.iter_mut() {
                            if *lane == 0 {
                                *lane = 1;
                            }
                        }
                        let b = <$vector>::from(b);
                        assert_eq!((a / b) * b + (a % b), a, "a = {a}, b = {b}");
                    }
                }

                #[test]
                fn test_horizontal_sum_is_left_fold() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let v1 = random_vector(&mut rng);
                        let v2 = random_vector(&mut rng);
                        let v3 = random_vector(&mut rng);
                        assert_eq!(sum([v1, v2, v3]), ((<$vector>::zero() + v1) + v2) + v3);
                    }
                }

                #[test]
                fn test_integer_equality_is_bitwise() {
                    let mut rng = rng();
                    for _ in 0..ROUNDS {
                        let a = random_vector(&mut rng);
                        let mut lanes = a.to_array();
                        let i = rng.random_range(0..lanes.len());
                        lanes[i] ^= 1;
                        assert_eq!(a, <$vector>::from(a.to_array()));
                        assert_ne!(a, <$vector>::from(lanes));
                    }
                }
            }
        )*
    };
}

integer_properties! {
    integer_i8 => I8x32, i8;
    integer_u8 => U8x32, u8;
    integer_i16 => I16x16, i16;
    integer_u16 => U16x16, u16;
    integer_i32 => I32x8, i32;
    integer_u32 => U32x8, u32;
    integer_i64 => I64x4, i64;
    integer_u64 => U64x4, u64;
}

/// `(a << k) >> k` clears the top `k` bits of every unsigned lane.
macro_rules! shift_inverts {
    ($($name:ident => $vector:ty, $lane:ty;)*) => {
        $(
            #[test]
            fn $name() {
                let mut rng = rng();
                for _ in 0..ROUNDS {
                    let a = <$vector>::from_bytes(&random_bytes(&mut rng));
                    let k = rng.random_range(0..<$lane>::BITS);
                    let expected = a & <$vector>::splat(<$lane>::MAX >> k);
                    assert_eq!((a << k) >> k, expected, "k = {k}");
                }
            }
        )*
    };
}

shift_inverts! {
    test_shift_inverts_u8 => U8x32, u8;
    test_shift_inverts_u16 => U16x16, u16;
    test_shift_inverts_u32 => U32x8, u32;
    test_shift_inverts_u64 => U64x4, u64;
}

macro_rules! abs_matches_wrapping_abs {
    ($($name:ident => $vector:ty, $lane:ty;)*) => {
        $(
            #[test]
            fn $name() {
                let mut rng = rng();
                for _ in 0..ROUNDS {
                    let lanes: Vec<$lane> = (0..<$vector>::LANES).map(|_| rng.random()).collect();
                    let v: $vector = lanes.iter().copied().collect();
                    let expected: Vec<$lane> = lanes.iter().map(|x| x.wrapping_abs()).collect();
                    assert_eq!(v.abs().to_vec(), expected);
                }
                assert_eq!(<$vector>::splat(<$lane>::MIN).abs(), <$vector>::splat(<$lane>::MIN));
            }
        )*
    };
}

abs_matches_wrapping_abs! {
    test_abs_i8 => I8x32, i8;
    test_abs_i16 => I16x16, i16;
    test_abs_i32 => I32x8, i32;
    test_abs_i64 => I64x4, i64;
}

#[test]
fn test_unsigned_16_wraps_to_zero() {
    assert_eq!(U16x16::splat(0xFFFF) + U16x16::splat(1), U16x16::zero());
}

#[test]
fn test_float_identities() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let lanes: [f32; 8] = std::array::from_fn(|_| rng.random_range(-1e6f32..1e6));
        let a = F32x8::from(lanes);
        assert_eq!(a + F32x8::zero(), a);
        assert_eq!(a - F32x8::zero(), a);
        assert_eq!(a * F32x8::splat(1.0), a);

        let lanes: [f64; 4] = std::array::from_fn(|_| rng.random_range(-1e12f64..1e12));
        let b = F64x4::from(lanes);
        assert_eq!(b * F64x4::splat(1.0), b);
        assert_eq!(sum([b, b, b]), (b + b) + b);
    }
}

#[test]
fn test_float_nan_breaks_multiplicative_identity() {
    let a = F64x4::from([1.0, f64::NAN, 3.0, 4.0]);
    assert_ne!(a * F64x4::splat(1.0), a);
    assert_ne!(a, a);
}

#[test]
fn test_signed_zero_equality() {
    assert_eq!(F32x8::splat(0.0), F32x8::splat(-0.0));
    assert_eq!(F64x4::splat(-0.0), F64x4::splat(0.0));
    assert_eq!(
        F64x4::from([0.0, -0.0, 1.0, -2.0]),
        F64x4::from([-0.0, 0.0, 1.0, -2.0])
    );
}

#[test]
fn test_generic_helpers_over_packed() {
    fn lanes_of<E: lanes256::simd::Lane>(_: Packed<E>) -> usize {
        Packed::<E>::LANES
    }

    assert_eq!(lanes_of(I8x32::zero()), 32);
    assert_eq!(lanes_of(U16x16::zero()), 16);
    assert_eq!(lanes_of(F32x8::zero()), 8);
    assert_eq!(lanes_of(U64x4::zero()), 4);
}
