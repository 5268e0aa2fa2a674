//! Lane-wise division and remainder against a scalar reference.
//!
//! The reference uses wrapping division with two extra rules: a zero
//! divisor yields a zero quotient, and the remainder is then the dividend.

use lanes256::simd::{I16x16, I32x8, I64x4, I8x32, U16x16, U32x8, U64x4, U8x32};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ROUNDS: usize = 500;

macro_rules! division_tests {
    ($($module:ident => $vector:ty, $lane:ty;)*) => {
        $(
            mod $module {
                use super::*;

                fn reference_div(a: $lane, b: $lane) -> $lane {
                    if b == 0 { 0 } else { a.wrapping_div(b) }
                }

                fn reference_rem(a: $lane, b: $lane) -> $lane {
                    if b == 0 { a } else { a.wrapping_rem(b) }
                }

                fn random_lanes(rng: &mut StdRng) -> Vec<$lane> {
                    let bytes: [u8; 32] = std::array::from_fn(|_| rng.random());
                    <$vector>::from_bytes(&bytes).to_vec()
                }

                #[test]
                fn test_random_division() {
                    let mut rng = StdRng::seed_from_u64(42);
                    for _ in 0..ROUNDS {
                        let a = random_lanes(&mut rng);
                        // small divisors hit the interesting rounding cases more often
                        let b: Vec<$lane> = (0..a.len())
                            .map(|_| match rng.random_range(0..3) {
                                0 => rng.random::<$lane>(),
                                1 => rng.random::<u8>() as $lane,
                                _ => rng.random_range(0..4u8) as $lane,
                            })
                            .collect();

                        let va = <$vector>::from_lanes(&a);
                        let vb = <$vector>::from_lanes(&b);
                        let quotient = (va / vb).to_vec();
                        let remainder = (va % vb).to_vec();

                        for i in 0..a.len() {
                            assert_eq!(quotient[i], reference_div(a[i], b[i]), "{} / {}", a[i], b[i]);
                            assert_eq!(remainder[i], reference_rem(a[i], b[i]), "{} % {}", a[i], b[i]);
                        }
                    }
                }

                #[test]
                fn test_extremes() {
                    let values = [<$lane>::MIN, <$lane>::MAX, 0, 1, <$lane>::MAX / 2];
                    for &a in &values {
                        for &b in &values {
                            let va = <$vector>::splat(a);
                            let vb = <$vector>::splat(b);
                            assert_eq!(va / vb, <$vector>::splat(reference_div(a, b)), "{a} / {b}");
                            assert_eq!(va % vb, <$vector>::splat(reference_rem(a, b)), "{a} % {b}");
                        }
                    }
                }

                #[test]
                fn test_zero_divisor() {
                    let a = <$vector>::splat(<$lane>::MAX);
                    assert_eq!(a / 0, <$vector>::zero());
                    assert_eq!(a % 0, a);

                    let mut b = a;
                    b /= <$vector>::zero();
                    assert_eq!(b, <$vector>::zero());
                }

                #[test]
                fn test_scalar_operand_forms() {
                    let a = <$vector>::splat(100);
                    assert_eq!(a / 7, <$vector>::splat(14));
                    assert_eq!(a % 7, <$vector>::splat(2));
                    assert_eq!(100 / <$vector>::splat(7), <$vector>::splat(14));
                    assert_eq!(100 % <$vector>::splat(7), <$vector>::splat(2));
                }
            }
        )*
    };
}

division_tests! {
    division_i8 => I8x32, i8;
    division_u8 => U8x32, u8;
    division_i16 => I16x16, i16;
    division_u16 => U16x16, u16;
    division_i32 => I32x8, i32;
    division_u32 => U32x8, u32;
    division_i64 => I64x4, i64;
    division_u64 => U64x4, u64;
}

macro_rules! signed_overflow_tests {
    ($($name:ident => $vector:ty, $lane:ty;)*) => {
        $(
            #[test]
            fn $name() {
                let a = <$vector>::splat(<$lane>::MIN);
                assert_eq!(a / -1, <$vector>::splat(<$lane>::MIN));
                assert_eq!(a % -1, <$vector>::zero());
                assert_eq!(<$vector>::splat(-7) / 2, <$vector>::splat(-3));
                assert_eq!(<$vector>::splat(-7) % 2, <$vector>::splat(-1));
                assert_eq!(<$vector>::splat(7) % -2, <$vector>::splat(1));
            }
        )*
    };
}

signed_overflow_tests! {
    test_signed_overflow_i8 => I8x32, i8;
    test_signed_overflow_i16 => I16x16, i16;
    test_signed_overflow_i32 => I32x8, i32;
    test_signed_overflow_i64 => I64x4, i64;
}

#[test]
fn test_unsigned_32_high_bit_dividends() {
    let a = U32x8::from([
        u32::MAX,
        0x8000_0000,
        0xFFFF_FFFE,
        0x8000_0001,
        3_000_000_000,
        4_000_000_000,
        1,
        0,
    ]);
    let b = U32x8::from([1, 3, 0xFFFF_FFFF, 0x8000_0000, 7, 4_000_000_001, 2, 5]);
    let expected: Vec<u32> = a.to_vec().iter().zip(b.to_vec()).map(|(x, y)| x / y).collect();
    assert_eq!((a / b).to_vec(), expected);
}
