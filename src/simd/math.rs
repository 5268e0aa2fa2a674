//! Elementary functions on floating-point vectors.
//!
//! Every function maps a vector to a vector lane by lane. The backend may
//! supply a whole-register kernel through
//! [`FloatArithmetic::vectorised`]; otherwise the scalar function from
//! [`scalar`] is applied to each lane in turn.
//!
//! The reciprocal functions are defined from the primary ones:
//! `cot = 1/tan`, `sec = 1/cos`, `csc = 1/sin` (and likewise for the
//! hyperbolic family), while their inverses take the reciprocal of the
//! argument first: `acot(x) = atan(1/x)`, `asec(x) = acos(1/x)`,
//! `acsc(x) = asin(1/x)`.
//!
//! `abs` is also available on the signed integer vectors, where it wraps:
//! `abs(MIN) == MIN`.

use num::Float;

use super::packed::Packed;
use super::scalar::map;
use super::traits::{FloatArithmetic, SignedArithmetic};

/// The elementary functions available on [`F32x8`](super::F32x8) and
/// [`F64x4`](super::F64x4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Elementary {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Csch,
    Asinh,
    Acosh,
    Atanh,
    Acoth,
    Asech,
    Acsch,
}

impl Elementary {
    /// Every function, in declaration order.
    pub const ALL: [Elementary; 24] = [
        Elementary::Sin,
        Elementary::Cos,
        Elementary::Tan,
        Elementary::Cot,
        Elementary::Sec,
        Elementary::Csc,
        Elementary::Asin,
        Elementary::Acos,
        Elementary::Atan,
        Elementary::Acot,
        Elementary::Asec,
        Elementary::Acsc,
        Elementary::Sinh,
        Elementary::Cosh,
        Elementary::Tanh,
        Elementary::Coth,
        Elementary::Sech,
        Elementary::Csch,
        Elementary::Asinh,
        Elementary::Acosh,
        Elementary::Atanh,
        Elementary::Acoth,
        Elementary::Asech,
        Elementary::Acsch,
    ];
}

/// Scalar implementation of `function` for lane type `T`.
pub fn scalar<T: Float>(function: Elementary) -> fn(T) -> T {
    match function {
        Elementary::Sin => |x: T| x.sin(),
        Elementary::Cos => |x: T| x.cos(),
        Elementary::Tan => |x: T| x.tan(),
        Elementary::Cot => |x: T| x.tan().recip(),
        Elementary::Sec => |x: T| x.cos().recip(),
        Elementary::Csc => |x: T| x.sin().recip(),
        Elementary::Asin => |x: T| x.asin(),
        Elementary::Acos => |x: T| x.acos(),
        Elementary::Atan => |x: T| x.atan(),
        Elementary::Acot => |x: T| x.recip().atan(),
        Elementary::Asec => |x: T| x.recip().acos(),
        Elementary::Acsc => |x: T| x.recip().asin(),
        Elementary::Sinh => |x: T| x.sinh(),
        Elementary::Cosh => |x: T| x.cosh(),
        Elementary::Tanh => |x: T| x.tanh(),
        Elementary::Coth => |x: T| x.tanh().recip(),
        Elementary::Sech => |x: T| x.cosh().recip(),
        Elementary::Csch => |x: T| x.sinh().recip(),
        Elementary::Asinh => |x: T| x.asinh(),
        Elementary::Acosh => |x: T| x.acosh(),
        Elementary::Atanh => |x: T| x.atanh(),
        Elementary::Acoth => |x: T| x.recip().atanh(),
        Elementary::Asech => |x: T| x.recip().acosh(),
        Elementary::Acsch => |x: T| x.recip().asinh(),
    }
}

macro_rules! named_functions {
    ($($name:ident => $function:ident),* $(,)?) => {
        $(
            #[doc = concat!("Applies [`Elementary::", stringify!($function), "`] to every lane.")]
            #[inline(always)]
            pub fn $name(self) -> Self {
                self.apply(Elementary::$function)
            }
        )*
    };
}

impl<E: FloatArithmetic> Packed<E> {
    /// Applies `function` to every lane, using the backend kernel when one exists.
    #[inline(always)]
    pub fn apply(self, function: Elementary) -> Self {
        let register = match E::vectorised(function) {
            Some(kernel) => kernel(self.register()),
            None => map::<E>(self.register(), scalar::<E>(function)),
        };
        Self::from_register(register)
    }

    /// Applies the scalar table to every lane, ignoring any backend kernel.
    pub fn apply_lanewise(self, function: Elementary) -> Self {
        Self::from_register(map::<E>(self.register(), scalar::<E>(function)))
    }

    /// Clears the sign bit of every lane.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_register(E::abs_lanes(self.register()))
    }

    named_functions! {
        sin => Sin, cos => Cos, tan => Tan, cot => Cot, sec => Sec, csc => Csc,
        asin => Asin, acos => Acos, atan => Atan, acot => Acot, asec => Asec, acsc => Acsc,
        sinh => Sinh, cosh => Cosh, tanh => Tanh, coth => Coth, sech => Sech, csch => Csch,
        asinh => Asinh, acosh => Acosh, atanh => Atanh, acoth => Acoth, asech => Asech,
        acsch => Acsch,
    }
}

macro_rules! signed_abs {
    ($($ty:ty),*) => {
        $(
            impl Packed<$ty> {
                /// Absolute value of every lane. `MIN` has no positive counterpart and stays `MIN`.
                #[inline(always)]
                pub fn abs(self) -> Self {
                    Self::from_register(<$ty as SignedArithmetic>::abs_lanes(self.register()))
                }
            }
        )*
    };
}

signed_abs!(i8, i16, i32, i64);
