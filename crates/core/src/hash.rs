//! Hash-code primitives.
//!
//! Every hash in this crate is built from one rule: `hash(seed, v) = seed * 31
//! + contribution(v)`, evaluated with wrapping `i32` arithmetic. A value's
//! contribution is its [`HashCode::hash_code`]; arrays contribute the fold of
//! their elements seeded at [`MULTI_VALUE`].
//!
//! ```ignore
//! let mut h = MULTI_VALUE;
//! h = hash(h, &self.id);
//! h = hash(h, &self.name);
//! h = hash(h, &self.scores); // slice, folded as one contribution
//! ```

use std::rc::Rc;
use std::sync::Arc;

/// Seed for a hash made of a single value.
pub const SINGLE_VALUE: i32 = 0;

/// Seed for a hash accumulated over several values (the "additive" seed).
pub const MULTI_VALUE: i32 = 1;

/// Multiplier applied to the running seed.
pub const PRIME: i32 = 31;

const BOOL_TRUE: i32 = 1231;
const BOOL_FALSE: i32 = 1237;

/// Canonical NaN bit patterns; every NaN hashes and compares as these.
const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;
const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// A value that contributes an `i32` to a running hash.
pub trait HashCode {
    fn hash_code(&self) -> i32;
}

/// Fold `value` into `seed`.
#[inline]
pub fn hash<T: HashCode + ?Sized>(seed: i32, value: &T) -> i32 {
    PRIME.wrapping_mul(seed).wrapping_add(value.hash_code())
}

/// Bit pattern of `value` with every NaN collapsed to the canonical NaN.
pub fn canonical_f32_bits(value: f32) -> u32 {
    if value.is_nan() {
        CANONICAL_NAN_F32
    } else {
        value.to_bits()
    }
}

/// Bit pattern of `value` with every NaN collapsed to the canonical NaN.
pub fn canonical_f64_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN_F64
    } else {
        value.to_bits()
    }
}

/// XOR of the two 32-bit halves.
#[inline]
fn fold_long(value: i64) -> i32 {
    let bits = value as u64;
    (bits ^ (bits >> 32)) as i32
}

impl HashCode for bool {
    fn hash_code(&self) -> i32 {
        if *self { BOOL_TRUE } else { BOOL_FALSE }
    }
}

macro_rules! impl_hash_code_widening {
    ($($t:ty),*) => {
        $(
            impl HashCode for $t {
                #[inline]
                fn hash_code(&self) -> i32 {
                    i32::from(*self)
                }
            }
        )*
    };
}

impl_hash_code_widening!(i8, i16, i32);

impl HashCode for char {
    #[inline]
    fn hash_code(&self) -> i32 {
        u32::from(*self) as i32
    }
}

impl HashCode for i64 {
    #[inline]
    fn hash_code(&self) -> i32 {
        fold_long(*self)
    }
}

impl HashCode for f32 {
    fn hash_code(&self) -> i32 {
        canonical_f32_bits(*self) as i32
    }
}

impl HashCode for f64 {
    fn hash_code(&self) -> i32 {
        fold_long(canonical_f64_bits(*self) as i64)
    }
}

/// Polynomial over the UTF-16 code units, seeded at zero.
impl HashCode for str {
    fn hash_code(&self) -> i32 {
        self.encode_utf16()
            .fold(SINGLE_VALUE, |h, unit| hash(h, &i32::from(unit)))
    }
}

impl HashCode for String {
    fn hash_code(&self) -> i32 {
        self.as_str().hash_code()
    }
}

impl<T: HashCode> HashCode for [T] {
    fn hash_code(&self) -> i32 {
        self.iter().fold(MULTI_VALUE, |h, element| hash(h, element))
    }
}

impl<T: HashCode> HashCode for Vec<T> {
    fn hash_code(&self) -> i32 {
        self.as_slice().hash_code()
    }
}

impl<T: HashCode, const N: usize> HashCode for [T; N] {
    fn hash_code(&self) -> i32 {
        self.as_slice().hash_code()
    }
}

/// `None` is the null reference and contributes zero.
impl<T: HashCode> HashCode for Option<T> {
    fn hash_code(&self) -> i32 {
        self.as_ref().map_or(0, HashCode::hash_code)
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Box<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Rc<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Arc<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}
