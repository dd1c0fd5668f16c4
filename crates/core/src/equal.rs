//! Equality primitives matching [`crate::hash`].
//!
//! Floats compare by canonical bit pattern rather than numerically: every NaN
//! equals every other NaN, and `0.0` differs from `-0.0`. This keeps `equal`
//! reflexive and consistent with the float hash codes.

use std::rc::Rc;
use std::sync::Arc;

use crate::hash::{canonical_f32_bits, canonical_f64_bits};

/// Value equality consistent with [`crate::HashCode`].
pub trait Equal {
    fn equal(&self, other: &Self) -> bool;
}

/// Compare two values.
#[inline]
pub fn equal<T: Equal + ?Sized>(a: &T, b: &T) -> bool {
    a.equal(b)
}

macro_rules! impl_equal_by_eq {
    ($($t:ty),*) => {
        $(
            impl Equal for $t {
                #[inline]
                fn equal(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_equal_by_eq!(bool, i8, char, i16, i32, i64, str, String);

impl Equal for f32 {
    fn equal(&self, other: &Self) -> bool {
        canonical_f32_bits(*self) == canonical_f32_bits(*other)
    }
}

impl Equal for f64 {
    fn equal(&self, other: &Self) -> bool {
        canonical_f64_bits(*self) == canonical_f64_bits(*other)
    }
}

impl<T: Equal> Equal for [T] {
    fn equal(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.equal(b))
    }
}

impl<T: Equal> Equal for Vec<T> {
    fn equal(&self, other: &Self) -> bool {
        self.as_slice().equal(other.as_slice())
    }
}

impl<T: Equal, const N: usize> Equal for [T; N] {
    fn equal(&self, other: &Self) -> bool {
        self.as_slice().equal(other.as_slice())
    }
}

/// `None` is the null reference: equal only to itself.
impl<T: Equal> Equal for Option<T> {
    fn equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.equal(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Equal + ?Sized> Equal for &T {
    fn equal(&self, other: &Self) -> bool {
        (**self).equal(*other)
    }
}

impl<T: Equal + ?Sized> Equal for Box<T> {
    fn equal(&self, other: &Self) -> bool {
        (**self).equal(&**other)
    }
}

impl<T: Equal + ?Sized> Equal for Rc<T> {
    fn equal(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other) || (**self).equal(&**other)
    }
}

impl<T: Equal + ?Sized> Equal for Arc<T> {
    fn equal(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).equal(&**other)
    }
}
