//! Dynamically typed values.
//!
//! [`Value`] is what strategies compare and hash: the values returned by a
//! [`crate::ValueSupplier`] and the field values read through
//! [`crate::Reflect`]. Primitive arrays keep their element kind, so two arrays
//! are only equal when both kind and contents match; multi-dimensional arrays
//! are [`Value::Array`]s of arrays.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::equal::Equal;
use crate::hash::HashCode;

/// A user-defined value stored inside a [`Value`].
///
/// Implemented for every `Equal + HashCode + Debug + 'static` type.
pub trait DynObject: Any + fmt::Debug {
    /// Equality against another object; false when the concrete types differ.
    fn dyn_equal(&self, other: &dyn DynObject) -> bool;

    fn dyn_hash_code(&self) -> i32;

    fn as_any(&self) -> &dyn Any;
}

impl<T> DynObject for T
where
    T: Equal + HashCode + fmt::Debug + 'static,
{
    fn dyn_equal(&self, other: &dyn DynObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.equal(other))
    }

    fn dyn_hash_code(&self) -> i32 {
        self.hash_code()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    BoolArray(Vec<bool>),
    ByteArray(Vec<i8>),
    CharArray(Vec<char>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    /// Array of references, including arrays of arrays.
    Array(Vec<Value>),
    Object(Arc<dyn DynObject>),
}

impl Value {
    /// Wrap a user-defined value.
    pub fn object<T: DynObject>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::BoolArray(_)
                | Self::ByteArray(_)
                | Self::CharArray(_)
                | Self::ShortArray(_)
                | Self::IntArray(_)
                | Self::LongArray(_)
                | Self::FloatArray(_)
                | Self::DoubleArray(_)
                | Self::Array(_)
        )
    }
}

impl Equal for Value {
    fn equal(&self, other: &Self) -> bool {
        use Value::*;

        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a.equal(b),
            (Byte(a), Byte(b)) => a.equal(b),
            (Char(a), Char(b)) => a.equal(b),
            (Short(a), Short(b)) => a.equal(b),
            (Int(a), Int(b)) => a.equal(b),
            (Long(a), Long(b)) => a.equal(b),
            (Float(a), Float(b)) => a.equal(b),
            (Double(a), Double(b)) => a.equal(b),
            (Str(a), Str(b)) => a.equal(b),
            (BoolArray(a), BoolArray(b)) => a.equal(b),
            (ByteArray(a), ByteArray(b)) => a.equal(b),
            (CharArray(a), CharArray(b)) => a.equal(b),
            (ShortArray(a), ShortArray(b)) => a.equal(b),
            (IntArray(a), IntArray(b)) => a.equal(b),
            (LongArray(a), LongArray(b)) => a.equal(b),
            (FloatArray(a), FloatArray(b)) => a.equal(b),
            (DoubleArray(a), DoubleArray(b)) => a.equal(b),
            (Array(a), Array(b)) => a.equal(b),
            (Object(a), Object(b)) => Arc::ptr_eq(a, b) || (**a).dyn_equal(&**b),
            _ => false,
        }
    }
}

impl HashCode for Value {
    fn hash_code(&self) -> i32 {
        use Value::*;

        match self {
            Null => 0,
            Bool(v) => v.hash_code(),
            Byte(v) => v.hash_code(),
            Char(v) => v.hash_code(),
            Short(v) => v.hash_code(),
            Int(v) => v.hash_code(),
            Long(v) => v.hash_code(),
            Float(v) => v.hash_code(),
            Double(v) => v.hash_code(),
            Str(v) => v.hash_code(),
            BoolArray(v) => v.hash_code(),
            ByteArray(v) => v.hash_code(),
            CharArray(v) => v.hash_code(),
            ShortArray(v) => v.hash_code(),
            IntArray(v) => v.hash_code(),
            LongArray(v) => v.hash_code(),
            FloatArray(v) => v.hash_code(),
            DoubleArray(v) => v.hash_code(),
            Array(v) => v.hash_code(),
            Object(v) => v.dyn_hash_code(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

// Bitwise float comparison keeps `equal` reflexive.
impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

/// Conversion into a [`Value`] by reference.
pub trait IntoValue {
    fn to_value(&self) -> Value;
}

/// Element types that know which array kind a slice of them becomes.
pub trait ArrayElement: Sized {
    fn array_value(items: &[Self]) -> Value;
}

macro_rules! impl_primitive_value {
    ($($t:ty => $scalar:ident, $array:ident;)*) => {
        $(
            impl IntoValue for $t {
                fn to_value(&self) -> Value {
                    Value::$scalar(*self)
                }
            }

            impl ArrayElement for $t {
                fn array_value(items: &[Self]) -> Value {
                    Value::$array(items.to_vec())
                }
            }

            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::$scalar(value)
                }
            }

            impl From<Vec<$t>> for Value {
                fn from(values: Vec<$t>) -> Self {
                    Value::$array(values)
                }
            }
        )*
    };
}

impl_primitive_value! {
    bool => Bool, BoolArray;
    i8 => Byte, ByteArray;
    char => Char, CharArray;
    i16 => Short, ShortArray;
    i32 => Int, IntArray;
    i64 => Long, LongArray;
    f32 => Float, FloatArray;
    f64 => Double, DoubleArray;
}

macro_rules! impl_reference_element {
    ($($t:ty),*) => {
        $(
            impl ArrayElement for $t {
                fn array_value(items: &[Self]) -> Value {
                    Value::Array(items.iter().map(IntoValue::to_value).collect())
                }
            }
        )*
    };
}

impl_reference_element!(String, &str, Value);

impl<T: ArrayElement> ArrayElement for Vec<T> {
    fn array_value(items: &[Self]) -> Value {
        Value::Array(items.iter().map(IntoValue::to_value).collect())
    }
}

impl<T: IntoValue> ArrayElement for Option<T> {
    fn array_value(items: &[Self]) -> Value {
        Value::Array(items.iter().map(IntoValue::to_value).collect())
    }
}

impl IntoValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl IntoValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl IntoValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ArrayElement> IntoValue for [T] {
    fn to_value(&self) -> Value {
        T::array_value(self)
    }
}

impl<T: ArrayElement> IntoValue for Vec<T> {
    fn to_value(&self) -> Value {
        T::array_value(self)
    }
}

impl<T: ArrayElement, const N: usize> IntoValue for [T; N] {
    fn to_value(&self) -> Value {
        T::array_value(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, IntoValue::to_value)
    }
}

impl<T: IntoValue + ?Sized> IntoValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: IntoValue + ?Sized> IntoValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
