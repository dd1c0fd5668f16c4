//! Capabilities a target implements to opt into value or field equality.

use crate::value::Value;

/// Supplies the ordered values that define an object's equality and hash.
///
/// ```ignore
/// impl ValueSupplier for Money {
///     fn values(&self) -> Vec<Value> {
///         vec![self.amount.to_value(), self.currency.to_value()]
///     }
/// }
/// ```
pub trait ValueSupplier {
    fn values(&self) -> Vec<Value>;
}

/// How a declared field takes part in field-based equality.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Per-instance state; compared and hashed.
    Instance,
    /// Shared by every instance of the type; ignored.
    Static,
    /// Holds an equality strategy; ignored so delegation cannot recurse.
    Strategy,
}

/// A declared field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldInfo {
    pub const fn instance(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Instance,
        }
    }

    pub const fn static_field(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Static,
        }
    }

    pub const fn strategy(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Strategy,
        }
    }

    pub fn is_compared(&self) -> bool {
        self.kind == FieldKind::Instance
    }
}

/// Field introspection used by field-based strategies.
///
/// `fields` lists the declared fields in declaration order; `field` reads one
/// by name and returns `None` when the field does not exist on `self`. Usually
/// generated with [`reflect!`](crate::reflect).
pub trait Reflect {
    fn fields(&self) -> Vec<FieldInfo>;

    fn field(&self, name: &str) -> Option<Value>;
}

/// Implement [`Reflect`] for a struct with named fields.
///
/// Listed fields are instance fields, read through [`IntoValue`](crate::IntoValue).
/// Fields after `skip` are declared as [`FieldKind::Strategy`] and never read.
///
/// ```ignore
/// struct Coords { x: i32, y: i32, origin: Option<Arc<Coords>> }
/// reflect!(Coords { x, y } skip { origin });
///
/// struct Point {
///     coords: Arc<Coords>,
///     eq: EqualityStrategy<Coords>,
/// }
///
/// let coords = Arc::new(Coords { x: 1, y: 2, origin: None });
/// let point = Point { eq: EqualityStrategy::field_based(coords.clone()), coords };
/// ```
#[macro_export]
macro_rules! reflect {
    ($ty:ty { $($field:ident),* $(,)? } skip { $($skipped:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::FieldInfo> {
                ::std::vec![
                    $($crate::FieldInfo::instance(::core::stringify!($field)),)*
                    $($crate::FieldInfo::strategy(::core::stringify!($skipped)),)*
                ]
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::Value> {
                match name {
                    $(::core::stringify!($field) => ::core::option::Option::Some(
                        $crate::IntoValue::to_value(&self.$field),
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::reflect!($ty { $($field),* } skip {});
    };
}
