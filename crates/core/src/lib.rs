//! `equality-core` — building blocks for `equals`/`hashCode`-style semantics.
//!
//! - [`hash()`] and [`equal()`]: the primitive folding and comparison rules.
//! - [`HashCodeBuilder`]: fluent hash composition.
//! - [`EqualityStrategy`]: reference, field, value and cached strategies a
//!   type can delegate its equality and hashing to.
//!
//! The crate has no I/O and emits only `tracing` events; install a subscriber
//! (see `equality-observability`) to see them.

pub mod builder;
pub mod equal;
pub mod error;
pub mod hash;
pub mod strategy;
pub mod supplier;
pub mod value;

pub use builder::HashCodeBuilder;
pub use equal::{Equal, equal};
pub use error::{EqualityError, EqualityResult};
pub use hash::{HashCode, MULTI_VALUE, PRIME, SINGLE_VALUE, hash};
pub use strategy::{EqualityStrategy, StrategyKind};
pub use supplier::{FieldInfo, FieldKind, Reflect, ValueSupplier};
pub use value::{ArrayElement, DynObject, IntoValue, Value};
