//! Equality strategies.
//!
//! An [`EqualityStrategy`] wraps one target and decides how that target is
//! compared and hashed. A type delegates its own `PartialEq`/`Hash` to a
//! strategy instead of writing them field by field:
//!
//! ```ignore
//! struct Point {
//!     coords: Arc<Coords>,
//!     eq: EqualityStrategy<Coords>,
//! }
//!
//! impl PartialEq for Point {
//!     fn eq(&self, other: &Self) -> bool {
//!         matches!(self.eq.equals(&other.coords), Ok(true))
//!     }
//! }
//! ```
//!
//! Variants:
//! - **reference**: identity of the target allocation.
//! - **fields**: the target's instance fields, read through [`Reflect`].
//! - **values**: the values returned by [`ValueSupplier::values`].
//! - **cached**: any of the above with its hash code memoized.
//!
//! For every variant, `equals(a, b) == Ok(true)` implies equal hash codes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::equal::equal;
use crate::error::{EqualityError, EqualityResult};
use crate::hash::{HashCode, SINGLE_VALUE, hash};
use crate::supplier::{Reflect, ValueSupplier};
use crate::value::Value;

/// Tag of a strategy variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrategyKind {
    Reference,
    Fields,
    Values,
    Cached,
}

/// Equality and hashing rule bound to one target.
pub struct EqualityStrategy<T: ?Sized> {
    variant: Variant<T>,
}

enum Variant<T: ?Sized> {
    Reference(Arc<T>),
    Fields(FieldBased<T>),
    Values(ValueBased<T>),
    Cached(Cached<T>),
}

struct FieldBased<T: ?Sized> {
    target: Arc<T>,
    /// Instance fields captured at construction, in declaration order.
    fields: Vec<&'static str>,
    read: fn(&T, &str) -> Option<Value>,
}

struct ValueBased<T: ?Sized> {
    target: Arc<T>,
    values: fn(&T) -> Vec<Value>,
}

struct Cached<T: ?Sized> {
    inner: Box<EqualityStrategy<T>>,
    /// Empty until the first successful `hash_code`.
    hash: OnceLock<i32>,
}

impl<T: ?Sized> EqualityStrategy<T> {
    /// Identity equality: equal only to the target itself.
    pub fn reference_based(target: Arc<T>) -> Self {
        tracing::debug!("created reference-based equality strategy");
        Self {
            variant: Variant::Reference(target),
        }
    }

    /// Equality over the target's declared instance fields.
    ///
    /// Static fields and fields holding an equality strategy are skipped. The
    /// field list is captured once; field values are read on every call.
    pub fn field_based(target: Arc<T>) -> Self
    where
        T: Reflect,
    {
        let declared = target.fields();
        let fields: Vec<&'static str> = declared
            .iter()
            .filter(|field| field.is_compared())
            .map(|field| field.name)
            .collect();
        tracing::debug!(
            captured = fields.len(),
            skipped = declared.len() - fields.len(),
            "created field-based equality strategy"
        );
        Self {
            variant: Variant::Fields(FieldBased {
                target,
                fields,
                read: <T as Reflect>::field,
            }),
        }
    }

    /// Equality over the values the target supplies.
    pub fn value_based(target: Arc<T>) -> Self
    where
        T: ValueSupplier,
    {
        tracing::debug!("created value-based equality strategy");
        Self {
            variant: Variant::Values(ValueBased {
                target,
                values: <T as ValueSupplier>::values,
            }),
        }
    }

    /// [`reference_based`](Self::reference_based), rejecting a missing target.
    pub fn try_reference_based(target: Option<Arc<T>>) -> EqualityResult<Self> {
        target
            .map(Self::reference_based)
            .ok_or_else(EqualityError::null_target)
    }

    /// [`field_based`](Self::field_based), rejecting a missing target.
    pub fn try_field_based(target: Option<Arc<T>>) -> EqualityResult<Self>
    where
        T: Reflect,
    {
        target
            .map(Self::field_based)
            .ok_or_else(EqualityError::null_target)
    }

    /// [`value_based`](Self::value_based), rejecting a missing target.
    pub fn try_value_based(target: Option<Arc<T>>) -> EqualityResult<Self>
    where
        T: ValueSupplier,
    {
        target
            .map(Self::value_based)
            .ok_or_else(EqualityError::null_target)
    }

    pub fn kind(&self) -> StrategyKind {
        match &self.variant {
            Variant::Reference(_) => StrategyKind::Reference,
            Variant::Fields(_) => StrategyKind::Fields,
            Variant::Values(_) => StrategyKind::Values,
            Variant::Cached(_) => StrategyKind::Cached,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.variant, Variant::Cached(_))
    }

    /// The wrapped target.
    pub fn target(&self) -> &Arc<T> {
        match &self.variant {
            Variant::Reference(target) => target,
            Variant::Fields(fields) => &fields.target,
            Variant::Values(values) => &values.target,
            Variant::Cached(cached) => cached.inner.target(),
        }
    }

    /// Memoize the hash code. Already-cached strategies are returned as is.
    #[must_use]
    pub fn cached(self) -> Self {
        if self.is_cached() {
            return self;
        }
        Self {
            variant: Variant::Cached(Cached {
                inner: Box::new(self),
                hash: OnceLock::new(),
            }),
        }
    }

    /// Drop the memoizing wrapper, if any.
    #[must_use]
    pub fn uncached(self) -> Self {
        match self.variant {
            Variant::Cached(cached) => *cached.inner,
            variant => Self { variant },
        }
    }

    /// The strategy beneath a memoizing wrapper (or `self`).
    pub fn as_uncached(&self) -> &Self {
        match &self.variant {
            Variant::Cached(cached) => cached.inner.as_ref(),
            _ => self,
        }
    }

    /// Whether the target equals `other` under this strategy.
    ///
    /// A cached strategy memoizes only its own hash code: `other` is hashed in
    /// full for the fast-reject and then compared by the wrapped strategy, so
    /// cached equality costs more than uncached equality.
    pub fn equals(&self, other: &T) -> EqualityResult<bool> {
        match &self.variant {
            Variant::Reference(target) => Ok(is_same(target, other)),
            Variant::Fields(fields) => fields.equals(other),
            Variant::Values(values) => Ok(values.equals(other)),
            Variant::Cached(cached) => cached.equals(other),
        }
    }

    /// The target's hash code under this strategy.
    pub fn hash_code(&self) -> EqualityResult<i32> {
        match &self.variant {
            Variant::Reference(target) => Ok(identity_hash(&**target)),
            Variant::Fields(fields) => fields.hash_of(fields.target.as_ref()),
            Variant::Values(values) => Ok(values.hash_of(values.target.as_ref())),
            Variant::Cached(cached) => cached.hash_code(),
        }
    }

    /// The hash code `other` would have under this strategy.
    pub fn hash_of(&self, other: &T) -> EqualityResult<i32> {
        match &self.variant {
            Variant::Reference(_) => Ok(identity_hash(other)),
            Variant::Fields(fields) => fields.hash_of(other),
            Variant::Values(values) => Ok(values.hash_of(other)),
            Variant::Cached(cached) if is_same(cached.inner.target(), other) => cached.hash_code(),
            Variant::Cached(cached) => cached.inner.hash_of(other),
        }
    }
}

impl<T: ?Sized> FieldBased<T> {
    fn equals(&self, other: &T) -> EqualityResult<bool> {
        if is_same(&self.target, other) {
            return Ok(true);
        }
        Ok(equal(
            &self.values_of(self.target.as_ref())?,
            &self.values_of(other)?,
        ))
    }

    fn hash_of(&self, object: &T) -> EqualityResult<i32> {
        Ok(hash(SINGLE_VALUE, &self.values_of(object)?))
    }

    fn values_of(&self, object: &T) -> EqualityResult<Vec<Value>> {
        self.fields
            .iter()
            .map(|&name| {
                (self.read)(object, name).ok_or_else(|| EqualityError::field_access(name))
            })
            .collect()
    }
}

impl<T: ?Sized> ValueBased<T> {
    fn equals(&self, other: &T) -> bool {
        is_same(&self.target, other)
            || equal(&(self.values)(self.target.as_ref()), &(self.values)(other))
    }

    fn hash_of(&self, object: &T) -> i32 {
        hash(SINGLE_VALUE, &(self.values)(object))
    }
}

impl<T: ?Sized> Cached<T> {
    // Only `hash_code` is memoized: the fast-reject still hashes `other` in
    // full, so a comparison reads the other side's values twice.
    fn equals(&self, other: &T) -> EqualityResult<bool> {
        let own = self.hash_code()?;
        let theirs = if is_same(self.inner.target(), other) {
            own
        } else {
            self.inner.hash_of(other)?
        };
        if own != theirs {
            return Ok(false);
        }
        self.inner.equals(other)
    }

    // Concurrent first calls may each compute the hash; the first stored
    // value wins and every caller returns it.
    fn hash_code(&self) -> EqualityResult<i32> {
        if let Some(&hash) = self.hash.get() {
            return Ok(hash);
        }
        let hash = self.inner.hash_code()?;
        let memo = *self.hash.get_or_init(|| hash);
        tracing::trace!(hash = memo, "memoized hash code");
        Ok(memo)
    }
}

fn is_same<T: ?Sized>(target: &Arc<T>, other: &T) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(target), other as *const T)
}

/// Address-derived hash, independent of the target's own hashing.
fn identity_hash<T: ?Sized>(object: &T) -> i32 {
    let address = (object as *const T).cast::<()>() as usize;
    (address as u64 as i64).hash_code()
}

impl<T: ?Sized> fmt::Debug for EqualityStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Variant::Reference(_) => f.debug_struct("ReferenceBased").finish_non_exhaustive(),
            Variant::Fields(fields) => f
                .debug_struct("FieldBased")
                .field("fields", &fields.fields)
                .finish_non_exhaustive(),
            Variant::Values(_) => f.debug_struct("ValueBased").finish_non_exhaustive(),
            Variant::Cached(cached) => f
                .debug_struct("Cached")
                .field("inner", &cached.inner)
                .field("hash", &cached.hash.get().copied())
                .finish(),
        }
    }
}
