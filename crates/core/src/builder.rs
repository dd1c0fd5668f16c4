//! Fluent hash-code composition.
//!
//! ```ignore
//! fn hash_code(&self) -> i32 {
//!     HashCodeBuilder::hash(&self.id)
//!         .and(&self.name)
//!         .and(self.scores.as_slice())
//!         .code()
//! }
//! ```
//!
//! The result is identical to threading a seed by hand: the first `and`
//! advances the single-value seed with [`MULTI_VALUE`], every later `and` folds
//! the previous node into the seed.

use crate::hash::{HashCode, MULTI_VALUE, SINGLE_VALUE, hash};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Seed {
    /// First node of a chain.
    Single,
    /// Result of folding every earlier node.
    Chained(i32),
}

/// One node of a hash-code chain.
///
/// Holds the seed accumulated so far and the contribution of the value most
/// recently added. Nodes are immutable; `and` returns the next node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HashCodeBuilder {
    seed: Seed,
    contribution: i32,
}

impl HashCodeBuilder {
    /// Start a chain with `value`.
    pub fn hash<T: HashCode + ?Sized>(value: &T) -> Self {
        Self {
            seed: Seed::Single,
            contribution: value.hash_code(),
        }
    }

    /// Append `value` to the chain.
    #[must_use]
    pub fn and<T: HashCode + ?Sized>(self, value: &T) -> Self {
        let seed = match self.seed {
            Seed::Single => self.fold(MULTI_VALUE),
            Seed::Chained(seed) => self.fold(seed),
        };
        Self {
            seed: Seed::Chained(seed),
            contribution: value.hash_code(),
        }
    }

    /// The combined hash code.
    pub fn code(&self) -> i32 {
        match self.seed {
            Seed::Single => self.fold(SINGLE_VALUE),
            Seed::Chained(seed) => self.fold(seed),
        }
    }

    fn fold(&self, seed: i32) -> i32 {
        hash(seed, &self.contribution)
    }
}

impl From<HashCodeBuilder> for i32 {
    fn from(builder: HashCodeBuilder) -> Self {
        builder.code()
    }
}

impl std::hash::Hash for HashCodeBuilder {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.code());
    }
}
