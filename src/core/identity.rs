//! Entity identity: typed numeric ids and the sequences that hand them out

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Entity kinds tracked by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Inventory part (in-house or outsourced)
    Part,
    /// Sellable product made of associated parts
    Product,
}

impl EntityKind {
    /// Get the string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Part => "part",
            EntityKind::Product => "product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub fn get(self) -> u32 {
                self.0
            }

            pub fn kind(self) -> EntityKind {
                $kind
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u32>()
                    .map(Self)
                    .map_err(|_| IdParseError::NotNumeric($kind, s.to_string()))
            }
        }
    };
}

numeric_id!(
    /// Identifier of a part, unique within the part sequence
    PartId,
    EntityKind::Part
);

numeric_id!(
    /// Identifier of a product, drawn from a sequence separate from parts
    ProductId,
    EntityKind::Product
);

/// Monotonic id generator with a read-then-advance protocol.
///
/// The value returned by [`IdSequence::peek`] is only consumed once
/// [`IdSequence::advance`] is called, so an aborted add leaves it untouched.
/// The two calls are not atomic: a caller sharing a sequence across threads
/// must hold one lock across both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    /// Start a sequence whose first id is `first`
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// The id the next successful add should use
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Consume the current id
    pub fn advance(&mut self) {
        self.next += 1;
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Errors that can occur when parsing entity ids
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("invalid {0} id '{1}': expected a non-negative integer")]
    NotNumeric(EntityKind, String),
}
