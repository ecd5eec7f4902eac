//! Module: value
//! Responsibility: typed key/literal values and their canonical ordering.
//! Does not own: column storage or range semantics.
//! Boundary: every comparison the pruning engine performs goes through
//! `canonical_cmp`.

mod compare;

#[cfg(test)]
mod tests;

use crate::types::Float64;
use keyprune_primitives::LiteralFamily;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::canonical_cmp;

///
/// Value
///
/// One primary-key column value or bound literal.
///
/// Null → the column holds no value. Nulls sort after every other value,
/// so `Null` also acts as the upper sentinel of a key column.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
    Float(Float64),
    String(String),
    Null,
}

impl Value {
    /// Build a float value, rejecting NaN and infinities.
    #[must_use]
    pub fn float(value: f64) -> Option<Self> {
        Float64::try_new(value).map(Self::Float)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Literal routing family for binding into typed columns.
    #[must_use]
    pub const fn literal_family(&self) -> LiteralFamily {
        match self {
            Self::Boolean(_) => LiteralFamily::Bool,
            Self::Integer(_) | Self::Unsigned(_) | Self::Float(_) => LiteralFamily::Numeric,
            Self::String(_) => LiteralFamily::Textual,
            Self::Null => LiteralFamily::Any,
        }
    }

    /// Stable rank used for cross-variant ordering.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Boolean(_) => 0,
            Self::Integer(_) | Self::Unsigned(_) | Self::Float(_) => 1,
            Self::String(_) => 2,
            Self::Null => 3,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}u"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "'{v}'"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<Float64> for Value {
    fn from(v: Float64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}
