#[macro_use]
mod macros;

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FieldType
///
/// Declared type of one primary-key column, as reported by the schema.
/// `Unknown` columns may hold nulls, so range seeding must keep them.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FieldType {
    Unknown,
    Integer,
    Unsigned,
    Float,
    String,
    Boolean,
    Tag,
}

impl FieldType {
    /// Return the full metadata descriptor for one field type.
    #[must_use]
    pub const fn metadata(self) -> FieldTypeMetadata {
        field_type_registry!(metadata_from_registry, self)
    }

    /// Stable byte code for wire/catalog surfaces.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.metadata().code
    }

    /// Resolve a field type from its stable byte code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        field_type_registry!(from_code_from_registry, code)
    }

    /// Return the literal family accepted by columns of this type.
    #[must_use]
    pub const fn family(self) -> LiteralFamily {
        self.metadata().family
    }

    /// Return whether nulls must be considered when seeding a whole range.
    #[must_use]
    pub const fn considers_nulls(self) -> bool {
        self.metadata().considers_nulls
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Tag => "tag",
        };
        write!(f, "{label}")
    }
}

///
/// FieldTypeMetadata
///
/// Capability metadata shared by the schema and the pruning engine.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldTypeMetadata {
    pub code: u8,
    pub family: LiteralFamily,
    pub considers_nulls: bool,
}

///
/// LiteralFamily
///
/// Coarse routing family used when binding literals into key columns.
/// `Any` accepts every literal kind.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LiteralFamily {
    Any,
    Numeric,
    Textual,
    Bool,
}

impl LiteralFamily {
    /// Return whether a literal of family `other` may be bound into a column
    /// of this family.
    #[must_use]
    pub const fn accepts(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Any, _)
                | (Self::Numeric, Self::Numeric)
                | (Self::Textual, Self::Textual)
                | (Self::Bool, Self::Bool)
        )
    }
}

/// Ordered list of all field types in registry order.
pub const ALL_FIELD_TYPES: [FieldType; 7] = field_type_registry!(all_types_from_registry);

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_registered_type() {
        for ty in ALL_FIELD_TYPES {
            assert_eq!(FieldType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(FieldType::from_code(200), None);
    }

    #[test]
    fn only_unknown_columns_consider_nulls() {
        let with_nulls: Vec<_> = ALL_FIELD_TYPES
            .into_iter()
            .filter(|ty| ty.considers_nulls())
            .collect();

        assert_eq!(with_nulls, vec![FieldType::Unknown]);
    }

    #[test]
    fn literal_family_acceptance() {
        assert!(LiteralFamily::Any.accepts(LiteralFamily::Textual));
        assert!(LiteralFamily::Numeric.accepts(LiteralFamily::Numeric));
        assert!(!LiteralFamily::Numeric.accepts(LiteralFamily::Bool));
        assert!(!LiteralFamily::Textual.accepts(LiteralFamily::Any));
    }
}
