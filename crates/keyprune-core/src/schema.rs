//! Module: schema
//! Responsibility: ordered primary-key column descriptors.
//! Does not own: catalog persistence or type inference.
//! Boundary: the compiler resolves field references against this schema.

use keyprune_primitives::FieldType;
use serde::{Deserialize, Serialize};

///
/// KeyField
///
/// One primary-key column: name plus declared type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeyField {
    pub name: String,
    pub field_type: FieldType,
}

impl KeyField {
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

///
/// PrimaryKeySchema
///
/// Primary-key columns in sort order. Column position is the key-column
/// index used throughout the condition program.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PrimaryKeySchema {
    fields: Vec<KeyField>,
}

impl PrimaryKeySchema {
    #[must_use]
    pub const fn new(fields: Vec<KeyField>) -> Self {
        Self { fields }
    }

    /// Position of the named column in the key, if it is part of the key.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&KeyField> {
        self.fields.get(index)
    }

    #[must_use]
    pub fn fields(&self) -> &[KeyField] {
        &self.fields
    }

    /// Declared types in key order.
    #[must_use]
    pub fn field_types(&self) -> Vec<FieldType> {
        self.fields.iter().map(|field| field.field_type).collect()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<KeyField> for PrimaryKeySchema {
    fn from_iter<I: IntoIterator<Item = KeyField>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_index_follows_key_order() {
        let schema: PrimaryKeySchema = [
            KeyField::new("host", FieldType::Tag),
            KeyField::new("time", FieldType::Integer),
        ]
        .into_iter()
        .collect();

        assert_eq!(schema.field_index("host"), Some(0));
        assert_eq!(schema.field_index("time"), Some(1));
        assert_eq!(schema.field_index("value"), None);
        assert_eq!(
            schema.field_types(),
            vec![FieldType::Tag, FieldType::Integer]
        );
    }
}
