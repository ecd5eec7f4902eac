//! Module: column
//! Responsibility: typed, growable value buffers for key columns and row
//! handles into them.
//! Does not own: on-disk column encodings.
//! Boundary: the compiler stages literals here; callers stage sparse-index
//! bound tuples here.


use crate::{
    schema::{KeyField, PrimaryKeySchema},
    value::{Value, canonical_cmp},
};
use keyprune_primitives::FieldType;
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// ColumnError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ColumnError {
    #[error("cannot append {value} to {field_type} column '{column}'")]
    TypeMismatch {
        column: String,
        field_type: FieldType,
        value: String,
    },

    #[error("key column {column} out of range ({len} columns)")]
    ColumnOutOfRange { column: usize, len: usize },

    #[error("key tuple has {found} values, expected {expected}")]
    ArityMismatch { expected: usize, found: usize },
}

///
/// ColumnValues
///
/// Typed backing storage. `Mixed` backs columns whose declared type is
/// unknown and accepts any literal.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<i64>),
    Unsigned(Vec<u64>),
    Float(Vec<f64>),
    Boolean(Vec<bool>),
    String(Vec<String>),
    Mixed(Vec<Value>),
}

impl ColumnValues {
    const fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown => Self::Mixed(Vec::new()),
            FieldType::Integer => Self::Integer(Vec::new()),
            FieldType::Unsigned => Self::Unsigned(Vec::new()),
            FieldType::Float => Self::Float(Vec::new()),
            FieldType::Boolean => Self::Boolean(Vec::new()),
            FieldType::String | FieldType::Tag => Self::String(Vec::new()),
        }
    }

    fn push_default(&mut self) {
        match self {
            Self::Integer(values) => values.push(0),
            Self::Unsigned(values) => values.push(0),
            Self::Float(values) => values.push(0.0),
            Self::Boolean(values) => values.push(false),
            Self::String(values) => values.push(String::new()),
            Self::Mixed(values) => values.push(Value::Null),
        }
    }
}

///
/// ColumnRef
///
/// A schema column coupled with a growable typed value buffer.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnRef {
    field: KeyField,
    values: ColumnValues,
    nulls: Vec<bool>,
}

impl ColumnRef {
    #[must_use]
    pub const fn new(field: KeyField) -> Self {
        let values = ColumnValues::for_type(field.field_type);

        Self {
            field,
            values,
            nulls: Vec::new(),
        }
    }

    #[must_use]
    pub const fn field(&self) -> &KeyField {
        &self.field
    }

    #[must_use]
    pub const fn values(&self) -> &ColumnValues {
        &self.values
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.nulls.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nulls.is_empty()
    }

    pub fn append_string(&mut self, value: &str) -> Result<usize, ColumnError> {
        match &mut self.values {
            ColumnValues::String(values) => values.push(value.to_string()),
            ColumnValues::Mixed(values) => values.push(Value::from(value)),
            _ => return Err(self.mismatch(&Value::from(value))),
        }

        Ok(self.commit_row(false))
    }

    pub fn append_float(&mut self, value: f64) -> Result<usize, ColumnError> {
        let Some(literal) = Value::float(value) else {
            return Err(self.mismatch_text(value.to_string()));
        };
        match &mut self.values {
            ColumnValues::Float(values) => values.push(value),
            ColumnValues::Mixed(values) => values.push(literal),
            _ => return Err(self.mismatch(&literal)),
        }

        Ok(self.commit_row(false))
    }

    // Integers widen into float and unsigned columns only when exact.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn append_integer(&mut self, value: i64) -> Result<usize, ColumnError> {
        match &mut self.values {
            ColumnValues::Integer(values) => values.push(value),
            ColumnValues::Unsigned(values) if value >= 0 => values.push(value.unsigned_abs()),
            ColumnValues::Float(values) if (value as f64) as i64 == value => {
                values.push(value as f64);
            }
            ColumnValues::Mixed(values) => values.push(Value::Integer(value)),
            _ => return Err(self.mismatch(&Value::Integer(value))),
        }

        Ok(self.commit_row(false))
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn append_unsigned(&mut self, value: u64) -> Result<usize, ColumnError> {
        match &mut self.values {
            ColumnValues::Unsigned(values) => values.push(value),
            ColumnValues::Integer(values) if i64::try_from(value).is_ok() => {
                values.push(value.cast_signed());
            }
            ColumnValues::Float(values) if (value as f64) as u64 == value => {
                values.push(value as f64);
            }
            ColumnValues::Mixed(values) => values.push(Value::Unsigned(value)),
            _ => return Err(self.mismatch(&Value::Unsigned(value))),
        }

        Ok(self.commit_row(false))
    }

    pub fn append_boolean(&mut self, value: bool) -> Result<usize, ColumnError> {
        match &mut self.values {
            ColumnValues::Boolean(values) => values.push(value),
            ColumnValues::Mixed(values) => values.push(Value::Boolean(value)),
            _ => return Err(self.mismatch(&Value::Boolean(value))),
        }

        Ok(self.commit_row(false))
    }

    pub fn append_null(&mut self) -> usize {
        self.values.push_default();
        self.commit_row(true)
    }

    /// Append any value through the typed append for its variant.
    /// Values outside the column's literal family are rejected up front.
    pub fn append_value(&mut self, value: &Value) -> Result<usize, ColumnError> {
        if !self.admits_family(value) {
            return Err(self.mismatch(value));
        }

        match value {
            Value::Boolean(v) => self.append_boolean(*v),
            Value::Integer(v) => self.append_integer(*v),
            Value::Unsigned(v) => self.append_unsigned(*v),
            Value::Float(v) => self.append_float(v.get()),
            Value::String(v) => self.append_string(v),
            Value::Null => Ok(self.append_null()),
        }
    }

    /// Return whether `append_value` would accept this value.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        if !self.admits_family(value) {
            return false;
        }

        let mut scratch = Self::new(self.field.clone());
        scratch.append_value(value).is_ok()
    }

    // Nulls bind to every column.
    fn admits_family(&self, value: &Value) -> bool {
        value.is_null()
            || self
                .field
                .field_type
                .family()
                .accepts(value.literal_family())
    }

    /// Materialize the value stored at `row`.
    #[must_use]
    pub fn value(&self, row: usize) -> Option<Value> {
        if *self.nulls.get(row)? {
            return Some(Value::Null);
        }

        let value = match &self.values {
            ColumnValues::Integer(values) => Value::Integer(*values.get(row)?),
            ColumnValues::Unsigned(values) => Value::Unsigned(*values.get(row)?),
            ColumnValues::Float(values) => Value::float(*values.get(row)?)?,
            ColumnValues::Boolean(values) => Value::Boolean(*values.get(row)?),
            ColumnValues::String(values) => Value::String(values.get(row)?.clone()),
            ColumnValues::Mixed(values) => values.get(row)?.clone(),
        };

        Some(value)
    }

    fn commit_row(&mut self, null: bool) -> usize {
        self.nulls.push(null);
        self.nulls.len() - 1
    }

    fn mismatch(&self, value: &Value) -> ColumnError {
        self.mismatch_text(value.to_string())
    }

    fn mismatch_text(&self, value: String) -> ColumnError {
        ColumnError::TypeMismatch {
            column: self.field.name.clone(),
            field_type: self.field.field_type,
            value,
        }
    }
}

///
/// FieldRef
///
/// Handle to one value inside a set of columns: column index plus row offset.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldRef<'a> {
    columns: &'a [ColumnRef],
    column: usize,
    row: usize,
}

impl<'a> FieldRef<'a> {
    #[must_use]
    pub const fn new(columns: &'a [ColumnRef], column: usize, row: usize) -> Self {
        Self {
            columns,
            column,
            row,
        }
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Materialize the referenced value; `None` if the handle dangles.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.columns.get(self.column)?.value(self.row)
    }

    /// Materialize the referenced value, treating a dangling handle as null.
    #[must_use]
    pub fn value_or_null(&self) -> Value {
        self.value().unwrap_or(Value::Null)
    }
}

impl PartialEq for FieldRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.value(), other.value()) {
            (Some(left), Some(right)) => canonical_cmp(&left, &right) == Ordering::Equal,
            _ => false,
        }
    }
}

///
/// KeyColumns
///
/// One `ColumnRef` per primary-key field. Holds staged literals for a
/// compiled condition, or sparse-index bound tuples on the caller side.
///

#[derive(Clone, Debug, PartialEq)]
pub struct KeyColumns {
    columns: Vec<ColumnRef>,
}

impl KeyColumns {
    #[must_use]
    pub fn new(schema: &PrimaryKeySchema) -> Self {
        Self {
            columns: schema.fields().iter().cloned().map(ColumnRef::new).collect(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnRef> {
        self.columns.get(index)
    }

    /// Append one value to a single column and return its row offset.
    pub fn append(&mut self, column: usize, value: &Value) -> Result<usize, ColumnError> {
        let len = self.columns.len();
        self.columns
            .get_mut(column)
            .ok_or(ColumnError::ColumnOutOfRange { column, len })?
            .append_value(value)
    }

    /// Append one full key tuple. Nothing is appended if any value is rejected.
    pub fn push_row(&mut self, values: &[Value]) -> Result<usize, ColumnError> {
        if values.len() != self.columns.len() {
            return Err(ColumnError::ArityMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        if let Some((column, value)) = self
            .columns
            .iter()
            .zip(values)
            .find(|(column, value)| !column.accepts(value))
        {
            return Err(column.mismatch(value));
        }

        let mut row = 0;
        for (column, value) in self.columns.iter_mut().zip(values) {
            row = column.append_value(value)?;
        }

        Ok(row)
    }

    #[must_use]
    pub fn field_ref(&self, column: usize, row: usize) -> FieldRef<'_> {
        FieldRef::new(&self.columns, column, row)
    }

    /// Handles for every column of a previously pushed row.
    #[must_use]
    pub fn row(&self, row: usize) -> Vec<FieldRef<'_>> {
        (0..self.columns.len())
            .map(|column| self.field_ref(column, row))
            .collect()
    }
}
