use crate::{
    condition::{mark::Mark, range::Range},
    value::{Value, canonical_cmp},
};
use keyprune_primitives::FieldType;
use std::{cmp::Ordering, fmt::Debug, ops::Bound};

///
/// SetIndex
///
/// Set-membership capability consumed by `IN` / `NOT IN` elements.
/// Implementations answer for one key column.
///

pub trait SetIndex: Debug + Send + Sync {
    /// The set has been populated and can answer range queries.
    fn is_built(&self) -> bool;

    fn key_column(&self) -> usize;

    /// Feasibility of "column value is a member" over the given ranges.
    /// `single_point` hints that every range is a closed point. It is an
    /// optimisation hint only; the verdict must follow the ranges.
    fn check_in_range(&self, ranges: &[Range], types: &[FieldType], single_point: bool) -> Mark;
}

///
/// KeySet
///
/// Sorted, deduplicated literal set over one key column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeySet {
    key_column: usize,
    values: Option<Vec<Value>>,
}

impl KeySet {
    /// A set over `key_column` that will be filled later with `build`.
    #[must_use]
    pub const fn unbuilt(key_column: usize) -> Self {
        Self {
            key_column,
            values: None,
        }
    }

    #[must_use]
    pub fn new(key_column: usize, values: impl IntoIterator<Item = Value>) -> Self {
        let mut set = Self::unbuilt(key_column);
        set.build(values);

        set
    }

    pub fn build(&mut self, values: impl IntoIterator<Item = Value>) {
        let mut values: Vec<Value> = values.into_iter().collect();
        values.sort_by(canonical_cmp);
        values.dedup_by(|a, b| canonical_cmp(a, b) == Ordering::Equal);

        self.values = Some(values);
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        self.values.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    // First member at or above the range's lower bound, if it is within the range.
    fn first_member_in(&self, range: &Range) -> Option<&Value> {
        let values = self.values();
        let start = match &range.left {
            Bound::Included(left) => {
                values.partition_point(|v| canonical_cmp(v, left) == Ordering::Less)
            }
            Bound::Excluded(left) => {
                values.partition_point(|v| canonical_cmp(v, left) != Ordering::Greater)
            }
            Bound::Unbounded => 0,
        };

        values.get(start).filter(|v| range.contains_value(v))
    }
}

impl SetIndex for KeySet {
    fn is_built(&self) -> bool {
        self.values.is_some()
    }

    fn key_column(&self) -> usize {
        self.key_column
    }

    fn check_in_range(&self, ranges: &[Range], _types: &[FieldType], _single_point: bool) -> Mark {
        let Some(range) = ranges.get(self.key_column) else {
            return Mark::UNKNOWN;
        };

        // Decided from this column's range alone. A member inside a point
        // range means every row in it is a member.
        let member = self.first_member_in(range).is_some();

        Mark::new(member, !(member && range.is_point()))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn point(v: i64) -> Vec<Range> {
        vec![Range::point(Value::Integer(v))]
    }

    #[test]
    fn build_sorts_and_deduplicates_across_numeric_variants() {
        let set = KeySet::new(
            0,
            [
                Value::Integer(3),
                Value::Unsigned(1),
                Value::Integer(1),
                Value::Integer(2),
            ],
        );

        assert!(set.is_built());
        assert_eq!(set.len(), 3);
        assert_eq!(set.values()[2], Value::Integer(3));
    }

    #[test]
    fn unbuilt_set_reports_not_built_until_filled() {
        let mut set = KeySet::unbuilt(2);
        assert!(!set.is_built());
        assert_eq!(set.key_column(), 2);

        set.build(Vec::new());
        assert!(set.is_built());
        assert!(set.is_empty());
    }

    #[test]
    fn point_membership_is_exact() {
        let set = KeySet::new(0, [Value::Integer(1), Value::Integer(3)]);
        let types = [FieldType::Integer];

        assert_eq!(set.check_in_range(&point(3), &types, true), Mark::new(true, false));
        assert_eq!(set.check_in_range(&point(2), &types, true), Mark::new(false, true));
    }

    #[test]
    fn empty_set_is_never_true() {
        let set = KeySet::new(0, Vec::new());
        let ranges = [Range::whole_with_null()];

        assert_eq!(
            set.check_in_range(&ranges, &[FieldType::Unknown], false),
            Mark::new(false, true)
        );
    }

    #[test]
    fn single_point_hint_does_not_override_the_range() {
        let set = KeySet::new(0, [Value::Integer(4)]);
        let ranges = [Range::new(Value::Integer(1), Value::Integer(9), true, true)];

        assert_eq!(
            set.check_in_range(&ranges, &[FieldType::Integer], true),
            Mark::new(true, true)
        );
    }

    #[test]
    fn missing_key_column_is_unknown() {
        let set = KeySet::new(4, [Value::Integer(1)]);

        assert_eq!(
            set.check_in_range(&point(1), &[FieldType::Integer], true),
            Mark::UNKNOWN
        );
    }
}
