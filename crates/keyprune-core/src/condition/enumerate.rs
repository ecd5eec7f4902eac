//! Reduction of a lexicographic key interval `[left, right]` to a set of
//! hyper-rectangles, each a plain per-column range.
//!
//! With a common prefix pinned, the interval splits at the first differing
//! column `p` into:
//! 1. `left[p] < x[p] < right[p]`, every later column whole;
//! 2. `x[p] == left[p]`, later columns bounded below by `left` only;
//! 3. `x[p] == right[p]`, later columns bounded above by `right` only.
//!
//! Cases 2 and 3 recurse with one side active.

use crate::{
    column::FieldRef,
    condition::{eval::EvalError, mark::Mark, range::Range},
    value::Value,
};
use keyprune_primitives::FieldType;

///
/// Sides
///
/// Which key bounds constrain the current recursion step.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sides {
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl Sides {
    pub(crate) const BOTH: Self = Self {
        left: true,
        right: true,
    };
    pub(crate) const LEFT: Self = Self {
        left: true,
        right: false,
    };
    pub(crate) const RIGHT: Self = Self {
        left: false,
        right: true,
    };
}

///
/// KeyBounds
///
/// Lower and upper key tuples of one granule plus per-column types.
/// Handles below the key size are checked to resolve before enumeration.
///

pub(crate) struct KeyBounds<'r, 'a> {
    pub(crate) left: &'r [FieldRef<'a>],
    pub(crate) right: &'r [FieldRef<'a>],
    pub(crate) types: &'r [FieldType],
}

impl KeyBounds<'_, '_> {
    fn left_value(&self, column: usize) -> Value {
        self.left
            .get(column)
            .map_or(Value::Null, FieldRef::value_or_null)
    }

    fn right_value(&self, column: usize) -> Value {
        self.right
            .get(column)
            .map_or(Value::Null, FieldRef::value_or_null)
    }

    fn same_at(&self, column: usize) -> bool {
        matches!(
            (self.left.get(column), self.right.get(column)),
            (Some(left), Some(right)) if left == right
        )
    }

    fn with_null(&self, column: usize) -> bool {
        self.types
            .get(column)
            .is_some_and(|field_type| field_type.considers_nulls())
    }

    // Range of column `column` strictly between the active bounds.
    fn open(&self, column: usize, sides: Sides) -> Range {
        self.bounded(column, sides, false)
    }

    // Range of column `column` between the active bounds, bounds included.
    fn closed(&self, column: usize, sides: Sides) -> Range {
        self.bounded(column, sides, true)
    }

    fn bounded(&self, column: usize, sides: Sides, included: bool) -> Range {
        let with_null = self.with_null(column);

        match (sides.left, sides.right) {
            (true, true) => Range::new(
                self.left_value(column),
                self.right_value(column),
                included,
                included,
            ),
            (true, false) => Range::left_bounded(self.left_value(column), included, with_null),
            (false, true) => Range::right_bounded(self.right_value(column), included, with_null),
            (false, false) => Range::whole(with_null),
        }
    }
}

/// OR together `callback` over every hyper-rectangle of the interval,
/// stopping as soon as the accumulated mark is complete.
pub(crate) fn check_in_any_range<F>(
    bounds: &KeyBounds<'_, '_>,
    key_size: usize,
    sides: Sides,
    mut prefix: usize,
    ranges: &mut [Range],
    init: Mark,
    callback: &mut F,
) -> Result<Mark, EvalError>
where
    F: FnMut(&[Range]) -> Result<Mark, EvalError>,
{
    if !sides.left && !sides.right {
        return callback(ranges);
    }

    if sides.left && sides.right {
        while prefix < key_size && bounds.same_at(prefix) {
            ranges[prefix] = Range::point(bounds.left_value(prefix));
            prefix += 1;
        }
    }

    if prefix >= key_size {
        return callback(ranges);
    }

    // Case 1.
    if prefix + 1 == key_size {
        ranges[prefix] = bounds.closed(prefix, sides);
        return callback(ranges);
    }

    ranges[prefix] = bounds.open(prefix, sides);
    for (column, range) in ranges
        .iter_mut()
        .enumerate()
        .take(key_size)
        .skip(prefix + 1)
    {
        *range = Range::whole(bounds.with_null(column));
    }

    let mut res = init | callback(ranges)?;
    if res.is_complete() {
        return Ok(res);
    }

    // Cases 2 and 3.
    for (active, side) in [(sides.left, Sides::LEFT), (sides.right, Sides::RIGHT)] {
        if !active {
            continue;
        }

        let pinned = if side == Sides::LEFT {
            bounds.left_value(prefix)
        } else {
            bounds.right_value(prefix)
        };
        ranges[prefix] = Range::point(pinned);

        res = res | check_in_any_range(bounds, key_size, side, prefix + 1, ranges, init, callback)?;
        if res.is_complete() {
            return Ok(res);
        }
    }

    Ok(res)
}
