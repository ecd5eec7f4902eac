use crate::value::{Value, canonical_cmp};
use std::{cmp::Ordering, fmt, ops::Bound};

///
/// Range
///
/// Interval over one key column under canonical value ordering.
/// `Value::Null` sorts last, so an `Excluded(Null)` right side means
/// "every non-null value up to +inf".
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Range {
    pub left: Bound<Value>,
    pub right: Bound<Value>,
}

impl Range {
    /// Two-sided interval with explicit inclusion flags.
    #[must_use]
    pub const fn new(left: Value, right: Value, left_included: bool, right_included: bool) -> Self {
        Self {
            left: bound(left, left_included),
            right: bound(right, right_included),
        }
    }

    /// Closed single point `[value, value]`.
    #[must_use]
    pub fn point(value: Value) -> Self {
        Self {
            left: Bound::Included(value.clone()),
            right: Bound::Included(value),
        }
    }

    /// `[value, +inf)`, or up to but excluding null when `with_null` is false.
    #[must_use]
    pub const fn left_bounded(value: Value, included: bool, with_null: bool) -> Self {
        Self {
            left: bound(value, included),
            right: upper_sentinel(with_null),
        }
    }

    /// `(-inf, value]`. Null sorts last, so the null flag has no effect on
    /// a range that is open only below.
    #[must_use]
    pub const fn right_bounded(value: Value, included: bool, _with_null: bool) -> Self {
        Self {
            left: Bound::Unbounded,
            right: bound(value, included),
        }
    }

    #[must_use]
    pub const fn whole_with_null() -> Self {
        Self {
            left: Bound::Unbounded,
            right: Bound::Unbounded,
        }
    }

    #[must_use]
    pub const fn whole_without_null() -> Self {
        Self {
            left: Bound::Unbounded,
            right: Bound::Excluded(Value::Null),
        }
    }

    /// Whole range for a column, including nulls when its type may hold them.
    #[must_use]
    pub const fn whole(with_null: bool) -> Self {
        if with_null {
            Self::whole_with_null()
        } else {
            Self::whole_without_null()
        }
    }

    /// Return whether the two intervals share at least one value.
    #[must_use]
    pub fn intersects_range(&self, other: &Self) -> bool {
        !upper_below_lower(&self.right, &other.left) && !upper_below_lower(&other.right, &self.left)
    }

    /// Return whether `self` covers every value of `other`.
    #[must_use]
    pub fn contains_range(&self, other: &Self) -> bool {
        lower_covers(&self.left, &other.left) && upper_covers(&self.right, &other.right)
    }

    #[must_use]
    pub fn contains_value(&self, value: &Value) -> bool {
        let above_left = match &self.left {
            Bound::Included(start) => canonical_cmp(value, start) != Ordering::Less,
            Bound::Excluded(start) => canonical_cmp(value, start) == Ordering::Greater,
            Bound::Unbounded => true,
        };
        let below_right = match &self.right {
            Bound::Included(end) => canonical_cmp(value, end) != Ordering::Greater,
            Bound::Excluded(end) => canonical_cmp(value, end) == Ordering::Less,
            Bound::Unbounded => true,
        };

        above_left && below_right
    }

    /// Closed interval whose two ends are the same value.
    #[must_use]
    pub fn is_point(&self) -> bool {
        match (&self.left, &self.right) {
            (Bound::Included(left), Bound::Included(right)) => {
                canonical_cmp(left, right) == Ordering::Equal
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let (Some(left), Some(right)) = (bound_value(&self.left), bound_value(&self.right)) else {
            return false;
        };

        match canonical_cmp(left, right) {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => {
                !matches!(self.left, Bound::Included(_)) || !matches!(self.right, Bound::Included(_))
            }
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.left {
            Bound::Included(v) => write!(f, "[{v}")?,
            Bound::Excluded(v) => write!(f, "({v}")?,
            Bound::Unbounded => f.write_str("(-inf")?,
        }
        f.write_str(", ")?;
        match &self.right {
            Bound::Included(v) => write!(f, "{v}]"),
            Bound::Excluded(v) => write!(f, "{v})"),
            Bound::Unbounded => f.write_str("+inf)"),
        }
    }
}

const fn bound(value: Value, included: bool) -> Bound<Value> {
    if included {
        Bound::Included(value)
    } else {
        Bound::Excluded(value)
    }
}

const fn upper_sentinel(with_null: bool) -> Bound<Value> {
    if with_null {
        Bound::Unbounded
    } else {
        Bound::Excluded(Value::Null)
    }
}

const fn bound_value(bound: &Bound<Value>) -> Option<&Value> {
    match bound {
        Bound::Included(value) | Bound::Excluded(value) => Some(value),
        Bound::Unbounded => None,
    }
}

// True when every value allowed by `upper` sorts before every value allowed by `lower`.
fn upper_below_lower(upper: &Bound<Value>, lower: &Bound<Value>) -> bool {
    let (Some(end), Some(start)) = (bound_value(upper), bound_value(lower)) else {
        return false;
    };

    match canonical_cmp(end, start) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => {
            !matches!(upper, Bound::Included(_)) || !matches!(lower, Bound::Included(_))
        }
    }
}

fn lower_covers(outer: &Bound<Value>, inner: &Bound<Value>) -> bool {
    let Some(outer_start) = bound_value(outer) else {
        return true;
    };
    let Some(inner_start) = bound_value(inner) else {
        return false;
    };

    match canonical_cmp(outer_start, inner_start) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => {
            !(matches!(outer, Bound::Excluded(_)) && matches!(inner, Bound::Included(_)))
        }
    }
}

fn upper_covers(outer: &Bound<Value>, inner: &Bound<Value>) -> bool {
    let Some(outer_end) = bound_value(outer) else {
        return true;
    };
    let Some(inner_end) = bound_value(inner) else {
        return false;
    };

    match canonical_cmp(outer_end, inner_end) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            !(matches!(outer, Bound::Excluded(_)) && matches!(inner, Bound::Included(_)))
        }
    }
}
