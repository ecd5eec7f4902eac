use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used by range bounds and set membership.
///
/// Ordering rules:
/// 1. Canonical variant rank (`Boolean` < numeric < `String` < `Null`)
/// 2. Variant-specific comparison for same-ranked values
///
/// Numeric variants compare by numeric value across `Integer`, `Unsigned`
/// and `Float`.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    #[allow(clippy::match_same_arms)]
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Unsigned(a), Value::Unsigned(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.cmp(b),
        (Value::Integer(a), Value::Unsigned(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Unsigned(a), Value::Integer(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Integer(a), Value::Float(b)) => cmp_int_float(i128::from(*a), b.get()),
        (Value::Unsigned(a), Value::Float(b)) => cmp_int_float(i128::from(*a), b.get()),
        (Value::Float(a), Value::Integer(b)) => cmp_int_float(i128::from(*b), a.get()).reverse(),
        (Value::Float(a), Value::Unsigned(b)) => cmp_int_float(i128::from(*b), a.get()).reverse(),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => Ordering::Equal,
    }
}

// Exact integer/float comparison without routing the integer through f64.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    let whole = float.trunc();
    if whole < i64::MIN as f64 {
        return Ordering::Greater;
    }
    if whole > u64::MAX as f64 {
        return Ordering::Less;
    }

    match int.cmp(&(whole as i128)) {
        Ordering::Equal if float > whole => Ordering::Less,
        Ordering::Equal if float < whole => Ordering::Greater,
        other => other,
    }
}
