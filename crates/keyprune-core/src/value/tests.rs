use crate::value::{Value, canonical_cmp};
use proptest::prelude::*;
use std::cmp::Ordering;

fn float(v: f64) -> Value {
    Value::float(v).expect("finite float")
}

#[test]
fn null_sorts_after_every_other_value() {
    for value in [
        Value::Boolean(true),
        Value::Integer(i64::MAX),
        Value::Unsigned(u64::MAX),
        float(f64::MAX),
        Value::from("zzz"),
    ] {
        assert_eq!(canonical_cmp(&value, &Value::Null), Ordering::Less);
        assert_eq!(canonical_cmp(&Value::Null, &value), Ordering::Greater);
    }
    assert_eq!(canonical_cmp(&Value::Null, &Value::Null), Ordering::Equal);
}

#[test]
fn numeric_variants_compare_by_value() {
    assert_eq!(
        canonical_cmp(&Value::Integer(3), &float(3.0)),
        Ordering::Equal
    );
    assert_eq!(canonical_cmp(&Value::Integer(3), &float(3.5)), Ordering::Less);
    assert_eq!(
        canonical_cmp(&Value::Integer(-3), &float(-3.5)),
        Ordering::Greater
    );
    assert_eq!(
        canonical_cmp(&Value::Integer(-1), &Value::Unsigned(0)),
        Ordering::Less
    );
    assert_eq!(
        canonical_cmp(&Value::Unsigned(u64::MAX), &Value::Integer(i64::MAX)),
        Ordering::Greater
    );
}

#[test]
fn integer_float_comparison_is_exact_beyond_f64_precision() {
    // 2^53 + 1 is not representable as f64.
    let big = (1i64 << 53) + 1;
    #[allow(clippy::cast_precision_loss)]
    let rounded = float((1i64 << 53) as f64);

    assert_eq!(
        canonical_cmp(&Value::Integer(big), &rounded),
        Ordering::Greater
    );
}

#[test]
fn float_outside_integer_domain_orders_at_the_edges() {
    assert_eq!(
        canonical_cmp(&Value::Integer(i64::MIN), &float(-1e30)),
        Ordering::Greater
    );
    assert_eq!(
        canonical_cmp(&Value::Unsigned(u64::MAX), &float(1e30)),
        Ordering::Less
    );
}

#[test]
fn cross_family_values_order_by_rank() {
    assert_eq!(
        canonical_cmp(&Value::Boolean(true), &Value::Integer(i64::MIN)),
        Ordering::Less
    );
    assert_eq!(
        canonical_cmp(&Value::Integer(i64::MAX), &Value::from("")),
        Ordering::Less
    );
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        any::<u64>().prop_map(Value::Unsigned),
        (-1.0e20f64..1.0e20f64).prop_map(float),
        "[a-z]{0,4}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

proptest! {
    #[test]
    fn canonical_cmp_is_antisymmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(canonical_cmp(&a, &b), canonical_cmp(&b, &a).reverse());
    }

    #[test]
    fn canonical_cmp_is_transitive(a in arb_value(), b in arb_value(), c in arb_value()) {
        let ab = canonical_cmp(&a, &b);
        let bc = canonical_cmp(&b, &c);
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(canonical_cmp(&a, &c), Ordering::Greater);
        }
    }
}
