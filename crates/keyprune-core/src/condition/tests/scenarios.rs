use super::{condition, ints, may_be_in, try_may_be_in};
use crate::{
    condition::{KeyCondition, RpnElement},
    expr::Expr,
    value::Value,
};

#[test]
fn equality_on_first_column_matches_pinned_granule() {
    let cond = condition(&Expr::eq("a", 5));

    assert!(may_be_in(
        &cond,
        &ints([5, i64::MIN, i64::MIN]),
        &ints([5, i64::MAX, i64::MAX])
    ));
}

#[test]
fn inverted_granule_does_not_panic() {
    let cond = condition(&Expr::eq("a", 5));

    let _ = try_may_be_in(
        &cond,
        &ints([5, i64::MIN, i64::MIN]),
        &ints([4, i64::MAX, i64::MAX]),
    );
}

#[test]
fn strict_lower_bound_prunes_granule_closed_at_the_literal() {
    let left = ints([0, 0, 0]);
    let right = ints([10, 0, 0]);

    assert!(!may_be_in(&condition(&Expr::gt("a", 10)), &left, &right));
    assert!(may_be_in(&condition(&Expr::gte("a", 10)), &left, &right));
}

#[test]
fn conjunction_over_two_columns() {
    let cond = condition(&(Expr::eq("a", 1) & Expr::eq("b", 2)));

    assert!(may_be_in(&cond, &ints([1, 2, 0]), &ints([1, 2, 9])));
    assert!(!may_be_in(&cond, &ints([1, 3, 0]), &ints([1, 3, 9])));
}

#[test]
fn in_list_compiles_to_set_and_prunes_non_members() {
    let cond = condition(&Expr::in_list(
        "a",
        vec![Value::Integer(1), Value::Integer(3)],
    ));

    assert!(matches!(cond.rpn(), [RpnElement::Set(set)] if !set.negated));
    assert!(!may_be_in(&cond, &ints([2, 0, 0]), &ints([2, 9, 9])));
    assert!(may_be_in(&cond, &ints([2, 0, 0]), &ints([3, 0, 0])));
}

#[test]
fn empty_condition_never_prunes() {
    let cond = crate::condition::KeyConditionImpl::new(None, None, super::abc_schema())
        .expect("empty condition compiles");

    assert!(!cond.have_primary_key());
    assert!(may_be_in(&cond, &ints([0, 0, 0]), &ints([1, 1, 1])));
    assert!(may_be_in(&cond, &ints([9, 0, 0]), &ints([1, 1, 1])));
}
