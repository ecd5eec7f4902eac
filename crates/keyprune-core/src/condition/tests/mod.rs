mod scenarios;

use crate::{
    column::KeyColumns,
    condition::{KeyCondition, KeyConditionImpl},
    expr::Expr,
    schema::{KeyField, PrimaryKeySchema},
    value::Value,
};
use keyprune_primitives::FieldType;

/// Three-column integer key `(a, b, c)`.
pub(super) fn abc_schema() -> PrimaryKeySchema {
    ["a", "b", "c"]
        .into_iter()
        .map(|name| KeyField::new(name, FieldType::Integer))
        .collect()
}

pub(super) fn ints(values: [i64; 3]) -> Vec<Value> {
    values.into_iter().map(Value::Integer).collect()
}

pub(super) fn condition(expr: &Expr) -> KeyConditionImpl {
    KeyConditionImpl::new(None, Some(expr), abc_schema()).expect("condition compiles")
}

/// Run `may_be_in_range` over the granule `[left, right]` using every key column.
pub(super) fn try_may_be_in(
    cond: &KeyConditionImpl,
    left: &[Value],
    right: &[Value],
) -> Result<bool, crate::condition::EvalError> {
    let schema = cond.schema();
    let mut lower = KeyColumns::new(schema);
    let mut upper = KeyColumns::new(schema);
    lower.push_row(left).expect("lower bound tuple");
    upper.push_row(right).expect("upper bound tuple");
    let types = schema.field_types();

    cond.may_be_in_range(left.len(), &lower.row(0), &upper.row(0), &types)
}

pub(super) fn may_be_in(cond: &KeyConditionImpl, left: &[Value], right: &[Value]) -> bool {
    try_may_be_in(cond, left, right).expect("granule evaluates")
}
