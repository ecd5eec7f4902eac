//! Postfix condition program and the compiler that builds it from
//! predicate tokens.

use crate::{
    column::KeyColumns,
    condition::{
        range::Range,
        set::{KeySet, SetIndex},
    },
    error::ErrorClass,
    expr::{CompareOp, Literal, LogicalOp, RpnToken},
    schema::PrimaryKeySchema,
    value::Value,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// CompileError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("unsupported {kind} literal compared with key column '{field}'")]
    UnsupportedLiteral { field: String, kind: &'static str },

    #[error("key column '{field}' is not followed by a literal operand")]
    MissingOperand { field: String },

    #[error("comparison on key column '{field}' has no operator")]
    MissingOperator { field: String },

    #[error("unsupported expression in key condition: {expr}")]
    UnsupportedExpr { expr: String },

    #[error("malformed condition program: {reason}")]
    MalformedProgram { reason: &'static str },
}

impl CompileError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedLiteral { .. } | Self::UnsupportedExpr { .. } => {
                ErrorClass::Unsupported
            }
            Self::MissingOperand { .. }
            | Self::MissingOperator { .. }
            | Self::MalformedProgram { .. } => ErrorClass::InvariantViolation,
        }
    }
}

///
/// MonotonicFunction
///
/// Order-preserving (or order-reversing) transform applied to a key column
/// before comparison, e.g. timestamp truncation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonotonicFunction {
    pub name: String,
    pub increasing: bool,
}

///
/// RangeElement
///
/// `negated` distinguishes NOT-IN-RANGE from IN-RANGE.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeElement {
    pub key_column: usize,
    pub range: Range,
    pub negated: bool,
    pub monotonic_chain: Vec<MonotonicFunction>,
}

///
/// SetElement
///

#[derive(Clone, Debug)]
pub struct SetElement {
    pub key_column: usize,
    pub index: Arc<dyn SetIndex>,
    pub negated: bool,
}

///
/// RpnElement
///
/// One instruction of the postfix condition program.
///

#[derive(Clone, Debug)]
pub enum RpnElement {
    Range(RangeElement),
    Set(SetElement),
    And,
    Or,
}

impl RpnElement {
    #[must_use]
    pub fn in_range(key_column: usize, range: Range) -> Self {
        Self::Range(RangeElement {
            key_column,
            range,
            negated: false,
            monotonic_chain: Vec::new(),
        })
    }

    #[must_use]
    pub fn not_in_range(key_column: usize, range: Range) -> Self {
        Self::Range(RangeElement {
            key_column,
            range,
            negated: true,
            monotonic_chain: Vec::new(),
        })
    }

    #[must_use]
    pub fn in_set(index: Arc<dyn SetIndex>, negated: bool) -> Self {
        Self::Set(SetElement {
            key_column: index.key_column(),
            index,
            negated,
        })
    }

    /// Key column an operand reads; `None` for connectives.
    #[must_use]
    pub const fn key_column(&self) -> Option<usize> {
        match self {
            Self::Range(element) => Some(element.key_column),
            Self::Set(element) => Some(element.key_column),
            Self::And | Self::Or => None,
        }
    }
}

///
/// CompileStats
///
/// `dropped_clauses` counts key-column comparisons with no range mapping
/// (`!=`, family mismatches); `skipped_clauses` counts comparisons on
/// columns outside the primary key.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CompileStats {
    pub elements: usize,
    pub dropped_clauses: usize,
    pub skipped_clauses: usize,
}

// Span of the program produced by one postfix operand.
// `empty` operands constrain nothing and emit no elements.
#[derive(Clone, Copy, Debug)]
struct Operand {
    start: usize,
    empty: bool,
}

/// Compile postfix tokens into a condition program, staging literals into
/// the key's typed columns.
pub(crate) fn compile_postfix(
    tokens: &[RpnToken],
    schema: &PrimaryKeySchema,
    literals: &mut KeyColumns,
) -> Result<(Vec<RpnElement>, CompileStats), CompileError> {
    let mut rpn = Vec::new();
    let mut operands: Vec<Operand> = Vec::new();
    let mut stats = CompileStats::default();
    let mut pos = 0;

    while let Some(token) = tokens.get(pos) {
        pos += 1;

        match token {
            RpnToken::Field(name) => {
                let start = rpn.len();

                let Some(key_column) = schema.field_index(name) else {
                    // Not a key column: swallow its operand and operator.
                    if matches!(tokens.get(pos), Some(RpnToken::Literal(_))) {
                        pos += 1;
                    }
                    if matches!(tokens.get(pos), Some(RpnToken::Compare(_))) {
                        pos += 1;
                    }
                    stats.skipped_clauses += 1;
                    operands.push(Operand { start, empty: true });
                    continue;
                };

                let Some(RpnToken::Literal(literal)) = tokens.get(pos) else {
                    return Err(CompileError::MissingOperand {
                        field: name.clone(),
                    });
                };
                let Some(RpnToken::Compare(op)) = tokens.get(pos + 1) else {
                    return Err(CompileError::MissingOperator {
                        field: name.clone(),
                    });
                };
                pos += 2;

                match bind_operand(name, key_column, *op, literal, literals)? {
                    Some(element) => {
                        rpn.push(element);
                        operands.push(Operand {
                            start,
                            empty: false,
                        });
                    }
                    None => {
                        stats.dropped_clauses += 1;
                        operands.push(Operand { start, empty: true });
                    }
                }
            }

            // Stray operands carry no field; nothing to bind.
            RpnToken::Literal(_) | RpnToken::Compare(_) => {}

            RpnToken::Logical(op) => {
                let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
                    return Err(CompileError::MalformedProgram {
                        reason: "logical operator without two operands",
                    });
                };

                let empty = match (left.empty, right.empty) {
                    (false, false) => {
                        rpn.push(match op {
                            LogicalOp::And => RpnElement::And,
                            LogicalOp::Or => RpnElement::Or,
                        });
                        false
                    }
                    (true, true) => true,
                    // The present side already sits alone in the span.
                    _ if *op == LogicalOp::And => false,
                    // One OR branch is unconstrained, so the whole OR is.
                    _ => {
                        rpn.truncate(left.start);
                        true
                    }
                };

                operands.push(Operand {
                    start: left.start,
                    empty,
                });
            }

            RpnToken::Expr(expr) => {
                return Err(CompileError::UnsupportedExpr {
                    expr: expr.to_string(),
                });
            }
        }
    }

    if operands.len() > 1 {
        return Err(CompileError::MalformedProgram {
            reason: "operands left without a connective",
        });
    }

    stats.elements = rpn.len();

    Ok((rpn, stats))
}

// Translate one `field op literal` triple. `Ok(None)` means the clause has
// no range mapping and constrains nothing.
fn bind_operand(
    field: &str,
    key_column: usize,
    op: CompareOp,
    literal: &Literal,
    literals: &mut KeyColumns,
) -> Result<Option<RpnElement>, CompileError> {
    let value = match literal {
        Literal::String(v) => Value::from(v.as_str()),
        Literal::Integer(v) => Value::Integer(*v),
        Literal::Unsigned(v) => Value::Unsigned(*v),
        Literal::Boolean(v) => Value::Boolean(*v),
        Literal::Float(v) => match Value::float(*v) {
            Some(value) => value,
            None => return Ok(None),
        },
        Literal::List(values) => return Ok(bind_set(key_column, op, values, literals)),
        Literal::Regex(_) | Literal::Duration(_) => {
            return Err(CompileError::UnsupportedLiteral {
                field: field.to_string(),
                kind: literal.kind(),
            });
        }
    };

    let Some(bound) = stage_literal(key_column, &value, literals) else {
        return Ok(None);
    };

    let range = match op {
        CompareOp::Eq => Range::point(bound),
        CompareOp::Lt => Range::right_bounded(bound, false, false),
        CompareOp::Lte => Range::right_bounded(bound, true, false),
        CompareOp::Gt => Range::left_bounded(bound, false, false),
        CompareOp::Gte => Range::left_bounded(bound, true, false),
        CompareOp::Neq | CompareOp::In | CompareOp::NotIn => return Ok(None),
    };

    Ok(Some(RpnElement::in_range(key_column, range)))
}

// IN lists become a set element. A member the column cannot hold drops
// the whole clause, since its numeric value might still match a row.
fn bind_set(
    key_column: usize,
    op: CompareOp,
    values: &[Value],
    literals: &mut KeyColumns,
) -> Option<RpnElement> {
    let negated = match op {
        CompareOp::In => false,
        CompareOp::NotIn => true,
        _ => return None,
    };

    let members = values
        .iter()
        .map(|value| stage_literal(key_column, value, literals))
        .collect::<Option<Vec<_>>>()?;

    let index: Arc<dyn SetIndex> = Arc::new(KeySet::new(key_column, members));

    Some(RpnElement::in_set(index, negated))
}

// Append a literal to its key column and read back the column-typed value.
fn stage_literal(key_column: usize, value: &Value, literals: &mut KeyColumns) -> Option<Value> {
    let row = literals.append(key_column, value).ok()?;

    literals.field_ref(key_column, row).value()
}
