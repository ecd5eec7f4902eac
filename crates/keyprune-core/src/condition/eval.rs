use crate::{
    condition::{
        mark::Mark,
        range::Range,
        rpn::{RangeElement, RpnElement, SetElement},
    },
    error::ErrorClass,
};
use keyprune_primitives::FieldType;
use thiserror::Error as ThisError;

///
/// EvalError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EvalError {
    #[error("condition stack underflow at {op}")]
    StackUnderflow { op: &'static str },

    #[error("condition program left {depth} marks on the stack, expected 1")]
    InvalidStack { depth: usize },

    #[error("set index for key column {key_column} is not built")]
    SetIndexNotBuilt { key_column: usize },

    #[error("key column {key_column} out of range ({len} ranges)")]
    KeyColumnOutOfRange { key_column: usize, len: usize },

    #[error("key size {used_key_size} exceeds available key columns ({available})")]
    KeySizeMismatch {
        used_key_size: usize,
        available: usize,
    },

    #[error("{side} key bound for column {column} does not reference a stored value")]
    DanglingBound { side: &'static str, column: usize },
}

impl EvalError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::StackUnderflow { .. } | Self::InvalidStack { .. } => ErrorClass::Corruption,
            Self::SetIndexNotBuilt { .. }
            | Self::KeyColumnOutOfRange { .. }
            | Self::KeySizeMismatch { .. }
            | Self::DanglingBound { .. } => ErrorClass::InvariantViolation,
        }
    }
}

/// Interpret a condition program over one hyper-rectangle of key ranges.
pub(crate) fn check_in_range(
    rpn: &[RpnElement],
    ranges: &[Range],
    types: &[FieldType],
) -> Result<Mark, EvalError> {
    let single_point = ranges.iter().all(Range::is_point);
    let mut stack: Vec<Mark> = Vec::with_capacity(rpn.len());

    for element in rpn {
        let mark = match element {
            RpnElement::Range(element) => range_mark(element, ranges)?,
            RpnElement::Set(element) => set_mark(element, ranges, types, single_point)?,
            RpnElement::And => {
                let (left, right) = pop_operands(&mut stack, "and")?;
                left & right
            }
            RpnElement::Or => {
                let (left, right) = pop_operands(&mut stack, "or")?;
                left | right
            }
        };
        stack.push(mark);
    }

    match stack.as_slice() {
        [mark] => Ok(*mark),
        _ => Err(EvalError::InvalidStack { depth: stack.len() }),
    }
}

fn range_mark(element: &RangeElement, ranges: &[Range]) -> Result<Mark, EvalError> {
    let key_range = ranges
        .get(element.key_column)
        .ok_or(EvalError::KeyColumnOutOfRange {
            key_column: element.key_column,
            len: ranges.len(),
        })?;

    // An empty rectangle holds no rows.
    if key_range.is_empty() {
        return Ok(Mark::CONSIDER_ONLY_BE_TRUE);
    }

    // Transformed columns are not narrowed yet.
    if !element.monotonic_chain.is_empty() {
        return Ok(Mark::UNKNOWN);
    }

    let mark = Mark::new(
        element.range.intersects_range(key_range),
        !element.range.contains_range(key_range),
    );

    Ok(mark.negate_if(element.negated))
}

fn set_mark(
    element: &SetElement,
    ranges: &[Range],
    types: &[FieldType],
    single_point: bool,
) -> Result<Mark, EvalError> {
    if !element.index.is_built() {
        return Err(EvalError::SetIndexNotBuilt {
            key_column: element.key_column,
        });
    }
    if element.key_column >= ranges.len() {
        return Err(EvalError::KeyColumnOutOfRange {
            key_column: element.key_column,
            len: ranges.len(),
        });
    }

    let mark = element.index.check_in_range(ranges, types, single_point);

    Ok(mark.negate_if(element.negated))
}

// Pop the two operands of a connective, left first.
fn pop_operands(stack: &mut Vec<Mark>, op: &'static str) -> Result<(Mark, Mark), EvalError> {
    match (stack.pop(), stack.pop()) {
        (Some(right), Some(left)) => Ok((left, right)),
        _ => Err(EvalError::StackUnderflow { op }),
    }
}
