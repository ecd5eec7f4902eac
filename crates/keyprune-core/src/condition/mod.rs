//! Module: condition
//! Responsibility: compile predicates over the primary key into a postfix
//! program and decide, per granule, whether the program can hold.
//! Does not own: row-level predicate evaluation or index storage.
//! Boundary: callers hand in key bound tuples and receive a prune verdict.

mod enumerate;
mod eval;
mod mark;
mod range;
mod rpn;
mod set;

#[cfg(test)]
mod tests;

use crate::{
    column::{FieldRef, KeyColumns},
    config::PruningConfig,
    expr::{Expr, RpnToken, combine_with_and, to_postfix},
    obs::sink::{self, MetricsEvent},
    schema::PrimaryKeySchema,
};
use enumerate::{KeyBounds, Sides, check_in_any_range};
use keyprune_primitives::FieldType;
use tracing::{debug, instrument, trace, warn};

// re-exports
pub use eval::EvalError;
pub use mark::Mark;
pub use range::Range;
pub use rpn::{
    CompileError, CompileStats, MonotonicFunction, RangeElement, RpnElement, SetElement,
};
pub use set::{KeySet, SetIndex};

///
/// KeyCondition
///
/// Read-only pruning surface over a compiled condition.
///

pub trait KeyCondition {
    /// The condition constrains at least one primary-key column.
    fn have_primary_key(&self) -> bool;

    /// Highest key column the program reads, `None` when it reads none.
    fn max_key_index(&self) -> Option<usize>;

    fn is_first_primary_key(&self) -> bool;

    /// Binary search over the sparse index is valid only when the program
    /// reads key column 0 alone.
    fn can_do_binary_search(&self) -> bool;

    /// Return whether any key in `[left, right]` (lexicographic over the
    /// first `used_key_size` columns) can satisfy the condition.
    fn may_be_in_range(
        &self,
        used_key_size: usize,
        left: &[FieldRef<'_>],
        right: &[FieldRef<'_>],
        types: &[FieldType],
    ) -> Result<bool, EvalError>;
}

///
/// KeyConditionImpl
///
/// Compiled condition over one primary-key schema. Shared read-only across
/// evaluating threads; `set_rpn` needs exclusive access.
///

#[derive(Clone, Debug)]
pub struct KeyConditionImpl {
    rpn: Vec<RpnElement>,
    schema: PrimaryKeySchema,
    literals: KeyColumns,
    stats: CompileStats,
    config: PruningConfig,
}

impl KeyConditionImpl {
    /// Compile `time_condition AND condition`; either side may be absent.
    pub fn new(
        time_condition: Option<&Expr>,
        condition: Option<&Expr>,
        schema: PrimaryKeySchema,
    ) -> Result<Self, CompileError> {
        Self::with_config(time_condition, condition, schema, PruningConfig::default())
    }

    pub fn with_config(
        time_condition: Option<&Expr>,
        condition: Option<&Expr>,
        schema: PrimaryKeySchema,
        config: PruningConfig,
    ) -> Result<Self, CompileError> {
        let tokens = combine_with_and(time_condition, condition)
            .map(|expr| to_postfix(&expr))
            .unwrap_or_default();

        Self::from_postfix_with_config(&tokens, schema, config)
    }

    pub fn from_postfix(tokens: &[RpnToken], schema: PrimaryKeySchema) -> Result<Self, CompileError> {
        Self::from_postfix_with_config(tokens, schema, PruningConfig::default())
    }

    #[instrument(name = "keyprune::condition::compile", level = "debug", skip_all)]
    pub fn from_postfix_with_config(
        tokens: &[RpnToken],
        schema: PrimaryKeySchema,
        config: PruningConfig,
    ) -> Result<Self, CompileError> {
        let mut literals = KeyColumns::new(&schema);
        let (rpn, stats) = rpn::compile_postfix(tokens, &schema, &mut literals)?;

        debug!(
            elements = stats.elements,
            dropped = stats.dropped_clauses,
            skipped = stats.skipped_clauses,
            "compiled key condition"
        );
        if config.record_metrics {
            sink::record(MetricsEvent::Compile {
                elements: stats.elements as u64,
                dropped: stats.dropped_clauses as u64,
            });
        }

        Ok(Self {
            rpn,
            schema,
            literals,
            stats,
            config,
        })
    }

    #[must_use]
    pub fn rpn(&self) -> &[RpnElement] {
        &self.rpn
    }

    /// Replace the compiled program.
    pub fn set_rpn(&mut self, rpn: Vec<RpnElement>) {
        self.stats.elements = rpn.len();
        self.rpn = rpn;
    }

    #[must_use]
    pub const fn schema(&self) -> &PrimaryKeySchema {
        &self.schema
    }

    /// Typed literal columns the compiler staged comparison operands in.
    #[must_use]
    pub const fn literals(&self) -> &KeyColumns {
        &self.literals
    }

    #[must_use]
    pub const fn stats(&self) -> CompileStats {
        self.stats
    }

    #[must_use]
    pub const fn config(&self) -> &PruningConfig {
        &self.config
    }

    /// Evaluate the program over one hyper-rectangle.
    pub fn check_in_range(&self, ranges: &[Range], types: &[FieldType]) -> Result<Mark, EvalError> {
        eval::check_in_range(&self.rpn, ranges, types)
    }

    // Returns the verdict and how many rectangles were evaluated.
    fn enumerate(
        &self,
        used_key_size: usize,
        left: &[FieldRef<'_>],
        right: &[FieldRef<'_>],
        types: &[FieldType],
    ) -> Result<(bool, u64), EvalError> {
        if self.rpn.is_empty() {
            return Ok((true, 0));
        }

        let key_size = self.config.effective_key_size(used_key_size);
        let available = self
            .schema
            .len()
            .min(left.len())
            .min(right.len())
            .min(types.len());
        if key_size > available {
            return Err(EvalError::KeySizeMismatch {
                used_key_size: key_size,
                available,
            });
        }

        for (side, bound) in [("left", left), ("right", right)] {
            if let Some(column) = bound[..key_size].iter().position(|f| f.value().is_none()) {
                return Err(EvalError::DanglingBound { side, column });
            }
        }

        // Columns past the caller's type slice fall back to the schema.
        let column_types: Vec<FieldType> = self
            .schema
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| types.get(i).copied().unwrap_or(field.field_type))
            .collect();
        let mut ranges: Vec<Range> = column_types
            .iter()
            .map(|field_type| Range::whole(field_type.considers_nulls()))
            .collect();

        let bounds = KeyBounds {
            left,
            right,
            types: &column_types,
        };
        let mut rectangles = 0u64;
        let mark = check_in_any_range(
            &bounds,
            key_size,
            Sides::BOTH,
            0,
            &mut ranges,
            Mark::CONSIDER_ONLY_BE_TRUE,
            &mut |ranges: &[Range]| {
                rectangles += 1;
                self.check_in_range(ranges, &column_types)
            },
        )?;

        Ok((mark.can_be_true, rectangles))
    }
}

impl KeyCondition for KeyConditionImpl {
    fn have_primary_key(&self) -> bool {
        !self.rpn.is_empty()
    }

    fn max_key_index(&self) -> Option<usize> {
        self.rpn.iter().filter_map(RpnElement::key_column).max()
    }

    fn is_first_primary_key(&self) -> bool {
        self.max_key_index() == Some(0)
    }

    fn can_do_binary_search(&self) -> bool {
        self.is_first_primary_key()
    }

    fn may_be_in_range(
        &self,
        used_key_size: usize,
        left: &[FieldRef<'_>],
        right: &[FieldRef<'_>],
        types: &[FieldType],
    ) -> Result<bool, EvalError> {
        match self.enumerate(used_key_size, left, right, types) {
            Ok((may_match, rectangles)) => {
                trace!(used_key_size, rectangles, may_match, "granule checked");
                if self.config.record_metrics {
                    sink::record(MetricsEvent::GranuleCheck {
                        pruned: !may_match,
                        rectangles,
                    });
                }

                Ok(may_match)
            }
            Err(err) => {
                warn!(error = %err, used_key_size, "key condition evaluation failed");
                if self.config.record_metrics {
                    sink::record(MetricsEvent::EvalError);
                }

                Err(err)
            }
        }
    }
}

/// Compile a key condition from optional time and general predicates.
pub fn compile(
    time_condition: Option<&Expr>,
    condition: Option<&Expr>,
    schema: PrimaryKeySchema,
) -> Result<KeyConditionImpl, CompileError> {
    KeyConditionImpl::new(time_condition, condition, schema)
}
