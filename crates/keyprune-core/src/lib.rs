//! Core runtime for keyprune: key values, typed literal columns, the
//! predicate-to-postfix compiler, and the granule pruning evaluator.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod column;
pub mod condition;
pub mod config;
pub mod error;
pub mod expr;
pub mod obs;
pub mod schema;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary needed to compile a condition
/// and check granules against it.
///

pub mod prelude {
    pub use crate::{
        column::{FieldRef, KeyColumns},
        condition::{KeyCondition, KeyConditionImpl, Mark, Range, compile},
        expr::{CompareOp, Expr, Literal},
        schema::{KeyField, PrimaryKeySchema},
        value::Value,
    };
    pub use keyprune_primitives::FieldType;
}
