//! ## Crate layout
//! - `core`: key values, literal columns, predicate expressions, the
//!   condition compiler and granule evaluator, and observability.
//! - `primitives`: declared key-column types and their capability metadata.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries everything needed to compile a condition
//! and prune granules with it.

pub use keyprune_core as core;
pub use keyprune_primitives as primitives;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{config::PruningConfig, prelude::*},
    };
}
