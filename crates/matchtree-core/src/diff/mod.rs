//! Diff/hypothesis model.
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical diff trees; child
//!   order follows expected-then-actual index order and pruning sorts stably.
//! - **Monotone pruning**: [`Diff::prune`] only removes hypotheses, never
//!   empties a non-empty aggregation, and never changes a diff's own tallies.

pub mod model;
pub mod prune;

pub use model::{Diff, DiffCategory, DiffKind, DiffSummary, Rank};
