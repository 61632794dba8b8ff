//! matchtree core - structural pattern matching over data trees
//!
//! This crate compares an observed data tree against a possibly partial
//! pattern tree and explains mismatches as a ranked tree of hypotheses:
//! - Node model in an arena, tagged Expected (pattern) or Actual (observed)
//! - Per-node comparison state machine and greedy children matcher
//! - Diff ranking, pruning and text rendering
//! - Captures with post-match formulas
//! - JSON ingestion codec and test assertions

pub mod assert;
pub mod capture;
pub mod codec;
pub mod config;
pub mod diff;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

// Used by the exported logging macros
#[doc(hidden)]
pub use matchtree_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use assert::verify;
pub use capture::{Captures, Formula, Relation};
pub use config::{MatchConfig, ReportConfig};
pub use diff::{Diff, DiffKind, DiffSummary};
pub use engine::MatchReport;
pub use errors::{ExError, ExErrorKind, MatchTreeError, Result};
pub use model::{ActualTree, ExpectedTree, Node, NodeId, NodeProps, Policy};
pub use matchtree_core_types::Scalar;
