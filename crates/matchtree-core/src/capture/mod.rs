//! Capture/formula extension.
//!
//! Capture nodes record every actual scalar they bind to during a match;
//! formulas check relations over those recordings afterwards.

pub mod accumulator;
pub mod formula;

pub use accumulator::Captures;
pub use formula::{Formula, Relation};
