//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Tree identifiers
pub const FIELD_EXPECTED_PATH: &str = "expected_path";
pub const FIELD_ACTUAL_PATH: &str = "actual_path";
pub const FIELD_CAPTURE_LABEL: &str = "capture_label";

// Collection sizes
pub const FIELD_EXPECTED_NODES: &str = "expected_nodes";
pub const FIELD_ACTUAL_NODES: &str = "actual_nodes";
pub const FIELD_HITS: &str = "hits";
pub const FIELD_MISSES: &str = "misses";

// Outcome
pub const FIELD_MATCHED: &str = "matched";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
