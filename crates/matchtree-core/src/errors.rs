use thiserror::Error;

/// Result type alias using MatchTreeError
pub type Result<T> = std::result::Result<T, MatchTreeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Ordinary mismatches are never errors: they are reported as `Diff` values.
/// Every kind here is either a programmer error in pattern/tree authoring, a
/// resource limit, a malformed external input, or a failed assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Construction
    MalformedTree,
    UnknownNode,
    InvalidPattern,

    // Inputs
    InvalidDocument,
    InvalidConfig,

    // Matching
    TooDeep,
    MatchFailed,
    Mismatch,

    // Captures / formulas
    CaptureNotFound,
    NonNumericCapture,
    CaptureLengthMismatch,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedTree => "ERR_MALFORMED_TREE",
            ExErrorKind::UnknownNode => "ERR_UNKNOWN_NODE",
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::TooDeep => "ERR_TOO_DEEP",
            ExErrorKind::MatchFailed => "ERR_MATCH_FAILED",
            ExErrorKind::Mismatch => "ERR_MISMATCH",
            ExErrorKind::CaptureNotFound => "ERR_CAPTURE_NOT_FOUND",
            ExErrorKind::NonNumericCapture => "ERR_NON_NUMERIC_CAPTURE",
            ExErrorKind::CaptureLengthMismatch => "ERR_CAPTURE_LENGTH_MISMATCH",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable kind/code for programmatic handling plus optional
/// context (operation, tree path, capture label) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    label: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            label: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add tree path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add capture label context
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the tree path, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the capture label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(label) = &self.label {
            write!(f, " (capture: {})", label)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for matchtree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchTreeError {
    // ===== Construction Errors =====
    /// An atomic node (one carrying a value) was given a child
    #[error("Atomic node at {path} cannot have children")]
    AtomicWithChildren { path: String },

    /// A node id does not belong to the tree it was used with
    #[error("Node {index} does not exist in this tree")]
    UnknownNode { index: usize },

    /// Pattern options or literal are inconsistent
    #[error("Invalid pattern at {path}: {reason}")]
    InvalidPattern { path: String, reason: String },

    // ===== Input Errors =====
    /// Document text could not be decoded
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===== Matching Errors =====
    /// Recursion exceeded the configured depth limit
    #[error("Tree too deep: comparison exceeded depth limit {limit}")]
    TooDeep { limit: usize },

    /// Post-match checks were requested on a failed match
    #[error("Derived checks require a successful match")]
    MatchFailed,

    /// Assertion failure; the report is the rendered pruned diff
    #[error("Actual tree does not match expected pattern:\n{report}")]
    Mismatch { report: String },

    // ===== Capture Errors =====
    /// No capture with this label exists in the pattern
    #[error("Capture not found: {label}")]
    CaptureNotFound { label: String },

    /// A captured value is not numeric
    #[error("Capture {label} holds non-numeric value {value}")]
    NonNumericCapture { label: String, value: String },

    /// Elementwise relation over captures of different lengths
    #[error("Captures {left} ({left_len}) and {right} ({right_len}) have different lengths")]
    CaptureLengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },
}

/// Conversion from MatchTreeError to ExError
impl From<MatchTreeError> for ExError {
    fn from(err: MatchTreeError) -> Self {
        match err {
            MatchTreeError::AtomicWithChildren { path } => {
                ExError::new(ExErrorKind::MalformedTree)
                    .with_path(path)
                    .with_op("push")
                    .with_message("Atomic node cannot have children")
            }

            MatchTreeError::UnknownNode { index } => ExError::new(ExErrorKind::UnknownNode)
                .with_message(format!("Node {} does not exist in this tree", index)),

            MatchTreeError::InvalidPattern { path, reason } => {
                ExError::new(ExErrorKind::InvalidPattern)
                    .with_path(path)
                    .with_message(reason)
            }

            MatchTreeError::InvalidDocument { message } => {
                ExError::new(ExErrorKind::InvalidDocument).with_message(message)
            }

            MatchTreeError::InvalidConfig { message } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            MatchTreeError::TooDeep { limit } => ExError::new(ExErrorKind::TooDeep)
                .with_op("diff")
                .with_message(format!("Comparison exceeded depth limit {}", limit)),

            MatchTreeError::MatchFailed => ExError::new(ExErrorKind::MatchFailed)
                .with_op("evaluate")
                .with_message("Derived checks require a successful match"),

            MatchTreeError::Mismatch { report } => ExError::new(ExErrorKind::Mismatch)
                .with_op("verify")
                .with_message(report),

            MatchTreeError::CaptureNotFound { label } => {
                ExError::new(ExErrorKind::CaptureNotFound)
                    .with_label(label)
                    .with_message("Capture not found")
            }

            MatchTreeError::NonNumericCapture { label, value } => {
                ExError::new(ExErrorKind::NonNumericCapture)
                    .with_label(label)
                    .with_message(format!("Non-numeric captured value {}", value))
            }

            MatchTreeError::CaptureLengthMismatch {
                left,
                left_len,
                right,
                right_len,
            } => ExError::new(ExErrorKind::CaptureLengthMismatch)
                .with_label(format!("{},{}", left, right))
                .with_message(format!(
                    "Capture lengths differ: {} vs {}",
                    left_len, right_len
                )),
        }
    }
}
