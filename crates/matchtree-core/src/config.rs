//! Match and report configuration
//!
//! Every field has a default, so a TOML fixture only needs to state what it
//! changes:
//!
//! ```toml
//! max_depth = 64
//!
//! [report]
//! prune = false
//! max_depth = 3
//! ```

use crate::errors::{MatchTreeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default recursion limit of one top-level comparison
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Deepest Expected/Actual pairing compared before aborting with `TooDeep`
    pub max_depth: usize,
    pub report: ReportConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            report: ReportConfig::default(),
        }
    }
}

/// How a diff is turned into text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Prune hypotheses to the best-ranked ones before rendering
    pub prune: bool,
    /// Deepest diff level rendered; `None` renders everything
    pub max_depth: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prune: true,
            max_depth: None,
        }
    }
}

impl MatchConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    /// * `InvalidConfig` - the text is not valid TOML for this structure
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: MatchConfig = toml::from_str(text).map_err(|e| MatchTreeError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    /// * `InvalidConfig` - the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| MatchTreeError::InvalidConfig {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(MatchTreeError::InvalidConfig {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
