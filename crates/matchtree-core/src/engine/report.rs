use crate::capture::{Captures, Formula};
use crate::config::ReportConfig;
use crate::diff::{Diff, DiffSummary};
use crate::errors::{MatchTreeError, Result};
use crate::render::render_diff;

/// Outcome of one top-level match: the optional diff plus recorded captures
#[derive(Debug, Clone)]
pub struct MatchReport<'t> {
    diff: Option<Diff<'t>>,
    captures: Captures,
}

impl<'t> MatchReport<'t> {
    pub(crate) fn new(diff: Option<Diff<'t>>, captures: Captures) -> Self {
        Self { diff, captures }
    }

    pub fn is_match(&self) -> bool {
        self.diff.is_none()
    }

    pub fn diff(&self) -> Option<&Diff<'t>> {
        self.diff.as_ref()
    }

    pub fn into_diff(self) -> Option<Diff<'t>> {
        self.diff
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn into_parts(self) -> (Option<Diff<'t>>, Captures) {
        (self.diff, self.captures)
    }

    pub fn summary(&self) -> Option<DiffSummary> {
        self.diff.as_ref().map(Diff::summary)
    }

    /// Run a derived check over the captures
    ///
    /// # Errors
    /// * `MatchFailed` - the match produced a diff
    /// * any error of [`Formula::evaluate`]
    pub fn evaluate(&self, formula: &Formula) -> Result<bool> {
        if self.diff.is_some() {
            return Err(MatchTreeError::MatchFailed);
        }
        formula.evaluate(&self.captures)
    }

    /// Render the diff per `config`; empty on a successful match
    pub fn render(&self, config: &ReportConfig) -> String {
        match &self.diff {
            None => String::new(),
            Some(diff) if config.prune => render_diff(&diff.clone().pruned(), config.max_depth),
            Some(diff) => render_diff(diff, config.max_depth),
        }
    }
}
