use crate::capture::Captures;
use crate::config::MatchConfig;
use crate::model::{Actual, Expected, Tree};

/// Per-call matching state
///
/// Everything mutable during one top-level comparison lives here, so two
/// concurrent calls against the same trees never share working sets.
pub(crate) struct MatchContext<'t> {
    pub(crate) expected: &'t Tree<Expected>,
    pub(crate) actual: &'t Tree<Actual>,
    pub(crate) max_depth: usize,
    pub(crate) captures: Captures,
}

impl<'t> MatchContext<'t> {
    pub(crate) fn new(
        expected: &'t Tree<Expected>,
        actual: &'t Tree<Actual>,
        config: &MatchConfig,
    ) -> Self {
        Self {
            expected,
            actual,
            max_depth: config.max_depth,
            captures: Captures::new(expected.capture_labels()),
        }
    }

    pub(crate) fn into_captures(self) -> Captures {
        self.captures
    }
}
