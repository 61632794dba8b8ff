//! Matching engine.
//!
//! `Tree<Expected>::diff` compares one pattern tree against one observed
//! tree. Each call owns a private [`context::MatchContext`], so trees may be
//! shared between threads and matched concurrently.

mod children;
mod compare;
mod context;
pub mod report;

pub use report::MatchReport;

use crate::config::MatchConfig;
use crate::diff::Diff;
use crate::errors::Result;
use crate::model::{Actual, Expected, Tree};
use crate::{log_op_end, log_op_error, log_op_start};
use compare::Outcome;
use context::MatchContext;
use std::time::Instant;

impl Tree<Expected> {
    /// Compare this pattern against `actual` with the default configuration
    ///
    /// `Ok(None)` means the actual tree satisfies the pattern.
    ///
    /// # Errors
    /// * `TooDeep` - recursion exceeded the default depth limit
    pub fn diff<'t>(&'t self, actual: &'t Tree<Actual>) -> Result<Option<Diff<'t>>> {
        self.run(actual, &MatchConfig::default())
            .map(MatchReport::into_diff)
    }

    /// Compare this pattern against `actual`, keeping recorded captures
    ///
    /// # Errors
    /// * `TooDeep` - recursion exceeded `config.max_depth`
    pub fn run<'t>(
        &'t self,
        actual: &'t Tree<Actual>,
        config: &MatchConfig,
    ) -> Result<MatchReport<'t>> {
        let start = Instant::now();
        log_op_start!(
            "diff",
            expected_nodes = self.node_count(),
            actual_nodes = actual.node_count()
        );
        self.note_reserved_policies();

        let mut ctx = MatchContext::new(self, actual, config);
        match compare::compare(&mut ctx, self.root(), actual.root(), 0).map(Outcome::into_diff) {
            Ok(diff) => {
                log_op_end!(
                    "diff",
                    duration_ms = start.elapsed().as_millis() as u64,
                    matched = diff.is_none()
                );
                Ok(MatchReport::new(diff, ctx.into_captures()))
            }
            Err(err) => {
                log_op_error!(
                    "diff",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn note_reserved_policies(&self) {
        for id in self.ids() {
            if self.policy(id).uses_reserved() {
                tracing::debug!(
                    path = %self.path(id),
                    "anchor/contiguous policy is not enforced; ignoring"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::capture::Formula;
    use crate::config::MatchConfig;
    use crate::errors::MatchTreeError;
    use crate::model::{ActualTree, ExpectedTree, Node, Policy};

    fn deep_pair(depth: usize) -> (ExpectedTree, ActualTree) {
        let mut expected = ExpectedTree::new(Node::new("n"), Policy::new());
        let mut actual = ActualTree::new(Node::new("n"));
        let (mut e, mut a) = (expected.root(), actual.root());
        for _ in 0..depth {
            e = expected.push(e, Node::new("n"), Policy::new()).unwrap();
            a = actual.push(a, Node::new("n")).unwrap();
        }
        (expected, actual)
    }

    #[test]
    fn test_diff_success_is_none() {
        let (expected, actual) = deep_pair(3);
        assert!(expected.diff(&actual).unwrap().is_none());
    }

    #[test]
    fn test_too_deep() {
        let (expected, actual) = deep_pair(10);
        let config = MatchConfig {
            max_depth: 4,
            ..MatchConfig::default()
        };
        assert_eq!(
            expected.run(&actual, &config).unwrap_err(),
            MatchTreeError::TooDeep { limit: 4 }
        );
        let config = MatchConfig {
            max_depth: 10,
            ..MatchConfig::default()
        };
        assert!(expected.run(&actual, &config).unwrap().is_match());
    }

    #[test]
    fn test_evaluate_requires_match() {
        let expected = ExpectedTree::new(Node::leaf("a", 1), Policy::new());
        let actual = ActualTree::new(Node::leaf("a", 2));
        let report = expected.run(&actual, &MatchConfig::default()).unwrap();
        assert_eq!(
            report.evaluate(&Formula::increasing("ts")).unwrap_err(),
            MatchTreeError::MatchFailed
        );
    }
}
