//! Hypothesis pruning and leaf extraction.

use crate::diff::model::Diff;

impl<'t> Diff<'t> {
    /// Keep only the best-ranked hypotheses at every aggregation level
    ///
    /// Children are stably sorted by rank, descending; any child ranked
    /// strictly below the best is dropped, then survivors are pruned in turn.
    /// A node that has children always keeps at least one.
    pub fn prune(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.children.sort_by(|a, b| b.rank().cmp(&a.rank()));
        let best = self.children[0].rank();
        self.children.retain(|child| child.rank() == best);
        for child in &mut self.children {
            child.prune();
        }
    }

    /// Consuming form of [`Diff::prune`]
    pub fn pruned(mut self) -> Self {
        self.prune();
        self
    }

    /// Terminal diffs (those with no nested diffs), depth-first
    ///
    /// On a pruned tree this is the minimal presented explanation set.
    pub fn leaves(&self) -> Vec<&Diff<'t>> {
        self.walk()
            .into_iter()
            .filter(|diff| diff.children().is_empty())
            .collect()
    }
}
