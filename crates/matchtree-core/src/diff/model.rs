//! Mismatch records.
//!
//! A `Diff` is one explanation of why an Expected node does not match an
//! Actual node. Aggregation kinds nest further diffs; every other kind is a
//! terminal explanation. Success is represented by the absence of a `Diff`.

use crate::model::{Actual, Expected, NodeRef};
use matchtree_core_types::Scalar;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Discriminant of a mismatch record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Actual's property set is not a subset of Expected's
    TypesMismatch,
    /// Names differ
    NamesMismatch,
    /// A node that must be absent was found
    UnexpectedNode,
    /// Values differ
    ValueMismatch,
    /// No actual child matched this expected child; nests hypotheses
    ChildNotFound,
    /// Actual child left over under a fixed-size pattern
    ExtraChild,
    /// Candidate matched but violates the parent's order policy
    ChildrenOrder,
    /// Per-level aggregation of children failures
    ChildrenMismatch,
    /// An absent expected child was found; nests each occurrence
    SubtreeMismatch,
}

/// Broad classification of diff kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffCategory {
    Structural,
    Value,
    Collection,
    Aggregate,
}

impl DiffKind {
    /// Upper-case label used by the text renderer
    pub fn label(&self) -> &'static str {
        match self {
            DiffKind::TypesMismatch => "TYPES MISMATCH",
            DiffKind::NamesMismatch => "NAMES MISMATCH",
            DiffKind::UnexpectedNode => "UNEXPECTED NODE",
            DiffKind::ValueMismatch => "VALUE MISMATCH",
            DiffKind::ChildNotFound => "CHILD NOT FOUND",
            DiffKind::ExtraChild => "EXTRA CHILD",
            DiffKind::ChildrenOrder => "CHILDREN ORDER",
            DiffKind::ChildrenMismatch => "CHILDREN MISMATCH",
            DiffKind::SubtreeMismatch => "SUBTREE MISMATCH",
        }
    }

    pub fn category(&self) -> DiffCategory {
        match self {
            DiffKind::TypesMismatch | DiffKind::NamesMismatch | DiffKind::UnexpectedNode => {
                DiffCategory::Structural
            }
            DiffKind::ValueMismatch => DiffCategory::Value,
            DiffKind::ChildNotFound | DiffKind::ExtraChild | DiffKind::ChildrenOrder => {
                DiffCategory::Collection
            }
            DiffKind::ChildrenMismatch | DiffKind::SubtreeMismatch => DiffCategory::Aggregate,
        }
    }

    /// Kinds that may nest child diffs
    pub fn is_aggregation(&self) -> bool {
        matches!(
            self,
            DiffKind::ChildrenMismatch | DiffKind::ChildNotFound | DiffKind::SubtreeMismatch
        )
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ranking key of a diff: `(hits, -misses)`
///
/// Diffs that progressed further and failed on fewer elements rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub hits: u32,
    pub misses: u32,
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hits
            .cmp(&other.hits)
            .then_with(|| other.misses.cmp(&self.misses))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One mismatch record, borrowing both trees for `'t`
#[derive(Debug, Clone)]
pub struct Diff<'t> {
    kind: DiffKind,
    expected: NodeRef<'t, Expected>,
    actual: NodeRef<'t, Actual>,
    hits: u32,
    misses: u32,
    pub(crate) children: Vec<Diff<'t>>,
}

impl<'t> Diff<'t> {
    pub(crate) fn new(
        kind: DiffKind,
        expected: NodeRef<'t, Expected>,
        actual: NodeRef<'t, Actual>,
        hits: u32,
        misses: u32,
    ) -> Self {
        Self {
            kind,
            expected,
            actual,
            hits,
            misses,
            children: Vec::new(),
        }
    }

    pub(crate) fn with_children(mut self, children: Vec<Diff<'t>>) -> Self {
        self.children = children;
        self
    }

    pub fn kind(&self) -> DiffKind {
        self.kind
    }

    pub fn expected(&self) -> NodeRef<'t, Expected> {
        self.expected
    }

    pub fn actual(&self) -> NodeRef<'t, Actual> {
        self.actual
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn children(&self) -> &[Diff<'t>] {
        &self.children
    }

    pub fn rank(&self) -> Rank {
        Rank {
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Pre-order walk over this diff and all nested diffs
    pub fn walk(&self) -> Vec<&Diff<'t>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(diff) = stack.pop() {
            out.push(diff);
            stack.extend(diff.children.iter().rev());
        }
        out
    }

    /// True if this diff or any nested diff has the given kind
    pub fn contains_kind(&self, kind: DiffKind) -> bool {
        self.walk().iter().any(|d| d.kind == kind)
    }

    /// Number of diffs of the given kind in this tree
    pub fn count_kind(&self, kind: DiffKind) -> usize {
        self.walk().iter().filter(|d| d.kind == kind).count()
    }

    /// Owned, serializable copy of this diff tree
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            kind: self.kind,
            hits: self.hits,
            misses: self.misses,
            expected_path: self.expected.path(),
            actual_path: self.actual.path(),
            expected_value: self.expected.value().cloned(),
            actual_value: self.actual.value().cloned(),
            children: self.children.iter().map(Diff::summary).collect(),
        }
    }
}

/// Owned diff tree, detached from the trees it was computed against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffSummary {
    pub kind: DiffKind,
    pub hits: u32,
    pub misses: u32,
    pub expected_path: String,
    pub actual_path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expected_value: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub actual_value: Option<Scalar>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DiffSummary>,
}
