//! Per-node comparison: shape, then name, then value, then children.

use crate::diff::{Diff, DiffKind};
use crate::engine::children;
use crate::engine::context::MatchContext;
use crate::errors::{MatchTreeError, Result};
use crate::model::NodeId;

/// Result of comparing one node pair
#[derive(Debug)]
pub(crate) enum Outcome<'t> {
    /// The pair matched; carries the hits the complete match earned
    Match(u32),
    Mismatch(Diff<'t>),
}

impl<'t> Outcome<'t> {
    pub(crate) fn into_diff(self) -> Option<Diff<'t>> {
        match self {
            Outcome::Match(_) => None,
            Outcome::Mismatch(diff) => Some(diff),
        }
    }
}

/// Compare Expected node `e` against Actual node `a`
///
/// Captures recorded while a comparison ends in a mismatch are rolled back
/// before returning.
pub(crate) fn compare<'t>(
    ctx: &mut MatchContext<'t>,
    e: NodeId,
    a: NodeId,
    depth: usize,
) -> Result<Outcome<'t>> {
    if depth > ctx.max_depth {
        return Err(MatchTreeError::TooDeep {
            limit: ctx.max_depth,
        });
    }

    let (expected_tree, actual_tree) = (ctx.expected, ctx.actual);
    let expected = expected_tree.node(e);
    let actual = actual_tree.node(a);
    let absent = expected_tree.policy(e).absent;
    let e_ref = expected_tree.node_ref(e);
    let a_ref = actual_tree.node_ref(a);

    let mut hits = 1;

    if !actual.props().is_subset_of(&expected.props()) {
        return Ok(Outcome::Mismatch(Diff::new(DiffKind::TypesMismatch, e_ref, a_ref, hits, 1)));
    }
    hits += 1;

    if !expected.is_nameless() {
        if actual.name() != expected.name() {
            if absent {
                return Ok(Outcome::Match(hits));
            }
            return Ok(Outcome::Mismatch(Diff::new(DiffKind::NamesMismatch, e_ref, a_ref, hits, 1)));
        }
        hits += 1;
        if absent {
            return Ok(Outcome::Mismatch(Diff::new(DiffKind::UnexpectedNode, e_ref, a_ref, hits, 1)));
        }
    }

    let mark = ctx.captures.mark();
    let outcome = compare_content(ctx, e, a, hits, depth)?;

    if absent {
        // Nameless absent patterns: presence is decided by the remaining checks.
        ctx.captures.rollback(mark);
        return Ok(match outcome {
            Outcome::Mismatch(_) => Outcome::Match(hits),
            Outcome::Match(_) => {
                Outcome::Mismatch(Diff::new(DiffKind::UnexpectedNode, e_ref, a_ref, hits, 1))
            }
        });
    }

    if let Outcome::Mismatch(_) = outcome {
        ctx.captures.rollback(mark);
    }
    Ok(outcome)
}

/// Capture, value or children check; a leaf match earns one hit over `hits`
fn compare_content<'t>(
    ctx: &mut MatchContext<'t>,
    e: NodeId,
    a: NodeId,
    hits: u32,
    depth: usize,
) -> Result<Outcome<'t>> {
    let (expected_tree, actual_tree) = (ctx.expected, ctx.actual);
    let expected = expected_tree.node(e);
    let actual = actual_tree.node(a);
    let e_ref = expected_tree.node_ref(e);
    let a_ref = actual_tree.node_ref(a);

    if let Some(label) = expected_tree.pattern(e).capture() {
        return Ok(match actual.value() {
            Some(value) => {
                tracing::trace!(capture_label = label, value = %value, actual_path = %a_ref.path(), "captured");
                ctx.captures.record(label, value.clone());
                Outcome::Match(hits + 1)
            }
            None => Outcome::Mismatch(Diff::new(DiffKind::TypesMismatch, e_ref, a_ref, hits, 1)),
        });
    }

    if let Some(value) = expected.value() {
        if actual.value() != Some(value) {
            return Ok(Outcome::Mismatch(Diff::new(DiffKind::ValueMismatch, e_ref, a_ref, hits, 1)));
        }
        return Ok(Outcome::Match(hits + 1));
    }

    children::match_children(ctx, e, a, hits, depth)
}
