//! Children matcher: greedy first-fit bipartite matching with hypotheses.
//!
//! Expected children are visited in declared order; each scans the Actual
//! children in their original order, skipping indices already consumed.
//! Every failed pairing is retained as a hypothesis so that, if the expected
//! child ends up unmatched, the report can explain what each remaining
//! Actual sibling got wrong.

use crate::diff::{Diff, DiffKind};
use crate::engine::compare::{compare, Outcome};
use crate::engine::context::MatchContext;
use crate::errors::Result;
use crate::model::NodeId;

/// A failed (expected, actual) pairing kept for later reporting
struct Hypothesis<'t> {
    expected_idx: usize,
    actual_idx: usize,
    diff: Diff<'t>,
}

/// Per-expected-child outcome that needs a diff entry
enum Failure<'t> {
    NotFound(usize),
    Present(Diff<'t>),
}

/// Match the children of Expected `e` against the children of Actual `a`
///
/// `base_hits` are the node-level hits already earned by the parents. A
/// complete match earns one hit per matched child plus one for the node, so
/// it always outscores a `ChildrenMismatch` against the same pattern.
pub(crate) fn match_children<'t>(
    ctx: &mut MatchContext<'t>,
    e: NodeId,
    a: NodeId,
    base_hits: u32,
    depth: usize,
) -> Result<Outcome<'t>> {
    let (expected_tree, actual_tree) = (ctx.expected, ctx.actual);
    let expected_children = expected_tree.node(e).children();
    let actual_children = actual_tree.node(a).children();
    let policy = *expected_tree.policy(e);

    let mut consumed = vec![false; actual_children.len()];
    let mut hypotheses: Vec<Hypothesis<'t>> = Vec::new();
    let mut failures: Vec<Failure<'t>> = Vec::new();
    let mut last_matched: Option<usize> = None;
    let mut hits = base_hits;
    let mut misses = 0;

    for (expected_idx, &expected_child) in expected_children.iter().enumerate() {
        let pattern = expected_tree.pattern(expected_child);

        if pattern.policy().absent {
            match scan_absent(ctx, expected_child, a, depth)? {
                None => hits += 1,
                Some(diff) => {
                    misses += 1;
                    failures.push(Failure::Present(diff));
                }
            }
            continue;
        }

        let exhaustive = pattern.has_capture();
        let mut found = false;

        for (actual_idx, &actual_child) in actual_children.iter().enumerate() {
            if consumed[actual_idx] {
                continue;
            }
            let mark = ctx.captures.mark();
            match compare(ctx, expected_child, actual_child, depth + 1)? {
                Outcome::Match(earned) => {
                    if policy.order && last_matched.is_some_and(|last| actual_idx < last) {
                        ctx.captures.rollback(mark);
                        hypotheses.push(Hypothesis {
                            expected_idx,
                            actual_idx,
                            diff: order_violation(ctx, expected_child, actual_child, earned),
                        });
                        continue;
                    }
                    consumed[actual_idx] = true;
                    last_matched = Some(actual_idx);
                    found = true;
                    if !exhaustive {
                        break;
                    }
                }
                Outcome::Mismatch(diff) => hypotheses.push(Hypothesis {
                    expected_idx,
                    actual_idx,
                    diff,
                }),
            }
        }

        if found {
            hits += 1;
            hypotheses.retain(|h| h.expected_idx != expected_idx);
        } else {
            misses += 1;
            failures.push(Failure::NotFound(expected_idx));
        }
    }

    let e_ref = expected_tree.node_ref(e);
    let a_ref = actual_tree.node_ref(a);
    let mut children = Vec::with_capacity(failures.len());

    for failure in failures {
        match failure {
            Failure::Present(diff) => children.push(diff),
            Failure::NotFound(expected_idx) => {
                let nested: Vec<Diff<'t>> = hypotheses
                    .iter()
                    .filter(|h| h.expected_idx == expected_idx && !consumed[h.actual_idx])
                    .map(|h| h.diff.clone())
                    .collect();
                let expected_child = expected_tree.node_ref(expected_children[expected_idx]);
                children.push(
                    Diff::new(DiffKind::ChildNotFound, expected_child, a_ref, 0, 1)
                        .with_children(nested),
                );
            }
        }
    }

    if misses == 0 && policy.fixed {
        for (actual_idx, &actual_child) in actual_children.iter().enumerate() {
            if consumed[actual_idx] {
                continue;
            }
            misses += 1;
            children.push(Diff::new(
                DiffKind::ExtraChild,
                e_ref,
                actual_tree.node_ref(actual_child),
                0,
                1,
            ));
        }
    }

    tracing::trace!(
        expected_path = %e_ref.path(),
        actual_path = %a_ref.path(),
        hits,
        misses,
        "children matched"
    );

    if misses == 0 {
        return Ok(Outcome::Match(hits + 1));
    }
    Ok(Outcome::Mismatch(
        Diff::new(DiffKind::ChildrenMismatch, e_ref, a_ref, hits, misses).with_children(children),
    ))
}

/// Compare an absent expected child against every Actual sibling
///
/// Never consumes Actual indices. Returns a `SubtreeMismatch` nesting every
/// occurrence, or `None` when the child is indeed absent. A named absent
/// child is present whenever a sibling carries its name, whatever its shape.
fn scan_absent<'t>(
    ctx: &mut MatchContext<'t>,
    expected_child: NodeId,
    a: NodeId,
    depth: usize,
) -> Result<Option<Diff<'t>>> {
    let (expected_tree, actual_tree) = (ctx.expected, ctx.actual);
    let expected = expected_tree.node(expected_child);
    let mut occurrences = Vec::new();

    for &actual_child in actual_tree.node(a).children() {
        let Outcome::Mismatch(diff) = compare(ctx, expected_child, actual_child, depth + 1)? else {
            continue;
        };
        match diff.kind() {
            DiffKind::UnexpectedNode => occurrences.push(diff),
            DiffKind::TypesMismatch
                if !expected.is_nameless()
                    && actual_tree.node(actual_child).name() == expected.name() =>
            {
                occurrences.push(Diff::new(
                    DiffKind::UnexpectedNode,
                    diff.expected(),
                    diff.actual(),
                    diff.hits(),
                    1,
                ));
            }
            _ => {}
        }
    }

    if occurrences.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        Diff::new(
            DiffKind::SubtreeMismatch,
            expected_tree.node_ref(expected_child),
            actual_tree.node_ref(a),
            0,
            1,
        )
        .with_children(occurrences),
    ))
}

/// A candidate that matched but precedes the previously matched sibling
///
/// Carries the hits the complete match `earned`, so it outranks partial
/// failures against the same candidates.
fn order_violation<'t>(ctx: &MatchContext<'t>, e: NodeId, a: NodeId, earned: u32) -> Diff<'t> {
    Diff::new(
        DiffKind::ChildrenOrder,
        ctx.expected.node_ref(e),
        ctx.actual.node_ref(a),
        earned,
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::model::{ActualTree, ExpectedTree, Node, Policy};

    fn list(values: &[i64]) -> ActualTree {
        let mut tree = ActualTree::new(Node::new("list"));
        for (i, v) in values.iter().enumerate() {
            tree.push(tree.root(), Node::leaf(i.to_string(), *v).nameless())
                .unwrap();
        }
        tree
    }

    fn pattern(values: &[i64], policy: Policy) -> ExpectedTree {
        let mut tree = ExpectedTree::new(Node::new("list"), policy);
        for (i, v) in values.iter().enumerate() {
            tree.push(
                tree.root(),
                Node::leaf(i.to_string(), *v).nameless(),
                Policy::new(),
            )
            .unwrap();
        }
        tree
    }

    fn children_of<'t>(
        expected: &'t ExpectedTree,
        actual: &'t ActualTree,
    ) -> Option<Diff<'t>> {
        let mut ctx = MatchContext::new(expected, actual, &MatchConfig::default());
        match_children(&mut ctx, expected.root(), actual.root(), 3, 0)
            .unwrap()
            .into_diff()
    }

    #[test]
    fn test_subset_matches() {
        let actual = list(&[1, 2, 3]);
        let expected = pattern(&[2, 3], Policy::new());
        assert!(children_of(&expected, &actual).is_none());
    }

    #[test]
    fn test_unmatched_child_nests_unconsumed_hypotheses() {
        let actual = list(&[1, 2, 3]);
        let expected = pattern(&[2, 4], Policy::new());
        let diff = children_of(&expected, &actual).unwrap();

        assert_eq!(diff.kind(), DiffKind::ChildrenMismatch);
        assert_eq!((diff.hits(), diff.misses()), (4, 1));
        let not_found = &diff.children()[0];
        assert_eq!(not_found.kind(), DiffKind::ChildNotFound);
        let against: Vec<String> = not_found
            .children()
            .iter()
            .map(|d| d.actual().path())
            .collect();
        assert_eq!(against, vec!["list/0", "list/2"]);
    }

    #[test]
    fn test_order_rejection_becomes_hypothesis() {
        let actual = list(&[1, 2, 3]);
        let expected = pattern(&[3, 2], Policy::new().ordered());
        let diff = children_of(&expected, &actual).unwrap();
        assert!(diff.contains_kind(DiffKind::ChildrenOrder));
    }

    #[test]
    fn test_order_skips_to_later_candidate() {
        let actual = list(&[1, 2, 1]);
        let expected = pattern(&[2, 1], Policy::new().ordered());
        assert!(children_of(&expected, &actual).is_none());
    }

    #[test]
    fn test_fixed_reports_extra_children() {
        let actual = list(&[0, 1, 2]);
        let expected = pattern(&[0, 1], Policy::new().fixed());
        let diff = children_of(&expected, &actual).unwrap();
        assert_eq!(diff.count_kind(DiffKind::ExtraChild), 1);
        assert_eq!(diff.misses(), 1);
    }

    #[test]
    fn test_fixed_without_match_skips_extra_children() {
        let actual = list(&[0, 1, 2]);
        let expected = pattern(&[9], Policy::new().fixed());
        let diff = children_of(&expected, &actual).unwrap();
        assert_eq!(diff.count_kind(DiffKind::ExtraChild), 0);
        assert_eq!(diff.count_kind(DiffKind::ChildNotFound), 1);
    }

    #[test]
    fn test_absent_child_reports_every_occurrence() {
        let mut actual = ActualTree::new(Node::new("obj"));
        actual.push(actual.root(), Node::leaf("a", 1)).unwrap();
        actual.push(actual.root(), Node::leaf("a", 2)).unwrap();
        let mut expected = ExpectedTree::new(Node::new("obj"), Policy::new());
        expected
            .push(expected.root(), Node::new("a"), Policy::new().absent())
            .unwrap();

        let diff = children_of(&expected, &actual).unwrap();
        let subtree = &diff.children()[0];
        assert_eq!(subtree.kind(), DiffKind::SubtreeMismatch);
        assert_eq!(subtree.children().len(), 2);
        assert_eq!((subtree.hits(), subtree.misses()), (0, 1));
    }

    #[test]
    fn test_capture_scans_exhaustively() {
        let actual = list(&[5, 6, 7]);
        let mut expected = ExpectedTree::new(Node::new("list"), Policy::new());
        expected
            .push_capture(expected.root(), Node::new("x").nameless(), "x")
            .unwrap();

        let mut ctx = MatchContext::new(&expected, &actual, &MatchConfig::default());
        let outcome = match_children(&mut ctx, expected.root(), actual.root(), 3, 0).unwrap();
        assert!(matches!(outcome, Outcome::Match(7)));
        assert_eq!(ctx.captures.numbers("x").unwrap(), vec![5.0, 6.0, 7.0]);
    }
}
