//! Arena trees tagged with their role
//!
//! `Tree<Expected>` holds a pattern, `Tree<Actual>` holds observed data. The
//! role tags are uninhabited types, so the distinction exists only at compile
//! time: the engine accepts exactly one tree of each role.

use crate::errors::{MatchTreeError, Result};
use crate::model::{Node, NodeId, Pattern, Policy};
use matchtree_core_types::Scalar;
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Expected {}
    impl Sealed for super::Actual {}
}

/// Role of a tree: pattern or observation
pub trait Role: sealed::Sealed + fmt::Debug + 'static {
    /// Per-node record stored beside each node
    type Slot: fmt::Debug + Clone;
    /// Human-readable role name used in diagnostics
    const LABEL: &'static str;
}

/// Tag for pattern trees
#[derive(Debug, Clone, Copy)]
pub enum Expected {}

/// Tag for observed-data trees
#[derive(Debug, Clone, Copy)]
pub enum Actual {}

impl Role for Expected {
    type Slot = Pattern;
    const LABEL: &'static str = "expected";
}

impl Role for Actual {
    type Slot = ();
    const LABEL: &'static str = "actual";
}

/// Append-only arena of nodes; the root is always the first node
#[derive(Debug, Clone)]
pub struct Tree<R: Role> {
    nodes: Vec<Node>,
    slots: Vec<R::Slot>,
}

impl<R: Role> Tree<R> {
    fn with_root(mut root: Node, slot: R::Slot) -> Self {
        root.parent = None;
        root.children.clear();
        Self {
            nodes: vec![root],
            slots: vec![slot],
        }
    }

    fn insert(&mut self, parent: NodeId, mut node: Node, slot: R::Slot) -> Result<NodeId> {
        let parent_node = self.get(parent).ok_or(MatchTreeError::UnknownNode {
            index: parent.index(),
        })?;
        if parent_node.is_atomic() {
            return Err(MatchTreeError::AtomicWithChildren {
                path: self.path(parent),
            });
        }

        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.slots.push(slot);
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn slot(&self, id: NodeId) -> &R::Slot {
        &self.slots[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in insertion order (parents before children)
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_, R> {
        NodeRef { tree: self, id }
    }

    /// Names from the root down to `id`, root first
    pub fn ancestry(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            names.push(node.name());
            current = node.parent().and_then(|p| self.get(p));
        }
        names.reverse();
        names
    }

    /// `/`-joined ancestor names from root to `id`, for diagnostics
    pub fn path(&self, id: NodeId) -> String {
        self.ancestry(id).join("/")
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestry(id).len().saturating_sub(1)
    }
}

impl Tree<Actual> {
    /// Create an observed-data tree from its root node
    pub fn new(root: Node) -> Self {
        Self::with_root(root, ())
    }

    /// Append `node` as the last child of `parent`
    ///
    /// # Errors
    /// * `UnknownNode` - `parent` does not belong to this tree
    /// * `AtomicWithChildren` - `parent` carries a value
    pub fn push(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        self.insert(parent, node, ())
    }
}

impl Tree<Expected> {
    /// Create a pattern tree from its root node and policy
    pub fn new(root: Node, policy: Policy) -> Self {
        let policy = policy.normalized(root.props());
        Self::with_root(
            root,
            Pattern {
                policy,
                ..Pattern::default()
            },
        )
    }

    /// Create a pattern tree whose root is a capture
    pub fn capture_root(root: Node, label: impl Into<String>) -> Result<Self> {
        check_capture_node(&root, "")?;
        Ok(Self::with_root(
            root,
            Pattern {
                capture: Some(label.into()),
                ..Pattern::default()
            },
        ))
    }

    /// Append a pattern node as the last child of `parent`
    ///
    /// The policy is normalized against the node's properties: UNORDERED
    /// nodes never keep `order` or `contiguous`.
    ///
    /// # Errors
    /// * `UnknownNode` - `parent` does not belong to this tree
    /// * `AtomicWithChildren` - `parent` carries a value
    pub fn push(&mut self, parent: NodeId, node: Node, policy: Policy) -> Result<NodeId> {
        let policy = policy.normalized(node.props());
        self.insert(
            parent,
            node,
            Pattern {
                policy,
                ..Pattern::default()
            },
        )
    }

    /// Append a capture node as the last child of `parent`
    ///
    /// A capture binds to an atomic actual node by shape and name and
    /// records its value instead of comparing it.
    ///
    /// # Errors
    /// * `InvalidPattern` - `node` carries a value of its own
    /// * `UnknownNode`, `AtomicWithChildren` - as for [`Tree::push`]
    pub fn push_capture(
        &mut self,
        parent: NodeId,
        node: Node,
        label: impl Into<String>,
    ) -> Result<NodeId> {
        if self.get(parent).is_some() {
            check_capture_node(&node, &self.path(parent))?;
        }
        let id = self.insert(
            parent,
            node,
            Pattern {
                capture: Some(label.into()),
                ..Pattern::default()
            },
        )?;

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            let slot = &mut self.slots[current.index()];
            if slot.captures_below {
                break;
            }
            slot.captures_below = true;
            ancestor = self.nodes[current.index()].parent();
        }
        Ok(id)
    }

    /// Pattern record of an Expected node
    pub fn pattern(&self, id: NodeId) -> &Pattern {
        self.slot(id)
    }

    /// Policy of an Expected node
    pub fn policy(&self, id: NodeId) -> &Policy {
        &self.slot(id).policy
    }

    /// Capture labels present in the pattern, in insertion order
    pub fn capture_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for slot in &self.slots {
            if let Some(label) = slot.capture.as_deref() {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
        labels
    }
}

fn check_capture_node(node: &Node, parent_path: &str) -> Result<()> {
    if node.is_atomic() {
        return Err(MatchTreeError::InvalidPattern {
            path: format!("{}/{}", parent_path, node.name()),
            reason: "capture node cannot carry a value".to_string(),
        });
    }
    Ok(())
}

/// Borrowed handle to one node of a tree
///
/// Diffs hold these so that rendering can recover paths and values without
/// copying either tree.
pub struct NodeRef<'t, R: Role> {
    tree: &'t Tree<R>,
    id: NodeId,
}

impl<R: Role> Clone for NodeRef<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Role> Copy for NodeRef<'_, R> {}

impl<'t, R: Role> NodeRef<'t, R> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree<R> {
        self.tree
    }

    pub fn node(&self) -> &'t Node {
        self.tree.node(self.id)
    }

    pub fn name(&self) -> &'t str {
        self.node().name()
    }

    pub fn value(&self) -> Option<&'t Scalar> {
        self.node().value()
    }

    pub fn path(&self) -> String {
        self.tree.path(self.id)
    }
}

impl<R: Role> PartialEq for NodeRef<'_, R> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<R: Role> fmt::Debug for NodeRef<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("role", &R::LABEL)
            .field("path", &self.path())
            .finish()
    }
}

/// Pattern tree
pub type ExpectedTree = Tree<Expected>;

/// Observed-data tree
pub type ActualTree = Tree<Actual>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_joins_ancestor_names() {
        let mut tree = ActualTree::new(Node::new("node"));
        let attrs = tree.push(tree.root(), Node::new("attrs").unordered()).unwrap();
        let leaf = tree.push(attrs, Node::leaf("attr1", 1)).unwrap();

        assert_eq!(tree.path(leaf), "node/attrs/attr1");
        assert_eq!(tree.path(tree.root()), "node");
        assert_eq!(tree.depth(leaf), 2);
        assert_eq!(tree.node(leaf).parent(), Some(attrs));
    }

    #[test]
    fn test_atomic_node_rejects_children() {
        let mut tree = ActualTree::new(Node::new("root"));
        let leaf = tree.push(tree.root(), Node::leaf("a", 1)).unwrap();
        let err = tree.push(leaf, Node::leaf("b", 2)).unwrap_err();
        assert_eq!(
            err,
            MatchTreeError::AtomicWithChildren {
                path: "root/a".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut tree = ActualTree::new(Node::new("root"));
        let err = tree.push(NodeId(9), Node::new("x")).unwrap_err();
        assert_eq!(err, MatchTreeError::UnknownNode { index: 9 });
    }

    #[test]
    fn test_expected_policy_normalized_for_unordered() {
        let mut tree = ExpectedTree::new(Node::new("root"), Policy::new().ordered());
        let map = tree
            .push(tree.root(), Node::new("map").unordered(), Policy::new().ordered())
            .unwrap();
        assert!(tree.policy(tree.root()).order);
        assert!(!tree.policy(map).order);
    }

    #[test]
    fn test_capture_marks_ancestors() {
        let mut tree = ExpectedTree::new(Node::new("root"), Policy::new());
        let item = tree
            .push(tree.root(), Node::new("item").nameless(), Policy::new())
            .unwrap();
        let other = tree.push(tree.root(), Node::new("other"), Policy::new()).unwrap();
        let ts = tree.push_capture(item, Node::new("ts"), "ts").unwrap();

        assert!(tree.pattern(tree.root()).has_capture());
        assert!(tree.pattern(item).has_capture());
        assert!(tree.pattern(ts).has_capture());
        assert!(!tree.pattern(other).has_capture());
        assert_eq!(tree.capture_labels(), vec!["ts"]);
    }

    #[test]
    fn test_capture_with_value_rejected() {
        let mut tree = ExpectedTree::new(Node::new("root"), Policy::new());
        let err = tree
            .push_capture(tree.root(), Node::leaf("ts", 1), "ts")
            .unwrap_err();
        assert!(matches!(err, MatchTreeError::InvalidPattern { .. }));
    }

    #[test]
    fn test_node_ref_path() {
        let mut tree = ActualTree::new(Node::new("$"));
        let a = tree.push(tree.root(), Node::leaf("a", 1)).unwrap();
        let r = tree.node_ref(a);
        assert_eq!(r.path(), "$/a");
        assert_eq!(r.value(), Some(&Scalar::Int(1)));
        assert_eq!(r, tree.node_ref(a));
    }
}
