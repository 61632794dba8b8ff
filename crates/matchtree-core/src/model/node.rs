use matchtree_core_types::Scalar;
use std::fmt;

/// Index of a node inside the arena of the tree that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tree's arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Property set of a node
///
/// - `NAMELESS`: the node's name takes no part in comparison
/// - `UNORDERED`: the node's children form a set/map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeProps {
    nameless: bool,
    unordered: bool,
}

impl NodeProps {
    pub const NONE: NodeProps = NodeProps {
        nameless: false,
        unordered: false,
    };
    pub const NAMELESS: NodeProps = NodeProps {
        nameless: true,
        unordered: false,
    };
    pub const UNORDERED: NodeProps = NodeProps {
        nameless: false,
        unordered: true,
    };

    /// Union of two property sets
    pub fn union(self, other: NodeProps) -> NodeProps {
        NodeProps {
            nameless: self.nameless || other.nameless,
            unordered: self.unordered || other.unordered,
        }
    }

    /// True if every property in `self` is also in `other`
    pub fn is_subset_of(&self, other: &NodeProps) -> bool {
        (!self.nameless || other.nameless) && (!self.unordered || other.unordered)
    }

    pub fn is_nameless(&self) -> bool {
        self.nameless
    }

    pub fn is_unordered(&self) -> bool {
        self.unordered
    }
}

impl fmt::Display for NodeProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.nameless {
            names.push("NAMELESS");
        }
        if self.unordered {
            names.push("UNORDERED");
        }
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// A tree node: name, optional scalar value, properties, and arena links
///
/// A node with a value is atomic and never has children. `parent` is a
/// diagnostic back-link only; nothing in matching follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    value: Option<Scalar>,
    props: NodeProps,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create a composite node with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            props: NodeProps::NONE,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create an atomic node with the given name and value
    pub fn leaf(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name).with_value(value)
    }

    /// Set the node's value, making it atomic
    pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Mark the node NAMELESS
    pub fn nameless(mut self) -> Self {
        self.props = self.props.union(NodeProps::NAMELESS);
        self
    }

    /// Mark the node UNORDERED
    pub fn unordered(mut self) -> Self {
        self.props = self.props.union(NodeProps::UNORDERED);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    pub fn props(&self) -> NodeProps {
        self.props
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True if the node carries a value
    pub fn is_atomic(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_nameless(&self) -> bool {
        self.props.is_nameless()
    }

    pub fn is_unordered(&self) -> bool {
        self.props.is_unordered()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name={}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, "; value={}", value)?;
        }
        write!(f, "; props={}", self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_subset() {
        assert!(NodeProps::NONE.is_subset_of(&NodeProps::NAMELESS));
        assert!(NodeProps::NAMELESS.is_subset_of(&NodeProps::NAMELESS));
        assert!(!NodeProps::NAMELESS.is_subset_of(&NodeProps::UNORDERED));
        let both = NodeProps::NAMELESS.union(NodeProps::UNORDERED);
        assert!(NodeProps::UNORDERED.is_subset_of(&both));
        assert!(!both.is_subset_of(&NodeProps::UNORDERED));
    }

    #[test]
    fn test_leaf_is_atomic() {
        let leaf = Node::leaf("a", 1);
        assert!(leaf.is_atomic());
        assert_eq!(leaf.value(), Some(&Scalar::Int(1)));
        assert!(!Node::new("b").is_atomic());
    }

    #[test]
    fn test_builders_set_props() {
        let node = Node::new("x").nameless().unordered();
        assert!(node.is_nameless());
        assert!(node.is_unordered());
        assert_eq!(node.props().to_string(), "{NAMELESS, UNORDERED}");
    }

    #[test]
    fn test_display() {
        assert_eq!(Node::leaf("a", "v").to_string(), "name=a; value=\"v\"; props={}");
    }
}
