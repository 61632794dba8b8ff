use matchtree_core::codec::{actual_from_value, expected_from_value, PatternOptions};
use matchtree_core::{ActualTree, ExpectedTree, Node, Policy};
use serde_json::Value;

/// Actual tree `list` with NAMELESS integer children named by index
#[allow(dead_code)]
pub fn actual_list(values: &[i64]) -> ActualTree {
    let mut tree = ActualTree::new(Node::new("list"));
    for (i, v) in values.iter().enumerate() {
        tree.push(tree.root(), Node::leaf(i.to_string(), *v).nameless())
            .unwrap();
    }
    tree
}

/// Expected tree `list` with NAMELESS integer children and the given policy
#[allow(dead_code)]
pub fn expected_list(values: &[i64], policy: Policy) -> ExpectedTree {
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

/// Actual `node` holding an UNORDERED attribute set `attr0..attrN`
#[allow(dead_code)]
pub fn actual_with_attrs(values: &[i64]) -> ActualTree {
    let mut tree = ActualTree::new(Node::new("node"));
    let attrs = tree
        .push(tree.root(), Node::new("__xml_attributes__").unordered())
        .unwrap();
    for (i, v) in values.iter().enumerate() {
        tree.push(attrs, Node::leaf(format!("attr{i}"), *v)).unwrap();
    }
    tree
}

/// Expected `node` holding an UNORDERED attribute set of `(name, value)` pairs
#[allow(dead_code)]
pub fn expected_with_attrs(attrs: &[(&str, i64)], policy: Policy) -> ExpectedTree {
    let mut tree = ExpectedTree::new(Node::new("node"), policy);
    let set = tree
        .push(
            tree.root(),
            Node::new("__xml_attributes__").unordered(),
            Policy::new(),
        )
        .unwrap();
    for (name, v) in attrs {
        tree.push(set, Node::leaf(*name, *v), Policy::new()).unwrap();
    }
    tree
}

#[allow(dead_code)]
pub fn actual_json(value: Value) -> ActualTree {
    actual_from_value(&value).unwrap()
}

#[allow(dead_code)]
pub fn expected_json(value: Value) -> ExpectedTree {
    expected_from_value(&value, &PatternOptions::new()).unwrap()
}

#[allow(dead_code)]
pub fn expected_json_with(value: Value, options: &PatternOptions) -> ExpectedTree {
    expected_from_value(&value, options).unwrap()
}
