//! JSON ingestion
//!
//! Objects become UNORDERED nodes with one child per member, arrays become
//! nodes whose children are NAMELESS (named by index for diagnostics only),
//! and scalars become leaves. The root is always named `$`, so paths read
//! like `$/items/0/ts`.

use crate::errors::{MatchTreeError, Result};
use crate::model::{ActualTree, ExpectedTree, Node, NodeId, Policy};
use matchtree_core_types::Scalar;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Name of the root node of every decoded tree
pub const ROOT_NAME: &str = "$";

/// Per-path policy and capture settings for a pattern built from JSON
///
/// Paths are the `/`-joined node names starting at `$`. A path listed in
/// `captures` must address a scalar literal in the pattern; the literal's
/// value is ignored and replaced by the capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Policy applied to every node without an entry in `policies`
    pub default_policy: Policy,
    pub policies: BTreeMap<String, Policy>,
    /// Path to capture label
    pub captures: BTreeMap<String, String>,
}

impl PatternOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_policy(mut self, policy: Policy) -> Self {
        self.default_policy = policy;
        self
    }

    pub fn with_policy(mut self, path: impl Into<String>, policy: Policy) -> Self {
        self.policies.insert(path.into(), policy);
        self
    }

    pub fn with_capture(mut self, path: impl Into<String>, label: impl Into<String>) -> Self {
        self.captures.insert(path.into(), label.into());
        self
    }

    /// Parse options from TOML text
    ///
    /// ```toml
    /// [policies."$/items"]
    /// order = true
    ///
    /// [captures]
    /// "$/items/0/ts" = "ts"
    /// ```
    ///
    /// # Errors
    /// * `InvalidConfig` - the text is not valid TOML for this structure
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MatchTreeError::InvalidConfig {
            message: e.to_string(),
        })
    }

    fn policy_for(&self, path: &str) -> Policy {
        self.policies
            .get(path)
            .copied()
            .unwrap_or(self.default_policy)
    }
}

/// Build an Actual tree from a decoded JSON value
pub fn actual_from_value(value: &Value) -> Result<ActualTree> {
    let mut tree = ActualTree::new(node_for(ROOT_NAME, value, false)?);
    let root = tree.root();
    push_actual_children(&mut tree, root, value)?;
    Ok(tree)
}

/// Build an Actual tree from JSON text
///
/// # Errors
/// * `InvalidDocument` - the text is not valid JSON
pub fn actual_from_str(text: &str) -> Result<ActualTree> {
    actual_from_value(&parse(text)?)
}

/// Build an Expected tree from a JSON pattern literal
///
/// # Errors
/// * `InvalidPattern` - a capture addresses a non-scalar, or an option path
///   does not exist in the pattern
pub fn expected_from_value(value: &Value, options: &PatternOptions) -> Result<ExpectedTree> {
    let mut builder = ExpectedBuilder {
        options,
        seen: BTreeSet::new(),
    };
    let tree = builder.build(value)?;
    builder.check_unused_paths()?;
    Ok(tree)
}

/// Build an Expected tree from JSON pattern text
///
/// # Errors
/// * `InvalidDocument` - the text is not valid JSON
/// * any error of [`expected_from_value`]
pub fn expected_from_str(text: &str, options: &PatternOptions) -> Result<ExpectedTree> {
    expected_from_value(&parse(text)?, options)
}

fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| MatchTreeError::InvalidDocument {
        message: e.to_string(),
    })
}

fn scalar_from(value: &Value) -> Result<Option<Scalar>> {
    let scalar = match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().ok_or_else(|| MatchTreeError::InvalidDocument {
                message: format!("number {} is out of range", n),
            })?),
        },
        Value::String(s) => Scalar::Str(s.clone()),
        Value::Array(_) | Value::Object(_) => return Ok(None),
    };
    Ok(Some(scalar))
}

fn node_for(name: &str, value: &Value, element: bool) -> Result<Node> {
    let node = match scalar_from(value)? {
        Some(scalar) => Node::leaf(name, scalar),
        None if value.is_object() => Node::new(name).unordered(),
        None => Node::new(name),
    };
    Ok(if element { node.nameless() } else { node })
}

/// Children of a composite JSON value as (name, value, is-array-element)
fn members(value: &Value) -> Vec<(String, &Value, bool)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v, false)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v, true))
            .collect(),
        _ => Vec::new(),
    }
}

fn push_actual_children(tree: &mut ActualTree, parent: NodeId, value: &Value) -> Result<()> {
    for (name, child, element) in members(value) {
        let id = tree.push(parent, node_for(&name, child, element)?)?;
        push_actual_children(tree, id, child)?;
    }
    Ok(())
}

struct ExpectedBuilder<'o> {
    options: &'o PatternOptions,
    seen: BTreeSet<String>,
}

impl ExpectedBuilder<'_> {
    fn build(&mut self, value: &Value) -> Result<ExpectedTree> {
        let path = ROOT_NAME.to_string();
        let node = node_for(ROOT_NAME, value, false)?;
        self.seen.insert(path.clone());

        let mut tree = match self.capture_label(&path, value)? {
            Some(label) => ExpectedTree::capture_root(strip_value(node), label)?,
            None => ExpectedTree::new(node, self.options.policy_for(&path)),
        };
        let root = tree.root();
        self.push_children(&mut tree, root, &path, value)?;
        Ok(tree)
    }

    fn push_children(
        &mut self,
        tree: &mut ExpectedTree,
        parent: NodeId,
        parent_path: &str,
        value: &Value,
    ) -> Result<()> {
        for (name, child, element) in members(value) {
            let path = format!("{}/{}", parent_path, name);
            self.seen.insert(path.clone());
            let node = node_for(&name, child, element)?;

            let id = match self.capture_label(&path, child)? {
                Some(label) => tree.push_capture(parent, strip_value(node), label)?,
                None => tree.push(parent, node, self.options.policy_for(&path))?,
            };
            self.push_children(tree, id, &path, child)?;
        }
        Ok(())
    }

    fn capture_label(&self, path: &str, value: &Value) -> Result<Option<String>> {
        let Some(label) = self.options.captures.get(path) else {
            return Ok(None);
        };
        if value.is_object() || value.is_array() {
            return Err(MatchTreeError::InvalidPattern {
                path: path.to_string(),
                reason: "capture must address a scalar literal".to_string(),
            });
        }
        Ok(Some(label.clone()))
    }

    fn check_unused_paths(&self) -> Result<()> {
        let configured = self
            .options
            .policies
            .keys()
            .chain(self.options.captures.keys());
        for path in configured {
            if !self.seen.contains(path) {
                return Err(MatchTreeError::InvalidPattern {
                    path: path.clone(),
                    reason: "no pattern node at this path".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Capture nodes keep name and shape but not the literal's value
fn strip_value(node: Node) -> Node {
    let mut bare = Node::new(node.name());
    if node.is_nameless() {
        bare = bare.nameless();
    }
    bare
}
