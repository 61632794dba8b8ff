//! Pattern policy flags
//!
//! A `Policy` is a plain configuration record attached to every Expected
//! node. Flags are never inherited: each pattern node states its own.

use crate::model::NodeProps;
use serde::{Deserialize, Serialize};

/// Policy flags of one Expected node
///
/// `order`, `fixed` and `contiguous` govern how the node's children are
/// matched; `absent` governs how the node itself is matched among its
/// siblings. `anchor` and `contiguous` are reserved and not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub anchor: bool,
    pub absent: bool,
    pub order: bool,
    pub fixed: bool,
    pub contiguous: bool,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presence of a node matching this one is a failure
    pub fn absent(mut self) -> Self {
        self.absent = true;
        self
    }

    /// Children must match in non-decreasing actual index order
    pub fn ordered(mut self) -> Self {
        self.order = true;
        self
    }

    /// Every actual child must be consumed
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Reserved
    pub fn anchored(mut self) -> Self {
        self.anchor = true;
        self
    }

    /// Reserved
    pub fn contiguous(mut self) -> Self {
        self.contiguous = true;
        self
    }

    /// Force ordering policies off for UNORDERED nodes
    pub fn normalized(mut self, props: NodeProps) -> Self {
        if props.is_unordered() {
            self.order = false;
            self.contiguous = false;
        }
        self
    }

    /// True if a reserved flag is set
    pub fn uses_reserved(&self) -> bool {
        self.anchor || self.contiguous
    }
}

/// Per-node pattern record stored alongside each Expected node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    pub(crate) policy: Policy,
    pub(crate) capture: Option<String>,
    pub(crate) captures_below: bool,
}

impl Pattern {
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Capture label, if this node is a capture
    pub fn capture(&self) -> Option<&str> {
        self.capture.as_deref()
    }

    /// True if this node or any descendant is a capture
    pub fn has_capture(&self) -> bool {
        self.capture.is_some() || self.captures_below
    }
}
