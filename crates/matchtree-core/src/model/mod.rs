pub mod node;
pub mod policy;
pub mod tree;

pub use node::{Node, NodeId, NodeProps};
pub use policy::{Pattern, Policy};
pub use tree::{Actual, ActualTree, Expected, ExpectedTree, NodeRef, Role, Tree};
