//! Object arena: ids, node data, flags, states, tree operations.

pub mod flags;
pub mod node;
pub mod tree;

pub use flags::{ObjFlags, State};
pub use node::{ObjData, ObjId, WidgetKind};
pub use tree::ObjTree;
