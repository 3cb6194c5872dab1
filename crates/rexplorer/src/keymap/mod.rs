mod actions;
mod defaults;

pub use actions::*;
pub use defaults::{KEY_TREE_CONTEXT, WORKSPACE_CONTEXT, init};
