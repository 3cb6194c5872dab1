mod model;
mod tree;

pub use tree::{KeyTree, KeyTreeEvent};
