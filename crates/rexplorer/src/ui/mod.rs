pub mod dock;
pub mod key_tree;
pub mod status_bar;
pub mod toast;
pub mod tokens;
pub mod value_panel;
pub mod workspace;
pub mod zoom;
