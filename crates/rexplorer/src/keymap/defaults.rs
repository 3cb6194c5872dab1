use gpui::{App, KeyBinding};

use super::actions::*;

pub const WORKSPACE_CONTEXT: &str = "Workspace";
pub const KEY_TREE_CONTEXT: &str = "KeyTree";

pub fn init(cx: &mut App) {
    cx.bind_keys(default_bindings());
}

fn default_bindings() -> Vec<KeyBinding> {
    let workspace = Some(WORKSPACE_CONTEXT);
    let tree = Some(KEY_TREE_CONTEXT);

    vec![
        KeyBinding::new("f5", Refresh, workspace),
        KeyBinding::new("ctrl-r", Refresh, workspace),
        KeyBinding::new("ctrl-=", ZoomIn, workspace),
        KeyBinding::new("ctrl-+", ZoomIn, workspace),
        KeyBinding::new("ctrl--", ZoomOut, workspace),
        KeyBinding::new("ctrl-0", ResetZoom, workspace),
        KeyBinding::new("ctrl-shift-c", CopyValue, workspace),
        KeyBinding::new("ctrl-shift-m", CopyMarkup, workspace),
        KeyBinding::new("up", SelectPrev, tree),
        KeyBinding::new("k", SelectPrev, tree),
        KeyBinding::new("down", SelectNext, tree),
        KeyBinding::new("j", SelectNext, tree),
        KeyBinding::new("home", SelectFirst, tree),
        KeyBinding::new("g", SelectFirst, tree),
        KeyBinding::new("end", SelectLast, tree),
        KeyBinding::new("shift-g", SelectLast, tree),
        KeyBinding::new("left", Collapse, tree),
        KeyBinding::new("h", Collapse, tree),
        KeyBinding::new("right", Expand, tree),
        KeyBinding::new("l", Expand, tree),
        KeyBinding::new("enter", Activate, tree),
        KeyBinding::new("space", Activate, tree),
    ]
}
