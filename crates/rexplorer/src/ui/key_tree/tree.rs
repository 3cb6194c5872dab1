use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::ActiveTheme;
use rexplorer_core::KeyGroups;

use crate::keymap::{
    Activate, Collapse, Expand, KEY_TREE_CONTEXT, SelectFirst, SelectLast, SelectNext, SelectPrev,
};
use crate::ui::tokens::{FontSizes, Spacing};

use super::model::{Activation, Direction, KeyTreeModel, RowId, TreeRow};

pub const TREE_ROW_HEIGHT: Pixels = px(24.0);
const INDENT_WIDTH: Pixels = px(16.0);

#[derive(Debug, Clone)]
pub enum KeyTreeEvent {
    /// A key was selected and its value should be shown.
    KeySelected(String),
    /// A refresh removed the selected key.
    SelectionCleared,
}

/// Collapsible tree of prefix groups and their keys.
pub struct KeyTree {
    model: KeyTreeModel,
    focus_handle: FocusHandle,
    scroll_handle: UniformListScrollHandle,
}

impl KeyTree {
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self {
            model: KeyTreeModel::new(),
            focus_handle: cx.focus_handle(),
            scroll_handle: UniformListScrollHandle::new(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.model.selected()
    }

    pub fn focus(&self, window: &mut Window) {
        self.focus_handle.focus(window);
    }

    pub fn set_groups(&mut self, groups: KeyGroups, cx: &mut Context<Self>) {
        let had_selection = self.model.selected().is_some();
        self.model.set_groups(groups);

        if had_selection && self.model.selected().is_none() {
            cx.emit(KeyTreeEvent::SelectionCleared);
        }

        self.scroll_to_cursor();
        cx.notify();
    }

    fn move_cursor(&mut self, direction: Direction, cx: &mut Context<Self>) {
        if self.model.move_cursor(direction) {
            self.scroll_to_cursor();
            cx.notify();
        }
    }

    fn move_to_first(&mut self, cx: &mut Context<Self>) {
        if self.model.move_to_first() {
            self.scroll_to_cursor();
            cx.notify();
        }
    }

    fn move_to_last(&mut self, cx: &mut Context<Self>) {
        if self.model.move_to_last() {
            self.scroll_to_cursor();
            cx.notify();
        }
    }

    fn expand(&mut self, cx: &mut Context<Self>) {
        if self.model.expand_at_cursor() {
            self.scroll_to_cursor();
            cx.notify();
        }
    }

    fn collapse(&mut self, cx: &mut Context<Self>) {
        if self.model.collapse_at_cursor() {
            self.scroll_to_cursor();
            cx.notify();
        }
    }

    fn activate_cursor(&mut self, cx: &mut Context<Self>) {
        let activation = self.model.activate_cursor();
        self.handle_activation(activation, cx);
    }

    fn activate_row(&mut self, id: &RowId, cx: &mut Context<Self>) {
        let activation = self.model.activate(id);
        self.handle_activation(activation, cx);
    }

    fn handle_activation(&mut self, activation: Activation, cx: &mut Context<Self>) {
        match activation {
            Activation::Selected(key) => {
                log::debug!("Selected key '{}'", key);
                cx.emit(KeyTreeEvent::KeySelected(key));
            }
            Activation::Toggled { prefix, expanded } => {
                log::debug!("Group '{}' expanded: {}", prefix, expanded);
            }
            Activation::Nothing => return,
        }

        self.scroll_to_cursor();
        cx.notify();
    }

    fn scroll_to_cursor(&self) {
        if let Some(index) = self.model.cursor_index() {
            self.scroll_handle
                .scroll_to_item(index, ScrollStrategy::Center);
        }
    }
}

impl EventEmitter<KeyTreeEvent> for KeyTree {}

impl Focusable for KeyTree {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for KeyTree {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let row_count = self.model.row_count();
        let entity = cx.entity();

        div()
            .id("key-tree")
            .key_context(KEY_TREE_CONTEXT)
            .track_focus(&self.focus_handle)
            .size_full()
            .overflow_hidden()
            .on_action(cx.listener(|this, _: &SelectNext, _, cx| {
                this.move_cursor(Direction::Down, cx);
            }))
            .on_action(cx.listener(|this, _: &SelectPrev, _, cx| {
                this.move_cursor(Direction::Up, cx);
            }))
            .on_action(cx.listener(|this, _: &SelectFirst, _, cx| {
                this.move_to_first(cx);
            }))
            .on_action(cx.listener(|this, _: &SelectLast, _, cx| {
                this.move_to_last(cx);
            }))
            .on_action(cx.listener(|this, _: &Expand, _, cx| {
                this.expand(cx);
            }))
            .on_action(cx.listener(|this, _: &Collapse, _, cx| {
                this.collapse(cx);
            }))
            .on_action(cx.listener(|this, _: &Activate, _, cx| {
                this.activate_cursor(cx);
            }))
            .when(row_count == 0, |el| {
                el.child(
                    div()
                        .p(Spacing::MD)
                        .text_size(FontSizes::SM)
                        .text_color(cx.theme().muted_foreground)
                        .child("No keys"),
                )
            })
            .when(row_count > 0, |el| {
                el.child(
                    uniform_list("key-tree-rows", row_count, move |range, _window, cx| {
                        let tree = entity.read(cx);
                        let cursor = tree.model.cursor().cloned();
                        let selected = tree.model.selected().map(str::to_string);
                        let theme = cx.theme().clone();

                        range
                            .filter_map(|ix| tree.model.rows().get(ix).cloned())
                            .map(|row| {
                                let is_cursor = cursor.as_ref() == Some(&row.id);
                                let is_selected = matches!(
                                    (&row.id, &selected),
                                    (RowId::Key(key), Some(sel)) if key == sel
                                );
                                render_row(row, is_cursor, is_selected, &theme, entity.clone())
                            })
                            .collect()
                    })
                    .track_scroll(self.scroll_handle.clone())
                    .size_full(),
                )
            })
    }
}

fn render_row(
    row: TreeRow,
    is_cursor: bool,
    is_selected: bool,
    theme: &gpui_component::Theme,
    tree: Entity<KeyTree>,
) -> Stateful<Div> {
    let indent = INDENT_WIDTH * row.depth as f32;
    let hover_color = theme.secondary.opacity(0.5);

    let bg_color = if is_selected {
        theme.selection
    } else if is_cursor {
        theme.secondary
    } else {
        Hsla::transparent_black()
    };

    let chevron = if !row.is_group() {
        ""
    } else if row.is_expanded {
        "▾"
    } else {
        "▸"
    };

    let label_color = if row.is_group() {
        theme.foreground
    } else {
        theme.muted_foreground
    };

    let row_id = row.id.clone();

    div()
        .id(ElementId::Name(format!("key-tree-row-{:?}", row.id).into()))
        .h(TREE_ROW_HEIGHT)
        .w_full()
        .flex()
        .items_center()
        .gap(Spacing::XS)
        .pl(indent + Spacing::SM)
        .pr(Spacing::SM)
        .bg(bg_color)
        .when(is_cursor, |el| el.border_l_2().border_color(theme.accent))
        .hover(move |el| el.bg(hover_color))
        .cursor_pointer()
        .on_click(move |_, window, cx| {
            tree.update(cx, |tree, cx| {
                tree.focus(window);
                tree.activate_row(&row_id, cx);
            });
        })
        .child(
            div()
                .w(px(12.0))
                .text_size(FontSizes::SM)
                .text_color(theme.muted_foreground)
                .child(chevron),
        )
        .child(
            div()
                .flex_1()
                .overflow_hidden()
                .text_ellipsis()
                .whitespace_nowrap()
                .text_size(FontSizes::BASE)
                .text_color(label_color)
                .child(row.label.clone()),
        )
        .when(row.is_group(), |el| {
            el.child(
                div()
                    .text_size(FontSizes::XS)
                    .text_color(theme.muted_foreground)
                    .child(row.child_count.to_string()),
            )
        })
}
