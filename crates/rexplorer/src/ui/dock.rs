use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::ActiveTheme;

use crate::ui::key_tree::KeyTree;
use crate::ui::tokens::{FontSizes, Heights, Spacing};

const DEFAULT_WIDTH: Pixels = px(280.0);
const MIN_WIDTH: Pixels = px(160.0);
const MAX_WIDTH: Pixels = px(640.0);
const GRIP_WIDTH: Pixels = px(4.0);

/// Left pane holding the key tree, resizable by dragging its right edge.
pub struct KeysDock {
    tree: Entity<KeyTree>,
    width: Pixels,

    is_resizing: bool,
    resize_start_x: Option<Pixels>,
    resize_start_width: Option<Pixels>,
}

impl KeysDock {
    pub fn new(tree: Entity<KeyTree>, _cx: &mut Context<Self>) -> Self {
        Self {
            tree,
            width: DEFAULT_WIDTH,
            is_resizing: false,
            resize_start_x: None,
            resize_start_width: None,
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.is_resizing
    }

    pub fn finish_resize(&mut self, cx: &mut Context<Self>) {
        if self.is_resizing {
            self.is_resizing = false;
            self.resize_start_x = None;
            self.resize_start_width = None;
            cx.notify();
        }
    }

    /// Follow the pointer while a drag that started on the grip is active.
    pub fn handle_resize_move(&mut self, position_x: Pixels, cx: &mut Context<Self>) {
        if !self.is_resizing {
            return;
        }

        let (Some(start_x), Some(start_width)) = (self.resize_start_x, self.resize_start_width)
        else {
            return;
        };

        self.width = resized_width(start_width, position_x - start_x);
        cx.notify();
    }

    fn start_resize(&mut self, position_x: Pixels, cx: &mut Context<Self>) {
        self.is_resizing = true;
        self.resize_start_x = Some(position_x);
        self.resize_start_width = Some(self.width);
        cx.notify();
    }
}

fn resized_width(start_width: Pixels, delta: Pixels) -> Pixels {
    (start_width + delta).clamp(MIN_WIDTH, MAX_WIDTH)
}

impl Render for KeysDock {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id("keys-dock")
            .h_full()
            .w(self.width)
            .flex_none()
            .flex()
            .flex_row()
            .bg(cx.theme().tab_bar)
            .border_r_1()
            .border_color(cx.theme().border)
            .child(
                div()
                    .h_full()
                    .w(self.width - GRIP_WIDTH)
                    .flex()
                    .flex_col()
                    .child(
                        div()
                            .w_full()
                            .h(Heights::TOOLBAR)
                            .flex_none()
                            .flex()
                            .items_center()
                            .px(Spacing::SM)
                            .border_b_1()
                            .border_color(cx.theme().border)
                            .text_size(FontSizes::SM)
                            .text_color(cx.theme().muted_foreground)
                            .child("KEYS"),
                    )
                    .child(div().flex_1().overflow_hidden().child(self.tree.clone())),
            )
            .child(self.render_grip(cx))
    }
}

impl KeysDock {
    fn render_grip(&self, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id("keys-dock-grip")
            .h_full()
            .w(GRIP_WIDTH)
            .cursor_col_resize()
            .hover(|el| el.bg(cx.theme().accent.opacity(0.3)))
            .when(self.is_resizing, |el| el.bg(cx.theme().primary))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, event: &MouseDownEvent, _, cx| {
                    this.start_resize(event.position.x, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, event: &MouseMoveEvent, _, cx| {
                this.handle_resize_move(event.position.x, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _, cx| {
                    this.finish_resize(cx);
                }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::prelude::rust_2024::test;

    #[test]
    fn width_follows_drag_within_bounds() {
        assert_eq!(resized_width(px(280.0), px(40.0)), px(320.0));
        assert_eq!(resized_width(px(280.0), px(-1000.0)), MIN_WIDTH);
        assert_eq!(resized_width(px(280.0), px(1000.0)), MAX_WIDTH);
    }
}
