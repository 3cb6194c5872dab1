use crate::app::{AppState, AppStateChanged};
use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::ActiveTheme;

pub struct StatusBar {
    app_state: Entity<AppState>,
}

impl StatusBar {
    pub fn new(app_state: Entity<AppState>, cx: &mut Context<Self>) -> Self {
        cx.subscribe(&app_state, |_this, _, _: &AppStateChanged, cx| {
            cx.notify();
        })
        .detach();

        Self { app_state }
    }

    fn format_counts(groups: usize, keys: usize) -> String {
        let plural = |n: usize, word: &str| {
            if n == 1 {
                format!("{} {}", n, word)
            } else {
                format!("{} {}s", n, word)
            }
        };

        format!("{} · {}", plural(groups, "group"), plural(keys, "key"))
    }
}

impl Render for StatusBar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let app_state = self.app_state.read(cx);

        let connection_info = app_state.connection_label().to_string();
        let counts = Self::format_counts(app_state.groups().len(), app_state.groups().key_count());
        let is_refreshing = app_state.is_refreshing();
        let last_error = app_state.last_error().map(str::to_string);

        div()
            .flex()
            .flex_none()
            .items_center()
            .justify_between()
            .h(px(24.0))
            .px_2()
            .gap_2()
            .bg(cx.theme().tab_bar)
            .border_t_1()
            .border_color(cx.theme().border)
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .text_xs()
                    .text_color(cx.theme().muted_foreground)
                    .child(connection_info)
                    .child("|")
                    .child(counts)
                    .when(is_refreshing, |this| {
                        this.child(div().text_color(cx.theme().accent).child("Refreshing…"))
                    }),
            )
            .when_some(last_error, |this, error| {
                this.child(
                    div()
                        .overflow_hidden()
                        .text_ellipsis()
                        .whitespace_nowrap()
                        .text_xs()
                        .text_color(cx.theme().danger)
                        .child(error),
                )
            })
    }
}
