use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::ActiveTheme;
use gpui_component::notification::NotificationList;
use rexplorer_core::{CancelToken, ExplorerError, KeyGroups};

use crate::app::{AppState, AppStateChanged, RefreshOutcome};
use crate::keymap::{CopyMarkup, CopyValue, Refresh, ResetZoom, WORKSPACE_CONTEXT, ZoomIn, ZoomOut};
use crate::ui::dock::KeysDock;
use crate::ui::key_tree::{KeyTree, KeyTreeEvent};
use crate::ui::status_bar::StatusBar;
use crate::ui::toast::{PendingToast, ToastManager, flush_pending_toast};
use crate::ui::tokens::{FontSizes, Heights, Radii, Spacing};
use crate::ui::value_panel::ValuePanel;

pub struct Workspace {
    app_state: Entity<AppState>,
    key_tree: Entity<KeyTree>,
    dock: Entity<KeysDock>,
    value_panel: Entity<ValuePanel>,
    status_bar: Entity<StatusBar>,
    notification_list: Entity<NotificationList>,
    pending_toast: Option<PendingToast>,
    focus_handle: FocusHandle,
}

impl Workspace {
    pub fn new(
        app_state: Entity<AppState>,
        font_size: f32,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        ToastManager::init(window, cx);

        let key_tree = cx.new(KeyTree::new);
        let dock = cx.new(|cx| KeysDock::new(key_tree.clone(), cx));
        let value_panel = cx.new(|cx| ValuePanel::new(app_state.clone(), font_size, cx));
        let status_bar = cx.new(|cx| StatusBar::new(app_state.clone(), cx));
        let notification_list = ToastManager::notification_list(cx);

        cx.subscribe(&key_tree, |this, _, event: &KeyTreeEvent, cx| {
            this.on_key_tree_event(event, cx);
        })
        .detach();

        key_tree.read(cx).focus(window);

        let mut workspace = Self {
            app_state,
            key_tree,
            dock,
            value_panel,
            status_bar,
            notification_list,
            pending_toast: None,
            focus_handle: cx.focus_handle(),
        };

        workspace.refresh(cx);
        workspace
    }

    fn on_key_tree_event(&mut self, event: &KeyTreeEvent, cx: &mut Context<Self>) {
        match event {
            KeyTreeEvent::KeySelected(key) => {
                let key = key.clone();
                self.value_panel
                    .update(cx, |panel, cx| panel.show_key(key, cx));
            }
            KeyTreeEvent::SelectionCleared => {
                self.value_panel.update(cx, |panel, cx| panel.clear(cx));
            }
        }
    }

    /// List every key again and rebuild the tree.
    pub fn refresh(&mut self, cx: &mut Context<Self>) {
        let token = self.app_state.update(cx, |state, cx| {
            let token = state.begin_refresh();
            cx.emit(AppStateChanged);
            token
        });

        let explorer = self.app_state.read(cx).explorer();

        cx.spawn(async move |this, cx| {
            let result = cx
                .background_executor()
                .spawn(async move { explorer.list_groups() })
                .await;

            this.update(cx, |this, cx| {
                this.apply_refresh(&token, result, cx);
            })
            .ok();
        })
        .detach();
    }

    fn apply_refresh(
        &mut self,
        token: &CancelToken,
        result: Result<KeyGroups, ExplorerError>,
        cx: &mut Context<Self>,
    ) {
        let outcome = self.app_state.update(cx, |state, cx| {
            let outcome = state.finish_refresh(token, result);
            cx.emit(AppStateChanged);
            outcome
        });

        match outcome {
            RefreshOutcome::Applied => {
                let groups = self.app_state.read(cx).groups().clone();
                self.key_tree
                    .update(cx, |tree, cx| tree.set_groups(groups, cx));

                let selected = self.key_tree.read(cx).selected().map(str::to_string);
                if let Some(key) = selected {
                    self.value_panel
                        .update(cx, |panel, cx| panel.show_key(key, cx));
                }
            }
            RefreshOutcome::Failed(message) => {
                self.pending_toast = Some(PendingToast::error(format!(
                    "Refresh failed: {}",
                    message
                )));
            }
            RefreshOutcome::Stale => {}
        }

        cx.notify();
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let is_refreshing = self.app_state.read(cx).is_refreshing();

        div()
            .w_full()
            .h(Heights::TOOLBAR)
            .flex_none()
            .flex()
            .items_center()
            .gap(Spacing::SM)
            .px(Spacing::SM)
            .bg(cx.theme().tab_bar)
            .border_b_1()
            .border_color(cx.theme().border)
            .child(
                div()
                    .text_size(FontSizes::LG)
                    .font_weight(FontWeight::SEMIBOLD)
                    .child("rexplorer"),
            )
            .child(div().flex_1())
            .child(
                self.toolbar_button("toolbar-refresh", "Refresh", cx)
                    .when(is_refreshing, |el| el.opacity(0.5))
                    .on_click(cx.listener(|this, _, _, cx| this.refresh(cx))),
            )
            .child(
                self.toolbar_button("toolbar-zoom-out", "A−", cx)
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.value_panel.update(cx, |panel, cx| panel.zoom_out(cx));
                    })),
            )
            .child(
                self.toolbar_button("toolbar-zoom-in", "A+", cx)
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.value_panel.update(cx, |panel, cx| panel.zoom_in(cx));
                    })),
            )
    }

    fn toolbar_button(
        &self,
        id: &'static str,
        label: &'static str,
        cx: &Context<Self>,
    ) -> Stateful<Div> {
        div()
            .id(id)
            .h(Heights::BUTTON)
            .px(Spacing::SM)
            .flex()
            .items_center()
            .rounded(Radii::MD)
            .text_size(FontSizes::SM)
            .cursor_pointer()
            .hover(|el| el.bg(cx.theme().secondary_hover))
            .child(label)
    }
}

impl Render for Workspace {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        flush_pending_toast(self.pending_toast.take(), window, cx);

        let dock = self.dock.clone();
        let value_panel = self.value_panel.clone();
        let status_bar = self.status_bar.clone();
        let notification_list = self.notification_list.clone();

        div()
            .id("workspace")
            .key_context(WORKSPACE_CONTEXT)
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .flex_col()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .on_action(cx.listener(|this, _: &Refresh, _, cx| {
                this.refresh(cx);
            }))
            .on_action(cx.listener(|this, _: &ZoomIn, _, cx| {
                this.value_panel.update(cx, |panel, cx| panel.zoom_in(cx));
            }))
            .on_action(cx.listener(|this, _: &ZoomOut, _, cx| {
                this.value_panel.update(cx, |panel, cx| panel.zoom_out(cx));
            }))
            .on_action(cx.listener(|this, _: &ResetZoom, _, cx| {
                this.value_panel.update(cx, |panel, cx| panel.reset_zoom(cx));
            }))
            .on_action(cx.listener(|this, _: &CopyValue, _, cx| {
                this.value_panel.update(cx, |panel, cx| panel.copy_value(cx));
            }))
            .on_action(cx.listener(|this, _: &CopyMarkup, _, cx| {
                this.value_panel.update(cx, |panel, cx| panel.copy_markup(cx));
            }))
            .on_mouse_move(cx.listener(|this, event: &MouseMoveEvent, _, cx| {
                if this.dock.read(cx).is_resizing() {
                    this.dock
                        .update(cx, |dock, cx| dock.handle_resize_move(event.position.x, cx));
                }
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _, cx| {
                    this.dock.update(cx, |dock, cx| dock.finish_resize(cx));
                }),
            )
            .child(self.render_toolbar(cx))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .flex_1()
                    .overflow_hidden()
                    .child(dock)
                    .child(div().flex_1().h_full().overflow_hidden().child(value_panel)),
            )
            .child(status_bar)
            .child(notification_list)
    }
}
