use std::ops::Range;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::ActiveTheme;
use rexplorer_core::{
    CancelToken, ExplorerError, MarkupPalette, RenderedValue, RequestSlot, TokenKind,
};

use crate::app::{AppState, AppStateChanged};
use crate::ui::tokens::{FontSizes, Heights, Radii, Spacing};
use crate::ui::toast::{PendingToast, flush_pending_toast};
use crate::ui::zoom::FontZoom;

/// What the value panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueState {
    Empty,
    Loading { key: String },
    Loaded { key: String, rendered: RenderedValue },
    Failed { key: String, message: String },
}

impl ValueState {
    pub fn from_result(key: String, result: Result<RenderedValue, ExplorerError>) -> Self {
        match result {
            Ok(rendered) => ValueState::Loaded { key, rendered },
            Err(error) => ValueState::Failed {
                message: failure_message(&key, &error),
                key,
            },
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            ValueState::Empty => None,
            ValueState::Loading { key }
            | ValueState::Loaded { key, .. }
            | ValueState::Failed { key, .. } => Some(key),
        }
    }

    pub fn rendered(&self) -> Option<&RenderedValue> {
        match self {
            ValueState::Loaded { rendered, .. } => Some(rendered),
            _ => None,
        }
    }
}

fn failure_message(key: &str, error: &ExplorerError) -> String {
    match error {
        ExplorerError::NotFound(_) => format!("Key '{}' no longer exists", key),
        ExplorerError::Decode(detail) => format!("Value of '{}' is not UTF-8 text: {}", key, detail),
        ExplorerError::Parse(detail) => format!("Value of '{}' is not valid JSON: {}", key, detail),
        other => format!("Cannot read '{}': {}", key, other),
    }
}

/// Highlight color for a token kind, `None` for the default text color.
fn token_color(kind: TokenKind, palette: &MarkupPalette) -> Option<u32> {
    match kind {
        TokenKind::Key | TokenKind::String => Some(palette.string),
        TokenKind::Colon => Some(palette.punctuation),
        _ => None,
    }
}

fn highlights(rendered: &RenderedValue, palette: &MarkupPalette) -> Vec<(Range<usize>, HighlightStyle)> {
    rendered
        .spans()
        .filter_map(|(range, kind)| {
            let color = token_color(kind, palette)?;
            Some((
                range,
                HighlightStyle {
                    color: Some(rgb(color).into()),
                    ..Default::default()
                },
            ))
        })
        .collect()
}

/// Right pane: the colored pretty-print of the selected key.
pub struct ValuePanel {
    app_state: Entity<AppState>,
    state: ValueState,
    request: RequestSlot,
    zoom: FontZoom,
    palette: MarkupPalette,
    pending_toast: Option<PendingToast>,
}

impl ValuePanel {
    pub fn new(app_state: Entity<AppState>, base_font_size: f32, _cx: &mut Context<Self>) -> Self {
        Self {
            app_state,
            state: ValueState::Empty,
            request: RequestSlot::new(),
            zoom: FontZoom::new(base_font_size),
            palette: MarkupPalette::default(),
            pending_toast: None,
        }
    }

    /// Fetch and render `key` in the background.
    pub fn show_key(&mut self, key: String, cx: &mut Context<Self>) {
        let token = self.request.start();
        self.state = ValueState::Loading { key: key.clone() };
        cx.notify();

        let explorer = self.app_state.read(cx).explorer();
        let entity = cx.entity().clone();

        cx.spawn(async move |_this, cx| {
            let result = cx
                .background_executor()
                .spawn({
                    let key = key.clone();
                    async move { explorer.render(&key) }
                })
                .await;

            cx.update(|cx| {
                entity.update(cx, |this, cx| {
                    this.apply_result(&token, key, result, cx);
                });
            })
            .ok();
        })
        .detach();
    }

    pub fn clear(&mut self, cx: &mut Context<Self>) {
        self.request.cancel();
        self.state = ValueState::Empty;
        cx.notify();
    }

    fn apply_result(
        &mut self,
        token: &CancelToken,
        key: String,
        result: Result<RenderedValue, ExplorerError>,
        cx: &mut Context<Self>,
    ) {
        if !self.request.finish(token) {
            log::debug!("Dropping stale value of '{}'", key);
            return;
        }

        let data_error = result.as_ref().is_err_and(ExplorerError::is_data_error);
        self.state = ValueState::from_result(key, result);

        let failure = match &self.state {
            ValueState::Failed { message, .. } => Some(message.clone()),
            _ => None,
        };

        if let Some(message) = &failure {
            if data_error {
                log::warn!("{}", message);
            } else {
                log::error!("{}", message);
            }
            self.pending_toast = Some(PendingToast::error(message.clone()));
        }

        self.app_state.update(cx, |state, cx| {
            state.record_render(failure.as_deref());
            cx.emit(AppStateChanged);
        });

        cx.notify();
    }

    pub fn zoom_in(&mut self, cx: &mut Context<Self>) {
        if self.zoom.zoom_in() {
            cx.notify();
        }
    }

    pub fn zoom_out(&mut self, cx: &mut Context<Self>) {
        if self.zoom.zoom_out() {
            cx.notify();
        }
    }

    pub fn reset_zoom(&mut self, cx: &mut Context<Self>) {
        if self.zoom.reset() {
            cx.notify();
        }
    }

    pub fn copy_value(&mut self, cx: &mut Context<Self>) {
        let Some(text) = self.state.rendered().map(|r| r.text().to_string()) else {
            return;
        };

        cx.write_to_clipboard(ClipboardItem::new_string(text));
        self.pending_toast = Some(PendingToast::success("Copied JSON to clipboard"));
        cx.notify();
    }

    pub fn copy_markup(&mut self, cx: &mut Context<Self>) {
        let Some(markup) = self.state.rendered().map(|r| r.to_markup(&self.palette)) else {
            return;
        };

        cx.write_to_clipboard(ClipboardItem::new_string(markup));
        self.pending_toast = Some(PendingToast::success("Copied markup to clipboard"));
        cx.notify();
    }
}

impl Render for ValuePanel {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        flush_pending_toast(self.pending_toast.take(), window, cx);

        let has_value = self.state.rendered().is_some();
        let title = self.state.key().unwrap_or("No key selected").to_string();

        div()
            .id("value-panel")
            .size_full()
            .flex()
            .flex_col()
            .bg(cx.theme().background)
            .child(
                div()
                    .w_full()
                    .h(Heights::TOOLBAR)
                    .flex_none()
                    .flex()
                    .items_center()
                    .gap(Spacing::SM)
                    .px(Spacing::SM)
                    .border_b_1()
                    .border_color(cx.theme().border)
                    .child(
                        div()
                            .flex_1()
                            .overflow_hidden()
                            .text_ellipsis()
                            .whitespace_nowrap()
                            .text_size(FontSizes::SM)
                            .text_color(cx.theme().muted_foreground)
                            .child(title),
                    )
                    .child(
                        div()
                            .text_size(FontSizes::XS)
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("{}px", self.zoom.size())),
                    )
                    .when(has_value, |el| {
                        el.child(
                            self.toolbar_button("copy-json", "Copy JSON", cx)
                                .on_click(cx.listener(|this, _, _, cx| this.copy_value(cx))),
                        )
                        .child(
                            self.toolbar_button("copy-markup", "Copy markup", cx)
                                .on_click(cx.listener(|this, _, _, cx| this.copy_markup(cx))),
                        )
                    }),
            )
            .child(
                div()
                    .id("value-panel-content")
                    .flex_1()
                    .overflow_y_scroll()
                    .p(Spacing::MD)
                    .child(self.render_content(cx)),
            )
    }
}

impl ValuePanel {
    fn render_content(&self, cx: &mut Context<Self>) -> AnyElement {
        let muted = cx.theme().muted_foreground;

        match &self.state {
            ValueState::Empty => div()
                .text_size(FontSizes::BASE)
                .text_color(muted)
                .child("Select a key to view its value")
                .into_any_element(),
            ValueState::Loading { key } => div()
                .text_size(FontSizes::BASE)
                .text_color(muted)
                .child(format!("Loading {}…", key))
                .into_any_element(),
            ValueState::Failed { message, .. } => div()
                .p(Spacing::SM)
                .rounded(Radii::MD)
                .border_1()
                .border_color(cx.theme().danger)
                .bg(cx.theme().danger.opacity(0.1))
                .text_size(FontSizes::BASE)
                .text_color(cx.theme().danger)
                .child(message.clone())
                .into_any_element(),
            ValueState::Loaded { rendered, .. } => div()
                .font_family("monospace")
                .text_size(self.zoom.pixels())
                .text_color(cx.theme().foreground)
                .child(
                    StyledText::new(rendered.text().to_string())
                        .with_highlights(highlights(rendered, &self.palette)),
                )
                .into_any_element(),
        }
    }

    fn toolbar_button(
        &self,
        id: &'static str,
        label: &'static str,
        cx: &Context<Self>,
    ) -> Stateful<Div> {
        div()
            .id(id)
            .px(Spacing::SM)
            .py(px(2.0))
            .rounded(Radii::SM)
            .border_1()
            .border_color(cx.theme().border)
            .text_size(FontSizes::XS)
            .cursor_pointer()
            .hover(|el| el.bg(cx.theme().secondary_hover))
            .child(label)
    }
}
