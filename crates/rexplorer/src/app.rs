use gpui::EventEmitter;
use rexplorer_core::{CancelToken, Explorer, ExplorerError, KeyGroups, RequestSlot};

pub struct AppStateChanged;

/// How a finished key listing was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Failed(String),
    /// A newer refresh was started before this one returned.
    Stale,
}

/// Connection-wide state shared by every view.
pub struct AppState {
    explorer: Explorer,
    connection_label: String,
    groups: KeyGroups,
    last_error: Option<String>,
    refresh: RequestSlot,
}

impl AppState {
    pub fn new(explorer: Explorer) -> Self {
        let connection_label = explorer.store().label();

        Self {
            explorer,
            connection_label,
            groups: KeyGroups::new(),
            last_error: None,
            refresh: RequestSlot::new(),
        }
    }

    pub fn explorer(&self) -> Explorer {
        self.explorer.clone()
    }

    pub fn connection_label(&self) -> &str {
        &self.connection_label
    }

    pub fn groups(&self) -> &KeyGroups {
        &self.groups
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Record how the latest value render went; a success clears an earlier failure.
    pub fn record_render(&mut self, failure: Option<&str>) {
        match failure {
            Some(message) => self.set_error(message),
            None => self.clear_error(),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_pending()
    }

    pub fn begin_refresh(&mut self) -> CancelToken {
        self.refresh.start()
    }

    pub fn finish_refresh(
        &mut self,
        token: &CancelToken,
        result: Result<KeyGroups, ExplorerError>,
    ) -> RefreshOutcome {
        if !self.refresh.finish(token) {
            log::debug!("Dropping superseded key listing");
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(groups) => {
                self.groups = groups;
                self.clear_error();
                RefreshOutcome::Applied
            }
            Err(error) => {
                let message = error.to_string();
                log::error!("Key listing failed: {}", message);
                self.last_error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }
}

impl EventEmitter<AppStateChanged> for AppState {}

#[cfg(test)]
mod tests {
    use super::*;
    use rexplorer_test_support::{FakeStore, fixtures};

    fn state_for(store: &FakeStore) -> AppState {
        AppState::new(Explorer::new(store.clone().into_store_arc()))
    }

    #[test]
    fn label_comes_from_store() {
        let state = state_for(&FakeStore::new());
        assert_eq!(state.connection_label(), "fake://memory");
    }

    #[test]
    fn refresh_replaces_groups() {
        let store = fixtures::users_and_orders();
        let mut state = state_for(&store);

        let token = state.begin_refresh();
        assert!(state.is_refreshing());

        let result = state.explorer().list_groups();
        assert_eq!(state.finish_refresh(&token, result), RefreshOutcome::Applied);
        assert!(!state.is_refreshing());
        assert_eq!(state.groups().len(), 2);
        assert_eq!(state.groups().key_count(), 3);
    }

    #[test]
    fn superseded_refresh_is_dropped() {
        let store = fixtures::users_and_orders();
        let mut state = state_for(&store);

        let old = state.begin_refresh();
        let new = state.begin_refresh();

        let outcome = state.finish_refresh(&old, state.explorer().list_groups());
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert!(state.groups().is_empty());

        store.set_value("cart:9", "{}");
        let outcome = state.finish_refresh(&new, state.explorer().list_groups());
        assert_eq!(outcome, RefreshOutcome::Applied);
        assert_eq!(state.groups().len(), 3);
    }

    #[test]
    fn failed_refresh_keeps_previous_groups_and_records_error() {
        let store = fixtures::users_and_orders();
        let mut state = state_for(&store);

        let token = state.begin_refresh();
        state.finish_refresh(&token, state.explorer().list_groups());

        let token = state.begin_refresh();
        let failing = Explorer::new(
            FakeStore::new()
                .with_keys_error("Connection refused")
                .into_store_arc(),
        );
        let outcome = state.finish_refresh(&token, failing.list_groups());

        assert!(matches!(outcome, RefreshOutcome::Failed(ref m) if m.contains("Connection refused")));
        assert_eq!(state.groups().len(), 2);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn successful_render_clears_an_earlier_render_error() {
        let store = fixtures::broken_values().with_value("user:1", r#"{"id":1}"#);
        let mut state = state_for(&store);

        let failure = state.explorer().render("bad:json").unwrap_err().to_string();
        state.record_render(Some(&failure));
        assert_eq!(state.last_error(), Some(failure.as_str()));

        assert!(state.explorer().render("user:1").is_ok());
        state.record_render(None);
        assert_eq!(state.last_error(), None);
    }
}
