use std::sync::Arc;

use crate::key_value::{MATCH_ALL, decode_key};
use crate::{
    DEFAULT_DELIMITER, ExplorerError, KeyGroups, KeyValueStore, RenderedValue, group_keys,
    render_json,
};

/// Read-only view over one store: lists grouped keys and renders values.
#[derive(Clone)]
pub struct Explorer {
    store: Arc<dyn KeyValueStore>,
    delimiter: char,
}

impl Explorer {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Fetch every key in the store and group it by prefix.
    pub fn list_groups(&self) -> Result<KeyGroups, ExplorerError> {
        let keys = self
            .store
            .keys(MATCH_ALL)?
            .into_iter()
            .map(decode_key)
            .collect::<Result<Vec<_>, _>>()?;

        let groups = group_keys(keys, self.delimiter);
        log::info!(
            "Listed {} keys in {} groups from {}",
            groups.key_count(),
            groups.len(),
            self.store.label()
        );

        Ok(groups)
    }

    /// Fetch the value stored under `key` and pretty-print it.
    pub fn render(&self, key: &str) -> Result<RenderedValue, ExplorerError> {
        log::debug!("Rendering value of '{}'", key);

        let raw = self
            .store
            .get(key)?
            .ok_or_else(|| ExplorerError::not_found(key))?;

        render_json(&raw).inspect_err(|e| log::warn!("Cannot render '{}': {}", key, e))
    }
}
