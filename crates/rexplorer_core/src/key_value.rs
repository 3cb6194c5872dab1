use crate::ExplorerError;

/// Pattern matching every key in the store.
pub const MATCH_ALL: &str = "*";

/// Read-only access to a flat key-value namespace.
///
/// Implementations own their connection; callers share them behind an
/// `Arc<dyn KeyValueStore>`. Every call blocks until the store answers.
pub trait KeyValueStore: Send + Sync {
    /// Display label for the connection (credentials removed).
    fn label(&self) -> String;

    /// Round-trip check against the store.
    fn ping(&self) -> Result<(), ExplorerError>;

    /// Raw names of all keys matching a glob-style `pattern`, in store order.
    fn keys(&self, pattern: &str) -> Result<Vec<Vec<u8>>, ExplorerError>;

    /// Raw value stored under `key`, or `None` when the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ExplorerError>;
}

/// Decode a raw key name returned by [`KeyValueStore::keys`].
pub fn decode_key(raw: Vec<u8>) -> Result<String, ExplorerError> {
    String::from_utf8(raw).map_err(|e| {
        ExplorerError::Decode(format!(
            "key {:?}: {}",
            String::from_utf8_lossy(e.as_bytes()),
            e.utf8_error()
        ))
    })
}
