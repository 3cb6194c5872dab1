use rexplorer_core::{ExplorerError, KeyValueStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default)]
pub struct FakeStoreStats {
    pub key_patterns: Vec<String>,
    pub fetched_keys: Vec<String>,
}

#[derive(Default)]
struct FakeStoreState {
    // HashMap on purpose: key order coming out of the store is arbitrary.
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    keys_error: RwLock<Option<String>>,
    get_error: RwLock<Option<String>>,
    key_patterns: Mutex<Vec<String>>,
    fetched_keys: Mutex<Vec<String>>,
}

/// In-memory [`KeyValueStore`] with injectable failures.
///
/// Clones share state, so a test can keep a handle and mutate the store after
/// handing it to an `Explorer`.
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<FakeStoreState>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.set_value(key, value);
        self
    }

    pub fn with_json(self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let raw = value.to_string().into_bytes();
        self.with_value(key, raw)
    }

    /// Store a value under a key name that need not be UTF-8.
    pub fn with_raw_key(self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        rwlock_write(&self.state.entries).insert(key.into(), value.into());
        self
    }

    /// Make every key listing fail as if the server were unreachable.
    pub fn with_keys_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.keys_error) = Some(message.into());
        self
    }

    /// Make every value fetch fail as if the server were unreachable.
    pub fn with_get_error(self, message: impl Into<String>) -> Self {
        *rwlock_write(&self.state.get_error) = Some(message.into());
        self
    }

    pub fn set_value(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key: String = key.into();
        rwlock_write(&self.state.entries).insert(key.into_bytes(), value.into());
    }

    pub fn remove(&self, key: &str) -> bool {
        rwlock_write(&self.state.entries)
            .remove(key.as_bytes())
            .is_some()
    }

    pub fn stats(&self) -> FakeStoreStats {
        FakeStoreStats {
            key_patterns: mutex_lock(&self.state.key_patterns).clone(),
            fetched_keys: mutex_lock(&self.state.fetched_keys).clone(),
        }
    }

    pub fn into_store_arc(self) -> Arc<dyn KeyValueStore> {
        Arc::new(self)
    }
}

impl KeyValueStore for FakeStore {
    fn label(&self) -> String {
        "fake://memory".to_string()
    }

    fn ping(&self) -> Result<(), ExplorerError> {
        Ok(())
    }

    fn keys(&self, pattern: &str) -> Result<Vec<Vec<u8>>, ExplorerError> {
        mutex_lock(&self.state.key_patterns).push(pattern.to_string());

        if let Some(message) = rwlock_read(&self.state.keys_error).clone() {
            return Err(ExplorerError::ConnectionFailed(message));
        }

        Ok(rwlock_read(&self.state.entries)
            .keys()
            .filter(|key| glob_matches(pattern.as_bytes(), key))
            .cloned()
            .collect())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ExplorerError> {
        mutex_lock(&self.state.fetched_keys).push(key.to_string());

        if let Some(message) = rwlock_read(&self.state.get_error).clone() {
            return Err(ExplorerError::ConnectionFailed(message));
        }

        Ok(rwlock_read(&self.state.entries).get(key.as_bytes()).cloned())
    }
}

/// Glob matching with `*` and `?`, enough to stand in for `KEYS pattern`.
fn glob_matches(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((&b'*', rest)) => (0..=text.len()).any(|skip| glob_matches(rest, &text[skip..])),
        Some((&b'?', rest)) => !text.is_empty() && glob_matches(rest, &text[1..]),
        Some((&c, rest)) => text.first() == Some(&c) && glob_matches(rest, &text[1..]),
    }
}

fn rwlock_read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

fn rwlock_write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

fn mutex_lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_matching() {
        assert!(glob_matches(b"*", b""));
        assert!(glob_matches(b"*", b"user:1"));
        assert!(glob_matches(b"user:*", b"user:1"));
        assert!(!glob_matches(b"user:*", b"order:1"));
        assert!(glob_matches(b"user:?", b"user:1"));
        assert!(!glob_matches(b"user:?", b"user:10"));
    }

    #[test]
    fn clones_share_state() {
        let store = FakeStore::new();
        let handle = store.clone();

        handle.set_value("k", "1");
        assert_eq!(store.get("k").unwrap(), Some(b"1".to_vec()));
        assert!(handle.remove("k"));
        assert_eq!(store.get("k").unwrap(), None);
    }
}
