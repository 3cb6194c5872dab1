use crate::FakeStore;
use serde_json::json;

/// The keyspace used throughout the docs: two users and one order.
pub fn users_and_orders() -> FakeStore {
    FakeStore::new()
        .with_json("user:1", json!({"name": "Al"}))
        .with_json("user:2", json!({"name": "Bea", "tags": ["admin"]}))
        .with_json("order:5", json!({"id": 5, "total": 9.5}))
}

/// Values that cannot be rendered, one per failure kind.
pub fn broken_values() -> FakeStore {
    FakeStore::new()
        .with_value("bad:utf8", vec![0xff, 0xfe, b'{', b'}'])
        .with_value("bad:json", "{\"unterminated\": ")
        .with_value("bad:text", "plain text")
}

pub fn key_names(count: usize, prefix: &str) -> Vec<String> {
    (0..count).map(|i| format!("{}:{}", prefix, i)).collect()
}
