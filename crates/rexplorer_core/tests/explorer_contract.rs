use rexplorer_core::{Explorer, ExplorerError, MATCH_ALL, prefix_of};
use rexplorer_test_support::fixtures;
use rexplorer_test_support::{FakeStore, FakeStoreStats};
use serde_json::json;

fn explorer(store: &FakeStore) -> Explorer {
    Explorer::new(store.clone().into_store_arc())
}

fn group_listing(explorer: &Explorer) -> Vec<(String, Vec<String>)> {
    explorer
        .list_groups()
        .unwrap()
        .iter()
        .map(|(prefix, keys)| (prefix.to_string(), keys.to_vec()))
        .collect()
}

#[test]
fn lists_groups_in_sorted_order() {
    let store = fixtures::users_and_orders();

    assert_eq!(
        group_listing(&explorer(&store)),
        vec![
            ("order".to_string(), vec!["order:5".to_string()]),
            (
                "user".to_string(),
                vec!["user:1".to_string(), "user:2".to_string()]
            ),
        ]
    );
}

#[test]
fn listing_asks_for_every_key_once() {
    let store = fixtures::users_and_orders();
    explorer(&store).list_groups().unwrap();

    let FakeStoreStats { key_patterns, .. } = store.stats();
    assert_eq!(key_patterns, vec![MATCH_ALL.to_string()]);
}

#[test]
fn empty_keyspace_lists_no_groups() {
    let groups = explorer(&FakeStore::new()).list_groups().unwrap();
    assert!(groups.is_empty());
}

#[test]
fn listing_partitions_every_key() {
    let mut store = FakeStore::new();
    let mut names = fixtures::key_names(25, "session");
    names.extend(fixtures::key_names(7, "job"));
    names.extend(["standalone".to_string(), "a:b:c".to_string()]);
    for name in &names {
        store = store.with_value(name.clone(), "{}");
    }

    let groups = explorer(&store).list_groups().unwrap();
    assert_eq!(groups.key_count(), names.len());

    for (prefix, keys) in groups.iter() {
        for key in keys {
            assert_eq!(prefix_of(key, ':'), prefix);
        }
        let mut sorted = keys.to_vec();
        sorted.sort();
        assert_eq!(keys, sorted.as_slice());
    }
}

#[test]
fn custom_delimiter_changes_grouping() {
    let store = FakeStore::new()
        .with_value("eu/user:1", "{}")
        .with_value("eu/user:2", "{}")
        .with_value("us/user:1", "{}");

    let groups = explorer(&store).with_delimiter('/').list_groups().unwrap();
    assert_eq!(groups.prefixes().collect::<Vec<_>>(), vec!["eu", "us"]);
    assert_eq!(groups.group_of("eu/user:2"), Some("eu"));
}

#[test]
fn unreachable_store_fails_listing() {
    let store = FakeStore::new().with_keys_error("Connection refused");

    let err = explorer(&store).list_groups().unwrap_err();
    assert!(matches!(err, ExplorerError::ConnectionFailed(_)));
}

#[test]
fn non_utf8_key_name_fails_listing() {
    let store = FakeStore::new().with_raw_key(vec![0xc0, b':', b'1'], "{}");

    let err = explorer(&store).list_groups().unwrap_err();
    assert!(matches!(err, ExplorerError::Decode(_)));
}

#[test]
fn renders_selected_value() {
    let store = fixtures::users_and_orders();

    let rendered = explorer(&store).render("order:5").unwrap();
    assert_eq!(rendered.text(), "{\n    \"id\": 5,\n    \"total\": 9.5\n}");
    assert_eq!(store.stats().fetched_keys, vec!["order:5".to_string()]);
}

#[test]
fn rendering_twice_is_identical() {
    let store = fixtures::users_and_orders();
    let explorer = explorer(&store);

    let first = explorer.render("user:2").unwrap();
    let second = explorer.render("user:2").unwrap();
    assert_eq!(first, second);
}

#[test]
fn rendered_text_reparses_to_stored_document() {
    let document = json!({
        "name": "Zoë",
        "nested": {"list": [1, 2.5, null, true], "empty": {}},
        "note": "a: \"quoted\" value"
    });
    let store = FakeStore::new().with_json("doc:1", document.clone());

    let rendered = explorer(&store).render("doc:1").unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(rendered.text()).unwrap();
    assert_eq!(reparsed, document);
}

#[test]
fn deleted_key_is_reported_not_rendered_empty() {
    let store = fixtures::users_and_orders();
    let explorer = explorer(&store);

    let groups = explorer.list_groups().unwrap();
    assert!(groups.contains_key("user:1"));

    store.remove("user:1");
    let err = explorer.render("user:1").unwrap_err();
    assert!(matches!(err, ExplorerError::NotFound(ref key) if key == "user:1"));
    assert!(err.is_data_error());
}

#[test]
fn broken_values_fail_with_their_own_error() {
    let store = fixtures::broken_values();
    let explorer = explorer(&store);

    assert!(matches!(
        explorer.render("bad:utf8").unwrap_err(),
        ExplorerError::Decode(_)
    ));
    assert!(matches!(
        explorer.render("bad:json").unwrap_err(),
        ExplorerError::Parse(_)
    ));
    assert!(matches!(
        explorer.render("bad:text").unwrap_err(),
        ExplorerError::Parse(_)
    ));
}

#[test]
fn transport_failure_while_fetching_is_not_a_data_error() {
    let store = fixtures::users_and_orders().with_get_error("Broken pipe");

    let err = explorer(&store).render("user:1").unwrap_err();
    assert!(matches!(err, ExplorerError::ConnectionFailed(_)));
    assert!(!err.is_data_error());
}
