mod support;

use serde_json::json;
use tempfile::TempDir;

use stubber_core::configuration::snapshot::{
    from_json_str, load_snapshot, parse_plain_json_str, parse_plain_toml_str, save_snapshot,
    to_json_string,
};
use stubber_core::configuration::{LayeredConfiguration, Node};
use stubber_core::error::ConfigError;
use stubber_core::types::ConfigurationScope;

use support::{branch, configuration};

fn sample() -> LayeredConfiguration {
    let mut cfg = configuration(json!({
        "Global": {"hello": "there", "six": 6},
        "WorkspaceFolder": {"nest": {"in-a": {"flag": true}}},
    }));
    cfg.update(
        "obj",
        json!({"un": 111, "trois": "three"}),
        ConfigurationScope::Global,
        false,
        None,
    )
    .unwrap();
    cfg.update("tab", 4, ConfigurationScope::Workspace, true, Some("go"))
        .unwrap();
    cfg
}

#[test]
fn save_then_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state").join("configuration.json");
    let cfg = sample();

    save_snapshot(&path, &cfg).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    assert_eq!(loaded, cfg);
    assert_eq!(
        loaded.get("obj", None).unwrap().into_owned(),
        Node::Leaf(json!({"un": 111, "trois": "three"}))
    );
    assert!(!loaded.has("obj.un", None));
}

#[test]
fn load_missing_returns_empty_configuration() {
    let temp = TempDir::new().unwrap();

    let cfg = load_snapshot(&temp.path().join("missing.json")).unwrap();

    assert!(cfg.is_empty());
}

#[test]
fn load_invalid_json_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_snapshot(&path), Err(ConfigError::Snapshot(_))));
}

#[test]
fn snapshot_layout() {
    let mut cfg = LayeredConfiguration::new();
    cfg.update("a.b", 1, true, false, None).unwrap();

    let value: serde_json::Value = serde_json::from_str(&to_json_string(&cfg).unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "configuration": {
                "Global": {"type": "@SerializedMap", "entries": [
                    ["a", {"type": "@SerializedMap", "entries": [["b", 1]]}]
                ]}
            },
            "languageConfiguration": {}
        })
    );
}

#[test]
fn missing_sections_decode_as_empty() {
    let cfg = from_json_str("{}").unwrap();
    assert!(cfg.is_empty());

    let cfg = from_json_str(
        r#"{"languageConfiguration": {"go": {"Global": {"type": "@SerializedMap", "entries": [["k", "v"]]}}}}"#,
    )
    .unwrap();
    assert_eq!(cfg.get("k", Some("go")).unwrap().into_owned(), Node::from("v"));
    assert!(cfg.get("k", None).is_none());
}

#[test]
fn scope_store_must_be_a_map() {
    let err = from_json_str(r#"{"configuration": {"Global": 5}}"#).unwrap_err();

    assert!(err.to_string().contains("Global"));
}

#[test]
fn fingerprint_ignores_insertion_order() {
    let mut first = LayeredConfiguration::new();
    first.update("a", 1, true, false, None).unwrap();
    first.update("b", 2, true, false, None).unwrap();

    let mut second = LayeredConfiguration::new();
    second.update("b", 2, true, false, None).unwrap();
    second.update("a", 1, true, false, None).unwrap();

    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());

    second.update("a", 3, true, false, None).unwrap();
    assert_ne!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn tag_shaped_record_leaves_roundtrip() {
    let mut cfg = LayeredConfiguration::new();
    let bare = json!({"type": "@SerializedMap", "note": 1});
    let with_entries = json!({"type": "@SerializedMap", "entries": [["k", "v"]]});
    let leaf_tag = json!({"type": "@SerializedLeaf", "value": 2});
    cfg.update("bare", bare.clone(), ConfigurationScope::Global, false, None)
        .unwrap();
    cfg.update("entries", with_entries.clone(), ConfigurationScope::Global, false, None)
        .unwrap();
    cfg.update("leaf", leaf_tag.clone(), ConfigurationScope::Global, false, None)
        .unwrap();

    let loaded = from_json_str(&to_json_string(&cfg).unwrap()).unwrap();

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.get("bare", None).unwrap().into_owned(), Node::Leaf(bare));
    assert_eq!(
        loaded.get("entries", None).unwrap().into_owned(),
        Node::Leaf(with_entries)
    );
    assert_eq!(loaded.get("leaf", None).unwrap().into_owned(), Node::Leaf(leaf_tag));
    assert!(!loaded.has("entries.k", None));
}

#[test]
fn fingerprint_ignores_empty_scope_stores() {
    let fresh = LayeredConfiguration::new();
    let listed = from_json_str(
        r#"{"configuration": {"Global": {"type": "@SerializedMap", "entries": []}}}"#,
    )
    .unwrap();

    assert_eq!(fresh.fingerprint().unwrap(), listed.fingerprint().unwrap());

    let overlay_with_empty_scope = from_json_str(
        r#"{"languageConfiguration": {"go": {"Workspace": {"type": "@SerializedMap", "entries": []}}}}"#,
    )
    .unwrap();
    let bare_overlay = from_json_str(r#"{"languageConfiguration": {"go": {}}}"#).unwrap();

    assert_eq!(
        overlay_with_empty_scope.fingerprint().unwrap(),
        bare_overlay.fingerprint().unwrap()
    );
    // An empty overlay still shadows the base configuration.
    assert_ne!(fresh.fingerprint().unwrap(), bare_overlay.fingerprint().unwrap());
}

#[test]
fn plain_json_import() {
    let imported = parse_plain_json_str(r#"{"editor": {"tabSize": 2}, "list": [1, 2]}"#).unwrap();

    assert_eq!(imported, branch(json!({"editor": {"tabSize": 2}, "list": [1, 2]})));
    assert!(imported["editor"].is_branch());
}

#[test]
fn plain_toml_import() {
    let imported = parse_plain_toml_str(
        r#"
        top = "level"

        [editor]
        tabSize = 2
        wrap = true
        "#,
    )
    .unwrap();

    assert_eq!(
        imported,
        branch(json!({"top": "level", "editor": {"tabSize": 2, "wrap": true}}))
    );
}

#[test]
fn plain_import_requires_object_root() {
    assert!(parse_plain_json_str("[1, 2]").is_err());
}
