mod support;

use serde_json::json;

use stubber_core::configuration::snapshot::from_json_str;
use stubber_core::error::ConfigError;
use stubber_core::stub::ConfigurationStub;
use stubber_core::types::ConfigurationScope;

use support::configuration;

#[test]
fn setup_seeds_starting_state() {
    let stub = ConfigurationStub::new(
        Some(configuration(json!({"WorkspaceFolder": {"stubber": {"other": "value"}}}))),
        None,
    );

    let shared = stub.setup();

    assert_eq!(
        shared.root().get_as::<String>("stubber.other").unwrap(),
        Some("value".to_string())
    );
}

#[test]
fn verify_accepts_expected_state() {
    let stub = ConfigurationStub::new(
        Some(configuration(json!({"WorkspaceFolder": {"stubber": {"other": "value"}}}))),
        Some(configuration(json!({
            "WorkspaceFolder": {"stubber": {"other": "value", "some-key": "some-value"}}
        }))),
    );

    let shared = stub.setup();
    shared
        .scoped("stubber", None)
        .update("some-key", "some-value", (), false)
        .unwrap();

    stub.verify(&shared).unwrap();
}

#[test]
fn verify_reports_mismatch() {
    let stub = ConfigurationStub::default();

    let shared = stub.setup();
    shared
        .root()
        .update("unexpected", 1, ConfigurationScope::Global, false)
        .unwrap();

    let err = stub.verify(&shared).unwrap_err();
    let ConfigError::Mismatch { actual, expected, .. } = &err else {
        panic!("expected mismatch, got {err}");
    };
    assert!(actual.contains("unexpected"));
    assert!(!expected.contains("unexpected"));
}

#[test]
fn untouched_default_stub_verifies() {
    let stub = ConfigurationStub::default();

    stub.verify(&stub.setup()).unwrap();
}

#[test]
fn verify_treats_listed_empty_scope_as_absent() {
    let expected = from_json_str(
        r#"{"configuration": {"Global": {"type": "@SerializedMap", "entries": []}}}"#,
    )
    .unwrap();
    let stub = ConfigurationStub::new(None, Some(expected));

    stub.verify(&stub.setup()).unwrap();
}
