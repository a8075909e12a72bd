#![allow(dead_code)]

use std::collections::BTreeMap;

use serde_json::Value;

use stubber_core::configuration::{Branch, LayeredConfiguration, Node, ScopeStores};
use stubber_core::types::ConfigurationScope;

pub fn branch(value: Value) -> Branch {
    match Node::from_plain(value) {
        Node::Branch(branch) => branch,
        Node::Leaf(leaf) => panic!("expected an object, got {leaf}"),
    }
}

/// `{"Global": {...}, "Workspace": {...}, "WorkspaceFolder": {...}}`
pub fn stores(value: Value) -> ScopeStores {
    let Value::Object(scopes) = value else {
        panic!("expected an object keyed by scope");
    };
    scopes
        .into_iter()
        .map(|(scope, tree)| (parse_scope(&scope), branch(tree)))
        .collect()
}

pub fn languages(value: Value) -> BTreeMap<String, ScopeStores> {
    let Value::Object(languages) = value else {
        panic!("expected an object keyed by language");
    };
    languages
        .into_iter()
        .map(|(language, scopes)| (language, stores(scopes)))
        .collect()
}

pub fn configuration(base: Value) -> LayeredConfiguration {
    LayeredConfiguration::from_stores(stores(base), BTreeMap::new())
}

pub fn language_configuration(overlays: Value) -> LayeredConfiguration {
    LayeredConfiguration::from_stores(ScopeStores::new(), languages(overlays))
}

fn parse_scope(name: &str) -> ConfigurationScope {
    match name {
        "Global" => ConfigurationScope::Global,
        "Workspace" => ConfigurationScope::Workspace,
        "WorkspaceFolder" => ConfigurationScope::WorkspaceFolder,
        other => panic!("unknown scope {other}"),
    }
}
