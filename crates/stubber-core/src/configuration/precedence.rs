//! Scope precedence: WorkspaceFolder, then Workspace, then Global.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::nested::{nested_get, nested_has};
use super::node::{Branch, Node};
use crate::types::ConfigurationScope;

/// One store per scope. An absent scope reads as an empty store.
pub type ScopeStores = BTreeMap<ConfigurationScope, Branch>;

/// Value of `path` in the highest-precedence scope that defines it.
pub fn resolve<'a, S: AsRef<str>>(stores: &'a ScopeStores, path: &[S]) -> Option<Cow<'a, Node>> {
    ConfigurationScope::PRECEDENCE
        .iter()
        .find_map(|scope| nested_get(stores.get(scope)?, path))
}

/// Like [`resolve`], falling back to `default` when no scope defines `path`.
pub fn resolve_or<'a, S: AsRef<str>>(
    stores: &'a ScopeStores,
    path: &[S],
    default: Node,
) -> Cow<'a, Node> {
    resolve(stores, path).unwrap_or(Cow::Owned(default))
}

/// Whether any scope defines `path`.
pub fn exists<S: AsRef<str>>(stores: &ScopeStores, path: &[S]) -> bool {
    ConfigurationScope::PRECEDENCE
        .iter()
        .any(|scope| stores.get(scope).is_some_and(|store| nested_has(store, path)))
}

/// The scope `path` would be read from, if any.
pub fn resolving_scope<S: AsRef<str>>(
    stores: &ScopeStores,
    path: &[S],
) -> Option<ConfigurationScope> {
    ConfigurationScope::PRECEDENCE
        .iter()
        .copied()
        .find(|scope| stores.get(scope).is_some_and(|store| nested_has(store, path)))
}
