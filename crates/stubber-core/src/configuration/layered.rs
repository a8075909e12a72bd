//! Scope-partitioned configuration with optional per-language overlays.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use super::nested::{check_writable, join_path, nested_set};
use super::node::{Branch, Node, split_section};
use super::precedence::{self, ScopeStores};
use super::target::ConfigurationTarget;
use crate::error::{ConfigError, Result};
use crate::types::ConfigurationScope;

/// Per-scope values of a single key.
///
/// Only exists as the return type of [`LayeredConfiguration::inspect`] and
/// [`ScopedConfigurationView::inspect`](super::ScopedConfigurationView::inspect);
/// both always fail, so no value of this type is ever constructed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inspection {
    pub key: String,
    pub default_value: Option<Node>,
    pub global_value: Option<Node>,
    pub workspace_value: Option<Node>,
    pub workspace_folder_value: Option<Node>,
    pub language_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayeredConfiguration {
    base: ScopeStores,
    languages: BTreeMap<String, ScopeStores>,
    language_overlays: bool,
}

impl Default for LayeredConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl LayeredConfiguration {
    pub fn new() -> Self {
        Self {
            base: ScopeStores::new(),
            languages: BTreeMap::new(),
            language_overlays: true,
        }
    }

    pub fn from_stores(base: ScopeStores, languages: BTreeMap<String, ScopeStores>) -> Self {
        Self {
            base,
            languages,
            language_overlays: true,
        }
    }

    /// A configuration that rejects language-specific writes, for callers
    /// that predate language overlays.
    pub fn without_language_overlays() -> Self {
        Self {
            language_overlays: false,
            ..Self::new()
        }
    }

    pub fn supports_language_overlays(&self) -> bool {
        self.language_overlays
    }

    pub fn base(&self) -> &ScopeStores {
        &self.base
    }

    pub fn languages(&self) -> &BTreeMap<String, ScopeStores> {
        &self.languages
    }

    pub fn language_ids(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn store(&self, scope: ConfigurationScope) -> Option<&Branch> {
        self.base.get(&scope)
    }

    pub fn language_store(&self, language_id: &str, scope: ConfigurationScope) -> Option<&Branch> {
        self.languages.get(language_id)?.get(&scope)
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.languages.is_empty()
    }

    /// Copy with empty scope stores removed. Overlay entries stay, even when
    /// left without any scope.
    pub(crate) fn without_empty_scopes(&self) -> Self {
        fn prune(stores: &ScopeStores) -> ScopeStores {
            stores
                .iter()
                .filter(|(_, store)| !store.is_empty())
                .map(|(scope, store)| (*scope, store.clone()))
                .collect()
        }
        Self {
            base: prune(&self.base),
            languages: self
                .languages
                .iter()
                .map(|(language, stores)| (language.clone(), prune(stores)))
                .collect(),
            language_overlays: self.language_overlays,
        }
    }

    /// Stores consulted for reads. An existing overlay replaces the base
    /// stores entirely, even when it is empty.
    fn read_stores(&self, language_id: Option<&str>) -> &ScopeStores {
        language_id
            .and_then(|id| self.languages.get(id))
            .unwrap_or(&self.base)
    }

    pub fn get(&self, section: &str, language_id: Option<&str>) -> Option<Cow<'_, Node>> {
        self.get_path(&split_section(section), language_id)
    }

    pub fn get_or(&self, section: &str, default: impl Into<Node>, language_id: Option<&str>) -> Node {
        precedence::resolve_or(
            self.read_stores(language_id),
            &split_section(section),
            default.into(),
        )
        .into_owned()
    }

    /// Typed read; `Ok(None)` when the section is not defined anywhere.
    pub fn get_as<T: DeserializeOwned>(
        &self,
        section: &str,
        language_id: Option<&str>,
    ) -> Result<Option<T>> {
        self.get(section, language_id)
            .map(|node| serde_json::from_value(node.to_value()))
            .transpose()
            .map_err(ConfigError::from)
    }

    pub fn has(&self, section: &str, language_id: Option<&str>) -> bool {
        self.has_path(&split_section(section), language_id)
    }

    pub fn update(
        &mut self,
        section: &str,
        value: impl Into<Node>,
        target: impl Into<ConfigurationTarget>,
        override_in_language: bool,
        language_id: Option<&str>,
    ) -> Result<()> {
        self.update_path(
            &split_section(section),
            value.into(),
            target.into(),
            override_in_language,
            language_id,
        )
    }

    pub fn inspect(&self, _section: &str) -> Result<Inspection> {
        Err(ConfigError::unsupported("LayeredConfiguration.inspect"))
    }

    pub(crate) fn get_path<S: AsRef<str>>(
        &self,
        path: &[S],
        language_id: Option<&str>,
    ) -> Option<Cow<'_, Node>> {
        let found = precedence::resolve(self.read_stores(language_id), path);
        let section = join_path(path);
        tracing::trace!(
            %section,
            language = ?language_id,
            found = found.is_some(),
            "configuration read"
        );
        found
    }

    pub(crate) fn has_path<S: AsRef<str>>(&self, path: &[S], language_id: Option<&str>) -> bool {
        precedence::exists(self.read_stores(language_id), path)
    }

    pub(crate) fn update_path<S: AsRef<str>>(
        &mut self,
        path: &[S],
        value: Node,
        target: ConfigurationTarget,
        override_in_language: bool,
        language_id: Option<&str>,
    ) -> Result<()> {
        let scope = target.resolve();

        if override_in_language && !self.language_overlays {
            return Err(ConfigError::unsupported("overrideInLanguage"));
        }

        let overlay = language_id.filter(|_| override_in_language);
        let section = join_path(path);

        // A rejected write must not create an overlay or a scope store.
        let existing = match overlay {
            Some(id) => self.language_store(id, scope),
            None => self.store(scope),
        };
        match existing {
            Some(store) => check_writable(store, path)?,
            None => check_writable(&Branch::new(), path)?,
        }

        let stores = match overlay {
            Some(id) => {
                if !self.languages.contains_key(id) {
                    tracing::debug!(language = id, "creating language overlay");
                }
                self.languages.entry(id.to_string()).or_default()
            }
            None => &mut self.base,
        };

        let store = stores.entry(scope).or_insert_with(|| {
            tracing::debug!(%scope, "creating scope store");
            Branch::new()
        });
        nested_set(store, path, value)?;

        tracing::debug!(%section, %scope, language = ?overlay, "configuration updated");
        Ok(())
    }
}
