//! Section-rooted views over a shared configuration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::descriptor::language_id_from_scope;
use super::layered::{Inspection, LayeredConfiguration};
use super::nested::join_path;
use super::node::{Node, split_section};
use super::target::ConfigurationTarget;
use crate::error::{ConfigError, Result};

/// Handle to one [`LayeredConfiguration`] shared by every view created from
/// it. Each call holds the lock for its whole duration, so views always
/// observe the latest writes.
#[derive(Debug, Clone, Default)]
pub struct SharedConfiguration {
    inner: Arc<Mutex<LayeredConfiguration>>,
}

impl SharedConfiguration {
    pub fn new(configuration: LayeredConfiguration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(configuration)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LayeredConfiguration> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<R>(&self, f: impl FnOnce(&LayeredConfiguration) -> R) -> R {
        f(&self.lock())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut LayeredConfiguration) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> LayeredConfiguration {
        self.lock().clone()
    }

    /// View rooted at `prefix` (empty for the whole configuration).
    pub fn scoped(&self, prefix: &str, language_id: Option<&str>) -> ScopedConfigurationView {
        let prefix = if prefix.is_empty() {
            Vec::new()
        } else {
            split_section(prefix)
        };
        ScopedConfigurationView {
            configuration: self.clone(),
            prefix,
            language_id: language_id.map(str::to_string),
        }
    }

    pub fn root(&self) -> ScopedConfigurationView {
        self.scoped("", None)
    }

    /// View for `section`, bound to the language carried by an optional
    /// scope descriptor.
    pub fn get_configuration(
        &self,
        section: Option<&str>,
        scope: Option<&Value>,
    ) -> Result<ScopedConfigurationView> {
        let language_id = language_id_from_scope(scope)?;
        Ok(self.scoped(section.unwrap_or_default(), language_id.as_deref()))
    }
}

#[derive(Debug, Clone)]
pub struct ScopedConfigurationView {
    configuration: SharedConfiguration,
    prefix: Vec<String>,
    language_id: Option<String>,
}

impl ScopedConfigurationView {
    pub fn prefix(&self) -> String {
        join_path(&self.prefix)
    }

    pub fn language_id(&self) -> Option<&str> {
        self.language_id.as_deref()
    }

    fn nested_section(&self, section: &str) -> Vec<String> {
        let mut path = self.prefix.clone();
        path.extend(split_section(section));
        path
    }

    pub fn get(&self, section: &str) -> Option<Node> {
        let path = self.nested_section(section);
        self.configuration
            .with(|cfg| cfg.get_path(&path, self.language_id()).map(|node| node.into_owned()))
    }

    pub fn get_or(&self, section: &str, default: impl Into<Node>) -> Node {
        self.get(section).unwrap_or_else(|| default.into())
    }

    pub fn get_as<T: DeserializeOwned>(&self, section: &str) -> Result<Option<T>> {
        self.get(section)
            .map(|node| serde_json::from_value(node.to_value()))
            .transpose()
            .map_err(ConfigError::from)
    }

    pub fn has(&self, section: &str) -> bool {
        let path = self.nested_section(section);
        self.configuration
            .with(|cfg| cfg.has_path(&path, self.language_id()))
    }

    pub fn update(
        &self,
        section: &str,
        value: impl Into<Node>,
        target: impl Into<ConfigurationTarget>,
        override_in_language: bool,
    ) -> Result<()> {
        let path = self.nested_section(section);
        let value = value.into();
        let target = target.into();
        self.configuration.with_mut(|cfg| {
            cfg.update_path(&path, value, target, override_in_language, self.language_id())
        })
    }

    pub fn inspect(&self, _section: &str) -> Result<Inspection> {
        Err(ConfigError::unsupported("ScopedConfigurationView.inspect"))
    }
}
