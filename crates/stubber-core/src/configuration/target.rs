//! Normalizes the loose "which scope to write" argument.

use crate::types::ConfigurationScope;

/// Write target as callers express it: an explicit scope, the legacy boolean
/// shorthand, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigurationTarget {
    Scope(ConfigurationScope),
    /// `true` means user/global settings, `false` means workspace settings.
    Legacy(bool),
    #[default]
    Unspecified,
}

impl ConfigurationTarget {
    pub fn resolve(self) -> ConfigurationScope {
        resolve_target(self)
    }
}

pub fn resolve_target(target: ConfigurationTarget) -> ConfigurationScope {
    match target {
        ConfigurationTarget::Scope(ConfigurationScope::Global) => ConfigurationScope::Global,
        ConfigurationTarget::Scope(ConfigurationScope::Workspace) => ConfigurationScope::Workspace,
        ConfigurationTarget::Scope(ConfigurationScope::WorkspaceFolder) => {
            ConfigurationScope::WorkspaceFolder
        }
        ConfigurationTarget::Legacy(true) => ConfigurationScope::Global,
        ConfigurationTarget::Legacy(false) => ConfigurationScope::Workspace,
        ConfigurationTarget::Unspecified => ConfigurationScope::WorkspaceFolder,
    }
}

impl From<ConfigurationScope> for ConfigurationTarget {
    fn from(scope: ConfigurationScope) -> Self {
        ConfigurationTarget::Scope(scope)
    }
}

impl From<bool> for ConfigurationTarget {
    fn from(value: bool) -> Self {
        ConfigurationTarget::Legacy(value)
    }
}

impl From<Option<ConfigurationScope>> for ConfigurationTarget {
    fn from(scope: Option<ConfigurationScope>) -> Self {
        scope.map_or(ConfigurationTarget::Unspecified, ConfigurationTarget::Scope)
    }
}

impl From<Option<bool>> for ConfigurationTarget {
    fn from(value: Option<bool>) -> Self {
        value.map_or(ConfigurationTarget::Unspecified, ConfigurationTarget::Legacy)
    }
}

impl From<()> for ConfigurationTarget {
    fn from(_: ()) -> Self {
        ConfigurationTarget::Unspecified
    }
}
