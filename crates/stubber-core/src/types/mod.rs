//! Shared core types used across the configuration layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration scope levels.
///
/// Variants are declared from lowest to highest read precedence, so the
/// derived `Ord` matches the ranking `Global < Workspace < WorkspaceFolder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfigurationScope {
    /// User-wide settings.
    Global,
    /// Settings of the open workspace.
    Workspace,
    /// Settings of a single folder inside the workspace.
    WorkspaceFolder,
}

impl ConfigurationScope {
    /// Read precedence, first match wins.
    pub const PRECEDENCE: [ConfigurationScope; 3] = [
        ConfigurationScope::WorkspaceFolder,
        ConfigurationScope::Workspace,
        ConfigurationScope::Global,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationScope::Global => "Global",
            ConfigurationScope::Workspace => "Workspace",
            ConfigurationScope::WorkspaceFolder => "WorkspaceFolder",
        }
    }
}

impl fmt::Display for ConfigurationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
