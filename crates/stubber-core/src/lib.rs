//! Stubber Core Library
//!
//! Emulates an editor's hierarchical settings store: dotted sections over
//! nested trees, three precedence-ranked scopes, per-language overlays and
//! section-rooted views.

pub mod configuration;
pub mod error;
pub mod stub;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::configuration::{
        Branch, ConfigurationTarget, LayeredConfiguration, Node, ScopedConfigurationView,
        SharedConfiguration,
    };

    // Errors
    pub use crate::error::{ConfigError, Result};

    // Verification
    pub use crate::stub::ConfigurationStub;

    // Scopes
    pub use crate::types::ConfigurationScope;
}
