//! Layered configuration engine
//!
//! A configuration is split into three scopes, each holding a nested
//! key/value tree addressed by dotted sections:
//! - WorkspaceFolder: most specific, read first
//! - Workspace
//! - Global: read last
//!
//! Any number of per-language overlays may sit beside the base scopes.

pub mod descriptor;
pub mod layered;
pub mod nested;
pub mod node;
pub mod precedence;
pub mod snapshot;
pub mod target;
pub mod view;

pub use descriptor::language_id_from_scope;
pub use layered::{Inspection, LayeredConfiguration};
pub use nested::{nested_get, nested_has, nested_set};
pub use node::{Branch, Node, split_section};
pub use precedence::ScopeStores;
pub use snapshot::{load_snapshot, save_snapshot};
pub use target::{ConfigurationTarget, resolve_target};
pub use view::{ScopedConfigurationView, SharedConfiguration};
