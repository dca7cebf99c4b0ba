//! Plugin-module discovery for the modkit extension system.
//!
//! This crate turns an installed-module tree into flat module lists for
//! other tooling to consume. The pipeline is: read the tree
//! ([`modkit_tree::read_module_tree`]) → flatten it pre-order up to a
//! configurable depth → load `.modkitrc` marker configurations → filter to
//! the modules that carry one. [`Discovery`] sequences the stages and
//! memoizes each operation's outcome per root for its own lifetime.

pub mod cache;
pub mod configs;
pub mod discovery;
pub mod errors;
pub mod flatten;
pub mod record;
pub mod settings;

pub use configs::{filter_configured, load_configs, MARKER_FILE};
pub use discovery::Discovery;
pub use errors::DiscoveryError;
pub use flatten::flatten;
pub use record::ModuleRecord;
pub use settings::{DiscoverySettings, MAX_DEPTH_ENV, ROOT_ENV};

// Re-export the tree types for convenience
pub use modkit_tree::{read_module_tree, ModuleNode, PackageManifest, TreeError};
