use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use modkit_tree::{ModuleNode, PackageManifest};

/// A flattened view of one module in the installed-module tree.
///
/// `config` is seeded from the descriptor's inline `modkit` field and set
/// at most once more by the config loader; the other fields never change
/// after flattening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRecord {
    /// Plugin configuration, inline or loaded from the marker file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    /// The originating `package.json` descriptor.
    pub package: PackageManifest,
    /// Canonicalized path of the module directory.
    pub realpath: PathBuf,
}

impl ModuleRecord {
    pub fn from_node(node: &ModuleNode) -> Self {
        ModuleRecord {
            config: node.package.modkit.clone(),
            package: node.package.clone(),
            realpath: node.realpath.clone(),
        }
    }

    /// Whether this module is a recognized plugin.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}
