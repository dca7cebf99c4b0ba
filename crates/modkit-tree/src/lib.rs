//! Installed-module tree reading for the modkit plugin system.
//!
//! Extension modules are installed as packages beneath a root directory in
//! an npm-style layout: each module directory carries a `package.json`
//! descriptor and nests its own dependencies under `node_modules/`. This
//! crate materializes that layout into a [`ModuleNode`] tree with resolved
//! real paths, ready for flattening and plugin discovery downstream.

pub mod errors;
pub mod manifest;
pub mod reader;

pub use errors::TreeError;
pub use manifest::PackageManifest;
pub use reader::{read_module_tree, ModuleNode, MANIFEST_FILE, MODULES_DIR};
