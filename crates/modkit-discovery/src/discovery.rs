use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use modkit_tree::read_module_tree;

use crate::cache::ResultCache;
use crate::configs::{filter_configured, load_configs};
use crate::errors::DiscoveryError;
use crate::flatten::flatten;
use crate::record::ModuleRecord;
use crate::settings::DiscoverySettings;

/// Pipeline orchestrator: tree read → flatten → (config load → filter).
///
/// Each operation memoizes its outcome per resolved root for the lifetime
/// of this instance, success and error alike. A cached result is replayed
/// without touching the filesystem, even if the tree has since changed;
/// that staleness is a deliberate trade-off, inherited from the system
/// this indexes for.
pub struct Discovery {
    settings: DiscoverySettings,
    modules: ResultCache,
    plugins: ResultCache,
}

impl Discovery {
    /// Orchestrator with environment-resolved settings.
    pub fn new() -> Self {
        Self::with_settings(DiscoverySettings::from_env())
    }

    pub fn with_settings(settings: DiscoverySettings) -> Self {
        Discovery {
            settings,
            modules: ResultCache::default(),
            plugins: ResultCache::default(),
        }
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    /// Every module beneath the root, in pre-order.
    ///
    /// `root` defaults to the configured root when omitted.
    pub fn list_modules(
        &self,
        root: Option<&Path>,
    ) -> Result<Arc<Vec<ModuleRecord>>, DiscoveryError> {
        let root = self.resolve_root(root);
        self.modules.get_or_compute(&root, || {
            let tree = read_module_tree(&root)?;
            let records = flatten(&tree, self.settings.max_depth);
            info!("discovered {} modules under {}", records.len(), root.display());
            Ok(Arc::new(records))
        })
    }

    /// Only the modules that carry a plugin configuration, inline or from
    /// the marker file, in pre-order.
    pub fn list_plugin_modules(
        &self,
        root: Option<&Path>,
    ) -> Result<Arc<Vec<ModuleRecord>>, DiscoveryError> {
        let root = self.resolve_root(root);
        self.plugins.get_or_compute(&root, || {
            let tree = read_module_tree(&root)?;
            let records = flatten(&tree, self.settings.max_depth);
            let records = filter_configured(load_configs(records)?);
            info!(
                "discovered {} plugin modules under {}",
                records.len(),
                root.display()
            );
            Ok(Arc::new(records))
        })
    }

    fn resolve_root(&self, root: Option<&Path>) -> PathBuf {
        root.map_or_else(|| self.settings.root.clone(), Path::to_path_buf)
    }
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}
