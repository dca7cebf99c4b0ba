use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::errors::DiscoveryError;
use crate::record::ModuleRecord;

/// The memoized outcome of one pipeline run.
pub type Outcome = Result<Arc<Vec<ModuleRecord>>, DiscoveryError>;

/// Compute-once-per-key result cache.
///
/// The first stored outcome for a key, success or error, is replayed for
/// every later call for the lifetime of the owner. Never invalidated.
/// Computation runs outside the lock so a slow scan of one root does not
/// stall lookups for other roots; racing first-calls for the same key may
/// duplicate work, and the first outcome to land wins.
#[derive(Default)]
pub struct ResultCache {
    entries: Mutex<HashMap<PathBuf, Outcome>>,
}

impl ResultCache {
    pub fn get_or_compute(&self, key: &Path, compute: impl FnOnce() -> Outcome) -> Outcome {
        if let Some(outcome) = self.entries.lock().get(key) {
            debug!("cache hit for {}", key.display());
            return outcome.clone();
        }

        let outcome = compute();
        self.entries
            .lock()
            .entry(key.to_path_buf())
            .or_insert(outcome)
            .clone()
    }
}
