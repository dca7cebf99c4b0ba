use std::fs;

use rayon::prelude::*;
use tracing::debug;

use crate::errors::DiscoveryError;
use crate::record::ModuleRecord;

/// Per-module marker filename whose presence signals a plugin.
pub const MARKER_FILE: &str = ".modkitrc";

/// Load marker-file configurations for records that lack an inline one.
///
/// Reads run on rayon's pool; collecting through `Result` preserves the
/// input order regardless of completion order and surfaces the first
/// error. A missing or unreadable marker is not an error, but a marker
/// that exists and fails to parse aborts the whole batch.
pub fn load_configs(records: Vec<ModuleRecord>) -> Result<Vec<ModuleRecord>, DiscoveryError> {
    records.into_par_iter().map(load_one).collect()
}

fn load_one(mut record: ModuleRecord) -> Result<ModuleRecord, DiscoveryError> {
    // Inline descriptor configuration wins; the marker file is not consulted.
    if record.config.is_some() {
        return Ok(record);
    }

    let marker = record.realpath.join(MARKER_FILE);
    match fs::read(&marker) {
        Ok(bytes) => {
            let config =
                serde_json::from_slice(&bytes).map_err(|err| DiscoveryError::ConfigParse {
                    path: marker.clone(),
                    message: err.to_string(),
                })?;
            debug!("loaded marker config from {}", marker.display());
            record.config = Some(config);
            Ok(record)
        }
        Err(err) => {
            // Absent marker just means the module is not a plugin.
            debug!("no marker config at {}: {err}", marker.display());
            Ok(record)
        }
    }
}

/// Keep only the records that ended up with a configuration,
/// preserving their relative order.
pub fn filter_configured(records: Vec<ModuleRecord>) -> Vec<ModuleRecord> {
    records
        .into_iter()
        .filter(ModuleRecord::is_configured)
        .collect()
}
