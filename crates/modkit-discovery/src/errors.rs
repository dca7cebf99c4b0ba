use std::path::PathBuf;
use thiserror::Error;

use modkit_tree::TreeError;

use crate::configs::MARKER_FILE;

/// Errors surfaced by the discovery pipeline.
///
/// `Clone` because outcomes, including errors, are memoized per root and
/// replayed on later calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Propagated verbatim from the tree source; aborts immediately.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A marker file existed but did not parse. Aborts the whole batch;
    /// no partial results are kept.
    #[error("malformed {} at {}: {message}", MARKER_FILE, .path.display())]
    ConfigParse { path: PathBuf, message: String },
}
