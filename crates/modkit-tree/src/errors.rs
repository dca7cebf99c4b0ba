use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading an installed-module tree.
///
/// Variants carry the offending path plus a rendered message rather than
/// the source error so that cached outcomes can be cloned and replayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The supplied root does not exist or is not a directory.
    #[error("module root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Filesystem failure while scanning the tree.
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// A `package.json` existed but did not parse.
    #[error("malformed package manifest at {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },
}

impl TreeError {
    pub(crate) fn io(path: &Path, err: &io::Error) -> Self {
        TreeError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
