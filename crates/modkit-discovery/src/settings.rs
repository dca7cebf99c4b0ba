use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable overriding the default module root.
pub const ROOT_ENV: &str = "MODKIT_ROOT";

/// Environment variable capping traversal depth. Non-numeric or unset
/// values mean unbounded.
pub const MAX_DEPTH_ENV: &str = "MODKIT_MAX_DEPTH";

/// Discovery configuration, resolved once at orchestrator construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Default module root for calls that do not supply one.
    pub root: PathBuf,
    /// Maximum traversal depth; `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl DiscoverySettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DiscoverySettings {
            root: root.into(),
            max_depth: None,
        }
    }

    /// Resolve settings from the process environment: `MODKIT_ROOT` for
    /// the root (else the running executable's own directory, else the
    /// current directory) and `MODKIT_MAX_DEPTH` for the depth cap.
    pub fn from_env() -> Self {
        let root = env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_root);
        let max_depth = parse_max_depth(env::var(MAX_DEPTH_ENV).ok().as_deref());
        debug!(
            "resolved settings: root={}, max_depth={max_depth:?}",
            root.display()
        );
        DiscoverySettings { root, max_depth }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// The host program's own install directory, like the original tooling
/// this mirrors; falls back to the current directory.
fn default_root() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_max_depth(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_depth_numeric() {
        assert_eq!(parse_max_depth(Some("3")), Some(3));
        assert_eq!(parse_max_depth(Some(" 0 ")), Some(0));
    }

    #[test]
    fn test_parse_max_depth_unbounded_fallbacks() {
        assert_eq!(parse_max_depth(None), None);
        assert_eq!(parse_max_depth(Some("")), None);
        assert_eq!(parse_max_depth(Some("lots")), None);
        assert_eq!(parse_max_depth(Some("-1")), None);
    }

    #[test]
    fn test_builder_overrides() {
        let settings = DiscoverySettings::new("/tmp/modules").with_max_depth(Some(2));
        assert_eq!(settings.root, PathBuf::from("/tmp/modules"));
        assert_eq!(settings.max_depth, Some(2));
    }
}
