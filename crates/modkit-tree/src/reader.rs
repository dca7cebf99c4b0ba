use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::TreeError;
use crate::manifest::PackageManifest;

/// Per-module descriptor filename.
pub const MANIFEST_FILE: &str = "package.json";

/// Subdirectory holding a module's installed dependencies.
pub const MODULES_DIR: &str = "node_modules";

/// One node of the installed-module tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleNode {
    /// The module's `package.json` descriptor.
    pub package: PackageManifest,
    /// Canonicalized filesystem path of the module directory.
    pub realpath: PathBuf,
    /// Nested modules from `node_modules/`, sorted by name.
    pub children: Vec<ModuleNode>,
}

/// Read the installed-module tree rooted at `root`.
///
/// The root itself becomes the tree's single root node; a missing root
/// `package.json` yields an empty descriptor so a bare module directory can
/// still be scanned. Children are the `node_modules/` entries that carry a
/// `package.json`, with scope directories (`@scope/`) descended one level.
/// A symlinked module whose real path was already visited is skipped, so
/// every realpath appears exactly once and link cycles terminate.
pub fn read_module_tree(root: &Path) -> Result<ModuleNode, TreeError> {
    if !root.is_dir() {
        return Err(TreeError::RootNotFound(root.to_path_buf()));
    }

    debug!("reading module tree at {}", root.display());
    let realpath = fs::canonicalize(root).map_err(|err| TreeError::io(root, &err))?;
    let package = read_manifest(&realpath)?;

    let mut seen = HashSet::new();
    seen.insert(realpath.clone());
    let children = read_children(&realpath, &mut seen)?;

    Ok(ModuleNode {
        package,
        realpath,
        children,
    })
}

/// Read one child module, or `None` when its real path was already visited.
fn read_node(dir: &Path, seen: &mut HashSet<PathBuf>) -> Result<Option<ModuleNode>, TreeError> {
    let realpath = fs::canonicalize(dir).map_err(|err| TreeError::io(dir, &err))?;
    if !seen.insert(realpath.clone()) {
        debug!("already visited {}, skipping duplicate", realpath.display());
        return Ok(None);
    }

    let package = read_manifest(&realpath)?;
    let children = read_children(&realpath, seen)?;

    Ok(Some(ModuleNode {
        package,
        realpath,
        children,
    }))
}

fn read_manifest(dir: &Path) -> Result<PackageManifest, TreeError> {
    let path = dir.join(MANIFEST_FILE);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(PackageManifest::default());
        }
        Err(err) => return Err(TreeError::io(&path, &err)),
    };

    serde_json::from_slice(&bytes).map_err(|err| TreeError::ManifestParse {
        path,
        message: err.to_string(),
    })
}

/// Collect the child module directories of `dir`, sorted by name.
fn read_children(dir: &Path, seen: &mut HashSet<PathBuf>) -> Result<Vec<ModuleNode>, TreeError> {
    let modules_dir = dir.join(MODULES_DIR);
    if !modules_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut module_dirs: Vec<(String, PathBuf)> = Vec::new();
    for entry in list_dir(&modules_dir)? {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        if name.starts_with('@') {
            // Scope directory: its subdirectories are the actual modules.
            for scoped in list_dir(&path)? {
                let scoped_name = scoped.file_name().to_string_lossy().to_string();
                if scoped_name.starts_with('.') {
                    continue;
                }
                let scoped_path = scoped.path();
                if is_module_dir(&scoped_path) {
                    module_dirs.push((format!("{name}/{scoped_name}"), scoped_path));
                }
            }
        } else if is_module_dir(&path) {
            module_dirs.push((name, path));
        }
    }

    module_dirs.sort_by(|a, b| a.0.cmp(&b.0));

    module_dirs
        .into_iter()
        .filter_map(|(_, path)| read_node(&path, seen).transpose())
        .collect()
}

fn list_dir(dir: &Path) -> Result<Vec<fs::DirEntry>, TreeError> {
    let entries = fs::read_dir(dir).map_err(|err| TreeError::io(dir, &err))?;
    entries
        .map(|entry| entry.map_err(|err| TreeError::io(dir, &err)))
        .collect()
}

/// A directory is a module only when it carries a descriptor.
fn is_module_dir(path: &Path) -> bool {
    path.is_dir() && path.join(MANIFEST_FILE).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_module(dir: &Path, name: &str, version: &str) {
        assert!(fs::create_dir_all(dir).is_ok());
        assert!(fs::write(
            dir.join(MANIFEST_FILE),
            format!(r#"{{"name":"{name}","version":"{version}"}}"#),
        )
        .is_ok());
    }

    fn child_names(node: &ModuleNode) -> Vec<String> {
        node.children
            .iter()
            .map(|c| c.package.name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = read_module_tree(Path::new("/nonexistent/modkit-root"));
        assert!(matches!(result, Err(TreeError::RootNotFound(_))));
    }

    #[test]
    fn test_root_without_manifest_gets_empty_descriptor() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let tree = read_module_tree(temp_dir.path());
        assert!(tree.is_ok());
        assert!(tree.is_ok_and(|t| t.package == PackageManifest::default() && t.children.is_empty()));
    }

    #[test]
    fn test_children_sorted_by_name() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        write_module(&root.join(MODULES_DIR).join("zeta"), "zeta", "0.1.0");
        write_module(&root.join(MODULES_DIR).join("alpha"), "alpha", "0.2.0");

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        let Ok(tree) = tree else { return };
        assert_eq!(child_names(&tree), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_scoped_modules_are_descended() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        write_module(
            &root.join(MODULES_DIR).join("@acme").join("widget"),
            "@acme/widget",
            "2.0.0",
        );
        write_module(&root.join(MODULES_DIR).join("plain"), "plain", "1.0.0");

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        let Ok(tree) = tree else { return };
        // "@acme/widget" sorts before "plain"
        assert_eq!(child_names(&tree), vec!["@acme/widget", "plain"]);
    }

    #[test]
    fn test_non_module_entries_are_skipped() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        let modules = root.join(MODULES_DIR);
        write_module(&modules.join("real"), "real", "1.0.0");
        // A dotted directory, a bare directory, and a stray file
        assert!(fs::create_dir_all(modules.join(".bin")).is_ok());
        assert!(fs::create_dir_all(modules.join("not-a-module")).is_ok());
        assert!(fs::write(modules.join("README.md"), "junk").is_ok());

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        let Ok(tree) = tree else { return };
        assert_eq!(child_names(&tree), vec!["real"]);
    }

    #[test]
    fn test_nested_modules_recurse() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        let child = root.join(MODULES_DIR).join("child");
        write_module(&child, "child", "1.0.0");
        write_module(
            &child.join(MODULES_DIR).join("grandchild"),
            "grandchild",
            "1.0.0",
        );

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        let Ok(tree) = tree else { return };
        assert_eq!(tree.children.len(), 1);
        assert_eq!(child_names(&tree.children[0]), vec!["grandchild"]);
    }

    #[test]
    fn test_malformed_manifest_aborts() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        let broken = root.join(MODULES_DIR).join("broken");
        assert!(fs::create_dir_all(&broken).is_ok());
        assert!(fs::write(broken.join(MANIFEST_FILE), "{bad").is_ok());

        let result = read_module_tree(root);
        assert!(matches!(result, Err(TreeError::ManifestParse { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_skipped() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        let linked = root.join(MODULES_DIR).join("linked");
        assert!(fs::create_dir_all(root.join(MODULES_DIR)).is_ok());
        // Link a module back to the root so the tree would loop forever
        // without realpath tracking.
        assert!(std::os::unix::fs::symlink(root, &linked).is_ok());

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        assert!(tree.is_ok_and(|t| t.children.is_empty()));
    }

    #[cfg(unix)]
    #[test]
    fn test_aliased_symlinks_emit_one_node() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        // Two install names aliasing the same store directory must yield a
        // single module, keeping realpaths unique across the tree.
        let store = root.join("store").join("shared");
        write_module(&store, "shared", "1.0.0");
        let modules = root.join(MODULES_DIR);
        assert!(fs::create_dir_all(&modules).is_ok());
        assert!(std::os::unix::fs::symlink(&store, modules.join("alias-a")).is_ok());
        assert!(std::os::unix::fs::symlink(&store, modules.join("alias-b")).is_ok());

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        let Ok(tree) = tree else { return };
        assert_eq!(child_names(&tree), vec!["shared"]);

        let mut paths = vec![tree.realpath.clone()];
        paths.extend(tree.children.iter().map(|c| c.realpath.clone()));
        let unique: HashSet<&PathBuf> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn test_realpaths_are_canonical_and_unique() {
        let Ok(temp_dir) = TempDir::new() else { return };
        let root = temp_dir.path();
        write_module(root, "app", "1.0.0");
        write_module(&root.join(MODULES_DIR).join("a"), "a", "1.0.0");
        write_module(&root.join(MODULES_DIR).join("b"), "b", "1.0.0");

        let tree = read_module_tree(root);
        assert!(tree.is_ok());
        let Ok(tree) = tree else { return };
        let mut paths: Vec<&PathBuf> = tree.children.iter().map(|c| &c.realpath).collect();
        paths.push(&tree.realpath);
        let unique: HashSet<&PathBuf> = paths.iter().copied().collect();
        assert_eq!(unique.len(), paths.len());
    }
}
