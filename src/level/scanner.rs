//! Finding levels to convert.
//!
//! A level is a `<name>.toml` manifest with a `<name>.stack.yaml` layer stack
//! next to it.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::stack::STACK_SUFFIX;

/// Path of the layer stack belonging to a level manifest.
pub fn stack_path_for(manifest: &Path) -> PathBuf {
    manifest.with_extension(&STACK_SUFFIX[1..])
}

/// Expand the given paths into level manifests.
///
/// Files are taken as-is; directories are walked recursively for `.toml`
/// files that have a layer stack beside them. The result is sorted and free
/// of duplicates.
pub fn discover_levels(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut levels = Vec::new();

    for path in paths {
        if path.is_dir() {
            levels.extend(scan_directory(path));
        } else {
            levels.push(path.clone());
        }
    }

    levels.sort();
    levels.dedup();
    levels
}

fn scan_directory(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| is_level_manifest(path))
        .collect()
}

fn is_level_manifest(path: &Path) -> bool {
    path.is_file()
        && path.extension().and_then(|e| e.to_str()) == Some("toml")
        && stack_path_for(path).is_file()
}
