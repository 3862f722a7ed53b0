use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::TreeConfig;
use crate::error::TreeError;

/// Directories never descended into.
const EXCLUDED_DIRECTORIES: &[&str] = &["node_modules", "dist", "build"];

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    /// Path relative to the project root; used as the component's origin.
    pub relative_path: PathBuf,
    pub extension: String,
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Lists component sources under `root_path` in a stable order.
    ///
    /// With scan directories configured, files outside them are never
    /// returned. Fails before walking anything if the configuration is invalid.
    pub fn scan_directory(
        &self,
        root_path: &Path,
        config: &TreeConfig,
    ) -> Result<Vec<FileInfo>, TreeError> {
        let scope = config.resolve_scan_directories(root_path)?;

        let files: Vec<FileInfo> = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                scope
                    .as_ref()
                    .map_or(true, |dirs| dirs.iter().any(|dir| entry.path().starts_with(dir)))
            })
            .filter_map(|entry| {
                let path = entry.path();
                let extension = path.extension()?.to_str()?;
                if !config.extensions.iter().any(|ext| ext == extension) {
                    return None;
                }
                let relative_path = path
                    .strip_prefix(root_path)
                    .unwrap_or(path)
                    .to_path_buf();
                Some(FileInfo {
                    path: path.to_path_buf(),
                    relative_path,
                    extension: extension.to_string(),
                })
            })
            .collect();

        debug!(root = %root_path.display(), count = files.len(), "scan.complete");
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || EXCLUDED_DIRECTORIES.contains(&name))
}
