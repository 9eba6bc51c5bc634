use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::metadata::CoreMetadata;
use super::PackageRegistry;
use crate::models::RawPackageInfo;

const SYS_PATH_SCRIPT: &str = "import json, sys; print(json.dumps(sys.path))";

/// Registry over installed distributions found in site-packages style directories.
///
/// Roots are searched in order; within a root, entries are visited by file name.
/// `*.dist-info/METADATA`, `*.egg-info/PKG-INFO`, and plain `*.egg-info` files
/// are recognized. The roots are scanned once, on first use.
pub struct SitePackagesRegistry {
    roots: Vec<PathBuf>,
    scan: OnceCell<Scan>,
}

/// Metadata files found under the search roots.
#[derive(Debug, Default)]
struct Scan {
    /// In search order.
    files: Vec<PathBuf>,
    /// Normalized distribution name to the first matching file.
    by_name: HashMap<String, PathBuf>,
}

impl SitePackagesRegistry {
    /// Create a registry over explicit search roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            scan: OnceCell::new(),
        }
    }

    /// Create a registry over the `sys.path` of the given interpreter.
    pub fn discover(python: &str) -> Result<Self> {
        let roots = interpreter_search_path(python)?;
        debug!("Using {} search roots from {}", roots.len(), python);
        Ok(Self::new(roots))
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn scan(&self) -> &Scan {
        self.scan.get_or_init(|| scan_roots(&self.roots))
    }
}

impl PackageRegistry for SitePackagesRegistry {
    fn list_installed(&self) -> Vec<RawPackageInfo> {
        self.scan()
            .files
            .iter()
            .filter_map(|path| {
                let info = read_package_info(path);
                if info.is_none() {
                    debug!("No usable metadata in {}", path.display());
                }
                info
            })
            .collect()
    }

    fn get_metadata(&self, name: &str) -> Option<RawPackageInfo> {
        self.scan()
            .by_name
            .get(&normalize_name(name))
            .and_then(|path| read_package_info(path))
    }
}

fn scan_roots(roots: &[PathBuf]) -> Scan {
    let mut scan = Scan::default();

    for root in roots {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping search root {}: {}", root.display(), e);
                continue;
            }
        };

        let mut entries: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        for path in entries {
            if let Some((stem, metadata)) = metadata_file(&path) {
                scan.by_name
                    .entry(normalize_name(&stem))
                    .or_insert_with(|| metadata.clone());
                scan.files.push(metadata);
            }
        }
    }

    debug!("Found {} distributions", scan.files.len());
    scan
}

/// Locate the metadata file of a `*.dist-info` / `*.egg-info` entry.
///
/// Returns the name part of the entry (everything before the first `-`) with the file.
fn metadata_file(path: &Path) -> Option<(String, PathBuf)> {
    let file_name = path.file_name()?.to_str()?;

    let (stem, metadata) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
        (stem, path.join("METADATA"))
    } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
        if path.is_dir() {
            (stem, path.join("PKG-INFO"))
        } else {
            (stem, path.to_path_buf())
        }
    } else {
        return None;
    };

    if !metadata.is_file() {
        return None;
    }

    let name = stem.split('-').next().unwrap_or(stem);
    Some((name.to_string(), metadata))
}

fn read_package_info(path: &Path) -> Option<RawPackageInfo> {
    let bytes = fs::read(path).ok()?;
    CoreMetadata::parse(&String::from_utf8_lossy(&bytes)).into_package_info()
}

/// Lowercase, with runs of `-`, `_` and `.` collapsed to a single `_`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('_');
            }
            in_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }

    normalized
}

/// Ask `python` for its `sys.path`, keeping existing directories in order.
fn interpreter_search_path(python: &str) -> Result<Vec<PathBuf>> {
    let output = Command::new(python)
        .args(["-c", SYS_PATH_SCRIPT])
        .output()
        .with_context(|| {
            format!(
                "Failed to run '{}'. Is Python installed? Use --python or --path to point at an environment",
                python
            )
        })?;

    if !output.status.success() {
        bail!(
            "'{}' exited with {}: {}",
            python,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    parse_sys_path(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("Unexpected sys.path output from '{}'", python))
}

fn parse_sys_path(stdout: &str) -> Result<Vec<PathBuf>> {
    let entries: Vec<String> = serde_json::from_str(stdout.trim())?;

    Ok(entries
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
        .collect())
}
