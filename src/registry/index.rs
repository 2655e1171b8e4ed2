use crate::config::Config;
use ignore::WalkBuilder;
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Filename suffix identifying an NgModule registry file
pub const REGISTRY_SUFFIX: &str = ".module.ts";

/// Index of registry file paths, gathered once at startup.
///
/// Only the path list is cached. Contents are re-read from disk for every
/// removal so that a rolled-back transaction never leaves a stale buffer
/// behind.
#[derive(Debug)]
pub struct RegistryIndex {
    paths: Vec<PathBuf>,
}

impl RegistryIndex {
    /// Enumerate all registry files under the given root
    pub fn discover(root: &Path, config: &Config) -> Result<Self> {
        debug!("Indexing registry files in: {}", root.display());

        let targets = if config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            config.targets.iter().map(|t| root.join(t)).collect()
        };

        let mut paths: Vec<PathBuf> = targets
            .par_iter()
            .flat_map(|target| scan_directory(target, config))
            .collect();

        paths.sort();

        debug!("Indexed {} registry file(s)", paths.len());
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn scan_directory(dir: &Path, config: &Config) -> Vec<PathBuf> {
    if !dir.exists() {
        trace!("Directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .follow_links(false)
        .build();

    walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let path = entry.path();

            if config.should_exclude(path) {
                return None;
            }

            let file_name = path.file_name()?.to_str()?;
            if !file_name.ends_with(REGISTRY_SUFFIX) {
                return None;
            }

            trace!("Found registry: {}", path.display());
            Some(path.to_path_buf())
        })
        .collect()
}

/// A registry file loaded as a mutable text buffer
#[derive(Debug)]
pub struct RegistryFile {
    pub path: PathBuf,
    text: String,
    dirty: bool,
}

impl RegistryFile {
    /// Load a registry fresh from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read registry: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            text,
            dirty: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Strip every reference to a symbol. Returns true if the buffer changed.
    pub fn strip_symbol(&mut self, symbol: &str) -> bool {
        let updated = super::remove_symbol(&self.text, symbol);
        if updated != self.text {
            self.text = updated;
            self.dirty = true;
        }
        self.dirty
    }

    /// Write the buffer back only if it was modified
    pub fn persist_if_changed(&self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        std::fs::write(&self.path, &self.text)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to update registry: {}", self.path.display()))?;
        Ok(true)
    }
}
