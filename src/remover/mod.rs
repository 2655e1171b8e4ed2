//! Per-artifact removal pipeline.
//!
//! Each artifact moves through: symbol extraction, registry purge,
//! deletion, build verification, and a report entry. The pipeline is
//! strictly sequential; one transaction owns the working tree at a time.

use crate::config::Config;
use crate::discovery::{Artifact, ArtifactKind};
use crate::registry::{RegistryFile, RegistryIndex};
use crate::usage;
use crate::verify::{Oracle, Verdict, Verifier};
use colored::Colorize;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Terminal status of one removal attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalStatus {
    /// Deleted, build passed, committed
    Deleted,
    /// Build failed, deletion reverted
    Kept,
    /// The deletion itself failed; verification skipped
    ErrorDeleting,
    /// Build failed and the rollback also failed; manual intervention needed
    ErrorReverting,
}

impl RemovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalStatus::Deleted => "deleted",
            RemovalStatus::Kept => "kept",
            RemovalStatus::ErrorDeleting => "error-deleting",
            RemovalStatus::ErrorReverting => "error-reverting",
        }
    }
}

/// One entry of the persisted audit log. Append-only, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalResult {
    pub target: PathBuf,
    pub kind: ArtifactKind,
    pub status: RemovalStatus,
}

/// Pipeline context for the artifact pass.
///
/// Owns the registry index, the processed-directory set, and the ordered
/// result sequence for the whole run.
pub struct Remover<'a, O: Oracle> {
    config: &'a Config,
    root: PathBuf,
    registries: RegistryIndex,
    verifier: Verifier<O>,
    processed_dirs: HashSet<PathBuf>,
    results: Vec<RemovalResult>,
}

impl<'a, O: Oracle> Remover<'a, O> {
    pub fn new(config: &'a Config, root: &Path, registries: RegistryIndex, oracle: O) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
            registries,
            verifier: Verifier::new(oracle),
            processed_dirs: HashSet::new(),
            results: Vec::new(),
        }
    }

    /// Run the full pipeline for one artifact
    pub fn process(&mut self, artifact: &Artifact) {
        let symbol = extract_symbol(&artifact.path);

        if let Some(symbol) = &symbol {
            self.purge_references(symbol);
        }

        let target = deletion_target(artifact);

        if artifact.kind.deletes_directory() && self.processed_dirs.contains(&target) {
            debug!("Already removed with its directory: {}", artifact.path.display());
            return;
        }

        let deleted = if artifact.kind.deletes_directory() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        };

        if let Err(e) = deleted {
            eprintln!(
                "  {} Error deleting {}: {}",
                "✗".red(),
                target.display(),
                e
            );
            self.record(&target, artifact.kind, RemovalStatus::ErrorDeleting);
            return;
        }

        let message = self.commit_message(artifact, symbol.as_deref(), &target);

        match self.verifier.verify(&message) {
            Ok(Verdict::Committed) => {
                if artifact.kind.deletes_directory() {
                    self.processed_dirs.insert(target.clone());
                }
                println!(
                    "  {} Deleted {} ({})",
                    "✓".green(),
                    target.display(),
                    artifact.kind
                );
                self.record(&target, artifact.kind, RemovalStatus::Deleted);
            }
            Ok(Verdict::RolledBack) => {
                println!(
                    "  {} Build failed after deleting {}, reverted",
                    "↩".yellow(),
                    target.display()
                );
                self.record(&target, artifact.kind, RemovalStatus::Kept);
            }
            Err(e) => {
                eprintln!(
                    "  {} Error reverting {}: {}",
                    "‼".red().bold(),
                    target.display(),
                    e
                );
                self.record(&target, artifact.kind, RemovalStatus::ErrorReverting);
            }
        }
    }

    /// Strip the symbol from every indexed registry.
    ///
    /// Registries are re-read from disk on every call: a previous rollback
    /// may have restored content an in-memory cache would misrepresent.
    fn purge_references(&self, symbol: &str) {
        for path in self.registries.paths() {
            let mut registry = match RegistryFile::load(path) {
                Ok(registry) => registry,
                Err(e) => {
                    warn!("Skipping registry {}: {e}", path.display());
                    continue;
                }
            };

            if !usage::is_referenced(registry.text(), symbol) {
                continue;
            }

            registry.strip_symbol(symbol);
            match registry.persist_if_changed() {
                Ok(true) => debug!("Purged {symbol} from {}", path.display()),
                Ok(false) => {}
                Err(e) => warn!("Failed to update registry {}: {e}", path.display()),
            }
        }
    }

    fn commit_message(&self, artifact: &Artifact, symbol: Option<&str>, target: &Path) -> String {
        let shown = source_relative(target, &self.root, &self.config.source_root);
        format!(
            "chore: Removed unused Angular {} ({}) at {}",
            artifact.kind,
            symbol.unwrap_or("unknown"),
            shown.display()
        )
    }

    fn record(&mut self, target: &Path, kind: ArtifactKind, status: RemovalStatus) {
        self.results.push(RemovalResult {
            target: target.to_path_buf(),
            kind,
            status,
        });
    }

    pub fn results(&self) -> &[RemovalResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<RemovalResult> {
        self.results
    }
}

/// The deletion target: the file itself, or the containing directory for
/// kinds whose policy says so.
fn deletion_target(artifact: &Artifact) -> PathBuf {
    if artifact.kind.deletes_directory() {
        artifact
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| artifact.path.clone())
    } else {
        artifact.path.clone()
    }
}

/// First `export class` identifier in the declaring file, if any.
/// Absence is not fatal; the registry purge is simply skipped.
fn extract_symbol(path: &Path) -> Option<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            return None;
        }
    };

    let class_re = Regex::new(r"export\s+class\s+(\w+)").expect("class pattern is valid");
    class_re
        .captures(&contents)
        .map(|caps| caps[1].to_string())
}

/// Truncate a path at the first segment equal to the source-root marker;
/// fall back to the root-relative path when the marker is absent.
fn source_relative(target: &Path, root: &Path, marker: &str) -> PathBuf {
    let components: Vec<_> = target.components().collect();
    if let Some(pos) = components
        .iter()
        .position(|c| c.as_os_str() == marker)
    {
        return components[pos..].iter().collect();
    }

    target
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| target.to_path_buf())
}
