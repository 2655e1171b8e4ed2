//! Per-component method pruning.
//!
//! Usage counts are always taken against the live, post-removal text, so
//! removing one method can legitimately turn a later one unused within the
//! same pass over the unit.

mod methods;

pub use methods::{enumerate_methods, find_component_class, ComponentClass, MethodSpan};

use crate::usage::{self, MethodUsage};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A method kept during pruning, with its measured usage in both scopes
#[derive(Debug, Clone)]
pub struct KeptMethod {
    pub name: String,
    /// Call sites in the unit beyond the declaration itself
    pub own_uses: usize,
    /// Occurrences in the companion markup
    pub markup_uses: usize,
}

/// Per-unit outcome of the method pass
#[derive(Debug, Clone)]
pub struct PruneReport {
    pub file: PathBuf,
    pub removed: Vec<String>,
    pub kept: Vec<KeptMethod>,
    /// No qualifying component class was found in the unit
    pub skipped: bool,
}

impl PruneReport {
    fn skipped(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            removed: Vec::new(),
            kept: Vec::new(),
            skipped: true,
        }
    }
}

/// Method pruner for component units
pub struct Pruner {
    dry_run: bool,
}

impl Pruner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Prune one component unit and persist it.
    ///
    /// The unit is written back unconditionally unless this is a dry run,
    /// even when no method was removed.
    pub fn prune_unit(&self, path: &Path) -> Result<PruneReport> {
        let mut text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read component: {}", path.display()))?;

        // Companion markup is optional; absence just means an empty scope
        let markup_path = markup_path(path);
        let markup = std::fs::read_to_string(&markup_path).unwrap_or_default();
        if markup.is_empty() {
            trace!("No companion markup at {}", markup_path.display());
        }

        if find_component_class(&text).is_none() {
            debug!("No component class in {}, skipping", path.display());
            return Ok(PruneReport::skipped(path));
        }

        let mut removed = Vec::new();
        let mut kept = Vec::new();
        let mut index = 0;

        loop {
            let Some(class) = find_component_class(&text) else {
                break;
            };
            let methods = enumerate_methods(&text, &class);
            let Some(method) = methods.get(index) else {
                break;
            };

            if usage::is_reserved_method(&method.name) {
                trace!("Skipping lifecycle method: {}", method.name);
                index += 1;
                continue;
            }

            let measured = MethodUsage::measure(&text, &markup, &method.name);
            if measured.is_unused() {
                debug!("Removing unused method: {}", method.name);
                let span = method.clone();
                text.replace_range(span.start..span.end, "");
                removed.push(span.name);
                // Spans shifted; the next method now sits at this index
            } else {
                kept.push(KeptMethod {
                    name: method.name.clone(),
                    own_uses: measured.own_call_sites(),
                    markup_uses: measured.markup,
                });
                index += 1;
            }
        }

        if !self.dry_run {
            std::fs::write(path, &text)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write component: {}", path.display()))?;
        }

        Ok(PruneReport {
            file: path.to_path_buf(),
            removed,
            kept,
            skipped: false,
        })
    }
}

/// Companion markup lives at the same base path with an html extension
fn markup_path(path: &Path) -> PathBuf {
    path.with_extension("html")
}
