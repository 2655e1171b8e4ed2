use crate::pruner::PruneReport;
use crate::remover::{RemovalResult, RemovalStatus};
use colored::Colorize;

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    /// Print the artifact pass summary
    pub fn removal_summary(&self, results: &[RemovalResult]) {
        if results.is_empty() {
            println!("{}", "No removable artifacts found.".green().bold());
            return;
        }

        println!();
        println!("{}", "Summary:".bold());

        let mut deleted = 0;
        let mut kept = 0;
        let mut errors = 0;

        for result in results {
            let status = match result.status {
                RemovalStatus::Deleted => {
                    deleted += 1;
                    result.status.as_str().green()
                }
                RemovalStatus::Kept => {
                    kept += 1;
                    result.status.as_str().yellow()
                }
                RemovalStatus::ErrorDeleting => {
                    errors += 1;
                    result.status.as_str().red()
                }
                RemovalStatus::ErrorReverting => {
                    errors += 1;
                    result.status.as_str().red().bold()
                }
            };
            println!(
                "  {} ({}): {}",
                result.target.display(),
                result.kind,
                status
            );
        }

        println!();
        println!(
            "{}",
            format!("{deleted} deleted, {kept} kept, {errors} error(s)").dimmed()
        );

        // Rollback failures need eyes on the working tree
        if results
            .iter()
            .any(|r| r.status == RemovalStatus::ErrorReverting)
        {
            println!();
            println!(
                "{}",
                "Some rollbacks failed - inspect `git status` before continuing."
                    .red()
                    .bold()
            );
        }
    }

    /// Print one per-unit record of the method pass
    pub fn prune_report(&self, report: &PruneReport) {
        println!("{}", report.file.display().to_string().cyan().bold());

        if report.skipped {
            println!("  {}", "Skipped: no component class found.".dimmed());
            return;
        }

        if report.removed.is_empty() {
            println!("  Removed methods: {}", "None".dimmed());
        } else {
            println!(
                "  Removed methods: {}",
                report.removed.join(", ").yellow()
            );
        }

        if report.kept.is_empty() {
            println!("  Kept methods: {}", "None".dimmed());
        } else {
            println!("  Kept methods:");
            for method in &report.kept {
                println!(
                    "    {} (unit usage: {}, markup usage: {})",
                    method.name,
                    method.own_uses,
                    method.markup_uses
                );
            }
        }
    }

    /// Print the method pass totals
    pub fn prune_summary(&self, reports: &[PruneReport]) {
        let removed: usize = reports.iter().map(|r| r.removed.len()).sum();
        let skipped = reports.iter().filter(|r| r.skipped).count();

        println!();
        println!(
            "{}",
            format!(
                "{} unit(s) processed, {} method(s) removed, {} skipped",
                reports.len(),
                removed,
                skipped
            )
            .dimmed()
        );
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
