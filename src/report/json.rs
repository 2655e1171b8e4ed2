use crate::remover::RemovalResult;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;

/// Writes the artifact pass audit log: the ordered result records,
/// serialized verbatim as a JSON array.
pub struct JsonReporter {
    output_path: PathBuf,
}

impl JsonReporter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn write(&self, results: &[RemovalResult]) -> Result<()> {
        let json = serde_json::to_string_pretty(results).into_diagnostic()?;

        std::fs::write(&self.output_path, json)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write report: {}", self.output_path.display()))?;

        println!("Results saved to {}", self.output_path.display());
        Ok(())
    }
}
