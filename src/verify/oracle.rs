use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// Oracle errors
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("failed to invoke '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("commit failed: {0}")]
    Commit(String),
    #[error("reset failed: {0}")]
    Reset(String),
}

/// External capabilities the verifier depends on: one build command as the
/// correctness oracle, and version control as the transaction log.
pub trait Oracle {
    /// Run the build; `Ok(true)` iff it exited successfully
    fn build(&self) -> Result<bool, OracleError>;

    /// Stage all working-tree changes and commit them
    fn commit(&self, message: &str) -> Result<(), OracleError>;

    /// Discard all working-tree changes, untracked files included
    fn reset(&self) -> Result<(), OracleError>;
}

/// Oracle backed by real processes: the configured build command and git
pub struct ProcessOracle {
    root: PathBuf,
    build_command: String,
}

impl ProcessOracle {
    pub fn new(root: &Path, build_command: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            build_command: build_command.to_string(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output, OracleError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| OracleError::Spawn {
                command: format!("git {}", args.join(" ")),
                source,
            })
    }
}

impl Oracle for ProcessOracle {
    fn build(&self) -> Result<bool, OracleError> {
        debug!("Running build: {}", self.build_command);

        // Output is suppressed; only the exit status matters
        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.build_command)
            .current_dir(&self.root)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| OracleError::Spawn {
                command: self.build_command.clone(),
                source,
            })?;

        Ok(status.success())
    }

    fn commit(&self, message: &str) -> Result<(), OracleError> {
        let add = self.git(&["add", "-A"])?;
        if !add.status.success() {
            return Err(OracleError::Commit(
                String::from_utf8_lossy(&add.stderr).trim().to_string(),
            ));
        }

        let commit = self.git(&["commit", "-m", message])?;
        if !commit.status.success() {
            return Err(OracleError::Commit(
                String::from_utf8_lossy(&commit.stderr).trim().to_string(),
            ));
        }

        debug!("Committed: {message}");
        Ok(())
    }

    fn reset(&self) -> Result<(), OracleError> {
        let reset = self.git(&["reset", "--hard", "HEAD"])?;
        if !reset.status.success() {
            return Err(OracleError::Reset(
                String::from_utf8_lossy(&reset.stderr).trim().to_string(),
            ));
        }

        // reset --hard leaves untracked files behind; sweep those too
        let clean = self.git(&["clean", "-fd"])?;
        if !clean.status.success() {
            return Err(OracleError::Reset(
                String::from_utf8_lossy(&clean.stderr).trim().to_string(),
            ));
        }

        debug!("Working tree restored to HEAD");
        Ok(())
    }
}
