//! Build-then-commit-or-revert gate.
//!
//! Each destructive edit is verified by one external build. Success stages
//! and commits the whole working tree; failure resets it to HEAD. After
//! [`Verifier::verify`] returns, the tree is in exactly one of those two
//! states. Nothing in between survives.

mod oracle;

pub use oracle::{Oracle, OracleError, ProcessOracle};

use tracing::{debug, warn};

/// Outcome of one verification cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Build passed, working tree committed
    Committed,
    /// Build failed, working tree restored to HEAD
    RolledBack,
}

/// Transactional verifier over an injected oracle
pub struct Verifier<O: Oracle> {
    oracle: O,
}

impl<O: Oracle> Verifier<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Run the build and settle the working tree.
    ///
    /// An `Err` means the rollback itself failed: the tree may hold a
    /// half-applied transaction and needs manual inspection.
    pub fn verify(&self, message: &str) -> Result<Verdict, OracleError> {
        let built = match self.oracle.build() {
            Ok(built) => built,
            Err(e) => {
                warn!("Build invocation failed: {e}");
                false
            }
        };

        if !built {
            debug!("Build failed, rolling back");
            self.oracle.reset()?;
            return Ok(Verdict::RolledBack);
        }

        match self.oracle.commit(message) {
            Ok(()) => Ok(Verdict::Committed),
            Err(e) => {
                warn!("Commit failed after passing build: {e}");
                self.oracle.reset()?;
                Ok(Verdict::RolledBack)
            }
        }
    }
}
