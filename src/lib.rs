//! ngsweep - Transactional dead code removal for Angular projects
//!
//! This library removes unused Angular artifacts (components, directives,
//! pipes, services, guards, interceptors, interfaces, enums) and unused
//! component methods from a TypeScript source tree.
//!
//! # Architecture
//!
//! The artifact pass consists of:
//! 1. **Registry Indexing** - Find all NgModule files once at startup
//! 2. **Discovery** - Classify candidate files by filename suffix
//! 3. **Reference Purge** - Strip the artifact symbol from every registry
//! 4. **Deletion** - Remove the file, or its directory for components
//! 5. **Verification** - Build the project; commit on success, hard-revert
//!    on failure, one artifact per cycle
//! 6. **Reporting** - Console narration plus a persisted JSON audit log
//!
//! The method pass rewrites individual component classes, dropping methods
//! whose name never occurs outside their own declaration site in either the
//! component source or its companion HTML template.

pub mod config;
pub mod discovery;
pub mod pruner;
pub mod registry;
pub mod remover;
pub mod report;
pub mod usage;
pub mod verify;

pub use config::Config;
pub use discovery::{Artifact, ArtifactFinder, ArtifactKind};
pub use pruner::{PruneReport, Pruner};
pub use registry::{remove_symbol, RegistryFile, RegistryIndex};
pub use remover::{RemovalResult, RemovalStatus, Remover};
pub use report::{JsonReporter, TerminalReporter};
pub use verify::{Oracle, ProcessOracle, Verdict, Verifier};
