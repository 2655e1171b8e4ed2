use crate::config::Config;
use ignore::WalkBuilder;
use miette::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Kind of Angular artifact, classified by filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactKind {
    Component,
    Directive,
    Pipe,
    Service,
    Guard,
    Interceptor,
    Interface,
    Enum,
}

impl ArtifactKind {
    /// All kinds, in classification order
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::Component,
        ArtifactKind::Directive,
        ArtifactKind::Pipe,
        ArtifactKind::Service,
        ArtifactKind::Guard,
        ArtifactKind::Interceptor,
        ArtifactKind::Interface,
        ArtifactKind::Enum,
    ];

    /// Filename suffix identifying this kind
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Component => ".component.ts",
            ArtifactKind::Directive => ".directive.ts",
            ArtifactKind::Pipe => ".pipe.ts",
            ArtifactKind::Service => ".service.ts",
            ArtifactKind::Guard => ".guard.ts",
            ArtifactKind::Interceptor => ".interceptor.ts",
            ArtifactKind::Interface => ".interface.ts",
            ArtifactKind::Enum => ".enum.ts",
        }
    }

    /// Whether removal deletes the whole containing directory.
    /// Components live in their own directory alongside template and styles.
    pub fn deletes_directory(&self) -> bool {
        matches!(self, ArtifactKind::Component)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::Component => "Component",
            ArtifactKind::Directive => "Directive",
            ArtifactKind::Pipe => "Pipe",
            ArtifactKind::Service => "Service",
            ArtifactKind::Guard => "Guard",
            ArtifactKind::Interceptor => "Interceptor",
            ArtifactKind::Interface => "Interface",
            ArtifactKind::Enum => "Enum",
        }
    }

    /// Classify a file name by suffix
    pub fn classify(file_name: &str) -> Option<ArtifactKind> {
        ArtifactKind::ALL
            .iter()
            .copied()
            .find(|kind| file_name.ends_with(kind.suffix()))
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A removal candidate discovered during the tree walk
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Path to the declaring file
    pub path: PathBuf,

    /// Classified kind
    pub kind: ArtifactKind,
}

/// Finder for artifact files in a project tree
pub struct ArtifactFinder<'a> {
    config: &'a Config,
}

impl<'a> ArtifactFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all artifact candidates under the given root.
    ///
    /// Results are sorted by path so runs over the same tree are
    /// reproducible regardless of directory-listing order.
    pub fn find_artifacts(&self, root: &Path) -> Result<Vec<Artifact>> {
        debug!("Scanning for artifacts in: {}", root.display());

        let targets = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config.targets.iter().map(|t| root.join(t)).collect()
        };

        let mut artifacts: Vec<Artifact> = targets
            .par_iter()
            .flat_map(|target| self.scan_directory(target))
            .collect();

        artifacts.sort_by(|a, b| a.path.cmp(&b.path));

        debug!("Found {} artifact candidates", artifacts.len());
        Ok(artifacts)
    }

    /// Find only component units (the method pass operates on these)
    pub fn find_components(&self, root: &Path) -> Result<Vec<Artifact>> {
        let artifacts = self.find_artifacts(root)?;
        Ok(artifacts
            .into_iter()
            .filter(|a| a.kind == ArtifactKind::Component)
            .collect())
    }

    fn scan_directory(&self, dir: &Path) -> Vec<Artifact> {
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

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let file_name = path.file_name()?.to_str()?;

                // The root component anchors the application shell
                if file_name == self.config.root_component {
                    trace!("Skipping root component: {}", path.display());
                    return None;
                }

                let kind = ArtifactKind::classify(file_name)?;

                trace!("Found {:?}: {}", kind, path.display());
                Some(Artifact {
                    path: path.to_path_buf(),
                    kind,
                })
            })
            .collect()
    }
}
