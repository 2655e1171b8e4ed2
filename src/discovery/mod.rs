mod artifacts;

pub use artifacts::{Artifact, ArtifactFinder, ArtifactKind};
