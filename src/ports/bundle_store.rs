use std::path::PathBuf;

use crate::domain::{AppError, ArtifactManifest};

/// Port for persisting a completed manifest.
pub trait BundleStore {
    /// Write every artifact and return the paths written, in manifest order.
    fn write(&self, manifest: &ArtifactManifest) -> Result<Vec<PathBuf>, AppError>;
}
