use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Artifact, ArtifactManifest};
use crate::ports::BundleStore;

/// Writes bundles under an output root directory.
#[derive(Debug, Clone)]
pub struct FilesystemBundleStore {
    root: PathBuf,
}

impl FilesystemBundleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a manifest is written into.
    pub fn bundle_dir(&self, manifest: &ArtifactManifest) -> PathBuf {
        self.root.join(manifest.base_dir())
    }
}

impl BundleStore for FilesystemBundleStore {
    fn write(&self, manifest: &ArtifactManifest) -> Result<Vec<PathBuf>, AppError> {
        let dir = self.bundle_dir(manifest);
        // An existing directory is fine; files inside are overwritten.
        fs::create_dir_all(&dir)?;

        let mut written = Vec::with_capacity(manifest.len());
        for artifact in manifest.iter() {
            let path = dir.join(&artifact.relative_path);
            fs::write(&path, artifact.bytes())?;
            set_permissions(&path, artifact)?;
            tracing::debug!(role = %artifact.role, path = %path.display(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path, artifact: &Artifact) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if artifact.is_executable() { 0o755 } else { 0o644 };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _artifact: &Artifact) -> Result<(), AppError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtifactRole;
    use tempfile::TempDir;

    fn manifest() -> ArtifactManifest {
        let mut manifest = ArtifactManifest::new("example.com");
        manifest.insert(Artifact {
            role: ArtifactRole::Primary,
            relative_path: PathBuf::from("livekit.yaml"),
            contents: "port: 7880\n".into(),
        });
        manifest.insert(Artifact {
            role: ArtifactRole::Startup,
            relative_path: PathBuf::from("init_script.sh"),
            contents: "#!/bin/sh\n".into(),
        });
        manifest
    }

    #[test]
    fn writes_artifacts_under_bundle_dir() {
        let temp = TempDir::new().unwrap();
        let store = FilesystemBundleStore::new(temp.path());

        let written = store.write(&manifest()).unwrap();

        assert_eq!(written.len(), 2);
        let primary = temp.path().join("example.com/livekit.yaml");
        assert_eq!(fs::read_to_string(primary).unwrap(), "port: 7880\n");
    }

    #[test]
    fn existing_directory_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("example.com")).unwrap();
        let store = FilesystemBundleStore::new(temp.path());
        assert!(store.write(&manifest()).is_ok());
        assert!(store.write(&manifest()).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        FilesystemBundleStore::new(temp.path()).write(&manifest()).unwrap();

        let mode = |name: &str| {
            fs::metadata(temp.path().join("example.com").join(name)).unwrap().permissions().mode()
                & 0o777
        };
        assert_eq!(mode("init_script.sh"), 0o755);
        assert_eq!(mode("livekit.yaml"), 0o644);
    }

    #[test]
    fn write_failure_is_surfaced() {
        let temp = TempDir::new().unwrap();
        // A regular file where the bundle directory should go.
        fs::write(temp.path().join("example.com"), "").unwrap();
        let err = FilesystemBundleStore::new(temp.path()).write(&manifest()).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
