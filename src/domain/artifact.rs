use std::fmt;
use std::path::{Path, PathBuf};

use super::input::{AddOn, InputModel};

/// Role of one generated file within the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactRole {
    Primary,
    Proxy,
    Orchestration,
    Egress,
    Ingress,
    Redis,
    Startup,
}

impl ArtifactRole {
    /// Canonical render order; also used to break ties between independent roles.
    pub const ALL: [ArtifactRole; 7] = [
        ArtifactRole::Primary,
        ArtifactRole::Proxy,
        ArtifactRole::Orchestration,
        ArtifactRole::Egress,
        ArtifactRole::Ingress,
        ArtifactRole::Redis,
        ArtifactRole::Startup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactRole::Primary => "primary",
            ArtifactRole::Proxy => "proxy",
            ArtifactRole::Orchestration => "orchestration",
            ArtifactRole::Egress => "egress",
            ArtifactRole::Ingress => "ingress",
            ArtifactRole::Redis => "redis",
            ArtifactRole::Startup => "startup",
        }
    }

    /// File name relative to the bundle directory.
    pub fn file_name(self, input: &InputModel) -> Option<&'static str> {
        match self {
            ArtifactRole::Primary => Some("livekit.yaml"),
            ArtifactRole::Proxy => Some("caddy.yaml"),
            ArtifactRole::Orchestration => Some("docker-compose.yaml"),
            ArtifactRole::Egress => Some("egress.yaml"),
            ArtifactRole::Ingress => Some("ingress.yaml"),
            ArtifactRole::Redis => Some("redis.conf"),
            ArtifactRole::Startup => input.startup_kind().file_name(),
        }
    }

    /// Whether the input asks for this artifact.
    pub fn is_requested(self, input: &InputModel) -> bool {
        match self {
            ArtifactRole::Primary | ArtifactRole::Proxy | ArtifactRole::Orchestration => true,
            ArtifactRole::Egress => input.includes(AddOn::Egress),
            ArtifactRole::Ingress => input.includes(AddOn::Ingress),
            ArtifactRole::Redis => input.bundles_redis(),
            ArtifactRole::Startup => input.startup_kind().file_name().is_some(),
        }
    }

    /// Requested roles in canonical order.
    pub fn requested(input: &InputModel) -> Vec<ArtifactRole> {
        Self::ALL.into_iter().filter(|role| role.is_requested(input)).collect()
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub role: ArtifactRole,
    pub relative_path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }

    /// Executable artifacts get their mode bits set when written.
    pub fn is_executable(&self) -> bool {
        self.relative_path.extension().is_some_and(|ext| ext == "sh")
    }
}

/// Rendered artifacts of one run, kept in render order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtifactManifest {
    base_dir: PathBuf,
    artifacts: Vec<Artifact>,
}

impl ArtifactManifest {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into(), artifacts: Vec::new() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Directory, relative to the output root, that every artifact path is relative to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Record an artifact, replacing any earlier one with the same role.
    pub fn insert(&mut self, artifact: Artifact) {
        match self.artifacts.iter_mut().find(|existing| existing.role == artifact.role) {
            Some(existing) => *existing = artifact,
            None => self.artifacts.push(artifact),
        }
    }

    pub fn get(&self, role: ArtifactRole) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.role == role)
    }

    pub fn contents(&self, role: ArtifactRole) -> Option<&str> {
        self.get(role).map(|artifact| artifact.contents.as_str())
    }

    pub fn contains(&self, role: ArtifactRole) -> bool {
        self.get(role).is_some()
    }

    pub fn roles(&self) -> Vec<ArtifactRole> {
        self.artifacts.iter().map(|artifact| artifact.role).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::StartupKind;

    fn artifact(role: ArtifactRole, contents: &str) -> Artifact {
        Artifact { role, relative_path: PathBuf::from(role.as_str()), contents: contents.into() }
    }

    #[test]
    fn insert_keeps_order_and_replaces_same_role() {
        let mut manifest = ArtifactManifest::new("example.com");
        manifest.insert(artifact(ArtifactRole::Primary, "a"));
        manifest.insert(artifact(ArtifactRole::Proxy, "b"));
        manifest.insert(artifact(ArtifactRole::Primary, "c"));

        assert_eq!(manifest.roles(), vec![ArtifactRole::Primary, ArtifactRole::Proxy]);
        assert_eq!(manifest.contents(ArtifactRole::Primary), Some("c"));
        assert_eq!(manifest.base_dir(), Path::new("example.com"));
    }

    #[test]
    fn requested_roles_follow_input() {
        let input = InputModel::local_test().unwrap();
        assert_eq!(
            ArtifactRole::requested(&input),
            vec![ArtifactRole::Primary, ArtifactRole::Proxy, ArtifactRole::Orchestration]
        );

        let input = InputModel::builder("livekit.example.com", "turn.example.com")
            .add_on(AddOn::Egress)
            .startup_kind(StartupKind::CloudInitUbuntu)
            .build()
            .unwrap();
        let roles = ArtifactRole::requested(&input);
        assert!(roles.contains(&ArtifactRole::Egress));
        assert!(!roles.contains(&ArtifactRole::Ingress));
        assert_eq!(roles.last(), Some(&ArtifactRole::Startup));
        assert_eq!(ArtifactRole::Startup.file_name(&input), Some("cloud_init.ubuntu.yaml"));
    }

    #[test]
    fn shell_scripts_are_executable() {
        let mut script = artifact(ArtifactRole::Startup, "");
        script.relative_path = PathBuf::from("init_script.sh");
        assert!(script.is_executable());
        assert!(!artifact(ArtifactRole::Primary, "").is_executable());
    }
}
