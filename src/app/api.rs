//! API Facade for the application.
//!
//! Glues defaults loading, composition and persistence together so the CLI and library callers
//! go through the same path.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::adapters::FilesystemBundleStore;
use crate::app::Composer;
use crate::domain::token::{TestGrant, sign_test_token};
use crate::domain::{
    AppError, ArtifactManifest, CredentialPair, DeploymentProfile, GeneratorDefaults, InputModel,
};
use crate::ports::BundleStore;

/// Base directory used when running inside a container.
pub const CONTAINER_OUTPUT_ROOT: &str = "/output";

const CONTAINER_MARKERS: [&str; 2] = ["/.dockerenv", "/run/.containerenv"];

/// Where and with which defaults a bundle is generated.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_root: PathBuf,
    pub defaults: GeneratorDefaults,
}

impl GenerateOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self { output_root: output_root.into(), defaults: GeneratorDefaults::default() }
    }

    pub fn with_defaults(mut self, defaults: GeneratorDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// Result of a successful generation run.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub manifest: ArtifactManifest,
    pub credentials: CredentialPair,
    pub bundle_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl GenerateOutcome {
    /// Access token for the grant matching the input's profile.
    pub fn test_token(&self, profile: DeploymentProfile) -> Result<String, AppError> {
        let grant = match profile {
            DeploymentProfile::Production => &TestGrant::PRODUCTION,
            DeploymentProfile::LocalTest => &TestGrant::LOCAL,
        };
        sign_test_token(&self.credentials, grant, Utc::now())
    }
}

/// Compose and write a bundle for `input` under `options.output_root`.
pub fn generate(
    input: &InputModel,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let store = FilesystemBundleStore::new(&options.output_root);
    let outcome = generate_with_store(input, &options.defaults, &store)?;
    let bundle_dir = store.bundle_dir(&outcome.manifest);
    Ok(GenerateOutcome { bundle_dir, ..outcome })
}

/// Compose a bundle and hand it to `store`.
///
/// `bundle_dir` of the outcome is relative to the store's root.
///
/// Nothing is written when composition fails; the partial manifest is discarded.
pub fn generate_with_store<S: BundleStore>(
    input: &InputModel,
    defaults: &GeneratorDefaults,
    store: &S,
) -> Result<GenerateOutcome, AppError> {
    let credentials = CredentialPair::issue();
    let manifest = Composer::new(defaults.clone()).compose_with(input, &credentials)?;
    let written = store.write(&manifest)?;
    tracing::info!(files = written.len(), "bundle written");

    Ok(GenerateOutcome {
        bundle_dir: manifest.base_dir().to_path_buf(),
        manifest,
        credentials,
        written,
    })
}

/// Generate the local-test preset.
pub fn generate_local(options: &GenerateOptions) -> Result<GenerateOutcome, AppError> {
    generate(&InputModel::local_test()?, options)
}

/// Load generator defaults, applying the TOML overrides at `path` when given.
pub fn load_defaults(path: Option<&Path>) -> Result<GeneratorDefaults, AppError> {
    match path {
        Some(path) => GeneratorDefaults::load(path),
        None => Ok(GeneratorDefaults::default()),
    }
}

/// Whether the process runs inside a Docker or Podman container.
pub fn running_in_container() -> bool {
    CONTAINER_MARKERS.iter().any(|marker| Path::new(marker).exists())
}

/// Output root for this process: `/output` in a container, the working directory otherwise.
pub fn default_output_root(in_container: bool) -> PathBuf {
    if in_container { PathBuf::from(CONTAINER_OUTPUT_ROOT) } else { PathBuf::from(".") }
}

/// Address clients can reach the local server on.
///
/// Inside a container only loopback is meaningful to the host running the command.
pub fn node_ip(in_container: bool) -> IpAddr {
    let loopback = IpAddr::V4(Ipv4Addr::LOCALHOST);
    if in_container {
        return loopback;
    }
    // Connecting a UDP socket sends nothing; it only selects the outbound interface.
    UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .and_then(|socket| {
            socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .ok()
        .filter(|ip| !ip.is_unspecified())
        .unwrap_or(loopback)
}
