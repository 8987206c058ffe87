//! deploygen: Generate configuration bundles for a self-hosted LiveKit deployment.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

pub use app::api::{
    GenerateOptions, GenerateOutcome, default_output_root, generate, generate_local,
    generate_with_store, load_defaults, running_in_container,
};
pub use app::{Composer, render_order};
pub use domain::{
    AddOn, AppError, Artifact, ArtifactManifest, ArtifactRole, CompositionError, CredentialPair,
    DeploymentProfile, GeneratorDefaults, InputModel, InputModelBuilder, RedisMode, SslIssuer,
    StartupKind, validate_domain, validate_version,
};
