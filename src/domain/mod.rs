pub mod artifact;
pub mod contracts;
pub mod credentials;
pub mod defaults;
pub mod error;
pub mod input;
pub mod token;
pub mod validation;

pub use artifact::{Artifact, ArtifactManifest, ArtifactRole};
pub use credentials::CredentialPair;
pub use defaults::GeneratorDefaults;
pub use error::{AppError, CompositionError};
pub use input::{
    AddOn, DeploymentProfile, InputModel, InputModelBuilder, RedisMode, SslIssuer, StartupKind,
    StartupTemplate,
};
pub use validation::{validate_domain, validate_server_version, validate_version};
