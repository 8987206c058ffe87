use std::io;

use thiserror::Error;

use super::artifact::{ArtifactManifest, ArtifactRole};

/// Library-wide error type for bundle generation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure while writing the bundle.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Domain name failed the hostname grammar.
    #[error("Invalid domain '{0}': requires a valid domain name (i.e. livekit.myhost.com)")]
    InvalidDomain(String),

    /// Version string is neither `latest` nor `v<major>[.<minor>[.<patch>]]`.
    #[error("Invalid version '{0}': not a valid version number (i.e. v1.8)")]
    InvalidVersion(String),

    /// Input record violates a cross-field rule.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A renderer could not produce its artifact.
    #[error("Failed to render {role} artifact: {reason}")]
    Render { role: ArtifactRole, reason: String },

    /// Template lookup or expansion failed.
    #[error("Template '{name}' failed: {reason}")]
    Template { name: String, reason: String },

    /// A renderer ran before an artifact it embeds.
    #[error("Cannot render {role} artifact: {missing} artifact has not been rendered")]
    MissingDependency { role: ArtifactRole, missing: ArtifactRole },

    /// Renderer dependencies form a cycle.
    #[error("Circular artifact dependency: {0:?}")]
    CircularDependency(Vec<String>),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Interactive prompt aborted or failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Latest release lookup failed.
    #[error("Failed to look up latest release: {0}")]
    ReleaseLookup(String),

    /// Access token could not be signed.
    #[error("Failed to sign access token: {0}")]
    Token(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn render_error(role: ArtifactRole, reason: impl std::fmt::Display) -> Self {
        AppError::Render { role, reason: reason.to_string() }
    }

    /// Whether the error stems from user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDomain(_) | AppError::InvalidVersion(_) | AppError::InvalidInput(_)
        )
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping to exit behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidDomain(_)
            | AppError::InvalidVersion(_)
            | AppError::InvalidInput(_)
            | AppError::Configuration(_) => io::ErrorKind::InvalidInput,
            AppError::Render { .. }
            | AppError::Template { .. }
            | AppError::MissingDependency { .. }
            | AppError::CircularDependency(_)
            | AppError::Token(_) => io::ErrorKind::InvalidData,
            AppError::Prompt(_) => io::ErrorKind::Interrupted,
            AppError::ReleaseLookup(_) => io::ErrorKind::Other,
        }
    }
}

/// Failure of a composition run.
///
/// Carries whatever was rendered before the failing step so the caller can decide what, if
/// anything, to persist. The partial manifest is never a valid bundle.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct CompositionError {
    #[source]
    pub source: AppError,
    pub partial: ArtifactManifest,
}

impl CompositionError {
    pub fn new(source: AppError, partial: ArtifactManifest) -> Self {
        Self { source, partial }
    }

    /// Failure raised before any renderer ran.
    pub fn before_render(source: AppError) -> Self {
        Self { source, partial: ArtifactManifest::empty() }
    }

    pub fn into_inner(self) -> AppError {
        self.source
    }
}

impl From<CompositionError> for AppError {
    fn from(err: CompositionError) -> Self {
        err.source
    }
}
