//! One renderer per artifact role.
//!
//! Renderers are pure: the same input, credentials and defaults always produce the same bytes.
//! They read the input model and never write back into it; artifacts that embed other
//! artifacts read them from the manifest rendered so far.

mod addons;
mod orchestration;
mod primary;
mod proxy;
mod redis;
mod startup;

use serde::Serialize;

use crate::domain::{
    AppError, ArtifactManifest, ArtifactRole, CredentialPair, GeneratorDefaults, InputModel,
};
use crate::ports::TemplateRenderer;

pub use addons::{EgressRenderer, IngressRenderer};
pub use orchestration::OrchestrationRenderer;
pub use primary::PrimaryRenderer;
pub use proxy::ProxyRenderer;
pub use redis::RedisRenderer;
pub use startup::{StartupRenderer, indent_block};

/// Read-only inputs shared by every renderer in a run.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub input: &'a InputModel,
    pub credentials: &'a CredentialPair,
    pub defaults: &'a GeneratorDefaults,
    pub templates: &'a dyn TemplateRenderer,
}

impl<'a> RenderContext<'a> {
    /// Redis address shared by the primary service and add-ons.
    pub fn redis_address(&self) -> String {
        self.input.redis_mode().address(self.defaults.ports.redis)
    }

    /// Expand a template with a serializable context.
    pub fn render_template<S: Serialize>(
        &self,
        name: &str,
        context: &S,
    ) -> Result<String, AppError> {
        let value = serde_json::to_value(context).map_err(|e| AppError::Template {
            name: name.to_string(),
            reason: format!("invalid template context: {e}"),
        })?;
        self.templates.render(name, &value)
    }
}

/// Produces the contents of one artifact.
pub trait ArtifactRenderer {
    fn role(&self) -> ArtifactRole;

    /// Artifacts that must already be in the manifest when `render` runs.
    fn dependencies(&self, _input: &InputModel) -> Vec<ArtifactRole> {
        Vec::new()
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        prior: &ArtifactManifest,
    ) -> Result<String, AppError>;
}

/// Renderer responsible for `role`.
pub fn renderer_for(role: ArtifactRole) -> &'static dyn ArtifactRenderer {
    match role {
        ArtifactRole::Primary => &PrimaryRenderer,
        ArtifactRole::Proxy => &ProxyRenderer,
        ArtifactRole::Orchestration => &OrchestrationRenderer,
        ArtifactRole::Egress => &EgressRenderer,
        ArtifactRole::Ingress => &IngressRenderer,
        ArtifactRole::Redis => &RedisRenderer,
        ArtifactRole::Startup => &StartupRenderer,
    }
}

fn to_yaml<T: Serialize>(role: ArtifactRole, value: &T) -> Result<String, AppError> {
    serde_yaml::to_string(value).map_err(|e| AppError::render_error(role, e))
}
