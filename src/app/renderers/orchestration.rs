use serde::Serialize;

use crate::domain::defaults::ImageDefaults;
use crate::domain::{AddOn, AppError, ArtifactManifest, ArtifactRole};

use super::{ArtifactRenderer, RenderContext};

const TEMPLATE: &str = "docker-compose.yaml.j2";

/// Renders the container orchestration manifest.
///
/// Each service mounts its config by the file name it has in the bundle directory.
pub struct OrchestrationRenderer;

#[derive(Serialize)]
struct OrchestrationContext<'a> {
    images: &'a ImageDefaults,
    server_version: &'a str,
    redis: bool,
    egress: bool,
    ingress: bool,
}

impl ArtifactRenderer for OrchestrationRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Orchestration
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        _prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        let input = ctx.input;
        let context = OrchestrationContext {
            images: &ctx.defaults.images,
            server_version: input.server_version(),
            redis: input.bundles_redis(),
            egress: input.includes(AddOn::Egress),
            ingress: input.includes(AddOn::Ingress),
        };
        ctx.render_template(TEMPLATE, &context)
    }
}
