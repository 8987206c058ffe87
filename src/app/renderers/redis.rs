use serde::Serialize;

use crate::domain::{AppError, ArtifactManifest, ArtifactRole};

use super::{ArtifactRenderer, RenderContext};

const TEMPLATE: &str = "redis.conf.j2";

/// Renders the config of the bundled Redis server.
pub struct RedisRenderer;

#[derive(Serialize)]
struct RedisContext {
    redis_port: u16,
}

impl ArtifactRenderer for RedisRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Redis
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        _prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        ctx.render_template(TEMPLATE, &RedisContext { redis_port: ctx.defaults.ports.redis })
    }
}
