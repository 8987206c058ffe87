use crate::domain::contracts::{
    CONTRACT_VERSION, EgressConfig, IngressConfig, LoggingConfig, RedisConfig, RtcConfig,
};
use crate::domain::{AppError, ArtifactManifest, ArtifactRole, InputModel};

use super::{ArtifactRenderer, RenderContext, to_yaml};

/// Renders the egress service config.
pub struct EgressRenderer;

/// Renders the ingress service config.
pub struct IngressRenderer;

impl EgressRenderer {
    pub fn config(ctx: &RenderContext<'_>) -> EgressConfig {
        EgressConfig {
            redis: RedisConfig { address: ctx.redis_address() },
            api_key: ctx.credentials.identifier().to_string(),
            api_secret: ctx.credentials.secret().to_string(),
            ws_url: ctx.input.ws_url(),
        }
    }
}

impl IngressRenderer {
    pub fn config(ctx: &RenderContext<'_>) -> IngressConfig {
        let ports = &ctx.defaults.ports;
        IngressConfig {
            redis: RedisConfig { address: ctx.redis_address() },
            api_key: ctx.credentials.identifier().to_string(),
            api_secret: ctx.credentials.secret().to_string(),
            ws_url: ctx.input.ws_url(),
            rtmp_port: ports.rtmp,
            whip_port: ports.whip,
            http_relay_port: ports.http_relay,
            logging: LoggingConfig::default(),
            rtc_config: RtcConfig {
                udp_port: Some(ports.ingress_rtc_udp),
                use_external_ip: true,
                ..RtcConfig::default()
            },
        }
    }
}

impl ArtifactRenderer for EgressRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Egress
    }

    // Shares the primary's identity, so it follows the primary in every run.
    fn dependencies(&self, _input: &InputModel) -> Vec<ArtifactRole> {
        vec![ArtifactRole::Primary]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        _prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        tracing::debug!(contract_version = CONTRACT_VERSION, "rendering egress config");
        to_yaml(self.role(), &Self::config(ctx))
    }
}

impl ArtifactRenderer for IngressRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Ingress
    }

    fn dependencies(&self, _input: &InputModel) -> Vec<ArtifactRole> {
        vec![ArtifactRole::Primary]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        _prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        tracing::debug!(contract_version = CONTRACT_VERSION, "rendering ingress config");
        to_yaml(self.role(), &Self::config(ctx))
    }
}
