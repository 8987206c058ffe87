use std::collections::BTreeMap;

use crate::domain::contracts::{
    IngressUrls, LoggingConfig, PrimaryConfig, RedisConfig, RtcConfig, TurnConfig,
};
use crate::domain::{AddOn, AppError, ArtifactManifest, ArtifactRole, DeploymentProfile};

use super::{ArtifactRenderer, RenderContext, to_yaml};

/// Renders the primary media server config.
pub struct PrimaryRenderer;

impl PrimaryRenderer {
    pub fn config(ctx: &RenderContext<'_>) -> PrimaryConfig {
        let input = ctx.input;
        let ports = &ctx.defaults.ports;

        let (bind_addresses, rtc, turn) = match input.profile() {
            DeploymentProfile::Production => (
                vec![String::new()],
                RtcConfig {
                    tcp_port: Some(ports.rtc_tcp),
                    udp_port: None,
                    port_range_start: Some(ports.ice_range_start),
                    port_range_end: Some(ports.ice_range_end),
                    use_external_ip: true,
                },
                Some(TurnConfig {
                    enabled: true,
                    domain: input.turn_domain().to_string(),
                    tls_port: ports.turn_tls,
                    udp_port: ports.turn_udp,
                    external_tls: true,
                }),
            ),
            DeploymentProfile::LocalTest => (
                Vec::new(),
                RtcConfig {
                    tcp_port: Some(ports.rtc_tcp),
                    udp_port: Some(ports.rtc_udp),
                    port_range_start: None,
                    port_range_end: None,
                    use_external_ip: false,
                },
                None,
            ),
        };

        let ingress = input.includes(AddOn::Ingress).then(|| IngressUrls {
            rtmp_base_url: format!("rtmp://{}:{}/x", input.primary_domain(), ports.rtmp),
            whip_base_url: match input.whip_domain() {
                Some(whip) => format!("https://{whip}/w"),
                None => format!("http://{}:{}/w", input.primary_domain(), ports.whip),
            },
        });

        let mut keys = BTreeMap::new();
        keys.insert(ctx.credentials.identifier().to_string(), ctx.credentials.secret().to_string());

        PrimaryConfig {
            port: ports.http,
            bind_addresses,
            rtc,
            redis: RedisConfig { address: ctx.redis_address() },
            turn,
            keys,
            logging: LoggingConfig::default(),
            ingress,
        }
    }
}

impl ArtifactRenderer for PrimaryRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Primary
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        _prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        to_yaml(self.role(), &Self::config(ctx))
    }
}
