//! Config schemas written for the primary service and its add-ons.
//!
//! These are owned by the generator and cover only the keys it sets; the services accept
//! partial configs and default the rest. Field names follow the services' YAML keys.

use std::collections::BTreeMap;

use serde::Serialize;

/// Schema revision of the add-on contracts below.
pub const CONTRACT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisConfig {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub json: bool,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { json: false, level: "info".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RtcConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_start: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range_end: Option<u16>,
    pub use_external_ip: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnConfig {
    pub enabled: bool,
    pub domain: String,
    pub tls_port: u16,
    pub udp_port: u16,
    pub external_tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressUrls {
    pub rtmp_base_url: String,
    pub whip_base_url: String,
}

/// Primary media server config (`livekit.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryConfig {
    pub port: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bind_addresses: Vec<String>,
    pub rtc: RtcConfig,
    pub redis: RedisConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnConfig>,
    pub keys: BTreeMap<String, String>,
    pub logging: LoggingConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressUrls>,
}

/// Egress service config (`egress.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EgressConfig {
    pub redis: RedisConfig,
    pub api_key: String,
    pub api_secret: String,
    pub ws_url: String,
}

/// Ingress service config (`ingress.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressConfig {
    pub redis: RedisConfig,
    pub api_key: String,
    pub api_secret: String,
    pub ws_url: String,
    pub rtmp_port: u16,
    pub whip_port: u16,
    pub http_relay_port: u16,
    pub logging: LoggingConfig,
    pub rtc_config: RtcConfig,
}
