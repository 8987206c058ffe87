//! Tunable constants shared by every renderer.
//!
//! Port numbers, image tags and install locations have drifted between releases of the
//! deployment layout, so they live here rather than in the renderers. A TOML file can override
//! any subset of them; missing keys fall back to the built-in values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorDefaults {
    pub ports: PortDefaults,
    pub images: ImageDefaults,
    /// Directory on the target host that receives the bundle.
    pub install_prefix: String,
    /// docker-compose release installed by startup scripts.
    pub compose_release: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortDefaults {
    pub http: u16,
    pub rtc_tcp: u16,
    pub rtc_udp: u16,
    pub ice_range_start: u16,
    pub ice_range_end: u16,
    pub turn_tls: u16,
    pub turn_udp: u16,
    pub redis: u16,
    pub rtmp: u16,
    pub whip: u16,
    pub http_relay: u16,
    pub ingress_rtc_udp: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageDefaults {
    pub server: String,
    pub proxy: String,
    pub redis: String,
    pub egress: String,
    pub ingress: String,
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self {
            ports: PortDefaults::default(),
            images: ImageDefaults::default(),
            install_prefix: "/opt/livekit".to_string(),
            compose_release: "v2.20.2".to_string(),
        }
    }
}

impl Default for PortDefaults {
    fn default() -> Self {
        Self {
            http: 7880,
            rtc_tcp: 7881,
            rtc_udp: 7882,
            ice_range_start: 50000,
            ice_range_end: 60000,
            turn_tls: 5349,
            turn_udp: 3478,
            redis: 6379,
            rtmp: 1935,
            whip: 8080,
            http_relay: 9090,
            ingress_rtc_udp: 7885,
        }
    }
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            server: "livekit/livekit-server".to_string(),
            proxy: "livekit/caddyl4".to_string(),
            redis: "redis:7-alpine".to_string(),
            egress: "livekit/egress:latest".to_string(),
            ingress: "livekit/ingress:latest".to_string(),
        }
    }
}

impl GeneratorDefaults {
    /// Parse overrides from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        let defaults: Self = toml::from_str(content)
            .map_err(|e| AppError::config_error(format!("Invalid defaults file: {e}")))?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Load overrides from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config_error(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.ports.ice_range_start > self.ports.ice_range_end {
            return Err(AppError::config_error(format!(
                "ice_range_start ({}) must not exceed ice_range_end ({})",
                self.ports.ice_range_start, self.ports.ice_range_end
            )));
        }
        if self.install_prefix.is_empty() || !self.install_prefix.starts_with('/') {
            return Err(AppError::config_error("install_prefix must be an absolute path"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_builtin_defaults() {
        let defaults = GeneratorDefaults::from_toml_str("").unwrap();
        assert_eq!(defaults, GeneratorDefaults::default());
    }

    #[test]
    fn partial_override_keeps_other_values() {
        let defaults = GeneratorDefaults::from_toml_str(
            r#"
install_prefix = "/srv/media"

[ports]
turn_tls = 5350
"#,
        )
        .unwrap();
        assert_eq!(defaults.install_prefix, "/srv/media");
        assert_eq!(defaults.ports.turn_tls, 5350);
        assert_eq!(defaults.ports.http, 7880);
        assert_eq!(defaults.images, ImageDefaults::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GeneratorDefaults::from_toml_str("bogus = 1").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn inverted_ice_range_is_rejected() {
        let err = GeneratorDefaults::from_toml_str(
            "[ports]\nice_range_start = 60000\nice_range_end = 50000\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("ice_range_start"));
    }

    #[test]
    fn relative_install_prefix_is_rejected() {
        assert!(GeneratorDefaults::from_toml_str("install_prefix = \"opt\"").is_err());
    }
}
