use serde::Serialize;

use crate::domain::{AppError, ArtifactManifest, ArtifactRole, SslIssuer};

use super::{ArtifactRenderer, RenderContext};

const TEMPLATE: &str = "caddy.yaml.j2";

/// Renders the TLS-terminating layer-4 proxy config.
pub struct ProxyRenderer;

#[derive(Serialize)]
struct ProxyContext<'a> {
    primary_domain: &'a str,
    turn_domain: &'a str,
    whip_domain: Option<&'a str>,
    zerossl: bool,
    /// JSON-quoted, so any key is a valid YAML scalar.
    zerossl_api_key: Option<String>,
    http_port: u16,
    turn_tls_port: u16,
    whip_port: u16,
}

impl ArtifactRenderer for ProxyRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Proxy
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        _prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        let input = ctx.input;
        let ports = &ctx.defaults.ports;
        let context = ProxyContext {
            primary_domain: input.primary_domain(),
            turn_domain: input.turn_domain(),
            whip_domain: input.whip_domain(),
            zerossl: matches!(input.ssl_issuer(), SslIssuer::ZeroSsl { .. }),
            zerossl_api_key: input.ssl_issuer().zerossl_api_key().map(quote_scalar).transpose()?,
            http_port: ports.http,
            turn_tls_port: ports.turn_tls,
            whip_port: ports.whip,
        };
        ctx.render_template(TEMPLATE, &context)
    }
}

fn quote_scalar(value: &str) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::render_error(ArtifactRole::Proxy, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::renderers::test_support::render;
    use crate::domain::{AddOn, InputModel};
    use serde_yaml::Value;

    fn render_proxy(input: &InputModel) -> String {
        render(ArtifactRole::Proxy, input, &ArtifactManifest::empty())
    }

    #[test]
    fn lists_primary_and_turn_certificates() {
        let input = InputModel::builder("livekit.example.com", "turn.example.com").build().unwrap();
        let out = render_proxy(&input);
        let config: Value = serde_yaml::from_str(&out).unwrap();

        let automate = config["apps"]["tls"]["certificates"]["automate"].as_sequence().unwrap();
        let domains: Vec<_> = automate.iter().filter_map(Value::as_str).collect();
        assert_eq!(domains, vec!["livekit.example.com", "turn.example.com"]);
        assert!(!out.contains("zerossl"));
        assert!(out.contains("dial: [\"localhost:5349\"]"));
        assert!(out.contains("dial: [\"localhost:7880\"]"));
        assert!(!out.contains("localhost:8080"));
    }

    #[test]
    fn whip_domain_adds_certificate_and_route() {
        let input = InputModel::builder("livekit.example.com", "turn.example.com")
            .add_on(AddOn::Ingress)
            .whip_domain("whip.example.com")
            .build()
            .unwrap();
        let out = render_proxy(&input);
        let config: Value = serde_yaml::from_str(&out).unwrap();

        let automate = config["apps"]["tls"]["certificates"]["automate"].as_sequence().unwrap();
        assert_eq!(automate.len(), 3);
        let routes = config["apps"]["layer4"]["servers"]["main"]["routes"].as_sequence().unwrap();
        assert_eq!(routes.len(), 3);
        assert!(out.contains("dial: [\"localhost:8080\"]"));
    }

    #[test]
    fn zerossl_embeds_api_key() {
        let input = InputModel::builder("livekit.example.com", "turn.example.com")
            .ssl_issuer(SslIssuer::ZeroSsl { api_key: Some("zkey-123".into()) })
            .build()
            .unwrap();
        let config: Value = serde_yaml::from_str(&render_proxy(&input)).unwrap();

        let issuer = &config["apps"]["tls"]["automation"]["policies"][0]["issuers"][0];
        assert_eq!(issuer["module"].as_str(), Some("zerossl"));
        assert_eq!(issuer["api_key"].as_str(), Some("zkey-123"));
    }

    #[test]
    fn zerossl_without_key_omits_api_key() {
        let input = InputModel::builder("livekit.example.com", "turn.example.com")
            .ssl_issuer(SslIssuer::ZeroSsl { api_key: None })
            .build()
            .unwrap();
        let out = render_proxy(&input);
        assert!(out.contains("module: zerossl"));
        assert!(!out.contains("api_key"));
        assert!(serde_yaml::from_str::<Value>(&out).is_ok());
    }

    #[test]
    fn zerossl_key_with_yaml_syntax_survives_parsing() {
        for key in ["k: v #x", "abc #tail", "'quoted", "\"double\" and \\ slash"] {
            let input = InputModel::builder("livekit.example.com", "turn.example.com")
                .ssl_issuer(SslIssuer::ZeroSsl { api_key: Some(key.into()) })
                .build()
                .unwrap();
            let config: Value = serde_yaml::from_str(&render_proxy(&input)).unwrap();

            let issuer = &config["apps"]["tls"]["automation"]["policies"][0]["issuers"][0];
            assert_eq!(issuer["api_key"].as_str(), Some(key));
        }
    }
}
