//! Text printed after a bundle has been written.

use std::net::IpAddr;

use crate::app::api::GenerateOutcome;
use crate::domain::{AddOn, CredentialPair, GeneratorDefaults, InputModel};

/// Instructions for a production bundle: DNS, ports, URLs, keys.
pub(super) fn production(
    input: &InputModel,
    outcome: &GenerateOutcome,
    defaults: &GeneratorDefaults,
    token: &str,
) -> String {
    let ports = &defaults.ports;
    let ingress = input.includes(AddOn::Ingress);
    let mut lines = vec![
        format!(
            "Your production config files are generated in directory: {}",
            outcome.bundle_dir.display()
        ),
        String::new(),
        "Please point update DNS for the following domains to the IP address of your server."
            .to_string(),
        format!(" * {}", input.primary_domain()),
        format!(" * {}", input.turn_domain()),
    ];
    if let Some(whip) = input.whip_domain() {
        lines.push(format!(" * {whip}"));
    }
    lines.push(
        "Once started, Caddy will automatically acquire TLS certificates for the domains."
            .to_string(),
    );
    lines.push(String::new());

    match input.startup_kind().file_name() {
        Some(file) => lines.push(format!(
            "The file \"{file}\" is a script that can be used in the \"user-data\" field when \
             starting a new VM."
        )),
        None => lines
            .push("You can copy the folder to your server and run: \"docker-compose up\"".into()),
    }
    lines.push(String::new());

    if !input.add_ons().is_empty() {
        lines.push(
            "Since you've enabled Egress/Ingress, we recommend running it on a machine with at \
             least 4 cores"
                .to_string(),
        );
        lines.push(String::new());
    }

    lines.push("Please ensure the following ports are accessible on the server".to_string());
    lines.push(" * 443 - primary HTTPS and TURN/TLS".to_string());
    lines.push(" * 80 - for TLS issuance".to_string());
    lines.push(format!(" * {} - for WebRTC over TCP", ports.rtc_tcp));
    lines.push(format!(" * {}/UDP - for TURN/UDP", ports.turn_udp));
    lines.push(format!(
        " * {}-{}/UDP - for WebRTC over UDP",
        ports.ice_range_start, ports.ice_range_end
    ));
    if ingress {
        lines.push(format!(" * {} - for RTMP Ingress", ports.rtmp));
        lines.push(format!(" * {}/UDP - for WHIP Ingress WebRTC", ports.ingress_rtc_udp));
    }
    lines.push(String::new());

    lines.push(format!("Server URL: {}", input.ws_url()));
    if ingress {
        lines.push(format!("RTMP Ingress URL: rtmp://{}/x", input.primary_domain()));
        if let Some(whip) = input.whip_domain() {
            lines.push(format!("WHIP Ingress URL: https://{whip}/w"));
        }
    }

    lines.extend(keys_and_token(&outcome.credentials, token));
    lines.push(
        "An access token identifies the participant as well as the room it's connecting to"
            .to_string(),
    );
    finish(lines)
}

/// Instructions for the local-test bundle, including a `docker run` line for the server alone.
pub(super) fn local(
    outcome: &GenerateOutcome,
    defaults: &GeneratorDefaults,
    node_ip: IpAddr,
    in_container: bool,
    token: &str,
) -> String {
    let ports = &defaults.ports;
    let config = outcome.bundle_dir.join("livekit.yaml");
    let mut lines = vec![
        format!(
            "Generated config files suitable for local testing in: {}",
            outcome.bundle_dir.display()
        ),
        String::new(),
        "Start LiveKit with:".to_string(),
        "docker run --rm \\".to_string(),
        format!("    -p {0}:{0} \\", ports.http),
        format!("    -p {0}:{0} \\", ports.rtc_tcp),
        format!("    -p {0}:{0}/udp \\", ports.rtc_udp),
        format!("    -v {}:/livekit.yaml \\", config.display()),
        format!("    {} \\", defaults.images.server),
        "    --config /livekit.yaml \\".to_string(),
        format!("    --node-ip={node_ip}"),
        String::new(),
        format!("The server expects Redis at localhost:{}.", ports.redis),
        String::new(),
    ];
    if in_container {
        lines.push(
            "Note: --node-ip needs to be reachable by the client. 127.0.0.1 is accessible only \
             to the current machine"
                .to_string(),
        );
        lines.push(String::new());
    }

    lines.extend(keys_and_token(&outcome.credentials, token));
    lines.push(
        "Access tokens identify the participant as well as the room it's connecting to".to_string(),
    );
    finish(lines)
}

fn keys_and_token(credentials: &CredentialPair, token: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("API Key: {}", credentials.identifier()),
        format!("API Secret: {}", credentials.secret()),
        String::new(),
        format!("Here's a test token generated with your keys: {token}"),
        String::new(),
    ]
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
