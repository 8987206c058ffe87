use serde::Serialize;

use crate::domain::{AppError, ArtifactManifest, ArtifactRole, InputModel, StartupTemplate};

use super::{ArtifactRenderer, RenderContext};

const SYSTEMD_TEMPLATE: &str = "systemd.service.j2";
const UPDATE_IP_TEMPLATE: &str = "update_ip.sh.j2";

/// Renders the boot-time provisioning artifact.
///
/// Every other requested artifact is embedded inline, so this renderer must run last.
pub struct StartupRenderer;

#[derive(Serialize)]
struct StartupContext<'a> {
    install_prefix: &'a str,
    compose_release: &'a str,
    primary: String,
    proxy: String,
    orchestration: String,
    systemd: String,
    update_ip: String,
    redis: Option<String>,
    egress: Option<String>,
    ingress: Option<String>,
}

#[derive(Serialize)]
struct SupportContext<'a> {
    install_prefix: &'a str,
    turn_tls_port: u16,
}

/// Prefix every non-empty line of `content` with `indent`.
///
/// The result carries no trailing newline; templates place the embedded block on its own line.
pub fn indent_block(content: &str, indent: &str) -> String {
    content
        .replace("\r\n", "\n")
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("{indent}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

impl StartupRenderer {
    fn template(input: &InputModel) -> Result<StartupTemplate, AppError> {
        input.startup_kind().template().ok_or_else(|| {
            AppError::render_error(ArtifactRole::Startup, "no startup script kind selected")
        })
    }
}

impl ArtifactRenderer for StartupRenderer {
    fn role(&self) -> ArtifactRole {
        ArtifactRole::Startup
    }

    fn dependencies(&self, input: &InputModel) -> Vec<ArtifactRole> {
        ArtifactRole::requested(input).into_iter().filter(|role| *role != self.role()).collect()
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        prior: &ArtifactManifest,
    ) -> Result<String, AppError> {
        let template = Self::template(ctx.input)?;
        let indent = template.embed_indent();

        let dependencies = self.dependencies(ctx.input);
        if let Some(missing) = dependencies.iter().find(|role| !prior.contains(**role)) {
            return Err(AppError::MissingDependency { role: self.role(), missing: *missing });
        }

        // Only roles this run requested are embedded, even if `prior` holds others.
        let embed = |role: ArtifactRole| -> Option<String> {
            dependencies
                .contains(&role)
                .then(|| prior.contents(role).map(|content| indent_block(content, indent)))
                .flatten()
        };
        let required = |role: ArtifactRole| -> Result<String, AppError> {
            embed(role)
                .ok_or(AppError::MissingDependency { role: ArtifactRole::Startup, missing: role })
        };

        let install_prefix = ctx.defaults.install_prefix.as_str();
        let support =
            SupportContext { install_prefix, turn_tls_port: ctx.defaults.ports.turn_tls };
        let systemd = ctx.render_template(SYSTEMD_TEMPLATE, &support)?;
        let update_ip = ctx.render_template(UPDATE_IP_TEMPLATE, &support)?;

        let context = StartupContext {
            install_prefix,
            compose_release: ctx.defaults.compose_release.as_str(),
            primary: required(ArtifactRole::Primary)?,
            proxy: required(ArtifactRole::Proxy)?,
            orchestration: required(ArtifactRole::Orchestration)?,
            systemd: indent_block(&systemd, indent),
            update_ip: indent_block(&update_ip, indent),
            redis: embed(ArtifactRole::Redis),
            egress: embed(ArtifactRole::Egress),
            ingress: embed(ArtifactRole::Ingress),
        };
        ctx.render_template(template.template_name(), &context)
    }
}
