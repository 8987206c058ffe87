//! Composition driver: issues the run's credentials and renders artifacts in dependency order.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::adapters::MinijinjaTemplateRenderer;
use crate::app::renderers::{RenderContext, renderer_for};
use crate::domain::{
    AppError, Artifact, ArtifactManifest, ArtifactRole, CompositionError, CredentialPair,
    GeneratorDefaults, InputModel,
};
use crate::ports::TemplateRenderer;

/// Turns an [`InputModel`] into a complete [`ArtifactManifest`].
#[derive(Debug, Clone)]
pub struct Composer<T: TemplateRenderer = MinijinjaTemplateRenderer> {
    defaults: GeneratorDefaults,
    templates: T,
}

impl Composer<MinijinjaTemplateRenderer> {
    pub fn new(defaults: GeneratorDefaults) -> Self {
        Self { defaults, templates: MinijinjaTemplateRenderer::new() }
    }
}

impl Default for Composer<MinijinjaTemplateRenderer> {
    fn default() -> Self {
        Self::new(GeneratorDefaults::default())
    }
}

impl<T: TemplateRenderer> Composer<T> {
    pub fn with_templates(defaults: GeneratorDefaults, templates: T) -> Self {
        Self { defaults, templates }
    }

    pub fn defaults(&self) -> &GeneratorDefaults {
        &self.defaults
    }

    /// Validate the input, issue one credential pair and render every requested artifact.
    pub fn compose(&self, input: &InputModel) -> Result<ArtifactManifest, CompositionError> {
        input.validate().map_err(CompositionError::before_render)?;
        self.render_all(input, &CredentialPair::issue())
    }

    /// Render every requested artifact with a caller-issued credential pair.
    ///
    /// The caller must pass the single pair of its run.
    pub fn compose_with(
        &self,
        input: &InputModel,
        credentials: &CredentialPair,
    ) -> Result<ArtifactManifest, CompositionError> {
        input.validate().map_err(CompositionError::before_render)?;
        self.render_all(input, credentials)
    }

    fn render_all(
        &self,
        input: &InputModel,
        credentials: &CredentialPair,
    ) -> Result<ArtifactManifest, CompositionError> {
        let order = render_order(input).map_err(CompositionError::before_render)?;
        tracing::info!(
            domain = input.primary_domain(),
            roles = ?order.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            "composing bundle"
        );

        let ctx = RenderContext {
            input,
            credentials,
            defaults: &self.defaults,
            templates: &self.templates,
        };

        let mut manifest = ArtifactManifest::new(input.primary_domain());
        for role in order {
            match render_role(&ctx, role, &manifest) {
                Ok(artifact) => {
                    tracing::debug!(role = %role, bytes = artifact.contents.len(), "rendered");
                    manifest.insert(artifact);
                }
                Err(err) => {
                    tracing::warn!(role = %role, error = %err, "render failed");
                    return Err(CompositionError::new(err, manifest));
                }
            }
        }
        Ok(manifest)
    }
}

fn render_role(
    ctx: &RenderContext<'_>,
    role: ArtifactRole,
    manifest: &ArtifactManifest,
) -> Result<Artifact, AppError> {
    let file_name = role
        .file_name(ctx.input)
        .ok_or_else(|| AppError::render_error(role, "artifact has no output file"))?;
    let contents = renderer_for(role).render(ctx, manifest)?;
    Ok(Artifact { role, relative_path: PathBuf::from(file_name), contents })
}

/// Order in which the requested artifacts are rendered.
///
/// Kahn's algorithm over the renderers' declared dependencies; among roles that are ready at
/// the same time, the canonical role order wins, so the result is deterministic.
pub fn render_order(input: &InputModel) -> Result<Vec<ArtifactRole>, AppError> {
    let requested = ArtifactRole::requested(input);

    // Edge A -> B means A depends on B (B must come before A)
    let mut in_degree: BTreeMap<ArtifactRole, usize> =
        requested.iter().map(|role| (*role, 0)).collect();
    let mut dependents: BTreeMap<ArtifactRole, Vec<ArtifactRole>> =
        requested.iter().map(|role| (*role, Vec::new())).collect();

    for role in &requested {
        for dep in renderer_for(*role).dependencies(input) {
            let Some(waiting) = dependents.get_mut(&dep) else {
                return Err(AppError::MissingDependency { role: *role, missing: dep });
            };
            waiting.push(*role);
            *in_degree.entry(*role).or_default() += 1;
        }
    }

    let mut ready: BTreeSet<ArtifactRole> =
        in_degree.iter().filter(|(_, deg)| **deg == 0).map(|(role, _)| *role).collect();
    let mut order = Vec::with_capacity(requested.len());

    while let Some(current) = ready.pop_first() {
        order.push(current);
        for dependent in dependents.get(&current).into_iter().flatten() {
            if let Some(deg) = in_degree.get_mut(dependent) {
                *deg -= 1;
                if *deg == 0 {
                    ready.insert(*dependent);
                }
            }
        }
    }

    if order.len() != requested.len() {
        let remaining = in_degree
            .iter()
            .filter(|(_, deg)| **deg > 0)
            .map(|(role, _)| role.as_str().to_string())
            .collect();
        return Err(AppError::CircularDependency(remaining));
    }

    Ok(order)
}
