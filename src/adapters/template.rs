use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::Value;

use crate::domain::AppError;
use crate::ports::TemplateRenderer;

static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template renderer using Minijinja over the embedded template bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(&self, name: &str, context: &Value) -> Result<String, AppError> {
        let source = template_source(name)?;
        environment()
            .render_named_str(name, source, context)
            .map_err(|err| template_error(name, err))
    }
}

/// Raw body of an embedded template.
pub fn template_source(name: &str) -> Result<&'static str, AppError> {
    TEMPLATE_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| template_error(name, "template not found"))
}

fn environment() -> &'static Environment<'static> {
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env
    })
}

fn template_error(name: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Template { name: name.to_string(), reason: err.to_string() }
}
