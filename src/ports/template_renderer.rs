use serde_json::Value;

use crate::domain::AppError;

/// Port for expanding a named template.
pub trait TemplateRenderer {
    /// Render the template registered under `name` against `context`.
    fn render(&self, name: &str, context: &Value) -> Result<String, AppError>;
}
