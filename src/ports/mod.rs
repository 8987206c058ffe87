mod bundle_store;
mod release_source;
mod template_renderer;

pub use bundle_store::BundleStore;
pub use release_source::ReleaseSource;
pub use template_renderer::TemplateRenderer;
