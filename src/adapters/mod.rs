pub mod bundle_filesystem;
pub mod github_release;
pub mod template;

pub use bundle_filesystem::FilesystemBundleStore;
pub use github_release::GithubReleaseSource;
pub use template::MinijinjaTemplateRenderer;
