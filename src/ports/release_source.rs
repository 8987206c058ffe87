use crate::domain::AppError;

/// Port for looking up the newest published server release.
///
/// Only feeds the default suggestion of the interactive flow; generation never depends on it.
pub trait ReleaseSource {
    /// Tag of the latest release, e.g. `v1.8.0`.
    fn latest_version(&self) -> Result<String, AppError>;
}
