//! Zero-prompt local-test flow.

use crate::app::api::{self, GenerateOptions};
use crate::domain::{AppError, DeploymentProfile};

use super::summary;

pub fn run_local(options: &GenerateOptions, in_container: bool) -> Result<(), AppError> {
    let outcome = api::generate_local(options)?;
    let token = outcome.test_token(DeploymentProfile::LocalTest)?;
    let node_ip = api::node_ip(in_container);
    print!("{}", summary::local(&outcome, &options.defaults, node_ip, in_container, &token));
    Ok(())
}
