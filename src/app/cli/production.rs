//! Interactive production flow.

use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Input, Select};

use crate::adapters::GithubReleaseSource;
use crate::app::api::{self, GenerateOptions};
use crate::domain::validation::LATEST_VERSION;
use crate::domain::{
    AddOn, AppError, DeploymentProfile, InputModel, RedisMode, SslIssuer, StartupKind,
    validate_domain, validate_version,
};
use crate::ports::ReleaseSource;

use super::summary;

const DEPLOY_CHOICES: [&str; 4] =
    ["LiveKit Server only", "with Egress", "with Ingress", "with both Egress and Ingress"];
const SSL_CHOICES: [&str; 2] =
    ["Let's Encrypt (no account required)", "ZeroSSL (best compatibility, requires account)"];
const REDIS_CHOICES: [&str; 2] = ["no - (we'll bundle Redis)", "yes"];
const CUSTOM_VERSION: &str = "custom";

pub fn run_production(options: &GenerateOptions) -> Result<(), AppError> {
    println!("Generating config for production LiveKit deployment");
    println!(
        "This deployment will utilize docker-compose and Caddy. It'll set up a secure LiveKit \
         installation with built-in TURN/TLS"
    );
    println!(
        "SSL Certificates for HTTPS and TURN/TLS will be generated automatically via LetsEncrypt \
         or ZeroSSL."
    );
    println!();

    let add_ons = add_ons_for(select("What to deploy", &DEPLOY_CHOICES)?);
    let primary = prompt_domain("Primary domain name (i.e. livekit.myhost.com)", &[], false)?;
    let turn = prompt_domain(
        "TURN domain name (i.e. livekit-turn.myhost.com)",
        &[(primary.as_str(), "primary")],
        false,
    )?;
    let whip = if add_ons.contains(&AddOn::Ingress) {
        prompt_domain(
            "Ingress WHIP domain name (optional, i.e. livekit-whip.myhost.com)",
            &[(primary.as_str(), "primary"), (turn.as_str(), "TURN")],
            true,
        )?
    } else {
        String::new()
    };
    let ssl_issuer = prompt_ssl_issuer()?;
    let version = prompt_version()?;
    let (redis_mode, bundle_redis) = redis_for(select("Use external Redis", &REDIS_CHOICES)?);
    let labels: Vec<&str> = StartupKind::ALL.iter().map(|kind| kind.label()).collect();
    let startup_kind = StartupKind::ALL[select(
        "Generate a startup script? It'll write configuration files to the right spots on the \
         server.",
        &labels,
    )?];

    let mut builder = InputModel::builder(primary, turn)
        .whip_domain(whip)
        .server_version(version)
        .redis(redis_mode, bundle_redis)
        .ssl_issuer(ssl_issuer)
        .startup_kind(startup_kind);
    for add_on in add_ons {
        builder = builder.add_on(add_on);
    }
    let input = builder.build()?;

    let outcome = api::generate(&input, options)?;
    let token = outcome.test_token(DeploymentProfile::Production)?;
    print!("{}", summary::production(&input, &outcome, &options.defaults, &token));
    Ok(())
}

fn add_ons_for(index: usize) -> Vec<AddOn> {
    match index {
        1 => vec![AddOn::Egress],
        2 => vec![AddOn::Ingress],
        3 => vec![AddOn::Egress, AddOn::Ingress],
        _ => Vec::new(),
    }
}

fn redis_for(index: usize) -> (RedisMode, bool) {
    if index == 0 { (RedisMode::Local, true) } else { (RedisMode::External, false) }
}

/// Version menu: `latest`, the fetched release tag when known, then a custom entry.
fn version_choices(fetched: Option<&str>) -> Vec<String> {
    let mut choices = vec![LATEST_VERSION.to_string()];
    if let Some(tag) = fetched.filter(|tag| *tag != LATEST_VERSION) {
        choices.push(tag.to_string());
    }
    choices.push(CUSTOM_VERSION.to_string());
    choices
}

/// `taken` pairs each domain already chosen with the name it was asked for under.
fn check_domain(value: &str, taken: &[(&str, &str)], optional: bool) -> Result<(), String> {
    if optional && value.is_empty() {
        return Ok(());
    }
    validate_domain(value).map_err(|e| e.to_string())?;
    match taken.iter().find(|(domain, _)| *domain == value) {
        Some((_, kind)) => Err(format!("cannot be same as {kind} domain name")),
        None => Ok(()),
    }
}

fn fetch_latest_release() -> Option<String> {
    match GithubReleaseSource::public().and_then(|source| source.latest_version()) {
        Ok(tag) => Some(tag),
        Err(err) => {
            tracing::warn!(error = %err, "release lookup failed");
            eprintln!("⚠️  {err}");
            None
        }
    }
}

fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize, AppError> {
    Select::new().with_prompt(prompt).items(items).default(0).interact().map_err(prompt_error)
}

fn prompt_domain(
    prompt: &str,
    taken: &[(&str, &str)],
    optional: bool,
) -> Result<String, AppError> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(optional)
        .validate_with(|value: &String| check_domain(value, taken, optional))
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_ssl_issuer() -> Result<SslIssuer, AppError> {
    if select("Which SSL issuers to use?", &SSL_CHOICES)? == 0 {
        return Ok(SslIssuer::LetsEncrypt);
    }
    let api_key: String = Input::new()
        .with_prompt("ZeroSSL API Key")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    let api_key = api_key.trim();
    Ok(SslIssuer::ZeroSsl { api_key: (!api_key.is_empty()).then(|| api_key.to_string()) })
}

fn prompt_version() -> Result<String, AppError> {
    let choices = version_choices(fetch_latest_release().as_deref());
    let index = select("LiveKit version", &choices)?;
    if choices[index] != CUSTOM_VERSION {
        return Ok(choices[index].clone());
    }
    Input::<String>::new()
        .with_prompt("Custom version (i.e. v1.8)")
        .validate_with(|value: &String| validate_version(value).map_err(|e| e.to_string()))
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_error(err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(io) if io.kind() == ErrorKind::Interrupted => {
            AppError::Prompt("aborted".to_string())
        }
        other => AppError::Prompt(other.to_string()),
    }
}
