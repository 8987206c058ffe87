//! The validated record of user decisions that drives one generation run.

use std::collections::BTreeSet;
use std::fmt;

use super::AppError;
use super::validation::{LATEST_VERSION, validate_domain, validate_server_version};

/// Where the primary service and add-ons find Redis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedisMode {
    /// Redis on the same host, reached over loopback.
    Local,
    /// Operator-supplied Redis; a placeholder address is written for them to fill in.
    External,
}

impl RedisMode {
    pub const LOCAL_HOST: &'static str = "localhost";
    pub const EXTERNAL_PLACEHOLDER_HOST: &'static str = "<redis-host>";

    /// Address written into every config that talks to Redis.
    pub fn address(self, port: u16) -> String {
        match self {
            RedisMode::Local => format!("{}:{port}", Self::LOCAL_HOST),
            RedisMode::External => format!("{}:{port}", Self::EXTERNAL_PLACEHOLDER_HOST),
        }
    }
}

/// Optional services deployed next to the primary server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddOn {
    Egress,
    Ingress,
}

/// ACME issuer used by the proxy for TLS certificates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SslIssuer {
    #[default]
    LetsEncrypt,
    ZeroSsl {
        api_key: Option<String>,
    },
}

impl SslIssuer {
    pub fn zerossl_api_key(&self) -> Option<&str> {
        match self {
            SslIssuer::LetsEncrypt => None,
            SslIssuer::ZeroSsl { api_key } => api_key.as_deref(),
        }
    }
}

/// Template role backing a boot-provisioning artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupTemplate {
    ShellScript,
    CloudInitAmazon,
    CloudInitUbuntu,
}

impl StartupTemplate {
    /// Indentation applied to embedded files.
    ///
    /// Shell heredocs take content verbatim; cloud-init nests it under a `content: |` block
    /// scalar inside a `write_files` list item.
    pub fn embed_indent(self) -> &'static str {
        match self {
            StartupTemplate::ShellScript => "",
            StartupTemplate::CloudInitAmazon | StartupTemplate::CloudInitUbuntu => "      ",
        }
    }

    pub fn template_name(self) -> &'static str {
        match self {
            StartupTemplate::ShellScript => "startup_script.sh.j2",
            StartupTemplate::CloudInitAmazon => "cloud_init_amazon.yaml.j2",
            StartupTemplate::CloudInitUbuntu => "cloud_init_ubuntu.yaml.j2",
        }
    }
}

/// Boot-time provisioning artifact to produce, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupKind {
    #[default]
    None,
    ShellScript,
    CloudInitAmazon,
    CloudInitUbuntu,
}

impl StartupKind {
    /// Order presented by the interactive flow.
    pub const ALL: [StartupKind; 4] = [
        StartupKind::ShellScript,
        StartupKind::CloudInitAmazon,
        StartupKind::CloudInitUbuntu,
        StartupKind::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StartupKind::None => "Skip",
            StartupKind::ShellScript => "Startup Shell Script",
            StartupKind::CloudInitAmazon => "Cloud Init for Amazon Linux",
            StartupKind::CloudInitUbuntu => "Cloud Init for Ubuntu",
        }
    }

    pub fn file_name(self) -> Option<&'static str> {
        match self {
            StartupKind::None => None,
            StartupKind::ShellScript => Some("init_script.sh"),
            StartupKind::CloudInitAmazon => Some("cloud_init.amazon.yaml"),
            StartupKind::CloudInitUbuntu => Some("cloud_init.ubuntu.yaml"),
        }
    }

    pub fn template(self) -> Option<StartupTemplate> {
        match self {
            StartupKind::None => None,
            StartupKind::ShellScript => Some(StartupTemplate::ShellScript),
            StartupKind::CloudInitAmazon => Some(StartupTemplate::CloudInitAmazon),
            StartupKind::CloudInitUbuntu => Some(StartupTemplate::CloudInitUbuntu),
        }
    }
}

impl fmt::Display for StartupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape of the primary service config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentProfile {
    /// Public deployment behind the TLS proxy with TURN enabled.
    #[default]
    Production,
    /// Single-host testing: no external IP discovery, no TURN.
    LocalTest,
}

/// Immutable, validated user decisions.
///
/// Construct through [`InputModel::builder`]; every constructor runs [`InputModel::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputModel {
    primary_domain: String,
    turn_domain: String,
    whip_domain: Option<String>,
    server_version: String,
    redis_mode: RedisMode,
    bundle_redis: bool,
    add_ons: BTreeSet<AddOn>,
    ssl_issuer: SslIssuer,
    startup_kind: StartupKind,
    profile: DeploymentProfile,
}

impl InputModel {
    pub const LOCAL_PRIMARY_DOMAIN: &'static str = "livekit.localhost";
    pub const LOCAL_TURN_DOMAIN: &'static str = "turn.livekit.localhost";

    pub fn builder(
        primary_domain: impl Into<String>,
        turn_domain: impl Into<String>,
    ) -> InputModelBuilder {
        InputModelBuilder::new(primary_domain.into(), turn_domain.into())
    }

    /// Zero-prompt preset for single-host testing.
    pub fn local_test() -> Result<Self, AppError> {
        Self::builder(Self::LOCAL_PRIMARY_DOMAIN, Self::LOCAL_TURN_DOMAIN)
            .profile(DeploymentProfile::LocalTest)
            .build()
    }

    /// Check every field and cross-field rule.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_domain(&self.primary_domain)?;
        validate_domain(&self.turn_domain)?;
        if self.turn_domain == self.primary_domain {
            return Err(AppError::invalid_input(
                "TURN domain cannot be same as primary domain name",
            ));
        }
        if let Some(whip) = &self.whip_domain {
            if !self.add_ons.contains(&AddOn::Ingress) {
                return Err(AppError::invalid_input("WHIP domain requires the Ingress add-on"));
            }
            validate_domain(whip)?;
            if whip == &self.primary_domain {
                return Err(AppError::invalid_input(
                    "WHIP domain cannot be same as primary domain name",
                ));
            }
            if whip == &self.turn_domain {
                return Err(AppError::invalid_input(
                    "WHIP domain cannot be same as TURN domain name",
                ));
            }
        }
        validate_server_version(&self.server_version)?;
        if self.bundle_redis && self.redis_mode == RedisMode::External {
            return Err(AppError::invalid_input("cannot bundle Redis when using external Redis"));
        }
        Ok(())
    }

    pub fn primary_domain(&self) -> &str {
        &self.primary_domain
    }

    pub fn turn_domain(&self) -> &str {
        &self.turn_domain
    }

    pub fn whip_domain(&self) -> Option<&str> {
        self.whip_domain.as_deref()
    }

    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn redis_mode(&self) -> RedisMode {
        self.redis_mode
    }

    /// Whether a Redis config and service are shipped with the bundle.
    pub fn bundles_redis(&self) -> bool {
        self.bundle_redis
    }

    pub fn add_ons(&self) -> &BTreeSet<AddOn> {
        &self.add_ons
    }

    pub fn includes(&self, add_on: AddOn) -> bool {
        self.add_ons.contains(&add_on)
    }

    pub fn ssl_issuer(&self) -> &SslIssuer {
        &self.ssl_issuer
    }

    pub fn startup_kind(&self) -> StartupKind {
        self.startup_kind
    }

    pub fn profile(&self) -> DeploymentProfile {
        self.profile
    }

    /// Client-facing signalling URL of the primary service.
    pub fn ws_url(&self) -> String {
        format!("wss://{}", self.primary_domain)
    }
}

/// Collects decisions before producing an [`InputModel`].
#[derive(Debug, Clone)]
pub struct InputModelBuilder {
    primary_domain: String,
    turn_domain: String,
    whip_domain: Option<String>,
    server_version: String,
    redis_mode: RedisMode,
    bundle_redis: bool,
    add_ons: BTreeSet<AddOn>,
    ssl_issuer: SslIssuer,
    startup_kind: StartupKind,
    profile: DeploymentProfile,
}

impl InputModelBuilder {
    fn new(primary_domain: String, turn_domain: String) -> Self {
        Self {
            primary_domain,
            turn_domain,
            whip_domain: None,
            server_version: LATEST_VERSION.to_string(),
            redis_mode: RedisMode::Local,
            bundle_redis: false,
            add_ons: BTreeSet::new(),
            ssl_issuer: SslIssuer::default(),
            startup_kind: StartupKind::None,
            profile: DeploymentProfile::Production,
        }
    }

    /// Optional WHIP domain; an empty string means none.
    pub fn whip_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.whip_domain = if domain.is_empty() { None } else { Some(domain) };
        self
    }

    pub fn server_version(mut self, version: impl Into<String>) -> Self {
        self.server_version = version.into();
        self
    }

    pub fn redis(mut self, mode: RedisMode, bundle: bool) -> Self {
        self.redis_mode = mode;
        self.bundle_redis = bundle;
        self
    }

    pub fn add_on(mut self, add_on: AddOn) -> Self {
        self.add_ons.insert(add_on);
        self
    }

    pub fn ssl_issuer(mut self, issuer: SslIssuer) -> Self {
        self.ssl_issuer = issuer;
        self
    }

    pub fn startup_kind(mut self, kind: StartupKind) -> Self {
        self.startup_kind = kind;
        self
    }

    pub fn profile(mut self, profile: DeploymentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn build(self) -> Result<InputModel, AppError> {
        let model = self.assemble();
        model.validate()?;
        Ok(model)
    }

    /// Model without validation, for exercising downstream checks.
    #[cfg(test)]
    pub(crate) fn build_unchecked(self) -> InputModel {
        self.assemble()
    }

    fn assemble(self) -> InputModel {
        InputModel {
            primary_domain: self.primary_domain,
            turn_domain: self.turn_domain,
            whip_domain: self.whip_domain,
            server_version: self.server_version,
            redis_mode: self.redis_mode,
            bundle_redis: self.bundle_redis,
            add_ons: self.add_ons,
            ssl_issuer: self.ssl_issuer,
            startup_kind: self.startup_kind,
            profile: self.profile,
        }
    }
}
