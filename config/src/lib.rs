#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod duration;
mod stages;
mod upstream;

pub use app_config::get_config_dir;
pub use args::Args;
use color_eyre::Result;
use eyre::bail;
use serde::{
    Deserialize,
    Serialize,
};
pub use stages::{
    Stage,
    StageRange,
    StagesConfig,
};
use std::{
    net::SocketAddr,
    time::Duration,
};
pub use upstream::{
    Credentials,
    UpstreamConfig,
};

/// Prefix of environment variables that override config keys, e.g. `CHALLENGIZE__STAGES__USERS__LAST`.
const ENV_PREFIX: &str = "CHALLENGIZE";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub listen_address: SocketAddr,
    #[serde(with = "duration")]
    pub refresh_interval: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_namespace: Option<String>,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub credentials: Credentials,
    pub stages: StagesConfig,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl Config {
    /// Layers the built-in defaults, the config file, `CHALLENGIZE__*` environment variables and
    /// the command line, in that order.
    pub fn load(args: Args) -> Result<Self, config::ConfigError> {
        Self::load_with_env(args, None)
    }

    /// Like [`Config::load`], but reads the environment layer from `env` instead of the process
    /// environment when given.
    fn load_with_env(args: Args, env: Option<config::Map<String, String>>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml));

        let file = match &args.config {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::from(get_config_dir().join("config.yaml")).required(false),
        };
        builder = builder.add_source(file.format(config::FileFormat::Yaml));

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(env),
        );

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;
        debug!(?cfg, "loaded configuration");

        Ok(cfg)
    }

    /// Checks what cannot be expressed in the types. The credentials are only checked for presence.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.session_id.trim().is_empty() {
            bail!("no JSESSIONID credential configured, set the JSESSIONID environment variable or pass --session-id");
        }
        if self.credentials.remember.trim().is_empty() {
            bail!("no remember credential configured, set the REMEMBER environment variable or pass --remember");
        }
        for (category, range) in [("users", self.stages.users), ("teams", self.stages.teams)] {
            if range.is_empty() {
                bail!("stages.{category} must not be empty, got {range}");
            }
        }
        if self.refresh_interval.is_zero() {
            bail!("refresh_interval must be greater than zero");
        }
        Ok(())
    }

    /// Metric name prefix, `None` when unset or blank.
    pub fn metrics_namespace(&self) -> Option<&str> {
        self.metrics_namespace
            .as_deref()
            .map(str::trim)
            .filter(|namespace| !namespace.is_empty())
    }
}
