use clap::Parser;
use std::{
    net::SocketAddr,
    path::PathBuf,
};

/// Prometheus exporter for challengize.com competition scores
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Path to a YAML config file. Defaults to `config.yaml` in the config directory.
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Value of the `JSESSIONID` session cookie.
    #[clap(long, env = "JSESSIONID", hide_env_values = true, value_name = "TOKEN")]
    pub session_id: Option<String>,

    /// Value of the `remember` login cookie.
    #[clap(long, env = "REMEMBER", hide_env_values = true, value_name = "TOKEN")]
    pub remember: Option<String>,

    /// Address the metrics endpoint listens on.
    #[clap(long, value_name = "ADDRESS")]
    pub listen_address: Option<SocketAddr>,

    /// Time between two scrapes of the dashboard, e.g. `15m`.
    #[clap(long, value_name = "DURATION")]
    pub refresh_interval: Option<String>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[clap(long = "verbose", short = 'v', action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(session_id) = &self.session_id {
                cache.insert("credentials.session_id".to_string(), session_id.clone().into());
            }
            if let Some(remember) = &self.remember {
                cache.insert("credentials.remember".to_string(), remember.clone().into());
            }
            if let Some(listen_address) = &self.listen_address {
                cache.insert("listen_address".to_string(), listen_address.to_string().into());
            }
            if let Some(refresh_interval) = &self.refresh_interval {
                cache.insert("refresh_interval".to_string(), refresh_interval.clone().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let version = clap::crate_version!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "\
{version}

Config directory: {config_dir_path}"
    )
}
