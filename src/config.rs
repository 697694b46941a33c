use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_PATH: &str = ".fleet-admin/session.json";
pub const DEFAULT_CONFIG_NAME: &str = "fleet-admin";

#[derive(Parser, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    /// Backend base URL
    #[arg(long, env = "FLEET_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FLEET_API_TIMEOUT", global = true)]
    pub timeout_secs: Option<u64>,

    /// File holding the persisted session token
    #[arg(long, env = "FLEET_SESSION_FILE", global = true)]
    pub session_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub routes: RoutesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    pub login_path: String,
    pub default_path: String,
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = ConfigArgs::try_parse_from(args)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::load(&cli)
    }

    /// Priority: CLI flag > CLI env var > `FLEET_` environment > config file > defaults.
    pub fn load(cli: &ConfigArgs) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_API_URL)?
            .set_default("api.timeout_secs", 30)?
            .set_default("session.path", DEFAULT_SESSION_PATH)?
            .set_default("routes.login_path", "/login")?
            .set_default("routes.default_path", "/homepage")?;

        // An explicit file must exist; the working-directory one is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        // E.g. FLEET_API__BASE_URL=https://api.example.com
        builder = builder.add_source(
            Environment::with_prefix("FLEET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = &cli.api_url {
            builder = builder.set_override("api.base_url", url.as_str())?;
        }
        if let Some(timeout) = cli.timeout_secs {
            builder = builder.set_override("api.timeout_secs", timeout)?;
        }
        if let Some(path) = &cli.session_file {
            builder = builder.set_override("session.path", path.as_str())?;
        }

        builder.build()?.try_deserialize()
    }
}
