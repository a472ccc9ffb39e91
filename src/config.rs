use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration, loaded once at start-up and handed to the adapter
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Spoonacular credential. The server still starts without it; every
    /// API call then fails with a configuration error.
    #[serde(default)]
    pub spoonacular_api_key: Option<String>,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL of the upstream provider (overridden in tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory holding the bundled web client
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            spoonacular_api_key: None,
            port: default_port(),
            base_url: default_base_url(),
            static_dir: default_static_dir(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("client/dist")
}

fn default_timeout() -> u64 {
    30
}

impl ServerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. `SPOONACULAR_API_KEY` and `PORT`
    /// 2. Environment variables with COOK_TODAY__ prefix
    /// 3. config.toml file in current directory
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The credential, treating an empty value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.spoonacular_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// First characters of the credential, for start-up diagnostics only
    pub fn api_key_hint(&self) -> String {
        match self.api_key() {
            Some(key) => key.chars().take(5).collect(),
            None => "NOT DEFINED".to_string(),
        }
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: COOK_TODAY__BASE_URL, COOK_TODAY__STATIC_DIR
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    layered_config(
        File::with_name("config").required(false),
        environment(),
        std::env::var("SPOONACULAR_API_KEY").ok(),
        std::env::var("PORT").ok(),
    )
}

fn environment() -> Environment {
    Environment::with_prefix("COOK_TODAY")
        .prefix_separator("__")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// Stack the sources in priority order. Blank `api_key`/`port` values are
/// treated as unset so they fall through to the lower layers.
fn layered_config<S>(
    file: S,
    env: Environment,
    api_key: Option<String>,
    port: Option<String>,
) -> Result<ServerConfig, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(file)
        .add_source(env)
        .set_override_option("spoonacular_api_key", non_blank(api_key))?
        .set_override_option("port", non_blank(port))?
        .build()?;

    settings.try_deserialize()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
