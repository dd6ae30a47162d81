use crate::configs::server::ServerConfig;
use crate::server_error::ServerError;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use std::env;
use std::path::Path;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "configs/server.toml";
const CONFIG_PATH_ENV: &str = "BROOK_CONFIG_PATH";
const ENV_PREFIX: &str = "BROOK_";
const ENV_SEPARATOR: &str = "__";

/// Loads the broker configuration from a TOML file. `BROOK_` prefixed environment variables
/// override the file, with `__` between the nested keys, e.g. `BROOK_SYSTEM__MAX_POLL_WAIT=1s`.
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: String,
}

impl FileConfigProvider {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    /// Uses the path from `BROOK_CONFIG_PATH`, or `configs/server.toml`.
    pub fn from_env() -> Self {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn load_config(&self) -> Result<ServerConfig, ServerError> {
        info!("Loading config from path: '{}'...", self.path);
        if !Path::new(&self.path).is_file() {
            return Err(ServerError::CannotLoadConfiguration(format!(
                "Cannot find configuration file at path: '{}'.",
                self.path,
            )));
        }

        let config: ServerConfig = Figment::new()
            .merge(Toml::file_exact(&self.path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split(ENV_SEPARATOR)
                    .ignore(&["config_path"]),
            )
            .extract()
            .map_err(|error| {
                ServerError::CannotLoadConfiguration(format!(
                    "Failed to load configuration: {error}"
                ))
            })?;
        info!("Config loaded from path: '{}'", self.path);
        Ok(config)
    }
}
