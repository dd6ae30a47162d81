use crate::configs::system::LoggingConfig;
use crate::server_error::ServerError;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const DEFAULT_LEVEL: &str = "info";

/// Console logging of the broker. `RUST_LOG` takes precedence over the configured level.
#[derive(Debug, Default)]
pub struct Logging {
    initialized: bool,
}

impl Logging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, config: &LoggingConfig) -> Result<(), ServerError> {
        if self.initialized {
            return Ok(());
        }

        let filter = EnvFilter::try_from_default_env().or_else(|_| {
            EnvFilter::try_new(Self::level_or_default(&config.level))
                .map_err(|error| ServerError::LoggingInitFailure(error.to_string()))
        })?;

        Registry::default()
            .with(filter)
            .with(fmt::Layer::default().with_target(true))
            .try_init()
            .map_err(|error| ServerError::LoggingInitFailure(error.to_string()))?;

        self.initialized = true;
        info!("Logging initialized, level: {}", config.level);
        Ok(())
    }

    fn level_or_default(level: &str) -> &str {
        if level.trim().is_empty() {
            DEFAULT_LEVEL
        } else {
            level
        }
    }
}
