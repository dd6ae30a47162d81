use brook::error::BrookError;
use thiserror::Error;
use tokio::io;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error")]
    IoError(#[from] io::Error),
    #[error("Cannot load configuration: {0}")]
    CannotLoadConfiguration(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("SDK error")]
    SdkError(#[from] BrookError),
    #[error("Cannot bind TCP listener to address: {0}")]
    CannotBindAddress(String),
    #[error("Cannot persist runtime configuration: {0}")]
    CannotPersistRuntimeConfig(String),
    #[error("Command length error: {0}")]
    CommandLengthError(String),
    #[error("Logging initialization failure: {0}")]
    LoggingInitFailure(String),
    #[error("Server is already running")]
    AlreadyRunning,
}
