use brook::error::BrookError;
use thiserror::Error;

/// The failures of a pass-through scenario, one variant per stage.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Broker cannot be started: {0}")]
    StartupError(String),
    #[error("Topic: {topic} cannot be created: {reason}")]
    TopicCreationError { topic: String, reason: String },
    #[error("Publishing to topic: {topic} has failed: {source}")]
    PublishError {
        topic: String,
        #[source]
        source: BrookError,
    },
    #[error("Shutdown has timed out: {0}")]
    ShutdownTimeoutError(String),
    #[error(
        "Delivered records do not match, expected: {} record(s), delivered: {} record(s)\n{diff}",
        .expected.len(),
        .actual.len()
    )]
    VerificationMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
        diff: String,
    },
    #[error("Job error: {0}")]
    Job(#[source] BrookError),
    #[error("Consume error: {0}")]
    Consume(#[source] BrookError),
}

impl HarnessError {
    /// Maps the error of stopping a job, a timeout keeps its own variant.
    pub fn from_job_stop(error: BrookError) -> Self {
        match error {
            BrookError::JobShutdownTimeout(timeout) => HarnessError::ShutdownTimeoutError(timeout),
            error => HarnessError::Job(error),
        }
    }
}
