pub mod ephemeral_broker;
pub mod file;
pub mod harness_error;
pub mod scenario;
pub mod verifier;

use uuid::Uuid;

/// Returns a topic, group or job name which is unique across the tests.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7().simple())
}

/// Installs the console logger once, `RUST_LOG` controls the level.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
