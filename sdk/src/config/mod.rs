mod consumer_config;
mod producer_config;

pub use consumer_config::{ConsumerConfig, OffsetReset};
pub use producer_config::ProducerConfig;

pub(crate) const DEFAULT_BOOTSTRAP_SERVERS: &str = "127.0.0.1:8090";
