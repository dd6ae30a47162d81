use crate::codec::Codec;
use crate::config::DEFAULT_BOOTSTRAP_SERVERS;
use crate::messages::send_messages::Acknowledgment;
use crate::utils::duration::BrookDuration;
use bon::Builder;

#[derive(Builder, Debug, Clone)]
#[builder(on(String, into))]
pub struct ProducerConfig {
    #[builder(default = DEFAULT_BOOTSTRAP_SERVERS.to_string())]
    bootstrap_servers: String,
    #[builder(default)]
    acknowledgment: Acknowledgment,
    #[builder(default)]
    retries: u32,
    #[builder(default = BrookDuration::from_millis(100))]
    retry_interval: BrookDuration,
    #[builder(default)]
    key_codec: Codec,
    #[builder(default)]
    value_codec: Codec,
    #[builder(default = 1)]
    batch_size: u32,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        ProducerConfig::builder().build()
    }
}

impl ProducerConfig {
    /// Creates the default configuration for the broker at `bootstrap_servers`.
    pub fn from_bootstrap_servers(bootstrap_servers: &str) -> Self {
        ProducerConfig::builder()
            .bootstrap_servers(bootstrap_servers)
            .build()
    }

    pub fn bootstrap_servers(&self) -> &str {
        &self.bootstrap_servers
    }

    pub fn acknowledgment(&self) -> Acknowledgment {
        self.acknowledgment
    }

    /// How many times a batch is sent again after the connection broke. Zero disables resending.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn retry_interval(&self) -> BrookDuration {
        self.retry_interval
    }

    pub fn key_codec(&self) -> Codec {
        self.key_codec
    }

    pub fn value_codec(&self) -> Codec {
        self.value_codec
    }

    /// The number of values `publish` groups into a single acknowledged batch, at least 1.
    pub fn batch_size(&self) -> u32 {
        self.batch_size.max(1)
    }
}
