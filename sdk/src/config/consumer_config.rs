use crate::codec::Codec;
use crate::config::DEFAULT_BOOTSTRAP_SERVERS;
use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use uuid::Uuid;

/// Where a consumer group starts reading a partition it has no committed offset for.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OffsetReset {
    /// From the first record of the partition.
    #[default]
    Earliest,
    /// From the current end of the partition, only records appended later are consumed.
    Latest,
}

#[derive(Builder, Debug, Clone)]
#[builder(on(String, into))]
pub struct ConsumerConfig {
    #[builder(default = DEFAULT_BOOTSTRAP_SERVERS.to_string())]
    bootstrap_servers: String,
    #[builder(default = generate_group_id())]
    group_id: String,
    #[builder(default)]
    offset_reset: OffsetReset,
    #[builder(default)]
    key_codec: Codec,
    #[builder(default)]
    value_codec: Codec,
    #[builder(default = 500)]
    max_poll_records: u32,
    #[builder(default = true)]
    auto_commit: bool,
}

fn generate_group_id() -> String {
    format!("brook-consumer-{}", Uuid::now_v7())
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        ConsumerConfig::builder().build()
    }
}

impl ConsumerConfig {
    pub fn bootstrap_servers(&self) -> &str {
        &self.bootstrap_servers
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn offset_reset(&self) -> OffsetReset {
        self.offset_reset
    }

    pub fn key_codec(&self) -> Codec {
        self.key_codec
    }

    pub fn value_codec(&self) -> Codec {
        self.value_codec
    }

    pub fn max_poll_records(&self) -> u32 {
        self.max_poll_records.max(1)
    }

    pub fn auto_commit(&self) -> bool {
        self.auto_commit
    }
}
