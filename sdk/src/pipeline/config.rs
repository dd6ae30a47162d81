use crate::codec::Codec;
use crate::config::{OffsetReset, DEFAULT_BOOTSTRAP_SERVERS};
use crate::messages::send_messages::Acknowledgment;
use crate::utils::duration::BrookDuration;
use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Which timestamp a forwarded record carries.
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
pub enum TimestampPolicy {
    /// The wall-clock time at which the job ingested the record.
    #[default]
    WallClock,
    /// The timestamp of the input record.
    Record,
}

#[derive(Builder, Debug, Clone)]
#[builder(on(String, into))]
pub struct JobConfig {
    /// Also the consumer group the job reads the input topic with.
    job_id: String,
    #[builder(default = DEFAULT_BOOTSTRAP_SERVERS.to_string())]
    bootstrap_servers: String,
    #[builder(default)]
    key_codec: Codec,
    #[builder(default)]
    value_codec: Codec,
    #[builder(default)]
    timestamp_policy: TimestampPolicy,
    #[builder(default = BrookDuration::from_millis(100))]
    poll_interval: BrookDuration,
    #[builder(default = 500)]
    max_poll_records: u32,
    #[builder(default = OffsetReset::Latest)]
    offset_reset: OffsetReset,
    #[builder(default = Acknowledgment::All)]
    acknowledgment: Acknowledgment,
    #[builder(default = BrookDuration::from_secs(10))]
    shutdown_timeout: BrookDuration,
    #[builder(default = BrookDuration::from_secs(10))]
    readiness_timeout: BrookDuration,
}

impl JobConfig {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn bootstrap_servers(&self) -> &str {
        &self.bootstrap_servers
    }

    pub fn key_codec(&self) -> Codec {
        self.key_codec
    }

    pub fn value_codec(&self) -> Codec {
        self.value_codec
    }

    pub fn timestamp_policy(&self) -> TimestampPolicy {
        self.timestamp_policy
    }

    pub fn poll_interval(&self) -> BrookDuration {
        self.poll_interval
    }

    pub fn max_poll_records(&self) -> u32 {
        self.max_poll_records
    }

    /// Where the job starts reading partitions its group has never committed.
    pub fn offset_reset(&self) -> OffsetReset {
        self.offset_reset
    }

    pub fn acknowledgment(&self) -> Acknowledgment {
        self.acknowledgment
    }

    /// How long `stop` waits for the job to finish the batch in flight.
    pub fn shutdown_timeout(&self) -> BrookDuration {
        self.shutdown_timeout
    }

    /// How long the job may take to connect and resolve its input positions.
    pub fn readiness_timeout(&self) -> BrookDuration {
        self.readiness_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn should_be_equal() {
        let config = JobConfig::builder()
            .job_id("pass-through")
            .bootstrap_servers("127.0.0.1:9092")
            .timestamp_policy(TimestampPolicy::Record)
            .poll_interval(BrookDuration::from_millis(20))
            .shutdown_timeout(BrookDuration::from_secs(1))
            .build();

        assert_eq!(config.job_id(), "pass-through");
        assert_eq!(config.bootstrap_servers(), "127.0.0.1:9092");
        assert_eq!(config.timestamp_policy(), TimestampPolicy::Record);
        assert_eq!(config.poll_interval().as_millis(), 20);
        assert_eq!(config.shutdown_timeout().as_millis(), 1000);
    }

    #[test]
    fn defaults_should_start_from_latest_and_use_wall_clock() {
        let config = JobConfig::builder().job_id("job").build();
        assert_eq!(config.offset_reset(), OffsetReset::Latest);
        assert_eq!(config.timestamp_policy(), TimestampPolicy::WallClock);
        assert_eq!(config.key_codec(), Codec::String);
        assert_eq!(config.value_codec(), Codec::String);
    }

    #[test]
    fn timestamp_policy_should_be_parsed_from_snake_case() {
        assert_eq!(
            TimestampPolicy::from_str("wall_clock").unwrap(),
            TimestampPolicy::WallClock
        );
        assert_eq!(TimestampPolicy::Record.to_string(), "record");
    }
}
