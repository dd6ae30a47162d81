use crate::harness_error::HarnessError;
use crate::unique_name;
use brook::clients::consumer::BrookConsumer;
use brook::config::{ConsumerConfig, OffsetReset};
use bytes::Bytes;
use std::fmt::Write;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Reads a topic from its beginning with a fresh consumer group and collects the values
/// in delivery order.
#[derive(Debug, Clone)]
pub struct RecordVerifier {
    config: ConsumerConfig,
}

impl RecordVerifier {
    /// A verifier with its own consumer group, reading from the earliest offset.
    pub fn new(bootstrap_servers: &str) -> Self {
        Self::with_config(
            ConsumerConfig::builder()
                .bootstrap_servers(bootstrap_servers)
                .group_id(unique_name("verifier"))
                .offset_reset(OffsetReset::Earliest)
                .auto_commit(false)
                .build(),
        )
    }

    pub fn with_config(config: ConsumerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// Polls the topic until `expected_count` values were delivered or `max_total_wait` elapsed.
    ///
    /// A poll never waits longer than `poll_interval` nor past the deadline, the broker answers
    /// early as soon as records arrive. Returning fewer values than expected is not an error.
    pub async fn drain(
        &self,
        topic: &str,
        expected_count: usize,
        poll_interval: Duration,
        max_total_wait: Duration,
    ) -> Result<Vec<Bytes>, HarnessError> {
        if expected_count == 0 {
            return Ok(Vec::new());
        }

        let deadline = Instant::now() + max_total_wait;
        let mut consumer =
            BrookConsumer::new(self.config.clone()).map_err(HarnessError::Consume)?;
        let result = Self::collect(
            &mut consumer,
            topic,
            expected_count,
            poll_interval,
            deadline,
        )
        .await;
        if let Err(error) = consumer.close().await {
            warn!("Failed to close the verifier consumer, {error}");
        }

        let values = result?;
        info!(
            "Drained {} of {expected_count} expected record(s) from topic: {topic}",
            values.len()
        );
        Ok(values)
    }

    async fn collect(
        consumer: &mut BrookConsumer,
        topic: &str,
        expected_count: usize,
        poll_interval: Duration,
        deadline: Instant,
    ) -> Result<Vec<Bytes>, HarnessError> {
        consumer
            .subscribe(&[topic])
            .await
            .map_err(HarnessError::Consume)?;

        let mut values = Vec::with_capacity(expected_count);
        while values.len() < expected_count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let records = consumer
                .poll(poll_interval.min(remaining))
                .await
                .map_err(HarnessError::Consume)?;
            debug!("Verifier polled {} record(s) from: {topic}", records.len());
            values.extend(records.into_iter().map(|record| record.value));
        }
        Ok(values)
    }

    /// Drains the topic and renders the values with the value codec of the consumer.
    pub async fn drain_values(
        &self,
        topic: &str,
        expected_count: usize,
        poll_interval: Duration,
        max_total_wait: Duration,
    ) -> Result<Vec<String>, HarnessError> {
        let codec = self.config.value_codec();
        self.drain(topic, expected_count, poll_interval, max_total_wait)
            .await?
            .iter()
            .map(|value| codec.decode_to_string(value))
            .collect::<Result<Vec<_>, _>>()
            .map_err(HarnessError::Consume)
    }
}

/// Compares the delivered values with the published ones, order included.
pub fn verify<E, A>(expected: &[E], actual: &[A]) -> Result<(), HarnessError>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let matches = expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(expected, actual)| expected.as_ref() == actual.as_ref());
    if matches {
        return Ok(());
    }

    let expected = expected
        .iter()
        .map(|value| value.as_ref().to_string())
        .collect::<Vec<_>>();
    let actual = actual
        .iter()
        .map(|value| value.as_ref().to_string())
        .collect::<Vec<_>>();
    let diff = diff_lines(&expected, &actual);
    Err(HarnessError::VerificationMismatch {
        expected,
        actual,
        diff,
    })
}

/// Renders a positional diff, `-` for the expected line and `+` for the delivered one.
fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let mut diff = String::new();
    for index in 0..expected.len().max(actual.len()) {
        match (expected.get(index), actual.get(index)) {
            (Some(expected), Some(actual)) if expected == actual => {
                let _ = writeln!(diff, "  {index}: {expected}");
            }
            (expected, actual) => {
                if let Some(expected) = expected {
                    let _ = writeln!(diff, "- {index}: {expected}");
                }
                if let Some(actual) = actual {
                    let _ = writeln!(diff, "+ {index}: {actual}");
                }
            }
        }
    }
    diff
}

/// Renders raw values as text, invalid UTF-8 is replaced.
pub fn to_lines(values: &[Bytes]) -> Vec<String> {
    values
        .iter()
        .map(|value| String::from_utf8_lossy(value).into_owned())
        .collect()
}
