use crate::client::Client;
use crate::config::{ConsumerConfig, OffsetReset};
use crate::error::BrookError;
use crate::models::messages::PolledRecords;
use crate::models::record::ConsumerRecord;
use crate::tcp::client::TcpClient;
use crate::tcp::config::TcpClientConfigBuilder;
use crate::utils::duration::BrookDuration;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

/// The position of the consumer in a single partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionAssignment {
    pub topic: String,
    pub partition_id: u32,
    /// The offset of the next record to poll.
    pub position: u64,
    /// The offset last committed for the group, if any.
    pub committed: Option<u64>,
}

/// The consumer reads records of the subscribed topics on behalf of a consumer group.
///
/// Positions are resolved on `subscribe`: the offset committed by the group,
/// otherwise the `offset_reset` policy. Records of a partition are returned in offset order,
/// partitions are polled round-robin.
#[derive(Debug)]
pub struct BrookConsumer {
    client: Arc<dyn Client>,
    config: ConsumerConfig,
    assignments: Vec<PartitionAssignment>,
    next_partition: usize,
    initialized: bool,
    closed: bool,
}

impl BrookConsumer {
    /// Creates the consumer with its own TCP client. Call `init` before subscribing.
    pub fn new(config: ConsumerConfig) -> Result<Self, BrookError> {
        let client = TcpClient::create(Arc::new(
            TcpClientConfigBuilder::new()
                .with_server_address(config.bootstrap_servers().to_string())
                .build(),
        ))?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    /// Creates the consumer on top of the provided client.
    pub fn with_client(client: Arc<dyn Client>, config: ConsumerConfig) -> Self {
        Self {
            client,
            config,
            assignments: Vec::new(),
            next_partition: 0,
            initialized: false,
            closed: false,
        }
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    pub fn assignments(&self) -> &[PartitionAssignment] {
        &self.assignments
    }

    pub async fn init(&mut self) -> Result<(), BrookError> {
        if self.closed {
            return Err(BrookError::NotConnected);
        }

        if self.initialized {
            return Ok(());
        }

        self.client.connect().await?;
        self.initialized = true;
        info!(
            "Consumer for group: {} has been initialized.",
            self.config.group_id()
        );
        Ok(())
    }

    /// Subscribes to the topics and resolves the starting position of every partition.
    /// Replaces the previous subscription.
    pub async fn subscribe(&mut self, topics: &[&str]) -> Result<(), BrookError> {
        self.init().await?;
        let mut assignments = Vec::new();
        for topic in topics {
            let Some(details) = self.client.get_topic(topic).await? else {
                return Err(BrookError::TopicNotFound(topic.to_string()));
            };

            for partition in details.partitions {
                let committed = self
                    .client
                    .get_consumer_offset(self.config.group_id(), topic, partition.id)
                    .await?;
                let position = match (committed, self.config.offset_reset()) {
                    (Some(committed), _) => committed,
                    (None, OffsetReset::Earliest) => 0,
                    (None, OffsetReset::Latest) => partition.end_offset,
                };
                debug!(
                    "Group: {} starts topic: {topic}, partition: {} at offset: {position}",
                    self.config.group_id(),
                    partition.id
                );
                assignments.push(PartitionAssignment {
                    topic: topic.to_string(),
                    partition_id: partition.id,
                    position,
                    committed,
                });
            }
        }

        info!(
            "Group: {} has subscribed to: {} with {} partitions.",
            self.config.group_id(),
            topics.join(", "),
            assignments.len()
        );
        self.assignments = assignments;
        self.next_partition = 0;
        Ok(())
    }

    /// Returns the next records, at most `max_poll_records`.
    ///
    /// Waits up to `timeout` when no record is available, the broker holds the fetch
    /// and answers as soon as records are appended. An empty result means the timeout elapsed.
    pub async fn poll(&mut self, timeout: Duration) -> Result<Vec<ConsumerRecord>, BrookError> {
        if self.assignments.is_empty() {
            return Err(BrookError::ConsumerNotSubscribed);
        }

        let deadline = Instant::now() + timeout;
        let partitions_count = self.assignments.len();
        let max_records = self.config.max_poll_records();
        let mut records = Vec::new();
        loop {
            for _ in 0..partitions_count {
                let capacity = max_records - records.len() as u32;
                if capacity == 0 {
                    break;
                }

                self.poll_partition(capacity, Duration::ZERO, &mut records)
                    .await?;
            }

            if !records.is_empty() {
                break;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let wait = if partitions_count == 1 {
                remaining
            } else {
                (remaining / partitions_count as u32)
                    .max(Duration::from_millis(1))
                    .min(remaining)
            };
            self.poll_partition(max_records, wait, &mut records).await?;
            if !records.is_empty() {
                break;
            }
        }

        trace!("Polled {} records.", records.len());
        if self.config.auto_commit() && !records.is_empty() {
            self.commit().await?;
        }

        Ok(records)
    }

    async fn poll_partition(
        &mut self,
        count: u32,
        max_wait: Duration,
        records: &mut Vec<ConsumerRecord>,
    ) -> Result<(), BrookError> {
        let index = self.next_partition;
        self.next_partition = (index + 1) % self.assignments.len();
        let assignment = &self.assignments[index];
        let polled = self
            .client
            .poll_messages(
                &assignment.topic,
                assignment.partition_id,
                assignment.position,
                count,
                BrookDuration::new(max_wait),
            )
            .await?;
        let next_position = self.decode(index, polled, records)?;
        if let Some(next_position) = next_position {
            self.assignments[index].position = next_position;
        }
        Ok(())
    }

    fn decode(
        &self,
        index: usize,
        polled: PolledRecords,
        records: &mut Vec<ConsumerRecord>,
    ) -> Result<Option<u64>, BrookError> {
        let assignment = &self.assignments[index];
        let key_codec = self.config.key_codec();
        let value_codec = self.config.value_codec();
        let mut decoded = Vec::with_capacity(polled.records.len());
        for polled_record in polled.records {
            let record = polled_record.record;
            let key = record.key.map(|key| key_codec.decode(key)).transpose()?;
            decoded.push(ConsumerRecord {
                topic: assignment.topic.clone(),
                partition_id: polled.partition_id,
                offset: polled_record.offset,
                key,
                value: value_codec.decode(record.value)?,
                timestamp: record.timestamp,
            });
        }

        let next_position = decoded.last().map(|record| record.offset + 1);
        records.extend(decoded);
        Ok(next_position)
    }

    /// Stores the current positions for the group. Unchanged positions are skipped.
    pub async fn commit(&mut self) -> Result<(), BrookError> {
        for assignment in self.assignments.iter_mut() {
            if assignment.committed == Some(assignment.position) {
                continue;
            }

            self.client
                .store_consumer_offset(
                    self.config.group_id(),
                    &assignment.topic,
                    assignment.partition_id,
                    assignment.position,
                )
                .await?;
            assignment.committed = Some(assignment.position);
            trace!(
                "Committed offset: {} for topic: {}, partition: {}",
                assignment.position,
                assignment.topic,
                assignment.partition_id
            );
        }
        Ok(())
    }

    /// Commits the positions if auto-commit is enabled and disconnects.
    /// Closing a closed consumer is a no-op.
    pub async fn close(&mut self) -> Result<(), BrookError> {
        if self.closed {
            return Ok(());
        }

        self.closed = true;
        if self.initialized && self.config.auto_commit() {
            if let Err(error) = self.commit().await {
                warn!(
                    "Failed to commit offsets of group: {} on close, {error}",
                    self.config.group_id()
                );
            }
        }

        self.assignments.clear();
        self.client.disconnect().await?;
        info!("Consumer for group: {} has been closed.", self.config.group_id());
        Ok(())
    }
}
