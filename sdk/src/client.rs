use crate::error::BrookError;
use crate::messages::send_messages::{Acknowledgment, Partitioning};
use crate::models::messages::{AppendedRecords, PolledRecords};
use crate::models::record::Record;
use crate::models::topic::{Topic, TopicDetails};
use crate::utils::duration::BrookDuration;
use async_trait::async_trait;
use std::fmt::Debug;

/// The client trait which is the main interface to the Brook broker.
/// It consists of multiple modules, each of which is responsible for a specific set of commands.
/// Except the ping, all the other methods require the client to be connected.
#[async_trait]
pub trait Client:
    SystemClient + TopicClient + MessageClient + ConsumerOffsetClient + Send + Sync + Debug
{
    /// Connect to the broker. Depending on the configuration, it might retry the connection.
    async fn connect(&self) -> Result<(), BrookError>;

    /// Disconnect from the broker. Disconnecting a disconnected client is a no-op.
    async fn disconnect(&self) -> Result<(), BrookError>;
}

/// This trait defines the methods to interact with the system module.
#[async_trait]
pub trait SystemClient {
    /// Ping the broker to check if it's alive.
    async fn ping(&self) -> Result<(), BrookError>;
}

/// This trait defines the methods to interact with the topic module.
#[async_trait]
pub trait TopicClient {
    /// Get the info about a specific topic by its name.
    ///
    /// Returns `None` if the topic does not exist.
    async fn get_topic(&self, name: &str) -> Result<Option<TopicDetails>, BrookError>;
    /// Get the info about all the topics, sorted by name.
    async fn get_topics(&self) -> Result<Vec<Topic>, BrookError>;
    /// Create a new topic with the given partitions count.
    ///
    /// Creating a topic which already exists with the same partitions count succeeds.
    async fn create_topic(&self, name: &str, partitions_count: u32) -> Result<(), BrookError>;
    /// Delete a topic with all its records and the consumer offsets stored for it.
    async fn delete_topic(&self, name: &str) -> Result<(), BrookError>;
}

/// This trait defines the methods to interact with the messaging module.
#[async_trait]
pub trait MessageClient {
    /// Poll up to `count` records from the partition, starting at `offset`.
    ///
    /// If no record is available yet, the broker holds the request up to `max_wait`.
    async fn poll_messages(
        &self,
        topic: &str,
        partition_id: u32,
        offset: u64,
        count: u32,
        max_wait: BrookDuration,
    ) -> Result<PolledRecords, BrookError>;

    /// Send the batch of records to the topic. The whole batch lands in a single partition,
    /// in order, and is appended before the broker responds.
    async fn send_messages(
        &self,
        topic: &str,
        partitioning: &Partitioning,
        acknowledgment: Acknowledgment,
        records: Vec<Record>,
    ) -> Result<AppendedRecords, BrookError>;
}

/// This trait defines the methods to interact with the consumer offset module.
#[async_trait]
pub trait ConsumerOffsetClient {
    /// Get the offset committed by the consumer group for the partition, if any.
    async fn get_consumer_offset(
        &self,
        group: &str,
        topic: &str,
        partition_id: u32,
    ) -> Result<Option<u64>, BrookError>;

    /// Commit the offset of the next record the consumer group should consume.
    async fn store_consumer_offset(
        &self,
        group: &str,
        topic: &str,
        partition_id: u32,
        offset: u64,
    ) -> Result<(), BrookError>;
}
