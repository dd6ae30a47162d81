use crate::binary::binary_client::BinaryClient;
use crate::binary::send_command;
use crate::bytes_serializable::BytesSerializable;
use crate::client::MessageClient;
use crate::error::BrookError;
use crate::messages::poll_messages::PollMessages;
use crate::messages::send_messages::{Acknowledgment, Partitioning, SendMessages};
use crate::models::messages::{AppendedRecords, PolledRecords};
use crate::models::record::Record;
use crate::utils::duration::BrookDuration;
use async_trait::async_trait;

#[async_trait]
impl<B: BinaryClient> MessageClient for B {
    async fn poll_messages(
        &self,
        topic: &str,
        partition_id: u32,
        offset: u64,
        count: u32,
        max_wait: BrookDuration,
    ) -> Result<PolledRecords, BrookError> {
        let response = send_command(
            self,
            &PollMessages {
                topic: topic.to_string(),
                partition_id,
                offset,
                count,
                max_wait_ms: max_wait.as_millis().min(u32::MAX as u64) as u32,
            },
        )
        .await?;
        PolledRecords::from_bytes(response)
    }

    async fn send_messages(
        &self,
        topic: &str,
        partitioning: &Partitioning,
        acknowledgment: Acknowledgment,
        records: Vec<Record>,
    ) -> Result<AppendedRecords, BrookError> {
        let response = send_command(
            self,
            &SendMessages {
                topic: topic.to_string(),
                partitioning: partitioning.clone(),
                acknowledgment,
                records,
            },
        )
        .await?;
        AppendedRecords::from_bytes(response)
    }
}
