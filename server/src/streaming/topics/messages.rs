use crate::streaming::topics::topic::Topic;
use crate::streaming::utils::hash;
use brook::error::BrookError;
use brook::messages::send_messages::{Partitioning, PartitioningKind};
use brook::models::messages::AppendedRecords;
use brook::models::record::Record;
use std::sync::atomic::Ordering;
use tracing::trace;

impl Topic {
    pub fn append_messages(
        &mut self,
        partitioning: &Partitioning,
        records: Vec<Record>,
    ) -> Result<AppendedRecords, BrookError> {
        if self.partitions.is_empty() {
            return Err(BrookError::InvalidPartitionsCount);
        }

        let partition_id = match partitioning.kind {
            PartitioningKind::Balanced => self.get_next_partition_id(),
            PartitioningKind::PartitionId => partitioning
                .get_partition_id()
                .ok_or(BrookError::InvalidCommand)?,
            PartitioningKind::Key => {
                self.calculate_partition_id_by_messages_key_hash(&partitioning.value)
            }
        };

        let count = records.len() as u32;
        let base_offset = self
            .get_partition_mut(partition_id)?
            .append_records(records);
        Ok(AppendedRecords {
            partition_id,
            base_offset,
            count,
        })
    }

    fn get_next_partition_id(&self) -> u32 {
        let partitions_count = self.get_partitions_count();
        let partition_id =
            self.current_partition_id.fetch_add(1, Ordering::SeqCst) % partitions_count;
        trace!("Next partition ID: {}", partition_id);
        partition_id
    }

    fn calculate_partition_id_by_messages_key_hash(&self, messages_key: &[u8]) -> u32 {
        let messages_key_hash = hash::calculate_32(messages_key);
        let partition_id = messages_key_hash % self.get_partitions_count();
        trace!(
            "Calculated partition ID: {} for messages key: {:?}, hash: {}",
            partition_id,
            messages_key,
            messages_key_hash
        );
        partition_id
    }
}
