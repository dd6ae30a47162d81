use crate::streaming::partitions::partition::Partition;
use brook::error::BrookError;
use brook::models::topic::{Partition as PartitionDetails, Topic as TopicInfo, TopicDetails};
use brook::utils::timestamp::BrookTimestamp;
use std::sync::atomic::AtomicU32;

#[derive(Debug)]
pub struct Topic {
    pub name: String,
    pub created_at: BrookTimestamp,
    pub(crate) partitions: Vec<Partition>,
    pub(crate) current_partition_id: AtomicU32,
}

impl Topic {
    pub fn create(name: &str, partitions_count: u32) -> Topic {
        Topic {
            name: name.to_string(),
            created_at: BrookTimestamp::now(),
            partitions: (0..partitions_count).map(Partition::create).collect(),
            current_partition_id: AtomicU32::new(0),
        }
    }

    pub fn get_partitions_count(&self) -> u32 {
        self.partitions.len() as u32
    }

    pub fn get_messages_count(&self) -> u64 {
        self.partitions
            .iter()
            .map(|partition| partition.end_offset())
            .sum()
    }

    pub fn get_partition(&self, partition_id: u32) -> Result<&Partition, BrookError> {
        self.partitions
            .get(partition_id as usize)
            .ok_or(BrookError::PartitionNotFound(partition_id))
    }

    pub fn get_partition_mut(&mut self, partition_id: u32) -> Result<&mut Partition, BrookError> {
        self.partitions
            .get_mut(partition_id as usize)
            .ok_or(BrookError::PartitionNotFound(partition_id))
    }

    pub fn to_info(&self) -> TopicInfo {
        TopicInfo {
            name: self.name.clone(),
            created_at: self.created_at,
            partitions_count: self.get_partitions_count(),
            messages_count: self.get_messages_count(),
        }
    }

    pub fn to_details(&self) -> TopicDetails {
        TopicDetails {
            name: self.name.clone(),
            created_at: self.created_at,
            partitions_count: self.get_partitions_count(),
            messages_count: self.get_messages_count(),
            partitions: self
                .partitions
                .iter()
                .map(|partition| PartitionDetails {
                    id: partition.partition_id,
                    end_offset: partition.end_offset(),
                })
                .collect(),
        }
    }
}
