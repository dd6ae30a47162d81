use crate::streaming::systems::system::{ConsumerOffsetKey, System};
use brook::error::BrookError;
use brook::utils::text;
use tracing::trace;

impl System {
    pub fn get_consumer_offset(
        &self,
        group: &str,
        topic: &str,
        partition_id: u32,
    ) -> Result<Option<u64>, BrookError> {
        self.get_topic(topic)?.get_partition(partition_id)?;
        let key = ConsumerOffsetKey {
            group: group.to_string(),
            topic: topic.to_string(),
            partition_id,
        };
        Ok(self.consumer_offsets.get(&key).copied())
    }

    pub fn store_consumer_offset(
        &mut self,
        group: &str,
        topic: &str,
        partition_id: u32,
        offset: u64,
    ) -> Result<(), BrookError> {
        text::validate_group_name(group)?;
        self.get_topic(topic)?.get_partition(partition_id)?;
        trace!("Storing offset: {offset} for group: {group}, topic: {topic}/{partition_id}");
        self.consumer_offsets.insert(
            ConsumerOffsetKey {
                group: group.to_string(),
                topic: topic.to_string(),
                partition_id,
            },
            offset,
        );
        Ok(())
    }
}
