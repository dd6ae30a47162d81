use crate::streaming::systems::system::System;
use crate::streaming::topics::topic::Topic;
use brook::error::BrookError;
use brook::topics::MAX_PARTITIONS_COUNT;
use brook::utils::text;
use tracing::info;

impl System {
    pub fn find_topic(&self, name: &str) -> Option<&Topic> {
        self.topics.get(name)
    }

    pub fn get_topic(&self, name: &str) -> Result<&Topic, BrookError> {
        self.topics
            .get(name)
            .ok_or_else(|| BrookError::TopicNotFound(name.to_string()))
    }

    pub fn get_topic_mut(&mut self, name: &str) -> Result<&mut Topic, BrookError> {
        self.topics
            .get_mut(name)
            .ok_or_else(|| BrookError::TopicNotFound(name.to_string()))
    }

    /// Returns the topics sorted by name.
    pub fn get_topics(&self) -> Vec<&Topic> {
        let mut topics: Vec<&Topic> = self.topics.values().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }

    /// Creating an existing topic with the same partitions count is a no-op.
    pub fn create_topic(
        &mut self,
        name: &str,
        partitions_count: u32,
    ) -> Result<&Topic, BrookError> {
        text::validate_topic_name(name)?;
        if !(1..=MAX_PARTITIONS_COUNT).contains(&partitions_count) {
            return Err(BrookError::InvalidPartitionsCount);
        }

        if let Some(topic) = self.topics.get(name) {
            if topic.get_partitions_count() != partitions_count {
                return Err(BrookError::TopicAlreadyExists(name.to_string()));
            }
            info!("Topic: {name} already exists with {partitions_count} partition(s).");
        } else {
            self.topics
                .insert(name.to_string(), Topic::create(name, partitions_count));
            info!("Created topic: {name} with {partitions_count} partition(s).");
        }

        self.get_topic(name)
    }

    pub fn delete_topic(&mut self, name: &str) -> Result<(), BrookError> {
        let topic = self
            .topics
            .remove(name)
            .ok_or_else(|| BrookError::TopicNotFound(name.to_string()))?;
        for partition in &topic.partitions {
            partition.appended().notify_waiters();
        }
        self.consumer_offsets.retain(|key, _| key.topic != name);
        info!("Deleted topic: {name}.");
        Ok(())
    }
}
