use crate::streaming::topics::topic::Topic;
use brook::bytes_serializable::BytesSerializable;
use brook::models::topic::Topic as TopicInfo;
use bytes::Bytes;

pub fn map_topic(topic: &Topic) -> Bytes {
    topic.to_details().to_bytes()
}

pub fn map_topics(topics: &[&Topic]) -> Bytes {
    let topics: Vec<TopicInfo> = topics.iter().map(|topic| topic.to_info()).collect();
    TopicInfo::list_to_bytes(&topics)
}

pub fn map_consumer_offset(offset: u64) -> Bytes {
    Bytes::copy_from_slice(&offset.to_le_bytes())
}
