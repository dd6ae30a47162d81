use crate::bytes_serializable::{
    read_short_string, read_u32, read_u64, write_short_string, BytesSerializable,
};
use crate::error::BrookError;
use crate::utils::timestamp::BrookTimestamp;
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// `Topic` represents the named, append-only log split into partitions.
/// It consists of the following fields:
/// - `name`: the unique name of the topic.
/// - `created_at`: the timestamp when the topic was created.
/// - `partitions_count`: the number of partitions in the topic.
/// - `messages_count`: the total number of records in the topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub created_at: BrookTimestamp,
    pub partitions_count: u32,
    pub messages_count: u64,
}

/// `TopicDetails` represents the topic together with its partitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDetails {
    pub name: String,
    pub created_at: BrookTimestamp,
    pub partitions_count: u32,
    pub messages_count: u64,
    pub partitions: Vec<Partition>,
}

/// `Partition` is a single ordered log of the topic.
/// - `id`: the 0-based identifier of the partition within the topic.
/// - `end_offset`: the offset the next appended record will get, equal to the records count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub id: u32,
    pub end_offset: u64,
}

impl Topic {
    pub(crate) fn write_to(&self, bytes: &mut BytesMut) {
        bytes.put_u64_le(self.created_at.as_micros());
        bytes.put_u32_le(self.partitions_count);
        bytes.put_u64_le(self.messages_count);
        write_short_string(bytes, &self.name);
    }

    pub(crate) fn read_from(bytes: &[u8], position: usize) -> Result<(Topic, usize), BrookError> {
        let created_at = read_u64(bytes, position)?;
        let partitions_count = read_u32(bytes, position + 8)?;
        let messages_count = read_u64(bytes, position + 12)?;
        let (name, name_read_bytes) = read_short_string(bytes, position + 20)?;
        Ok((
            Topic {
                name,
                created_at: created_at.into(),
                partitions_count,
                messages_count,
            },
            20 + name_read_bytes,
        ))
    }

    /// Serializes the list of topics as a concatenation of single topics.
    pub fn list_to_bytes(topics: &[Topic]) -> Bytes {
        let mut bytes = BytesMut::new();
        for topic in topics {
            topic.write_to(&mut bytes);
        }
        bytes.freeze()
    }

    pub fn list_from_bytes(bytes: &[u8]) -> Result<Vec<Topic>, BrookError> {
        let mut topics = Vec::new();
        let mut position = 0;
        while position < bytes.len() {
            let (topic, read_bytes) = Topic::read_from(bytes, position)?;
            topics.push(topic);
            position += read_bytes;
        }
        topics.sort_by(|x, y| x.name.cmp(&y.name));
        Ok(topics)
    }
}

impl BytesSerializable for TopicDetails {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(21 + self.name.len() + 12 * self.partitions.len());
        Topic {
            name: self.name.clone(),
            created_at: self.created_at,
            partitions_count: self.partitions_count,
            messages_count: self.messages_count,
        }
        .write_to(&mut bytes);
        for partition in &self.partitions {
            bytes.put_u32_le(partition.id);
            bytes.put_u64_le(partition.end_offset);
        }
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<TopicDetails, BrookError> {
        let (topic, mut position) = Topic::read_from(&bytes, 0)?;
        let mut partitions = Vec::with_capacity(topic.partitions_count as usize);
        while position < bytes.len() {
            let id = read_u32(&bytes, position)?;
            let end_offset = read_u64(&bytes, position + 4)?;
            partitions.push(Partition { id, end_offset });
            position += 12;
        }

        if partitions.len() != topic.partitions_count as usize {
            return Err(BrookError::InvalidFormat);
        }

        partitions.sort_by_key(|partition| partition.id);
        Ok(TopicDetails {
            name: topic.name,
            created_at: topic.created_at,
            partitions_count: topic.partitions_count,
            messages_count: topic.messages_count,
            partitions,
        })
    }
}
