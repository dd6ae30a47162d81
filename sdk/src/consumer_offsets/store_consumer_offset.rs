use crate::bytes_serializable::{
    read_short_string, read_string, read_u32, read_u64, write_short_string, write_string,
    BytesSerializable,
};
use crate::command::{Command, STORE_CONSUMER_OFFSET_CODE};
use crate::error::BrookError;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt::Display;

/// `StoreConsumerOffset` command is used to commit the position of a consumer group in the partition.
/// It has additional payload:
/// - `group` - the consumer group name.
/// - `topic` - the topic name.
/// - `partition_id` - the 0-based partition identifier.
/// - `offset` - the offset of the next record the group should consume.
#[derive(Debug, PartialEq, Clone)]
pub struct StoreConsumerOffset {
    pub group: String,
    pub topic: String,
    pub partition_id: u32,
    pub offset: u64,
}

impl Command for StoreConsumerOffset {
    fn code(&self) -> u32 {
        STORE_CONSUMER_OFFSET_CODE
    }
}

impl Validatable<BrookError> for StoreConsumerOffset {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_group_name(&self.group)?;
        text::validate_topic_name(&self.topic)
    }
}

impl BytesSerializable for StoreConsumerOffset {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(17 + self.group.len() + self.topic.len());
        write_string(&mut bytes, &self.group);
        write_short_string(&mut bytes, &self.topic);
        bytes.put_u32_le(self.partition_id);
        bytes.put_u64_le(self.offset);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<StoreConsumerOffset, BrookError> {
        let (group, group_read_bytes) = read_string(&bytes, 0)?;
        let (topic, topic_read_bytes) = read_short_string(&bytes, group_read_bytes)?;
        let position = group_read_bytes + topic_read_bytes;
        if bytes.len() != position + 12 {
            return Err(BrookError::InvalidCommand);
        }

        let command = StoreConsumerOffset {
            group,
            topic,
            partition_id: read_u32(&bytes, position)?,
            offset: read_u64(&bytes, position + 4)?,
        };
        command.validate()?;
        Ok(command)
    }
}

impl Display for StoreConsumerOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.group, self.topic, self.partition_id, self.offset
        )
    }
}
