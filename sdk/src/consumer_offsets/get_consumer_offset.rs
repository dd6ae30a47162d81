use crate::bytes_serializable::{
    read_short_string, read_string, read_u32, write_short_string, write_string, BytesSerializable,
};
use crate::command::{Command, GET_CONSUMER_OFFSET_CODE};
use crate::error::BrookError;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt::Display;

/// `GetConsumerOffset` command is used to retrieve the offset committed by a consumer group for the partition.
/// It has additional payload:
/// - `group` - the consumer group name.
/// - `topic` - the topic name.
/// - `partition_id` - the 0-based partition identifier.
///
/// The response is empty when the group has not committed any offset for the partition yet,
/// otherwise it contains the committed offset as u64.
#[derive(Debug, PartialEq, Clone)]
pub struct GetConsumerOffset {
    pub group: String,
    pub topic: String,
    pub partition_id: u32,
}

impl Command for GetConsumerOffset {
    fn code(&self) -> u32 {
        GET_CONSUMER_OFFSET_CODE
    }
}

impl Validatable<BrookError> for GetConsumerOffset {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_group_name(&self.group)?;
        text::validate_topic_name(&self.topic)
    }
}

impl BytesSerializable for GetConsumerOffset {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(9 + self.group.len() + self.topic.len());
        write_string(&mut bytes, &self.group);
        write_short_string(&mut bytes, &self.topic);
        bytes.put_u32_le(self.partition_id);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<GetConsumerOffset, BrookError> {
        let (group, group_read_bytes) = read_string(&bytes, 0)?;
        let (topic, topic_read_bytes) = read_short_string(&bytes, group_read_bytes)?;
        let position = group_read_bytes + topic_read_bytes;
        if bytes.len() != position + 4 {
            return Err(BrookError::InvalidCommand);
        }

        let command = GetConsumerOffset {
            group,
            topic,
            partition_id: read_u32(&bytes, position)?,
        };
        command.validate()?;
        Ok(command)
    }
}

impl Display for GetConsumerOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.group, self.topic, self.partition_id)
    }
}
