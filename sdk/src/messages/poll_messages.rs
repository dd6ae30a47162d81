use crate::bytes_serializable::{
    read_short_string, read_u32, read_u64, write_short_string, BytesSerializable,
};
use crate::command::{Command, POLL_MESSAGES_CODE};
use crate::error::BrookError;
use crate::messages::MAX_RECORDS_PER_BATCH;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt::Display;

/// `PollMessages` command is used to fetch records from a single partition, starting at the given offset.
/// It has additional payload:
/// - `topic` - the topic name.
/// - `partition_id` - the 0-based partition identifier.
/// - `offset` - the offset of the first record to fetch.
/// - `count` - the maximum number of records to fetch.
/// - `max_wait_ms` - how long the broker may hold the request when no record is available yet.
///   Zero means that the broker responds immediately.
#[derive(Debug, PartialEq, Clone)]
pub struct PollMessages {
    pub topic: String,
    pub partition_id: u32,
    pub offset: u64,
    pub count: u32,
    pub max_wait_ms: u32,
}

impl Default for PollMessages {
    fn default() -> Self {
        PollMessages {
            topic: "topic".to_string(),
            partition_id: 0,
            offset: 0,
            count: 10,
            max_wait_ms: 0,
        }
    }
}

impl Command for PollMessages {
    fn code(&self) -> u32 {
        POLL_MESSAGES_CODE
    }
}

impl Validatable<BrookError> for PollMessages {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_topic_name(&self.topic)?;
        if self.count == 0 || self.count > MAX_RECORDS_PER_BATCH {
            return Err(BrookError::InvalidMessagesCount);
        }

        Ok(())
    }
}

impl BytesSerializable for PollMessages {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(21 + self.topic.len());
        write_short_string(&mut bytes, &self.topic);
        bytes.put_u32_le(self.partition_id);
        bytes.put_u64_le(self.offset);
        bytes.put_u32_le(self.count);
        bytes.put_u32_le(self.max_wait_ms);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<PollMessages, BrookError> {
        let (topic, position) = read_short_string(&bytes, 0)?;
        if bytes.len() != position + 20 {
            return Err(BrookError::InvalidCommand);
        }

        let command = PollMessages {
            topic,
            partition_id: read_u32(&bytes, position)?,
            offset: read_u64(&bytes, position + 4)?,
            count: read_u32(&bytes, position + 12)?,
            max_wait_ms: read_u32(&bytes, position + 16)?,
        };
        command.validate()?;
        Ok(command)
    }
}

impl Display for PollMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.topic, self.partition_id, self.offset, self.count, self.max_wait_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_serialized_as_bytes() {
        let command = PollMessages {
            topic: "outputTopic".to_string(),
            partition_id: 2,
            offset: 15,
            count: 100,
            max_wait_ms: 250,
        };

        let bytes = command.to_bytes();
        let position = 1 + command.topic.len();
        let partition_id = u32::from_le_bytes(bytes[position..position + 4].try_into().unwrap());
        let offset = u64::from_le_bytes(bytes[position + 4..position + 12].try_into().unwrap());
        let max_wait_ms =
            u32::from_le_bytes(bytes[position + 16..position + 20].try_into().unwrap());

        assert_eq!(partition_id, 2);
        assert_eq!(offset, 15);
        assert_eq!(max_wait_ms, 250);
        assert_eq!(PollMessages::from_bytes(bytes).unwrap(), command);
    }

    #[test]
    fn zero_count_should_be_rejected() {
        let command = PollMessages {
            count: 0,
            ..PollMessages::default()
        };
        assert!(matches!(
            command.validate(),
            Err(BrookError::InvalidMessagesCount)
        ));
    }
}
