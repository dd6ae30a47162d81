use crate::bytes_serializable::{read_short_string, read_u32, write_short_string, BytesSerializable};
use crate::command::{Command, CREATE_TOPIC_CODE};
use crate::error::BrookError;
use crate::topics::MAX_PARTITIONS_COUNT;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt::Display;

/// `CreateTopic` command is used to register a new topic.
/// It has additional payload:
/// - `name` - unique topic name, max 255 characters.
/// - `partitions_count` - number of partitions in the topic, in range 1..=1000.
///
/// Creating a topic which already exists with the same partitions count succeeds,
/// a different partitions count is rejected with `TopicAlreadyExists`.
#[derive(Debug, PartialEq, Clone)]
pub struct CreateTopic {
    pub name: String,
    pub partitions_count: u32,
}

impl Default for CreateTopic {
    fn default() -> Self {
        CreateTopic {
            name: "topic".to_string(),
            partitions_count: 1,
        }
    }
}

impl Command for CreateTopic {
    fn code(&self) -> u32 {
        CREATE_TOPIC_CODE
    }
}

impl Validatable<BrookError> for CreateTopic {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_topic_name(&self.name)?;
        if !(1..=MAX_PARTITIONS_COUNT).contains(&self.partitions_count) {
            return Err(BrookError::InvalidPartitionsCount);
        }

        Ok(())
    }
}

impl BytesSerializable for CreateTopic {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(5 + self.name.len());
        bytes.put_u32_le(self.partitions_count);
        write_short_string(&mut bytes, &self.name);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<CreateTopic, BrookError> {
        if bytes.len() < 6 {
            return Err(BrookError::InvalidCommand);
        }

        let partitions_count = read_u32(&bytes, 0)?;
        let (name, _) = read_short_string(&bytes, 4)?;
        let command = CreateTopic {
            name,
            partitions_count,
        };
        command.validate()?;
        Ok(command)
    }
}

impl Display for CreateTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.name, self.partitions_count)
    }
}
