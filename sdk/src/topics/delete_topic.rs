use crate::bytes_serializable::{read_short_string, write_short_string, BytesSerializable};
use crate::command::{Command, DELETE_TOPIC_CODE};
use crate::error::BrookError;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{Bytes, BytesMut};
use std::fmt::Display;

/// `DeleteTopic` command is used to drop a topic together with its records and the consumer offsets stored for it.
/// It has additional payload:
/// - `name` - the topic name.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct DeleteTopic {
    pub name: String,
}

impl Command for DeleteTopic {
    fn code(&self) -> u32 {
        DELETE_TOPIC_CODE
    }
}

impl Validatable<BrookError> for DeleteTopic {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_topic_name(&self.name)
    }
}

impl BytesSerializable for DeleteTopic {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(1 + self.name.len());
        write_short_string(&mut bytes, &self.name);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<DeleteTopic, BrookError> {
        let (name, read_bytes) = read_short_string(&bytes, 0)?;
        if read_bytes != bytes.len() {
            return Err(BrookError::InvalidCommand);
        }

        let command = DeleteTopic { name };
        command.validate()?;
        Ok(command)
    }
}

impl Display for DeleteTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
