use crate::bytes_serializable::{read_short_string, write_short_string, BytesSerializable};
use crate::command::{Command, GET_TOPIC_CODE};
use crate::error::BrookError;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{Bytes, BytesMut};
use std::fmt::Display;

/// `GetTopic` command is used to retrieve the details of a topic, including its partitions and their end offsets.
/// It has additional payload:
/// - `name` - the topic name.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct GetTopic {
    pub name: String,
}

impl Command for GetTopic {
    fn code(&self) -> u32 {
        GET_TOPIC_CODE
    }
}

impl Validatable<BrookError> for GetTopic {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_topic_name(&self.name)
    }
}

impl BytesSerializable for GetTopic {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(1 + self.name.len());
        write_short_string(&mut bytes, &self.name);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<GetTopic, BrookError> {
        let (name, read_bytes) = read_short_string(&bytes, 0)?;
        if read_bytes != bytes.len() {
            return Err(BrookError::InvalidCommand);
        }

        let command = GetTopic { name };
        command.validate()?;
        Ok(command)
    }
}

impl Display for GetTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_bytes_should_be_rejected() {
        let mut bytes = BytesMut::new();
        write_short_string(&mut bytes, "inputTopic");
        bytes.extend_from_slice(&[1, 2]);
        assert!(GetTopic::from_bytes(bytes.freeze()).is_err());
    }

    #[test]
    fn invalid_name_should_be_rejected() {
        let mut bytes = BytesMut::new();
        write_short_string(&mut bytes, "no spaces allowed");
        assert!(matches!(
            GetTopic::from_bytes(bytes.freeze()),
            Err(BrookError::InvalidTopicName(_))
        ));
    }
}
