use crate::bytes_serializable::BytesSerializable;
use crate::command::{Command, GET_TOPICS_CODE};
use crate::error::BrookError;
use crate::validatable::Validatable;
use bytes::Bytes;
use std::fmt::Display;

/// `GetTopics` command is used to list all the topics registered in the broker.
/// It has no additional payload.
#[derive(Debug, Default, PartialEq)]
pub struct GetTopics {}

impl Command for GetTopics {
    fn code(&self) -> u32 {
        GET_TOPICS_CODE
    }
}

impl Validatable<BrookError> for GetTopics {
    fn validate(&self) -> Result<(), BrookError> {
        Ok(())
    }
}

impl BytesSerializable for GetTopics {
    fn to_bytes(&self) -> Bytes {
        Bytes::new()
    }

    fn from_bytes(bytes: Bytes) -> Result<GetTopics, BrookError> {
        if !bytes.is_empty() {
            return Err(BrookError::InvalidCommand);
        }

        Ok(GetTopics {})
    }
}

impl Display for GetTopics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "")
    }
}
