use crate::bytes_serializable::BytesSerializable;
use crate::command::{Command, PING_CODE};
use crate::error::BrookError;
use crate::validatable::Validatable;
use bytes::Bytes;
use std::fmt::Display;

/// `Ping` command is used to check if the broker is alive.
/// It has no additional payload.
#[derive(Debug, Default, PartialEq)]
pub struct Ping {}

impl Command for Ping {
    fn code(&self) -> u32 {
        PING_CODE
    }
}

impl Validatable<BrookError> for Ping {
    fn validate(&self) -> Result<(), BrookError> {
        Ok(())
    }
}

impl BytesSerializable for Ping {
    fn to_bytes(&self) -> Bytes {
        Bytes::new()
    }

    fn from_bytes(bytes: Bytes) -> Result<Ping, BrookError> {
        if !bytes.is_empty() {
            return Err(BrookError::InvalidCommand);
        }

        Ok(Ping {})
    }
}

impl Display for Ping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "")
    }
}
