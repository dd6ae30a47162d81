use crate::error::BrookError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::str::from_utf8;
use strum::EnumString;

/// The way keys and values are turned into record bytes and back.
///
/// - `string` - UTF-8 text, both directions reject invalid bytes with `InvalidUtf8Payload`.
/// - `bytes` - opaque bytes, passed through as they are.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Codec {
    #[default]
    String,
    Bytes,
}

impl Codec {
    pub fn encode(&self, value: Bytes) -> Result<Bytes, BrookError> {
        self.check(&value)?;
        Ok(value)
    }

    pub fn decode(&self, value: Bytes) -> Result<Bytes, BrookError> {
        self.check(&value)?;
        Ok(value)
    }

    /// Renders the value as text. The `bytes` codec replaces invalid UTF-8 sequences.
    pub fn decode_to_string(&self, value: &[u8]) -> Result<String, BrookError> {
        match self {
            Codec::String => from_utf8(value)
                .map(str::to_owned)
                .map_err(|_| BrookError::InvalidUtf8Payload),
            Codec::Bytes => Ok(String::from_utf8_lossy(value).into_owned()),
        }
    }

    fn check(&self, value: &[u8]) -> Result<(), BrookError> {
        if *self == Codec::String && from_utf8(value).is_err() {
            return Err(BrookError::InvalidUtf8Payload);
        }

        Ok(())
    }
}
