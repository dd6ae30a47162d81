use crate::bytes_serializable::{read_payload, read_u64, write_payload};
use crate::error::BrookError;
use crate::utils::timestamp::BrookTimestamp;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt::{Display, Formatter};
use std::str::from_utf8;

/// The size of the fixed part of a serialized record: timestamp, key length and value length.
pub const RECORD_METADATA_SIZE: usize = 8 + 4 + 4;

/// The single record which is published to and delivered from a topic.
/// It consists of the following fields:
/// - `key`: the optional key, used to choose the partition.
/// - `value`: the binary payload.
/// - `timestamp`: the time the record was created at.
///
/// An empty key is transferred as no key at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Option<Bytes>,
    pub value: Bytes,
    pub timestamp: BrookTimestamp,
}

impl Record {
    /// Creates a record without a key, stamped with the current time.
    pub fn new(value: impl Into<Bytes>) -> Self {
        Record {
            key: None,
            value: value.into(),
            timestamp: BrookTimestamp::now(),
        }
    }

    /// Creates a record with a key, stamped with the current time.
    pub fn with_key(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        let key = key.into();
        Record {
            key: (!key.is_empty()).then_some(key),
            value: value.into(),
            timestamp: BrookTimestamp::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: BrookTimestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn get_size_bytes(&self) -> usize {
        RECORD_METADATA_SIZE + self.key.as_ref().map_or(0, |key| key.len()) + self.value.len()
    }

    pub(crate) fn write_to(&self, bytes: &mut BytesMut) {
        bytes.put_u64_le(self.timestamp.as_micros());
        write_payload(bytes, self.key.as_deref().unwrap_or_default());
        write_payload(bytes, &self.value);
    }

    pub(crate) fn read_from(bytes: &Bytes, position: usize) -> Result<(Record, usize), BrookError> {
        let timestamp = read_u64(bytes, position)?;
        let (key, key_read_bytes) = read_payload(bytes, position + 8)?;
        let (value, value_read_bytes) = read_payload(bytes, position + 8 + key_read_bytes)?;
        let record = Record {
            key: (!key.is_empty()).then_some(key),
            value,
            timestamp: timestamp.into(),
        };
        Ok((record, 8 + key_read_bytes + value_read_bytes))
    }
}

/// The record delivered to a consumer, together with its position in the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerRecord {
    pub topic: String,
    pub partition_id: u32,
    pub offset: u64,
    pub key: Option<Bytes>,
    pub value: Bytes,
    pub timestamp: BrookTimestamp,
}

impl ConsumerRecord {
    /// Returns the value as UTF-8 text.
    pub fn value_as_str(&self) -> Result<&str, BrookError> {
        from_utf8(&self.value).map_err(|_| BrookError::InvalidUtf8Payload)
    }

    /// Returns the key as UTF-8 text, if the record has a key.
    pub fn key_as_str(&self) -> Result<Option<&str>, BrookError> {
        self.key
            .as_deref()
            .map(|key| from_utf8(key).map_err(|_| BrookError::InvalidUtf8Payload))
            .transpose()
    }
}

impl Display for ConsumerRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}@{} ({} bytes)",
            self.topic,
            self.partition_id,
            self.offset,
            self.value.len()
        )
    }
}

/// The acknowledgment of a published record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    pub topic: String,
    pub partition_id: u32,
    pub offset: u64,
    pub timestamp: BrookTimestamp,
}

impl Display for RecordMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.topic, self.partition_id, self.offset)
    }
}
