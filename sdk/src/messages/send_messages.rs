use crate::bytes_serializable::{
    read_short_string, read_u32, read_u8, write_short_string, BytesSerializable,
};
use crate::command::{Command, SEND_MESSAGES_CODE};
use crate::error::BrookError;
use crate::messages::MAX_RECORDS_PER_BATCH;
use crate::models::record::Record;
use crate::utils::text;
use crate::validatable::Validatable;
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::EnumString;

const MAX_PARTITIONING_VALUE_LENGTH: usize = 255;

/// `SendMessages` command is used to append a batch of records to a topic.
/// It has additional payload:
/// - `topic` - the topic name.
/// - `partitioning` - to which partition the records should be appended.
/// - `acknowledgment` - when the broker should acknowledge the append.
/// - `records` - the records to append, in order. Each batch ends up in a single partition.
#[derive(Debug, PartialEq, Clone)]
pub struct SendMessages {
    pub topic: String,
    pub partitioning: Partitioning,
    pub acknowledgment: Acknowledgment,
    pub records: Vec<Record>,
}

/// `Partitioning` is used to specify to which partition the records should be sent.
/// - `kind` - the partitioning kind.
/// - `length` - the length of the value.
/// - `value` - the partition ID as u32 or the key the partition is calculated from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Partitioning {
    pub kind: PartitioningKind,
    pub length: u8,
    pub value: Bytes,
}

/// `PartitioningKind` is an enum which specifies the kind of partitioning.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum PartitioningKind {
    /// The partition is chosen by the broker in the round-robin manner.
    #[default]
    Balanced,
    /// The partition ID is provided by the client.
    PartitionId,
    /// The partition is calculated from the hash of the key.
    Key,
}

/// When the broker acknowledges an append. On a single node both policies mean that
/// the records have been appended to the partition before the response is sent.
#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Acknowledgment {
    #[default]
    Leader,
    All,
}

impl Acknowledgment {
    pub fn as_code(&self) -> u8 {
        match self {
            Acknowledgment::Leader => 1,
            Acknowledgment::All => 2,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, BrookError> {
        match code {
            1 => Ok(Acknowledgment::Leader),
            2 => Ok(Acknowledgment::All),
            _ => Err(BrookError::InvalidCommand),
        }
    }
}

impl Default for Partitioning {
    fn default() -> Self {
        Partitioning::balanced()
    }
}

impl Partitioning {
    pub fn balanced() -> Self {
        Partitioning {
            kind: PartitioningKind::Balanced,
            length: 0,
            value: Bytes::new(),
        }
    }

    pub fn partition_id(partition_id: u32) -> Self {
        Partitioning {
            kind: PartitioningKind::PartitionId,
            length: 4,
            value: Bytes::copy_from_slice(&partition_id.to_le_bytes()),
        }
    }

    /// The key must not be empty and may have at most 255 bytes.
    pub fn key(key: Bytes) -> Result<Self, BrookError> {
        if key.is_empty() || key.len() > MAX_PARTITIONING_VALUE_LENGTH {
            return Err(BrookError::InvalidCommand);
        }

        Ok(Partitioning {
            kind: PartitioningKind::Key,
            length: key.len() as u8,
            value: key,
        })
    }

    pub fn get_partition_id(&self) -> Option<u32> {
        match self.kind {
            PartitioningKind::PartitionId => {
                let value: [u8; 4] = self.value.as_ref().try_into().ok()?;
                Some(u32::from_le_bytes(value))
            }
            _ => None,
        }
    }

    fn get_size_bytes(&self) -> usize {
        2 + self.length as usize
    }
}

impl PartitioningKind {
    pub fn as_code(&self) -> u8 {
        match self {
            PartitioningKind::Balanced => 1,
            PartitioningKind::PartitionId => 2,
            PartitioningKind::Key => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, BrookError> {
        match code {
            1 => Ok(PartitioningKind::Balanced),
            2 => Ok(PartitioningKind::PartitionId),
            3 => Ok(PartitioningKind::Key),
            _ => Err(BrookError::InvalidCommand),
        }
    }
}

impl Validatable<BrookError> for Partitioning {
    fn validate(&self) -> Result<(), BrookError> {
        if self.length as usize != self.value.len() {
            return Err(BrookError::InvalidCommand);
        }

        match self.kind {
            PartitioningKind::Balanced if self.length != 0 => Err(BrookError::InvalidCommand),
            PartitioningKind::PartitionId if self.length != 4 => Err(BrookError::InvalidCommand),
            PartitioningKind::Key if self.length == 0 => Err(BrookError::InvalidCommand),
            _ => Ok(()),
        }
    }
}

impl BytesSerializable for Partitioning {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(self.get_size_bytes());
        bytes.put_u8(self.kind.as_code());
        bytes.put_u8(self.length);
        bytes.put_slice(&self.value);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<Self, BrookError> {
        if bytes.len() < 2 {
            return Err(BrookError::InvalidCommand);
        }

        let kind = PartitioningKind::from_code(read_u8(&bytes, 0)?)?;
        let length = read_u8(&bytes, 1)?;
        let end = 2 + length as usize;
        if bytes.len() < end {
            return Err(BrookError::InvalidCommand);
        }

        let partitioning = Partitioning {
            kind,
            length,
            value: bytes.slice(2..end),
        };
        partitioning.validate()?;
        Ok(partitioning)
    }
}

impl Display for Partitioning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PartitioningKind::Balanced => write!(f, "balanced"),
            PartitioningKind::PartitionId => match self.get_partition_id() {
                Some(partition_id) => write!(f, "partition_id|{partition_id}"),
                None => write!(f, "partition_id|?"),
            },
            PartitioningKind::Key => write!(f, "key|{} bytes", self.length),
        }
    }
}

impl Command for SendMessages {
    fn code(&self) -> u32 {
        SEND_MESSAGES_CODE
    }
}

impl Validatable<BrookError> for SendMessages {
    fn validate(&self) -> Result<(), BrookError> {
        text::validate_topic_name(&self.topic)?;
        if self.records.is_empty() || self.records.len() > MAX_RECORDS_PER_BATCH as usize {
            return Err(BrookError::InvalidMessagesCount);
        }

        self.partitioning.validate()
    }
}

impl BytesSerializable for SendMessages {
    fn to_bytes(&self) -> Bytes {
        let records_size = self
            .records
            .iter()
            .map(|record| record.get_size_bytes())
            .sum::<usize>();
        let mut bytes = BytesMut::with_capacity(
            1 + self.topic.len() + self.partitioning.get_size_bytes() + 5 + records_size,
        );
        write_short_string(&mut bytes, &self.topic);
        bytes.put_slice(&self.partitioning.to_bytes());
        bytes.put_u8(self.acknowledgment.as_code());
        bytes.put_u32_le(self.records.len() as u32);
        for record in &self.records {
            record.write_to(&mut bytes);
        }
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<SendMessages, BrookError> {
        let (topic, mut position) = read_short_string(&bytes, 0)?;
        let partitioning = Partitioning::from_bytes(bytes.slice(position..))?;
        position += partitioning.get_size_bytes();
        let acknowledgment = Acknowledgment::from_code(read_u8(&bytes, position)?)?;
        let count = read_u32(&bytes, position + 1)?;
        position += 5;
        if count == 0 || count > MAX_RECORDS_PER_BATCH {
            return Err(BrookError::InvalidMessagesCount);
        }

        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (record, read_bytes) = Record::read_from(&bytes, position)?;
            records.push(record);
            position += read_bytes;
        }

        if position != bytes.len() {
            return Err(BrookError::InvalidCommand);
        }

        let command = SendMessages {
            topic,
            partitioning,
            acknowledgment,
            records,
        };
        command.validate()?;
        Ok(command)
    }
}

impl Display for SendMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.topic,
            self.partitioning,
            self.acknowledgment,
            self.records.len()
        )
    }
}
