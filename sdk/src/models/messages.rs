use crate::bytes_serializable::{read_u32, read_u64, BytesSerializable};
use crate::error::BrookError;
use crate::models::record::Record;
use bytes::{BufMut, Bytes, BytesMut};

/// The wrapper on top of the collection of records that are polled from the partition.
/// It consists of the following fields:
/// - `partition_id`: the identifier of the partition.
/// - `end_offset`: the offset the next appended record will get.
/// - `records`: the collection of records, ordered by offset.
#[derive(Debug, Default, PartialEq)]
pub struct PolledRecords {
    pub partition_id: u32,
    pub end_offset: u64,
    pub records: Vec<PolledRecord>,
}

/// The single record that is polled from the partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PolledRecord {
    pub offset: u64,
    pub record: Record,
}

impl BytesSerializable for PolledRecords {
    fn to_bytes(&self) -> Bytes {
        let size = 16
            + self
                .records
                .iter()
                .map(|polled| 8 + polled.record.get_size_bytes())
                .sum::<usize>();
        let mut bytes = BytesMut::with_capacity(size);
        bytes.put_u32_le(self.partition_id);
        bytes.put_u64_le(self.end_offset);
        bytes.put_u32_le(self.records.len() as u32);
        for polled in &self.records {
            bytes.put_u64_le(polled.offset);
            polled.record.write_to(&mut bytes);
        }
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<Self, BrookError> {
        if bytes.len() < 16 {
            return Err(BrookError::InvalidFormat);
        }

        let partition_id = read_u32(&bytes, 0)?;
        let end_offset = read_u64(&bytes, 4)?;
        let count = read_u32(&bytes, 12)?;
        let mut records = Vec::with_capacity(count as usize);
        let mut position = 16;
        for _ in 0..count {
            let offset = read_u64(&bytes, position)?;
            let (record, read_bytes) = Record::read_from(&bytes, position + 8)?;
            position += 8 + read_bytes;
            records.push(PolledRecord { offset, record });
        }

        if position != bytes.len() {
            return Err(BrookError::InvalidFormat);
        }

        Ok(PolledRecords {
            partition_id,
            end_offset,
            records,
        })
    }
}

/// The result of appending a batch of records to a partition.
/// Records of the batch got consecutive offsets starting at `base_offset`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AppendedRecords {
    pub partition_id: u32,
    pub base_offset: u64,
    pub count: u32,
}

impl BytesSerializable for AppendedRecords {
    fn to_bytes(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(16);
        bytes.put_u32_le(self.partition_id);
        bytes.put_u64_le(self.base_offset);
        bytes.put_u32_le(self.count);
        bytes.freeze()
    }

    fn from_bytes(bytes: Bytes) -> Result<Self, BrookError> {
        if bytes.len() != 16 {
            return Err(BrookError::InvalidFormat);
        }

        Ok(AppendedRecords {
            partition_id: read_u32(&bytes, 0)?,
            base_offset: read_u64(&bytes, 4)?,
            count: read_u32(&bytes, 12)?,
        })
    }
}
