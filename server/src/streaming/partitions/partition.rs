use brook::models::messages::PolledRecord;
use brook::models::record::Record;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::trace;

/// An append-only log of records, the offset of a record is its index in the log.
#[derive(Debug)]
pub struct Partition {
    pub partition_id: u32,
    records: Vec<Record>,
    size_bytes: u64,
    appended: Arc<Notify>,
}

impl Partition {
    pub fn create(partition_id: u32) -> Partition {
        Partition {
            partition_id,
            records: Vec::new(),
            size_bytes: 0,
            appended: Arc::new(Notify::new()),
        }
    }

    /// The offset the next appended record will get.
    pub fn end_offset(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn get_size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Appends the records and wakes up the pending polls, returns the offset of the first record.
    pub fn append_records(&mut self, records: Vec<Record>) -> u64 {
        let base_offset = self.end_offset();
        if records.is_empty() {
            return base_offset;
        }

        self.size_bytes += records
            .iter()
            .map(|record| record.get_size_bytes() as u64)
            .sum::<u64>();
        self.records.extend(records);
        trace!(
            "Appended records to partition: {}, offsets: {}..{}",
            self.partition_id,
            base_offset,
            self.end_offset()
        );
        self.appended.notify_waiters();
        base_offset
    }

    /// Returns at most `count` records starting at `offset`.
    pub fn get_records(&self, offset: u64, count: u32) -> Vec<PolledRecord> {
        let end_offset = self.end_offset();
        if offset >= end_offset || count == 0 {
            return Vec::new();
        }

        let end = offset.saturating_add(count as u64).min(end_offset);
        (offset..end)
            .zip(self.records[offset as usize..end as usize].iter())
            .map(|(offset, record)| PolledRecord {
                offset,
                record: record.clone(),
            })
            .collect()
    }

    /// The notifier signalled on every append.
    pub fn appended(&self) -> Arc<Notify> {
        self.appended.clone()
    }
}
