pub mod poll_messages;
pub mod send_messages;

pub const MAX_RECORDS_PER_BATCH: u32 = 100_000;
