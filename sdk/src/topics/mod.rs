pub mod create_topic;
pub mod delete_topic;
pub mod get_topic;
pub mod get_topics;

pub const MAX_PARTITIONS_COUNT: u32 = 1000;
