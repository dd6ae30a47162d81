pub mod get_consumer_offset;
pub mod store_consumer_offset;
