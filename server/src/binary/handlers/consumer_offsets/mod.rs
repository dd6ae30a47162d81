pub mod get_consumer_offset_handler;
pub mod store_consumer_offset_handler;
