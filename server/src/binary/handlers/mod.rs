pub mod consumer_offsets;
pub mod messages;
pub mod system;
pub mod topics;
