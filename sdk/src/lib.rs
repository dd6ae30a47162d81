pub mod binary;
pub mod bytes_serializable;
pub mod client;
pub mod clients;
pub mod codec;
pub mod command;
pub mod config;
pub mod consumer_offsets;
pub mod error;
pub mod messages;
pub mod models;
pub mod pipeline;
pub mod system;
pub mod tcp;
pub mod topics;
pub mod utils;
pub mod validatable;
