pub mod args;
pub mod binary;
pub mod configs;
pub mod log;
pub mod server;
pub mod server_error;
pub mod streaming;
pub mod tcp;
