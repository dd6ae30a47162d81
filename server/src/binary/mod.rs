pub mod command;
pub mod handlers;
pub mod mapper;
pub mod sender;
