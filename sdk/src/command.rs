use crate::bytes_serializable::BytesSerializable;
use crate::error::BrookError;
use crate::validatable::Validatable;
use std::fmt::Display;

pub const PING: &str = "ping";
pub const PING_CODE: u32 = 1;
pub const POLL_MESSAGES: &str = "message.poll";
pub const POLL_MESSAGES_CODE: u32 = 100;
pub const SEND_MESSAGES: &str = "message.send";
pub const SEND_MESSAGES_CODE: u32 = 101;
pub const GET_CONSUMER_OFFSET: &str = "consumer_offset.get";
pub const GET_CONSUMER_OFFSET_CODE: u32 = 120;
pub const STORE_CONSUMER_OFFSET: &str = "consumer_offset.store";
pub const STORE_CONSUMER_OFFSET_CODE: u32 = 121;
pub const GET_TOPIC: &str = "topic.get";
pub const GET_TOPIC_CODE: u32 = 300;
pub const GET_TOPICS: &str = "topic.list";
pub const GET_TOPICS_CODE: u32 = 301;
pub const CREATE_TOPIC: &str = "topic.create";
pub const CREATE_TOPIC_CODE: u32 = 302;
pub const DELETE_TOPIC: &str = "topic.delete";
pub const DELETE_TOPIC_CODE: u32 = 303;

/// A request which can be sent to the broker.
pub trait Command: BytesSerializable + Validatable<BrookError> + Send + Sync + Display {
    /// Returns the command code.
    fn code(&self) -> u32;
}

pub fn get_name_from_code(code: u32) -> Result<&'static str, BrookError> {
    match code {
        PING_CODE => Ok(PING),
        POLL_MESSAGES_CODE => Ok(POLL_MESSAGES),
        SEND_MESSAGES_CODE => Ok(SEND_MESSAGES),
        GET_CONSUMER_OFFSET_CODE => Ok(GET_CONSUMER_OFFSET),
        STORE_CONSUMER_OFFSET_CODE => Ok(STORE_CONSUMER_OFFSET),
        GET_TOPIC_CODE => Ok(GET_TOPIC),
        GET_TOPICS_CODE => Ok(GET_TOPICS),
        CREATE_TOPIC_CODE => Ok(CREATE_TOPIC),
        DELETE_TOPIC_CODE => Ok(DELETE_TOPIC),
        _ => Err(BrookError::InvalidCommand),
    }
}
