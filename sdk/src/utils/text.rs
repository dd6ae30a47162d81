use crate::error::BrookError;
use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_TOPIC_NAME_LENGTH: usize = 255;
pub const MAX_GROUP_NAME_LENGTH: usize = 255;

lazy_static! {
    static ref TOPIC_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9\._\-]+$").unwrap();
}

pub fn is_topic_name_valid(value: &str) -> bool {
    !value.is_empty() && value.len() <= MAX_TOPIC_NAME_LENGTH && TOPIC_NAME_REGEX.is_match(value)
}

pub fn validate_topic_name(value: &str) -> Result<(), BrookError> {
    if !is_topic_name_valid(value) {
        return Err(BrookError::InvalidTopicName(value.to_owned()));
    }

    Ok(())
}

pub fn validate_group_name(value: &str) -> Result<(), BrookError> {
    if value.trim().is_empty() || value.len() > MAX_GROUP_NAME_LENGTH {
        return Err(BrookError::InvalidConsumerGroupName(value.to_owned()));
    }

    Ok(())
}
