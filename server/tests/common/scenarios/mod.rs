pub mod consumer_offset_scenario;
pub mod message_scenario;
pub mod topic_scenario;
