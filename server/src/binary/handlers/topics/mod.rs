pub mod create_topic_handler;
pub mod delete_topic_handler;
pub mod get_topic_handler;
pub mod get_topics_handler;
