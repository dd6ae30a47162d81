pub mod poll_messages_handler;
pub mod send_messages_handler;
