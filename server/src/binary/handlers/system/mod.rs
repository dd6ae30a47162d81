pub mod ping_handler;
