pub mod partitions;
pub mod systems;
pub mod topics;
pub mod utils;
