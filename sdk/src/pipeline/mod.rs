mod config;
mod job;

pub use config::{JobConfig, TimestampPolicy};
pub use job::{JobHandle, JobState, PassThroughJob};
