pub mod messages;
pub mod topic;
