mod pass_through_job;
mod scenario;
