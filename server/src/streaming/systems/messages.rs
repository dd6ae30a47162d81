use crate::streaming::systems::system::{SharedSystem, System};
use brook::error::BrookError;
use brook::messages::poll_messages::PollMessages;
use brook::messages::send_messages::SendMessages;
use brook::models::messages::{AppendedRecords, PolledRecords};
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tracing::trace;

impl System {
    pub fn append_messages(
        &mut self,
        command: SendMessages,
    ) -> Result<AppendedRecords, BrookError> {
        let topic = self.get_topic_mut(&command.topic)?;
        let appended = topic.append_messages(&command.partitioning, command.records)?;
        trace!(
            "Appended {} record(s) to topic: {}, partition: {}, base offset: {}",
            appended.count,
            command.topic,
            appended.partition_id,
            appended.base_offset
        );
        Ok(appended)
    }

    /// Reads the available records without waiting, the count is capped by the configured limit.
    pub fn poll_messages(&self, command: &PollMessages) -> Result<PolledRecords, BrookError> {
        let partition = self
            .get_topic(&command.topic)?
            .get_partition(command.partition_id)?;
        let count = command.count.min(self.config.max_poll_records);
        Ok(PolledRecords {
            partition_id: command.partition_id,
            end_offset: partition.end_offset(),
            records: partition.get_records(command.offset, count),
        })
    }

    fn get_max_poll_wait(&self, max_wait_ms: u32) -> Duration {
        Duration::from_millis(max_wait_ms as u64).min(self.config.max_poll_wait.get_duration())
    }
}

impl SharedSystem {
    /// Polls the records, waiting up to the requested time (capped by the configured limit)
    /// for the first record to be appended when there is nothing to return yet.
    pub async fn poll_messages(&self, command: &PollMessages) -> Result<PolledRecords, BrookError> {
        let deadline = {
            let system = self.read().await;
            Instant::now() + system.get_max_poll_wait(command.max_wait_ms)
        };

        loop {
            let system = self.read().await;
            let polled = system.poll_messages(command)?;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !polled.records.is_empty() || remaining.is_zero() {
                return Ok(polled);
            }

            let appended = system
                .get_topic(&command.topic)?
                .get_partition(command.partition_id)?
                .appended();
            let notified = appended.notified();
            tokio::pin!(notified);
            // Registered before the lock is released, so an append in between is not missed.
            notified.as_mut().enable();
            drop(system);

            trace!(
                "Waiting up to {} ms for records in topic: {}, partition: {}",
                remaining.as_millis(),
                command.topic,
                command.partition_id
            );
            if timeout(remaining, notified).await.is_err() {
                return self.read().await.poll_messages(command);
            }
        }
    }
}
