use crate::clients::consumer::BrookConsumer;
use crate::clients::producer::BrookProducer;
use crate::config::{ConsumerConfig, ProducerConfig};
use crate::error::BrookError;
use crate::messages::send_messages::Partitioning;
use crate::models::record::{ConsumerRecord, Record};
use crate::pipeline::config::{JobConfig, TimestampPolicy};
use crate::utils::duration::BrookDuration;
use crate::utils::text;
use crate::utils::timestamp::BrookTimestamp;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// The lifecycle of a pass-through job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    NotStarted,
    Running,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Readiness {
    Pending,
    Ready,
    Failed(String),
}

/// A single-stage job which forwards every record of the input topic to the output topic,
/// with identical key and value bytes and the relative order of each input partition kept.
#[derive(Debug)]
pub struct PassThroughJob {
    config: JobConfig,
    state: JobState,
}

/// The handle of a running job. Dropping the handle aborts the job.
#[derive(Debug)]
pub struct JobHandle {
    job_id: String,
    state: JobState,
    shutdown_timeout: BrookDuration,
    shutdown: watch::Sender<bool>,
    readiness: watch::Receiver<Readiness>,
    forwarded: watch::Receiver<u64>,
    task: Option<JoinHandle<Result<(), BrookError>>>,
}

struct JobChannels {
    shutdown: watch::Receiver<bool>,
    readiness: watch::Sender<Readiness>,
    forwarded: watch::Sender<u64>,
}

impl PassThroughJob {
    pub fn new(config: JobConfig) -> Self {
        Self {
            config,
            state: JobState::NotStarted,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Submits the job to the current tokio runtime and returns right away.
    /// Use `JobHandle::wait_until_ready` to know when the job has resolved its input positions.
    pub fn start(mut self, input: &str, output: &str) -> Result<JobHandle, BrookError> {
        if self.state != JobState::NotStarted {
            return Err(BrookError::JobAlreadyRunning);
        }

        text::validate_topic_name(input)?;
        text::validate_topic_name(output)?;
        text::validate_group_name(self.config.job_id())?;

        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let (readiness_sender, readiness_receiver) = watch::channel(Readiness::Pending);
        let (forwarded_sender, forwarded_receiver) = watch::channel(0);
        let channels = JobChannels {
            shutdown: shutdown_receiver,
            readiness: readiness_sender,
            forwarded: forwarded_sender,
        };

        self.state = JobState::Running;
        let job_id = self.config.job_id().to_string();
        let shutdown_timeout = self.config.shutdown_timeout();
        let config = self.config;
        let input = input.to_string();
        let output = output.to_string();
        info!("Starting job: {job_id}, forwarding: {input} -> {output}");
        let task = tokio::spawn(async move {
            let result = run(&config, &input, &output, channels).await;
            if let Err(error) = &result {
                error!("Job: {} has failed: {error}", config.job_id());
            }
            result
        });

        Ok(JobHandle {
            job_id,
            state: JobState::Running,
            shutdown_timeout,
            shutdown: shutdown_sender,
            readiness: readiness_receiver,
            forwarded: forwarded_receiver,
            task: Some(task),
        })
    }
}

impl JobHandle {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// The number of records forwarded and committed so far.
    pub fn forwarded_count(&self) -> u64 {
        *self.forwarded.borrow()
    }

    /// Waits until the job is connected and has resolved its position on every input partition.
    pub async fn wait_until_ready(&self, wait: Duration) -> Result<(), BrookError> {
        let mut readiness = self.readiness.clone();
        let result = timeout(
            wait,
            readiness.wait_for(|readiness| *readiness != Readiness::Pending),
        )
        .await;
        match result {
            Ok(Ok(readiness)) => match &*readiness {
                Readiness::Failed(reason) => Err(BrookError::JobNotReady(reason.clone())),
                _ => Ok(()),
            },
            Ok(Err(_)) => Err(BrookError::JobNotReady("job has exited".to_string())),
            Err(_) => Err(BrookError::JobNotReady(
                BrookDuration::new(wait).as_human_time_string(),
            )),
        }
    }

    /// Waits until at least `count` records have been forwarded, returns false on timeout.
    pub async fn wait_for_forwarded(&self, count: u64, wait: Duration) -> bool {
        let mut forwarded = self.forwarded.clone();
        let reached = matches!(
            timeout(wait, forwarded.wait_for(|forwarded| *forwarded >= count)).await,
            Ok(Ok(_))
        );
        reached
    }

    /// Signals the job to stop and waits for it to finish the batch in flight, commit and close.
    ///
    /// Fails with `JobShutdownTimeout` if the job did not finish within the shutdown timeout,
    /// the job is aborted then. A job which failed earlier is reported as `JobFailed`.
    /// Stopping a stopped job is a no-op.
    pub async fn stop(&mut self) -> Result<(), BrookError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        info!("Stopping job: {}...", self.job_id);
        self.state = JobState::Stopped;
        self.shutdown.send_replace(true);
        let abort_handle = task.abort_handle();
        match timeout(self.shutdown_timeout.get_duration(), task).await {
            Ok(Ok(Ok(()))) => {
                info!("Job: {} has stopped.", self.job_id);
                Ok(())
            }
            Ok(Ok(Err(error))) => Err(BrookError::JobFailed(error.to_string())),
            Ok(Err(error)) => Err(BrookError::JobFailed(error.to_string())),
            Err(_) => {
                abort_handle.abort();
                warn!(
                    "Job: {} did not stop within: {}, it has been aborted.",
                    self.job_id, self.shutdown_timeout
                );
                Err(BrookError::JobShutdownTimeout(
                    self.shutdown_timeout.as_human_time_string(),
                ))
            }
        }
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            warn!("Job: {} has not been stopped, aborting it.", self.job_id);
            task.abort();
        }
    }
}

async fn run(
    config: &JobConfig,
    input: &str,
    output: &str,
    channels: JobChannels,
) -> Result<(), BrookError> {
    let JobChannels {
        shutdown,
        readiness,
        forwarded,
    } = channels;

    let startup = timeout(
        config.readiness_timeout().get_duration(),
        connect(config, input, output),
    )
    .await;
    let (mut consumer, producer, output_partitions) = match startup {
        Ok(Ok(connected)) => connected,
        Ok(Err(error)) => {
            readiness.send_replace(Readiness::Failed(error.to_string()));
            return Err(error);
        }
        Err(_) => {
            let error =
                BrookError::JobNotReady(config.readiness_timeout().as_human_time_string());
            readiness.send_replace(Readiness::Failed(error.to_string()));
            return Err(error);
        }
    };

    info!(
        "Job: {} is ready, input partitions: {}, output partitions: {output_partitions}",
        config.job_id(),
        consumer.assignments().len()
    );
    readiness.send_replace(Readiness::Ready);

    let result = forward(
        config,
        &mut consumer,
        &producer,
        output,
        output_partitions,
        shutdown,
        &forwarded,
    )
    .await;

    if let Err(error) = producer.close().await {
        warn!(
            "Failed to close the producer of job: {}, {error}",
            config.job_id()
        );
    }
    if let Err(error) = consumer.close().await {
        warn!(
            "Failed to close the consumer of job: {}, {error}",
            config.job_id()
        );
    }
    result
}

async fn connect(
    config: &JobConfig,
    input: &str,
    output: &str,
) -> Result<(BrookConsumer, BrookProducer, u32), BrookError> {
    let mut consumer = BrookConsumer::new(
        ConsumerConfig::builder()
            .bootstrap_servers(config.bootstrap_servers())
            .group_id(config.job_id())
            .offset_reset(config.offset_reset())
            .key_codec(config.key_codec())
            .value_codec(config.value_codec())
            .max_poll_records(config.max_poll_records())
            .auto_commit(false)
            .build(),
    )?;
    let producer = BrookProducer::new(
        ProducerConfig::builder()
            .bootstrap_servers(config.bootstrap_servers())
            .acknowledgment(config.acknowledgment())
            .key_codec(config.key_codec())
            .value_codec(config.value_codec())
            .build(),
    )?;

    consumer.subscribe(&[input]).await?;
    producer.init().await?;
    let output_partitions = producer.get_partitions_count(output).await?;
    Ok((consumer, producer, output_partitions))
}

async fn forward(
    config: &JobConfig,
    consumer: &mut BrookConsumer,
    producer: &BrookProducer,
    output: &str,
    output_partitions: u32,
    mut shutdown: watch::Receiver<bool>,
    forwarded: &watch::Sender<u64>,
) -> Result<(), BrookError> {
    let poll_interval = config.poll_interval().get_duration();
    let mut total = 0;
    while !*shutdown.borrow_and_update() {
        // An idle poll is abandoned on shutdown, a polled batch is always forwarded.
        let records = tokio::select! {
            polled = consumer.poll(poll_interval) => polled?,
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        };
        if records.is_empty() {
            continue;
        }

        let count = records.len() as u64;
        let batches = into_batches(records, output_partitions, config.timestamp_policy())?;
        for (partitioning, batch) in batches {
            producer
                .send_batch(output, partitioning, batch)
                .await?
                .await?;
        }

        consumer.commit().await?;
        total += count;
        forwarded.send_replace(total);
        debug!(
            "Job: {} has forwarded {count} records, {total} in total.",
            config.job_id()
        );
    }

    info!("Job: {} has received the shutdown signal.", config.job_id());
    Ok(())
}

/// Groups consecutive records bound to the same output partition, keeping their order.
fn into_batches(
    records: Vec<ConsumerRecord>,
    output_partitions: u32,
    timestamp_policy: TimestampPolicy,
) -> Result<Vec<(Partitioning, Vec<Record>)>, BrookError> {
    let mut batches: Vec<(Partitioning, Vec<Record>)> = Vec::new();
    for consumed in records {
        let partitioning = match &consumed.key {
            Some(key) => Partitioning::key(key.clone())?,
            None => Partitioning::partition_id(consumed.partition_id % output_partitions.max(1)),
        };
        let timestamp = match timestamp_policy {
            TimestampPolicy::WallClock => BrookTimestamp::now(),
            TimestampPolicy::Record => consumed.timestamp,
        };
        let record = Record {
            key: consumed.key,
            value: consumed.value,
            timestamp,
        };

        match batches.last_mut() {
            Some((last, batch)) if *last == partitioning => batch.push(record),
            _ => batches.push((partitioning, vec![record])),
        }
    }
    Ok(batches)
}
