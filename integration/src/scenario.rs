use crate::ephemeral_broker::{BrokerOptions, EphemeralBroker};
use crate::harness_error::HarnessError;
use crate::unique_name;
use crate::verifier::{self, RecordVerifier};
use bon::Builder;
use brook::clients::producer::BrookProducer;
use brook::config::ProducerConfig;
use brook::error::BrookError;
use brook::messages::send_messages::Acknowledgment;
use brook::pipeline::{JobConfig, JobHandle, PassThroughJob, TimestampPolicy};
use brook::utils::duration::BrookDuration;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::{error, info, warn};

/// The stages of a pass-through scenario, reached strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScenarioState {
    Init,
    ClusterUp,
    JobRunning,
    Produced,
    JobStopped,
    Verified,
    TornDown,
}

impl Display for ScenarioState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScenarioState::Init => "init",
            ScenarioState::ClusterUp => "cluster_up",
            ScenarioState::JobRunning => "job_running",
            ScenarioState::Produced => "produced",
            ScenarioState::JobStopped => "job_stopped",
            ScenarioState::Verified => "verified",
            ScenarioState::TornDown => "torn_down",
        };
        write!(f, "{name}")
    }
}

#[derive(Builder, Debug, Clone)]
#[builder(on(String, into))]
pub struct ScenarioConfig {
    #[builder(default = unique_name("inputTopic"))]
    input_topic: String,
    #[builder(default = unique_name("outputTopic"))]
    output_topic: String,
    #[builder(default)]
    lines: Vec<String>,
    #[builder(default = unique_name("pass-through"))]
    job_id: String,
    #[builder(default)]
    broker: BrokerOptions,
    #[builder(default)]
    timestamp_policy: TimestampPolicy,
    #[builder(default = Duration::from_millis(100))]
    poll_interval: Duration,
    #[builder(default = Duration::from_secs(10))]
    readiness_timeout: Duration,
    /// How long the job may take to forward all the published lines.
    #[builder(default = Duration::from_secs(10))]
    progress_timeout: Duration,
    /// How long the job may take to stop, exceeding it is only a warning.
    #[builder(default = Duration::from_secs(10))]
    shutdown_timeout: Duration,
    #[builder(default = Duration::from_secs(10))]
    max_total_wait: Duration,
}

impl ScenarioConfig {
    pub fn input_topic(&self) -> &str {
        &self.input_topic
    }

    pub fn output_topic(&self) -> &str {
        &self.output_topic
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

/// The outcome of a scenario: the states it went through, the delivered lines
/// and the error which aborted it, if any.
#[derive(Debug)]
pub struct ScenarioReport {
    pub reached: Vec<ScenarioState>,
    pub delivered: Vec<String>,
    pub error: Option<HarnessError>,
    /// Teardown failures which did not abort the scenario.
    pub warnings: Vec<HarnessError>,
}

impl ScenarioReport {
    fn new() -> Self {
        Self {
            reached: vec![ScenarioState::Init],
            delivered: Vec::new(),
            error: None,
            warnings: Vec::new(),
        }
    }

    fn advance(&mut self, state: ScenarioState) {
        info!("Scenario has reached state: {state}");
        self.reached.push(state);
    }

    pub fn state(&self) -> ScenarioState {
        self.reached
            .last()
            .copied()
            .unwrap_or(ScenarioState::Init)
    }

    pub fn has_reached(&self, state: ScenarioState) -> bool {
        self.reached.contains(&state)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.has_reached(ScenarioState::Verified)
    }

    /// Converts the report into the delivered lines, or the error which aborted the scenario.
    pub fn into_result(self) -> Result<Vec<String>, HarnessError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.delivered),
        }
    }
}

/// Starts a broker, runs the pass-through job between two fresh topics, publishes the lines,
/// stops the job and verifies that the output topic holds the same lines in the same order.
///
/// The broker is always torn down, also when a stage fails.
#[derive(Debug)]
pub struct PassThroughScenario {
    config: ScenarioConfig,
}

impl PassThroughScenario {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub async fn run(&self) -> ScenarioReport {
        let mut report = ScenarioReport::new();
        let mut broker = EphemeralBroker::new(self.config.broker.clone());
        if let Err(error) = self.execute(&mut broker, &mut report).await {
            error!("Scenario has failed in state: {}, {error}", report.state());
            report.error = Some(error);
        }

        if let Err(error) = broker.stop() {
            warn!("Failed to tear down the broker, {error}");
        }
        report.advance(ScenarioState::TornDown);
        report
    }

    async fn execute(
        &self,
        broker: &mut EphemeralBroker,
        report: &mut ScenarioReport,
    ) -> Result<(), HarnessError> {
        broker.start()?;
        let bootstrap_servers = broker.bootstrap_servers()?;
        report.advance(ScenarioState::ClusterUp);

        broker.create_topic(&self.config.input_topic).await?;
        broker.create_topic(&self.config.output_topic).await?;

        let mut job = PassThroughJob::new(
            JobConfig::builder()
                .job_id(self.config.job_id.as_str())
                .bootstrap_servers(bootstrap_servers.as_str())
                .timestamp_policy(self.config.timestamp_policy)
                .poll_interval(BrookDuration::new(self.config.poll_interval))
                .readiness_timeout(BrookDuration::new(self.config.readiness_timeout))
                .shutdown_timeout(BrookDuration::new(self.config.shutdown_timeout))
                .build(),
        )
        .start(&self.config.input_topic, &self.config.output_topic)
        .map_err(HarnessError::Job)?;

        let produced = self.produce(&job, &bootstrap_servers, report).await;
        let stopped = job.stop().await.map_err(HarnessError::from_job_stop);
        produced?;
        match stopped {
            Ok(()) => {}
            Err(error @ HarnessError::ShutdownTimeoutError(_)) => {
                warn!("Job: {} has not stopped cleanly, {error}", job.job_id());
                report.warnings.push(error);
            }
            Err(error) => return Err(error),
        }
        report.advance(ScenarioState::JobStopped);

        let delivered = RecordVerifier::new(&bootstrap_servers)
            .drain_values(
                &self.config.output_topic,
                self.config.lines.len(),
                self.config.poll_interval,
                self.config.max_total_wait,
            )
            .await?;
        report.delivered = delivered;
        verifier::verify(self.config.lines.as_slice(), report.delivered.as_slice())?;
        report.advance(ScenarioState::Verified);
        Ok(())
    }

    async fn produce(
        &self,
        job: &JobHandle,
        bootstrap_servers: &str,
        report: &mut ScenarioReport,
    ) -> Result<(), HarnessError> {
        job.wait_until_ready(self.config.readiness_timeout)
            .await
            .map_err(HarnessError::Job)?;
        report.advance(ScenarioState::JobRunning);

        let topic = &self.config.input_topic;
        let publish_error = |source: BrookError| HarnessError::PublishError {
            topic: topic.to_string(),
            source,
        };
        let producer = BrookProducer::new(
            ProducerConfig::builder()
                .bootstrap_servers(bootstrap_servers)
                .acknowledgment(Acknowledgment::All)
                .build(),
        )
        .map_err(publish_error)?;
        producer.init().await.map_err(publish_error)?;
        let published = producer
            .publish(topic, self.config.lines.iter().cloned())
            .await;
        if let Err(error) = producer.close().await {
            warn!("Failed to close the producer, {error}");
        }
        published.map_err(publish_error)?;
        report.advance(ScenarioState::Produced);

        let expected = self.config.lines.len() as u64;
        if !job
            .wait_for_forwarded(expected, self.config.progress_timeout)
            .await
        {
            warn!(
                "Job: {} has forwarded {} of {expected} record(s) within: {:?}",
                job.job_id(),
                job.forwarded_count(),
                self.config.progress_timeout
            );
        }
        Ok(())
    }
}
