use brook::client::{Client, MessageClient};
use brook::clients::producer::BrookProducer;
use brook::config::ProducerConfig;
use brook::error::BrookError;
use brook::messages::send_messages::{Acknowledgment, Partitioning};
use brook::models::record::Record;
use brook::pipeline::{JobConfig, JobHandle, JobState, PassThroughJob, TimestampPolicy};
use brook::tcp::client::TcpClient;
use brook::utils::duration::BrookDuration;
use brook::utils::timestamp::BrookTimestamp;
use bytes::Bytes;
use integration::ephemeral_broker::EphemeralBroker;
use integration::harness_error::HarnessError;
use integration::verifier::RecordVerifier;
use integration::{init_logging, unique_name};
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(10);

struct Setup {
    broker: EphemeralBroker,
    input: String,
    output: String,
}

impl Setup {
    async fn new() -> Setup {
        init_logging();
        let mut broker = EphemeralBroker::default();
        broker.start().unwrap();
        let input = unique_name("inputTopic");
        let output = unique_name("outputTopic");
        broker.create_topic(&input).await.unwrap();
        broker.create_topic(&output).await.unwrap();
        Setup {
            broker,
            input,
            output,
        }
    }

    fn bootstrap_servers(&self) -> String {
        self.broker.bootstrap_servers().unwrap()
    }

    fn job_config(&self) -> JobConfig {
        JobConfig::builder()
            .job_id(unique_name("pass-through"))
            .bootstrap_servers(self.bootstrap_servers())
            .poll_interval(BrookDuration::from_millis(50))
            .build()
    }

    async fn start_job(&self, config: JobConfig) -> JobHandle {
        let job = PassThroughJob::new(config)
            .start(&self.input, &self.output)
            .unwrap();
        job.wait_until_ready(WAIT).await.unwrap();
        job
    }

    async fn client(&self) -> TcpClient {
        let client = TcpClient::new(&self.bootstrap_servers()).unwrap();
        client.connect().await.unwrap();
        client
    }

    async fn output_records(&self, count: u32) -> Vec<Record> {
        self.client()
            .await
            .poll_messages(&self.output, 0, 0, count, BrookDuration::ZERO)
            .await
            .unwrap()
            .records
            .into_iter()
            .map(|polled| polled.record)
            .collect()
    }
}

#[tokio::test]
async fn job_should_forward_records_in_order() {
    let setup = Setup::new().await;
    let mut job = setup.start_job(setup.job_config()).await;
    assert_eq!(job.state(), JobState::Running);
    let producer =
        BrookProducer::new(ProducerConfig::from_bootstrap_servers(&setup.bootstrap_servers()))
            .unwrap();
    producer.init().await.unwrap();
    let lines = (0..50).map(|i| format!("line-{i}")).collect::<Vec<_>>();

    producer.publish(&setup.input, lines.clone()).await.unwrap();

    assert!(job.wait_for_forwarded(lines.len() as u64, WAIT).await);
    job.stop().await.unwrap();
    assert_eq!(job.state(), JobState::Stopped);
    assert_eq!(job.forwarded_count(), lines.len() as u64);
    let delivered = RecordVerifier::new(&setup.bootstrap_servers())
        .drain_values(&setup.output, lines.len(), Duration::from_millis(100), WAIT)
        .await
        .unwrap();
    assert_eq!(delivered, lines);
    producer.close().await.unwrap();
}

#[tokio::test]
async fn job_should_keep_keys_and_record_timestamps() {
    let setup = Setup::new().await;
    let config = JobConfig::builder()
        .job_id(unique_name("pass-through"))
        .bootstrap_servers(setup.bootstrap_servers())
        .timestamp_policy(TimestampPolicy::Record)
        .build();
    let mut job = setup.start_job(config).await;
    let timestamp = BrookTimestamp::from(1_000_000);
    let records = vec![
        Record::with_key("user-1", "created").with_timestamp(timestamp),
        Record::new("anonymous").with_timestamp(timestamp),
    ];
    setup
        .client()
        .await
        .send_messages(
            &setup.input,
            &Partitioning::partition_id(0),
            Acknowledgment::All,
            records.clone(),
        )
        .await
        .unwrap();

    assert!(job.wait_for_forwarded(2, WAIT).await);
    job.stop().await.unwrap();
    assert_eq!(setup.output_records(10).await, records);
}

#[tokio::test]
async fn wall_clock_policy_should_stamp_forwarded_records() {
    let setup = Setup::new().await;
    let mut job = setup.start_job(setup.job_config()).await;
    let old = BrookTimestamp::from(1_000_000);
    setup
        .client()
        .await
        .send_messages(
            &setup.input,
            &Partitioning::balanced(),
            Acknowledgment::Leader,
            vec![Record::new("value").with_timestamp(old)],
        )
        .await
        .unwrap();

    assert!(job.wait_for_forwarded(1, WAIT).await);
    job.stop().await.unwrap();
    let forwarded = setup.output_records(10).await;
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].value, Bytes::from_static(b"value"));
    assert!(forwarded[0].timestamp > old);
}

#[tokio::test]
async fn job_should_skip_records_published_before_it_started() {
    let setup = Setup::new().await;
    let producer =
        BrookProducer::new(ProducerConfig::from_bootstrap_servers(&setup.bootstrap_servers()))
            .unwrap();
    producer.init().await.unwrap();
    producer.publish(&setup.input, ["before"]).await.unwrap();
    let mut job = setup.start_job(setup.job_config()).await;

    producer.publish(&setup.input, ["after"]).await.unwrap();

    assert!(job.wait_for_forwarded(1, WAIT).await);
    job.stop().await.unwrap();
    let forwarded = setup.output_records(10).await;
    let values = forwarded
        .iter()
        .map(|record| record.value.clone())
        .collect::<Vec<_>>();
    assert_eq!(values, vec![Bytes::from_static(b"after")]);
    producer.close().await.unwrap();
}

#[tokio::test]
async fn stop_should_be_idempotent() {
    let setup = Setup::new().await;
    let mut job = setup.start_job(setup.job_config()).await;

    job.stop().await.unwrap();
    job.stop().await.unwrap();

    assert_eq!(job.state(), JobState::Stopped);
    assert_eq!(job.forwarded_count(), 0);
}

#[tokio::test]
async fn job_should_not_be_ready_for_missing_input_topic() {
    let setup = Setup::new().await;
    let mut job = PassThroughJob::new(setup.job_config())
        .start("missingTopic", &setup.output)
        .unwrap();

    let result = job.wait_until_ready(WAIT).await;

    assert!(matches!(result, Err(BrookError::JobNotReady(_))));
    assert!(matches!(job.stop().await, Err(BrookError::JobFailed(_))));
}

#[tokio::test]
async fn job_should_fail_on_invalid_utf8_with_string_codec() {
    let setup = Setup::new().await;
    let mut job = setup.start_job(setup.job_config()).await;
    setup
        .client()
        .await
        .send_messages(
            &setup.input,
            &Partitioning::balanced(),
            Acknowledgment::Leader,
            vec![Record::new(Bytes::from_static(&[0xff, 0xfe]))],
        )
        .await
        .unwrap();

    assert!(!job.wait_for_forwarded(1, Duration::from_secs(2)).await);
    assert!(matches!(job.stop().await, Err(BrookError::JobFailed(_))));
}

#[tokio::test]
async fn idle_job_should_stop_without_waiting_for_poll_interval() {
    let setup = Setup::new().await;
    let config = JobConfig::builder()
        .job_id(unique_name("pass-through"))
        .bootstrap_servers(setup.bootstrap_servers())
        .poll_interval(BrookDuration::from_secs(15))
        .shutdown_timeout(BrookDuration::from_secs(2))
        .build();
    let mut job = setup.start_job(config).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let started_at = Instant::now();
    job.stop().await.unwrap();

    assert!(started_at.elapsed() < Duration::from_secs(2));
    assert_eq!(job.state(), JobState::Stopped);
}

#[tokio::test]
async fn stop_should_report_shutdown_timeout() {
    let setup = Setup::new().await;
    let config = JobConfig::builder()
        .job_id(unique_name("pass-through"))
        .bootstrap_servers(setup.bootstrap_servers())
        .shutdown_timeout(BrookDuration::ZERO)
        .build();
    let mut job = setup.start_job(config).await;

    let error = job.stop().await.unwrap_err();

    assert!(matches!(error, BrookError::JobShutdownTimeout(_)));
    assert!(matches!(
        HarnessError::from_job_stop(error),
        HarnessError::ShutdownTimeoutError(_)
    ));
    assert_eq!(job.state(), JobState::Stopped);
    job.stop().await.unwrap();
}
