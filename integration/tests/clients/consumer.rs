use brook::clients::consumer::BrookConsumer;
use brook::clients::producer::BrookProducer;
use brook::config::{ConsumerConfig, OffsetReset, ProducerConfig};
use brook::error::BrookError;
use integration::ephemeral_broker::EphemeralBroker;
use integration::{init_logging, unique_name};
use std::time::Duration;
use test_case::test_case;

const POLL_TIMEOUT: Duration = Duration::from_millis(500);

struct Setup {
    broker: EphemeralBroker,
    topic: String,
    producer: BrookProducer,
}

impl Setup {
    async fn new() -> Setup {
        init_logging();
        let mut broker = EphemeralBroker::default();
        broker.start().unwrap();
        let topic = unique_name("inputTopic");
        broker.create_topic(&topic).await.unwrap();
        let producer = BrookProducer::new(ProducerConfig::from_bootstrap_servers(
            &broker.bootstrap_servers().unwrap(),
        ))
        .unwrap();
        producer.init().await.unwrap();
        Setup {
            broker,
            topic,
            producer,
        }
    }

    fn consumer(&self, group: &str, offset_reset: OffsetReset) -> BrookConsumer {
        BrookConsumer::new(
            ConsumerConfig::builder()
                .bootstrap_servers(self.broker.bootstrap_servers().unwrap())
                .group_id(group)
                .offset_reset(offset_reset)
                .build(),
        )
        .unwrap()
    }
}

async fn poll_values(consumer: &mut BrookConsumer) -> Vec<String> {
    consumer
        .poll(POLL_TIMEOUT)
        .await
        .unwrap()
        .iter()
        .map(|record| record.value_as_str().unwrap().to_string())
        .collect()
}

#[test_case(OffsetReset::Earliest, &["before", "after"]; "earliest")]
#[test_case(OffsetReset::Latest, &["after"]; "latest")]
#[tokio::test]
async fn offset_reset_should_decide_where_new_group_starts(
    offset_reset: OffsetReset,
    expected: &[&str],
) {
    let setup = Setup::new().await;
    setup.producer.publish(&setup.topic, ["before"]).await.unwrap();
    let mut consumer = setup.consumer(&unique_name("group"), offset_reset);
    consumer.subscribe(&[&setup.topic]).await.unwrap();

    setup.producer.publish(&setup.topic, ["after"]).await.unwrap();

    let mut values = Vec::new();
    while values.len() < expected.len() {
        let polled = poll_values(&mut consumer).await;
        assert!(!polled.is_empty(), "Consumer has timed out, got: {values:?}");
        values.extend(polled);
    }
    assert_eq!(values, expected);
    consumer.close().await.unwrap();
}

#[tokio::test]
async fn group_should_resume_from_committed_offset() {
    let setup = Setup::new().await;
    let group = unique_name("group");
    setup
        .producer
        .publish(&setup.topic, ["first", "second"])
        .await
        .unwrap();

    let mut consumer = setup.consumer(&group, OffsetReset::Earliest);
    consumer.subscribe(&[&setup.topic]).await.unwrap();
    assert_eq!(poll_values(&mut consumer).await, vec!["first", "second"]);
    consumer.close().await.unwrap();

    setup.producer.publish(&setup.topic, ["third"]).await.unwrap();
    let mut consumer = setup.consumer(&group, OffsetReset::Earliest);
    consumer.subscribe(&[&setup.topic]).await.unwrap();

    assert_eq!(consumer.assignments()[0].committed, Some(2));
    assert_eq!(poll_values(&mut consumer).await, vec!["third"]);
    consumer.close().await.unwrap();
}

#[tokio::test]
async fn subscribing_to_missing_topic_should_fail() {
    let setup = Setup::new().await;
    let mut consumer = setup.consumer(&unique_name("group"), OffsetReset::Earliest);

    let result = consumer.subscribe(&["missingTopic"]).await;

    assert!(matches!(result, Err(BrookError::TopicNotFound(_))));
}

#[tokio::test]
async fn polling_without_subscription_should_fail() {
    let setup = Setup::new().await;
    let mut consumer = setup.consumer(&unique_name("group"), OffsetReset::Earliest);
    consumer.init().await.unwrap();

    let result = consumer.poll(POLL_TIMEOUT).await;

    assert!(matches!(result, Err(BrookError::ConsumerNotSubscribed)));
}

#[tokio::test]
async fn poll_should_return_empty_after_timeout() {
    let setup = Setup::new().await;
    let mut consumer = setup.consumer(&unique_name("group"), OffsetReset::Earliest);
    consumer.subscribe(&[&setup.topic]).await.unwrap();

    let started_at = tokio::time::Instant::now();
    let values = poll_values(&mut consumer).await;

    assert!(values.is_empty());
    assert!(started_at.elapsed() >= POLL_TIMEOUT - Duration::from_millis(50));
}
