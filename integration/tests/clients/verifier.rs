use brook::clients::producer::BrookProducer;
use brook::codec::Codec;
use brook::config::{ConsumerConfig, OffsetReset, ProducerConfig};
use brook::error::BrookError;
use bytes::Bytes;
use integration::ephemeral_broker::EphemeralBroker;
use integration::harness_error::HarnessError;
use integration::verifier::RecordVerifier;
use integration::{init_logging, unique_name};
use serial_test::serial;
use std::time::Duration;
use tokio::time::Instant;

async fn started_broker(topic: &str) -> EphemeralBroker {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();
    broker.create_topic(topic).await.unwrap();
    broker
}

async fn init_producer(broker: &EphemeralBroker, value_codec: Codec) -> BrookProducer {
    let producer = BrookProducer::new(
        ProducerConfig::builder()
            .bootstrap_servers(broker.bootstrap_servers().unwrap())
            .value_codec(value_codec)
            .build(),
    )
    .unwrap();
    producer.init().await.unwrap();
    producer
}

// Timing sensitive, runs in serial.
#[serial]
#[tokio::test]
async fn drain_should_give_up_after_max_total_wait() {
    let topic = unique_name("outputTopic");
    let broker = started_broker(&topic).await;
    let verifier = RecordVerifier::new(&broker.bootstrap_servers().unwrap());

    let started_at = Instant::now();
    let values = verifier
        .drain(
            &topic,
            3,
            Duration::from_millis(100),
            Duration::from_millis(2000),
        )
        .await
        .unwrap();
    let elapsed = started_at.elapsed();

    assert!(values.is_empty());
    assert!(elapsed >= Duration::from_millis(1900), "elapsed: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(3000), "elapsed: {elapsed:?}");
}

#[tokio::test]
async fn drain_should_return_immediately_when_nothing_is_expected() {
    let topic = unique_name("outputTopic");
    let broker = started_broker(&topic).await;
    let verifier = RecordVerifier::new(&broker.bootstrap_servers().unwrap());

    let started_at = Instant::now();
    let values = verifier
        .drain(&topic, 0, Duration::from_secs(1), Duration::from_secs(5))
        .await
        .unwrap();

    assert!(values.is_empty());
    assert!(started_at.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn drain_should_keep_publish_order() {
    let topic = unique_name("outputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker, Codec::String).await;
    let lines = (0..250).map(|i| format!("line-{i}")).collect::<Vec<_>>();
    producer.publish(&topic, lines.clone()).await.unwrap();
    producer.close().await.unwrap();

    let verifier = RecordVerifier::new(&broker.bootstrap_servers().unwrap());
    let delivered = verifier
        .drain_values(
            &topic,
            lines.len(),
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .await
        .unwrap();

    assert_eq!(delivered, lines);
}

#[tokio::test]
async fn drain_should_deliver_identical_bytes() {
    let topic = unique_name("outputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker, Codec::Bytes).await;
    let values = vec![
        Bytes::from_static(&[0x00, 0xff, 0x10]),
        Bytes::from_static("zażółć gęślą jaźń".as_bytes()),
        Bytes::new(),
    ];
    producer.publish(&topic, values.clone()).await.unwrap();
    producer.close().await.unwrap();

    let verifier = RecordVerifier::with_config(
        ConsumerConfig::builder()
            .bootstrap_servers(broker.bootstrap_servers().unwrap())
            .group_id(unique_name("verifier"))
            .offset_reset(OffsetReset::Earliest)
            .value_codec(Codec::Bytes)
            .build(),
    );
    let delivered = verifier
        .drain(
            &topic,
            values.len(),
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .await
        .unwrap();

    assert_eq!(delivered, values);
}

#[tokio::test]
async fn drain_should_return_early_when_records_arrive() {
    let topic = unique_name("outputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker, Codec::String).await;
    let verifier = RecordVerifier::new(&broker.bootstrap_servers().unwrap());

    let started_at = Instant::now();
    let (delivered, published) = tokio::join!(
        verifier.drain(&topic, 1, Duration::from_secs(5), Duration::from_secs(10)),
        async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            producer.publish(&topic, ["late"]).await
        }
    );

    published.unwrap();
    assert_eq!(delivered.unwrap(), vec![Bytes::from_static(b"late")]);
    assert!(started_at.elapsed() < Duration::from_secs(3));
    producer.close().await.unwrap();
}

#[tokio::test]
async fn drain_should_fail_for_missing_topic() {
    let topic = unique_name("outputTopic");
    let broker = started_broker(&topic).await;
    let verifier = RecordVerifier::new(&broker.bootstrap_servers().unwrap());

    let result = verifier
        .drain(
            "missingTopic",
            1,
            Duration::from_millis(100),
            Duration::from_secs(1),
        )
        .await;

    assert!(matches!(
        result,
        Err(HarnessError::Consume(BrookError::TopicNotFound(_)))
    ));
}
