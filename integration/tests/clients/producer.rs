use brook::client::{Client, MessageClient};
use brook::clients::producer::BrookProducer;
use brook::config::ProducerConfig;
use brook::error::BrookError;
use brook::messages::send_messages::Acknowledgment;
use brook::tcp::client::TcpClient;
use brook::utils::duration::BrookDuration;
use bytes::Bytes;
use futures::future::join_all;
use integration::ephemeral_broker::EphemeralBroker;
use integration::{init_logging, unique_name};
use test_case::test_case;

async fn started_broker(topic: &str) -> EphemeralBroker {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();
    broker.create_topic(topic).await.unwrap();
    broker
}

async fn read_values(broker: &EphemeralBroker, topic: &str, count: u32) -> Vec<Bytes> {
    let client = TcpClient::new(&broker.bootstrap_servers().unwrap()).unwrap();
    client.connect().await.unwrap();
    let polled = client
        .poll_messages(topic, 0, 0, count, BrookDuration::ZERO)
        .await
        .unwrap();
    polled
        .records
        .into_iter()
        .map(|polled| polled.record.value)
        .collect()
}

async fn init_producer(broker: &EphemeralBroker) -> BrookProducer {
    let bootstrap_servers = broker.bootstrap_servers().unwrap();
    let producer =
        BrookProducer::new(ProducerConfig::from_bootstrap_servers(&bootstrap_servers)).unwrap();
    producer.init().await.unwrap();
    producer
}

#[test_case(1; "one record per batch")]
#[test_case(2; "two records per batch")]
#[test_case(10; "single batch")]
#[tokio::test]
async fn published_values_should_be_appended_in_order(batch_size: u32) {
    let topic = unique_name("inputTopic");
    let broker = started_broker(&topic).await;
    let producer = BrookProducer::new(
        ProducerConfig::builder()
            .bootstrap_servers(broker.bootstrap_servers().unwrap())
            .batch_size(batch_size)
            .acknowledgment(Acknowledgment::All)
            .build(),
    )
    .unwrap();
    producer.init().await.unwrap();
    let values = (0..5).map(|i| format!("value-{i}")).collect::<Vec<_>>();

    let metadata = producer.publish(&topic, values.clone()).await.unwrap();

    let offsets = metadata.iter().map(|m| m.offset).collect::<Vec<_>>();
    assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
    assert!(metadata.iter().all(|m| m.topic == topic && m.partition_id == 0));
    assert_eq!(read_values(&broker, &topic, 10).await, values);
    producer.close().await.unwrap();
}

#[tokio::test]
async fn publishing_to_missing_topic_should_fail_fast() {
    let topic = unique_name("inputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker).await;

    let result = producer.publish("missingTopic", ["a", "b"]).await;

    assert!(matches!(result, Err(BrookError::TopicNotFound(_))));
    assert_eq!(producer.get_partitions_count(&topic).await.unwrap(), 1);
    producer.close().await.unwrap();
}

#[tokio::test]
async fn concurrent_sends_should_be_appended_in_call_order() {
    let topic = unique_name("inputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker).await;

    let mut deliveries = Vec::new();
    for i in 0..10 {
        deliveries.push(producer.send(&topic, None, format!("value-{i}")).await.unwrap());
    }
    let metadata = join_all(deliveries)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let offsets = metadata.iter().map(|m| m.offset).collect::<Vec<_>>();
    assert_eq!(offsets, (0..10).collect::<Vec<u64>>());
    producer.flush().await.unwrap();
    producer.close().await.unwrap();
}

#[tokio::test]
async fn closed_producer_should_reject_sends() {
    let topic = unique_name("inputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker).await;

    producer.close().await.unwrap();
    producer.close().await.unwrap();

    assert!(producer.is_closed());
    assert!(matches!(
        producer.send(&topic, None, "late").await,
        Err(BrookError::ProducerClosed)
    ));
    assert!(matches!(
        producer.publish(&topic, ["late"]).await,
        Err(BrookError::ProducerClosed)
    ));
}

#[tokio::test]
async fn invalid_utf8_value_should_be_rejected_by_string_codec() {
    let topic = unique_name("inputTopic");
    let broker = started_broker(&topic).await;
    let producer = init_producer(&broker).await;

    let result = producer
        .publish(&topic, [Bytes::from_static(&[0xff, 0xfe])])
        .await;

    assert!(matches!(result, Err(BrookError::InvalidUtf8Payload)));
    assert!(read_values(&broker, &topic, 10).await.is_empty());
    producer.close().await.unwrap();
}
