use brook::client::{MessageClient, TopicClient};
use brook::error::BrookError;
use brook::messages::send_messages::{Acknowledgment, Partitioning};
use brook::models::record::Record;
use brook::tcp::client::TcpClient;
use brook::utils::duration::BrookDuration;
use bytes::Bytes;
use std::time::Duration;
use tokio::time::Instant;

const TOPIC_NAME: &str = "inputTopic";
const LINES: [&str; 3] = [
    "hello world",
    "the world is not enough",
    "the world of the stock market is coming to an end",
];

pub async fn run(client: &TcpClient) {
    client.create_topic(TOPIC_NAME, 1).await.unwrap();

    // 1. Append the records one by one, each one is acknowledged with its offset
    for (offset, line) in LINES.iter().enumerate() {
        let appended = client
            .send_messages(
                TOPIC_NAME,
                &Partitioning::balanced(),
                Acknowledgment::All,
                vec![Record::new(*line)],
            )
            .await
            .unwrap();
        assert_eq!(appended.partition_id, 0);
        assert_eq!(appended.base_offset, offset as u64);
        assert_eq!(appended.count, 1);
    }

    // 2. Poll them back in order with identical content
    let polled = client
        .poll_messages(TOPIC_NAME, 0, 0, 10, BrookDuration::ZERO)
        .await
        .unwrap();
    assert_eq!(polled.end_offset, LINES.len() as u64);
    let values: Vec<Bytes> = polled.records.into_iter().map(|r| r.record.value).collect();
    let expected: Vec<Bytes> = LINES.iter().map(|line| Bytes::from(*line)).collect();
    assert_eq!(values, expected);

    // 3. Polling from the middle honors the offset and the count
    let polled = client
        .poll_messages(TOPIC_NAME, 0, 1, 1, BrookDuration::ZERO)
        .await
        .unwrap();
    assert_eq!(polled.records.len(), 1);
    assert_eq!(polled.records[0].offset, 1);
    assert_eq!(polled.records[0].record.value, LINES[1]);

    // 4. Polling at the end waits for the given time and returns nothing
    let started_at = Instant::now();
    let polled = client
        .poll_messages(TOPIC_NAME, 0, 3, 10, BrookDuration::from_millis(300))
        .await
        .unwrap();
    assert!(polled.records.is_empty());
    assert!(started_at.elapsed() >= Duration::from_millis(300));

    // 5. Missing topic and partition are reported
    let error = client
        .send_messages(
            "missing",
            &Partitioning::balanced(),
            Acknowledgment::Leader,
            vec![Record::new("lost")],
        )
        .await
        .unwrap_err();
    assert!(matches!(error, BrookError::TopicNotFound(_)));
    let error = client
        .poll_messages(TOPIC_NAME, 7, 0, 10, BrookDuration::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(error, BrookError::PartitionNotFound(7)));

    client.delete_topic(TOPIC_NAME).await.unwrap();
}
