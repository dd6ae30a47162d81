use brook::client::{ConsumerOffsetClient, TopicClient};
use brook::error::BrookError;
use brook::tcp::client::TcpClient;

const TOPIC_NAME: &str = "inputTopic";
const GROUP: &str = "pass-through-job";

pub async fn run(client: &TcpClient) {
    client.create_topic(TOPIC_NAME, 2).await.unwrap();

    // 1. Nothing is stored for a new group
    let offset = client.get_consumer_offset(GROUP, TOPIC_NAME, 0).await.unwrap();
    assert!(offset.is_none());

    // 2. The stored offset is returned for the same group and partition only
    client
        .store_consumer_offset(GROUP, TOPIC_NAME, 1, 42)
        .await
        .unwrap();
    let offset = client.get_consumer_offset(GROUP, TOPIC_NAME, 1).await.unwrap();
    assert_eq!(offset, Some(42));
    let offset = client.get_consumer_offset(GROUP, TOPIC_NAME, 0).await.unwrap();
    assert!(offset.is_none());
    let offset = client
        .get_consumer_offset("other-group", TOPIC_NAME, 1)
        .await
        .unwrap();
    assert!(offset.is_none());

    // 3. Unknown topic is reported
    let error = client
        .store_consumer_offset(GROUP, "missing", 0, 1)
        .await
        .unwrap_err();
    assert!(matches!(error, BrookError::TopicNotFound(_)));

    client.delete_topic(TOPIC_NAME).await.unwrap();
}
