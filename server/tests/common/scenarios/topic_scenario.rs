use brook::client::{SystemClient, TopicClient};
use brook::error::BrookError;
use brook::tcp::client::TcpClient;

const TOPIC_NAME: &str = "inputTopic";

pub async fn run(client: &TcpClient) {
    client.ping().await.unwrap();

    // 1. A missing topic is reported as none
    assert!(client.get_topic(TOPIC_NAME).await.unwrap().is_none());
    assert!(client.get_topics().await.unwrap().is_empty());

    // 2. Create the topic, creating it again with the same settings is a no-op
    client.create_topic(TOPIC_NAME, 3).await.unwrap();
    client.create_topic(TOPIC_NAME, 3).await.unwrap();

    let topic = client.get_topic(TOPIC_NAME).await.unwrap().unwrap();
    assert_eq!(topic.name, TOPIC_NAME);
    assert_eq!(topic.partitions_count, 3);
    assert_eq!(topic.messages_count, 0);
    let ids: Vec<u32> = topic.partitions.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    // 3. Other settings for the same name are rejected
    let error = client.create_topic(TOPIC_NAME, 1).await.unwrap_err();
    assert!(matches!(error, BrookError::TopicAlreadyExists(name) if name == TOPIC_NAME));

    // 4. Topics are listed by name
    client.create_topic("a-topic", 1).await.unwrap();
    let names: Vec<String> = client
        .get_topics()
        .await
        .unwrap()
        .into_iter()
        .map(|topic| topic.name)
        .collect();
    assert_eq!(names, vec!["a-topic".to_string(), TOPIC_NAME.to_string()]);

    // 5. Delete the topics
    client.delete_topic(TOPIC_NAME).await.unwrap();
    client.delete_topic("a-topic").await.unwrap();
    assert!(client.get_topics().await.unwrap().is_empty());
    let error = client.delete_topic(TOPIC_NAME).await.unwrap_err();
    assert!(matches!(error, BrookError::TopicNotFound(_)));
}
