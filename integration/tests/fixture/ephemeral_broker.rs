use brook::client::{Client, SystemClient, TopicClient};
use brook::tcp::client::TcpClient;
use integration::ephemeral_broker::{BrokerOptions, BrokerState, EphemeralBroker};
use integration::harness_error::HarnessError;
use integration::{init_logging, unique_name};

async fn connect(broker: &EphemeralBroker) -> TcpClient {
    let client = TcpClient::new(&broker.bootstrap_servers().unwrap()).unwrap();
    client.connect().await.unwrap();
    client
}

#[tokio::test]
async fn broker_should_accept_connections_once_started() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    assert_eq!(broker.state(), BrokerState::NotStarted);

    let address = broker.start().unwrap();

    assert_eq!(broker.state(), BrokerState::Running);
    assert_ne!(address.port(), 0);
    assert_eq!(broker.bootstrap_servers().unwrap(), address.to_string());
    let client = connect(&broker).await;
    client.ping().await.unwrap();
    broker.stop().unwrap();
}

#[tokio::test]
async fn runtime_config_should_be_persisted_with_bound_address() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    let address = broker.start().unwrap();

    let runtime_config = broker
        .data_path()
        .unwrap()
        .join("data/runtime/current_config.toml");
    let content = std::fs::read_to_string(runtime_config).unwrap();
    assert!(content.contains(&address.to_string()));
}

#[tokio::test]
async fn starting_twice_should_fail() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();

    assert!(matches!(
        broker.start(),
        Err(HarnessError::StartupError(_))
    ));
}

#[tokio::test]
async fn binding_a_taken_address_should_fail() {
    init_logging();
    let mut first = EphemeralBroker::default();
    let address = first.start().unwrap();
    let mut second = EphemeralBroker::new(
        BrokerOptions::builder()
            .address(address.to_string())
            .build(),
    );

    assert!(matches!(
        second.start(),
        Err(HarnessError::StartupError(_))
    ));
    assert_eq!(second.state(), BrokerState::NotStarted);
}

#[tokio::test]
async fn topic_should_not_be_created_before_start() {
    init_logging();
    let mut broker = EphemeralBroker::default();

    let result = broker.create_topic("inputTopic").await;

    assert!(matches!(
        result,
        Err(HarnessError::TopicCreationError { .. })
    ));
}

#[tokio::test]
async fn topic_should_be_created_with_default_partitions() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();
    let topic = unique_name("inputTopic");

    broker.create_topic(&topic).await.unwrap();

    let client = connect(&broker).await;
    let details = client.get_topic(&topic).await.unwrap().unwrap();
    assert_eq!(details.partitions_count, 1);
    assert_eq!(details.partitions[0].end_offset, 0);
    assert_eq!(broker.topics(), &[topic]);
}

#[tokio::test]
async fn default_partitions_should_come_from_options() {
    init_logging();
    let mut broker = EphemeralBroker::new(BrokerOptions::builder().default_partitions(3).build());
    broker.start().unwrap();
    let topic = unique_name("outputTopic");

    broker.create_topic(&topic).await.unwrap();

    let client = connect(&broker).await;
    let details = client.get_topic(&topic).await.unwrap().unwrap();
    assert_eq!(details.partitions_count, 3);
}

#[tokio::test]
async fn recreating_topic_with_same_settings_should_succeed() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();
    let topic = unique_name("inputTopic");

    broker.create_topic(&topic).await.unwrap();
    broker.create_topic(&topic).await.unwrap();

    let client = connect(&broker).await;
    assert_eq!(client.get_topics().await.unwrap().len(), 1);
    assert_eq!(broker.topics().len(), 1);
}

#[tokio::test]
async fn recreating_topic_with_other_partitions_count_should_fail() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();
    let topic = unique_name("inputTopic");
    broker.create_topic(&topic).await.unwrap();

    let result = broker.create_topic_with_partitions(&topic, 2).await;

    assert!(matches!(
        result,
        Err(HarnessError::TopicCreationError { .. })
    ));
}

#[tokio::test]
async fn invalid_topic_name_should_be_rejected() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();

    for name in ["", "input topic", "input/topic"] {
        let result = broker.create_topic(name).await;
        assert!(matches!(
            result,
            Err(HarnessError::TopicCreationError { .. })
        ));
    }
    assert!(broker.topics().is_empty());
}

#[tokio::test]
async fn stop_should_be_idempotent_and_remove_data() {
    init_logging();
    let mut never_started = EphemeralBroker::default();
    never_started.stop().unwrap();
    assert_eq!(never_started.state(), BrokerState::NotStarted);

    let mut broker = EphemeralBroker::default();
    let address = broker.start().unwrap();
    let data_path = broker.data_path().unwrap().to_path_buf();
    assert!(data_path.exists());

    broker.stop().unwrap();
    broker.stop().unwrap();

    assert_eq!(broker.state(), BrokerState::Stopped);
    assert!(!data_path.exists());
    assert!(broker.bootstrap_servers().is_err());
    assert!(tokio::net::TcpStream::connect(address).await.is_err());
}

#[tokio::test]
async fn stopped_broker_should_not_be_restarted() {
    init_logging();
    let mut broker = EphemeralBroker::default();
    broker.start().unwrap();
    broker.stop().unwrap();

    assert!(matches!(
        broker.start(),
        Err(HarnessError::StartupError(_))
    ));
}
