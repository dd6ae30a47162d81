use std::array::TryFromSliceError;
use std::io;
use std::str::Utf8Error;
use thiserror::Error;

/// The error type shared by the Brook client and the broker.
///
/// Every variant has a stable numeric code, which the broker sends back as the
/// response status. Variants carrying a value transfer it as the error details,
/// so that [`BrookError::from_code`] can rebuild the same variant on the client.
#[derive(Debug, Error)]
pub enum BrookError {
    #[error("Error")]
    Error,
    #[error("Invalid configuration")]
    InvalidConfiguration,
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Invalid format")]
    InvalidFormat,
    #[error("Invalid server address: {0}")]
    InvalidServerAddress(String),
    #[error("Not connected")]
    NotConnected,
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("Disconnected")]
    Disconnected,
    #[error("Cannot establish connection")]
    CannotEstablishConnection,
    #[error("Empty response")]
    EmptyResponse,
    #[error("IO error")]
    IoError(#[from] io::Error),
    #[error("TCP error")]
    TcpError,
    #[error("Cannot parse slice")]
    CannotParseSlice(#[from] TryFromSliceError),
    #[error("Cannot parse UTF8")]
    CannotParseUtf8(#[from] Utf8Error),
    #[error("Invalid response with status: {0}, details: {1}")]
    InvalidResponse(u32, String),
    #[error("Invalid topic name: {0}")]
    InvalidTopicName(String),
    #[error("Topic with name: {0} already exists with different settings")]
    TopicAlreadyExists(String),
    #[error("Topic with name: {0} was not found")]
    TopicNotFound(String),
    #[error("Invalid partitions count")]
    InvalidPartitionsCount,
    #[error("Partition with ID: {0} was not found")]
    PartitionNotFound(u32),
    #[error("Invalid messages count")]
    InvalidMessagesCount,
    #[error("Invalid message payload length")]
    InvalidMessagePayloadLength,
    #[error("Invalid consumer group name: {0}")]
    InvalidConsumerGroupName(String),
    #[error("Invalid UTF-8 payload")]
    InvalidUtf8Payload,
    #[error("Invalid codec: {0}")]
    InvalidCodec(String),
    #[error("Producer is closed")]
    ProducerClosed,
    #[error("Record was not delivered: {0}")]
    DeliveryFailed(String),
    #[error("Consumer is not subscribed to any topic")]
    ConsumerNotSubscribed,
    #[error("Job is already running")]
    JobAlreadyRunning,
    #[error("Job is not ready after: {0}")]
    JobNotReady(String),
    #[error("Job did not shut down within: {0}")]
    JobShutdownTimeout(String),
    #[error("Job has failed: {0}")]
    JobFailed(String),
}

impl BrookError {
    pub fn as_code(&self) -> u32 {
        match self {
            BrookError::Error => 1,
            BrookError::InvalidConfiguration => 2,
            BrookError::InvalidCommand => 3,
            BrookError::InvalidFormat => 4,
            BrookError::InvalidServerAddress(_) => 8,
            BrookError::NotConnected => 9,
            BrookError::ConnectionClosed => 10,
            BrookError::Disconnected => 11,
            BrookError::CannotEstablishConnection => 12,
            BrookError::EmptyResponse => 13,
            BrookError::IoError(_) => 14,
            BrookError::TcpError => 15,
            BrookError::CannotParseSlice(_) => 16,
            BrookError::CannotParseUtf8(_) => 17,
            BrookError::InvalidResponse(status, _) => *status,
            BrookError::InvalidTopicName(_) => 1001,
            BrookError::TopicAlreadyExists(_) => 1002,
            BrookError::TopicNotFound(_) => 1003,
            BrookError::InvalidPartitionsCount => 1004,
            BrookError::PartitionNotFound(_) => 1005,
            BrookError::InvalidMessagesCount => 2001,
            BrookError::InvalidMessagePayloadLength => 2002,
            BrookError::InvalidConsumerGroupName(_) => 3001,
            BrookError::InvalidUtf8Payload => 4001,
            BrookError::InvalidCodec(_) => 4002,
            BrookError::ProducerClosed => 5001,
            BrookError::DeliveryFailed(_) => 5002,
            BrookError::ConsumerNotSubscribed => 5101,
            BrookError::JobAlreadyRunning => 5201,
            BrookError::JobNotReady(_) => 5202,
            BrookError::JobShutdownTimeout(_) => 5203,
            BrookError::JobFailed(_) => 5204,
        }
    }

    /// The value transferred next to the status code in an error response.
    pub fn details(&self) -> String {
        match self {
            BrookError::InvalidServerAddress(value)
            | BrookError::InvalidTopicName(value)
            | BrookError::TopicAlreadyExists(value)
            | BrookError::TopicNotFound(value)
            | BrookError::InvalidConsumerGroupName(value)
            | BrookError::InvalidCodec(value)
            | BrookError::DeliveryFailed(value)
            | BrookError::JobNotReady(value)
            | BrookError::JobShutdownTimeout(value)
            | BrookError::JobFailed(value)
            | BrookError::InvalidResponse(_, value) => value.clone(),
            BrookError::PartitionNotFound(partition_id) => partition_id.to_string(),
            _ => String::new(),
        }
    }

    /// Rebuilds the error received from the broker. Codes which cannot be sent
    /// over the wire or are unknown become [`BrookError::InvalidResponse`].
    pub fn from_code(code: u32, details: &str) -> Self {
        match code {
            1 => BrookError::Error,
            2 => BrookError::InvalidConfiguration,
            3 => BrookError::InvalidCommand,
            4 => BrookError::InvalidFormat,
            1001 => BrookError::InvalidTopicName(details.to_owned()),
            1002 => BrookError::TopicAlreadyExists(details.to_owned()),
            1003 => BrookError::TopicNotFound(details.to_owned()),
            1004 => BrookError::InvalidPartitionsCount,
            1005 => match details.parse::<u32>() {
                Ok(partition_id) => BrookError::PartitionNotFound(partition_id),
                Err(_) => BrookError::InvalidResponse(code, details.to_owned()),
            },
            2001 => BrookError::InvalidMessagesCount,
            2002 => BrookError::InvalidMessagePayloadLength,
            3001 => BrookError::InvalidConsumerGroupName(details.to_owned()),
            _ => BrookError::InvalidResponse(code, details.to_owned()),
        }
    }

    /// Whether the error means that the connection cannot be used anymore.
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            BrookError::Disconnected
                | BrookError::ConnectionClosed
                | BrookError::EmptyResponse
                | BrookError::NotConnected
                | BrookError::TcpError
                | BrookError::IoError(_)
        )
    }
}
