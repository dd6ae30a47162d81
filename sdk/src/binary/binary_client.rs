use crate::error::BrookError;
use async_trait::async_trait;
use bytes::Bytes;

/// The state of the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClientState {
    /// The client is disconnected.
    Disconnected,
    /// The client is connecting.
    Connecting,
    /// The client is connected.
    Connected,
}

/// A client that can send and receive binary messages.
#[async_trait]
pub trait BinaryClient: Send + Sync {
    /// Gets the state of the client.
    async fn get_state(&self) -> ClientState;
    /// Sets the state of the client.
    async fn set_state(&self, state: ClientState);
    /// Sends the command with the already serialized payload and returns the response payload.
    async fn send_with_response(&self, code: u32, payload: Bytes) -> Result<Bytes, BrookError>;
}
