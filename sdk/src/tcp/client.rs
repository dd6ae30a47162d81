use crate::binary::binary_client::{BinaryClient, ClientState};
use crate::client::Client;
use crate::error::BrookError;
use crate::tcp::config::{TcpClientConfig, TcpClientConfigBuilder};
use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, error, info, trace, warn};

const REQUEST_INITIAL_BYTES_LENGTH: usize = 4;
const RESPONSE_INITIAL_BYTES_LENGTH: usize = 8;
const NAME: &str = "Brook";

/// TCP client for interacting with the Brook broker.
/// It requires a valid server address.
///
/// Requests are serialized on a single connection, one in flight at a time.
#[derive(Debug)]
pub struct TcpClient {
    stream: Mutex<Option<ConnectionStream>>,
    pub(crate) config: Arc<TcpClientConfig>,
    state: Mutex<ClientState>,
}

#[derive(Debug)]
struct ConnectionStream {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl ConnectionStream {
    fn new(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
        }
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, BrookError> {
        Ok(self.reader.read_exact(buf).await?)
    }

    async fn write(&mut self, buf: &[u8]) -> Result<(), BrookError> {
        Ok(self.writer.write_all(buf).await?)
    }

    async fn flush(&mut self) -> Result<(), BrookError> {
        Ok(self.writer.flush().await?)
    }
}

#[async_trait]
impl Client for TcpClient {
    async fn connect(&self) -> Result<(), BrookError> {
        TcpClient::connect(self).await
    }

    async fn disconnect(&self) -> Result<(), BrookError> {
        TcpClient::disconnect(self).await
    }
}

#[async_trait]
impl BinaryClient for TcpClient {
    async fn get_state(&self) -> ClientState {
        *self.state.lock().await
    }

    async fn set_state(&self, state: ClientState) {
        *self.state.lock().await = state;
    }

    async fn send_with_response(&self, code: u32, payload: Bytes) -> Result<Bytes, BrookError> {
        let result = self.send_raw(code, payload.clone()).await;
        let error = match result {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        if !matches!(error, BrookError::Disconnected | BrookError::EmptyResponse) {
            return Err(error);
        }

        if !self.config.reconnection.enabled {
            return Err(error);
        }

        self.disconnect().await?;
        info!("Reconnecting to the broker...");
        self.connect().await?;
        self.send_raw(code, payload).await
    }
}

impl TcpClient {
    /// Create a new TCP client for the provided server address.
    pub fn new(server_address: &str) -> Result<Self, BrookError> {
        Self::create(Arc::new(
            TcpClientConfigBuilder::new()
                .with_server_address(server_address.to_string())
                .build(),
        ))
    }

    /// Create a new TCP client based on the provided configuration.
    pub fn create(config: Arc<TcpClientConfig>) -> Result<Self, BrookError> {
        if config.server_address.parse::<SocketAddr>().is_err()
            && !config.server_address.contains(':')
        {
            return Err(BrookError::InvalidServerAddress(
                config.server_address.clone(),
            ));
        }

        Ok(Self {
            config,
            stream: Mutex::new(None),
            state: Mutex::new(ClientState::Disconnected),
        })
    }

    async fn handle_response(
        &self,
        status: u32,
        length: u32,
        stream: &mut ConnectionStream,
    ) -> Result<Bytes, BrookError> {
        if status != 0 {
            let mut error_details_buffer = BytesMut::with_capacity(length as usize);
            error_details_buffer.put_bytes(0, length as usize);
            stream.read(&mut error_details_buffer).await?;

            let details = if error_details_buffer.len() >= 4 {
                let details_length = error_details_buffer.get_u32_le() as usize;
                let details_length = details_length.min(error_details_buffer.len());
                String::from_utf8_lossy(&error_details_buffer[..details_length]).to_string()
            } else {
                String::new()
            };

            let error = BrookError::from_code(status, &details);
            debug!("Received an error response with status: {status} ({error}).");
            return Err(error);
        }

        trace!("Status: OK. Response length: {}", length);
        if length == 0 {
            return Ok(Bytes::new());
        }

        let mut response_buffer = BytesMut::with_capacity(length as usize);
        response_buffer.put_bytes(0, length as usize);
        stream.read(&mut response_buffer).await?;
        Ok(response_buffer.freeze())
    }

    async fn connect(&self) -> Result<(), BrookError> {
        let state = self.get_state().await;
        if state == ClientState::Connected {
            trace!("Client is already connected.");
            return Ok(());
        }

        if state == ClientState::Connecting {
            trace!("Client is already connecting.");
            return Ok(());
        }

        self.set_state(ClientState::Connecting).await;
        let mut retry_count = 0;
        let stream = loop {
            info!(
                "{NAME} client is connecting to broker: {}...",
                self.config.server_address
            );

            match TcpStream::connect(&self.config.server_address).await {
                Ok(stream) => break stream,
                Err(error) => {
                    error!(
                        "Failed to connect to broker: {}, {error}",
                        self.config.server_address
                    );
                }
            }

            if !self.config.reconnection.enabled {
                warn!("Automatic reconnection is disabled.");
                self.set_state(ClientState::Disconnected).await;
                return Err(BrookError::CannotEstablishConnection);
            }

            let max_retries = self.config.reconnection.max_retries;
            let max_retries_str =
                max_retries.map_or("unlimited".to_string(), |max| max.to_string());
            let interval = self.config.reconnection.interval;
            let can_retry = match max_retries {
                Some(max_retries) => retry_count < max_retries,
                None => true,
            };
            if can_retry {
                retry_count += 1;
                info!(
                    "Retrying to connect to broker ({retry_count}/{max_retries_str}): {} in: {interval}",
                    self.config.server_address,
                );
                sleep(interval.get_duration()).await;
                continue;
            }

            self.set_state(ClientState::Disconnected).await;
            return Err(BrookError::CannotEstablishConnection);
        };

        if let Err(error) = stream.set_nodelay(self.config.nodelay) {
            warn!("Failed to set TCP_NODELAY: {error}");
        }

        let remote_address = stream.peer_addr()?;
        info!("{NAME} client has connected to broker: {remote_address}");
        self.stream.lock().await.replace(ConnectionStream::new(stream));
        self.set_state(ClientState::Connected).await;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BrookError> {
        if self.get_state().await == ClientState::Disconnected {
            return Ok(());
        }

        info!("{NAME} client is disconnecting from broker...");
        self.set_state(ClientState::Disconnected).await;
        self.stream.lock().await.take();
        info!("{NAME} client has disconnected from broker.");
        Ok(())
    }

    async fn send_raw(&self, code: u32, payload: Bytes) -> Result<Bytes, BrookError> {
        if self.get_state().await != ClientState::Connected {
            trace!("Cannot send data. Client is not connected.");
            return Err(BrookError::NotConnected);
        }

        let mut guard = self.stream.lock().await;
        let Some(stream) = guard.as_mut() else {
            error!("Cannot send data. Client is not connected.");
            return Err(BrookError::NotConnected);
        };

        trace!("Sending a TCP request with code: {code}");
        let result = Self::exchange(stream, code, &payload).await;
        let (status, length) = match result {
            Ok(header) => header,
            Err(error) => {
                error!("Failed to exchange a TCP request with code: {code}, {error}");
                guard.take();
                drop(guard);
                self.set_state(ClientState::Disconnected).await;
                return Err(BrookError::Disconnected);
            }
        };

        match self.handle_response(status, length, stream).await {
            Err(error @ BrookError::IoError(_)) => {
                error!("Failed to read the response payload: {error}");
                guard.take();
                drop(guard);
                self.set_state(ClientState::Disconnected).await;
                Err(BrookError::Disconnected)
            }
            result => result,
        }
    }

    async fn exchange(
        stream: &mut ConnectionStream,
        code: u32,
        payload: &[u8],
    ) -> Result<(u32, u32), BrookError> {
        let payload_length = payload.len() + REQUEST_INITIAL_BYTES_LENGTH;
        stream.write(&(payload_length as u32).to_le_bytes()).await?;
        stream.write(&code.to_le_bytes()).await?;
        stream.write(payload).await?;
        stream.flush().await?;
        trace!("Sent a TCP request, waiting for a response...");

        let mut response_buffer = [0u8; RESPONSE_INITIAL_BYTES_LENGTH];
        let read_bytes = stream.read(&mut response_buffer).await?;
        if read_bytes != RESPONSE_INITIAL_BYTES_LENGTH {
            return Err(BrookError::EmptyResponse);
        }

        let status = u32::from_le_bytes(response_buffer[..4].try_into()?);
        let length = u32::from_le_bytes(response_buffer[4..].try_into()?);
        Ok((status, length))
    }
}
