use crate::binary::command::{self, ServerCommand};
use crate::binary::sender::Sender;
use crate::server_error::ServerError;
use crate::streaming::systems::system::SharedSystem;
use brook::error::BrookError;
use bytes::Bytes;
use std::io::ErrorKind;
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::{debug, error, info, trace};

const INITIAL_BYTES_LENGTH: usize = 4;
const MAX_REQUEST_LENGTH: u32 = 64 * 1024 * 1024;

pub(crate) async fn handle_connection(
    address: &SocketAddr,
    sender: &mut dyn Sender,
    system: SharedSystem,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    let mut initial_buffer = [0u8; INITIAL_BYTES_LENGTH];
    loop {
        let read_length = tokio::select! {
            result = sender.read(&mut initial_buffer) => result?,
            _ = shutdown.changed() => {
                debug!("Closing the connection with: {address}, server is shutting down.");
                sender.shutdown().await?;
                return Ok(());
            }
        };
        if read_length != INITIAL_BYTES_LENGTH {
            error!(
                "Unable to read the TCP request length, expected: {} bytes, received: {} bytes.",
                INITIAL_BYTES_LENGTH, read_length
            );
            continue;
        }

        let length = u32::from_le_bytes(initial_buffer);
        if !(4..=MAX_REQUEST_LENGTH).contains(&length) {
            return Err(ServerError::CommandLengthError(format!(
                "request length: {length} from: {address} is out of range"
            )));
        }

        trace!("Received a TCP request, length: {}", length);
        let mut command_buffer = vec![0u8; length as usize];
        sender.read(&mut command_buffer).await?;
        let command = match ServerCommand::from_bytes(Bytes::from(command_buffer)) {
            Ok(command) => command,
            Err(error) => {
                debug!("Received an invalid TCP command from: {address}, error: {error}");
                sender.send_error_response(error).await?;
                continue;
            }
        };
        trace!(
            "Received a TCP command: {}, payload size: {}",
            command,
            length
        );
        command::handle(command, sender, &system).await?;
        trace!("Sent a TCP response.");
    }
}

pub(crate) fn handle_error(error: ServerError) {
    match error {
        ServerError::IoError(error) | ServerError::SdkError(BrookError::IoError(error)) => {
            match error.kind() {
                ErrorKind::UnexpectedEof => {
                    info!("Connection has been closed.");
                }
                ErrorKind::ConnectionAborted => {
                    info!("Connection has been aborted.");
                }
                ErrorKind::ConnectionRefused => {
                    info!("Connection has been refused.");
                }
                ErrorKind::ConnectionReset => {
                    info!("Connection has been reset.");
                }
                _ => {
                    error!("Connection has failed: {}", error);
                }
            }
        }
        ServerError::SdkError(BrookError::ConnectionClosed) => {
            info!("Connection has been closed.");
        }
        _ => {
            error!("Connection has failed: {}", error);
        }
    }
}
