use crate::configs::server::ServerConfig;
use crate::server_error::ServerError;
use crate::streaming::systems::system::SharedSystem;
use crate::tcp::connection_handler::{handle_connection, handle_error};
use crate::tcp::persist_tcp_address;
use crate::tcp::tcp_sender::TcpSender;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

/// Binds the listener and spawns the accept loop, returns the bound address.
pub async fn start(
    server_name: &str,
    config: &ServerConfig,
    system: SharedSystem,
    shutdown: watch::Receiver<bool>,
) -> Result<SocketAddr, ServerError> {
    let listener = TcpListener::bind(&config.tcp.address)
        .await
        .map_err(|error| {
            error!("Unable to start {server_name} on: {}, {error}", config.tcp.address);
            ServerError::CannotBindAddress(config.tcp.address.clone())
        })?;
    let local_addr = listener.local_addr()?;
    info!("{server_name} server has started on: {:?}", local_addr);
    // Binding to port 0 picks a random port, the clients read the real one from the runtime config.
    persist_tcp_address(config, local_addr.to_string()).await?;

    let nodelay = config.tcp.nodelay;
    let server_name = server_name.to_string();
    tokio::spawn(async move {
        let mut accept_shutdown = shutdown.clone();
        loop {
            let accepted = tokio::select! {
                accepted = listener.accept() => accepted,
                _ = accept_shutdown.changed() => {
                    info!("{server_name} server on: {local_addr} has stopped.");
                    return;
                }
            };
            match accepted {
                Ok((stream, address)) => {
                    info!("Accepted new TCP connection: {}", address);
                    if let Err(error) = stream.set_nodelay(nodelay) {
                        error!("Unable to set TCP nodelay for: {address}, error: {error}");
                    }
                    let system = system.clone();
                    let shutdown = shutdown.clone();
                    let mut sender = TcpSender { stream };
                    tokio::spawn(async move {
                        if let Err(error) =
                            handle_connection(&address, &mut sender, system, shutdown).await
                        {
                            handle_error(error);
                        }
                        info!("TCP connection: {address} has been closed.");
                    });
                }
                Err(error) => error!("Unable to accept TCP socket, error: {}", error),
            }
        }
    });
    Ok(local_addr)
}
