use crate::configs::server::ServerConfig;
use crate::server_error::ServerError;
use crate::streaming::systems::system::{SharedSystem, System};
use crate::tcp::tcp_listener;
use brook::validatable::Validatable;
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::info;

const SERVER_NAME: &str = "Brook TCP";

/// The single node broker: the in-memory system exposed over the binary TCP protocol.
#[derive(Debug)]
pub struct BrookServer {
    config: ServerConfig,
    system: SharedSystem,
    shutdown: watch::Sender<bool>,
    address: Option<SocketAddr>,
}

impl BrookServer {
    pub fn new(config: ServerConfig) -> BrookServer {
        let system = SharedSystem::new(System::new(config.system.clone()));
        let (shutdown, _) = watch::channel(false);
        BrookServer {
            config,
            system,
            shutdown,
            address: None,
        }
    }

    /// Validates the configuration, prepares the data directory and binds the listener.
    /// Returns the address the broker accepts the connections on.
    pub async fn start(&mut self) -> Result<SocketAddr, ServerError> {
        if self.address.is_some() {
            return Err(ServerError::AlreadyRunning);
        }

        self.config.validate()?;
        self.system.write().await.init().await?;
        let address = tcp_listener::start(
            SERVER_NAME,
            &self.config,
            self.system.clone(),
            self.shutdown.subscribe(),
        )
        .await?;
        self.address = Some(address);
        Ok(address)
    }

    pub fn address(&self) -> Option<SocketAddr> {
        self.address
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn system(&self) -> SharedSystem {
        self.system.clone()
    }

    /// Stops accepting connections, closes the open ones and drops the data.
    /// Calling it on a server which is not running does nothing.
    pub async fn shutdown(&mut self) {
        if self.address.take().is_none() {
            return;
        }

        self.shutdown.send_replace(true);
        self.system.write().await.shutdown();
        info!("{SERVER_NAME} server has been shut down.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn server_should_bind_random_port_and_persist_it() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().display().to_string();
        let config = ServerConfig::ephemeral("127.0.0.1:0", &path);
        let runtime_path = config.system.get_runtime_path();
        let mut server = BrookServer::new(config);

        let address = server.start().await.unwrap();

        assert_ne!(address.port(), 0);
        let persisted =
            std::fs::read_to_string(format!("{runtime_path}/current_config.toml")).unwrap();
        let persisted: ServerConfig = toml::from_str(&persisted).unwrap();
        assert_eq!(persisted.tcp.address, address.to_string());
        server.shutdown().await;
        assert!(server.address().is_none());
    }

    #[tokio::test]
    async fn starting_twice_should_fail() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().display().to_string();
        let config = ServerConfig::ephemeral("127.0.0.1:0", &path);
        let mut server = BrookServer::new(config);
        server.start().await.unwrap();

        assert!(matches!(server.start().await, Err(ServerError::AlreadyRunning)));
        server.shutdown().await;
    }
}
