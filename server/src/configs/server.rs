use crate::configs::system::SystemConfig;
use crate::configs::tcp::TcpConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub system: Arc<SystemConfig>,
    pub tcp: TcpConfig,
}

impl ServerConfig {
    /// Returns the configuration with the TCP listener bound to the given address
    /// and the data kept under the given directory.
    pub fn ephemeral(address: &str, path: &str) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.tcp.address = address.to_string();
        let mut system = SystemConfig::clone(&config.system);
        system.path = path.to_string();
        config.system = Arc::new(system);
        config
    }
}
