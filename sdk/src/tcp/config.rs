use crate::utils::duration::BrookDuration;

/// Configuration for the TCP client.
#[derive(Debug, Clone)]
pub struct TcpClientConfig {
    /// The address of the Brook broker, `host:port`.
    pub server_address: String,
    /// Whether to disable Nagle's algorithm on the socket.
    pub nodelay: bool,
    /// The reconnection settings.
    pub reconnection: TcpClientReconnectionConfig,
}

/// Controls how the client retries establishing a connection, and whether a request
/// which failed on a broken connection is sent again once after reconnecting.
#[derive(Debug, Clone)]
pub struct TcpClientReconnectionConfig {
    pub enabled: bool,
    /// `None` means unlimited retries.
    pub max_retries: Option<u32>,
    pub interval: BrookDuration,
}

impl Default for TcpClientConfig {
    fn default() -> TcpClientConfig {
        TcpClientConfig {
            server_address: "127.0.0.1:8090".to_string(),
            nodelay: true,
            reconnection: TcpClientReconnectionConfig::default(),
        }
    }
}

impl Default for TcpClientReconnectionConfig {
    fn default() -> TcpClientReconnectionConfig {
        TcpClientReconnectionConfig {
            enabled: true,
            max_retries: Some(3),
            interval: BrookDuration::from_millis(500),
        }
    }
}

impl TcpClientReconnectionConfig {
    pub fn disabled() -> Self {
        TcpClientReconnectionConfig {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Builder for the TCP client configuration.
/// Allows configuring the TCP client with custom settings or using defaults:
/// - `server_address`: Default is "127.0.0.1:8090"
/// - `nodelay`: Default is true.
/// - `reconnection`: Default is enabled, 3 retries every 500 ms.
#[derive(Debug, Default)]
pub struct TcpClientConfigBuilder {
    config: TcpClientConfig,
}

impl TcpClientConfigBuilder {
    pub fn new() -> Self {
        TcpClientConfigBuilder::default()
    }

    /// Sets the server address for the TCP client.
    pub fn with_server_address(mut self, server_address: String) -> Self {
        self.config.server_address = server_address;
        self
    }

    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Sets the number of retries when connecting to the broker.
    pub fn with_reconnection_max_retries(mut self, max_retries: Option<u32>) -> Self {
        self.config.reconnection.max_retries = max_retries;
        self
    }

    /// Sets the interval between retries when connecting to the broker.
    pub fn with_reconnection_interval(mut self, interval: BrookDuration) -> Self {
        self.config.reconnection.interval = interval;
        self
    }

    pub fn with_reconnection(mut self, reconnection: TcpClientReconnectionConfig) -> Self {
        self.config.reconnection = reconnection;
        self
    }

    /// Builds the TCP client configuration.
    pub fn build(self) -> TcpClientConfig {
        self.config
    }
}
