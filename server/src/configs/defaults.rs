use crate::configs::server::ServerConfig;
use crate::configs::system::{LoggingConfig, RuntimeConfig, SystemConfig};
use crate::configs::tcp::TcpConfig;
use brook::utils::duration::BrookDuration;
use std::sync::Arc;
use std::time::Duration;

static_toml::static_toml! {
    // static_toml crate always starts from CARGO_MANIFEST_DIR (in this case the server crate directory)
    static SERVER_CONFIG = include_toml!("../configs/server.toml");
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            system: Arc::new(SystemConfig::default()),
            tcp: TcpConfig::default(),
        }
    }
}

impl Default for TcpConfig {
    fn default() -> TcpConfig {
        TcpConfig {
            address: SERVER_CONFIG.tcp.address.to_string(),
            nodelay: SERVER_CONFIG.tcp.nodelay,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> SystemConfig {
        SystemConfig {
            path: SERVER_CONFIG.system.path.to_string(),
            default_partitions: SERVER_CONFIG.system.default_partitions as u32,
            max_poll_records: SERVER_CONFIG.system.max_poll_records as u32,
            max_poll_wait: SERVER_CONFIG
                .system
                .max_poll_wait
                .parse()
                .unwrap_or_else(|_| BrookDuration::new(Duration::from_secs(5))),
            runtime: RuntimeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> RuntimeConfig {
        RuntimeConfig {
            path: SERVER_CONFIG.system.runtime.path.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: SERVER_CONFIG.system.logging.level.to_string(),
        }
    }
}
