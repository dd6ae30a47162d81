use crate::configs::server::ServerConfig;
use crate::configs::system::{LoggingConfig, SystemConfig};
use crate::configs::tcp::TcpConfig;
use std::fmt::{Display, Formatter};

impl Display for ServerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ system: {}, tcp: {} }}", self.system, self.tcp)
    }
}

impl Display for TcpConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ address: {}, nodelay: {} }}",
            self.address, self.nodelay
        )
    }
}

impl Display for SystemConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ path: {}, default_partitions: {}, max_poll_records: {}, max_poll_wait: {}, runtime_path: {}, logging: {} }}",
            self.path,
            self.default_partitions,
            self.max_poll_records,
            self.max_poll_wait,
            self.runtime.path,
            self.logging
        )
    }
}

impl Display for LoggingConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ level: {} }}", self.level)
    }
}
