use crate::configs::server::ServerConfig;
use crate::configs::system::SystemConfig;
use crate::configs::tcp::TcpConfig;
use crate::server_error::ServerError;
use brook::topics::MAX_PARTITIONS_COUNT;
use brook::validatable::Validatable;
use std::net::SocketAddr;
use tracing::error;

impl Validatable<ServerError> for ServerConfig {
    fn validate(&self) -> Result<(), ServerError> {
        self.system.validate()?;
        self.tcp.validate()?;

        Ok(())
    }
}

impl Validatable<ServerError> for TcpConfig {
    fn validate(&self) -> Result<(), ServerError> {
        if self.address.parse::<SocketAddr>().is_err() {
            error!("TCP configuration -> invalid address: {}.", self.address);
            return Err(ServerError::InvalidConfiguration(format!(
                "invalid TCP address: {}",
                self.address
            )));
        }

        Ok(())
    }
}

impl Validatable<ServerError> for SystemConfig {
    fn validate(&self) -> Result<(), ServerError> {
        if self.path.trim().is_empty() {
            error!("System configuration -> path cannot be empty.");
            return Err(ServerError::InvalidConfiguration(
                "system path cannot be empty".to_string(),
            ));
        }

        if !(1..=MAX_PARTITIONS_COUNT).contains(&self.default_partitions) {
            error!(
                "System configuration -> default partitions must be in range 1..={}.",
                MAX_PARTITIONS_COUNT
            );
            return Err(ServerError::InvalidConfiguration(format!(
                "invalid default partitions: {}",
                self.default_partitions
            )));
        }

        if self.max_poll_records == 0 {
            error!("System configuration -> max poll records must be greater than 0.");
            return Err(ServerError::InvalidConfiguration(
                "max poll records must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
