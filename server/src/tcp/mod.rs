use crate::configs::server::ServerConfig;
use crate::server_error::ServerError;

pub mod connection_handler;
pub mod sender;
pub mod tcp_listener;
pub mod tcp_sender;

pub(crate) async fn persist_tcp_address(
    config: &ServerConfig,
    local_addr: String,
) -> Result<(), ServerError> {
    let mut current_config = config.clone();
    current_config.tcp.address = local_addr;
    let runtime_path = config.system.get_runtime_path();
    let current_config_path = format!("{}/current_config.toml", runtime_path);
    let current_config_content = toml::to_string(&current_config)
        .map_err(|error| ServerError::CannotPersistRuntimeConfig(error.to_string()))?;
    tokio::fs::write(current_config_path, current_config_content).await?;
    Ok(())
}
