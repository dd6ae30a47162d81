use crate::server_error::ServerError;
use async_trait::async_trait;
use brook::error::BrookError;

#[async_trait]
pub trait Sender: Sync + Send {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<usize, BrookError>;
    async fn send_empty_ok_response(&mut self) -> Result<(), BrookError>;
    async fn send_ok_response(&mut self, payload: &[u8]) -> Result<(), BrookError>;
    async fn send_error_response(&mut self, error: BrookError) -> Result<(), BrookError>;
    async fn shutdown(&mut self) -> Result<(), ServerError>;
}
