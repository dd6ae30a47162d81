use crate::binary::sender::Sender;
use crate::server_error::ServerError;
use crate::tcp::sender;
use async_trait::async_trait;
use brook::error::BrookError;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

#[derive(Debug)]
pub struct TcpSender {
    pub(crate) stream: TcpStream,
}

#[async_trait]
impl Sender for TcpSender {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<usize, BrookError> {
        sender::read(&mut self.stream, buffer).await
    }

    async fn send_empty_ok_response(&mut self) -> Result<(), BrookError> {
        sender::send_empty_ok_response(&mut self.stream).await
    }

    async fn send_ok_response(&mut self, payload: &[u8]) -> Result<(), BrookError> {
        sender::send_ok_response(&mut self.stream, payload).await
    }

    async fn send_error_response(&mut self, error: BrookError) -> Result<(), BrookError> {
        sender::send_error_response(&mut self.stream, error).await
    }

    async fn shutdown(&mut self) -> Result<(), ServerError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
