use crate::binary::binary_client::BinaryClient;
use crate::binary::send_command;
use crate::client::SystemClient;
use crate::error::BrookError;
use crate::system::ping::Ping;
use async_trait::async_trait;

#[async_trait]
impl<B: BinaryClient> SystemClient for B {
    async fn ping(&self) -> Result<(), BrookError> {
        send_command(self, &Ping {}).await?;
        Ok(())
    }
}
