use crate::binary::binary_client::BinaryClient;
use crate::command::Command;
use crate::error::BrookError;
use bytes::Bytes;

pub mod binary_client;
pub mod consumer_offsets;
pub mod messages;
pub mod system;
pub mod topics;

async fn send_command<B, C>(client: &B, command: &C) -> Result<Bytes, BrookError>
where
    B: BinaryClient + ?Sized,
    C: Command,
{
    command.validate()?;
    client
        .send_with_response(command.code(), command.to_bytes())
        .await
}
