use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::bytes_serializable::BytesSerializable;
use brook::error::BrookError;
use brook::messages::send_messages::SendMessages;
use tracing::trace;

// Appended in memory before responding, so `leader` and `all` acknowledgments are the same.
pub async fn handle(
    command: SendMessages,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    let appended = system.write().await.append_messages(command)?;
    sender.send_ok_response(&appended.to_bytes()).await?;
    Ok(())
}
