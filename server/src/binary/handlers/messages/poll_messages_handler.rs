use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::bytes_serializable::BytesSerializable;
use brook::error::BrookError;
use brook::messages::poll_messages::PollMessages;
use tracing::trace;

pub async fn handle(
    command: PollMessages,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    let polled = system.poll_messages(&command).await?;
    sender.send_ok_response(&polled.to_bytes()).await?;
    Ok(())
}
