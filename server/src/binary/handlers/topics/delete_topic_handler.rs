use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::error::BrookError;
use brook::topics::delete_topic::DeleteTopic;
use tracing::trace;

pub async fn handle(
    command: DeleteTopic,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    system.write().await.delete_topic(&command.name)?;
    sender.send_empty_ok_response().await?;
    Ok(())
}
