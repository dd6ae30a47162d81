use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::error::BrookError;
use brook::topics::create_topic::CreateTopic;
use tracing::trace;

pub async fn handle(
    command: CreateTopic,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    {
        let mut system = system.write().await;
        system.create_topic(&command.name, command.partitions_count)?;
    }
    sender.send_empty_ok_response().await?;
    Ok(())
}
