use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::consumer_offsets::store_consumer_offset::StoreConsumerOffset;
use brook::error::BrookError;
use tracing::trace;

pub async fn handle(
    command: StoreConsumerOffset,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    system.write().await.store_consumer_offset(
        &command.group,
        &command.topic,
        command.partition_id,
        command.offset,
    )?;
    sender.send_empty_ok_response().await?;
    Ok(())
}
