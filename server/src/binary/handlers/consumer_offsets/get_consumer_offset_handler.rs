use crate::binary::mapper;
use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::consumer_offsets::get_consumer_offset::GetConsumerOffset;
use brook::error::BrookError;
use tracing::trace;

pub async fn handle(
    command: GetConsumerOffset,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    let offset = system.read().await.get_consumer_offset(
        &command.group,
        &command.topic,
        command.partition_id,
    )?;
    match offset {
        Some(offset) => {
            sender
                .send_ok_response(&mapper::map_consumer_offset(offset))
                .await?
        }
        None => sender.send_empty_ok_response().await?,
    }
    Ok(())
}
