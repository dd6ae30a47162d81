use crate::binary::mapper;
use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::error::BrookError;
use brook::topics::get_topic::GetTopic;
use tracing::trace;

pub async fn handle(
    command: GetTopic,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    let topic = {
        let system = system.read().await;
        system.find_topic(&command.name).map(mapper::map_topic)
    };
    match topic {
        Some(topic) => sender.send_ok_response(&topic).await?,
        None => sender.send_empty_ok_response().await?,
    }
    Ok(())
}
