use crate::binary::mapper;
use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::error::BrookError;
use brook::topics::get_topics::GetTopics;
use tracing::trace;

pub async fn handle(
    command: GetTopics,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("{command}");
    let topics = {
        let system = system.read().await;
        mapper::map_topics(&system.get_topics())
    };
    sender.send_ok_response(&topics).await?;
    Ok(())
}
