use crate::binary::sender::Sender;
use brook::error::BrookError;
use brook::system::ping::Ping;
use tracing::trace;

pub async fn handle(command: Ping, sender: &mut dyn Sender) -> Result<(), BrookError> {
    trace!("{command}");
    sender.send_empty_ok_response().await?;
    Ok(())
}
