use crate::binary::handlers::consumer_offsets::*;
use crate::binary::handlers::messages::*;
use crate::binary::handlers::system::*;
use crate::binary::handlers::topics::*;
use crate::binary::sender::Sender;
use crate::streaming::systems::system::SharedSystem;
use brook::bytes_serializable::BytesSerializable;
use brook::command::*;
use brook::consumer_offsets::get_consumer_offset::GetConsumerOffset;
use brook::consumer_offsets::store_consumer_offset::StoreConsumerOffset;
use brook::error::BrookError;
use brook::messages::poll_messages::PollMessages;
use brook::messages::send_messages::SendMessages;
use brook::system::ping::Ping;
use brook::topics::create_topic::CreateTopic;
use brook::topics::delete_topic::DeleteTopic;
use brook::topics::get_topic::GetTopic;
use brook::topics::get_topics::GetTopics;
use bytes::Bytes;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace};

/*
  REQUEST:  |   LENGTH  |   CODE    |  PAYLOAD  |
            |  4 bytes  |  4 bytes  |  n bytes  |

  RESPONSE: |   STATUS  |   LENGTH  |  PAYLOAD  |
            |  4 bytes  |  4 bytes  |  n bytes  |

  The length of a request covers the code and the payload, an error response carries
  the details of the error as the payload: | DETAILS LENGTH (4 bytes) | DETAILS |
*/

#[derive(Debug, PartialEq)]
pub enum ServerCommand {
    Ping(Ping),
    PollMessages(PollMessages),
    SendMessages(SendMessages),
    GetConsumerOffset(GetConsumerOffset),
    StoreConsumerOffset(StoreConsumerOffset),
    GetTopic(GetTopic),
    GetTopics(GetTopics),
    CreateTopic(CreateTopic),
    DeleteTopic(DeleteTopic),
}

impl ServerCommand {
    pub fn from_code_and_payload(code: u32, payload: Bytes) -> Result<Self, BrookError> {
        match code {
            PING_CODE => Ok(ServerCommand::Ping(Ping::from_bytes(payload)?)),
            POLL_MESSAGES_CODE => Ok(ServerCommand::PollMessages(PollMessages::from_bytes(
                payload,
            )?)),
            SEND_MESSAGES_CODE => Ok(ServerCommand::SendMessages(SendMessages::from_bytes(
                payload,
            )?)),
            GET_CONSUMER_OFFSET_CODE => Ok(ServerCommand::GetConsumerOffset(
                GetConsumerOffset::from_bytes(payload)?,
            )),
            STORE_CONSUMER_OFFSET_CODE => Ok(ServerCommand::StoreConsumerOffset(
                StoreConsumerOffset::from_bytes(payload)?,
            )),
            GET_TOPIC_CODE => Ok(ServerCommand::GetTopic(GetTopic::from_bytes(payload)?)),
            GET_TOPICS_CODE => Ok(ServerCommand::GetTopics(GetTopics::from_bytes(payload)?)),
            CREATE_TOPIC_CODE => Ok(ServerCommand::CreateTopic(CreateTopic::from_bytes(
                payload,
            )?)),
            DELETE_TOPIC_CODE => Ok(ServerCommand::DeleteTopic(DeleteTopic::from_bytes(
                payload,
            )?)),
            _ => Err(BrookError::InvalidCommand),
        }
    }

    /// Parses the command from the request without the length prefix.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, BrookError> {
        if bytes.len() < 4 {
            return Err(BrookError::InvalidCommand);
        }

        let code = u32::from_le_bytes(bytes[..4].try_into()?);
        Self::from_code_and_payload(code, bytes.slice(4..))
    }

    pub fn code(&self) -> u32 {
        match self {
            ServerCommand::Ping(command) => command.code(),
            ServerCommand::PollMessages(command) => command.code(),
            ServerCommand::SendMessages(command) => command.code(),
            ServerCommand::GetConsumerOffset(command) => command.code(),
            ServerCommand::StoreConsumerOffset(command) => command.code(),
            ServerCommand::GetTopic(command) => command.code(),
            ServerCommand::GetTopics(command) => command.code(),
            ServerCommand::CreateTopic(command) => command.code(),
            ServerCommand::DeleteTopic(command) => command.code(),
        }
    }
}

impl Display for ServerCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = get_name_from_code(self.code()).unwrap_or("unknown");
        match self {
            ServerCommand::Ping(_) | ServerCommand::GetTopics(_) => write!(f, "{name}"),
            ServerCommand::PollMessages(command) => write!(f, "{name}|{command}"),
            ServerCommand::SendMessages(command) => write!(f, "{name}|{command}"),
            ServerCommand::GetConsumerOffset(command) => write!(f, "{name}|{command}"),
            ServerCommand::StoreConsumerOffset(command) => write!(f, "{name}|{command}"),
            ServerCommand::GetTopic(command) => write!(f, "{name}|{command}"),
            ServerCommand::CreateTopic(command) => write!(f, "{name}|{command}"),
            ServerCommand::DeleteTopic(command) => write!(f, "{name}|{command}"),
        }
    }
}

/// Handles the command and sends the response, a failed command is answered with an error
/// response, so only a failure of the sender itself is returned.
pub async fn handle(
    command: ServerCommand,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    let code = command.code();
    match try_handle(command, sender, system).await {
        Ok(()) => {
            trace!("Command with code: {code} was handled successfully.");
            Ok(())
        }
        Err(error) if error.is_disconnect() => Err(error),
        Err(error) => {
            debug!("Command with code: {code} was not handled successfully, error: '{error}'.");
            sender.send_error_response(error).await
        }
    }
}

async fn try_handle(
    command: ServerCommand,
    sender: &mut dyn Sender,
    system: &SharedSystem,
) -> Result<(), BrookError> {
    trace!("Handling command '{}'...", command);
    match command {
        ServerCommand::Ping(command) => ping_handler::handle(command, sender).await,
        ServerCommand::PollMessages(command) => {
            poll_messages_handler::handle(command, sender, system).await
        }
        ServerCommand::SendMessages(command) => {
            send_messages_handler::handle(command, sender, system).await
        }
        ServerCommand::GetConsumerOffset(command) => {
            get_consumer_offset_handler::handle(command, sender, system).await
        }
        ServerCommand::StoreConsumerOffset(command) => {
            store_consumer_offset_handler::handle(command, sender, system).await
        }
        ServerCommand::GetTopic(command) => {
            get_topic_handler::handle(command, sender, system).await
        }
        ServerCommand::GetTopics(command) => {
            get_topics_handler::handle(command, sender, system).await
        }
        ServerCommand::CreateTopic(command) => {
            create_topic_handler::handle(command, sender, system).await
        }
        ServerCommand::DeleteTopic(command) => {
            delete_topic_handler::handle(command, sender, system).await
        }
    }
}
