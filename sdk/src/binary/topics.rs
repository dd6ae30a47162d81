use crate::binary::binary_client::BinaryClient;
use crate::binary::send_command;
use crate::bytes_serializable::BytesSerializable;
use crate::client::TopicClient;
use crate::error::BrookError;
use crate::models::topic::{Topic, TopicDetails};
use crate::topics::create_topic::CreateTopic;
use crate::topics::delete_topic::DeleteTopic;
use crate::topics::get_topic::GetTopic;
use crate::topics::get_topics::GetTopics;
use async_trait::async_trait;

#[async_trait]
impl<B: BinaryClient> TopicClient for B {
    async fn get_topic(&self, name: &str) -> Result<Option<TopicDetails>, BrookError> {
        let response = send_command(
            self,
            &GetTopic {
                name: name.to_string(),
            },
        )
        .await?;
        if response.is_empty() {
            return Ok(None);
        }

        TopicDetails::from_bytes(response).map(Some)
    }

    async fn get_topics(&self) -> Result<Vec<Topic>, BrookError> {
        let response = send_command(self, &GetTopics {}).await?;
        Topic::list_from_bytes(&response)
    }

    async fn create_topic(&self, name: &str, partitions_count: u32) -> Result<(), BrookError> {
        send_command(
            self,
            &CreateTopic {
                name: name.to_string(),
                partitions_count,
            },
        )
        .await?;
        Ok(())
    }

    async fn delete_topic(&self, name: &str) -> Result<(), BrookError> {
        send_command(
            self,
            &DeleteTopic {
                name: name.to_string(),
            },
        )
        .await?;
        Ok(())
    }
}
