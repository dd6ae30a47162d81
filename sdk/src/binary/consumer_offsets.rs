use crate::binary::binary_client::BinaryClient;
use crate::binary::send_command;
use crate::bytes_serializable::read_u64;
use crate::client::ConsumerOffsetClient;
use crate::consumer_offsets::get_consumer_offset::GetConsumerOffset;
use crate::consumer_offsets::store_consumer_offset::StoreConsumerOffset;
use crate::error::BrookError;
use async_trait::async_trait;

#[async_trait]
impl<B: BinaryClient> ConsumerOffsetClient for B {
    async fn get_consumer_offset(
        &self,
        group: &str,
        topic: &str,
        partition_id: u32,
    ) -> Result<Option<u64>, BrookError> {
        let response = send_command(
            self,
            &GetConsumerOffset {
                group: group.to_string(),
                topic: topic.to_string(),
                partition_id,
            },
        )
        .await?;
        if response.is_empty() {
            return Ok(None);
        }

        read_u64(&response, 0).map(Some)
    }

    async fn store_consumer_offset(
        &self,
        group: &str,
        topic: &str,
        partition_id: u32,
        offset: u64,
    ) -> Result<(), BrookError> {
        send_command(
            self,
            &StoreConsumerOffset {
                group: group.to_string(),
                topic: topic.to_string(),
                partition_id,
                offset,
            },
        )
        .await?;
        Ok(())
    }
}
