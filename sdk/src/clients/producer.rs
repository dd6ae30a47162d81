use crate::client::Client;
use crate::config::ProducerConfig;
use crate::error::BrookError;
use crate::messages::send_messages::{Acknowledgment, Partitioning};
use crate::models::messages::AppendedRecords;
use crate::models::record::{Record, RecordMetadata};
use crate::tcp::client::TcpClient;
use crate::tcp::config::{TcpClientConfigBuilder, TcpClientReconnectionConfig};
use crate::utils::duration::BrookDuration;
use bytes::Bytes;
use flume::{Receiver, Sender};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, trace, warn};

type BatchResult = Result<Vec<RecordMetadata>, BrookError>;

enum SenderCommand {
    Send {
        topic: String,
        partitioning: Partitioning,
        records: Vec<Record>,
        reply: oneshot::Sender<BatchResult>,
    },
    Flush(oneshot::Sender<()>),
}

/// The producer publishes records to the topics of a single broker.
///
/// All the sends are handed to a single background sender in FIFO order,
/// so records are appended in the order the methods were called.
/// A batch is appended to a single partition and acknowledged as a whole.
#[derive(Debug)]
pub struct BrookProducer {
    client: Arc<dyn Client>,
    config: ProducerConfig,
    sender: Mutex<Option<Sender<SenderCommand>>>,
    background_sender: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

/// Resolves once the broker acknowledged the record, or the delivery failed.
#[derive(Debug)]
pub struct DeliveryFuture {
    receiver: oneshot::Receiver<BatchResult>,
}

/// Resolves once the broker acknowledged the whole batch, or the delivery failed.
#[derive(Debug)]
pub struct BatchDeliveryFuture {
    receiver: oneshot::Receiver<BatchResult>,
}

impl Future for DeliveryFuture {
    type Output = Result<RecordMetadata, BrookError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(Ok(metadata))) => {
                Poll::Ready(metadata.into_iter().next().ok_or_else(|| {
                    BrookError::DeliveryFailed("empty acknowledgment".to_string())
                }))
            }
            Poll::Ready(Ok(Err(error))) => Poll::Ready(Err(error)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(BrookError::ProducerClosed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Future for BatchDeliveryFuture {
    type Output = BatchResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(BrookError::ProducerClosed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl BrookProducer {
    /// Creates the producer with its own TCP client. Call `init` before sending.
    pub fn new(config: ProducerConfig) -> Result<Self, BrookError> {
        let client = TcpClient::create(Arc::new(
            TcpClientConfigBuilder::new()
                .with_server_address(config.bootstrap_servers().to_string())
                .with_reconnection(TcpClientReconnectionConfig::disabled())
                .build(),
        ))?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    /// Creates the producer on top of the provided client.
    pub fn with_client(client: Arc<dyn Client>, config: ProducerConfig) -> Self {
        Self {
            client,
            config,
            sender: Mutex::new(None),
            background_sender: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Connects the client and starts the background sender. Calling it again is a no-op.
    pub async fn init(&self) -> Result<(), BrookError> {
        if self.is_closed() {
            return Err(BrookError::ProducerClosed);
        }

        let mut background_sender = self.background_sender.lock().await;
        if background_sender.is_some() {
            return Ok(());
        }

        self.client.connect().await?;
        let (sender, receiver) = flume::unbounded();
        let client = self.client.clone();
        let acknowledgment = self.config.acknowledgment();
        let retries = self.config.retries();
        let retry_interval = self.config.retry_interval();
        background_sender.replace(tokio::spawn(async move {
            run_background_sender(client, receiver, acknowledgment, retries, retry_interval).await
        }));
        self.sender.lock().await.replace(sender);
        info!(
            "Producer has been initialized for: {}",
            self.config.bootstrap_servers()
        );
        Ok(())
    }

    /// Returns the number of partitions of the topic, `TopicNotFound` if it does not exist.
    pub async fn get_partitions_count(&self, topic: &str) -> Result<u32, BrookError> {
        match self.client.get_topic(topic).await? {
            Some(topic) => Ok(topic.partitions_count),
            None => Err(BrookError::TopicNotFound(topic.to_string())),
        }
    }

    /// Enqueues a single record. A record with a key goes to the partition calculated from the key,
    /// otherwise the broker picks the partition.
    pub async fn send(
        &self,
        topic: &str,
        key: Option<Bytes>,
        value: impl Into<Bytes>,
    ) -> Result<DeliveryFuture, BrookError> {
        let record = match key {
            Some(key) => Record::with_key(key, value),
            None => Record::new(value),
        };
        let partitioning = match &record.key {
            Some(key) => Partitioning::key(key.clone())?,
            None => Partitioning::balanced(),
        };
        let receiver = self.enqueue(topic, partitioning, vec![record]).await?;
        Ok(DeliveryFuture { receiver })
    }

    /// Enqueues the batch of records, which is appended to a single partition.
    pub async fn send_batch(
        &self,
        topic: &str,
        partitioning: Partitioning,
        records: Vec<Record>,
    ) -> Result<BatchDeliveryFuture, BrookError> {
        let receiver = self.enqueue(topic, partitioning, records).await?;
        Ok(BatchDeliveryFuture { receiver })
    }

    /// Publishes the values as key-less records, in order, awaiting the acknowledgment of each
    /// batch of `batch_size` values before sending the next one.
    ///
    /// The first failure aborts the remaining values.
    pub async fn publish<I, V>(
        &self,
        topic: &str,
        values: I,
    ) -> Result<Vec<RecordMetadata>, BrookError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Bytes>,
    {
        let batch_size = self.config.batch_size() as usize;
        let mut metadata = Vec::new();
        let mut batch = Vec::with_capacity(batch_size);
        for value in values {
            batch.push(Record::new(value));
            if batch.len() == batch_size {
                let records = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
                metadata.extend(self.publish_batch(topic, records).await?);
            }
        }

        if !batch.is_empty() {
            metadata.extend(self.publish_batch(topic, batch).await?);
        }

        debug!("Published {} records to topic: {topic}", metadata.len());
        Ok(metadata)
    }

    async fn publish_batch(
        &self,
        topic: &str,
        records: Vec<Record>,
    ) -> Result<Vec<RecordMetadata>, BrookError> {
        let count = records.len();
        let result = self
            .send_batch(topic, Partitioning::balanced(), records)
            .await?
            .await;
        if let Err(error) = &result {
            error!("Failed to publish {count} records to topic: {topic}, {error}");
        }
        result
    }

    /// Resolves once every previously enqueued send has been acknowledged or failed.
    pub async fn flush(&self) -> Result<(), BrookError> {
        let sender = self.get_sender().await?;
        let (reply, receiver) = oneshot::channel();
        sender
            .send_async(SenderCommand::Flush(reply))
            .await
            .map_err(|_| BrookError::ProducerClosed)?;
        receiver.await.map_err(|_| BrookError::ProducerClosed)
    }

    /// Flushes the pending sends, stops the background sender and disconnects.
    /// Closing a closed producer is a no-op.
    pub async fn close(&self) -> Result<(), BrookError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Some(sender) = self.sender.lock().await.take() {
            let (reply, receiver) = oneshot::channel();
            if sender.send_async(SenderCommand::Flush(reply)).await.is_ok() {
                let _ = receiver.await;
            }
        }

        if let Some(background_sender) = self.background_sender.lock().await.take() {
            if let Err(error) = background_sender.await {
                warn!("Producer background sender has failed: {error}");
            }
        }

        self.client.disconnect().await?;
        info!("Producer has been closed.");
        Ok(())
    }

    async fn enqueue(
        &self,
        topic: &str,
        partitioning: Partitioning,
        records: Vec<Record>,
    ) -> Result<oneshot::Receiver<BatchResult>, BrookError> {
        let records = records
            .into_iter()
            .map(|record| self.encode(record))
            .collect::<Result<Vec<_>, _>>()?;
        let sender = self.get_sender().await?;
        let (reply, receiver) = oneshot::channel();
        trace!(
            "Enqueuing {} records for topic: {topic} with partitioning: {partitioning}",
            records.len()
        );
        sender
            .send_async(SenderCommand::Send {
                topic: topic.to_string(),
                partitioning,
                records,
                reply,
            })
            .await
            .map_err(|_| BrookError::ProducerClosed)?;
        Ok(receiver)
    }

    fn encode(&self, mut record: Record) -> Result<Record, BrookError> {
        if let Some(key) = record.key.take() {
            record.key = Some(self.config.key_codec().encode(key)?);
        }
        record.value = self.config.value_codec().encode(record.value)?;
        Ok(record)
    }

    async fn get_sender(&self) -> Result<Sender<SenderCommand>, BrookError> {
        if self.is_closed() {
            return Err(BrookError::ProducerClosed);
        }

        self.sender
            .lock()
            .await
            .clone()
            .ok_or(BrookError::NotConnected)
    }
}

async fn run_background_sender(
    client: Arc<dyn Client>,
    receiver: Receiver<SenderCommand>,
    acknowledgment: Acknowledgment,
    retries: u32,
    retry_interval: BrookDuration,
) {
    while let Ok(command) = receiver.recv_async().await {
        match command {
            SenderCommand::Flush(reply) => {
                let _ = reply.send(());
            }
            SenderCommand::Send {
                topic,
                partitioning,
                records,
                reply,
            } => {
                let timestamps = records
                    .iter()
                    .map(|record| record.timestamp)
                    .collect::<Vec<_>>();
                let result = send_with_retries(
                    client.as_ref(),
                    &topic,
                    &partitioning,
                    acknowledgment,
                    records,
                    retries,
                    retry_interval,
                )
                .await
                .map(|appended| {
                    timestamps
                        .into_iter()
                        .enumerate()
                        .map(|(index, timestamp)| RecordMetadata {
                            topic: topic.clone(),
                            partition_id: appended.partition_id,
                            offset: appended.base_offset + index as u64,
                            timestamp,
                        })
                        .collect()
                });
                if reply.send(result).is_err() {
                    trace!("Delivery result for topic: {topic} has no receiver.");
                }
            }
        }
    }
    debug!("Producer background sender has stopped.");
}

async fn send_with_retries(
    client: &dyn Client,
    topic: &str,
    partitioning: &Partitioning,
    acknowledgment: Acknowledgment,
    records: Vec<Record>,
    retries: u32,
    retry_interval: BrookDuration,
) -> Result<AppendedRecords, BrookError> {
    let mut attempt = 0;
    loop {
        let result = client
            .send_messages(topic, partitioning, acknowledgment, records.clone())
            .await;
        match result {
            Err(error) if error.is_disconnect() && attempt < retries => {
                attempt += 1;
                warn!(
                    "Failed to send records to topic: {topic}, {error}, retrying ({attempt}/{retries}) in: {retry_interval}"
                );
                sleep(retry_interval.get_duration()).await;
                if let Err(error) = client.connect().await {
                    warn!("Failed to reconnect the producer: {error}");
                }
            }
            result => return result,
        }
    }
}
