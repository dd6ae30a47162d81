use crate::harness_error::HarnessError;
use bon::Builder;
use brook::client::{Client, TopicClient};
use brook::tcp::client::TcpClient;
use brook::topics::MAX_PARTITIONS_COUNT;
use brook::utils::text;
use server::configs::server::ServerConfig;
use server::server::BrookServer;
use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

const BROKER_THREAD_NAME: &str = "brook-broker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerState {
    NotStarted,
    Running,
    Stopped,
}

#[derive(Builder, Debug, Clone)]
#[builder(on(String, into))]
pub struct BrokerOptions {
    /// Port 0 picks a random free port.
    #[builder(default = "127.0.0.1:0".to_string())]
    address: String,
    #[builder(default = 1)]
    default_partitions: u32,
    #[builder(default = Duration::from_secs(10))]
    startup_timeout: Duration,
    #[builder(default = Duration::from_secs(10))]
    shutdown_timeout: Duration,
}

impl Default for BrokerOptions {
    fn default() -> Self {
        BrokerOptions::builder().build()
    }
}

impl BrokerOptions {
    pub fn default_partitions(&self) -> u32 {
        self.default_partitions
    }

    pub fn startup_timeout(&self) -> Duration {
        self.startup_timeout
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

/// A single node broker running on its own thread and runtime, with the data kept in a
/// temporary directory. Dropping the fixture stops the broker.
#[derive(Debug)]
pub struct EphemeralBroker {
    options: BrokerOptions,
    state: BrokerState,
    address: Option<SocketAddr>,
    topics: Vec<String>,
    directory: Option<TempDir>,
    shutdown: Option<oneshot::Sender<()>>,
    stopped: Option<mpsc::Receiver<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Default for EphemeralBroker {
    fn default() -> Self {
        EphemeralBroker::new(BrokerOptions::default())
    }
}

impl EphemeralBroker {
    pub fn new(options: BrokerOptions) -> Self {
        EphemeralBroker {
            options,
            state: BrokerState::NotStarted,
            address: None,
            topics: Vec::new(),
            directory: None,
            shutdown: None,
            stopped: None,
            thread: None,
        }
    }

    pub fn state(&self) -> BrokerState {
        self.state
    }

    /// The names of the topics created through the fixture.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// The directory the broker keeps its data in, while it is running.
    pub fn data_path(&self) -> Option<&std::path::Path> {
        self.directory.as_ref().map(|directory| directory.path())
    }

    /// Starts the broker and waits until it accepts connections, returns its address.
    pub fn start(&mut self) -> Result<SocketAddr, HarnessError> {
        match self.state {
            BrokerState::NotStarted => {}
            BrokerState::Running => {
                return Err(HarnessError::StartupError(
                    "broker is already running".to_string(),
                ))
            }
            BrokerState::Stopped => {
                return Err(HarnessError::StartupError(
                    "broker has been stopped".to_string(),
                ))
            }
        }

        let directory = tempfile::Builder::new()
            .prefix("brook-broker-")
            .tempdir()
            .map_err(|error| {
                HarnessError::StartupError(format!("cannot create data directory: {error}"))
            })?;
        let mut config = ServerConfig::ephemeral(
            &self.options.address,
            &directory.path().join("data").display().to_string(),
        );
        let mut system = config.system.as_ref().clone();
        system.default_partitions = self.options.default_partitions;
        config.system = system.into();

        let (ready_sender, ready_receiver) = mpsc::channel();
        let (shutdown_sender, shutdown_receiver) = oneshot::channel();
        let (stopped_sender, stopped_receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(BROKER_THREAD_NAME.to_string())
            .spawn(move || {
                run_broker(config, ready_sender, shutdown_receiver);
                let _ = stopped_sender.send(());
            })
            .map_err(|error| {
                HarnessError::StartupError(format!("cannot spawn broker thread: {error}"))
            })?;

        let address = match ready_receiver.recv_timeout(self.options.startup_timeout) {
            Ok(Ok(address)) => address,
            Ok(Err(reason)) => {
                let _ = thread.join();
                return Err(HarnessError::StartupError(reason));
            }
            Err(_) => {
                let _ = shutdown_sender.send(());
                return Err(HarnessError::StartupError(format!(
                    "broker is not ready after: {:?}",
                    self.options.startup_timeout
                )));
            }
        };

        info!("Ephemeral broker is running on: {address}");
        self.address = Some(address);
        self.directory = Some(directory);
        self.shutdown = Some(shutdown_sender);
        self.stopped = Some(stopped_receiver);
        self.thread = Some(thread);
        self.state = BrokerState::Running;
        Ok(address)
    }

    /// The `host:port` the clients connect to.
    pub fn bootstrap_servers(&self) -> Result<String, HarnessError> {
        match (self.state, self.address) {
            (BrokerState::Running, Some(address)) => Ok(address.to_string()),
            _ => Err(HarnessError::StartupError(
                "broker is not running".to_string(),
            )),
        }
    }

    /// Creates the topic with the default partitions count of the broker.
    pub async fn create_topic(&mut self, name: &str) -> Result<(), HarnessError> {
        let partitions_count = self.options.default_partitions;
        self.create_topic_with_partitions(name, partitions_count)
            .await
    }

    /// Creating a topic which exists with the same partitions count succeeds,
    /// a different partitions count is rejected.
    pub async fn create_topic_with_partitions(
        &mut self,
        name: &str,
        partitions_count: u32,
    ) -> Result<(), HarnessError> {
        let creation_error = |reason: String| HarnessError::TopicCreationError {
            topic: name.to_string(),
            reason,
        };
        let bootstrap_servers = self
            .bootstrap_servers()
            .map_err(|error| creation_error(error.to_string()))?;
        text::validate_topic_name(name).map_err(|error| creation_error(error.to_string()))?;
        if !(1..=MAX_PARTITIONS_COUNT).contains(&partitions_count) {
            return Err(creation_error(format!(
                "invalid partitions count: {partitions_count}"
            )));
        }

        let client =
            TcpClient::new(&bootstrap_servers).map_err(|error| creation_error(error.to_string()))?;
        client
            .connect()
            .await
            .map_err(|error| creation_error(error.to_string()))?;
        let result = client.create_topic(name, partitions_count).await;
        if let Err(error) = client.disconnect().await {
            warn!("Failed to disconnect the admin client, {error}");
        }
        result.map_err(|error| creation_error(error.to_string()))?;

        if !self.topics.iter().any(|topic| topic == name) {
            self.topics.push(name.to_string());
        }
        info!("Created topic: {name} with {partitions_count} partition(s).");
        Ok(())
    }

    /// Stops the broker and removes its data. Stopping a fixture which is not running is a no-op.
    pub fn stop(&mut self) -> Result<(), HarnessError> {
        if self.state != BrokerState::Running {
            return Ok(());
        }

        self.state = BrokerState::Stopped;
        self.address = None;
        self.topics.clear();
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        let mut result = Ok(());
        if let Some(stopped) = self.stopped.take() {
            match stopped.recv_timeout(self.options.shutdown_timeout) {
                Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                    if let Some(thread) = self.thread.take() {
                        if thread.join().is_err() {
                            error!("Broker thread has panicked.");
                        }
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    self.thread.take();
                    result = Err(HarnessError::ShutdownTimeoutError(format!(
                        "broker has not stopped after: {:?}",
                        self.options.shutdown_timeout
                    )));
                }
            }
        }

        if let Some(directory) = self.directory.take() {
            let path = directory.path().display().to_string();
            if let Err(error) = directory.close() {
                warn!("Failed to remove the broker data directory: {path}, {error}");
            }
        }

        info!("Ephemeral broker has been stopped.");
        result
    }
}

impl Drop for EphemeralBroker {
    fn drop(&mut self) {
        if let Err(error) = self.stop() {
            warn!("Failed to stop the ephemeral broker, {error}");
        }
    }
}

fn run_broker(
    config: ServerConfig,
    ready: mpsc::Sender<Result<SocketAddr, String>>,
    shutdown: oneshot::Receiver<()>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name(BROKER_THREAD_NAME)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            let _ = ready.send(Err(format!("cannot build broker runtime: {error}")));
            return;
        }
    };

    runtime.block_on(async move {
        let mut server = BrookServer::new(config);
        match server.start().await {
            Ok(address) => {
                let _ = ready.send(Ok(address));
            }
            Err(error) => {
                let _ = ready.send(Err(error.to_string()));
                return;
            }
        }

        let _ = shutdown.await;
        server.shutdown().await;
    });
    runtime.shutdown_timeout(Duration::from_secs(1));
}
