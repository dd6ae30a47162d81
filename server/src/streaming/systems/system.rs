use crate::configs::system::SystemConfig;
use crate::server_error::ServerError;
use crate::streaming::topics::topic::Topic;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::{create_dir_all, remove_dir_all};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::time::Instant;
use tracing::info;

/// The system shared by all the connections.
#[derive(Debug, Clone)]
pub struct SharedSystem {
    system: Arc<RwLock<System>>,
}

impl SharedSystem {
    pub fn new(system: System) -> SharedSystem {
        SharedSystem {
            system: Arc::new(RwLock::new(system)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, System> {
        self.system.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, System> {
        self.system.write().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ConsumerOffsetKey {
    pub group: String,
    pub topic: String,
    pub partition_id: u32,
}

#[derive(Debug)]
pub struct System {
    pub(crate) config: Arc<SystemConfig>,
    pub(crate) topics: HashMap<String, Topic>,
    pub(crate) consumer_offsets: HashMap<ConsumerOffsetKey, u64>,
}

impl System {
    pub fn new(config: Arc<SystemConfig>) -> System {
        System {
            config,
            topics: HashMap::new(),
            consumer_offsets: HashMap::new(),
        }
    }

    pub async fn init(&mut self) -> Result<(), ServerError> {
        let now = Instant::now();
        let system_path = self.config.get_system_path();
        create_dir_all(&system_path).await?;

        let runtime_path = self.config.get_runtime_path();
        if Path::new(&runtime_path).exists() {
            remove_dir_all(&runtime_path).await?;
        }
        create_dir_all(&runtime_path).await?;

        info!(
            "Initialized system in {} ms, runtime data is stored at: {}",
            now.elapsed().as_millis(),
            runtime_path
        );
        Ok(())
    }

    pub fn shutdown(&mut self) {
        for topic in self.topics.values() {
            for partition in &topic.partitions {
                partition.appended().notify_waiters();
            }
        }
        info!(
            "System has been shut down, dropping {} topic(s).",
            self.topics.len()
        );
        self.topics.clear();
        self.consumer_offsets.clear();
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
