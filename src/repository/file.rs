//! File-backed order repository
//!
//! Orders live in memory and the full set is rewritten as NDJSON after
//! every write. Writes are serialized so the file always matches a state
//! the map actually held.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{InMemoryRepository, OrderRepository};
use crate::fixture::{encode_orders, parse_orders};
use crate::storage::local::LocalStorage;
use crate::storage::StorageBackend;
use crate::types::TransportationOrder;
use crate::{Error, Result};

pub struct FileRepository {
    storage: Arc<dyn StorageBackend>,
    key: String,
    orders: InMemoryRepository,
    write_lock: Mutex<()>,
}

impl FileRepository {
    /// Open the repository stored under `key`, starting empty if absent
    pub async fn open(storage: Arc<dyn StorageBackend>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();

        let orders = if storage.exists(&key).await? {
            let data = storage.get(&key).await?;
            let text = std::str::from_utf8(&data)
                .map_err(|e| Error::storage(format!("{} is not valid UTF-8: {}", key, e)))?;
            parse_orders(text)?
        } else {
            Vec::new()
        };

        tracing::info!(%key, count = orders.len(), "Opened order file");

        Ok(Self {
            storage,
            key,
            orders: InMemoryRepository::with_orders(orders),
            write_lock: Mutex::new(()),
        })
    }

    /// Open an NDJSON file on the local filesystem
    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::storage(format!("invalid order file path: {}", path.display()))
            })?
            .to_string();

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(root)?);
        Self::open(storage, key).await
    }

    async fn persist(&self) -> Result<()> {
        let text = encode_orders(&self.orders.sorted())?;
        self.storage.put(&self.key, Bytes::from(text)).await
    }

    /// Persist, restoring `previous` for `truck` in memory if the write fails
    async fn persist_or_restore(
        &self,
        truck: &str,
        previous: Option<TransportationOrder>,
    ) -> Result<()> {
        if let Err(err) = self.persist().await {
            tracing::error!(error = %err, %truck, "Failed to persist orders; reverting");
            match previous {
                Some(order) => self.orders.save(order).await?,
                None => {
                    self.orders.delete_by_id(truck).await?;
                }
            }
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for FileRepository {
    async fn find_all(&self) -> Result<Vec<TransportationOrder>> {
        self.orders.find_all().await
    }

    async fn find_by_id(&self, truck: &str) -> Result<Option<TransportationOrder>> {
        self.orders.find_by_id(truck).await
    }

    async fn save(&self, order: TransportationOrder) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let truck = order.truck.clone();
        let previous = self.orders.find_by_id(&truck).await?;
        self.orders.save(order).await?;
        self.persist_or_restore(&truck, previous).await
    }

    async fn insert_if_absent(&self, order: TransportationOrder) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let truck = order.truck.clone();
        if !self.orders.insert_if_absent(order).await? {
            return Ok(false);
        }
        self.persist_or_restore(&truck, None).await?;
        Ok(true)
    }

    async fn delete_by_id(&self, truck: &str) -> Result<Option<TransportationOrder>> {
        let _guard = self.write_lock.lock().await;

        let removed = self.orders.delete_by_id(truck).await?;
        if removed.is_some() {
            self.persist_or_restore(truck, removed.clone()).await?;
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize> {
        self.orders.count().await
    }
}
