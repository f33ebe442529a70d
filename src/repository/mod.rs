//! Order repository abstraction
//!
//! Handlers only see `dyn OrderRepository`, so tests can swap in any
//! implementation.

use async_trait::async_trait;

use crate::types::TransportationOrder;
use crate::Result;

pub mod file;
pub mod memory;

pub use file::FileRepository;
pub use memory::InMemoryRepository;

/// Data access for transportation orders keyed by truck id
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Every stored order, in no particular order
    async fn find_all(&self) -> Result<Vec<TransportationOrder>>;

    /// The order assigned to `truck`, or `None` if there is none
    async fn find_by_id(&self, truck: &str) -> Result<Option<TransportationOrder>>;

    /// Insert or replace the order for `order.truck`
    async fn save(&self, order: TransportationOrder) -> Result<()>;

    /// Store `order` only if its truck has none yet; `false` when one exists
    async fn insert_if_absent(&self, order: TransportationOrder) -> Result<bool>;

    /// Remove and return the order for `truck`
    async fn delete_by_id(&self, truck: &str) -> Result<Option<TransportationOrder>>;

    /// Number of stored orders
    async fn count(&self) -> Result<usize>;
}

/// Repository backend selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryConfig {
    Memory,
    Local { path: String },
}
