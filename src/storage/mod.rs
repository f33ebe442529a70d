//! Storage abstraction layer
//!
//! Byte-blob storage underneath the file-backed order repository

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

pub mod local;

/// Storage backend trait
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read object from storage
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Write object to storage, replacing any previous content
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Check if object exists
    async fn exists(&self, key: &str) -> Result<bool>;
}
