use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::domain::Resource;
use crate::utils::PokedexError;

/// Remote lookup of a single entity
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Fetch the JSON document for `identifier` under `resource`.
    /// A non-success status is reported as [`PokedexError::NotFound`].
    async fn fetch(&self, resource: Resource, identifier: &str) -> Result<Value, PokedexError>;

    /// Fetch raw bytes from an absolute URL (sprite images)
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, PokedexError>;
}
