//! Vector-database service clients
//!
//! [`VectorService`] is the seam between the probe and the remote
//! service. A value implementing it is a connected session: constructing
//! one is "create session", and the trait methods cover index resolution
//! and the read-only queries the probe needs.
//!
//! - [`PineconeClient`]: HTTP client for the Pinecone REST API
//! - [`MockService`]: in-memory service for tests and dry runs

mod mock;
mod pinecone;

pub use mock::MockService;
pub use pinecone::PineconeClient;

use crate::core::error::Result;
use crate::core::types::{IndexDescription, IndexHandle, IndexStats};
use async_trait::async_trait;

/// A connected session against a vector-database service
#[async_trait]
pub trait VectorService: Send + Sync {
    /// Resolve a handle for the named index
    ///
    /// Depending on the resolution mode this may or may not contact the
    /// service; a lazy handle is only checked by [`describe_stats`].
    ///
    /// [`describe_stats`]: VectorService::describe_stats
    async fn index(&self, name: &str) -> Result<IndexHandle>;

    /// Fetch statistics for a resolved (or lazily resolvable) index
    async fn describe_stats(&self, handle: &IndexHandle) -> Result<IndexStats>;

    /// List every index visible to the session's credentials
    async fn list_indexes(&self) -> Result<Vec<IndexDescription>>;
}
