//! In-memory vector service
//!
//! Behaves like the remote service for the calls the probe makes:
//! registered indexes answer with their stats, unknown ones fail with
//! `QueryFailure`, and an unreachable service fails every remote call
//! with `ConnectionFailure`. Call counters let tests tell eager from
//! lazy resolution.

use super::VectorService;
use crate::core::config::ResolveMode;
use crate::core::error::{ProbeError, Result};
use crate::core::types::{IndexDescription, IndexHandle, IndexStats, IndexStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock session
#[derive(Debug, Default)]
pub struct MockService {
    indexes: Mutex<BTreeMap<String, IndexStats>>,
    resolve: ResolveMode,
    unreachable: bool,
    control_plane_calls: AtomicUsize,
    data_plane_calls: AtomicUsize,
}

impl MockService {
    /// Create a session; an empty key fails like the real client does
    pub fn connect(api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ProbeError::ConfigurationMissing(
                "PINECONE_API_KEY is not set or empty".to_string(),
            ));
        }
        Ok(Self::default())
    }

    /// Register an index with the stats it reports
    pub fn with_index(self, name: &str, stats: IndexStats) -> Self {
        self.set_stats(name, stats);
        self
    }

    pub fn with_resolve(mut self, resolve: ResolveMode) -> Self {
        self.resolve = resolve;
        self
    }

    /// Every remote call fails as if the connection was refused
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Replace the stats of an index, registering it if needed
    pub fn set_stats(&self, name: &str, stats: IndexStats) {
        self.lock().insert(name.to_string(), stats);
    }

    /// Number of index lookups that hit the control plane
    pub fn control_plane_calls(&self) -> usize {
        self.control_plane_calls.load(Ordering::SeqCst)
    }

    /// Number of statistics queries
    pub fn data_plane_calls(&self) -> usize {
        self.data_plane_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, IndexStats>> {
        // A poisoned map is still a valid map
        self.indexes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable {
            Err(ProbeError::ConnectionFailure(
                "connection refused (mock service unreachable)".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn host_of(name: &str) -> String {
        format!("{name}.mock.local")
    }

    fn lookup(&self, name: &str) -> Result<IndexStats> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| ProbeError::QueryFailure(format!("index '{name}' not found")))
    }
}

#[async_trait]
impl VectorService for MockService {
    async fn index(&self, name: &str) -> Result<IndexHandle> {
        if name.trim().is_empty() {
            return Err(ProbeError::ConfigurationMissing(
                "index name is empty".to_string(),
            ));
        }

        match self.resolve {
            ResolveMode::Lazy => Ok(IndexHandle::unresolved(name)),
            ResolveMode::Eager => {
                self.control_plane_calls.fetch_add(1, Ordering::SeqCst);
                self.check_reachable()?;
                self.lookup(name)?;
                Ok(IndexHandle::resolved(name, Self::host_of(name)))
            }
        }
    }

    async fn describe_stats(&self, handle: &IndexHandle) -> Result<IndexStats> {
        self.data_plane_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        self.lookup(&handle.name)
    }

    async fn list_indexes(&self) -> Result<Vec<IndexDescription>> {
        self.control_plane_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;

        Ok(self
            .lock()
            .iter()
            .map(|(name, stats)| IndexDescription {
                name: name.clone(),
                dimension: Some(stats.dimension),
                metric: "cosine".to_string(),
                host: Self::host_of(name),
                status: IndexStatus {
                    ready: true,
                    state: "Ready".to_string(),
                },
            })
            .collect())
    }
}
