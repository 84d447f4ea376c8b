//! Core data types for pinecheck.
//!
//! Wire shapes follow the service's JSON (camelCase); unknown fields are
//! ignored and missing ones default so newer API versions still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Output format for probe results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Reference to a remote index
///
/// `host` is `None` until the index has been resolved against the
/// control plane (lazy resolution) or supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexHandle {
    /// Index name
    pub name: String,

    /// Data-plane host, without scheme
    pub host: Option<String>,
}

impl IndexHandle {
    /// Handle whose host is not known yet
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: None,
        }
    }

    /// Handle with a known data-plane host
    pub fn resolved(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: Some(host.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.host.is_some()
    }
}

/// Per-namespace summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    #[serde(default)]
    pub vector_count: u64,
}

/// Index statistics as reported by `describe_index_stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Vector counts keyed by namespace ("" is the default namespace)
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceSummary>,

    /// Vector dimension
    #[serde(default)]
    pub dimension: u32,

    /// Storage fullness in [0, 1] (pod indexes only; 0 on serverless)
    #[serde(default)]
    pub index_fullness: f64,

    /// Sum of all namespace counts
    #[serde(default)]
    pub total_vector_count: u64,
}

impl IndexStats {
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dimension={} index_fullness={} total_vector_count={} namespaces={{",
            self.dimension, self.index_fullness, self.total_vector_count
        )?;
        for (i, (name, summary)) in self.namespaces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name:?}: {}", summary.vector_count)?;
        }
        write!(f, "}}")
    }
}

/// Readiness reported by the control plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub state: String,
}

/// Control-plane description of an index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDescription {
    pub name: String,

    #[serde(default)]
    pub dimension: Option<u32>,

    #[serde(default)]
    pub metric: String,

    /// Data-plane host, without scheme
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub status: IndexStatus,
}

/// Body of `GET /indexes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexList {
    #[serde(default)]
    pub indexes: Vec<IndexDescription>,
}

/// Outcome of a successful probe
///
/// Serialized in camelCase to match the embedded service stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    /// Index that was checked
    pub index: String,

    /// Data-plane host the stats came from, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    pub stats: IndexStats,

    pub checked_at: DateTime<Utc>,
}
