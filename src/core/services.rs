//! Unified service container for pinecheck
//!
//! Provides shared access to the configuration and the connected
//! vector-service session.

use crate::core::client::{PineconeClient, VectorService};
use crate::core::config::Config;
use crate::core::error::Result;
use std::sync::Arc;

/// Unified services container
///
/// All CLI commands that talk to the service use this same struct.
#[derive(Clone)]
pub struct Services {
    /// Connected vector-service session
    pub client: Arc<dyn VectorService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services backed by the Pinecone HTTP client
    pub fn connect(config: Config) -> Result<Self> {
        let client = PineconeClient::connect(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create services around an existing session
    pub fn with_client(config: Config, client: Arc<dyn VectorService>) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}
