//! Session: the store binding every persistence call goes through
//!
//! A session pairs an optional `StoreClient` with the loaded configuration.
//! Operations that need the store fail with `NoClientConfigured` when the
//! session is unbound, so a process can build records and plan queries
//! before the connection exists.

use crate::config::WiderowConfig;
use std::fmt;
use std::sync::Arc;
use widerow_core::{Error, Result, StoreClient};

/// Store binding plus configuration
///
/// Cheap to clone; clones share the same client.
#[derive(Clone)]
pub struct Session {
    store: Option<Arc<dyn StoreClient>>,
    config: Arc<WiderowConfig>,
}

impl Session {
    /// Bind a store with the default configuration
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self::with_config(store, WiderowConfig::default())
    }

    /// Bind a store with an explicit configuration
    pub fn with_config(store: Arc<dyn StoreClient>, config: WiderowConfig) -> Self {
        Session {
            store: Some(store),
            config: Arc::new(config),
        }
    }

    /// Session with no store bound
    pub fn unbound(config: WiderowConfig) -> Self {
        Session {
            store: None,
            config: Arc::new(config),
        }
    }

    /// The bound store client
    pub fn store(&self) -> Result<&dyn StoreClient> {
        self.store.as_deref().ok_or(Error::NoClientConfigured)
    }

    /// Whether a store client is bound
    pub fn is_bound(&self) -> bool {
        self.store.is_some()
    }

    /// Loaded configuration
    pub fn config(&self) -> &WiderowConfig {
        &self.config
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("bound", &self.is_bound())
            .field("config", &self.config)
            .finish()
    }
}
