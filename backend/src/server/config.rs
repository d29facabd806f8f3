//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::domain::SyncPolicy;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) policy: SyncPolicy,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            policy: SyncPolicy::default(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server falls back to the in-memory store, which is
    /// suitable for development and tests only.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Set the per-entity replace policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, ReplaceMode};
    use rstest::rstest;

    #[rstest]
    fn config_defaults_to_memory_store_and_full_replace() {
        let config = ServerConfig::new(([127, 0, 0, 1], 8000).into());

        assert!(config.db_pool.is_none());
        assert_eq!(
            config.policy.mode(EntityKind::Items),
            ReplaceMode::FullReplace
        );
        assert_eq!(config.bind_addr.port(), 8000);
    }
}
