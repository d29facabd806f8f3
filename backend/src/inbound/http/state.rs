//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{SnapshotQuery, SnapshotSync};

/// Dependency bundle for the sync handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Snapshot ingestion port.
    pub sync: Arc<dyn SnapshotSync>,
    /// Table listing port.
    pub query: Arc<dyn SnapshotQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureSnapshotQuery, FixtureSnapshotSync};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureSnapshotSync),
    ///     Arc::new(FixtureSnapshotQuery),
    /// );
    /// let _sync = state.sync.clone();
    /// ```
    #[must_use]
    pub fn new(sync: Arc<dyn SnapshotSync>, query: Arc<dyn SnapshotQuery>) -> Self {
        Self { sync, query }
    }
}
