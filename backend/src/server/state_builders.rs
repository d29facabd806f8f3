//! Builders wiring the sync engine to a storage adapter.

use std::sync::Arc;

use actix_web::web;

use crate::domain::SnapshotSyncService;
use crate::domain::ports::{SnapshotQuery, SnapshotSync, TableStore};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DieselTableStore, MemoryTableStore};

use super::ServerConfig;

fn build_engine_pair<S: TableStore + 'static>(
    service: SnapshotSyncService<S>,
) -> (Arc<dyn SnapshotSync>, Arc<dyn SnapshotQuery>) {
    let service = Arc::new(service);
    (
        service.clone() as Arc<dyn SnapshotSync>,
        service as Arc<dyn SnapshotQuery>,
    )
}

/// Build the shared HTTP state over the configured storage adapter.
///
/// A configured pool selects the PostgreSQL adapter; without one the server
/// runs on the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (sync, query) = match &config.db_pool {
        Some(pool) => build_engine_pair(SnapshotSyncService::new(
            Arc::new(DieselTableStore::new(pool.clone())),
            config.policy,
        )),
        None => build_engine_pair(SnapshotSyncService::new(
            Arc::new(MemoryTableStore::new()),
            config.policy,
        )),
    };

    web::Data::new(HttpState::new(sync, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityKind;
    use serde_json::json;

    #[tokio::test]
    async fn pool_absent_wires_the_in_memory_store() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        let state = build_http_state(&config);

        let report = state
            .sync
            .sync_snapshot(
                EntityKind::AccUsers,
                json!([{"id": "U1", "password": "p"}]),
            )
            .await
            .expect("sync against memory store");
        assert_eq!(report.created, 1);

        let listed = state
            .query
            .list_records(EntityKind::AccUsers)
            .await
            .expect("list against memory store");
        assert_eq!(listed.len(), 1);
    }
}
