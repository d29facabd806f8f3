//! Snapshot synchronisation engine.
//!
//! [`SnapshotSyncService`] sequences one sync call: normalise the payload,
//! clear the table (full-replace mode only), validate and persist each record
//! in input order, and derive the overall outcome. One bad record never
//! aborts the batch; a clear failure or an unexpected storage fault aborts
//! the whole call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use super::entity::{EntityKind, ReplaceMode, SyncPolicy};
use super::error::SyncError;
use super::ports::{RowOutcome, SnapshotQuery, SnapshotSync, TableStore, TableStoreError};
use super::report::{RecordFailure, SyncReport, SyncStatus};
use super::validate::validate;

/// Engine implementation of the [`SnapshotSync`] and [`SnapshotQuery`] ports.
#[derive(Clone)]
pub struct SnapshotSyncService<S> {
    store: Arc<S>,
    policy: SyncPolicy,
}

impl<S> SnapshotSyncService<S> {
    /// Create a service over the given store with the given replace policy.
    pub const fn new(store: Arc<S>, policy: SyncPolicy) -> Self {
        Self { store, policy }
    }
}

impl<S: TableStore> SnapshotSyncService<S> {
    /// Expand the request body into an ordered snapshot.
    ///
    /// A bare object is promoted to a one-element snapshot only for entities
    /// that allow it (`acc_users`); everything else requires an array.
    fn normalize(entity: EntityKind, payload: Value) -> Result<Vec<Value>, SyncError> {
        match payload {
            Value::Array(records) => Ok(records),
            Value::Object(_) if entity.accepts_single_object() => Ok(vec![payload]),
            _ => Err(SyncError::invalid_payload(format!(
                "payload for {} must be a JSON array of records",
                entity.resource()
            ))),
        }
    }

    fn store_fault(entity: EntityKind, error: &TableStoreError) -> SyncError {
        SyncError::fault(entity.table(), error.to_string())
    }

    /// Validate and persist the snapshot, folding per-row rejections back
    /// into their original input positions.
    async fn ingest(
        &self,
        entity: EntityKind,
        mode: ReplaceMode,
        records: &[Value],
    ) -> Result<(u64, Vec<RecordFailure>), SyncError> {
        let mut failures: Vec<Option<RecordFailure>> = vec![None; records.len()];
        let mut valid = Vec::new();
        let mut valid_positions = Vec::new();

        for (position, raw) in records.iter().enumerate() {
            match validate(entity, raw) {
                Ok(record) => {
                    valid.push(record);
                    valid_positions.push(position);
                }
                Err(field_errors) => {
                    if let Some(slot) = failures.get_mut(position) {
                        *slot = Some(RecordFailure {
                            record: raw.clone(),
                            reason: field_errors.to_string(),
                        });
                    }
                }
            }
        }

        let outcomes = if valid.is_empty() {
            Vec::new()
        } else {
            let write = match mode {
                ReplaceMode::FullReplace => self.store.insert_snapshot(entity, &valid),
                ReplaceMode::UpsertByKey => self.store.upsert_snapshot(entity, &valid),
            };
            write
                .await
                .map_err(|error| Self::store_fault(entity, &error))?
        };

        if outcomes.len() != valid.len() {
            return Err(SyncError::fault(
                entity.table(),
                "store returned a mismatched outcome count",
            ));
        }

        let mut created: u64 = 0;
        for (position, outcome) in valid_positions.into_iter().zip(outcomes) {
            match outcome {
                RowOutcome::Persisted => created += 1,
                RowOutcome::Rejected { message } => {
                    if let (Some(slot), Some(raw)) =
                        (failures.get_mut(position), records.get(position))
                    {
                        *slot = Some(RecordFailure {
                            record: raw.clone(),
                            reason: message,
                        });
                    }
                }
            }
        }

        Ok((created, failures.into_iter().flatten().collect()))
    }
}

#[async_trait]
impl<S: TableStore> SnapshotSync for SnapshotSyncService<S> {
    async fn sync_snapshot(
        &self,
        entity: EntityKind,
        payload: Value,
    ) -> Result<SyncReport, SyncError> {
        let records = Self::normalize(entity, payload)?;
        let total_received = records.len() as u64;
        let mode = self.policy.mode(entity);

        let clear_path = match mode {
            ReplaceMode::FullReplace => {
                let path = self.store.clear(entity).await.map_err(|error| {
                    warn!(
                        resource = entity.resource(),
                        error = %error,
                        "table clear failed; nothing ingested"
                    );
                    SyncError::clear_failed(entity.table(), error.to_string())
                })?;
                Some(path)
            }
            ReplaceMode::UpsertByKey => None,
        };

        let (created, errors) = self.ingest(entity, mode, &records).await?;
        debug_assert_eq!(created + errors.len() as u64, total_received);

        let status = if errors.is_empty() {
            SyncStatus::Success
        } else {
            SyncStatus::PartialSuccess
        };

        info!(
            resource = entity.resource(),
            created,
            total_received,
            rejected = errors.len(),
            ?clear_path,
            "snapshot sync completed"
        );

        Ok(SyncReport {
            entity,
            mode,
            status,
            created,
            total_received,
            errors,
            clear_path,
        })
    }
}

#[async_trait]
impl<S: TableStore> SnapshotQuery for SnapshotSyncService<S> {
    async fn list_records(&self, entity: EntityKind) -> Result<Vec<Value>, SyncError> {
        let records = self
            .store
            .list(entity)
            .await
            .map_err(|error| Self::store_fault(entity, &error))?;

        records
            .iter()
            .map(|record| {
                serde_json::to_value(record)
                    .map_err(|error| SyncError::fault(entity.table(), error.to_string()))
            })
            .collect()
    }
}
