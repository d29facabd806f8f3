//! Driven port for table-level storage.
//!
//! The sync engine persists through this trait only; the SQL dialect, the
//! clearing syntax, and transaction handling all live behind it. Adapters:
//! Diesel/PostgreSQL for production, an in-memory store for development
//! fallback and tests.

use async_trait::async_trait;

use crate::domain::entity::EntityKind;
use crate::domain::record::ValidRecord;
use crate::domain::report::ClearPath;

/// Errors raised by table store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableStoreError {
    /// The backing store could not be reached or the connection dropped.
    #[error("table store connection failed: {message}")]
    Connection {
        /// Adapter-reported reason.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("table store query failed: {message}")]
    Query {
        /// Adapter-reported reason.
        message: String,
    },
}

impl TableStoreError {
    /// Build a [`TableStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`TableStoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Per-row result of a snapshot write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row is durable in the table.
    Persisted,
    /// The store refused this row (e.g. a key constraint); the rest of the
    /// batch was unaffected.
    Rejected {
        /// Store-reported reason, echoed into the sync report.
        message: String,
    },
}

impl RowOutcome {
    /// Build a [`RowOutcome::Rejected`].
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Port for clearing, writing, and listing one entity's table.
///
/// Implementations own the clear strategy: a fast full-table clear that also
/// resets the key-generation sequence, with a row-delete fallback whose
/// sequence reset is best-effort. [`TableStore::clear`] reports which path
/// ran. Clearing an already-empty table is a no-op success.
///
/// Snapshot writes are transactional per call: a connection-level fault rolls
/// back every row of that call, while a single rejected row never aborts the
/// batch. Writes and listings for different entities are independent;
/// concurrent calls against the same entity are not serialised here and must
/// be serialised by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Empty the entity's table, reporting the strategy used.
    async fn clear(&self, entity: EntityKind) -> Result<ClearPath, TableStoreError>;

    /// Insert validated records in order, one outcome per record.
    ///
    /// The returned vector has the same length and order as `records`.
    async fn insert_snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError>;

    /// Update-or-insert validated records by key, one outcome per record.
    ///
    /// Matching is an explicit lookup: a present match is updated in place,
    /// an absent one inserted. Rows not named in `records` are untouched.
    async fn upsert_snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError>;

    /// Current table content in primary-key order.
    async fn list(&self, entity: EntityKind) -> Result<Vec<ValidRecord>, TableStoreError>;
}

/// Fixture implementation that accepts every write and holds nothing.
///
/// Use it in unit tests where storage behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTableStore;

#[async_trait]
impl TableStore for FixtureTableStore {
    async fn clear(&self, _entity: EntityKind) -> Result<ClearPath, TableStoreError> {
        Ok(ClearPath::Truncate)
    }

    async fn insert_snapshot(
        &self,
        _entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        Ok(records.iter().map(|_| RowOutcome::Persisted).collect())
    }

    async fn upsert_snapshot(
        &self,
        _entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        Ok(records.iter().map(|_| RowOutcome::Persisted).collect())
    }

    async fn list(&self, _entity: EntityKind) -> Result<Vec<ValidRecord>, TableStoreError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{AccountUser, ValidRecord};
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_store_accepts_every_row() {
        let store = FixtureTableStore;
        let records = vec![ValidRecord::AccUser(AccountUser {
            id: "U1".to_owned(),
            password: "p".to_owned(),
        })];

        let outcomes = store
            .insert_snapshot(EntityKind::AccUsers, &records)
            .await
            .expect("fixture insert");
        assert_eq!(outcomes, vec![RowOutcome::Persisted]);

        let listed = store.list(EntityKind::AccUsers).await.expect("fixture list");
        assert!(listed.is_empty());
    }

    #[rstest]
    fn error_constructors_accept_str() {
        let error = TableStoreError::connection("refused");
        assert_eq!(error.to_string(), "table store connection failed: refused");

        let error = TableStoreError::query("bad statement");
        assert_eq!(error.to_string(), "table store query failed: bad statement");
    }
}
