//! In-memory table store.
//!
//! Serves two roles: the storage double for integration tests and the
//! fallback adapter when the server starts without a database URL. Behaviour
//! mirrors the PostgreSQL adapter: duplicate keys reject the row, upserts
//! match by key, listings come back in key order.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::EntityKind;
use crate::domain::ports::{RowOutcome, TableStore, TableStoreError};
use crate::domain::record::{RecordKey, ValidRecord};
use crate::domain::report::ClearPath;

/// [`TableStore`] keeping every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: Mutex<HashMap<EntityKind, Vec<ValidRecord>>>,
}

/// Keys within one table are homogeneous; the cross-variant ordering only
/// keeps the sort total.
fn compare_keys(a: &RecordKey, b: &RecordKey) -> std::cmp::Ordering {
    match (a, b) {
        (RecordKey::Text(a), RecordKey::Text(b)) => a.cmp(b),
        (RecordKey::Number(a), RecordKey::Number(b)) => a.cmp(b),
        (RecordKey::Number(_), RecordKey::Text(_)) => std::cmp::Ordering::Less,
        (RecordKey::Text(_), RecordKey::Number(_)) => std::cmp::Ordering::Greater,
    }
}

impl MemoryTableStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(
        &self,
        entity: EntityKind,
        op: impl FnOnce(&mut Vec<ValidRecord>) -> T,
    ) -> Result<T, TableStoreError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| TableStoreError::connection("memory store lock poisoned"))?;
        Ok(op(tables.entry(entity).or_default()))
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn clear(&self, entity: EntityKind) -> Result<ClearPath, TableStoreError> {
        self.with_table(entity, Vec::clear)?;
        Ok(ClearPath::Truncate)
    }

    async fn insert_snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        self.with_table(entity, |table| {
            records
                .iter()
                .map(|record| {
                    let key = record.key();
                    if table.iter().any(|existing| existing.key() == key) {
                        RowOutcome::rejected(format!(
                            "duplicate key {key} in {}",
                            entity.table()
                        ))
                    } else {
                        table.push(record.clone());
                        RowOutcome::Persisted
                    }
                })
                .collect()
        })
    }

    async fn upsert_snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        self.with_table(entity, |table| {
            records
                .iter()
                .map(|record| {
                    let key = record.key();
                    match table.iter_mut().find(|existing| existing.key() == key) {
                        Some(existing) => *existing = record.clone(),
                        None => table.push(record.clone()),
                    }
                    RowOutcome::Persisted
                })
                .collect()
        })
    }

    async fn list(&self, entity: EntityKind) -> Result<Vec<ValidRecord>, TableStoreError> {
        self.with_table(entity, |table| {
            let mut records = table.clone();
            records.sort_by(|a, b| compare_keys(&a.key(), &b.key()));
            records
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{AccountUser, BillRecord};
    use rust_decimal::Decimal;

    fn user(id: &str) -> ValidRecord {
        ValidRecord::AccUser(AccountUser {
            id: id.to_owned(),
            password: "p".to_owned(),
        })
    }

    fn bill(billno: i64, amount: Decimal) -> ValidRecord {
        ValidRecord::Bill(BillRecord {
            billno,
            time: None,
            user: None,
            amount,
            date: None,
        })
    }

    #[tokio::test]
    async fn duplicate_keys_reject_the_later_row_only() {
        let store = MemoryTableStore::new();
        let records = vec![user("U1"), user("U2"), user("U1")];

        let outcomes = store
            .insert_snapshot(EntityKind::AccUsers, &records)
            .await
            .expect("insert");

        assert_eq!(outcomes[0], RowOutcome::Persisted);
        assert_eq!(outcomes[1], RowOutcome::Persisted);
        assert!(matches!(outcomes[2], RowOutcome::Rejected { .. }));

        let listed = store.list(EntityKind::AccUsers).await.expect("list");
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn clear_then_insert_replaces_the_snapshot() {
        let store = MemoryTableStore::new();
        store
            .insert_snapshot(EntityKind::Bills, &[bill(1, Decimal::new(100, 2))])
            .await
            .expect("seed");

        store.clear(EntityKind::Bills).await.expect("clear");
        store
            .insert_snapshot(EntityKind::Bills, &[bill(2, Decimal::new(200, 2))])
            .await
            .expect("replace");

        let listed = store.list(EntityKind::Bills).await.expect("list");
        assert_eq!(listed, vec![bill(2, Decimal::new(200, 2))]);
    }

    #[tokio::test]
    async fn clearing_an_empty_table_is_a_no_op() {
        let store = MemoryTableStore::new();
        let path = store.clear(EntityKind::KotSales).await.expect("clear");
        assert_eq!(path, ClearPath::Truncate);
        assert!(
            store
                .list(EntityKind::KotSales)
                .await
                .expect("list")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn upsert_updates_in_place_and_inserts_new_keys() {
        let store = MemoryTableStore::new();
        store
            .insert_snapshot(EntityKind::Bills, &[bill(1, Decimal::new(100, 2))])
            .await
            .expect("seed");

        let outcomes = store
            .upsert_snapshot(
                EntityKind::Bills,
                &[bill(1, Decimal::new(150, 2)), bill(2, Decimal::new(200, 2))],
            )
            .await
            .expect("upsert");
        assert_eq!(outcomes, vec![RowOutcome::Persisted, RowOutcome::Persisted]);

        let listed = store.list(EntityKind::Bills).await.expect("list");
        assert_eq!(
            listed,
            vec![bill(1, Decimal::new(150, 2)), bill(2, Decimal::new(200, 2))]
        );
    }

    #[tokio::test]
    async fn listings_come_back_in_key_order() {
        let store = MemoryTableStore::new();
        store
            .insert_snapshot(
                EntityKind::Bills,
                &[bill(3, Decimal::ONE), bill(1, Decimal::ONE), bill(2, Decimal::ONE)],
            )
            .await
            .expect("insert");

        let listed = store.list(EntityKind::Bills).await.expect("list");
        let billnos: Vec<i64> = listed
            .iter()
            .map(|record| match record {
                ValidRecord::Bill(bill) => bill.billno,
                _ => unreachable!("only bills were inserted"),
            })
            .collect();
        assert_eq!(billnos, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn entities_are_stored_independently() {
        let store = MemoryTableStore::new();
        store
            .insert_snapshot(EntityKind::Bills, &[bill(1, Decimal::ONE)])
            .await
            .expect("bills");
        store
            .insert_snapshot(EntityKind::BillsMonth, &[bill(1, Decimal::ONE)])
            .await
            .expect("archive");

        store.clear(EntityKind::Bills).await.expect("clear bills");

        assert!(store.list(EntityKind::Bills).await.expect("list").is_empty());
        assert_eq!(
            store.list(EntityKind::BillsMonth).await.expect("list").len(),
            1
        );
    }
}
