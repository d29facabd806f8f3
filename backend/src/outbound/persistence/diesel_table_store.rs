//! PostgreSQL table store adapter built on Diesel.
//!
//! Clearing tries `TRUNCATE ... RESTART IDENTITY` first and falls back to a
//! row delete when truncation is refused (insufficient privilege, foreign-key
//! references). The fallback resets the key sequence with `setval` on a
//! best-effort basis; a failed reset is logged and the clear still succeeds.
//!
//! Snapshot writes run inside one transaction per call, with a savepoint
//! around every row so a constraint violation rejects that row alone while
//! the rest of the batch commits.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::EntityKind;
use crate::domain::ports::{RowOutcome, TableStore, TableStoreError};
use crate::domain::record::ValidRecord;
use crate::domain::report::ClearPath;
use super::models::{AccUserRow, BillMonthRow, BillRow, CancelledBillRow, ItemRow, KotSaleRow};
use super::pool::DbPool;
use super::schema::{
    acc_users, cancelled_bills, dine_bill, dine_bill_month, dine_kot_sales_detail, tb_item_master,
};

/// [`TableStore`] backed by PostgreSQL through a [`DbPool`].
#[derive(Clone)]
pub struct DieselTableStore {
    pool: DbPool,
}

impl DieselTableStore {
    /// Create a store over the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a Diesel error at the call boundary.
///
/// Connection-level failures become [`TableStoreError::Connection`] so the
/// engine reports them as faults distinct from statement problems.
fn map_store_error(error: &DieselError) -> TableStoreError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            TableStoreError::connection(info.message())
        }
        DieselError::BrokenTransactionManager | DieselError::AlreadyInTransaction => {
            TableStoreError::connection(error.to_string())
        }
        other => TableStoreError::query(other.to_string()),
    }
}

/// Whether a row-level write error rejects the row rather than the batch.
fn row_rejection(error: &DieselError) -> Option<String> {
    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation,
            info,
        ) => Some(info.message().to_owned()),
        _ => None,
    }
}

fn mismatched_record() -> DieselError {
    DieselError::QueryBuilderError("record does not belong to the target table".into())
}

async fn insert_one(
    conn: &mut AsyncPgConnection,
    entity: EntityKind,
    record: &ValidRecord,
) -> Result<(), DieselError> {
    match (entity, record) {
        (EntityKind::AccUsers, ValidRecord::AccUser(user)) => {
            diesel::insert_into(acc_users::table)
                .values(AccUserRow::from(user))
                .execute(conn)
                .await?;
        }
        (EntityKind::Items, ValidRecord::Item(item)) => {
            diesel::insert_into(tb_item_master::table)
                .values(ItemRow::from(item))
                .execute(conn)
                .await?;
        }
        (EntityKind::Bills, ValidRecord::Bill(bill)) => {
            diesel::insert_into(dine_bill::table)
                .values(BillRow::from(bill))
                .execute(conn)
                .await?;
        }
        (EntityKind::BillsMonth, ValidRecord::Bill(bill)) => {
            diesel::insert_into(dine_bill_month::table)
                .values(BillMonthRow::from(bill))
                .execute(conn)
                .await?;
        }
        (EntityKind::KotSales, ValidRecord::KotSale(line)) => {
            diesel::insert_into(dine_kot_sales_detail::table)
                .values(KotSaleRow::from(line))
                .execute(conn)
                .await?;
        }
        (EntityKind::CancelledBills, ValidRecord::Cancelled(bill)) => {
            diesel::insert_into(cancelled_bills::table)
                .values(CancelledBillRow::from(bill))
                .execute(conn)
                .await?;
        }
        _ => return Err(mismatched_record()),
    }
    Ok(())
}

/// Update the matching row if present, insert otherwise.
///
/// The lookup is explicit so the outcome mirrors the in-memory adapter and
/// never relies on `ON CONFLICT` side channels.
async fn upsert_one(
    conn: &mut AsyncPgConnection,
    entity: EntityKind,
    record: &ValidRecord,
) -> Result<(), DieselError> {
    match (entity, record) {
        (EntityKind::AccUsers, ValidRecord::AccUser(user)) => {
            let existing: Option<String> = acc_users::table
                .select(acc_users::id)
                .filter(acc_users::id.eq(&user.id))
                .first(conn)
                .await
                .optional()?;
            if existing.is_some() {
                diesel::update(acc_users::table.filter(acc_users::id.eq(&user.id)))
                    .set(AccUserRow::from(user))
                    .execute(conn)
                    .await?;
            } else {
                diesel::insert_into(acc_users::table)
                    .values(AccUserRow::from(user))
                    .execute(conn)
                    .await?;
            }
        }
        (EntityKind::Items, ValidRecord::Item(item)) => {
            let existing: Option<i64> = tb_item_master::table
                .select(tb_item_master::item_code)
                .filter(tb_item_master::item_code.eq(item.item_code))
                .first(conn)
                .await
                .optional()?;
            if existing.is_some() {
                diesel::update(
                    tb_item_master::table.filter(tb_item_master::item_code.eq(item.item_code)),
                )
                .set(ItemRow::from(item))
                .execute(conn)
                .await?;
            } else {
                diesel::insert_into(tb_item_master::table)
                    .values(ItemRow::from(item))
                    .execute(conn)
                    .await?;
            }
        }
        (EntityKind::Bills, ValidRecord::Bill(bill)) => {
            let existing: Option<i64> = dine_bill::table
                .select(dine_bill::billno)
                .filter(dine_bill::billno.eq(bill.billno))
                .first(conn)
                .await
                .optional()?;
            if existing.is_some() {
                diesel::update(dine_bill::table.filter(dine_bill::billno.eq(bill.billno)))
                    .set(BillRow::from(bill))
                    .execute(conn)
                    .await?;
            } else {
                diesel::insert_into(dine_bill::table)
                    .values(BillRow::from(bill))
                    .execute(conn)
                    .await?;
            }
        }
        (EntityKind::BillsMonth, ValidRecord::Bill(bill)) => {
            let existing: Option<i64> = dine_bill_month::table
                .select(dine_bill_month::billno)
                .filter(dine_bill_month::billno.eq(bill.billno))
                .first(conn)
                .await
                .optional()?;
            if existing.is_some() {
                diesel::update(
                    dine_bill_month::table.filter(dine_bill_month::billno.eq(bill.billno)),
                )
                .set(BillMonthRow::from(bill))
                .execute(conn)
                .await?;
            } else {
                diesel::insert_into(dine_bill_month::table)
                    .values(BillMonthRow::from(bill))
                    .execute(conn)
                    .await?;
            }
        }
        (EntityKind::KotSales, ValidRecord::KotSale(line)) => {
            let existing: Option<i64> = dine_kot_sales_detail::table
                .select(dine_kot_sales_detail::slno)
                .filter(dine_kot_sales_detail::slno.eq(line.slno))
                .first(conn)
                .await
                .optional()?;
            if existing.is_some() {
                diesel::update(
                    dine_kot_sales_detail::table
                        .filter(dine_kot_sales_detail::slno.eq(line.slno)),
                )
                .set(KotSaleRow::from(line))
                .execute(conn)
                .await?;
            } else {
                diesel::insert_into(dine_kot_sales_detail::table)
                    .values(KotSaleRow::from(line))
                    .execute(conn)
                    .await?;
            }
        }
        (EntityKind::CancelledBills, ValidRecord::Cancelled(bill)) => {
            let existing: Option<i64> = cancelled_bills::table
                .select(cancelled_bills::billno)
                .filter(cancelled_bills::billno.eq(bill.billno))
                .first(conn)
                .await
                .optional()?;
            if existing.is_some() {
                diesel::update(
                    cancelled_bills::table.filter(cancelled_bills::billno.eq(bill.billno)),
                )
                .set(CancelledBillRow::from(bill))
                .execute(conn)
                .await?;
            } else {
                diesel::insert_into(cancelled_bills::table)
                    .values(CancelledBillRow::from(bill))
                    .execute(conn)
                    .await?;
            }
        }
        _ => return Err(mismatched_record()),
    }
    Ok(())
}

/// Write a batch with one savepoint per row.
async fn write_snapshot(
    conn: &mut AsyncPgConnection,
    entity: EntityKind,
    records: &[ValidRecord],
    upsert: bool,
) -> Result<Vec<RowOutcome>, DieselError> {
    let mut outcomes = Vec::with_capacity(records.len());
    for record in records {
        let result = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    if upsert {
                        upsert_one(conn, entity, record).await
                    } else {
                        insert_one(conn, entity, record).await
                    }
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(()) => outcomes.push(RowOutcome::Persisted),
            Err(error) => match row_rejection(&error) {
                Some(message) => outcomes.push(RowOutcome::rejected(message)),
                None => return Err(error),
            },
        }
    }
    Ok(outcomes)
}

impl DieselTableStore {
    async fn snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
        upsert: bool,
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| TableStoreError::connection(err.to_string()))?;

        conn.transaction::<_, DieselError, _>(|conn| {
            write_snapshot(conn, entity, records, upsert).scope_boxed()
        })
        .await
        .map_err(|err| map_store_error(&err))
    }
}

#[async_trait]
impl TableStore for DieselTableStore {
    async fn clear(&self, entity: EntityKind) -> Result<ClearPath, TableStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| TableStoreError::connection(err.to_string()))?;

        let table = entity.table();
        let truncate = diesel::sql_query(format!("TRUNCATE TABLE {table} RESTART IDENTITY"))
            .execute(&mut conn)
            .await;

        let truncate_error = match truncate {
            Ok(_) => return Ok(ClearPath::Truncate),
            Err(error) => error,
        };

        tracing::warn!(
            table,
            error = %truncate_error,
            "truncate refused, falling back to row delete"
        );

        diesel::sql_query(format!("DELETE FROM {table}"))
            .execute(&mut conn)
            .await
            .map_err(|err| map_store_error(&err))?;

        // Sequence reset is best effort; tables keyed by imported natural
        // keys may carry no serial sequence at all.
        let key = entity.key_field();
        let reset = diesel::sql_query(format!(
            "SELECT setval(pg_get_serial_sequence('{table}', '{key}'), 1, false)"
        ))
        .execute(&mut conn)
        .await;
        if let Err(error) = reset {
            tracing::debug!(table, error = %error, "sequence reset skipped");
        }

        Ok(ClearPath::DeleteRows)
    }

    async fn insert_snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        self.snapshot(entity, records, false).await
    }

    async fn upsert_snapshot(
        &self,
        entity: EntityKind,
        records: &[ValidRecord],
    ) -> Result<Vec<RowOutcome>, TableStoreError> {
        self.snapshot(entity, records, true).await
    }

    async fn list(&self, entity: EntityKind) -> Result<Vec<ValidRecord>, TableStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| TableStoreError::connection(err.to_string()))?;

        let records = match entity {
            EntityKind::AccUsers => acc_users::table
                .order(acc_users::id.asc())
                .load::<AccUserRow>(&mut conn)
                .await
                .map_err(|err| map_store_error(&err))?
                .into_iter()
                .map(|row| ValidRecord::AccUser(row.into()))
                .collect(),
            EntityKind::Items => tb_item_master::table
                .order(tb_item_master::item_code.asc())
                .load::<ItemRow>(&mut conn)
                .await
                .map_err(|err| map_store_error(&err))?
                .into_iter()
                .map(|row| ValidRecord::Item(row.into()))
                .collect(),
            EntityKind::Bills => dine_bill::table
                .order(dine_bill::billno.asc())
                .load::<BillRow>(&mut conn)
                .await
                .map_err(|err| map_store_error(&err))?
                .into_iter()
                .map(|row| ValidRecord::Bill(row.into()))
                .collect(),
            EntityKind::BillsMonth => dine_bill_month::table
                .order(dine_bill_month::billno.asc())
                .load::<BillMonthRow>(&mut conn)
                .await
                .map_err(|err| map_store_error(&err))?
                .into_iter()
                .map(|row| ValidRecord::Bill(row.into()))
                .collect(),
            EntityKind::KotSales => dine_kot_sales_detail::table
                .order(dine_kot_sales_detail::slno.asc())
                .load::<KotSaleRow>(&mut conn)
                .await
                .map_err(|err| map_store_error(&err))?
                .into_iter()
                .map(|row| ValidRecord::KotSale(row.into()))
                .collect(),
            EntityKind::CancelledBills => cancelled_bills::table
                .order(cancelled_bills::billno.asc())
                .load::<CancelledBillRow>(&mut conn)
                .await
                .map_err(|err| map_store_error(&err))?
                .into_iter()
                .map(|row| ValidRecord::Cancelled(row.into()))
                .collect(),
        };

        Ok(records)
    }
}
