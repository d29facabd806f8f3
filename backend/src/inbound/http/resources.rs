//! Sync resource handlers.
//!
//! ```text
//! POST /api/<resource>/   sync a full snapshot of one table
//! GET  /api/<resource>/   list the table's current content
//! ```
//!
//! All six resources share one contract; each handler pins its
//! [`EntityKind`] and delegates to the driving ports. The body of a `POST`
//! is a JSON array of records (a bare object is accepted for `acc_users`
//! only). No authentication happens here; that belongs to the surrounding
//! platform.

use actix_web::{get, post, web};
use serde_json::Value;

use crate::domain::EntityKind;
use crate::inbound::http::dto::{ListResponse, SyncResponse};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

async fn sync_resource(
    state: &HttpState,
    entity: EntityKind,
    payload: Value,
) -> ApiResult<web::Json<SyncResponse>> {
    let report = state.sync.sync_snapshot(entity, payload).await?;
    Ok(web::Json(SyncResponse::from(report)))
}

async fn list_resource(
    state: &HttpState,
    entity: EntityKind,
) -> ApiResult<web::Json<ListResponse>> {
    let data = state.query.list_records(entity).await?;
    Ok(web::Json(ListResponse::new(data)))
}

/// Sync the terminal's account users table.
#[post("/acc_users/")]
pub async fn sync_acc_users(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SyncResponse>> {
    sync_resource(&state, EntityKind::AccUsers, payload.into_inner()).await
}

/// List account users.
#[get("/acc_users/")]
pub async fn list_acc_users(state: web::Data<HttpState>) -> ApiResult<web::Json<ListResponse>> {
    list_resource(&state, EntityKind::AccUsers).await
}

/// Sync the menu item master table.
#[post("/items/")]
pub async fn sync_items(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SyncResponse>> {
    sync_resource(&state, EntityKind::Items, payload.into_inner()).await
}

/// List menu items.
#[get("/items/")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<web::Json<ListResponse>> {
    list_resource(&state, EntityKind::Items).await
}

/// Sync the current bills table.
#[post("/bills/")]
pub async fn sync_bills(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SyncResponse>> {
    sync_resource(&state, EntityKind::Bills, payload.into_inner()).await
}

/// List current bills.
#[get("/bills/")]
pub async fn list_bills(state: web::Data<HttpState>) -> ApiResult<web::Json<ListResponse>> {
    list_resource(&state, EntityKind::Bills).await
}

/// Sync the monthly bill archive.
#[post("/bills_month/")]
pub async fn sync_bills_month(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SyncResponse>> {
    sync_resource(&state, EntityKind::BillsMonth, payload.into_inner()).await
}

/// List the monthly bill archive.
#[get("/bills_month/")]
pub async fn list_bills_month(state: web::Data<HttpState>) -> ApiResult<web::Json<ListResponse>> {
    list_resource(&state, EntityKind::BillsMonth).await
}

/// Sync kitchen-order-ticket sale lines.
#[post("/kot_sales/")]
pub async fn sync_kot_sales(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SyncResponse>> {
    sync_resource(&state, EntityKind::KotSales, payload.into_inner()).await
}

/// List kitchen-order-ticket sale lines.
#[get("/kot_sales/")]
pub async fn list_kot_sales(state: web::Data<HttpState>) -> ApiResult<web::Json<ListResponse>> {
    list_resource(&state, EntityKind::KotSales).await
}

/// Sync cancelled bill records.
#[post("/cancelled_bills/")]
pub async fn sync_cancelled_bills(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SyncResponse>> {
    sync_resource(&state, EntityKind::CancelledBills, payload.into_inner()).await
}

/// List cancelled bill records.
#[get("/cancelled_bills/")]
pub async fn list_cancelled_bills(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ListResponse>> {
    list_resource(&state, EntityKind::CancelledBills).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureSnapshotQuery, MockSnapshotSync};
    use crate::domain::{ReplaceMode, SyncReport, SyncStatus};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn sync_resource_maps_report_into_response() {
        let mut sync = MockSnapshotSync::new();
        sync.expect_sync_snapshot()
            .withf(|entity, payload| {
                *entity == EntityKind::Bills && payload.as_array().is_some_and(|a| a.len() == 1)
            })
            .times(1)
            .returning(|entity, _| {
                Ok(SyncReport {
                    entity,
                    mode: ReplaceMode::FullReplace,
                    status: SyncStatus::Success,
                    created: 1,
                    total_received: 1,
                    errors: Vec::new(),
                    clear_path: None,
                })
            });

        let state = HttpState::new(Arc::new(sync), Arc::new(FixtureSnapshotQuery));
        let response = sync_resource(
            &state,
            EntityKind::Bills,
            json!([{"billno": 1, "amount": "1"}]),
        )
        .await
        .expect("handler succeeds");

        assert_eq!(response.created, 1);
        assert_eq!(response.status, SyncStatus::Success);
    }
}
