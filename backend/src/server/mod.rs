//! Server construction and endpoint wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::resources::{
    list_acc_users, list_bills, list_bills_month, list_cancelled_bills, list_items, list_kot_sales,
    sync_acc_users, sync_bills, sync_bills_month, sync_cancelled_bills, sync_items, sync_kot_sales,
};
use crate::inbound::http::state::HttpState;

/// Assemble the application with every sync resource and the health probes.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(sync_acc_users)
        .service(list_acc_users)
        .service(sync_items)
        .service(list_items)
        .service(sync_bills)
        .service(list_bills)
        .service(sync_bills_month)
        .service(list_bills_month)
        .service(sync_kot_sales)
        .service(list_kot_sales)
        .service(sync_cancelled_bills)
        .service(list_cancelled_bills);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server from the given configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
