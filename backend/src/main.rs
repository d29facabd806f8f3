//! Service entry-point: CLI parsing, tracing, pool setup, server start.

use std::net::SocketAddr;

use actix_web::web;
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::{ReplaceMode, SyncPolicy};
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{ServerConfig, create_server};

/// Replace-mode choice exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Clear the table, then insert the snapshot.
    FullReplace,
    /// Update matching rows by key, insert the rest.
    UpsertByKey,
}

impl From<ModeArg> for ReplaceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FullReplace => Self::FullReplace,
            ModeArg::UpsertByKey => Self::UpsertByKey,
        }
    }
}

/// POS table snapshot synchronization service.
#[derive(Debug, Parser)]
#[command(name = "pos-sync", version, about)]
struct Cli {
    /// Socket address to bind the HTTP server to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL. Without it the server runs on the
    /// in-memory store (development only).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum connections in the database pool.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    db_pool_size: u32,

    /// Replace mode for the acc_users resource.
    #[arg(long, value_enum, env = "ACC_USERS_MODE", default_value = "full-replace")]
    acc_users_mode: ModeArg,

    /// Replace mode for the items resource.
    #[arg(long, value_enum, env = "ITEMS_MODE", default_value = "full-replace")]
    items_mode: ModeArg,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let cli = Cli::parse();

    let policy = SyncPolicy::default()
        .with_acc_users_mode(cli.acc_users_mode.into())
        .with_items_mode(cli.items_mode.into());

    let mut config = ServerConfig::new(cli.bind_addr).with_policy(policy);
    match cli.database_url {
        Some(url) => {
            let pool_config = PoolConfig::new(url).with_max_size(cli.db_pool_size);
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|error| std::io::Error::other(error.to_string()))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database url configured, using the in-memory store"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
