//! Persistence adapters implementing the table store port.

pub mod diesel_table_store;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_table_store::DieselTableStore;
pub use memory::MemoryTableStore;
pub use pool::{DbPool, PoolConfig, PoolError};
