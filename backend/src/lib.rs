//! Snapshot synchronization service for POS terminal tables.
//!
//! Terminals push full table snapshots over REST; the engine validates each
//! record, replaces or upserts the backing table, and reports per-record
//! failures without failing the batch. Layout follows a hexagonal split:
//! `domain` holds the engine and its ports, `inbound` the HTTP adapter,
//! `outbound` the storage adapters, and `server` the wiring.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
