//! HTTP inbound adapter exposing the sync REST endpoints.

pub mod dto;
pub mod error;
pub mod health;
pub mod resources;
pub mod state;

pub use error::ApiResult;
