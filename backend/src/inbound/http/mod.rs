//! HTTP inbound adapter exposing the question endpoint and probes.

pub mod auth;
pub mod error;
pub mod health;
pub mod sql;
pub mod state;

pub use crate::domain::ApiResult;
