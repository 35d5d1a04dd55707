//! PostgreSQL adapters using Diesel with `diesel-async` and `bb8` pooling.
//!
//! The adapters only translate between database rows and domain types; no
//! question-answering logic lives here.
//!
//! # Example
//!
//! ```ignore
//! use sqlqa::outbound::persistence::{DbPool, DieselViewDatabase, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/reporting")).await?;
//! let view = DieselViewDatabase::new(pool, vec!["MyAiView".to_owned()], timeout);
//! ```

mod diesel_view_database;
mod pool;

pub use diesel_view_database::{DieselViewDatabase, SAMPLE_ROWS};
pub use pool::{DbPool, PoolConfig, PoolError};
