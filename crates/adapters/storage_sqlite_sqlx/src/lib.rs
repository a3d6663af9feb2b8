//! # awaybot-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `BlobStore` port defined in `awaybot-app::ports::blob_store`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//!
//! ## Dependency rule
//! Depends on `awaybot-app` (for port traits).
//! The `app` and `domain` crates must never reference this adapter.

mod blob_store;
mod error;
mod pool;

pub use blob_store::SqliteBlobStore;
pub use error::StorageError;
pub use pool::{Config, Database};
