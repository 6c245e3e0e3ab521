//! Shared database configuration and connection infrastructure.
//! Used by the backend and the migration CLI.

pub mod config;
pub mod connect;
pub mod error;

pub use config::{conn_spec, DbKind, DbOwner, RuntimeEnv};
pub use connect::{bootstrap_db, connect_db};
pub use error::DbInfraError;
