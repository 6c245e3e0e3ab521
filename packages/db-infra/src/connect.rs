use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::{conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

/// Connect to the database described by (env, kind, owner).
/// This function does NOT run any migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = conn_spec(env, kind, owner)?;

    let mut opt = ConnectOptions::new(&url);
    opt.acquire_timeout(Duration::from_secs(5));

    // A pooled in-memory SQLite database is one database per connection;
    // pin the pool to a single connection so every query sees the same data.
    if matches!(kind, DbKind::SqliteMemory) {
        opt.min_connections(1).max_connections(1);
    }

    Database::connect(opt).await.map_err(DbInfraError::Connect)
}

/// Single entrypoint used at startup and in tests: connect + migrate.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let conn = connect_db(env, kind, owner).await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(DbInfraError::Migrate)?;

    info!("database bootstrapped (env={env:?}, kind={kind:?})");
    Ok(conn)
}
