//! One-time schema setup and the readiness check that gates checkout.

use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::MigrationHarness;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::readiness::{Readiness, StoreStatus};
use crate::MIGRATIONS;

/// Value of `PRAGMA user_version` once the schema exists.
pub const SCHEMA_VERSION: i32 = 1;

const CREATE_ORDER_LINES: &str =
    include_str!("../../migrations/2025-10-01-000000_create_order_lines/up.sql");

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

#[derive(QueryableByName)]
struct TableCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

pub fn schema_version(conn: &mut SqliteConnection) -> Result<i32, DomainError> {
    let row: UserVersion = sql_query("PRAGMA user_version").get_result(conn)?;
    Ok(row.user_version)
}

/// Version 0 runs the embedded migrations and stamps [`SCHEMA_VERSION`];
/// anything at or above it is left alone.
pub fn migrate_if_needed(conn: &mut SqliteConnection) -> Result<(), DomainError> {
    let current = schema_version(conn)?;
    if current >= SCHEMA_VERSION {
        log::debug!("Local store is up to date (version {})", current);
        return Ok(());
    }

    log::info!("Migrating local store from version {}", current);
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DomainError::Storage(format!("migration failed: {e}")))?;
    conn.batch_execute(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
    log::info!("Local store migrated to version {}", SCHEMA_VERSION);
    Ok(())
}

fn table_exists(conn: &mut SqliteConnection, name: &str) -> Result<bool, DomainError> {
    let row: TableCount = sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(name)
    .get_result(conn)?;
    Ok(row.count > 0)
}

fn probe(pool: &DbPool) -> Result<(), DomainError> {
    let mut conn = pool.get()?;
    diesel::select(sql::<Integer>("1")).get_result::<i32>(&mut conn)?;

    if table_exists(&mut conn, "order_lines")? {
        return Ok(());
    }

    log::warn!("order_lines table missing, recreating it");
    conn.batch_execute(CREATE_ORDER_LINES)?;
    if table_exists(&mut conn, "order_lines")? {
        Ok(())
    } else {
        Err(DomainError::Storage("order_lines table could not be created".to_string()))
    }
}

/// Checks the connection and the order table once, then publishes the result.
pub fn check_readiness(pool: &DbPool, readiness: &Readiness) -> StoreStatus {
    let status = match probe(pool) {
        Ok(()) => StoreStatus::Ready,
        Err(e) => {
            log::error!("Local store is not ready: {}", e);
            StoreStatus::Unready
        }
    };
    readiness.set(status);
    status
}

/// Runs migrations, then the readiness check. Never fails: a broken store
/// comes back as [`StoreStatus::Unready`] so the caller can retry later.
pub fn initialize(pool: &DbPool, readiness: &Readiness) -> StoreStatus {
    let migrated = pool
        .get()
        .map_err(DomainError::from)
        .and_then(|mut conn| migrate_if_needed(&mut conn));
    if let Err(e) = migrated {
        log::error!("Database migration error: {}", e);
    }
    check_readiness(pool, readiness)
}
