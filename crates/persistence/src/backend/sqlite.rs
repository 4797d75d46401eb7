// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection plumbing.
//!
//! Everything here is `SQLite`-specific: opening connections, applying the
//! embedded migrations, and the PRAGMA handshakes Diesel has no DSL for.
//! Domain queries and mutations stay backend-agnostic in `queries/` and
//! `mutations/`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// The embedded schema migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row shape of `PRAGMA foreign_keys`.
#[derive(QueryableByName)]
struct ForeignKeyPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Reads `last_insert_rowid()` after an insert.
///
/// `SQLite` cannot attach `RETURNING` to every statement shape, so inserts
/// fetch their assigned rowid in a second step.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Opens a connection, turns foreign keys on, and applies migrations.
///
/// # Arguments
///
/// * `database_url` - A file path or a `file:...?mode=memory` URL
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA, or a migration fails.
pub fn open_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // SQLite leaves foreign keys off unless every connection opts in.
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|err| PersistenceError::Initialization(err.to_string()))?;

    info!("Applying embedded migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| PersistenceError::Migration(err.to_string()))?;

    Ok(conn)
}

/// Confirms the connection actually enforces foreign keys.
///
/// The schema's referential constraints only hold when enforcement is on,
/// so startup refuses connections where the PRAGMA did not stick.
///
/// # Errors
///
/// Returns [`PersistenceError::ForeignKeysDisabled`] if enforcement is off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // PRAGMA has no Diesel DSL; raw SQL is the only route.
    let enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeyPragma>(conn)?
        .foreign_keys;

    if enabled == 0 {
        return Err(PersistenceError::ForeignKeysDisabled);
    }
    Ok(())
}

/// Switches a file-backed database into WAL journal mode.
///
/// WAL keeps readers unblocked during writes; it has no effect on the
/// in-memory databases tests use.
///
/// # Errors
///
/// Returns an error if the PRAGMA fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|err| PersistenceError::Initialization(err.to_string()))?;
    Ok(())
}
