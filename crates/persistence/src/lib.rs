// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Scolaris school administration system.
//!
//! This crate provides database persistence for the semester lifecycle:
//! semesters, modules, the promotion status flag, repeating-student batches,
//! audit events, and the local read models of the course catalog and the
//! student roster. It is built on Diesel over `SQLite`.
//!
//! Every lifecycle port defined in the core crate has exactly one
//! Diesel-backed implementation here; [`Persistence::lifecycle`] wires all
//! of them to one shared connection.
//!
//! ## Testing Philosophy
//!
//! - Standard tests run against unique in-memory databases
//! - In-memory database names come from an atomic counter, not timestamps,
//!   so test isolation is deterministic
//! - Tests fail fast if foreign key enforcement is missing

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use scolaris::SemesterLifecycle;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod stores;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use stores::{
    SqlAuditTrail, SqlCourseCatalog, SqlModuleStore, SqlPromotionStatusStore,
    SqlRepeatingStudentStore, SqlSemesterStore, SqlStudentRoster,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over one shared `SQLite` connection.
///
/// Hands out the Diesel-backed implementations of every lifecycle port.
/// All handles clone the same `Arc<Mutex<..>>`, so writes are serialized at
/// the connection.
pub struct Persistence {
    pub(crate) conn: Arc<Mutex<SqliteConnection>>,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via an atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_scolaris_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::open_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::Initialization("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::open_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Hands out a semester store bound to this database.
    #[must_use]
    pub fn semester_store(&self) -> SqlSemesterStore {
        SqlSemesterStore::new(Arc::clone(&self.conn))
    }

    /// Hands out a module store bound to this database.
    #[must_use]
    pub fn module_store(&self) -> SqlModuleStore {
        SqlModuleStore::new(Arc::clone(&self.conn))
    }

    /// Hands out a promotion status store bound to this database.
    #[must_use]
    pub fn promotion_status_store(&self) -> SqlPromotionStatusStore {
        SqlPromotionStatusStore::new(Arc::clone(&self.conn))
    }

    /// Hands out a repeating-student store bound to this database.
    #[must_use]
    pub fn repeating_student_store(&self) -> SqlRepeatingStudentStore {
        SqlRepeatingStudentStore::new(Arc::clone(&self.conn))
    }

    /// Hands out a course catalog view bound to this database.
    #[must_use]
    pub fn course_catalog(&self) -> SqlCourseCatalog {
        SqlCourseCatalog::new(Arc::clone(&self.conn))
    }

    /// Hands out a student roster bound to this database.
    #[must_use]
    pub fn student_roster(&self) -> SqlStudentRoster {
        SqlStudentRoster::new(Arc::clone(&self.conn))
    }

    /// Hands out an audit trail bound to this database.
    #[must_use]
    pub fn audit_trail(&self) -> SqlAuditTrail {
        SqlAuditTrail::new(Arc::clone(&self.conn))
    }

    /// Builds a [`SemesterLifecycle`] with every port bound to this database.
    #[must_use]
    pub fn lifecycle(&self) -> SemesterLifecycle {
        SemesterLifecycle::new(
            Box::new(self.semester_store()),
            Box::new(self.module_store()),
            Box::new(self.promotion_status_store()),
            Box::new(self.repeating_student_store()),
            Box::new(self.course_catalog()),
            Box::new(self.student_roster()),
            Box::new(self.audit_trail()),
        )
    }
}
