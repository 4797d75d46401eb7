// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel-backed implementations of the lifecycle ports.
//!
//! Every store holds a cloned handle to the shared connection; the mutex
//! gives the single-writer-at-a-time discipline the promotion flag and the
//! single-active-semester invariant require.

use diesel::SqliteConnection;
use scolaris::{
    AuditTrail, CourseCatalog, ModuleStore, PromotionStatusStore, RepeatingStudentStore,
    SemesterStore, StoreError, StudentRoster,
};
use scolaris_audit::AuditEvent;
use scolaris_domain::{
    Module, Ordinal, PromotionStatus, RepeatingStudentBatch, Section, SectionId,
    SectionSubjectPair, Semester, SemesterStatus, StudentId,
};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// Translates persistence failures into the port error vocabulary.
fn to_store_error(err: PersistenceError) -> StoreError {
    match err {
        PersistenceError::NotFound(msg) => StoreError::NotFound(msg),
        PersistenceError::Connection(msg) => StoreError::Unavailable(msg),
        other => StoreError::Backend(other.to_string()),
    }
}

/// Locks the shared connection, surfacing poisoning as a backend failure.
fn lock(
    conn: &Arc<Mutex<SqliteConnection>>,
) -> Result<MutexGuard<'_, SqliteConnection>, StoreError> {
    conn.lock()
        .map_err(|_| to_store_error(PersistenceError::Poisoned))
}

/// Diesel-backed [`SemesterStore`].
pub struct SqlSemesterStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlSemesterStore {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl SemesterStore for SqlSemesterStore {
    fn semester(&mut self, semester_id: i64) -> Result<Option<Semester>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::semesters::get_semester(&mut conn, semester_id).map_err(to_store_error)
    }

    fn active_semester(&mut self) -> Result<Option<Semester>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::semesters::get_active_semester(&mut conn).map_err(to_store_error)
    }

    fn list(&mut self) -> Result<Vec<Semester>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::semesters::list_semesters(&mut conn).map_err(to_store_error)
    }

    fn list_by_year(&mut self, year: u16) -> Result<Vec<Semester>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::semesters::list_semesters_by_year(&mut conn, year).map_err(to_store_error)
    }

    fn insert(&mut self, semester: &Semester) -> Result<Semester, StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::semesters::insert_semester(&mut conn, semester).map_err(to_store_error)
    }

    fn update_term(
        &mut self,
        semester_id: i64,
        year: u16,
        ordinal: Ordinal,
    ) -> Result<Semester, StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::semesters::update_semester_term(&mut conn, semester_id, year, ordinal)
            .map_err(to_store_error)
    }

    fn update_status(
        &mut self,
        semester_id: i64,
        status: SemesterStatus,
    ) -> Result<(), StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::semesters::update_semester_status(&mut conn, semester_id, status)
            .map_err(to_store_error)
    }
}

/// Diesel-backed [`ModuleStore`].
pub struct SqlModuleStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlModuleStore {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl ModuleStore for SqlModuleStore {
    fn pairs_for_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<SectionSubjectPair>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::modules::pairs_for_semester(&mut conn, semester_id).map_err(to_store_error)
    }

    fn insert_modules(&mut self, drafts: &[Module]) -> Result<Vec<Module>, StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::modules::insert_modules(&mut conn, drafts).map_err(to_store_error)
    }
}

/// Diesel-backed [`PromotionStatusStore`].
pub struct SqlPromotionStatusStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlPromotionStatusStore {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl PromotionStatusStore for SqlPromotionStatusStore {
    fn get(&mut self) -> Result<PromotionStatus, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::promotion::get_promotion_status(&mut conn).map_err(to_store_error)
    }

    fn set(&mut self, status: PromotionStatus) -> Result<(), StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::promotion::set_promotion_status(&mut conn, status).map_err(to_store_error)
    }
}

/// Diesel-backed [`RepeatingStudentStore`].
pub struct SqlRepeatingStudentStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlRepeatingStudentStore {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl RepeatingStudentStore for SqlRepeatingStudentStore {
    fn record(
        &mut self,
        batch: &RepeatingStudentBatch,
    ) -> Result<RepeatingStudentBatch, StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::repeating::insert_batch(&mut conn, batch).map_err(to_store_error)
    }

    fn list_by_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<RepeatingStudentBatch>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::repeating::list_batches_by_semester(&mut conn, semester_id)
            .map_err(to_store_error)
    }
}

/// Diesel-backed [`CourseCatalog`] over the local catalog read model.
pub struct SqlCourseCatalog {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlCourseCatalog {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl CourseCatalog for SqlCourseCatalog {
    fn section_subject_pairs(&mut self) -> Result<Vec<SectionSubjectPair>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::catalog::section_subject_pairs(&mut conn).map_err(to_store_error)
    }

    fn sections(&mut self) -> Result<Vec<Section>, StoreError> {
        let mut conn = lock(&self.conn)?;
        queries::catalog::list_sections(&mut conn).map_err(to_store_error)
    }
}

/// Diesel-backed [`StudentRoster`] over the local roster read model.
pub struct SqlStudentRoster {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlStudentRoster {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl StudentRoster for SqlStudentRoster {
    fn set_student_section(
        &mut self,
        student_id: StudentId,
        section_id: SectionId,
    ) -> Result<(), StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::catalog::update_student_section(&mut conn, student_id, section_id)
            .map_err(to_store_error)
    }
}

/// Diesel-backed [`AuditTrail`].
pub struct SqlAuditTrail {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlAuditTrail {
    pub(crate) const fn new(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }
}

impl AuditTrail for SqlAuditTrail {
    fn append(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        let mut conn = lock(&self.conn)?;
        mutations::audit::persist_audit_event(&mut conn, event).map_err(to_store_error)
    }
}
