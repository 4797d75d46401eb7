// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Semester mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{Ordinal, Semester, SemesterStatus};
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::semesters;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a new semester row.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `semester` - The semester draft to insert
///
/// # Returns
///
/// The semester with its database-assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails (including a `(year, ordinal)`
/// uniqueness violation surfaced by the schema).
pub fn insert_semester(
    conn: &mut SqliteConnection,
    semester: &Semester,
) -> Result<Semester, PersistenceError> {
    diesel::insert_into(semesters::table)
        .values((
            semesters::year.eq(i32::from(semester.year())),
            semesters::ordinal.eq(i32::from(semester.ordinal().value())),
            semesters::status.eq(semester.status.as_str()),
        ))
        .execute(conn)?;

    let semester_id: i64 = last_insert_rowid(conn)?;
    debug!(semester_id, "Inserted semester");

    Ok(Semester::with_id(
        semester_id,
        semester.year(),
        semester.ordinal(),
        semester.status,
    ))
}

/// Rewrites the term key of a semester.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `semester_id` - The semester to update
/// * `year` - The new school year
/// * `ordinal` - The new ordinal
///
/// # Returns
///
/// The semester as stored after the update.
///
/// # Errors
///
/// Returns `NotFound` if no row was updated.
pub fn update_semester_term(
    conn: &mut SqliteConnection,
    semester_id: i64,
    year: u16,
    ordinal: Ordinal,
) -> Result<Semester, PersistenceError> {
    let affected: usize = diesel::update(semesters::table.find(semester_id))
        .set((
            semesters::year.eq(i32::from(year)),
            semesters::ordinal.eq(i32::from(ordinal.value())),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "semester {semester_id}"
        )));
    }

    queries::semesters::get_semester(conn, semester_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("semester {semester_id}")))
}

/// Overwrites the status of a semester as a single atomic row update.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `semester_id` - The semester to update
/// * `status` - The new status
///
/// # Errors
///
/// Returns `NotFound` if no row was updated.
pub fn update_semester_status(
    conn: &mut SqliteConnection,
    semester_id: i64,
    status: SemesterStatus,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(semesters::table.find(semester_id))
        .set(semesters::status.eq(status.as_str()))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "semester {semester_id}"
        )));
    }

    debug!(semester_id, status = %status, "Updated semester status");
    Ok(())
}
