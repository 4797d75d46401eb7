// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Semester queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{Ordinal, Semester, SemesterStatus};
use std::str::FromStr;

use crate::diesel_schema::semesters;
use crate::error::PersistenceError;

/// Diesel Queryable struct for semester rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = semesters)]
struct SemesterRow {
    semester_id: i64,
    year: i32,
    ordinal: i32,
    status: String,
}

impl SemesterRow {
    /// Converts a raw row into a domain semester.
    ///
    /// A row the schema constraints would never admit (bad ordinal, unknown
    /// status) reads as a corrupt row, not a domain error.
    fn into_domain(self) -> Result<Semester, PersistenceError> {
        let year: u16 = u16::try_from(self.year).map_err(|_| {
            PersistenceError::CorruptRow(format!("semester year {}", self.year))
        })?;
        let ordinal_value: u8 = u8::try_from(self.ordinal).map_err(|_| {
            PersistenceError::CorruptRow(format!("semester ordinal {}", self.ordinal))
        })?;
        let ordinal: Ordinal = Ordinal::new(ordinal_value)
            .map_err(|err| PersistenceError::CorruptRow(format!("semester ordinal: {err}")))?;
        let status: SemesterStatus = SemesterStatus::from_str(&self.status)
            .map_err(|err| PersistenceError::CorruptRow(format!("semester status: {err}")))?;

        Ok(Semester::with_id(self.semester_id, year, ordinal, status))
    }
}

/// Retrieves a semester by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Option<Semester>, PersistenceError> {
    semesters::table
        .find(semester_id)
        .select(SemesterRow::as_select())
        .first::<SemesterRow>(conn)
        .optional()?
        .map(SemesterRow::into_domain)
        .transpose()
}

/// Retrieves the semester with status `Active`, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_active_semester(
    conn: &mut SqliteConnection,
) -> Result<Option<Semester>, PersistenceError> {
    semesters::table
        .filter(semesters::status.eq(SemesterStatus::Active.as_str()))
        .select(SemesterRow::as_select())
        .first::<SemesterRow>(conn)
        .optional()?
        .map(SemesterRow::into_domain)
        .transpose()
}

/// Lists all semesters ordered by `(year, ordinal)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_semesters(conn: &mut SqliteConnection) -> Result<Vec<Semester>, PersistenceError> {
    semesters::table
        .order((semesters::year.asc(), semesters::ordinal.asc()))
        .select(SemesterRow::as_select())
        .load::<SemesterRow>(conn)?
        .into_iter()
        .map(SemesterRow::into_domain)
        .collect()
}

/// Lists the semesters of one school year ordered by ordinal.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_semesters_by_year(
    conn: &mut SqliteConnection,
    year: u16,
) -> Result<Vec<Semester>, PersistenceError> {
    semesters::table
        .filter(semesters::year.eq(i32::from(year)))
        .order(semesters::ordinal.asc())
        .select(SemesterRow::as_select())
        .load::<SemesterRow>(conn)?
        .into_iter()
        .map(SemesterRow::into_domain)
        .collect()
}
