// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog and roster mutations.
//!
//! The course catalog and the student roster are owned by sibling services;
//! this module maintains their local read models. The only write the
//! lifecycle itself performs here is `update_student_section`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{SectionId, StudentId};
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::{courses, sections, students, subjects};
use crate::error::PersistenceError;

/// Inserts a course.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_course(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(courses::table)
        .values(courses::name.eq(name))
        .execute(conn)?;
    last_insert_rowid(conn)
}

/// Inserts a section into a course.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_section(
    conn: &mut SqliteConnection,
    course_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sections::table)
        .values((sections::course_id.eq(course_id), sections::name.eq(name)))
        .execute(conn)?;
    last_insert_rowid(conn)
}

/// Inserts a subject into a course.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_subject(
    conn: &mut SqliteConnection,
    course_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(subjects::table)
        .values((subjects::course_id.eq(course_id), subjects::name.eq(name)))
        .execute(conn)?;
    last_insert_rowid(conn)
}

/// Inserts a student assigned to a section.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_student(
    conn: &mut SqliteConnection,
    name: &str,
    section_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(students::table)
        .values((students::name.eq(name), students::section_id.eq(section_id)))
        .execute(conn)?;
    last_insert_rowid(conn)
}

/// Points a student at a new section.
///
/// This is the single roster write the promotion delegates.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `student_id` - The student to move
/// * `section_id` - The section to move the student into
///
/// # Errors
///
/// Returns `NotFound` if the student does not exist.
pub fn update_student_section(
    conn: &mut SqliteConnection,
    student_id: StudentId,
    section_id: SectionId,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(students::table.find(student_id.value()))
        .set(students::section_id.eq(section_id.value()))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "student {}",
            student_id.value()
        )));
    }

    debug!(
        student_id = student_id.value(),
        section_id = section_id.value(),
        "Moved student to new section"
    );
    Ok(())
}
