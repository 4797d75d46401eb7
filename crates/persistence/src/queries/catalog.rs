// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog and roster queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{Section, SectionId, SectionSubjectPair, Student, StudentId, SubjectId};

use crate::diesel_schema::{sections, students, subjects};
use crate::error::PersistenceError;

/// Returns every `(section, subject)` pair currently anchored in the
/// catalog.
///
/// A section is paired with every subject taught by its course.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn section_subject_pairs(
    conn: &mut SqliteConnection,
) -> Result<Vec<SectionSubjectPair>, PersistenceError> {
    let rows: Vec<(i64, i64)> = sections::table
        .inner_join(subjects::table.on(subjects::course_id.eq(sections::course_id)))
        .select((sections::section_id, subjects::subject_id))
        .order((sections::section_id.asc(), subjects::subject_id.asc()))
        .load::<(i64, i64)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(section, subject)| {
            SectionSubjectPair::new(SectionId::new(section), SubjectId::new(subject))
        })
        .collect())
}

/// Lists all sections.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_sections(conn: &mut SqliteConnection) -> Result<Vec<Section>, PersistenceError> {
    let rows: Vec<(i64, i64, String)> = sections::table
        .select((sections::section_id, sections::course_id, sections::name))
        .order(sections::section_id.asc())
        .load::<(i64, i64, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(section_id, course_id, name)| Section {
            section_id: SectionId::new(section_id),
            course_id,
            name,
        })
        .collect())
}

/// Retrieves a student by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_student(
    conn: &mut SqliteConnection,
    student_id: StudentId,
) -> Result<Option<Student>, PersistenceError> {
    let row: Option<(i64, String, i64)> = students::table
        .find(student_id.value())
        .select((students::student_id, students::name, students::section_id))
        .first::<(i64, String, i64)>(conn)
        .optional()?;

    Ok(row.map(|(id, name, section_id)| Student {
        student_id: StudentId::new(id),
        name,
        section_id: SectionId::new(section_id),
    }))
}
