// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repeating-student batch queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{RepeatingStudentBatch, StudentId};

use crate::diesel_schema::repeating_student_batches;
use crate::error::PersistenceError;

/// Diesel Queryable struct for batch rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = repeating_student_batches)]
struct BatchRow {
    batch_id: i64,
    semester_id: i64,
    students_json: String,
    recorded_at: String,
}

impl BatchRow {
    fn into_domain(self) -> Result<RepeatingStudentBatch, PersistenceError> {
        let student_ids: Vec<i64> = serde_json::from_str(&self.students_json)?;

        Ok(RepeatingStudentBatch {
            batch_id: Some(self.batch_id),
            semester_id: self.semester_id,
            students: student_ids.into_iter().map(StudentId::new).collect(),
            recorded_at: self.recorded_at,
        })
    }
}

/// Lists all batches of a semester in insertion order.
///
/// # Errors
///
/// Returns an error if the query or deserialization fails.
pub fn list_batches_by_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Vec<RepeatingStudentBatch>, PersistenceError> {
    repeating_student_batches::table
        .filter(repeating_student_batches::semester_id.eq(semester_id))
        .order(repeating_student_batches::batch_id.asc())
        .select(BatchRow::as_select())
        .load::<BatchRow>(conn)?
        .into_iter()
        .map(BatchRow::into_domain)
        .collect()
}
