// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repeating-student batch mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{RepeatingStudentBatch, StudentId};
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::repeating_student_batches;
use crate::error::PersistenceError;

/// Appends one repeating-student batch.
///
/// Batches are append-only; there is no update or delete path.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `batch` - The batch to record
///
/// # Returns
///
/// The batch with its database-assigned id.
///
/// # Errors
///
/// Returns an error if the insert or serialization fails.
pub fn insert_batch(
    conn: &mut SqliteConnection,
    batch: &RepeatingStudentBatch,
) -> Result<RepeatingStudentBatch, PersistenceError> {
    let student_ids: Vec<i64> = batch.students.iter().map(StudentId::value).collect();
    let students_json: String = serde_json::to_string(&student_ids)?;

    diesel::insert_into(repeating_student_batches::table)
        .values((
            repeating_student_batches::semester_id.eq(batch.semester_id),
            repeating_student_batches::students_json.eq(students_json),
            repeating_student_batches::recorded_at.eq(&batch.recorded_at),
        ))
        .execute(conn)?;

    let batch_id: i64 = last_insert_rowid(conn)?;
    debug!(
        batch_id,
        semester_id = batch.semester_id,
        students = batch.students.len(),
        "Recorded repeating-student batch"
    );

    let mut recorded: RepeatingStudentBatch = batch.clone();
    recorded.batch_id = Some(batch_id);
    Ok(recorded)
}
