// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{NextSectionAssignment, Semester, StudentId};
use std::collections::HashSet;

/// Validates that a school year is a reasonable calendar year.
///
/// # Arguments
///
/// * `year` - The year to validate
///
/// # Returns
///
/// * `Ok(())` if the year is valid
/// * `Err(DomainError::InvalidYear)` if the year is invalid
///
/// # Errors
///
/// Returns an error if the year is not a reasonable calendar year (1900-2200).
pub fn validate_semester_year(year: u16) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&year) {
        return Err(DomainError::InvalidYear(format!(
            "School year must be between 1900 and 2200, got {year}"
        )));
    }
    Ok(())
}

/// Validates that a `(year, ordinal)` term key is unique among semesters.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `year` - The school year of the candidate semester
/// * `ordinal` - The ordinal of the candidate semester
/// * `existing` - The semesters already in the store
///
/// # Returns
///
/// * `Ok(())` if no existing semester carries the term key
/// * `Err(DomainError::DuplicateSemester)` otherwise
///
/// # Errors
///
/// Returns an error if the term key is already in use.
pub fn validate_term_unique(
    year: u16,
    ordinal: u8,
    existing: &[Semester],
) -> Result<(), DomainError> {
    if existing
        .iter()
        .any(|semester| semester.term_key() == (year, ordinal))
    {
        return Err(DomainError::DuplicateSemester { year, ordinal });
    }
    Ok(())
}

/// Validates that the repeat and advance lists partition the students.
///
/// A student may appear in at most one of the two lists; any overlap makes
/// the promotion ambiguous and the whole call must be rejected before any
/// write.
///
/// # Arguments
///
/// * `students_repeat` - The students marked to repeat their section
/// * `students_advance` - The explicit next-section assignments
///
/// # Returns
///
/// * `Ok(())` if the lists are disjoint
/// * `Err(DomainError::AmbiguousPromotion)` naming the first overlapping student
///
/// # Errors
///
/// Returns an error if a student appears in both lists.
pub fn validate_promotion_partition(
    students_repeat: &[StudentId],
    students_advance: &[NextSectionAssignment],
) -> Result<(), DomainError> {
    let repeating: HashSet<StudentId> = students_repeat.iter().copied().collect();

    for assignment in students_advance {
        if repeating.contains(&assignment.student_id) {
            return Err(DomainError::AmbiguousPromotion {
                student_id: assignment.student_id,
            });
        }
    }
    Ok(())
}
