// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API-level operations.
//!
//! Each function authorizes at the boundary, executes the corresponding
//! lifecycle operation, and maps the result into DTOs. Transport adapters
//! (HTTP, RPC) call these and never touch the core directly.

use scolaris::SemesterLifecycle;
use scolaris_audit::Cause;
use scolaris_domain::{NextSectionAssignment, SectionId, StudentId};
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{
    CreateSemesterRequest, FinishSemesterRequest, FinishSemesterResponse, InitSemesterResponse,
    InterruptResponse, RepeatingBatchResponse, SemesterResponse, UpdateSemesterRequest,
};

/// Lists all semesters ordered by term.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the store
/// cannot be read.
pub fn list_semesters(
    lifecycle: &mut SemesterLifecycle,
    actor: &AuthenticatedActor,
) -> Result<Vec<SemesterResponse>, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "ListSemesters")?;

    let semesters = lifecycle.list_semesters()?;
    Ok(semesters.iter().map(SemesterResponse::from_domain).collect())
}

/// Returns the currently active semester, if any.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the store
/// cannot be read.
pub fn current_semester(
    lifecycle: &mut SemesterLifecycle,
    actor: &AuthenticatedActor,
) -> Result<Option<SemesterResponse>, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "CurrentSemester")?;

    let current = lifecycle.current_semester()?;
    Ok(current.as_ref().map(SemesterResponse::from_domain))
}

/// Lists the semesters of one school year.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the store
/// cannot be read.
pub fn semesters_by_year(
    lifecycle: &mut SemesterLifecycle,
    actor: &AuthenticatedActor,
    year: u16,
) -> Result<Vec<SemesterResponse>, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "SemestersByYear")?;

    let semesters = lifecycle.semesters_by_year(year)?;
    Ok(semesters.iter().map(SemesterResponse::from_domain).collect())
}

/// Creates a new semester.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role, the term is
/// invalid, or the term key already exists.
pub fn create_semester(
    lifecycle: &mut SemesterLifecycle,
    request: &CreateSemesterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SemesterResponse, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "CreateSemester")?;

    info!(
        actor_id = %actor.id,
        year = request.year,
        ordinal = request.ordinal,
        "Creating semester"
    );

    let result = lifecycle.create_semester(
        request.year,
        request.ordinal,
        actor.to_audit_actor(),
        cause,
    )?;
    Ok(SemesterResponse::from_domain(&result.semester))
}

/// Corrects the term key of a not-yet-activated semester.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the semester
/// cannot be edited.
pub fn update_semester(
    lifecycle: &mut SemesterLifecycle,
    semester_id: i64,
    request: &UpdateSemesterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SemesterResponse, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "UpdateSemester")?;

    let result = lifecycle.update_semester(
        semester_id,
        request.year,
        request.ordinal,
        actor.to_audit_actor(),
        cause,
    )?;
    Ok(SemesterResponse::from_domain(&result.semester))
}

/// Initializes a semester: materializes modules and activates it.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the lifecycle
/// rejects the initialization.
pub fn init_semester(
    lifecycle: &mut SemesterLifecycle,
    semester_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<InitSemesterResponse, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "InitSemester")?;

    info!(actor_id = %actor.id, semester_id, "Initializing semester");

    let result = lifecycle.init_semester(semester_id, actor.to_audit_actor(), cause)?;
    Ok(InitSemesterResponse::from_result(&result))
}

/// Runs the end-of-semester promotion.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the lifecycle
/// rejects the promotion.
pub fn finish_semester(
    lifecycle: &mut SemesterLifecycle,
    request: &FinishSemesterRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FinishSemesterResponse, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "FinishSemester")?;

    info!(
        actor_id = %actor.id,
        repeating = request.students_repeat.len(),
        advancing = request.students_advance.len(),
        "Finishing semester"
    );

    let students_repeat: Vec<StudentId> = request
        .students_repeat
        .iter()
        .copied()
        .map(StudentId::new)
        .collect();
    let students_advance: Vec<NextSectionAssignment> = request
        .students_advance
        .iter()
        .map(|entry| NextSectionAssignment {
            student_id: StudentId::new(entry.student_id),
            next_section_id: SectionId::new(entry.next_section_id),
        })
        .collect();

    let result = lifecycle.finish_semester(
        actor.to_audit_actor(),
        cause,
        &students_repeat,
        &students_advance,
    )?;
    Ok(FinishSemesterResponse::from_result(&result))
}

/// Interrupts an in-flight finish process.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or no finish is
/// in flight.
pub fn interrupt_finish_semester(
    lifecycle: &mut SemesterLifecycle,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<InterruptResponse, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "InterruptFinishSemester")?;

    info!(actor_id = %actor.id, "Interrupting finish-semester process");

    let result = lifecycle.interrupt_finish_semester(actor.to_audit_actor(), cause)?;
    Ok(InterruptResponse {
        event_id: result.audit_event.event_id,
    })
}

/// Lists the repeating-student batches of a semester.
///
/// # Errors
///
/// Returns an error if the actor lacks the directive role or the semester
/// does not exist.
pub fn repeating_students(
    lifecycle: &mut SemesterLifecycle,
    semester_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Vec<RepeatingBatchResponse>, ApiError> {
    AuthorizationService::authorize_lifecycle(actor, "RepeatingStudents")?;

    let batches = lifecycle.repeating_students(semester_id)?;
    Ok(batches
        .iter()
        .map(RepeatingBatchResponse::from_domain)
        .collect())
}
