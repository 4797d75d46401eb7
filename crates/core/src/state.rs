// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use scolaris_audit::AuditEvent;
use scolaris_domain::{Module, RepeatingStudentBatch, Semester, StudentId};

/// The result of creating a semester.
///
/// Lifecycle mutations are atomic at the record level: they either succeed
/// completely or fail without side effects, and every success carries the
/// audit event that recorded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    /// The created semester, with its assigned id.
    pub semester: Semester,
    /// The audit event recording this creation.
    pub audit_event: AuditEvent,
}

/// The result of updating a semester's term key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// The semester after the update.
    pub semester: Semester,
    /// The audit event recording this update.
    pub audit_event: AuditEvent,
}

/// The result of initializing a semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResult {
    /// The semester after activation.
    pub semester: Semester,
    /// The modules the materializer inserted during this call.
    ///
    /// Pairs that already had a module are not repeated here; re-running
    /// initialization on a partially initialized semester returns only the
    /// gaps it filled.
    pub inserted_modules: Vec<Module>,
    /// The audit event recording this initialization.
    pub audit_event: AuditEvent,
}

/// A student reassignment that could not be applied during promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedReassignment {
    /// The student whose reassignment failed.
    pub student_id: StudentId,
    /// Why the reassignment failed.
    pub reason: String,
}

/// The result of finishing a semester.
///
/// The overall call reports success even when individual reassignments
/// failed; `failed` lets the caller retry exactly those students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishResult {
    /// The finished semester, now `Used`.
    pub semester: Semester,
    /// The repeating-student batch recorded by this call, if one was.
    ///
    /// `None` when the repeat list was empty or when an identical batch
    /// from an interrupted earlier attempt was reused.
    pub batch: Option<RepeatingStudentBatch>,
    /// The students whose section pointer was moved.
    pub moved: Vec<StudentId>,
    /// The reassignments that could not be applied.
    pub failed: Vec<FailedReassignment>,
    /// The audit event recording this promotion.
    pub audit_event: AuditEvent,
}

/// The result of interrupting an in-flight finish process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptResult {
    /// The audit event recording the interruption.
    pub audit_event: AuditEvent,
}
