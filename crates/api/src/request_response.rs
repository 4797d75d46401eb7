// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! These are distinct from domain types and represent the API contract.

use scolaris::{FailedReassignment, FinishResult, InitResult};
use scolaris_domain::{Module, RepeatingStudentBatch, Semester, StudentId};
use serde::{Deserialize, Serialize};

/// Serializable representation of a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterResponse {
    /// The canonical semester id.
    pub semester_id: i64,
    /// The school year.
    pub year: u16,
    /// The ordinal within the year (1 or 2).
    pub ordinal: u8,
    /// The lifecycle status.
    pub status: String,
}

impl SemesterResponse {
    /// Converts a domain semester into its API shape.
    #[must_use]
    pub fn from_domain(semester: &Semester) -> Self {
        Self {
            semester_id: semester.semester_id().unwrap_or_default(),
            year: semester.year(),
            ordinal: semester.ordinal().value(),
            status: semester.status.as_str().to_string(),
        }
    }
}

/// Serializable representation of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleResponse {
    /// The canonical module id.
    pub module_id: i64,
    /// The semester the module belongs to.
    pub semester_id: i64,
    /// The section half of the pair.
    pub section_id: i64,
    /// The subject half of the pair.
    pub subject_id: i64,
    /// Whether grading for the module is finished.
    pub finished: bool,
}

impl ModuleResponse {
    /// Converts a domain module into its API shape.
    #[must_use]
    pub fn from_domain(module: &Module) -> Self {
        Self {
            module_id: module.module_id.unwrap_or_default(),
            semester_id: module.semester_id,
            section_id: module.section_id.value(),
            subject_id: module.subject_id.value(),
            finished: module.finished,
        }
    }
}

/// API request to create a new semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSemesterRequest {
    /// The school year (e.g., 2026).
    pub year: u16,
    /// The ordinal within the year (1 or 2).
    pub ordinal: u8,
}

/// API request to correct a semester's term key before activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSemesterRequest {
    /// The new school year.
    pub year: u16,
    /// The new ordinal.
    pub ordinal: u8,
}

/// API response for a successful semester initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitSemesterResponse {
    /// The activated semester.
    pub semester: SemesterResponse,
    /// The modules inserted by this call (gap fills only on re-runs).
    pub inserted_modules: Vec<ModuleResponse>,
    /// The audit event id, when the append succeeded.
    pub event_id: Option<i64>,
}

impl InitSemesterResponse {
    /// Converts a core init result into its API shape.
    #[must_use]
    pub fn from_result(result: &InitResult) -> Self {
        Self {
            semester: SemesterResponse::from_domain(&result.semester),
            inserted_modules: result
                .inserted_modules
                .iter()
                .map(ModuleResponse::from_domain)
                .collect(),
            event_id: result.audit_event.event_id,
        }
    }
}

/// One explicit student-to-next-section mapping in a finish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceEntry {
    /// The student being advanced.
    pub student_id: i64,
    /// The section the student advances into.
    pub next_section_id: i64,
}

/// API request to finish the active semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishSemesterRequest {
    /// The students marked to repeat their section.
    pub students_repeat: Vec<i64>,
    /// The explicit next-section assignments.
    pub students_advance: Vec<AdvanceEntry>,
}

/// One reassignment that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    /// The student whose reassignment failed.
    pub student_id: i64,
    /// Why the reassignment failed.
    pub reason: String,
}

/// API response for a completed finish-semester call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishSemesterResponse {
    /// The finished semester, now used.
    pub semester: SemesterResponse,
    /// The id of the repeating-student batch recorded by this call, if any.
    pub batch_id: Option<i64>,
    /// The students whose section pointer was moved.
    pub moved: Vec<i64>,
    /// The reassignments that could not be applied; retry exactly these.
    pub failed: Vec<FailedEntry>,
    /// The audit event id, when the append succeeded.
    pub event_id: Option<i64>,
}

impl FinishSemesterResponse {
    /// Converts a core finish result into its API shape.
    #[must_use]
    pub fn from_result(result: &FinishResult) -> Self {
        Self {
            semester: SemesterResponse::from_domain(&result.semester),
            batch_id: result.batch.as_ref().and_then(|batch| batch.batch_id),
            moved: result.moved.iter().map(StudentId::value).collect(),
            failed: result
                .failed
                .iter()
                .map(|failure: &FailedReassignment| FailedEntry {
                    student_id: failure.student_id.value(),
                    reason: failure.reason.clone(),
                })
                .collect(),
            event_id: result.audit_event.event_id,
        }
    }
}

/// API response for an interrupted finish process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptResponse {
    /// The audit event id, when the append succeeded.
    pub event_id: Option<i64>,
}

/// Serializable representation of a repeating-student batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingBatchResponse {
    /// The canonical batch id.
    pub batch_id: i64,
    /// The semester the batch belongs to.
    pub semester_id: i64,
    /// The students marked to repeat.
    pub students: Vec<i64>,
    /// When the batch was recorded (ISO 8601).
    pub recorded_at: String,
}

impl RepeatingBatchResponse {
    /// Converts a domain batch into its API shape.
    #[must_use]
    pub fn from_domain(batch: &RepeatingStudentBatch) -> Self {
        Self {
            batch_id: batch.batch_id.unwrap_or_default(),
            semester_id: batch.semester_id,
            students: batch.students.iter().map(StudentId::value).collect(),
            recorded_at: batch.recorded_at.clone(),
        }
    }
}
