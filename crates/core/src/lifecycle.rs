// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The semester lifecycle orchestrator.
//!
//! All writes to `Semester.status` and to the promotion flag go through this
//! component. Each operation validates first, mutates second, and records an
//! audit event last; audit-append failures are logged and never fail the
//! primary operation.

use crate::error::{LifecycleError, StoreError};
use crate::materializer;
use crate::ports::{
    AuditTrail, CourseCatalog, ModuleStore, PromotionStatusStore, RepeatingStudentStore,
    SemesterStore, StudentRoster,
};
use crate::state::{
    CreateResult, FailedReassignment, FinishResult, InitResult, InterruptResult, UpdateResult,
};
use scolaris_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use scolaris_domain::{
    DomainError, Module, NextSectionAssignment, Ordinal, PromotionStatus, RepeatingStudentBatch,
    SectionId, SectionSubjectPair, Semester, SemesterStatus, StudentId,
    validate_promotion_partition, validate_semester_year, validate_term_unique,
};
use std::collections::HashSet;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

/// The semester lifecycle and promotion engine.
///
/// Owns the two pieces of global mutable state in this subsystem: the
/// single-active-semester invariant and the promotion flag. Storage and
/// collaborators are injected as ports so the transport and the database
/// remain adapter concerns.
pub struct SemesterLifecycle {
    semesters: Box<dyn SemesterStore + Send>,
    modules: Box<dyn ModuleStore + Send>,
    promotion: Box<dyn PromotionStatusStore + Send>,
    repeating: Box<dyn RepeatingStudentStore + Send>,
    catalog: Box<dyn CourseCatalog + Send>,
    roster: Box<dyn StudentRoster + Send>,
    audit: Box<dyn AuditTrail + Send>,
}

impl SemesterLifecycle {
    /// Creates a lifecycle engine over the given ports.
    #[must_use]
    pub fn new(
        semesters: Box<dyn SemesterStore + Send>,
        modules: Box<dyn ModuleStore + Send>,
        promotion: Box<dyn PromotionStatusStore + Send>,
        repeating: Box<dyn RepeatingStudentStore + Send>,
        catalog: Box<dyn CourseCatalog + Send>,
        roster: Box<dyn StudentRoster + Send>,
        audit: Box<dyn AuditTrail + Send>,
    ) -> Self {
        Self {
            semesters,
            modules,
            promotion,
            repeating,
            catalog,
            roster,
            audit,
        }
    }

    /// Returns the semester with status `Active`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn current_semester(&mut self) -> Result<Option<Semester>, LifecycleError> {
        Ok(self.semesters.active_semester()?)
    }

    /// Returns the semester with the given id.
    ///
    /// # Errors
    ///
    /// Returns `SemesterNotFound` if the id does not resolve.
    pub fn semester(&mut self, semester_id: i64) -> Result<Semester, LifecycleError> {
        self.semesters
            .semester(semester_id)?
            .ok_or_else(|| DomainError::SemesterNotFound(semester_id).into())
    }

    /// Returns all semesters ordered by `(year, ordinal)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_semesters(&mut self) -> Result<Vec<Semester>, LifecycleError> {
        Ok(self.semesters.list()?)
    }

    /// Returns all semesters for a school year.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn semesters_by_year(&mut self, year: u16) -> Result<Vec<Semester>, LifecycleError> {
        Ok(self.semesters.list_by_year(year)?)
    }

    /// Returns the semester chronologically preceding the given one.
    ///
    /// # Errors
    ///
    /// Returns `SemesterNotFound` if the id does not resolve.
    pub fn last_semester(&mut self, semester_id: i64) -> Result<Option<Semester>, LifecycleError> {
        let target: Semester = self.semester(semester_id)?;
        let all: Vec<Semester> = self.semesters.list()?;

        Ok(all
            .into_iter()
            .filter(|candidate| candidate.term_key() < target.term_key())
            .max_by_key(Semester::term_key))
    }

    /// Returns all repeating-student batches recorded for a semester.
    ///
    /// # Errors
    ///
    /// Returns `SemesterNotFound` if the id does not resolve.
    pub fn repeating_students(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<RepeatingStudentBatch>, LifecycleError> {
        // Resolve the id first so a typo reads as NotFound, not an empty list.
        let _: Semester = self.semester(semester_id)?;
        Ok(self.repeating.list_by_semester(semester_id)?)
    }

    /// Creates a new semester with status `Inactive`.
    ///
    /// # Arguments
    ///
    /// * `year` - The school year
    /// * `ordinal` - The ordinal within the year (1 or 2)
    /// * `actor` - The actor performing this action
    /// * `cause` - The cause or reason for this action
    ///
    /// # Errors
    ///
    /// Returns an error if the year or ordinal is invalid, or if a semester
    /// with the same `(year, ordinal)` already exists.
    pub fn create_semester(
        &mut self,
        year: u16,
        ordinal: u8,
        actor: Actor,
        cause: Cause,
    ) -> Result<CreateResult, LifecycleError> {
        validate_semester_year(year)?;
        let ordinal: Ordinal = Ordinal::new(ordinal)?;

        let existing: Vec<Semester> = self.semesters.list()?;
        validate_term_unique(year, ordinal.value(), &existing)?;

        let inserted: Semester = self.semesters.insert(&Semester::new(year, ordinal))?;
        let semester_id: i64 = persisted_id(&inserted)?;

        let before: StateSnapshot =
            StateSnapshot::new(format!("semesters_count={}", existing.len()));
        let after: StateSnapshot =
            StateSnapshot::new(format!("semesters_count={}", existing.len() + 1));
        let action: Action = Action::new(
            String::from("CreateSemester"),
            String::from("semester"),
            Some(format!("Created semester {year}/{}", ordinal.value())),
        );
        let audit_event: AuditEvent = self.append_audit(AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            Some(semester_id),
        ));

        Ok(CreateResult {
            semester: inserted,
            audit_event,
        })
    }

    /// Corrects the term key of a semester that has not been activated yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the semester does not exist, is no longer
    /// `Inactive`, or if the new term key collides with another semester.
    pub fn update_semester(
        &mut self,
        semester_id: i64,
        year: u16,
        ordinal: u8,
        actor: Actor,
        cause: Cause,
    ) -> Result<UpdateResult, LifecycleError> {
        let current: Semester = self.semester(semester_id)?;

        if current.status != SemesterStatus::Inactive {
            return Err(DomainError::SemesterNotEditable {
                semester_id,
                status: current.status,
            }
            .into());
        }

        validate_semester_year(year)?;
        let ordinal: Ordinal = Ordinal::new(ordinal)?;

        let others: Vec<Semester> = self
            .semesters
            .list()?
            .into_iter()
            .filter(|candidate| candidate.semester_id() != Some(semester_id))
            .collect();
        validate_term_unique(year, ordinal.value(), &others)?;

        let updated: Semester = self.semesters.update_term(semester_id, year, ordinal)?;

        let before: StateSnapshot = StateSnapshot::new(format!(
            "year={}, ordinal={}",
            current.year(),
            current.ordinal().value()
        ));
        let after: StateSnapshot =
            StateSnapshot::new(format!("year={year}, ordinal={}", ordinal.value()));
        let action: Action = Action::new(
            String::from("UpdateSemester"),
            String::from("semester"),
            Some(format!(
                "Updated semester {semester_id} to {year}/{}",
                ordinal.value()
            )),
        );
        let audit_event: AuditEvent = self.append_audit(AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            Some(semester_id),
        ));

        Ok(UpdateResult {
            semester: updated,
            audit_event,
        })
    }

    /// Initializes a semester: materializes its modules and activates it.
    ///
    /// Re-running on a partially initialized semester fills gaps only; the
    /// materializer never duplicates a `(section, subject, semester)` triple.
    /// Module insertion completes before the status flips to `Active`, so a
    /// crash mid-initialization never leaves an active semester whose gaps
    /// would silently read as "ready".
    ///
    /// # Errors
    ///
    /// Returns an error if the semester does not exist, has already been
    /// used, or if a different semester is currently active.
    pub fn init_semester(
        &mut self,
        semester_id: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<InitResult, LifecycleError> {
        let semester: Semester = self.semester(semester_id)?;

        if semester.status.is_terminal() {
            return Err(DomainError::SemesterAlreadyUsed {
                year: semester.year(),
                ordinal: semester.ordinal().value(),
            }
            .into());
        }

        if let Some(active) = self.semesters.active_semester()?
            && active.semester_id() != Some(semester_id)
        {
            return Err(DomainError::AnotherSemesterActive {
                active_year: active.year(),
                active_ordinal: active.ordinal().value(),
                requested: semester_id,
            }
            .into());
        }

        let catalog_pairs: Vec<SectionSubjectPair> = self
            .catalog
            .section_subject_pairs()
            .map_err(|err| collaborator_unavailable("course catalog", &err))?;
        let existing: Vec<SectionSubjectPair> = self.modules.pairs_for_semester(semester_id)?;

        let inserted: Vec<Module> = materializer::diff_and_insert(
            self.modules.as_mut(),
            &existing,
            &catalog_pairs,
            semester_id,
        )?;

        // Re-validate the single-active invariant immediately before the
        // flip; the materialization above may have suspended on storage.
        if let Some(active) = self.semesters.active_semester()?
            && active.semester_id() != Some(semester_id)
        {
            return Err(DomainError::AnotherSemesterActive {
                active_year: active.year(),
                active_ordinal: active.ordinal().value(),
                requested: semester_id,
            }
            .into());
        }

        if semester.status != SemesterStatus::Active {
            ensure_transition(semester.status, SemesterStatus::Active)?;
            self.semesters
                .update_status(semester_id, SemesterStatus::Active)?;
        }

        info!(
            semester_id,
            inserted = inserted.len(),
            existing = existing.len(),
            "Initialized semester"
        );

        let before: StateSnapshot = StateSnapshot::new(format!(
            "status={}, modules={}",
            semester.status,
            existing.len()
        ));
        let after: StateSnapshot = StateSnapshot::new(format!(
            "status=Active, modules={}",
            existing.len() + inserted.len()
        ));
        let action: Action = Action::new(
            String::from("InitSemester"),
            String::from("semester"),
            Some(format!(
                "Initialized semester {}/{} with {} new modules",
                semester.year(),
                semester.ordinal().value(),
                inserted.len()
            )),
        );
        let audit_event: AuditEvent = self.append_audit(AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            Some(semester_id),
        ));

        let activated: Semester = Semester::with_id(
            semester_id,
            semester.year(),
            semester.ordinal(),
            SemesterStatus::Active,
        );

        Ok(InitResult {
            semester: activated,
            inserted_modules: inserted,
            audit_event,
        })
    }

    /// Runs the end-of-semester promotion.
    ///
    /// Partitions students into "repeat" (recorded in one batch, section
    /// unchanged) and "advance" (section pointer moved to the supplied next
    /// section). Reassignments are independent best-effort writes; failures
    /// are collected per student and reported, not fatal. The promotion flag
    /// is set to `Ending` before the first write and cleared only after the
    /// semester has been closed.
    ///
    /// # Errors
    ///
    /// Returns an error if a student appears in both lists, no semester is
    /// active, a finish is already in progress, an advance target section is
    /// unknown, or the roster becomes unreachable mid-batch (in which case
    /// the `Ending` flag stays set for `interrupt_finish_semester`).
    pub fn finish_semester(
        &mut self,
        actor: Actor,
        cause: Cause,
        students_repeat: &[StudentId],
        students_advance: &[NextSectionAssignment],
    ) -> Result<FinishResult, LifecycleError> {
        // Fail-fast validation: nothing below may write until these pass.
        validate_promotion_partition(students_repeat, students_advance)?;

        let active: Semester = self
            .semesters
            .active_semester()?
            .ok_or(DomainError::NoActiveSemester)?;
        let semester_id: i64 = persisted_id(&active)?;

        if !students_advance.is_empty() {
            let known: HashSet<SectionId> = self
                .catalog
                .sections()
                .map_err(|err| collaborator_unavailable("course catalog", &err))?
                .into_iter()
                .map(|section| section.section_id)
                .collect();
            for assignment in students_advance {
                if !known.contains(&assignment.next_section_id) {
                    return Err(DomainError::SectionNotFound(
                        assignment.next_section_id.value(),
                    )
                    .into());
                }
            }
        }

        if self.promotion.get()? == PromotionStatus::Ending {
            return Err(DomainError::PromotionAlreadyEnding.into());
        }
        self.promotion.set(PromotionStatus::Ending)?;

        let batch: Option<RepeatingStudentBatch> =
            self.record_repeat_batch(semester_id, students_repeat)?;

        let mut moved: Vec<StudentId> = Vec::new();
        let mut failed: Vec<FailedReassignment> = Vec::new();
        for assignment in students_advance {
            match self
                .roster
                .set_student_section(assignment.student_id, assignment.next_section_id)
            {
                Ok(()) => moved.push(assignment.student_id),
                Err(StoreError::NotFound(reason)) => {
                    warn!(
                        student_id = assignment.student_id.value(),
                        reason, "Skipping reassignment of unknown student"
                    );
                    failed.push(FailedReassignment {
                        student_id: assignment.student_id,
                        reason,
                    });
                }
                // Leave the Ending flag set: the directive decides whether
                // to retry or interrupt once the roster is back.
                Err(err) => return Err(collaborator_unavailable("student roster", &err)),
            }
        }

        ensure_transition(active.status, SemesterStatus::Used)?;
        self.semesters
            .update_status(semester_id, SemesterStatus::Used)?;
        self.promotion.set(PromotionStatus::Working)?;

        info!(
            semester_id,
            repeating = students_repeat.len(),
            moved = moved.len(),
            failed = failed.len(),
            "Finished semester"
        );

        let before: StateSnapshot = StateSnapshot::new(String::from("status=Active"));
        let after: StateSnapshot = StateSnapshot::new(format!(
            "status=Used, repeating={}, moved={}, failed={}",
            students_repeat.len(),
            moved.len(),
            failed.len()
        ));
        let action: Action = Action::new(
            String::from("FinishSemester"),
            String::from("semester"),
            Some(format!(
                "Finished semester {}/{}: {} repeating, {} advanced",
                active.year(),
                active.ordinal().value(),
                students_repeat.len(),
                moved.len()
            )),
        );
        let audit_event: AuditEvent = self.append_audit(AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            Some(semester_id),
        ));

        let finished: Semester = Semester::with_id(
            semester_id,
            active.year(),
            active.ordinal(),
            SemesterStatus::Used,
        );

        Ok(FinishResult {
            semester: finished,
            batch,
            moved,
            failed,
            audit_event,
        })
    }

    /// Interrupts an in-flight finish process.
    ///
    /// Clears the promotion flag back to `Working` without touching the
    /// semester status or any reassignment already applied. This is a manual
    /// circuit-breaker: the active semester stays active and the promotion
    /// can be retried later.
    ///
    /// # Errors
    ///
    /// Returns an error if no finish process is in flight.
    pub fn interrupt_finish_semester(
        &mut self,
        actor: Actor,
        cause: Cause,
    ) -> Result<InterruptResult, LifecycleError> {
        if self.promotion.get()? != PromotionStatus::Ending {
            return Err(DomainError::PromotionNotEnding.into());
        }
        self.promotion.set(PromotionStatus::Working)?;

        let scope: Option<i64> = self
            .semesters
            .active_semester()?
            .and_then(|semester| semester.semester_id());

        info!(semester_id = scope, "Interrupted finish-semester process");

        let before: StateSnapshot = StateSnapshot::new(String::from("promotion_status=Ending"));
        let after: StateSnapshot = StateSnapshot::new(String::from("promotion_status=Working"));
        let action: Action = Action::new(
            String::from("InterruptFinishSemester"),
            String::from("semester"),
            Some(String::from(
                "Interrupted the in-flight finish-semester process",
            )),
        );
        let audit_event: AuditEvent =
            self.append_audit(AuditEvent::new(actor, cause, action, before, after, scope));

        Ok(InterruptResult { audit_event })
    }

    /// Records the repeat batch for a finish call, reusing an identical
    /// batch left behind by an interrupted earlier attempt.
    fn record_repeat_batch(
        &mut self,
        semester_id: i64,
        students_repeat: &[StudentId],
    ) -> Result<Option<RepeatingStudentBatch>, LifecycleError> {
        if students_repeat.is_empty() {
            return Ok(None);
        }

        let previous: Vec<RepeatingStudentBatch> =
            self.repeating.list_by_semester(semester_id)?;
        if previous
            .iter()
            .any(|batch| batch.has_same_students(students_repeat))
        {
            info!(
                semester_id,
                "Reusing repeat batch from an interrupted finish attempt"
            );
            return Ok(None);
        }

        let recorded_at: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| StoreError::Backend(format!("Failed to format timestamp: {err}")))?;
        let batch: RepeatingStudentBatch = self.repeating.record(&RepeatingStudentBatch::new(
            semester_id,
            students_repeat.to_vec(),
            recorded_at,
        ))?;

        Ok(Some(batch))
    }

    /// Appends an audit event, logging failures instead of propagating them.
    fn append_audit(&mut self, event: AuditEvent) -> AuditEvent {
        match self.audit.append(&event) {
            Ok(event_id) => event.with_event_id(event_id),
            Err(error) => {
                warn!(
                    error = %error,
                    action = %event.action.name,
                    "Failed to append audit event"
                );
                event
            }
        }
    }
}

/// Extracts the database-assigned id from a persisted semester.
fn persisted_id(semester: &Semester) -> Result<i64, LifecycleError> {
    semester.semester_id().ok_or_else(|| {
        LifecycleError::Store(StoreError::Backend(String::from(
            "Semester record is missing its assigned id",
        )))
    })
}

/// Guards a semester status flip against the legal lifecycle transitions.
fn ensure_transition(from: SemesterStatus, to: SemesterStatus) -> Result<(), LifecycleError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::InvalidLifecycleTransition { from, to }.into())
    }
}

/// Wraps a port error as a collaborator-unavailable lifecycle error.
fn collaborator_unavailable(collaborator: &'static str, err: &StoreError) -> LifecycleError {
    LifecycleError::CollaboratorUnavailable {
        collaborator,
        reason: err.to_string(),
    }
}
