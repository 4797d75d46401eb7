// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage ports and external collaborator contracts.
//!
//! The lifecycle engine never touches a database or a sibling service
//! directly; every effect goes through one of these traits. Production
//! implementations live in the persistence crate; tests inject in-memory
//! fakes.

use crate::error::StoreError;
use scolaris_audit::AuditEvent;
use scolaris_domain::{
    Module, Ordinal, PromotionStatus, RepeatingStudentBatch, Section, SectionId,
    SectionSubjectPair, Semester, SemesterStatus, StudentId,
};

/// Persistence for semester records.
///
/// The lifecycle engine is the only writer of `Semester.status`.
pub trait SemesterStore {
    /// Returns the semester with the given id, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn semester(&mut self, semester_id: i64) -> Result<Option<Semester>, StoreError>;

    /// Returns the semester with status `Active`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn active_semester(&mut self) -> Result<Option<Semester>, StoreError>;

    /// Returns all semesters ordered by `(year, ordinal)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&mut self) -> Result<Vec<Semester>, StoreError>;

    /// Returns all semesters for a school year ordered by ordinal.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_by_year(&mut self, year: u16) -> Result<Vec<Semester>, StoreError>;

    /// Inserts a new semester and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert(&mut self, semester: &Semester) -> Result<Semester, StoreError>;

    /// Rewrites the term key of a not-yet-activated semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the semester does not exist or the write fails.
    fn update_term(
        &mut self,
        semester_id: i64,
        year: u16,
        ordinal: Ordinal,
    ) -> Result<Semester, StoreError>;

    /// Overwrites the status of a semester as a single atomic row update.
    ///
    /// # Errors
    ///
    /// Returns an error if the semester does not exist or the write fails.
    fn update_status(
        &mut self,
        semester_id: i64,
        status: SemesterStatus,
    ) -> Result<(), StoreError>;
}

/// Persistence for modules.
///
/// The materializer is the only writer; the unique
/// `(section, subject, semester)` triple is additionally enforced by the
/// storage schema.
pub trait ModuleStore {
    /// Returns the `(section, subject)` pairs that already have a module
    /// for the given semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn pairs_for_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<SectionSubjectPair>, StoreError>;

    /// Bulk-inserts module drafts and returns them with assigned ids.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    fn insert_modules(&mut self, drafts: &[Module]) -> Result<Vec<Module>, StoreError>;
}

/// Durable singleton flag recording whether a finish-semester process is in
/// flight.
pub trait PromotionStatusStore {
    /// Reads the current flag. An unset flag reads as `Working`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&mut self) -> Result<PromotionStatus, StoreError>;

    /// Overwrites the flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&mut self, status: PromotionStatus) -> Result<(), StoreError>;
}

/// Append-only record of which students were marked to repeat per semester.
pub trait RepeatingStudentStore {
    /// Appends one batch and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn record(
        &mut self,
        batch: &RepeatingStudentBatch,
    ) -> Result<RepeatingStudentBatch, StoreError>;

    /// Returns all batches for a semester in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_by_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<RepeatingStudentBatch>, StoreError>;
}

/// Read-only view of the course catalog.
///
/// Supplies the sections and subjects the materializer crosses, and the
/// section list the promotion validates advance targets against.
pub trait CourseCatalog {
    /// Returns every `(section, subject)` pair currently anchored in the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached.
    fn section_subject_pairs(&mut self) -> Result<Vec<SectionSubjectPair>, StoreError>;

    /// Returns all sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached.
    fn sections(&mut self) -> Result<Vec<Section>, StoreError>;
}

/// The single write the student roster accepts from the lifecycle.
pub trait StudentRoster {
    /// Points a student at a new section.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the student does not exist and
    /// `StoreError::Unavailable` if the roster cannot be reached; the
    /// lifecycle treats the two very differently.
    fn set_student_section(
        &mut self,
        student_id: StudentId,
        section_id: SectionId,
    ) -> Result<(), StoreError>;
}

/// Append-only change log.
///
/// The lifecycle writes to it but does not own it; append failures are
/// logged by the caller and never fail the primary operation.
pub trait AuditTrail {
    /// Appends one event and returns its assigned event id.
    ///
    /// # Errors
    ///
    /// Returns an error if the append fails.
    fn append(&mut self, event: &AuditEvent) -> Result<i64, StoreError>;
}
