// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The singleton key under which the promotion status flag is persisted.
pub const PROMOTION_STATUS_KEY: &str = "current_semester_status";

/// Represents the lifecycle state of a semester.
///
/// Explicit lifecycle states govern what operations are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SemesterStatus {
    /// Terminal state after a completed promotion. Read-only.
    Used,
    /// Initial state after creation. Editing allowed, no modules yet.
    #[default]
    Inactive,
    /// The one semester the school is currently running.
    Active,
}

impl FromStr for SemesterStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Used" => Ok(Self::Used),
            "Inactive" => Ok(Self::Inactive),
            "Active" => Ok(Self::Active),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SemesterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SemesterStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Used => "Used",
            Self::Inactive => "Inactive",
            Self::Active => "Active",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Inactive → Active (initialization)
    /// - Active → Used (finish)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Inactive, Self::Active) | (Self::Active, Self::Used)
        )
    }

    /// Returns whether this status permits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Used)
    }
}

/// The ordinal of a semester within its school year.
///
/// A school year has exactly two semesters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ordinal {
    /// The ordinal value (1 or 2).
    value: u8,
}

impl Ordinal {
    /// Creates a new `Ordinal`.
    ///
    /// # Arguments
    ///
    /// * `value` - The ordinal value (must be 1 or 2)
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not 1 or 2.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value == 1 || value == 2 {
            Ok(Self { value })
        } else {
            Err(DomainError::InvalidOrdinal(value))
        }
    }

    /// Returns the ordinal value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

/// Represents one academic term, uniquely identified by `(year, ordinal)`.
///
/// A semester has a canonical numeric ID (`semester_id`) assigned by the
/// database as well as its human-readable term key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semester {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the semester has not been persisted yet.
    semester_id: Option<i64>,
    /// The school year (e.g., 2026).
    year: u16,
    /// The ordinal within the year (1 or 2).
    ordinal: Ordinal,
    /// The lifecycle status.
    pub status: SemesterStatus,
}

// Custom PartialEq that ignores semester_id: two semesters are the same
// record if they carry the same term key and status, regardless of IDs.
impl PartialEq for Semester {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year && self.ordinal == other.ordinal && self.status == other.status
    }
}

impl Eq for Semester {}

impl Semester {
    /// Creates a new `Semester` without a persisted ID, status `Inactive`.
    ///
    /// # Arguments
    ///
    /// * `year` - The school year
    /// * `ordinal` - The ordinal within the year
    #[must_use]
    pub const fn new(year: u16, ordinal: Ordinal) -> Self {
        Self {
            semester_id: None,
            year,
            ordinal,
            status: SemesterStatus::Inactive,
        }
    }

    /// Creates a `Semester` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `semester_id` - The canonical numeric identifier
    /// * `year` - The school year
    /// * `ordinal` - The ordinal within the year
    /// * `status` - The lifecycle status
    #[must_use]
    pub const fn with_id(
        semester_id: i64,
        year: u16,
        ordinal: Ordinal,
        status: SemesterStatus,
    ) -> Self {
        Self {
            semester_id: Some(semester_id),
            year,
            ordinal,
            status,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn semester_id(&self) -> Option<i64> {
        self.semester_id
    }

    /// Returns the school year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the ordinal within the year.
    #[must_use]
    pub const fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Returns the `(year, ordinal)` key that orders semesters chronologically.
    #[must_use]
    pub const fn term_key(&self) -> (u16, u8) {
        (self.year, self.ordinal.value())
    }
}

/// Identifies a section (a classroom cohort within a course).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(i64);

impl SectionId {
    /// Creates a new `SectionId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Identifies a subject taught within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(i64);

impl SubjectId {
    /// Creates a new `SubjectId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Identifies a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(i64);

impl StudentId {
    /// Creates a new `StudentId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// A `(section, subject)` pair anchored in the course catalog.
///
/// The module materializer turns these pairs into modules for one semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionSubjectPair {
    /// The section half of the pair.
    pub section_id: SectionId,
    /// The subject half of the pair.
    pub subject_id: SubjectId,
}

impl SectionSubjectPair {
    /// Creates a new `SectionSubjectPair`.
    #[must_use]
    pub const fn new(section_id: SectionId, subject_id: SubjectId) -> Self {
        Self {
            section_id,
            subject_id,
        }
    }
}

/// A named subdivision of a module (e.g., a grading period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSection {
    /// The subdivision identifier.
    pub sub_section_id: i64,
    /// The subdivision name.
    pub name: String,
}

/// The pairing of one section with one subject for one semester.
///
/// Modules are the unit that holds grades and attendance configuration.
/// The triple `(section_id, subject_id, semester_id)` is unique; modules are
/// created only by the materializer during semester initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the module has not been persisted yet.
    pub module_id: Option<i64>,
    /// The semester this module belongs to.
    pub semester_id: i64,
    /// The section half of the pair.
    pub section_id: SectionId,
    /// The subject half of the pair.
    pub subject_id: SubjectId,
    /// Whether grading for this module is finished.
    pub finished: bool,
    /// Ordered subdivisions of this module.
    pub sub_sections: Vec<SubSection>,
}

impl Module {
    /// Creates a fresh module draft for a catalog pair.
    ///
    /// Drafts start unfinished with no subdivisions.
    ///
    /// # Arguments
    ///
    /// * `semester_id` - The semester the draft belongs to
    /// * `pair` - The catalog pair to materialize
    #[must_use]
    pub const fn draft(semester_id: i64, pair: SectionSubjectPair) -> Self {
        Self {
            module_id: None,
            semester_id,
            section_id: pair.section_id,
            subject_id: pair.subject_id,
            finished: false,
            sub_sections: Vec::new(),
        }
    }

    /// Returns the catalog pair this module was materialized from.
    #[must_use]
    pub const fn pair(&self) -> SectionSubjectPair {
        SectionSubjectPair {
            section_id: self.section_id,
            subject_id: self.subject_id,
        }
    }
}

/// Whether a finish-semester process is currently in flight.
///
/// Persisted as a singleton record under [`PROMOTION_STATUS_KEY`]; an absent
/// record is equivalent to `Working`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PromotionStatus {
    /// No finish process is in progress.
    #[default]
    Working,
    /// A finish-semester operation is in flight.
    Ending,
}

impl FromStr for PromotionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Working" => Ok(Self::Working),
            "Ending" => Ok(Self::Ending),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PromotionStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "Working",
            Self::Ending => "Ending",
        }
    }
}

/// The students marked to repeat their section when a semester finished.
///
/// One batch is recorded per completed finish-semester call. Batches are
/// append-only and never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingStudentBatch {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the batch has not been persisted yet.
    pub batch_id: Option<i64>,
    /// The semester the batch belongs to.
    pub semester_id: i64,
    /// The students marked to repeat.
    pub students: Vec<StudentId>,
    /// When the batch was recorded (ISO 8601).
    pub recorded_at: String,
}

impl RepeatingStudentBatch {
    /// Creates a new batch without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `semester_id` - The semester the batch belongs to
    /// * `students` - The students marked to repeat
    /// * `recorded_at` - The recording timestamp (ISO 8601)
    #[must_use]
    pub const fn new(semester_id: i64, students: Vec<StudentId>, recorded_at: String) -> Self {
        Self {
            batch_id: None,
            semester_id,
            students,
            recorded_at,
        }
    }

    /// Checks whether this batch covers exactly the given student set.
    ///
    /// Order is irrelevant; a retried promotion with an unchanged repeat list
    /// matches its earlier batch through this comparison.
    #[must_use]
    pub fn has_same_students(&self, students: &[StudentId]) -> bool {
        use std::collections::HashSet;
        let mine: HashSet<StudentId> = self.students.iter().copied().collect();
        let theirs: HashSet<StudentId> = students.iter().copied().collect();
        mine == theirs
    }
}

/// A directive's explicit mapping of one student to a specific next section.
///
/// Owned by the caller for the duration of a single finish-semester call;
/// the lifecycle applies it and discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSectionAssignment {
    /// The student being advanced.
    pub student_id: StudentId,
    /// The section the student advances into.
    pub next_section_id: SectionId,
}

/// A classroom cohort within a course, as read from the course catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The section identifier.
    pub section_id: SectionId,
    /// The course this section belongs to.
    pub course_id: i64,
    /// The section name (e.g., "3-B").
    pub name: String,
}

/// A student record, as read from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// The student identifier.
    pub student_id: StudentId,
    /// The student's name.
    pub name: String,
    /// The section the student is currently assigned to.
    pub section_id: SectionId,
}
