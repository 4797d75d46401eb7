// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory fakes for the lifecycle ports.
//!
//! A [`World`] holds all state behind one `Arc<Mutex<..>>`; each port
//! adapter clones the handle, so tests can inspect the world after the
//! lifecycle has consumed the boxed ports.

use crate::error::StoreError;
use crate::lifecycle::SemesterLifecycle;
use crate::ports::{
    AuditTrail, CourseCatalog, ModuleStore, PromotionStatusStore, RepeatingStudentStore,
    SemesterStore, StudentRoster,
};
use scolaris_audit::{Actor, AuditEvent, Cause};
use scolaris_domain::{
    Module, Ordinal, PromotionStatus, RepeatingStudentBatch, Section, SectionId,
    SectionSubjectPair, Semester, SemesterStatus, Student, StudentId, SubjectId,
};
use std::sync::{Arc, Mutex, MutexGuard};

pub fn test_actor() -> Actor {
    Actor::new(String::from("dir-1"), String::from("directive"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Directive request"))
}

pub fn pair(section: i64, subject: i64) -> SectionSubjectPair {
    SectionSubjectPair::new(SectionId::new(section), SubjectId::new(subject))
}

/// Everything the fakes know, in one place.
#[derive(Debug, Default)]
pub struct WorldState {
    pub semesters: Vec<Semester>,
    next_semester_id: i64,
    pub modules: Vec<Module>,
    next_module_id: i64,
    pub promotion: PromotionStatus,
    pub batches: Vec<RepeatingStudentBatch>,
    next_batch_id: i64,
    pub catalog_pairs: Vec<SectionSubjectPair>,
    pub sections: Vec<Section>,
    pub students: Vec<Student>,
    pub audit_events: Vec<AuditEvent>,
    next_event_id: i64,
    pub catalog_unavailable: bool,
    pub roster_unavailable: bool,
    pub audit_unavailable: bool,
}

/// A shared in-memory backing store for every port.
#[derive(Clone, Default)]
pub struct World {
    inner: Arc<Mutex<WorldState>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, WorldState> {
        self.inner.lock().unwrap()
    }

    pub fn add_semester(&self, year: u16, ordinal: u8, status: SemesterStatus) -> i64 {
        let mut state = self.state();
        state.next_semester_id += 1;
        let semester_id: i64 = state.next_semester_id;
        state.semesters.push(Semester::with_id(
            semester_id,
            year,
            Ordinal::new(ordinal).unwrap(),
            status,
        ));
        semester_id
    }

    pub fn add_pair(&self, section: i64, subject: i64) {
        let mut state = self.state();
        state.catalog_pairs.push(pair(section, subject));
        if !state
            .sections
            .iter()
            .any(|s| s.section_id == SectionId::new(section))
        {
            state.sections.push(Section {
                section_id: SectionId::new(section),
                course_id: 1,
                name: format!("S{section}"),
            });
        }
    }

    pub fn add_section(&self, section: i64) {
        let mut state = self.state();
        state.sections.push(Section {
            section_id: SectionId::new(section),
            course_id: 1,
            name: format!("S{section}"),
        });
    }

    pub fn add_student(&self, student: i64, section: i64) {
        let mut state = self.state();
        state.students.push(Student {
            student_id: StudentId::new(student),
            name: format!("Student {student}"),
            section_id: SectionId::new(section),
        });
    }

    pub fn student_section(&self, student: i64) -> Option<SectionId> {
        self.state()
            .students
            .iter()
            .find(|s| s.student_id == StudentId::new(student))
            .map(|s| s.section_id)
    }

    pub fn semester_status(&self, semester_id: i64) -> SemesterStatus {
        self.state()
            .semesters
            .iter()
            .find(|s| s.semester_id() == Some(semester_id))
            .map(|s| s.status)
            .unwrap()
    }

    /// Hands out a standalone module-store port for materializer tests.
    pub fn module_store(&self) -> Box<dyn ModuleStore> {
        Box::new(FakeStore(self.clone()))
    }

    /// Builds a lifecycle engine wired to this world.
    pub fn lifecycle(&self) -> SemesterLifecycle {
        SemesterLifecycle::new(
            Box::new(FakeStore(self.clone())),
            Box::new(FakeStore(self.clone())),
            Box::new(FakeStore(self.clone())),
            Box::new(FakeStore(self.clone())),
            Box::new(FakeStore(self.clone())),
            Box::new(FakeStore(self.clone())),
            Box::new(FakeStore(self.clone())),
        )
    }
}

/// One adapter type implements every port against the shared world.
struct FakeStore(World);

impl SemesterStore for FakeStore {
    fn semester(&mut self, semester_id: i64) -> Result<Option<Semester>, StoreError> {
        Ok(self
            .0
            .state()
            .semesters
            .iter()
            .find(|s| s.semester_id() == Some(semester_id))
            .cloned())
    }

    fn active_semester(&mut self) -> Result<Option<Semester>, StoreError> {
        Ok(self
            .0
            .state()
            .semesters
            .iter()
            .find(|s| s.status == SemesterStatus::Active)
            .cloned())
    }

    fn list(&mut self) -> Result<Vec<Semester>, StoreError> {
        let mut all: Vec<Semester> = self.0.state().semesters.clone();
        all.sort_by_key(Semester::term_key);
        Ok(all)
    }

    fn list_by_year(&mut self, year: u16) -> Result<Vec<Semester>, StoreError> {
        let mut matching: Vec<Semester> = self
            .0
            .state()
            .semesters
            .iter()
            .filter(|s| s.year() == year)
            .cloned()
            .collect();
        matching.sort_by_key(Semester::term_key);
        Ok(matching)
    }

    fn insert(&mut self, semester: &Semester) -> Result<Semester, StoreError> {
        let mut state = self.0.state();
        state.next_semester_id += 1;
        let inserted: Semester = Semester::with_id(
            state.next_semester_id,
            semester.year(),
            semester.ordinal(),
            semester.status,
        );
        state.semesters.push(inserted.clone());
        Ok(inserted)
    }

    fn update_term(
        &mut self,
        semester_id: i64,
        year: u16,
        ordinal: Ordinal,
    ) -> Result<Semester, StoreError> {
        let mut state = self.0.state();
        let slot = state
            .semesters
            .iter_mut()
            .find(|s| s.semester_id() == Some(semester_id))
            .ok_or_else(|| StoreError::NotFound(format!("semester {semester_id}")))?;
        *slot = Semester::with_id(semester_id, year, ordinal, slot.status);
        Ok(slot.clone())
    }

    fn update_status(
        &mut self,
        semester_id: i64,
        status: SemesterStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.0.state();
        let slot = state
            .semesters
            .iter_mut()
            .find(|s| s.semester_id() == Some(semester_id))
            .ok_or_else(|| StoreError::NotFound(format!("semester {semester_id}")))?;
        *slot = Semester::with_id(semester_id, slot.year(), slot.ordinal(), status);
        Ok(())
    }
}

impl ModuleStore for FakeStore {
    fn pairs_for_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<SectionSubjectPair>, StoreError> {
        Ok(self
            .0
            .state()
            .modules
            .iter()
            .filter(|m| m.semester_id == semester_id)
            .map(Module::pair)
            .collect())
    }

    fn insert_modules(&mut self, drafts: &[Module]) -> Result<Vec<Module>, StoreError> {
        let mut state = self.0.state();
        let mut inserted: Vec<Module> = Vec::with_capacity(drafts.len());
        for draft in drafts {
            if state
                .modules
                .iter()
                .any(|m| m.semester_id == draft.semester_id && m.pair() == draft.pair())
            {
                return Err(StoreError::Backend(String::from(
                    "UNIQUE constraint violated: modules",
                )));
            }
            state.next_module_id += 1;
            let mut module: Module = draft.clone();
            module.module_id = Some(state.next_module_id);
            state.modules.push(module.clone());
            inserted.push(module);
        }
        Ok(inserted)
    }
}

impl PromotionStatusStore for FakeStore {
    fn get(&mut self) -> Result<PromotionStatus, StoreError> {
        Ok(self.0.state().promotion)
    }

    fn set(&mut self, status: PromotionStatus) -> Result<(), StoreError> {
        self.0.state().promotion = status;
        Ok(())
    }
}

impl RepeatingStudentStore for FakeStore {
    fn record(
        &mut self,
        batch: &RepeatingStudentBatch,
    ) -> Result<RepeatingStudentBatch, StoreError> {
        let mut state = self.0.state();
        state.next_batch_id += 1;
        let mut recorded: RepeatingStudentBatch = batch.clone();
        recorded.batch_id = Some(state.next_batch_id);
        state.batches.push(recorded.clone());
        Ok(recorded)
    }

    fn list_by_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<RepeatingStudentBatch>, StoreError> {
        Ok(self
            .0
            .state()
            .batches
            .iter()
            .filter(|b| b.semester_id == semester_id)
            .cloned()
            .collect())
    }
}

impl CourseCatalog for FakeStore {
    fn section_subject_pairs(&mut self) -> Result<Vec<SectionSubjectPair>, StoreError> {
        let state = self.0.state();
        if state.catalog_unavailable {
            return Err(StoreError::Unavailable(String::from("catalog down")));
        }
        Ok(state.catalog_pairs.clone())
    }

    fn sections(&mut self) -> Result<Vec<Section>, StoreError> {
        let state = self.0.state();
        if state.catalog_unavailable {
            return Err(StoreError::Unavailable(String::from("catalog down")));
        }
        Ok(state.sections.clone())
    }
}

impl StudentRoster for FakeStore {
    fn set_student_section(
        &mut self,
        student_id: StudentId,
        section_id: SectionId,
    ) -> Result<(), StoreError> {
        let mut state = self.0.state();
        if state.roster_unavailable {
            return Err(StoreError::Unavailable(String::from("roster down")));
        }
        let student = state
            .students
            .iter_mut()
            .find(|s| s.student_id == student_id)
            .ok_or_else(|| StoreError::NotFound(format!("student {}", student_id.value())))?;
        student.section_id = section_id;
        Ok(())
    }
}

impl AuditTrail for FakeStore {
    fn append(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        let mut state = self.0.state();
        if state.audit_unavailable {
            return Err(StoreError::Unavailable(String::from("audit trail down")));
        }
        state.next_event_id += 1;
        let event_id: i64 = state.next_event_id;
        state
            .audit_events
            .push(event.clone().with_event_id(event_id));
        Ok(event_id)
    }
}
