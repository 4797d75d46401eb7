// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end lifecycle tests over real `SQLite` storage.
//!
//! The core crate proves the orchestration against fakes; these tests prove
//! the Diesel stores uphold the same contracts.

use crate::queries;
use scolaris::{ErrorKind, LifecycleError, SemesterLifecycle};
use scolaris_domain::{
    NextSectionAssignment, PromotionStatus, SectionId, SemesterStatus, StudentId,
};

use super::helpers::{persistence, seed_catalog, test_actor, test_cause};

#[test]
fn test_init_semester_materializes_against_sqlite() {
    let persistence = persistence();
    let catalog = seed_catalog(&persistence);
    let mut lifecycle: SemesterLifecycle = persistence.lifecycle();

    let created = lifecycle
        .create_semester(2024, 1, test_actor(), test_cause())
        .unwrap();
    let semester_id: i64 = created.semester.semester_id().unwrap();

    let result = lifecycle
        .init_semester(semester_id, test_actor(), test_cause())
        .unwrap();

    // Two sections crossed with one subject.
    assert_eq!(result.inserted_modules.len(), 2);
    assert_eq!(result.semester.status, SemesterStatus::Active);

    let mut conn = persistence.conn.lock().unwrap();
    let pairs = queries::modules::pairs_for_semester(&mut conn, semester_id).unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(
        pairs
            .iter()
            .any(|p| p.section_id == SectionId::new(catalog.sections[0]))
    );
    drop(conn);

    // Re-initializing fills no gaps and duplicates nothing.
    let again = lifecycle
        .init_semester(semester_id, test_actor(), test_cause())
        .unwrap();
    assert!(again.inserted_modules.is_empty());
}

#[test]
fn test_single_active_invariant_holds_across_sqlite() {
    let persistence = persistence();
    seed_catalog(&persistence);
    let mut lifecycle: SemesterLifecycle = persistence.lifecycle();

    let first = lifecycle
        .create_semester(2026, 1, test_actor(), test_cause())
        .unwrap();
    let second = lifecycle
        .create_semester(2026, 2, test_actor(), test_cause())
        .unwrap();

    lifecycle
        .init_semester(
            first.semester.semester_id().unwrap(),
            test_actor(),
            test_cause(),
        )
        .unwrap();

    let err: LifecycleError = lifecycle
        .init_semester(
            second.semester.semester_id().unwrap(),
            test_actor(),
            test_cause(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_finish_semester_promotes_against_sqlite() {
    let persistence = persistence();
    let catalog = seed_catalog(&persistence);
    let mut lifecycle: SemesterLifecycle = persistence.lifecycle();

    let created = lifecycle
        .create_semester(2026, 1, test_actor(), test_cause())
        .unwrap();
    let semester_id: i64 = created.semester.semester_id().unwrap();
    lifecycle
        .init_semester(semester_id, test_actor(), test_cause())
        .unwrap();

    let repeating: StudentId = StudentId::new(catalog.students[0]);
    let advancing: StudentId = StudentId::new(catalog.students[1]);
    let target: SectionId = SectionId::new(catalog.sections[1]);

    let result = lifecycle
        .finish_semester(
            test_actor(),
            test_cause(),
            &[repeating],
            &[NextSectionAssignment {
                student_id: advancing,
                next_section_id: target,
            }],
        )
        .unwrap();

    assert_eq!(result.semester.status, SemesterStatus::Used);
    assert_eq!(result.moved, vec![advancing]);
    assert!(result.failed.is_empty());
    assert_eq!(result.batch.as_ref().unwrap().students, vec![repeating]);

    let mut conn = persistence.conn.lock().unwrap();

    // The advancing student's section pointer moved; the repeater's did not.
    let moved_student = queries::catalog::get_student(&mut conn, advancing)
        .unwrap()
        .unwrap();
    assert_eq!(moved_student.section_id, target);
    let repeat_student = queries::catalog::get_student(&mut conn, repeating)
        .unwrap()
        .unwrap();
    assert_eq!(
        repeat_student.section_id,
        SectionId::new(catalog.sections[0])
    );

    // The flag came back to rest and the semester closed.
    assert_eq!(
        queries::promotion::get_promotion_status(&mut conn).unwrap(),
        PromotionStatus::Working
    );
    let closed = queries::semesters::get_semester(&mut conn, semester_id)
        .unwrap()
        .unwrap();
    assert_eq!(closed.status, SemesterStatus::Used);

    // Every lifecycle mutation left an audit event behind.
    let events = queries::audit::list_events_by_semester(&mut conn, semester_id).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].action.name, "CreateSemester");
    assert_eq!(events[1].action.name, "InitSemester");
    assert_eq!(events[2].action.name, "FinishSemester");
}

#[test]
fn test_used_semester_stays_terminal_against_sqlite() {
    let persistence = persistence();
    seed_catalog(&persistence);
    let mut lifecycle: SemesterLifecycle = persistence.lifecycle();

    let created = lifecycle
        .create_semester(2026, 1, test_actor(), test_cause())
        .unwrap();
    let semester_id: i64 = created.semester.semester_id().unwrap();
    lifecycle
        .init_semester(semester_id, test_actor(), test_cause())
        .unwrap();
    lifecycle
        .finish_semester(test_actor(), test_cause(), &[], &[])
        .unwrap();

    let err: LifecycleError = lifecycle
        .init_semester(semester_id, test_actor(), test_cause())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidState);
}
