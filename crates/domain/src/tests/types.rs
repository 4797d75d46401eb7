// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Module, Ordinal, PromotionStatus, RepeatingStudentBatch, SectionId,
    SectionSubjectPair, Semester, SemesterStatus, StudentId, SubjectId,
};
use std::str::FromStr;

fn first_ordinal() -> Ordinal {
    Ordinal::new(1).unwrap()
}

#[test]
fn test_ordinal_accepts_one_and_two() {
    assert_eq!(Ordinal::new(1).unwrap().value(), 1);
    assert_eq!(Ordinal::new(2).unwrap().value(), 2);
}

#[test]
fn test_ordinal_rejects_out_of_range() {
    assert!(matches!(Ordinal::new(0), Err(DomainError::InvalidOrdinal(0))));
    assert!(matches!(Ordinal::new(3), Err(DomainError::InvalidOrdinal(3))));
}

#[test]
fn test_new_semester_starts_inactive_without_id() {
    let semester: Semester = Semester::new(2026, first_ordinal());

    assert_eq!(semester.semester_id(), None);
    assert_eq!(semester.year(), 2026);
    assert_eq!(semester.ordinal().value(), 1);
    assert_eq!(semester.status, SemesterStatus::Inactive);
}

#[test]
fn test_semester_equality_ignores_persisted_id() {
    let unpersisted: Semester = Semester::new(2026, first_ordinal());
    let persisted: Semester =
        Semester::with_id(42, 2026, first_ordinal(), SemesterStatus::Inactive);

    assert_eq!(unpersisted, persisted);
}

#[test]
fn test_semester_term_key_orders_chronologically() {
    let spring: Semester = Semester::new(2026, first_ordinal());
    let autumn: Semester = Semester::new(2026, Ordinal::new(2).unwrap());
    let next_spring: Semester = Semester::new(2027, first_ordinal());

    assert!(spring.term_key() < autumn.term_key());
    assert!(autumn.term_key() < next_spring.term_key());
}

#[test]
fn test_status_transitions_follow_lifecycle() {
    assert!(SemesterStatus::Inactive.can_transition_to(SemesterStatus::Active));
    assert!(SemesterStatus::Active.can_transition_to(SemesterStatus::Used));

    assert!(!SemesterStatus::Inactive.can_transition_to(SemesterStatus::Used));
    assert!(!SemesterStatus::Active.can_transition_to(SemesterStatus::Inactive));
    assert!(!SemesterStatus::Used.can_transition_to(SemesterStatus::Active));
    assert!(!SemesterStatus::Used.can_transition_to(SemesterStatus::Inactive));
}

#[test]
fn test_used_is_the_only_terminal_status() {
    assert!(SemesterStatus::Used.is_terminal());
    assert!(!SemesterStatus::Inactive.is_terminal());
    assert!(!SemesterStatus::Active.is_terminal());
}

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        SemesterStatus::Used,
        SemesterStatus::Inactive,
        SemesterStatus::Active,
    ] {
        assert_eq!(SemesterStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(matches!(
        SemesterStatus::from_str("Closed"),
        Err(DomainError::InvalidStatus(_))
    ));
}

#[test]
fn test_promotion_status_defaults_to_working() {
    assert_eq!(PromotionStatus::default(), PromotionStatus::Working);
}

#[test]
fn test_promotion_status_round_trips_through_strings() {
    for status in [PromotionStatus::Working, PromotionStatus::Ending] {
        assert_eq!(PromotionStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_module_draft_starts_unfinished_and_empty() {
    let pair: SectionSubjectPair =
        SectionSubjectPair::new(SectionId::new(3), SubjectId::new(7));
    let module: Module = Module::draft(11, pair);

    assert_eq!(module.module_id, None);
    assert_eq!(module.semester_id, 11);
    assert!(!module.finished);
    assert!(module.sub_sections.is_empty());
    assert_eq!(module.pair(), pair);
}

#[test]
fn test_batch_student_comparison_ignores_order() {
    let batch: RepeatingStudentBatch = RepeatingStudentBatch::new(
        5,
        vec![StudentId::new(1), StudentId::new(2)],
        String::from("2026-06-30T12:00:00Z"),
    );

    assert!(batch.has_same_students(&[StudentId::new(2), StudentId::new(1)]));
    assert!(!batch.has_same_students(&[StudentId::new(1)]));
    assert!(!batch.has_same_students(&[StudentId::new(1), StudentId::new(3)]));
}
