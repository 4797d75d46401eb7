// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, mutations};
use scolaris_audit::{Actor, Cause};
use scolaris_domain::{Ordinal, Semester, SemesterStatus};

pub fn test_actor() -> Actor {
    Actor::new(String::from("dir-1"), String::from("directive"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Directive request"))
}

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

/// Ids of the seeded catalog rows, in insertion order.
pub struct SeededCatalog {
    pub sections: Vec<i64>,
    pub subjects: Vec<i64>,
    pub students: Vec<i64>,
}

/// Seeds one course with two sections, one subject and two students, the
/// smallest catalog that exercises the materializer cross-product.
pub fn seed_catalog(persistence: &Persistence) -> SeededCatalog {
    let mut conn = persistence.conn.lock().unwrap();

    let course_id: i64 = mutations::catalog::insert_course(&mut conn, "Primary 3").unwrap();
    let section_a: i64 = mutations::catalog::insert_section(&mut conn, course_id, "3-A").unwrap();
    let section_b: i64 = mutations::catalog::insert_section(&mut conn, course_id, "3-B").unwrap();
    let subject: i64 =
        mutations::catalog::insert_subject(&mut conn, course_id, "Mathematics").unwrap();
    let student_a: i64 =
        mutations::catalog::insert_student(&mut conn, "Ana Gómez", section_a).unwrap();
    let student_b: i64 =
        mutations::catalog::insert_student(&mut conn, "Luis Rojas", section_a).unwrap();

    SeededCatalog {
        sections: vec![section_a, section_b],
        subjects: vec![subject],
        students: vec![student_a, student_b],
    }
}

/// Inserts a semester row directly, bypassing the lifecycle.
pub fn seed_semester(
    persistence: &Persistence,
    year: u16,
    ordinal: u8,
    status: SemesterStatus,
) -> i64 {
    let mut conn = persistence.conn.lock().unwrap();
    let mut semester: Semester = Semester::new(year, Ordinal::new(ordinal).unwrap());
    semester.status = status;
    mutations::semesters::insert_semester(&mut conn, &semester)
        .unwrap()
        .semester_id()
        .unwrap()
}
