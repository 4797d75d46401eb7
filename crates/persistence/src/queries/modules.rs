// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Module queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{Module, SectionId, SectionSubjectPair, SubSection, SubjectId};

use crate::data_models::SubSectionData;
use crate::diesel_schema::modules;
use crate::error::PersistenceError;

/// Diesel Queryable struct for module rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = modules)]
struct ModuleRow {
    module_id: i64,
    semester_id: i64,
    section_id: i64,
    subject_id: i64,
    finished: i32,
    sub_sections_json: String,
}

impl ModuleRow {
    fn into_domain(self) -> Result<Module, PersistenceError> {
        let sub_sections: Vec<SubSectionData> = serde_json::from_str(&self.sub_sections_json)?;

        Ok(Module {
            module_id: Some(self.module_id),
            semester_id: self.semester_id,
            section_id: SectionId::new(self.section_id),
            subject_id: SubjectId::new(self.subject_id),
            finished: self.finished != 0,
            sub_sections: sub_sections
                .into_iter()
                .map(|sub| SubSection {
                    sub_section_id: sub.sub_section_id,
                    name: sub.name,
                })
                .collect(),
        })
    }
}

/// Returns the `(section, subject)` pairs that already have a module for the
/// given semester.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn pairs_for_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Vec<SectionSubjectPair>, PersistenceError> {
    let rows: Vec<(i64, i64)> = modules::table
        .filter(modules::semester_id.eq(semester_id))
        .select((modules::section_id, modules::subject_id))
        .order(modules::module_id.asc())
        .load::<(i64, i64)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(section, subject)| {
            SectionSubjectPair::new(SectionId::new(section), SubjectId::new(subject))
        })
        .collect())
}

/// Lists all modules of a semester in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_modules(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Vec<Module>, PersistenceError> {
    modules::table
        .filter(modules::semester_id.eq(semester_id))
        .order(modules::module_id.asc())
        .select(ModuleRow::as_select())
        .load::<ModuleRow>(conn)?
        .into_iter()
        .map(ModuleRow::into_domain)
        .collect()
}
