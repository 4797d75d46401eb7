// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Module mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::Module;
use tracing::debug;

use crate::backend::sqlite::last_insert_rowid;
use crate::data_models::SubSectionData;
use crate::diesel_schema::modules;
use crate::error::PersistenceError;

/// Bulk-inserts module drafts inside one transaction.
///
/// The schema's unique `(section, subject, semester)` constraint backs the
/// materializer's no-duplicates guarantee; a violation rolls back the whole
/// batch.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `drafts` - The module drafts to insert
///
/// # Returns
///
/// The inserted modules with their assigned ids.
///
/// # Errors
///
/// Returns an error if any insert or serialization fails.
pub fn insert_modules(
    conn: &mut SqliteConnection,
    drafts: &[Module],
) -> Result<Vec<Module>, PersistenceError> {
    conn.transaction::<Vec<Module>, PersistenceError, _>(|conn| {
        let mut inserted: Vec<Module> = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let sub_sections: Vec<SubSectionData> = draft
                .sub_sections
                .iter()
                .map(|sub| SubSectionData {
                    sub_section_id: sub.sub_section_id,
                    name: sub.name.clone(),
                })
                .collect();
            let sub_sections_json: String = serde_json::to_string(&sub_sections)?;

            diesel::insert_into(modules::table)
                .values((
                    modules::semester_id.eq(draft.semester_id),
                    modules::section_id.eq(draft.section_id.value()),
                    modules::subject_id.eq(draft.subject_id.value()),
                    modules::finished.eq(i32::from(draft.finished)),
                    modules::sub_sections_json.eq(sub_sections_json),
                ))
                .execute(conn)?;

            let module_id: i64 = last_insert_rowid(conn)?;
            let mut module: Module = draft.clone();
            module.module_id = Some(module_id);
            inserted.push(module);
        }

        debug!(count = inserted.len(), "Inserted module drafts");
        Ok(inserted)
    })
}
