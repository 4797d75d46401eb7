// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Module materialization.
//!
//! When a semester is initialized, the cross-product of sections and
//! subjects anchored in the course catalog must exist as modules for that
//! semester. The materializer diffs the catalog against what is already
//! stored and inserts only the gaps, so initialization is idempotent and the
//! unique `(section, subject, semester)` triple is never violated.

use crate::error::StoreError;
use crate::ports::ModuleStore;
use scolaris_domain::{Module, SectionSubjectPair};
use std::collections::HashSet;

/// Computes the catalog pairs that have no module yet.
///
/// This function is pure. Input pairs are deduplicated; the order of first
/// appearance in `catalog_pairs` is preserved.
///
/// # Arguments
///
/// * `existing` - The pairs that already have a module for the semester
/// * `catalog_pairs` - The pairs currently anchored in the course catalog
///
/// # Returns
///
/// The pairs in `catalog_pairs` that are missing from `existing`.
#[must_use]
pub fn missing_pairs(
    existing: &[SectionSubjectPair],
    catalog_pairs: &[SectionSubjectPair],
) -> Vec<SectionSubjectPair> {
    let mut seen: HashSet<SectionSubjectPair> = existing.iter().copied().collect();

    catalog_pairs
        .iter()
        .copied()
        .filter(|pair| seen.insert(*pair))
        .collect()
}

/// Diffs the catalog against existing modules and inserts the missing drafts.
///
/// Each missing pair becomes one unfinished module with no subdivisions.
/// Calling this twice with overlapping inputs never creates a duplicate
/// triple: the second call sees the first call's rows in `existing`.
///
/// # Arguments
///
/// * `modules` - The module store to insert into
/// * `existing` - The pairs that already have a module for the semester
/// * `catalog_pairs` - The pairs currently anchored in the course catalog
/// * `semester_id` - The semester being initialized
///
/// # Returns
///
/// The inserted modules with their assigned ids; empty when there were no
/// gaps to fill.
///
/// # Errors
///
/// Returns an error if the bulk insert fails.
pub fn diff_and_insert(
    modules: &mut dyn ModuleStore,
    existing: &[SectionSubjectPair],
    catalog_pairs: &[SectionSubjectPair],
    semester_id: i64,
) -> Result<Vec<Module>, StoreError> {
    let missing: Vec<SectionSubjectPair> = missing_pairs(existing, catalog_pairs);

    if missing.is_empty() {
        return Ok(Vec::new());
    }

    let drafts: Vec<Module> = missing
        .into_iter()
        .map(|pair| Module::draft(semester_id, pair))
        .collect();

    modules.insert_modules(&drafts)
}
