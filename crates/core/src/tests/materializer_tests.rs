// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the module materializer.

use crate::materializer::{diff_and_insert, missing_pairs};
use scolaris_domain::{Module, SectionSubjectPair};

use super::helpers::{World, pair};

#[test]
fn test_missing_pairs_returns_catalog_minus_existing() {
    let existing: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(2, 10)];
    let catalog: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(2, 10), pair(3, 10)];

    let missing: Vec<SectionSubjectPair> = missing_pairs(&existing, &catalog);

    assert_eq!(missing, vec![pair(3, 10)]);
}

#[test]
fn test_missing_pairs_returns_everything_when_nothing_exists() {
    let catalog: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(1, 11)];

    let missing: Vec<SectionSubjectPair> = missing_pairs(&[], &catalog);

    assert_eq!(missing, catalog);
}

#[test]
fn test_missing_pairs_deduplicates_catalog_input() {
    let catalog: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(1, 10), pair(2, 10)];

    let missing: Vec<SectionSubjectPair> = missing_pairs(&[], &catalog);

    assert_eq!(missing, vec![pair(1, 10), pair(2, 10)]);
}

#[test]
fn test_missing_pairs_is_empty_when_catalog_is_covered() {
    let existing: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(2, 10)];
    let catalog: Vec<SectionSubjectPair> = vec![pair(2, 10), pair(1, 10)];

    assert!(missing_pairs(&existing, &catalog).is_empty());
}

#[test]
fn test_diff_and_insert_creates_unfinished_drafts() {
    let world: World = World::new();
    let mut modules = world.module_store();
    let catalog: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(2, 10)];

    let inserted: Vec<Module> = diff_and_insert(modules.as_mut(), &[], &catalog, 7).unwrap();

    assert_eq!(inserted.len(), 2);
    for module in &inserted {
        assert!(module.module_id.is_some());
        assert_eq!(module.semester_id, 7);
        assert!(!module.finished);
        assert!(module.sub_sections.is_empty());
    }
    assert_eq!(world.state().modules.len(), 2);
}

#[test]
fn test_diff_and_insert_twice_never_duplicates_a_triple() {
    let world: World = World::new();
    let mut modules = world.module_store();
    let catalog: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(2, 10)];

    let first: Vec<Module> = diff_and_insert(modules.as_mut(), &[], &catalog, 7).unwrap();
    assert_eq!(first.len(), 2);

    // The second call sees the first call's rows as existing pairs.
    let existing: Vec<SectionSubjectPair> = first.iter().map(Module::pair).collect();
    let second: Vec<Module> = diff_and_insert(modules.as_mut(), &existing, &catalog, 7).unwrap();

    assert!(second.is_empty());
    assert_eq!(world.state().modules.len(), 2);
}

#[test]
fn test_diff_and_insert_fills_only_the_gaps() {
    let world: World = World::new();
    let mut modules = world.module_store();

    let first: Vec<Module> = diff_and_insert(modules.as_mut(), &[], &[pair(1, 10)], 7).unwrap();
    assert_eq!(first.len(), 1);

    let existing: Vec<SectionSubjectPair> = first.iter().map(Module::pair).collect();
    let grown_catalog: Vec<SectionSubjectPair> = vec![pair(1, 10), pair(2, 10)];
    let second: Vec<Module> =
        diff_and_insert(modules.as_mut(), &existing, &grown_catalog, 7).unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].pair(), pair(2, 10));
    assert_eq!(world.state().modules.len(), 2);
}

#[test]
fn test_diff_and_insert_keeps_modules_of_other_semesters_apart() {
    let world: World = World::new();
    let mut modules = world.module_store();
    let catalog: Vec<SectionSubjectPair> = vec![pair(1, 10)];

    diff_and_insert(modules.as_mut(), &[], &catalog, 7).unwrap();
    // The same pair in a different semester is a different triple.
    let inserted: Vec<Module> = diff_and_insert(modules.as_mut(), &[], &catalog, 8).unwrap();

    assert_eq!(inserted.len(), 1);
    assert_eq!(world.state().modules.len(), 2);
}
