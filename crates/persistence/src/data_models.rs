// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serialization shapes for JSON columns.
//!
//! Structured audit payloads and the module sub-section list are stored as
//! JSON text; these structs pin the column format independently of the
//! in-memory domain types.

use serde::{Deserialize, Serialize};

/// JSON shape of the `actor_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// JSON shape of the `cause_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CauseData {
    pub id: String,
    pub description: String,
}

/// JSON shape of the `action_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ActionData {
    pub name: String,
    pub entity: String,
    pub details: Option<String>,
}

/// JSON shape of the snapshot columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StateSnapshotData {
    pub data: String,
}

/// JSON shape of one entry in the `sub_sections_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SubSectionData {
    pub sub_section_id: i64,
    pub name: String,
}
