// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The internal RPC surface exposed to sibling services.
//!
//! Requests are pattern-matched messages: the `pattern` tag selects the
//! operation, mirroring the subject names sibling services publish on. The
//! actual transport is an adapter concern; this module only defines the
//! message contract and its dispatch.

use scolaris::SemesterLifecycle;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::request_response::SemesterResponse;

/// An inbound RPC message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum RpcRequest {
    /// Returns the currently active semester, or none.
    GetValidSemester,
    /// Returns a semester by id.
    GetSemester {
        /// The semester id.
        semester_id: i64,
    },
    /// Returns the semester chronologically preceding the given one.
    GetLastSemester {
        /// The semester id.
        semester_id: i64,
    },
}

/// The response to any semester-valued RPC message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// The semester, when one matched.
    pub semester: Option<SemesterResponse>,
}

/// Dispatches one RPC message against the lifecycle.
///
/// The RPC surface is internal: sibling services are trusted, so there is
/// no role check here.
///
/// # Errors
///
/// Returns an error if `GetSemester` names an unknown id or the store
/// cannot be read.
pub fn dispatch(
    lifecycle: &mut SemesterLifecycle,
    request: &RpcRequest,
) -> Result<RpcResponse, ApiError> {
    match request {
        RpcRequest::GetValidSemester => {
            let current = lifecycle.current_semester()?;
            Ok(RpcResponse {
                semester: current.as_ref().map(SemesterResponse::from_domain),
            })
        }
        RpcRequest::GetSemester { semester_id } => {
            let semester = lifecycle.semester(*semester_id)?;
            Ok(RpcResponse {
                semester: Some(SemesterResponse::from_domain(&semester)),
            })
        }
        RpcRequest::GetLastSemester { semester_id } => {
            let previous = lifecycle.last_semester(*semester_id)?;
            Ok(RpcResponse {
                semester: previous.as_ref().map(SemesterResponse::from_domain),
            })
        }
    }
}
