// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod rpc;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{ApiError, AuthError};
pub use handlers::{
    create_semester, current_semester, finish_semester, init_semester,
    interrupt_finish_semester, list_semesters, repeating_students, semesters_by_year,
    update_semester,
};
pub use request_response::{
    AdvanceEntry, CreateSemesterRequest, FailedEntry, FinishSemesterRequest,
    FinishSemesterResponse, InitSemesterResponse, InterruptResponse, ModuleResponse,
    RepeatingBatchResponse, SemesterResponse, UpdateSemesterRequest,
};
pub use rpc::{RpcRequest, RpcResponse, dispatch};
