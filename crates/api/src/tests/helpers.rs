// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedActor, Role};
use scolaris::SemesterLifecycle;
use scolaris_audit::Cause;
use scolaris_persistence::Persistence;

pub fn directive() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("dir-1"), Role::Directive)
}

pub fn teacher() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("tea-1"), Role::Teacher)
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Directive request"))
}

/// A lifecycle over a fresh in-memory database with an empty catalog.
pub fn lifecycle() -> SemesterLifecycle {
    Persistence::new_in_memory()
        .expect("in-memory database should initialize")
        .lifecycle()
}
