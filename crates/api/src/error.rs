// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use scolaris::{ErrorKind, LifecycleError};
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires the {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract: each variant corresponds to one HTTP status class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires the {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A referenced record does not exist.
    #[error("Not found: {message}")]
    ResourceNotFound {
        /// A human-readable description.
        message: String,
    },
    /// An invariant would be violated; the caller must resolve and resubmit.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// The operation is not valid for the current lifecycle state.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A human-readable description.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description.
        message: String,
    },
    /// Storage or a collaborator could not be reached; the caller may retry.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// A human-readable description.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        let message: String = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => Self::ResourceNotFound { message },
            ErrorKind::Conflict => Self::Conflict { message },
            ErrorKind::InvalidState => Self::InvalidState { message },
            ErrorKind::Unavailable => Self::ServiceUnavailable { message },
        }
    }
}
