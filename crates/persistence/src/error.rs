// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors surfaced by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database rejected or failed a statement.
    Statement(String),
    /// The database file or URL could not be opened.
    Connection(String),
    /// The embedded migrations could not be applied.
    Migration(String),
    /// The referenced row does not exist.
    NotFound(String),
    /// A stored row carries a value the domain cannot accept.
    CorruptRow(String),
    /// A JSON column could not be encoded or decoded.
    JsonColumn(String),
    /// The database was opened but a startup step failed.
    Initialization(String),
    /// `PRAGMA foreign_keys` reported enforcement disabled.
    ForeignKeysDisabled,
    /// The connection lock was poisoned by a panicking thread.
    Poisoned,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statement(msg) => write!(f, "Statement failed: {msg}"),
            Self::Connection(msg) => write!(f, "Could not open the database: {msg}"),
            Self::Migration(msg) => write!(f, "Could not apply migrations: {msg}"),
            Self::NotFound(msg) => write!(f, "No such row: {msg}"),
            Self::CorruptRow(msg) => write!(f, "Corrupt row: {msg}"),
            Self::JsonColumn(msg) => write!(f, "Bad JSON column: {msg}"),
            Self::Initialization(msg) => write!(f, "Database initialization failed: {msg}"),
            Self::ForeignKeysDisabled => {
                write!(f, "SQLite foreign key enforcement is disabled")
            }
            Self::Poisoned => write!(f, "Database connection lock was poisoned"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound(String::from("no matching row")),
            other => Self::Statement(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonColumn(err.to_string())
    }
}
