// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while reading source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database file does not exist.
    DatabaseNotFound(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A reference table could not be opened.
    ReferenceFileUnreadable { path: String, reason: String },
    /// A reference table row could not be decoded.
    ReferenceRowInvalid {
        path: String,
        line: u64,
        reason: String,
    },
    /// A reference table value violates a domain rule.
    InvalidReferenceData(String),
    /// Initialization error.
    InitializationError(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseNotFound(path) => write!(f, "Database not found: {path}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReferenceFileUnreadable { path, reason } => {
                write!(f, "Cannot read reference table {path}: {reason}")
            }
            Self::ReferenceRowInvalid { path, line, reason } => {
                write!(f, "Invalid row in {path} at line {line}: {reason}")
            }
            Self::InvalidReferenceData(msg) => write!(f, "Invalid reference data: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<boundary_recon_domain::DomainError> for PersistenceError {
    fn from(err: boundary_recon_domain::DomainError) -> Self {
        Self::InvalidReferenceData(err.to_string())
    }
}
