//! # Store Error Types
//!
//! Error types for snapshot persistence and the services built on it.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds persistence context                   │
//! │       ▲                                                                 │
//! │       │                                                                 │
//! │  CoreError (sweetslice-core) ← Business rule violations pass through   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer displays user-friendly message                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable at the caller boundary; nothing here aborts
//! the process. Load failures specifically never surface at all: the store
//! treats them as "no prior state" and reseeds (see [`crate::snapshot`]).

use thiserror::Error;

use sweetslice_core::CoreError;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot file I/O failed.
    ///
    /// ## When This Occurs
    /// - Directory not writable
    /// - Disk full
    /// - Rename of the temp file failed
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failed.
    ///
    /// Only the serialize direction ever propagates; a deserialize failure on
    /// load is treated as an absent snapshot.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Credential hashing failed.
    ///
    /// argon2's error type is not `std::error::Error`, so it is carried as a
    /// message.
    #[error("Credential hashing failed: {0}")]
    Credential(String),

    /// Business rule violation from the core (passes through unchanged).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<sweetslice_core::ValidationError> for StoreError {
    fn from(err: sweetslice_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
