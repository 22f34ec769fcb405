// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! No error here is fatal: validation failures are reported back to the
//! user, geolocation failures disable map features, and storage failures on
//! the load path degrade to an empty workout list.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Non-finite or out-of-range form input. Reported to the user; nothing
    /// is created or persisted.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Position acquisition failed (permission denied or no provider).
    #[error("Geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    /// Blob store I/O failure.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
