//! Error types for the post-processing pipeline
//!
//! This module defines the error types used throughout the crate,
//! covering renderer-backend failures, GPU allocation failures, and
//! misuse of the pass interface.

use std::fmt;

/// Result type for post-processing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Post-processing pipeline errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (renderer refused an operation)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (missing shader kernel, bad render target, etc.)
    InvalidResource(String),

    /// Initialization failed (composer, facade, plugin registry)
    InitializationFailed(String),

    /// Operation must be implemented by a concrete pass type
    NotImplemented(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::NotImplemented(msg) => write!(f, "Not implemented: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR and return early with `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// fx_bail!("galaxy3d::Composer", "render target '{}' already exists", name);
/// ```
#[macro_export]
macro_rules! fx_bail {
    ($source:expr, $($arg:tt)*) => {{
        $crate::fx_error!($source, $($arg)*);
        return Err($crate::galaxy3d::Error::BackendError(format!($($arg)*)));
    }};
}

/// Log an ERROR and produce an `Error::BackendError` value
///
/// Unlike [`fx_bail!`] this is an expression, usable inside
/// `ok_or_else`/`map_err` closures.
#[macro_export]
macro_rules! fx_err {
    ($source:expr, $($arg:tt)*) => {{
        $crate::fx_error!($source, $($arg)*);
        $crate::galaxy3d::Error::BackendError(format!($($arg)*))
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
