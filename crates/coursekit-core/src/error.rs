//! Error handling for CourseKit.
//!
//! The fallible surface of the geometry layer is deliberately small:
//! construction-time validation of paths and scale ratios. Once an object
//! is built, its geometric operations are total over their documented
//! input domains.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for CourseKit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A symbol path failed validation.
    #[error("Invalid path: {reason}")]
    InvalidPath {
        /// Why the path was rejected.
        reason: String,
    },

    /// A course object was constructed with a non-positive scale ratio.
    #[error("Invalid scale ratio {value}; must be > 0")]
    InvalidScaleRatio {
        /// The offending ratio.
        value: f64,
    },

    /// A page layout was requested for an empty map area.
    #[error("Cannot lay out pages for an empty map area")]
    EmptyLayout,
}

impl Error {
    /// Create an [`Error::InvalidPath`] from a message.
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
