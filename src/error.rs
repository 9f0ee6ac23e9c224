//! Error types for site interpolation.
//!
//! Every failure aborts the whole request; nothing here is partial.

use thiserror::Error;

/// Result type alias for interpolation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, arranging or interpolating sites
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A collaborator could not resolve a site or its samples
    #[error("Upstream data error for site {site}: {reason}")]
    Upstream { site: String, reason: String },

    /// Degenerate or distorted support configuration
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Target lies outside the range spanned by a 2-site support
    #[error("Target ({x}, {y}) outside interpolation bounds x=[{x_lo}, {x_hi}], y=[{y_lo}, {y_hi}]")]
    OutOfBounds {
        x: f64,
        y: f64,
        x_lo: f64,
        x_hi: f64,
        y_lo: f64,
        y_hi: f64,
    },

    /// Sample sequences could not be reconciled across sites
    #[error("Data alignment error: {0}")]
    DataAlignment(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed sample selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

impl Error {
    pub(crate) fn upstream(site: &str, reason: impl Into<String>) -> Self {
        Error::Upstream {
            site: site.to_string(),
            reason: reason.into(),
        }
    }
}
