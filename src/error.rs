//! Error types for serial-date.
//!
//! Absent dates are not errors: they come back as `0` or `None`. Everything
//! in [`DateUtilError`] is a caller mistake or a value the crate cannot
//! represent.

/// All errors that can occur while formatting, parsing or converting dates.
#[derive(Debug, thiserror::Error)]
pub enum DateUtilError {
    /// Format specifier lookup miss.
    #[error("unknown date format: {0:?}")]
    UnknownFormat(String),

    /// Period name lookup miss.
    #[error("unknown period type: {0:?}")]
    UnknownPeriod(String),

    /// Text input the parser does not accept.
    #[error("cannot parse date from {input:?}: {reason}")]
    UnparseableDate { input: String, reason: String },

    /// Value outside the representable range of an instant.
    #[error("date out of range: {0}")]
    OutOfRange(String),

    /// Settings TOML could not be decoded.
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// Settings file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl DateUtilError {
    /// True for lookup misses on caller-supplied names.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            DateUtilError::UnknownFormat(_) | DateUtilError::UnknownPeriod(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DateUtilError>;
