use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors returned when reading an [`ImeString`](crate::ImeString).
///
/// Construction never fails: empty or null input yields an empty string and
/// oversized input is truncated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImeStringError {
    #[error("index {index} is out of range for an ImeString of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("unpaired UTF-16 surrogate at unit {index}")]
    InvalidUtf16 { index: usize },
}
