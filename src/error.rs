//! Error types for codec-bench operations.

use thiserror::Error;

/// Result type alias for codec-bench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure class, used by the command line to pick its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input from the user (loop count, frame parameters).
    Usage,
    /// Failure signaled by the codec adapter.
    Codec,
    /// Decoded output differs from the source image.
    Verification,
    /// Anything else: I/O, serialization.
    Generic,
}

/// Errors that can occur while running a benchmark.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Loop count must be a positive integer.
    #[error("Invalid loop count: {0} (expected a positive integer)")]
    InvalidLoopCount(String),

    /// Frame parameters are out of range.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Error from a codec during encoding or decoding.
    #[error("Codec error ({codec}): {message}")]
    Codec {
        /// Codec identifier.
        codec: &'static str,
        /// Error message from the codec.
        message: String,
    },

    /// Encoded output did not fit in the preallocated destination.
    #[error("Codec error ({codec}): destination buffer too small ({capacity} bytes)")]
    DestinationTooSmall {
        /// Codec identifier.
        codec: &'static str,
        /// Capacity of the destination buffer.
        capacity: usize,
    },

    /// A buffer handed to the codec has the wrong length.
    #[error("Codec error ({codec}): {what} has {actual} samples, frame needs {expected}")]
    SizeMismatch {
        /// Codec identifier.
        codec: &'static str,
        /// Which buffer.
        what: &'static str,
        /// Samples required by the frame.
        expected: usize,
        /// Samples actually provided.
        actual: usize,
    },

    /// Round trip produced different samples.
    #[error("Round-trip verification failed: {mismatches} / {total} samples differ")]
    Verification {
        /// Number of differing samples.
        mismatches: usize,
        /// Total number of samples compared.
        total: usize,
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLoopCount(_) | Self::InvalidFrame(_) => ErrorKind::Usage,
            Self::Codec { .. } | Self::DestinationTooSmall { .. } | Self::SizeMismatch { .. } => {
                ErrorKind::Codec
            }
            Self::Verification { .. } => ErrorKind::Verification,
            Self::Io(_) | Self::Json(_) => ErrorKind::Generic,
        }
    }

    /// Shorthand for [`Error::Codec`].
    pub fn codec(codec: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Codec {
            codec,
            message: message.to_string(),
        }
    }
}
