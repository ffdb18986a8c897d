//! Error handling for Cutplay
//!
//! Every core error is raised before any buffer work starts, so a failed
//! operation leaves its input clips untouched.

use thiserror::Error;

/// Result type alias for Cutplay operations
pub type Result<T> = std::result::Result<T, CutplayError>;

/// Main error type for Cutplay operations
#[derive(Error, Debug)]
pub enum CutplayError {
    // Core Errors
    #[error("Invalid range: {reason}")]
    InvalidRange { reason: String },

    #[error("Format mismatch: {expected} vs {found}")]
    FormatMismatch { expected: String, found: String },

    #[error("Unsupported bit depth: {bit_depth} (only 16-bit PCM is supported)")]
    UnsupportedBitDepth { bit_depth: u16 },

    #[error("Empty input: {operation} needs at least one clip")]
    EmptyInput { operation: &'static str },

    // Ingestion Errors
    #[error("Invalid format: {reason}")]
    InvalidFormat { reason: String },

    #[error("Buffer of {len} bytes is not aligned to {frame_size}-byte frames")]
    Misaligned { len: usize, frame_size: usize },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {reason}")]
    Config { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CutplayError {
    /// Build an `InvalidRange` error from any displayable reason
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        CutplayError::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            CutplayError::InvalidRange { .. } => "INVALID_RANGE",
            CutplayError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            CutplayError::UnsupportedBitDepth { .. } => "UNSUPPORTED_BIT_DEPTH",
            CutplayError::EmptyInput { .. } => "EMPTY_INPUT",
            CutplayError::InvalidFormat { .. } => "INVALID_FORMAT",
            CutplayError::Misaligned { .. } => "MISALIGNED",
            CutplayError::FileNotFound { .. } => "FILE_NOT_FOUND",
            CutplayError::InvalidAudio { .. } => "INVALID_AUDIO",
            CutplayError::Config { .. } => "CONFIG_ERROR",
            CutplayError::Io(_) => "IO_ERROR",
            CutplayError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error can be fixed by changing the request
    ///
    /// Core operations are deterministic, so retrying with the same inputs
    /// never helps; recoverable here means "fix the arguments and try again".
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CutplayError::InvalidRange { .. }
                | CutplayError::FormatMismatch { .. }
                | CutplayError::EmptyInput { .. }
                | CutplayError::FileNotFound { .. }
                | CutplayError::Config { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            CutplayError::InvalidRange { .. } => vec![
                "Check that start and end times lie within the clip duration",
                "Make sure the end time is not before the start time",
            ],
            CutplayError::FormatMismatch { .. } => vec![
                "All clips in a mix or concat must share sample rate, bit depth and channels",
                "Convert the inputs to a common format first",
            ],
            CutplayError::UnsupportedBitDepth { .. } => {
                vec!["Convert the file to 16-bit PCM WAV before editing"]
            }
            CutplayError::EmptyInput { .. } => vec!["Pass at least one input clip"],
            CutplayError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            CutplayError::InvalidAudio { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            _ => vec![],
        }
    }
}
