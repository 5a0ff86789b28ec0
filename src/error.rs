//! Error handling for vctag
//!
//! Every failure a tag write can hit is a variant here. `TagWriter::write`
//! folds these into `WriteResult::errors`; `try_write` hands them back as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vctag operations
pub type Result<T> = std::result::Result<T, TagWriteError>;

/// Main error type for tag write operations
#[derive(Error, Debug)]
pub enum TagWriteError {
    // Temp File Errors
    #[error("failed to open temporary tags file \"{}\", tags not written", .path.display())]
    TempFileCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write temporary tags file \"{}\": {source}", .path.display())]
    TempFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Tool Errors
    #[error("{program} not found in {location}")]
    ToolNotFound { program: String, location: String },

    #[error("{output}")]
    ToolReportedError { output: String },

    /// `path` is the target file; the message keeps the helper's wording.
    #[error("File modification timestamp has not changed - it looks like the tags were not written")]
    SilentFailure { path: PathBuf },

    #[error("vorbiscomment exited with status {code} without printing anything")]
    ToolExitStatus { code: i32 },

    // Input Errors
    #[error("Invalid tag argument (expected NAME=VALUE): {arg}")]
    InvalidTagArgument { arg: String },

    #[error("Failed to read tags file: {}: {source}", .path.display())]
    TagsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TagWriteError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            TagWriteError::TempFileCreationFailed { .. } => "TEMP_FILE_CREATION_FAILED",
            TagWriteError::TempFileWrite { .. } => "TEMP_FILE_WRITE",
            TagWriteError::ToolNotFound { .. } => "TOOL_NOT_FOUND",
            TagWriteError::ToolReportedError { .. } => "TOOL_REPORTED_ERROR",
            TagWriteError::SilentFailure { .. } => "SILENT_FAILURE",
            TagWriteError::ToolExitStatus { .. } => "TOOL_EXIT_STATUS",
            TagWriteError::InvalidTagArgument { .. } => "INVALID_TAG_ARGUMENT",
            TagWriteError::TagsFile { .. } => "TAGS_FILE",
            TagWriteError::Json(_) => "JSON_ERROR",
        }
    }

    /// True for failures that happened while talking to vorbiscomment.
    ///
    /// These are reported with the "system call to vorbiscomment failed"
    /// prefix; everything else is reported bare.
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            TagWriteError::ToolNotFound { .. }
                | TagWriteError::ToolReportedError { .. }
                | TagWriteError::SilentFailure { .. }
                | TagWriteError::ToolExitStatus { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            TagWriteError::TempFileCreationFailed { .. } => {
                Some("Check that the temp directory exists and is writable, or set VCTAG_TEMP_DIR.")
            }
            TagWriteError::ToolNotFound { .. } => Some(
                "Install vorbiscomment (vorbis-tools) or point VCTAG_HELPER_DIR at the helper directory.",
            ),
            TagWriteError::SilentFailure { .. } => {
                Some("Check that the file is not read-only or open in another program.")
            }
            TagWriteError::InvalidTagArgument { .. } => Some("Pass tags as NAME=VALUE."),
            _ => None,
        }
    }
}
