use thiserror::Error;

use crate::{Notification, MAX_UPLOAD_BYTES};

/// A rejected file selection. The previously selected file is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type {mime_type:?}, expected application/pdf")]
    UnsupportedFileType { mime_type: String },
    #[error("file is {size} bytes, limit is {max_bytes}")]
    FileTooLarge { size: u64, max_bytes: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Resume,
    JobDescription,
}

impl MissingField {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingField::Resume => "resume",
            MissingField::JobDescription => "job description",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("missing input: {}", .0.as_str())]
    MissingInput(MissingField),
    #[error("analysis service unreachable: {message}")]
    Transport { message: String },
    #[error("analysis service returned status {status}: {body}")]
    Server { status: u16, body: String },
    #[error("malformed analysis response: {reason}")]
    MalformedResponse { reason: String, raw: Option<String> },
}

impl AnalysisError {
    /// User-facing message for this error.
    ///
    /// Server bodies stay out of the notification; only the status is shown.
    pub fn notification(&self) -> Notification {
        match self {
            AnalysisError::Validation(ValidationError::UnsupportedFileType { .. }) => {
                Notification::new("Invalid file type", "Please upload a PDF file")
            }
            AnalysisError::Validation(ValidationError::FileTooLarge { .. }) => Notification::new(
                "File too large",
                format!(
                    "Please upload a PDF no larger than {} MB",
                    MAX_UPLOAD_BYTES / (1024 * 1024)
                ),
            ),
            AnalysisError::MissingInput(MissingField::Resume) => {
                Notification::new("Missing resume", "Please upload your resume")
            }
            AnalysisError::MissingInput(MissingField::JobDescription) => {
                Notification::new("Missing job description", "Please enter the job description")
            }
            AnalysisError::Transport { .. } => Notification::new(
                "Connection failed",
                "Could not reach the analysis service. Please try again.",
            ),
            AnalysisError::Server { status, .. } => Notification::new(
                "Analysis failed",
                format!("The analysis service responded with status {status}. Please try again."),
            ),
            AnalysisError::MalformedResponse { .. } => Notification::new(
                "Analysis failed",
                "Could not analyze your resume. Please try again.",
            ),
        }
    }
}
