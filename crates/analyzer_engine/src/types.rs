use std::fmt;

use bytes::Bytes;

pub type SubmissionId = u64;

/// A file ready to be sent as the `file` multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub contents: Bytes,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.contents.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file: UploadFile,
    pub job_description: String,
}

/// Normalized analysis returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub match_percentage: f64,
    pub missing_keywords: Vec<String>,
    pub improvement_summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AnalysisCompleted {
        submission_id: SubmissionId,
        result: Result<AnalysisReport, AnalyzeError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalyzeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<MalformedResponse> for AnalyzeError {
    fn from(err: MalformedResponse) -> Self {
        let message = err.to_string();
        Self::new(FailureKind::Malformed(err), message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    /// Non-2xx status; the body is kept verbatim.
    HttpStatus { status: u16, body: String },
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Malformed(MalformedResponse),
}

impl FailureKind {
    /// True when no usable response reached the client.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidEndpoint | FailureKind::Timeout | FailureKind::Network
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus { status, .. } => write!(f, "http status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed(err) => write!(f, "{err}"),
        }
    }
}

/// Why a 2xx body could not be turned into an [`AnalysisReport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("response body is not a {{\"result\": string}} object: {message}")]
    InvalidEnvelope { message: String },
    #[error("no JSON object found")]
    NoJsonObject,
    #[error("invalid JSON: {message}")]
    InvalidJson { raw: String, message: String },
    #[error("match_score is missing")]
    MissingMatchScore,
    #[error("match_score is not a number")]
    InvalidMatchScore,
}

impl MalformedResponse {
    /// The extracted text that failed to parse, when there was one.
    pub fn raw(&self) -> Option<&str> {
        match self {
            MalformedResponse::InvalidJson { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
