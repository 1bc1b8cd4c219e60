use crate::{SubmissionId, UploadCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the file and job description to the analysis endpoint.
    SubmitAnalysis {
        submission_id: SubmissionId,
        file: UploadCandidate,
        job_description: String,
    },
    /// Abandon an in-flight submission; its completion must not be reported.
    CancelAnalysis { submission_id: SubmissionId },
}
