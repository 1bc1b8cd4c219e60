#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file in the upload area.
    FileSelected(crate::UploadCandidate),
    /// User edited the job description text.
    JobDescriptionChanged(String),
    /// User pressed "Analyze Resume".
    SubmitClicked,
    /// Engine completion for a submission.
    AnalysisFinished {
        submission_id: crate::SubmissionId,
        outcome: Result<crate::AnalysisResult, crate::AnalysisError>,
    },
    /// User pressed "Analyze Another Resume".
    ResetClicked,
    /// User closed the current notification.
    NotificationDismissed,
}
