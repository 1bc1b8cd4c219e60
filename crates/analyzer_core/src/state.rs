use std::fmt;
use std::sync::Arc;

use crate::view_model::{AppViewModel, FormView, ResultView, Screen};
use crate::{categorize, AnalysisError, ValidationError};

pub type SubmissionId = u64;

/// Upper bound on an uploaded résumé, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A file chosen by the user, not yet validated.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub contents: Arc<[u8]>,
}

impl UploadCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: contents.len() as u64,
            mime_type: mime_type.into(),
            contents: contents.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.mime_type != PDF_MIME_TYPE {
            return Err(ValidationError::UnsupportedFileType {
                mime_type: self.mime_type.clone(),
            });
        }
        if self.size > MAX_UPLOAD_BYTES {
            return Err(ValidationError::FileTooLarge {
                size: self.size,
                max_bytes: MAX_UPLOAD_BYTES,
            });
        }
        Ok(())
    }
}

// Contents are elided; a résumé does not belong in debug output.
impl fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub match_percentage: f64,
    pub missing_keywords: Vec<String>,
    pub improvement_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    file: Option<UploadCandidate>,
    job_description: String,
    in_flight: bool,
    /// Submission whose completion will be applied; anything else is stale.
    active_submission: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    result: Option<AnalysisResult>,
    notification: Option<Notification>,
    last_error: Option<AnalysisError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match &self.result {
            Some(result) => Screen::Result(ResultView {
                match_percentage: result.match_percentage,
                rounded_percentage: result.match_percentage.round() as i64,
                category: categorize(result.match_percentage),
                missing_keywords: result.missing_keywords.clone(),
                improvement_summary: result.improvement_summary.clone(),
            }),
            None => Screen::Form(FormView {
                file_name: self.file.as_ref().map(|file| file.name.clone()),
                job_description: self.job_description.clone(),
                in_flight: self.in_flight,
                submit_enabled: !self.in_flight,
                submit_label: if self.in_flight {
                    "Analyzing..."
                } else {
                    "Analyze Resume"
                },
            }),
        };

        AppViewModel {
            screen,
            notification: self.notification.clone(),
            dirty: self.dirty,
        }
    }

    pub fn file(&self) -> Option<&UploadCandidate> {
        self.file.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn active_submission(&self) -> Option<SubmissionId> {
        self.active_submission
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// The error behind the current notification, for diagnostics.
    pub fn last_error(&self) -> Option<&AnalysisError> {
        self.last_error.as_ref()
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select_file(
        &mut self,
        candidate: UploadCandidate,
    ) -> Result<(), ValidationError> {
        candidate.validate()?;
        self.file = Some(candidate);
        self.clear_notification();
        self.mark_dirty();
        Ok(())
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        self.job_description = text;
        self.mark_dirty();
    }

    pub(crate) fn showing_result(&self) -> bool {
        self.result.is_some()
    }

    /// Allocates the next submission id and marks the form in flight.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.next_submission_id += 1;
        let submission_id = self.next_submission_id;
        self.active_submission = Some(submission_id);
        self.in_flight = true;
        self.clear_notification();
        self.mark_dirty();
        submission_id
    }

    /// Applies a completion. Returns false when the completion is stale.
    pub(crate) fn finish_submission(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if !self.in_flight || self.active_submission != Some(submission_id) {
            return false;
        }
        self.in_flight = false;
        self.active_submission = None;
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(error) => self.report(error),
        }
        self.mark_dirty();
        true
    }

    /// Clears the form and any result. Returns the submission that was in flight, if any.
    pub(crate) fn reset(&mut self) -> Option<SubmissionId> {
        let abandoned = if self.in_flight {
            self.active_submission
        } else {
            None
        };
        self.file = None;
        self.job_description.clear();
        self.in_flight = false;
        self.active_submission = None;
        self.result = None;
        self.clear_notification();
        self.mark_dirty();
        abandoned
    }

    pub(crate) fn report(&mut self, error: AnalysisError) {
        self.notification = Some(error.notification());
        self.last_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn clear_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
        self.last_error = None;
    }
}
