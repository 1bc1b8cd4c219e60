//! Analyzer core: pure state machine for the résumé submission form and its view model.
mod effect;
mod error;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{AnalysisError, MissingField, ValidationError};
pub use msg::Msg;
pub use state::{
    AnalysisResult, AppState, Notification, SubmissionId, UploadCandidate, MAX_UPLOAD_BYTES,
    PDF_MIME_TYPE,
};
pub use update::update;
pub use view_model::{
    categorize, AppViewModel, FormView, ResultView, ScoreCategory, ScoreTier, Screen,
};
