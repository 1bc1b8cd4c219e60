use crate::{AnalysisError, AppState, Effect, MissingField, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(candidate) => {
            if let Err(err) = state.select_file(candidate) {
                state.report(AnalysisError::Validation(err));
            }
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One request at a time; the form is hidden while a result is shown.
            if state.in_flight() || state.showing_result() {
                return (state, Vec::new());
            }
            let Some(file) = state.file().cloned() else {
                state.report(AnalysisError::MissingInput(MissingField::Resume));
                return (state, Vec::new());
            };
            if state.job_description().trim().is_empty() {
                state.report(AnalysisError::MissingInput(MissingField::JobDescription));
                return (state, Vec::new());
            }

            let job_description = state.job_description().to_owned();
            let submission_id = state.begin_submission();
            vec![Effect::SubmitAnalysis {
                submission_id,
                file,
                job_description,
            }]
        }
        Msg::AnalysisFinished {
            submission_id,
            outcome,
        } => {
            state.finish_submission(submission_id, outcome);
            Vec::new()
        }
        Msg::ResetClicked => match state.reset() {
            Some(submission_id) => vec![Effect::CancelAnalysis { submission_id }],
            None => Vec::new(),
        },
        Msg::NotificationDismissed => {
            state.clear_notification();
            Vec::new()
        }
    };

    (state, effects)
}
