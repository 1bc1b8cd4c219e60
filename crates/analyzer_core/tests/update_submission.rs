use analyzer_core::{
    update, AnalysisError, AnalysisResult, AppState, Effect, Msg, Screen, ScoreTier,
    UploadCandidate, PDF_MIME_TYPE,
};

fn ready_form() -> AppState {
    let candidate = UploadCandidate::new("resume.pdf", PDF_MIME_TYPE, b"%PDF-1.7".to_vec());
    let (state, _) = update(AppState::new(), Msg::FileSelected(candidate));
    let (state, _) = update(
        state,
        Msg::JobDescriptionChanged("Backend engineer, Docker".to_string()),
    );
    state
}

fn submit(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    let submission_id = match &effects[0] {
        Effect::SubmitAnalysis { submission_id, .. } => *submission_id,
        other => panic!("unexpected effect {other:?}"),
    };
    (state, submission_id)
}

fn canonical_result() -> AnalysisResult {
    AnalysisResult {
        match_percentage: 72.0,
        missing_keywords: vec!["Docker".to_string()],
        improvement_summary: "Add Docker.".to_string(),
    }
}

#[test]
fn submit_emits_single_request_with_form_contents() {
    let (state, effects) = update(ready_form(), Msg::SubmitClicked);

    assert!(state.in_flight());
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitAnalysis {
            submission_id,
            file,
            job_description,
        } => {
            assert_eq!(*submission_id, 1);
            assert_eq!(file.name, "resume.pdf");
            assert_eq!(&*file.contents, b"%PDF-1.7");
            assert_eq!(job_description, "Backend engineer, Docker");
        }
        other => panic!("unexpected effect {other:?}"),
    }

    match state.view().screen {
        Screen::Form(form) => {
            assert!(form.in_flight);
            assert!(!form.submit_enabled);
            assert_eq!(form.submit_label, "Analyzing...");
        }
        Screen::Result(_) => panic!("expected form screen"),
    }
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let (state, first_id) = submit(ready_form());
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(state.in_flight());
    assert_eq!(state.active_submission(), Some(first_id));
}

#[test]
fn successful_completion_reaches_result_view() {
    let (state, submission_id) = submit(ready_form());
    let (state, effects) = update(
        state,
        Msg::AnalysisFinished {
            submission_id,
            outcome: Ok(canonical_result()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.in_flight());
    match state.view().screen {
        Screen::Result(result) => {
            assert_eq!(result.match_percentage, 72.0);
            assert_eq!(result.rounded_percentage, 72);
            assert_eq!(result.category.tier, ScoreTier::Good);
            assert_eq!(result.missing_keywords, vec!["Docker".to_string()]);
            assert_eq!(result.improvement_summary, "Add Docker.");
        }
        Screen::Form(_) => panic!("expected result screen"),
    }
}

#[test]
fn failed_completion_preserves_inputs_and_allows_retry() {
    let (state, submission_id) = submit(ready_form());
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            submission_id,
            outcome: Err(AnalysisError::Server {
                status: 502,
                body: "<html>bad gateway</html>".to_string(),
            }),
        },
    );

    assert!(!state.in_flight());
    assert_eq!(state.file().map(|f| f.name.as_str()), Some("resume.pdf"));
    assert_eq!(state.job_description(), "Backend engineer, Docker");
    let notification = state.view().notification.expect("notification");
    assert_eq!(notification.title, "Analysis failed");
    assert!(notification.description.contains("502"));
    assert!(!notification.description.contains("bad gateway"));

    let (state, retry_id) = submit(state);
    assert!(retry_id > submission_id);
    assert!(state.view().notification.is_none());
}

#[test]
fn transport_and_malformed_failures_surface_notifications() {
    let cases = [
        (
            AnalysisError::Transport {
                message: "connection refused".to_string(),
            },
            "Connection failed",
        ),
        (
            AnalysisError::MalformedResponse {
                reason: "no JSON object found".to_string(),
                raw: None,
            },
            "Analysis failed",
        ),
    ];
    for (error, title) in cases {
        let (state, submission_id) = submit(ready_form());
        let (state, _) = update(
            state,
            Msg::AnalysisFinished {
                submission_id,
                outcome: Err(error.clone()),
            },
        );
        assert_eq!(state.last_error(), Some(&error));
        assert_eq!(state.view().notification.unwrap().title, title);
        assert!(state.result().is_none());
    }
}

#[test]
fn reset_while_in_flight_cancels_and_discards_late_result() {
    let (state, submission_id) = submit(ready_form());
    let (state, effects) = update(state, Msg::ResetClicked);

    assert_eq!(effects, vec![Effect::CancelAnalysis { submission_id }]);
    assert!(!state.in_flight());
    assert!(state.file().is_none());
    assert_eq!(state.job_description(), "");

    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::AnalysisFinished {
            submission_id,
            outcome: Ok(canonical_result()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert!(state.result().is_none());
}

#[test]
fn completion_for_unknown_submission_is_ignored() {
    let (state, submission_id) = submit(ready_form());
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            submission_id: submission_id + 10,
            outcome: Ok(canonical_result()),
        },
    );
    assert!(state.in_flight());
    assert!(state.result().is_none());
}

#[test]
fn reset_after_result_returns_to_empty_form() {
    let (state, submission_id) = submit(ready_form());
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            submission_id,
            outcome: Ok(canonical_result()),
        },
    );
    let (mut state, effects) = update(state, Msg::ResetClicked);

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    match state.view().screen {
        Screen::Form(form) => {
            assert_eq!(form.file_name, None);
            assert_eq!(form.job_description, "");
            assert_eq!(form.submit_label, "Analyze Resume");
        }
        Screen::Result(_) => panic!("expected form screen"),
    }
}

#[test]
fn submit_is_ignored_while_result_is_shown() {
    let (state, submission_id) = submit(ready_form());
    let (state, _) = update(
        state,
        Msg::AnalysisFinished {
            submission_id,
            outcome: Ok(canonical_result()),
        },
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert!(!state.in_flight());
}

#[test]
fn submission_ids_increase_across_resets() {
    let (state, first) = submit(ready_form());
    let (state, _) = update(state, Msg::ResetClicked);
    let candidate = UploadCandidate::new("again.pdf", PDF_MIME_TYPE, b"%PDF".to_vec());
    let (state, _) = update(state, Msg::FileSelected(candidate));
    let (state, _) = update(state, Msg::JobDescriptionChanged("SRE".to_string()));
    let (_state, second) = submit(state);
    assert!(second > first);
}
