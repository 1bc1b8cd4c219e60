use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use analyzer_core::{AnalysisError, AnalysisResult, Effect, Msg, UploadCandidate};
use analyzer_engine::{
    AnalysisReport, AnalysisRequest, AnalyzeError, AnalyzerSettings, EngineEvent, EngineHandle,
    FailureKind, UploadFile,
};
use analyzer_logging::{analyzer_error, analyzer_info, analyzer_warn};
use bytes::Bytes;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: AnalyzerSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self {
            engine: EngineHandle::new(settings),
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis {
                    submission_id,
                    file,
                    job_description,
                } => {
                    analyzer_info!(
                        "SubmitAnalysis submission_id={} file={} size={}",
                        submission_id,
                        file.name,
                        file.size
                    );
                    self.engine.submit(
                        submission_id,
                        AnalysisRequest {
                            file: upload_file(&file),
                            job_description,
                        },
                    );
                }
                Effect::CancelAnalysis { submission_id } => {
                    analyzer_info!("CancelAnalysis submission_id={}", submission_id);
                    self.engine.cancel(submission_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            forward_events(|timeout| engine.recv_timeout(timeout), msg_tx);
        });
    }
}

/// Turns engine events into messages until either side hangs up.
///
/// Returning drops `msg_tx`, so a receiver waiting on it sees the disconnect.
fn forward_events<F>(mut next_event: F, msg_tx: mpsc::Sender<Msg>)
where
    F: FnMut(Duration) -> Result<EngineEvent, RecvTimeoutError>,
{
    loop {
        let event = match next_event(EVENT_POLL_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                analyzer_error!("Analysis engine stopped; no further results will arrive");
                return;
            }
        };
        let msg = match event {
            EngineEvent::AnalysisCompleted {
                submission_id,
                result,
            } => Msg::AnalysisFinished {
                submission_id,
                outcome: match result {
                    Ok(report) => Ok(analysis_result(report)),
                    Err(err) => {
                        analyzer_warn!("Submission {} failed: {}", submission_id, err.kind);
                        Err(analysis_error(err))
                    }
                },
            },
        };
        if msg_tx.send(msg).is_err() {
            return;
        }
    }
}

/// Converts a selected file from the engine's loader into a form candidate.
pub fn upload_candidate(file: UploadFile) -> UploadCandidate {
    UploadCandidate::new(file.name, file.mime_type, file.contents.to_vec())
}

fn upload_file(candidate: &UploadCandidate) -> UploadFile {
    UploadFile {
        name: candidate.name.clone(),
        mime_type: candidate.mime_type.clone(),
        contents: Bytes::copy_from_slice(&candidate.contents),
    }
}

fn analysis_result(report: AnalysisReport) -> AnalysisResult {
    AnalysisResult {
        match_percentage: report.match_percentage,
        missing_keywords: report.missing_keywords,
        improvement_summary: report.improvement_summary,
    }
}

fn analysis_error(err: AnalyzeError) -> AnalysisError {
    if err.kind.is_transport() {
        return AnalysisError::Transport {
            message: err.message,
        };
    }
    match err.kind {
        FailureKind::HttpStatus { status, body } => AnalysisError::Server { status, body },
        FailureKind::Malformed(malformed) => AnalysisError::MalformedResponse {
            reason: malformed.to_string(),
            raw: malformed.raw().map(ToOwned::to_owned),
        },
        other => AnalysisError::MalformedResponse {
            reason: other.to_string(),
            raw: None,
        },
    }
}
