use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use analyzer_logging::{analyzer_debug, analyzer_info};
use tokio_util::sync::CancellationToken;

use crate::submit::{Analyzer, AnalyzerSettings, ReqwestAnalyzer};
use crate::{AnalysisRequest, EngineEvent, SubmissionId};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: AnalysisRequest,
    },
    Cancel {
        submission_id: SubmissionId,
    },
}

/// Runs analysis requests on a background tokio runtime.
///
/// Each submission reports exactly one `AnalysisCompleted`, unless it was
/// cancelled first, in which case it reports nothing.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self::with_analyzer(Arc::new(ReqwestAnalyzer::new(settings)))
    }

    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut current: Option<(SubmissionId, CancellationToken)> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit {
                        submission_id,
                        request,
                    } => {
                        let token = CancellationToken::new();
                        current = Some((submission_id, token.clone()));
                        let analyzer = analyzer.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_submission(
                                analyzer.as_ref(),
                                submission_id,
                                request,
                                token,
                                event_tx,
                            )
                            .await;
                        });
                    }
                    EngineCommand::Cancel { submission_id } => match current.take() {
                        Some((active, token)) if active == submission_id => {
                            analyzer_info!("Cancelling submission {}", submission_id);
                            token.cancel();
                        }
                        other => current = other,
                    },
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, submission_id: SubmissionId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            request,
        });
    }

    pub fn cancel(&self, submission_id: SubmissionId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { submission_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// `Disconnected` means the engine thread is gone and no event will ever arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }
}

async fn run_submission(
    analyzer: &dyn Analyzer,
    submission_id: SubmissionId,
    request: AnalysisRequest,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = tokio::select! {
        _ = token.cancelled() => {
            analyzer_debug!("Submission {} cancelled before completion", submission_id);
            return;
        }
        result = analyzer.analyze(&request) => result,
    };
    let _ = event_tx.send(EngineEvent::AnalysisCompleted {
        submission_id,
        result,
    });
}
