use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::mpsc;

use analyzer_core::{update, AppState, Msg, MAX_UPLOAD_BYTES};
use analyzer_engine::load_upload;
use analyzer_logging::analyzer_debug;
use anyhow::{Context, Result};

use super::effects::{upload_candidate, EffectRunner};
use super::ui;
use super::Cli;

pub fn run_app(cli: Cli) -> Result<ExitCode> {
    run_with_output(cli, io::stdout())
}

/// One analysis from the command line, rendering every frame to `out`.
///
/// Succeeds only when the result view is reached.
fn run_with_output<W: Write>(cli: Cli, out: W) -> Result<ExitCode> {
    let job_description = cli.read_job_description()?;
    let upload = load_upload(&cli.resume, MAX_UPLOAD_BYTES)
        .with_context(|| format!("loading resume {}", cli.resume.display()))?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(cli.settings(), msg_tx);
    let mut session = Session::new(runner, out);

    session.dispatch(Msg::FileSelected(upload_candidate(upload)))?;
    session.dispatch(Msg::JobDescriptionChanged(job_description))?;
    session.dispatch(Msg::SubmitClicked)?;
    session.wait_for_completion(&msg_rx)?;

    Ok(if session.state().result().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Drives the core state machine: applies messages, runs effects, renders on change.
struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    last_frame: Option<String>,
}

impl<W: Write> Session<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            last_frame: None,
        }
    }

    fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    fn wait_for_completion(&mut self, msg_rx: &mpsc::Receiver<Msg>) -> Result<()> {
        while self.state.in_flight() {
            let msg = msg_rx.recv().context("analysis engine stopped")?;
            analyzer_debug!("Received {:?}", msg);
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = ui::render::render(&self.state.view());
        if self.last_frame.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }
        writeln!(self.out, "{frame}")?;
        self.out.flush()?;
        self.last_frame = Some(frame);
        Ok(())
    }
}
