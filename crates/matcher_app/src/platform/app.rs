use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use matcher_core::{update, AppState, Msg};
use matcher_engine::ReqwestService;

use super::commands::{self, Command, HELP};
use super::config::{self, ClientConfig, CONFIG_FILENAME};
use super::documents::load_documents;
use super::effects::{AppInput, EffectRunner};
use super::ui::render::{render, render_notice};

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load(Path::new(CONFIG_FILENAME)).context("loading configuration")?;
    engine_logging::initialize(
        config.log_destination(),
        config.log_level(),
        &engine_logging::default_log_path(),
    );
    engine_info!("Using matching service at {}", config.base_address);

    let service = ReqwestService::new(config.service_settings())
        .with_context(|| format!("invalid base address {:?}", config.base_address))?;

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(Arc::new(service), input_tx.clone());
    spawn_stdin_reader(input_tx);

    let mut out = io::stdout().lock();
    writeln!(out, "Resume matcher client ({})", config.base_address)?;
    writeln!(out, "{HELP}")?;

    let mut session = Session::new(config, runner);
    session.print_view(&mut out)?;

    while let Ok(input) = input_rx.recv() {
        if !session.handle(input, &mut out)? {
            break;
        }
    }
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || forward_lines(io::stdin().lock(), &tx));
}

/// Sends each input line to the main loop, then `InputClosed`.
///
/// Lines that are not valid UTF-8 are converted lossily rather than ending input.
fn forward_lines(mut reader: impl BufRead, tx: &mpsc::Sender<AppInput>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                if tx.send(AppInput::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                engine_warn!("stdin read failed: {}", err);
                break;
            }
        }
    }
    let _ = tx.send(AppInput::InputClosed);
}

struct Session {
    config: ClientConfig,
    runner: EffectRunner,
    state: AppState,
    /// Set by `quit` or end of input; the loop ends once nothing is in flight.
    closing: bool,
}

impl Session {
    fn new(config: ClientConfig, runner: EffectRunner) -> Self {
        Self {
            config,
            runner,
            state: AppState::new(),
            closing: false,
        }
    }

    /// Returns `false` when the session is over.
    fn handle(&mut self, input: AppInput, out: &mut impl Write) -> io::Result<bool> {
        match input {
            AppInput::Line(line) => self.handle_line(&line, out)?,
            AppInput::Engine(event) => self.dispatch(event.into_msg(), out)?,
            AppInput::InputClosed => self.closing = true,
        }

        if self.closing {
            if !self.state.is_busy() {
                return Ok(false);
            }
            writeln!(
                out,
                "Waiting for {} request(s) to settle...",
                self.state.in_flight_count()
            )?;
        }
        Ok(true)
    }

    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let command = match commands::parse(line, self.config.top_k) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(err) => return writeln!(out, "{err}"),
        };

        let issues_request = matches!(
            command,
            Command::UploadOne | Command::UploadAll | Command::Match { .. }
        );
        if self.closing && issues_request {
            return writeln!(
                out,
                "Shutting down; waiting for {} request(s)",
                self.state.in_flight_count()
            );
        }

        let msg = match command {
            Command::SelectFiles(paths) => {
                let (documents, failures) = load_documents(&paths);
                for failure in failures {
                    writeln!(out, "Skipped {failure}")?;
                }
                Msg::FilesSelected(documents)
            }
            Command::SetJobDescription(text) => Msg::JobDescriptionChanged(text),
            Command::AppendJobDescription(text) => {
                let current = self.state.selection().job_description();
                let combined = if current.is_empty() {
                    text
                } else {
                    format!("{current}\n{text}")
                };
                Msg::JobDescriptionChanged(combined)
            }
            Command::UploadOne => Msg::UploadSingleClicked,
            Command::UploadAll => Msg::UploadBatchClicked,
            Command::Match { top_k } => Msg::MatchClicked { top_k },
            Command::Show => return self.print_view(out),
            Command::Help => return writeln!(out, "{HELP}"),
            Command::Quit => {
                self.closing = true;
                return Ok(());
            }
        };
        self.dispatch(msg, out)
    }

    fn dispatch(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for notice in self.runner.run(effects) {
            writeln!(out, "{}", render_notice(&notice))?;
        }
        if self.state.consume_dirty() {
            self.print_view(out)?;
        }
        Ok(())
    }

    fn print_view(&self, out: &mut impl Write) -> io::Result<()> {
        for line in render(&self.state.view()) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
