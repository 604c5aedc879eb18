use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use sitecraft_core::{update, AppState, Msg};
use sitecraft_logging::{site_error, site_info, site_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command, LineJoiner, HELP};
use super::ui::render::{format_transcript, PreviewWriter, TerminalRenderer};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the main loop reacts to, from any thread.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Command(Command),
    InputClosed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(&config, event_tx.clone())?;

    spawn_input_reader(event_tx.clone());
    spawn_ticker(event_tx);

    let mut app = App {
        state: AppState::new(),
        effects,
        renderer: TerminalRenderer::default(),
        preview: PreviewWriter::new(config.preview_path.clone()),
    };

    println!("SiteCraft AI: endpoint {}", config.generate_settings().endpoint());
    println!("Type /help for commands.");
    app.render();
    println!("Preview page: {}", app.preview.path().display());

    for event in event_rx {
        let keep_running = match event {
            AppEvent::Msg(msg) => {
                app.dispatch(msg);
                true
            }
            AppEvent::Command(command) => app.handle_command(command),
            AppEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }

    app.dispatch(Msg::SessionClosed);
    site_info!("Session closed");
    Ok(())
}

struct App {
    state: AppState,
    effects: EffectRunner,
    renderer: TerminalRenderer,
    preview: PreviewWriter,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let notices = self.effects.run(effects);
        if self.state.consume_dirty() {
            self.render();
        }
        for notice in notices {
            println!("{notice}");
        }
    }

    fn render(&mut self) {
        let view = self.state.view();
        for line in self.renderer.render(&view) {
            println!("{line}");
        }
        match self.preview.sync(&view.preview) {
            Ok(true) => site_info!("Preview page updated at {:?}", self.preview.path()),
            Ok(false) => {}
            Err(err) => site_error!("Failed to write preview page: {}", err),
        }
    }

    /// Returns false when the session should end.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Prompt(text) => {
                if self.state.is_generating() {
                    println!("Still generating the previous design; wait or /cancel.");
                } else {
                    self.dispatch(Msg::InputChanged(text));
                    self.dispatch(Msg::PromptSubmitted);
                }
            }
            Command::Device(mode) => self.dispatch(Msg::DeviceModeSelected(mode)),
            Command::Copy(position) => {
                let id = self
                    .state
                    .transcript()
                    .messages()
                    .get(position - 1)
                    .map(|message| message.id.clone());
                match id {
                    Some(id) => self.dispatch(Msg::CopyRequested { id }),
                    None => println!("No message [{position}]."),
                }
            }
            Command::Download => {
                if self.state.latest_download().is_none() {
                    println!("Nothing to download yet.");
                }
                self.dispatch(Msg::DownloadRequested);
            }
            Command::Regenerate => self.dispatch(Msg::RegenerateRequested),
            Command::Cancel => self.dispatch(Msg::CancelRequested),
            Command::Open => {
                if let Err(err) = open::that(self.preview.path()) {
                    site_warn!("Failed to open preview: {}", err);
                    println!("Could not open {}: {err}", self.preview.path().display());
                }
            }
            Command::Transcript => println!("{}", format_transcript(&self.state.view())),
            Command::Help => println!("{HELP}"),
            Command::Invalid(reason) => println!("{reason} (try /help)"),
            Command::Quit => return false,
        }
        true
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut joiner = LineJoiner::default();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    site_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let Some(input) = joiner.push(&line) else {
                continue;
            };
            if let Some(command) = parse_command(&input) {
                if event_tx.send(AppEvent::Command(command)).is_err() {
                    return;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

// Background tick drives copy-indicator expiry.
fn spawn_ticker(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while event_tx.send(AppEvent::Msg(Msg::Tick(Instant::now()))).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
}
