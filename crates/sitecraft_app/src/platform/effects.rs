use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use sitecraft_core::{DeviceMode, Effect, Msg};
use sitecraft_engine::{save_download, EngineEvent, EngineHandle, GenerateRequest};
use sitecraft_logging::{site_error, site_info};

use super::app::AppEvent;
use super::clipboard::ClipboardWriter;
use super::config::AppConfig;

/// Executes effects produced by `update` and feeds results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: ClipboardWriter,
    download_dir: PathBuf,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let (engine, engine_events) = EngineHandle::spawn(config.generate_settings())
            .context("starting generation engine")?;
        spawn_event_forwarder(engine_events, event_tx.clone());
        Ok(Self {
            engine,
            clipboard: ClipboardWriter::default(),
            download_dir: config.download_dir.clone(),
            event_tx,
        })
    }

    /// Runs the effects in order; returns notices for the user.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::Generate {
                    request_id,
                    prompt,
                    device_mode,
                } => {
                    site_info!(
                        "Generate request_id={} device_mode={} prompt_len={}",
                        request_id,
                        device_mode,
                        prompt.len()
                    );
                    self.engine.generate(
                        request_id,
                        GenerateRequest {
                            prompt,
                            device_mode: map_device_mode(device_mode),
                        },
                    );
                }
                Effect::CancelGeneration { request_id } => {
                    site_info!("CancelGeneration request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
                Effect::CopyToClipboard { id, text } => {
                    let succeeded = self.clipboard.copy(&text).is_ok();
                    let _ = self.event_tx.send(AppEvent::Msg(Msg::CopyFinished {
                        id,
                        succeeded,
                        at: Instant::now(),
                    }));
                }
                Effect::DownloadPreview { html } => {
                    match save_download(&self.download_dir, &html, Utc::now()) {
                        Ok(path) => {
                            site_info!("Saved download to {:?}", path);
                            notices.push(format!("Saved {}", path.display()));
                        }
                        Err(err) => {
                            site_error!("Download failed: {}", err);
                            notices.push(format!("Download failed: {err}"));
                        }
                    }
                }
            }
        }
        notices
    }
}

fn spawn_event_forwarder(events: mpsc::Receiver<EngineEvent>, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for event in events {
            let msg = match event {
                EngineEvent::GenerationCompleted { request_id, result } => match result {
                    Ok(html) => Msg::GenerationSucceeded { request_id, html },
                    Err(err) => Msg::GenerationFailed {
                        request_id,
                        detail: Some(err.message),
                    },
                },
            };
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}

fn map_device_mode(mode: DeviceMode) -> sitecraft_engine::DeviceMode {
    match mode {
        DeviceMode::Mobile => sitecraft_engine::DeviceMode::Mobile,
        DeviceMode::Tablet => sitecraft_engine::DeviceMode::Tablet,
        DeviceMode::Desktop => sitecraft_engine::DeviceMode::Desktop,
    }
}
