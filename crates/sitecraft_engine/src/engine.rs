use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use sitecraft_logging::{site_debug, site_warn};
use tokio_util::sync::CancellationToken;

use crate::generate::{GenerateSettings, Generator, ReqwestGenerator};
use crate::{EngineError, EngineEvent, GenerateError, GenerateRequest, RequestId};

enum EngineCommand {
    Generate {
        request_id: RequestId,
        request: GenerateRequest,
    },
    Cancel {
        request_id: RequestId,
    },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs generation requests on a background tokio runtime.
///
/// Completions are delivered on the receiver returned by [`EngineHandle::spawn`].
/// A cancelled request never produces an event.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        settings: GenerateSettings,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let generator = ReqwestGenerator::new(settings)?;
        Self::spawn_with(Arc::new(generator))
    }

    /// Same as [`EngineHandle::spawn`] with a caller-provided generator.
    pub fn spawn_with(
        generator: Arc<dyn Generator>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("sitecraft-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Generate {
                        request_id,
                        request,
                    } => {
                        let token = CancellationToken::new();
                        if let Ok(mut map) = in_flight.lock() {
                            map.insert(request_id, token.clone());
                        }
                        runtime.spawn(run_generation(
                            generator.clone(),
                            request_id,
                            request,
                            token,
                            in_flight.clone(),
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::Cancel { request_id } => {
                        let token = in_flight
                            .lock()
                            .ok()
                            .and_then(|mut map| map.remove(&request_id));
                        match token {
                            Some(token) => token.cancel(),
                            None => site_debug!("Cancel for unknown request_id={}", request_id),
                        }
                    }
                }
            }
            // Handle dropped: abandon whatever is still running.
            if let Ok(map) = in_flight.lock() {
                map.values().for_each(CancellationToken::cancel);
            };
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn generate(&self, request_id: RequestId, request: GenerateRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Generate {
                request_id,
                request,
            })
            .is_err()
        {
            site_warn!("Engine stopped; dropping request_id={}", request_id);
        }
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }
}

async fn run_generation(
    generator: Arc<dyn Generator>,
    request_id: RequestId,
    request: GenerateRequest,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result: Option<Result<String, GenerateError>> = tokio::select! {
        _ = token.cancelled() => None,
        result = generator.generate(&request) => Some(result),
    };

    if let Ok(mut map) = in_flight.lock() {
        map.remove(&request_id);
    }

    match result {
        Some(result) => {
            let _ = event_tx.send(EngineEvent::GenerationCompleted { request_id, result });
        }
        None => site_debug!("Generation request_id={} cancelled", request_id),
    }
}
