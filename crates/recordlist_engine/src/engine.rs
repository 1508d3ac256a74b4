use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use recordlist_core::{FetchError, Query, RequestId};

use crate::debounce::Debouncer;
use crate::fetch::{run_query, RecordFetchService};
use crate::EngineEvent;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] io::Error),
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        query: Query,
    },
    ScheduleSearch {
        generation: u64,
        text: String,
        delay: Duration,
    },
    CancelSearch,
}

/// Handle to the engine thread that runs timers and fetches.
///
/// Commands go in and [`EngineEvent`]s come out over channels; the owner
/// of the handle applies events to state on its own thread. Dropping the
/// handle stops the engine and aborts anything still pending.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn RecordFetchService>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("recordlist-engine".to_string())
            .spawn(move || {
                let mut debouncer = Debouncer::new();
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Fetch { request_id, query } => {
                            let service = service.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                handle_fetch(service, request_id, query, event_tx).await;
                            });
                        }
                        EngineCommand::ScheduleSearch {
                            generation,
                            text,
                            delay,
                        } => {
                            debouncer.schedule(
                                runtime.handle(),
                                generation,
                                text,
                                delay,
                                event_tx.clone(),
                            );
                        }
                        EngineCommand::CancelSearch => debouncer.cancel(),
                    }
                }
                engine_debug!("Engine command channel closed; shutting down");
                debouncer.cancel();
                runtime.shutdown_background();
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch(&self, request_id: RequestId, query: Query) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { request_id, query });
    }

    pub fn schedule_search(&self, generation: u64, text: impl Into<String>, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleSearch {
            generation,
            text: text.into(),
            delay,
        });
    }

    pub fn cancel_search(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSearch);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Runs one fetch to completion and always reports back, even if the
/// service panics.
async fn handle_fetch(
    service: Arc<dyn RecordFetchService>,
    request_id: RequestId,
    query: Query,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let task = tokio::spawn(async move { run_query(service.as_ref(), &query).await });
    let result = match task.await {
        Ok(result) => result,
        Err(err) => {
            engine_error!("Fetch task for request {} failed: {}", request_id, err);
            Err(FetchError::with_message(format!("fetch task failed: {err}")))
        }
    };
    let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
}
