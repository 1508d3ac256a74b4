use std::sync::mpsc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::EngineEvent;

/// Owns the single pending debounce timer.
///
/// Scheduling aborts the previous timer before spawning the new one, so at
/// most one timer is ever pending. A timer that already fired is filtered by
/// its generation when the event is applied.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        runtime: &Handle,
        generation: u64,
        text: String,
        delay: Duration,
        events: mpsc::Sender<EngineEvent>,
    ) {
        self.cancel();
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(EngineEvent::DebounceElapsed { generation, text });
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
