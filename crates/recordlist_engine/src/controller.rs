use std::sync::Arc;
use std::time::Duration;

use engine_logging::engine_debug;
use recordlist_core::{update, Effect, ListViewModel, Msg, Record, SearchSettings, SearchState};

use crate::{EngineEvent, EngineHandle, NavigationService};

/// Subscriber notified with a complete view after every state change.
pub trait ViewObserver {
    fn view_changed(&mut self, view: &ListViewModel);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ListViewModel),
{
    fn view_changed(&mut self, view: &ListViewModel) {
        self(view)
    }
}

/// Drives [`SearchState`] from UI events and engine events.
///
/// Every message is applied in one step and observers are only notified
/// afterwards, so they never see a half-applied update.
pub struct SearchListController {
    state: SearchState,
    engine: EngineHandle,
    navigator: Arc<dyn NavigationService>,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl SearchListController {
    pub fn new(
        settings: SearchSettings,
        engine: EngineHandle,
        navigator: Arc<dyn NavigationService>,
    ) -> Self {
        Self {
            state: SearchState::with_settings(settings),
            engine,
            navigator,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn view(&self) -> ListViewModel {
        self.state.view()
    }

    pub fn on_mount(&mut self) {
        self.dispatch(Msg::Mounted);
    }

    pub fn on_unmount(&mut self) {
        self.dispatch(Msg::Unmounted);
    }

    pub fn on_refresh(&mut self) {
        self.dispatch(Msg::Refresh);
    }

    pub fn on_search_input(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::SearchInput(text.into()));
    }

    pub fn on_row_action(&mut self, action: impl Into<String>, row: Record) {
        self.dispatch(Msg::RowAction {
            action: action.into(),
            row,
        });
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        self.state = state;

        self.run_effects(effects);

        if changed {
            let view = self.state.view();
            for observer in &mut self.observers {
                observer.view_changed(&view);
            }
        }
    }

    /// Applies every engine event that is ready. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            self.dispatch(event_to_msg(event));
            applied += 1;
        }
        applied
    }

    /// Blocks up to `timeout` for one engine event and applies it.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                self.dispatch(event_to_msg(event));
                true
            }
            None => false,
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleSearch {
                    generation,
                    text,
                    delay,
                } => {
                    engine_debug!(
                        "ScheduleSearch generation={} text_len={}",
                        generation,
                        text.len()
                    );
                    self.engine.schedule_search(generation, text, delay);
                }
                Effect::CancelSearch => self.engine.cancel_search(),
                Effect::Fetch { request_id, query } => {
                    engine_debug!("Fetch request_id={} query={:?}", request_id, query);
                    self.engine.fetch(request_id, query);
                }
                Effect::Navigate { record_id, kind } => {
                    self.navigator.navigate_to_record(&record_id, kind);
                }
            }
        }
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation, text } => {
            Msg::DebounceElapsed { generation, text }
        }
        EngineEvent::FetchCompleted { request_id, result } => {
            Msg::FetchCompleted { request_id, result }
        }
    }
}
