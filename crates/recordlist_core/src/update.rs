use engine_logging::{engine_debug, engine_warn};

use crate::{Effect, Msg, Query, SearchState};

/// Row action that opens the record.
pub const VIEW_RECORD_ACTION: &str = "view_record";
/// Target kind passed to navigation for `view_record`.
pub const RECORD_KIND: &str = "Account";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SearchState, msg: Msg) -> (SearchState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            let request_id = state.begin_request();
            vec![Effect::Fetch {
                request_id,
                query: Query::All,
            }]
        }
        Msg::Unmounted => {
            state.abandon_pending();
            vec![Effect::CancelSearch]
        }
        Msg::SearchInput(text) => {
            state.set_search_term(text.clone());
            let generation = state.next_generation();
            vec![Effect::ScheduleSearch {
                generation,
                text,
                delay: state.settings().debounce,
            }]
        }
        Msg::DebounceElapsed { generation, text } => {
            if !state.is_current_generation(generation) {
                engine_debug!(
                    "Ignoring superseded debounce generation={} current={}",
                    generation,
                    state.debounce_generation()
                );
                return (state, Vec::new());
            }
            perform_search(&mut state, &text)
        }
        Msg::FetchCompleted { request_id, result } => {
            if !state.is_latest_request(request_id) {
                engine_debug!(
                    "Dropping stale fetch result request_id={} latest={:?}",
                    request_id,
                    state.latest_request()
                );
                return (state, Vec::new());
            }
            if let Err(err) = &result {
                engine_warn!("Fetch request {} failed: {}", request_id, err);
            }
            state.apply_result(result);
            Vec::new()
        }
        Msg::RowAction { action, row } => {
            if action != VIEW_RECORD_ACTION {
                return (state, Vec::new());
            }
            match row.id() {
                Some(record_id) => vec![Effect::Navigate {
                    record_id: record_id.to_string(),
                    kind: RECORD_KIND,
                }],
                None => {
                    engine_warn!("Row action {} on a row without an Id", action);
                    Vec::new()
                }
            }
        }
        Msg::Refresh => {
            state.next_generation();
            let text = state.search_term().to_string();
            let mut effects = vec![Effect::CancelSearch];
            effects.extend(perform_search(&mut state, &text));
            effects
        }
    };

    (state, effects)
}

fn perform_search(state: &mut SearchState, text: &str) -> Vec<Effect> {
    let request_id = state.begin_request();
    vec![Effect::Fetch {
        request_id,
        query: Query::for_term(text),
    }]
}
