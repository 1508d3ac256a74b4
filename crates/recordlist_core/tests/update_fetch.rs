use std::sync::Once;

use pretty_assertions::assert_eq;
use recordlist_core::{
    update, EmptyState, Effect, FetchError, Msg, Query, Record, RequestId, SearchState,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn accounts(names: &[&str]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            Record::from_value(json!({"Id": format!("00{}", idx + 1), "Name": name}))
                .expect("object")
        })
        .collect()
}

fn search(state: SearchState, text: &str) -> (SearchState, RequestId) {
    let (state, effects) = update(state, Msg::SearchInput(text.to_string()));
    let generation = match effects.as_slice() {
        [Effect::ScheduleSearch { generation, .. }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, effects) = update(
        state,
        Msg::DebounceElapsed {
            generation,
            text: text.to_string(),
        },
    );
    match effects.as_slice() {
        [Effect::Fetch { request_id, .. }] => (state, *request_id),
        other => panic!("unexpected effects {other:?}"),
    }
}

fn complete(
    state: SearchState,
    request_id: RequestId,
    result: Result<Vec<Record>, FetchError>,
) -> SearchState {
    let (state, effects) = update(state, Msg::FetchCompleted { request_id, result });
    assert!(effects.is_empty());
    state
}

#[test]
fn new_state_starts_loading() {
    let view = SearchState::new().view();
    assert!(view.is_loading);
    assert!(!view.has_records);
    assert_eq!(view.empty_state, Some(EmptyState::Loading));
}

#[test]
fn mount_fetches_all_and_populates_records() {
    init_logging();
    let (state, effects) = update(SearchState::new(), Msg::Mounted);
    assert!(state.is_loading());
    let request_id = state.latest_request().expect("request");
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            request_id,
            query: Query::All,
        }]
    );

    let mut state = complete(state, request_id, Ok(accounts(&["Acme", "Globex", "Initech"])));
    let view = state.view();

    assert!(view.has_records);
    assert_eq!(view.record_count, 3);
    assert!(!view.is_loading);
    assert_eq!(view.error_message, "");
    assert_eq!(view.empty_state, None);
    assert!(state.consume_dirty());
}

#[test]
fn failed_mount_clears_loading() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let request_id = state.latest_request().expect("request");

    let state = complete(
        state,
        request_id,
        Err(FetchError::with_message("insufficient access")),
    );

    assert!(!state.is_loading());
    assert_eq!(state.error_message(), "insufficient access");
}

#[test]
fn keyword_failure_empties_records_and_keeps_message() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let request_id = state.latest_request().expect("request");
    let state = complete(state, request_id, Ok(accounts(&["Acme"])));

    let (state, request_id) = search(state, "acme");
    assert!(state.is_loading());
    let state = complete(state, request_id, Err(FetchError::with_body("timeout")));
    let view = state.view();

    assert!(view.records.is_empty());
    assert_eq!(view.error_message, "timeout");
    assert!(!view.is_loading);
    assert_eq!(
        view.empty_state,
        Some(EmptyState::Failed {
            message: "timeout".to_string()
        })
    );
}

#[test]
fn success_after_failure_clears_error() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let request_id = state.latest_request().expect("request");
    let state = complete(state, request_id, Err(FetchError::default()));
    assert!(state.error().is_some());

    let (state, request_id) = search(state, "glob");
    let state = complete(state, request_id, Ok(accounts(&["Globex"])));

    assert!(state.error().is_none());
    assert_eq!(state.record_count(), 1);
}

#[test]
fn records_and_error_are_never_both_populated() {
    init_logging();
    let (mut state, _) = update(SearchState::new(), Msg::Mounted);
    let outcomes = vec![
        Ok(accounts(&["Acme", "Globex"])),
        Err(FetchError::with_body("boom")),
        Ok(accounts(&["Initech"])),
        Err(FetchError::default()),
        Ok(Vec::new()),
    ];

    for (idx, outcome) in outcomes.into_iter().enumerate() {
        let (next, request_id) = search(state, &format!("term{idx}"));
        state = complete(next, request_id, outcome);
        let view = state.view();
        assert!(!(view.has_records && state.error().is_some()));
        assert!(!view.is_loading);
    }
}

#[test]
fn zero_matches_is_distinct_from_failure() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let request_id = state.latest_request().expect("request");
    let state = complete(state, request_id, Ok(Vec::new()));
    let (state, request_id) = search(state, "zzz");
    let state = complete(state, request_id, Ok(Vec::new()));

    assert!(state.error().is_none());
    assert_eq!(
        state.view().empty_state,
        Some(EmptyState::NoMatches {
            term: "zzz".to_string()
        })
    );
}

#[test]
fn stale_completion_does_not_overwrite_newer_results() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let mount_id = state.latest_request().expect("request");
    let state = complete(state, mount_id, Ok(Vec::new()));

    let (state, older) = search(state, "ac");
    let (state, newer) = search(state, "acme");
    assert!(newer > older);

    let state = complete(state, newer, Ok(accounts(&["Acme Corp"])));
    let before = state.clone();
    let state = complete(state, older, Ok(accounts(&["Acme", "Acorn", "Action"])));

    assert_eq!(state, before);
    assert_eq!(state.record_count(), 1);
}

#[test]
fn stale_completion_while_newer_in_flight_keeps_loading() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let mount_id = state.latest_request().expect("request");
    let state = complete(state, mount_id, Ok(Vec::new()));

    let (state, older) = search(state, "ac");
    let (state, newer) = search(state, "acme");

    let state = complete(state, older, Err(FetchError::with_body("slow")));
    assert!(state.is_loading());
    assert!(state.error().is_none());

    let state = complete(state, newer, Ok(accounts(&["Acme"])));
    assert!(!state.is_loading());
    assert_eq!(state.record_count(), 1);
}

#[test]
fn completion_after_unmount_is_ignored() {
    init_logging();
    let (state, _) = update(SearchState::new(), Msg::Mounted);
    let request_id = state.latest_request().expect("request");
    let (state, _) = update(state, Msg::Unmounted);

    let state = complete(state, request_id, Ok(accounts(&["Acme"])));

    assert!(!state.has_records());
}
