use recordlist_core::{FetchError, Record, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    DebounceElapsed {
        generation: u64,
        text: String,
    },
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<Record>, FetchError>,
    },
}
