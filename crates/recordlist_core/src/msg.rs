use crate::{FetchError, Record};

/// Identifier of one fetch request issued by the state machine.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Component mounted; triggers the initial unfiltered fetch.
    Mounted,
    /// Component torn down; pending timers are cancelled and late results ignored.
    Unmounted,
    /// User edited the search box (raw, undebounced text).
    SearchInput(String),
    /// A debounce timer fired for the given generation.
    DebounceElapsed { generation: u64, text: String },
    /// Fetch service finished a request, successfully or not.
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<Record>, FetchError>,
    },
    /// User triggered an action on a table row.
    RowAction { action: String, row: Record },
    /// Reload the list for the current search term, skipping the debounce.
    Refresh,
}
