use std::time::Duration;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any pending debounce timer with a new one.
    ScheduleSearch {
        generation: u64,
        text: String,
        delay: Duration,
    },
    /// Drop the pending debounce timer, if any.
    CancelSearch,
    Fetch { request_id: RequestId, query: Query },
    Navigate {
        record_id: String,
        kind: &'static str,
    },
}

/// Which fetch service operation a request maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    All,
    Keyword(String),
}

impl Query {
    /// An empty term means "no filter".
    pub fn for_term(text: &str) -> Self {
        if text.is_empty() {
            Query::All
        } else {
            Query::Keyword(text.to_string())
        }
    }
}
