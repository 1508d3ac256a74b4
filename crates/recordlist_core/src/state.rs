use std::time::Duration;

use crate::view_model::{EmptyState, ListViewModel};
use crate::{FetchError, Record, RequestId};

/// Quiet period the search box must observe before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Authoritative state of the search-and-list controller.
///
/// `records` and `error` are never both populated: a successful fetch clears
/// the error and a failed fetch empties the records.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    settings: SearchSettings,
    records: Vec<Record>,
    error: Option<FetchError>,
    is_loading: bool,
    search_term: String,
    debounce_generation: u64,
    next_request_id: RequestId,
    latest_request: Option<RequestId>,
    dirty: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::with_settings(SearchSettings::default())
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state, loading until the initial fetch completes.
    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            settings,
            records: Vec::new(),
            error: None,
            is_loading: true,
            search_term: String::new(),
            debounce_generation: 0,
            next_request_id: 1,
            latest_request: None,
            dirty: false,
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn debounce_generation(&self) -> u64 {
        self.debounce_generation
    }

    /// The only request whose completion will be applied.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn error_message(&self) -> &str {
        self.error.as_ref().map_or("", FetchError::user_message)
    }

    pub fn view(&self) -> ListViewModel {
        ListViewModel {
            records: self.records.clone(),
            search_term: self.search_term.clone(),
            is_loading: self.is_loading,
            has_records: self.has_records(),
            record_count: self.record_count(),
            error_message: self.error_message().to_string(),
            empty_state: self.empty_state(),
        }
    }

    /// Returns whether the view changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn empty_state(&self) -> Option<EmptyState> {
        if self.has_records() {
            return None;
        }
        if let Some(error) = &self.error {
            return Some(EmptyState::Failed {
                message: error.user_message().to_string(),
            });
        }
        if self.is_loading {
            return Some(EmptyState::Loading);
        }
        Some(EmptyState::NoMatches {
            term: self.search_term.clone(),
        })
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_search_term(&mut self, text: String) {
        if self.search_term != text {
            self.search_term = text;
            self.mark_dirty();
        }
    }

    /// Supersedes every previously scheduled debounce timer.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.debounce_generation += 1;
        self.debounce_generation
    }

    pub(crate) fn is_current_generation(&self, generation: u64) -> bool {
        generation == self.debounce_generation
    }

    /// Marks the state as loading and makes a new request the latest one.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request = Some(request_id);
        if !self.is_loading {
            self.is_loading = true;
            self.mark_dirty();
        }
        request_id
    }

    pub(crate) fn is_latest_request(&self, request_id: RequestId) -> bool {
        self.latest_request == Some(request_id)
    }

    /// Commits a fetch outcome. Loading is cleared whatever the outcome.
    pub(crate) fn apply_result(&mut self, result: Result<Vec<Record>, FetchError>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(error) => {
                self.records.clear();
                self.error = Some(error);
            }
        }
        self.is_loading = false;
        self.latest_request = None;
        self.mark_dirty();
    }

    /// Forgets pending work so late timer and fetch completions are ignored.
    pub(crate) fn abandon_pending(&mut self) {
        self.next_generation();
        self.latest_request = None;
        if self.is_loading {
            self.is_loading = false;
            self.mark_dirty();
        }
    }
}
