use std::fmt;

use crate::Record;

/// Why the list is empty, so "no matches" and "fetch failed" read differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    NoMatches { term: String },
    Failed { message: String },
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyState::Loading => write!(f, "Loading records..."),
            EmptyState::NoMatches { term } if term.is_empty() => write!(f, "No records found."),
            EmptyState::NoMatches { term } => write!(f, "No records match \"{term}\"."),
            EmptyState::Failed { message } if message.is_empty() => {
                write!(f, "Error loading records.")
            }
            EmptyState::Failed { message } => write!(f, "Error loading records: {message}"),
        }
    }
}

/// Derived, read-only snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListViewModel {
    pub records: Vec<Record>,
    pub search_term: String,
    pub is_loading: bool,
    pub has_records: bool,
    pub record_count: usize,
    pub error_message: String,
    pub empty_state: Option<EmptyState>,
}

impl ListViewModel {
    pub fn status_line(&self) -> String {
        match &self.empty_state {
            Some(empty) => empty.to_string(),
            None => {
                let noun = if self.record_count == 1 {
                    "record"
                } else {
                    "records"
                };
                let suffix = if self.is_loading { " (refreshing)" } else { "" };
                format!("{} {noun}{suffix}", self.record_count)
            }
        }
    }
}
