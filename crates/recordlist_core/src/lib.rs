//! Recordlist core: pure search-and-list state machine and view-model helpers.
mod columns;
mod effect;
mod error;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use columns::{ColumnKind, ColumnSpec, ACCOUNT_COLUMNS};
pub use effect::{Effect, Query};
pub use error::{ErrorBody, FetchError};
pub use msg::{Msg, RequestId};
pub use record::Record;
pub use state::{SearchSettings, SearchState, DEFAULT_DEBOUNCE};
pub use update::{update, RECORD_KIND, VIEW_RECORD_ACTION};
pub use view_model::{EmptyState, ListViewModel};
