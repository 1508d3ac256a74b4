//! Recordlist engine: effect execution, fetch services and the controller driver.
mod controller;
mod debounce;
mod engine;
mod fetch;
mod navigation;
mod types;

pub use controller::{SearchListController, ViewObserver};
pub use debounce::Debouncer;
pub use engine::{EngineError, EngineHandle};
pub use fetch::{run_query, FetchSettings, RecordFetchService, ReqwestRecordService, ServiceError};
pub use navigation::{ChannelNavigator, NavigationRequest, NavigationService};
pub use types::EngineEvent;
