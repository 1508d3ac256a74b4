mod app;
pub(crate) mod config;
mod input;
mod logging;
mod ui;

pub(crate) use app::run_app;
