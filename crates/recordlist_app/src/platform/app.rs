use std::io::{self, BufRead};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use recordlist_core::VIEW_RECORD_ACTION;
use recordlist_engine::{
    EngineHandle, NavigationService, ReqwestRecordService, SearchListController,
};

use super::input::{parse_line, InputCommand};
use super::ui::render::TerminalRenderer;
use super::{config, logging};

/// How long the loop waits on engine events before checking for input.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(config_path: &Path) -> anyhow::Result<()> {
    let config = config::load(config_path)?;
    logging::initialize(config.log_destination, config.log_level()?);
    engine_info!("Starting recordlist against {}", config.base_url);

    let service = Arc::new(ReqwestRecordService::new(config.fetch_settings())?);
    let engine = EngineHandle::new(service)?;
    let mut controller = SearchListController::new(
        config.search_settings(),
        engine,
        Arc::new(TerminalNavigator),
    );
    controller.subscribe(TerminalRenderer::new(io::stdout()));

    let input_rx = spawn_stdin_reader();
    println!("Type to search, :open N to view a row, :refresh to reload, :q to quit.");
    controller.on_mount();

    loop {
        controller.wait_for_event(POLL_INTERVAL);
        controller.pump();

        loop {
            match input_rx.try_recv() {
                Ok(line) => {
                    if !handle_line(&mut controller, &line) {
                        controller.on_unmount();
                        return Ok(());
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    engine_info!("Input closed; exiting");
                    controller.on_unmount();
                    return Ok(());
                }
            }
        }
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

/// Returns `false` when the user asked to quit.
fn handle_line(controller: &mut SearchListController, line: &str) -> bool {
    match parse_line(line) {
        InputCommand::Search(text) => controller.on_search_input(text),
        InputCommand::Open(row) => match controller.state().records().get(row - 1).cloned() {
            Some(record) => controller.on_row_action(VIEW_RECORD_ACTION, record),
            None => println!("No row {row} in the current list."),
        },
        InputCommand::Refresh => controller.on_refresh(),
        InputCommand::Quit => return false,
        InputCommand::Unknown(command) => {
            engine_warn!("Unknown command {:?}", command);
            println!("Unknown command: {command}");
        }
    }
    true
}

/// Stands in for a record page: announces which record would open.
struct TerminalNavigator;

impl NavigationService for TerminalNavigator {
    fn navigate_to_record(&self, record_id: &str, kind: &str) {
        engine_info!("Navigate to {} record {}", kind, record_id);
        println!("Opening {kind} record {record_id}");
    }
}
