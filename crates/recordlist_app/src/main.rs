use std::path::PathBuf;

mod platform;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(platform::config::CONFIG_FILENAME));
    platform::run_app(&config_path)
}
