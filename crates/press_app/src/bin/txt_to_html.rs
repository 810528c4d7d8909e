use std::process::ExitCode;

use log::LevelFilter;
use press_app::{load_config, run_txt_to_html};
use press_logging::{press_error, press_info, LogDestination};

fn main() -> ExitCode {
    press_logging::initialize(LogDestination::Terminal, LevelFilter::Info);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = load_config(std::path::Path::new("."))
        .and_then(|config| run_txt_to_html(&args, &config));
    match result {
        Ok(path) => {
            press_info!("Successfully created: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            press_error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
