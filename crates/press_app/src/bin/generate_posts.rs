use std::process::ExitCode;

use log::LevelFilter;
use press_app::{load_config, run_generate_posts};
use press_logging::{press_error, LogDestination};

fn main() -> ExitCode {
    press_logging::initialize(LogDestination::Terminal, LevelFilter::Info);

    let result =
        load_config(std::path::Path::new(".")).and_then(|config| run_generate_posts(&config));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            press_error!("Error generating posts: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
