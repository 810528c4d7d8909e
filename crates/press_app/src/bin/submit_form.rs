use std::path::Path;
use std::process::ExitCode;

use log::LevelFilter;
use press_app::{load_config, run_submit_form, SubmitFormArgs};
use press_logging::{press_error, LogDestination};

#[tokio::main]
async fn main() -> ExitCode {
    press_logging::initialize(LogDestination::Terminal, LevelFilter::Info);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match SubmitFormArgs::parse(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            press_error!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = match load_config(Path::new(".")) {
        Ok(config) => config,
        Err(err) => {
            press_error!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match run_submit_form(&parsed, &config).await {
        Ok(feedback) => {
            println!("{}", feedback.text());
            ExitCode::SUCCESS
        }
        Err(err) => {
            press_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
