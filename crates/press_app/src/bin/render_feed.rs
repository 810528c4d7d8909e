use std::process::ExitCode;

use log::LevelFilter;
use press_app::{load_config, run_render_feed, RenderFeedArgs};
use press_logging::{press_error, LogDestination};

#[tokio::main]
async fn main() -> ExitCode {
    press_logging::initialize(LogDestination::Terminal, LevelFilter::Warn);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match RenderFeedArgs::parse(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            press_error!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = match load_config(std::path::Path::new(".")) {
        Ok(config) => config,
        Err(err) => {
            press_error!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match run_render_feed(&parsed, &config).await {
        Ok(html) => {
            println!("{html}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            press_error!("Error rendering feed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
