use std::path::Path;
use std::process::ExitCode;

use log::LevelFilter;
use press_app::{load_config, run_publish, PublishArgs};
use press_logging::{press_error, press_info, LogDestination};

/// Every publication is also recorded here, next to `press.ron`.
const PUBLISH_LOG: &str = "publish.log";

fn main() -> ExitCode {
    press_logging::initialize(
        LogDestination::TerminalAndFile(Path::new(PUBLISH_LOG)),
        LevelFilter::Info,
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = PublishArgs::parse(&args).and_then(|parsed| {
        let config = load_config(Path::new("."))?;
        run_publish(&parsed, &config)
    });
    match result {
        Ok(published) => {
            press_info!(
                "Created {} and added \"{}\" to the feed",
                published.page_path.display(),
                published.post.slug
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            press_error!("Error publishing: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
