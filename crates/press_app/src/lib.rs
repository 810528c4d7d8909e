//! Command-line front end of the press pipeline.
pub mod commands;
pub mod config;
pub mod engage;

pub use commands::{
    run_generate_posts, run_publish, run_render_feed, run_txt_to_html, PublishArgs,
    RenderFeedArgs, PUBLISH_USAGE, RENDER_FEED_USAGE, TXT_TO_HTML_USAGE,
};
pub use config::{load_config, CONFIG_FILENAME};
pub use engage::{
    engage_services, run_render_engage, run_submit_form, RenderEngageArgs, SubmitFormArgs,
    RENDER_ENGAGE_USAGE, SUBMIT_FORM_USAGE,
};
