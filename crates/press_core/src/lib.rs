//! Press core: feed model, listing renderer and the engagement state machine.
//!
//! Nothing in this crate performs IO; `press_engine` loads feeds, runs effects
//! and persists state.
mod comment;
mod date;
mod effect;
mod feed_view;
mod features;
mod forms;
mod html;
mod identity;
mod likes;
mod msg;
mod post;
mod render;
mod search;
mod share;
mod state;
mod update;
mod view_model;
mod widgets;

pub use comment::{Comment, NewComment};
pub use date::{find_month_day_year, format_display_date, parse_post_date};
pub use effect::Effect;
pub use feed_view::{FeedView, Placeholder};
pub use features::{is_real_credential, CommentsMode, EngageFeatures, GiscusConfig, LikesMode};
pub use forms::{FormEncoding, FormFeedback, FormSubmission};
pub use html::{decode_char_ref, encode_component, escape_html, escape_text, unescape_html};
pub use identity::{article_id_from_path, User};
pub use likes::{LikeBook, LikeRecord};
pub use msg::Msg;
pub use post::{sort_newest_first, Post, DEFAULT_CATEGORY};
pub use render::{
    article_href, category_href, render_card, render_category_chips, render_featured,
    render_page, CategoryHeader, PageContext, RenderOptions, RenderedPage,
};
pub use search::{find_case_insensitive, highlight, Card, CardList};
pub use share::{linkedin_share_url, x_share_url};
pub use state::EngageState;
pub use update::update;
pub use view_model::{
    CommentsView, ComposerView, EngageViewModel, LikeControlView, POSTING_LABEL, SUBMIT_LABEL,
};
pub use widgets::{
    render_comments, render_composer, render_engage_bar, render_giscus_embed, render_like_button,
    render_share_bar,
};
