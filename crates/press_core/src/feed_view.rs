use std::fmt::Display;

use press_logging::{press_info, press_warn};

use crate::post::sort_newest_first;
use crate::Post;

/// Outcome of loading the feed, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// The feed could not be fetched or parsed.
    Failed,
    /// The feed loaded but holds no articles yet.
    Empty,
    /// Articles, newest first.
    Loaded(Vec<Post>),
}

impl FeedView {
    /// Builds the view from a load result. The feed is expected to be sorted
    /// already but is sorted again here.
    pub fn from_load<E: Display>(result: Result<Vec<Post>, E>) -> Self {
        match result {
            Err(err) => {
                press_warn!("Feed could not be loaded: {}", err);
                FeedView::Failed
            }
            Ok(posts) if posts.is_empty() => {
                press_info!("Feed is empty");
                FeedView::Empty
            }
            Ok(mut posts) => {
                sort_newest_first(&mut posts);
                FeedView::Loaded(posts)
            }
        }
    }

    pub fn posts(&self) -> &[Post] {
        match self {
            FeedView::Loaded(posts) => posts,
            FeedView::Failed | FeedView::Empty => &[],
        }
    }
}

/// Neutral and error placeholders of the listing. Each has its own text and
/// CSS class so the states can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    ComingSoon,
    LoadFailed,
    CategoryEmpty,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Placeholder::ComingSoon => "Articles are coming soon.",
            Placeholder::LoadFailed => "Unable to load articles right now.",
            Placeholder::CategoryEmpty => "No articles found yet.",
        }
    }

    pub fn to_html(self) -> String {
        let class = match self {
            Placeholder::ComingSoon | Placeholder::CategoryEmpty => "muted",
            Placeholder::LoadFailed => "muted feed-error",
        };
        format!(r#"<p class="{class}">{}</p>"#, self.text())
    }
}
