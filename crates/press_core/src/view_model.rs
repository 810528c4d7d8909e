use crate::{Comment, GiscusConfig};

pub const SUBMIT_LABEL: &str = "Post comment";
pub const POSTING_LABEL: &str = "Posting...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngageViewModel {
    pub like: LikeControlView,
    pub composer: ComposerView,
    pub comments: CommentsView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeControlView {
    pub count: u32,
    pub liked: bool,
    pub enabled: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerView {
    /// Shown to signed-out visitors; clicking it opens the sign-in prompt.
    SignInPlaceholder,
    Editor {
        author: String,
        avatar: Option<String>,
        draft: String,
        submit_label: String,
        submit_enabled: bool,
        error: Option<String>,
    },
    Giscus(GiscusConfig),
    Disabled {
        notice: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentsView {
    Hidden,
    Loading,
    Empty,
    List(Vec<Comment>),
    Failed(String),
}
