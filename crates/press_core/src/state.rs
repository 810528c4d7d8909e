use crate::comment::sort_newest_first;
use crate::view_model::{
    CommentsView, ComposerView, EngageViewModel, LikeControlView, POSTING_LABEL, SUBMIT_LABEL,
};
use crate::{Comment, CommentsMode, EngageFeatures, LikeBook, LikesMode, User};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommentsState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Comment>),
    Failed(String),
}

/// Engagement state for one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngageState {
    article_id: String,
    features: EngageFeatures,
    user: Option<User>,
    likes: LikeBook,
    draft: String,
    posting: bool,
    post_error: Option<String>,
    comments: CommentsState,
    dirty: bool,
}

impl EngageState {
    pub fn new(article_id: impl Into<String>, features: EngageFeatures, likes: LikeBook) -> Self {
        Self {
            article_id: article_id.into(),
            features,
            user: None,
            likes: likes.normalized(),
            draft: String::new(),
            posting: false,
            post_error: None,
            comments: CommentsState::Idle,
            dirty: true,
        }
    }

    pub fn article_id(&self) -> &str {
        &self.article_id
    }

    pub fn features(&self) -> &EngageFeatures {
        &self.features
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn likes(&self) -> &LikeBook {
        &self.likes
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_posting(&self) -> bool {
        self.posting
    }

    pub fn is_liked(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| self.likes.record(&self.article_id).is_liked_by(&user.id))
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> EngageViewModel {
        EngageViewModel {
            like: self.like_view(),
            composer: self.composer_view(),
            comments: self.comments_view(),
            dirty: self.dirty,
        }
    }

    fn like_view(&self) -> LikeControlView {
        let record = self.likes.record(&self.article_id);
        let notice = match &self.features.likes {
            LikesMode::Enabled => None,
            LikesMode::Disabled { notice } => Some(notice.clone()),
        };
        LikeControlView {
            count: record.count,
            liked: self.is_liked(),
            enabled: notice.is_none(),
            notice,
        }
    }

    fn composer_view(&self) -> ComposerView {
        match &self.features.comments {
            CommentsMode::Disabled { notice } => ComposerView::Disabled {
                notice: notice.clone(),
            },
            CommentsMode::Giscus(config) => ComposerView::Giscus(config.clone()),
            CommentsMode::Store => match &self.user {
                None => ComposerView::SignInPlaceholder,
                Some(user) => ComposerView::Editor {
                    author: user.display_name().to_string(),
                    avatar: user.image_url.clone(),
                    draft: self.draft.clone(),
                    submit_label: if self.posting {
                        POSTING_LABEL
                    } else {
                        SUBMIT_LABEL
                    }
                    .to_string(),
                    submit_enabled: !self.posting,
                    error: self.post_error.clone(),
                },
            },
        }
    }

    fn comments_view(&self) -> CommentsView {
        if self.features.comments != CommentsMode::Store {
            return CommentsView::Hidden;
        }
        match &self.comments {
            CommentsState::Idle | CommentsState::Loading => CommentsView::Loading,
            CommentsState::Loaded(list) if list.is_empty() => CommentsView::Empty,
            CommentsState::Loaded(list) => CommentsView::List(list.clone()),
            CommentsState::Failed(message) => CommentsView::Failed(message.clone()),
        }
    }

    pub(crate) fn set_user(&mut self, user: Option<User>) {
        if self.user != user {
            self.user = user;
            self.post_error = None;
            self.dirty = true;
        }
    }

    pub(crate) fn toggle_like(&mut self, user_id: &str) -> bool {
        self.dirty = true;
        self.likes.toggle(&self.article_id, user_id)
    }

    pub(crate) fn set_draft(&mut self, draft: String) {
        self.draft = draft;
        self.dirty = true;
    }

    pub(crate) fn begin_posting(&mut self) {
        self.posting = true;
        self.post_error = None;
        self.dirty = true;
    }

    pub(crate) fn finish_posting(&mut self, error: Option<String>) {
        self.posting = false;
        if error.is_none() {
            self.draft.clear();
        }
        self.post_error = error;
        self.dirty = true;
    }

    pub(crate) fn set_comments(&mut self, comments: CommentsState) {
        self.comments = match comments {
            CommentsState::Loaded(mut list) => {
                sort_newest_first(&mut list);
                CommentsState::Loaded(list)
            }
            other => other,
        };
        self.dirty = true;
    }
}
