use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::User;

/// A row of the remote `comments` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub article_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new comment; the store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub article_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub content: String,
}

impl NewComment {
    pub fn from_user(article_id: &str, user: &User, content: &str) -> Self {
        Self {
            article_id: article_id.to_string(),
            user_id: user.id.clone(),
            user_name: user.display_name().to_string(),
            user_avatar: user.image_url.clone(),
            content: content.to_string(),
        }
    }
}

pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
