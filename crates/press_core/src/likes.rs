use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Like bookkeeping for one article. `count` always equals `users.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub users: Vec<String>,
}

impl LikeRecord {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.users.iter().any(|id| id == user_id)
    }

    /// Flips the like of `user_id` and returns whether the user now likes the article.
    pub fn toggle(&mut self, user_id: &str) -> bool {
        let liked = if self.is_liked_by(user_id) {
            self.users.retain(|id| id != user_id);
            false
        } else {
            self.users.push(user_id.to_string());
            true
        };
        self.sync_count();
        liked
    }

    /// Repairs records written by another tab or an older script: drops
    /// duplicate user ids and realigns the count.
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.users.len());
        self.users.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(id.clone());
                true
            }
        });
        self.sync_count();
    }

    fn sync_count(&mut self) {
        self.count = u32::try_from(self.users.len()).unwrap_or(u32::MAX);
    }
}

/// All like records of the origin, keyed by article id. This is the value
/// persisted under a single local-storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeBook(BTreeMap<String, LikeRecord>);

impl LikeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, article_id: &str) -> LikeRecord {
        self.0.get(article_id).cloned().unwrap_or_default()
    }

    pub fn toggle(&mut self, article_id: &str, user_id: &str) -> bool {
        self.0
            .entry(article_id.to_string())
            .or_default()
            .toggle(user_id)
    }

    pub fn normalized(mut self) -> Self {
        for record in self.0.values_mut() {
            record.normalize();
        }
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
