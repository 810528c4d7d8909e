use std::collections::BTreeMap;
use std::path::PathBuf;

use press_core::{is_real_credential, CommentsMode, EngageFeatures, GiscusConfig, LikesMode};
use press_logging::press_warn;
use serde::{Deserialize, Serialize};

/// Site-wide settings. Every field has a default so a partial config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub posts_dir: PathBuf,
    pub feed_path: PathBuf,
    /// URL prefix of article pages in the feed's `contentUrl`.
    pub public_prefix: String,
    pub site_name: String,
    pub contact_email: String,
    /// Category chips, in display order. Empty means "derive from the feed".
    pub categories: Vec<String>,
    pub category_descriptions: BTreeMap<String, String>,
    pub engage: EngageConfig,
    /// Contact and newsletter forms are posted here.
    pub form_endpoint: Option<String>,
    /// Local state such as the visitor's like book.
    pub state_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            feed_path: PathBuf::from("posts/posts.json"),
            public_prefix: "/posts".to_string(),
            site_name: "ChemBio AI Insights".to_string(),
            contact_email: "chembioaiinsights@gmail.com".to_string(),
            categories: Vec::new(),
            category_descriptions: BTreeMap::new(),
            engage: EngageConfig::default(),
            form_endpoint: None,
            state_dir: PathBuf::from(".press"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngageConfig {
    pub auth_publishable_key: String,
    pub store_url: String,
    pub store_anon_key: String,
    pub giscus: GiscusConfig,
}

impl EngageConfig {
    pub fn store_configured(&self) -> bool {
        is_real_credential(&self.store_url) && is_real_credential(&self.store_anon_key)
    }

    /// Decides which engagement features can run. Missing or placeholder
    /// credentials disable the affected feature with a visible notice.
    pub fn features(&self) -> EngageFeatures {
        let auth_ready = is_real_credential(&self.auth_publishable_key);
        let likes = if auth_ready {
            LikesMode::Enabled
        } else {
            press_warn!("Auth publishable key is missing; likes are disabled");
            LikesMode::Disabled {
                notice: "Likes are unavailable until sign-in is configured.".to_string(),
            }
        };

        let comments = if auth_ready && self.store_configured() {
            CommentsMode::Store
        } else if self.giscus.is_configured() {
            press_warn!("Comment store is not configured; using the discussion widget");
            CommentsMode::Giscus(self.giscus.clone())
        } else {
            press_warn!("Neither a comment store nor a discussion widget is configured");
            CommentsMode::Disabled {
                notice: "Comments are disabled until a comment service is configured."
                    .to_string(),
            }
        };

        EngageFeatures { likes, comments }
    }
}
