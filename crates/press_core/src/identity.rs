use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the external auth provider. Only the
/// fields the engagement bar displays are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: None,
            username: None,
            image_url: None,
        }
    }

    pub fn display_name(&self) -> &str {
        [self.full_name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }
}

/// Article id for a page path: the last segment without its `.html` suffix.
/// `/posts/ai-in-pharma.html` becomes `ai-in-pharma`.
pub fn article_id_from_path(path: &str) -> String {
    let last = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    last.strip_suffix(".html").unwrap_or(last).to_string()
}
