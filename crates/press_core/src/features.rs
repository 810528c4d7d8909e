use serde::{Deserialize, Serialize};

/// Settings for the embeddable discussion widget used when no comment store
/// is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiscusConfig {
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
}

impl GiscusConfig {
    pub fn is_configured(&self) -> bool {
        [&self.repo, &self.repo_id, &self.category, &self.category_id]
            .iter()
            .all(|value| is_real_credential(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikesMode {
    Enabled,
    Disabled { notice: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentsMode {
    /// Comments are read from and written to the remote comment store.
    Store,
    /// The third-party discussion widget handles comments and its own sign-in.
    Giscus(GiscusConfig),
    Disabled { notice: String },
}

/// Which parts of the engagement bar are usable, decided once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngageFeatures {
    pub likes: LikesMode,
    pub comments: CommentsMode,
}

impl EngageFeatures {
    pub fn all_enabled() -> Self {
        Self {
            likes: LikesMode::Enabled,
            comments: CommentsMode::Store,
        }
    }
}

/// Fragments of the placeholder values shipped in site templates, such as
/// `pk_test_YOUR_CLERK_KEY_HERE` or `YourUsername/ChemBioAI`.
const PLACEHOLDER_MARKERS: &[&str] = &["your_", "yourusername", "_here"];

/// Rejects empty values and template placeholders, case-insensitively.
pub fn is_real_credential(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    !value.is_empty()
        && !PLACEHOLDER_MARKERS
            .iter()
            .any(|marker| value.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_not_credentials() {
        assert!(!is_real_credential(""));
        assert!(!is_real_credential("pk_test_YOUR_CLERK_KEY_HERE"));
        assert!(!is_real_credential("YourUsername/ChemBioAI"));
        assert!(!is_real_credential("  yourusername/site "));
        assert!(!is_real_credential("PASTE_KEY_HERE"));
        assert!(is_real_credential("pk_test_abc123"));
        assert!(is_real_credential("Dryqu/ChemBioAI"));
    }

    #[test]
    fn template_repo_leaves_giscus_unconfigured() {
        let config = GiscusConfig {
            repo: "YourUsername/ChemBioAI".into(),
            repo_id: "R_kgDOP4NyAw".into(),
            category: "General".into(),
            category_id: "DIC_kwDOP4NyA84C0OGB".into(),
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn giscus_needs_every_field() {
        let mut config = GiscusConfig {
            repo: "owner/site".into(),
            repo_id: "R_1".into(),
            category: "General".into(),
            category_id: String::new(),
        };
        assert!(!config.is_configured());
        config.category_id = "DIC_1".into();
        assert!(config.is_configured());
    }
}
