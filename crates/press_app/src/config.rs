use std::fs;
use std::path::Path;

use anyhow::Context;
use press_engine::SiteConfig;
use press_logging::{press_debug, press_info};

pub const CONFIG_FILENAME: &str = "press.ron";

/// Reads `press.ron` from `dir`. A missing file yields the defaults; a file
/// that exists but does not parse is an error. Relative paths in the result
/// are resolved against `dir`.
pub fn load_config(dir: &Path) -> anyhow::Result<SiteConfig> {
    let path = dir.join(CONFIG_FILENAME);
    let mut config = match fs::read_to_string(&path) {
        Ok(content) => {
            let config: SiteConfig = ron::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?;
            press_info!("Loaded configuration from {}", path.display());
            config
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            press_debug!("No {} in {}, using defaults", CONFIG_FILENAME, dir.display());
            SiteConfig::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("cannot read {}", path.display()));
        }
    };

    config.posts_dir = dir.join(&config.posts_dir);
    config.feed_path = dir.join(&config.feed_path);
    config.state_dir = dir.join(&config.state_dir);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults_under_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.posts_dir, dir.path().join("posts"));
        assert_eq!(config.feed_path, dir.path().join("posts/posts.json"));
        assert_eq!(config.public_prefix, "/posts");
        assert_eq!(config.state_dir, dir.path().join(".press"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"(
                site_name: "Lab Notes",
                categories: ["Pharma", "Biotech"],
                engage: (auth_publishable_key: "pk_live_1"),
            )"#,
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.site_name, "Lab Notes");
        assert_eq!(config.categories, vec!["Pharma", "Biotech"]);
        assert_eq!(config.engage.auth_publishable_key, "pk_live_1");
        assert_eq!(config.engage.store_url, "");
        assert_eq!(config.form_endpoint, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "(site_name: 42").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("cannot parse"));
    }
}
