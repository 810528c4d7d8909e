use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::date::parse_post_date;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One entry of the `posts.json` feed.
///
/// Older feed variants call the topic `sector` and the synopsis `summary`;
/// both spellings are accepted on input and the canonical names are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    /// HTML text: `&`, `<` and `>` appear as character references.
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub date: String,
    #[serde(alias = "sector", default = "default_category")]
    pub category: String,
    /// HTML text, like `title`.
    #[serde(alias = "summary", default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Sorts newest first. Posts whose date cannot be parsed keep their relative
/// order and go after every dated post.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|post| Reverse(parse_post_date(&post.date)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, date: &str) -> Post {
        Post {
            id: 0,
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            date: date.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            excerpt: String::new(),
            content_url: String::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn sorts_mixed_formats_newest_first_with_undated_last() {
        let mut posts = vec![
            post("a", "2025-01-01"),
            post("b", "whenever"),
            post("c", "June 1, 2025"),
            post("d", "March 3, 2025"),
        ];
        sort_newest_first(&mut posts);
        let order: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(order, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r#"{"title":"T","slug":"t","date":"2025-01-01","sector":"Pharma","summary":"S","tags":["x"]}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.category, "Pharma");
        assert_eq!(post.excerpt, "S");
        assert_eq!(post.tags, vec!["x".to_string()]);
        assert_eq!(post.id, 0);
    }
}
