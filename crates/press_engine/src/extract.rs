use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use press_core::{escape_text, find_month_day_year, Post, DEFAULT_CATEGORY};
use press_logging::press_debug;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::decode::{decode_html, DecodeError};
use crate::filename::slug_from_filename;

const UNTITLED: &str = "Untitled";
const EXCERPT_LIMIT: usize = 150;
const EXCERPT_KEEP: usize = 147;

/// Source of "today" for articles without a date literal.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{filename}: {source}")]
    Decode {
        filename: String,
        #[source]
        source: DecodeError,
    },
}

/// Pulls feed metadata out of a static article page by structural role:
/// category from the article header's first `span`, title from the first
/// `h1`, date from the first `Month Day, Year` text, excerpt from the first
/// paragraph of `.article-body`. Missing pieces fall back to defaults.
///
/// Title and excerpt keep markup-significant characters escaped, so text the
/// author wrote as `&lt;canvas&gt;` stays text in the feed.
#[derive(Clone)]
pub struct MetadataExtractor {
    public_prefix: String,
    today: Clock,
}

impl fmt::Debug for MetadataExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataExtractor")
            .field("public_prefix", &self.public_prefix)
            .finish_non_exhaustive()
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new("/posts")
    }
}

impl MetadataExtractor {
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            public_prefix: public_prefix.into(),
            today: Arc::new(|| Local::now().date_naive()),
        }
    }

    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }

    /// Decodes `bytes` and extracts the post. The returned post has id 0;
    /// ids are assigned by the index builder.
    pub fn extract(&self, filename: &str, bytes: &[u8]) -> Result<Post, ExtractError> {
        let decoded = decode_html(bytes).map_err(|source| ExtractError::Decode {
            filename: filename.to_string(),
            source,
        })?;
        Ok(self.extract_html(filename, &decoded.html))
    }

    pub fn extract_html(&self, filename: &str, html: &str) -> Post {
        let doc = Html::parse_document(html);
        let region = first_match(doc.root_element(), "article").unwrap_or(doc.root_element());

        let category = first_match(region, ".article-header span, header span")
            .map(collapsed_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                press_debug!("{}: no category, using default", filename);
                DEFAULT_CATEGORY.to_string()
            });

        let title = first_match(region, "h1")
            .map(collapsed_text)
            .filter(|text| !text.is_empty())
            .map(|text| escape_text(&text))
            .unwrap_or_else(|| {
                press_debug!("{}: no title, using default", filename);
                UNTITLED.to_string()
            });

        let date = region
            .text()
            .find_map(|text| find_month_day_year(text.trim()).map(str::to_string))
            .unwrap_or_else(|| {
                press_debug!("{}: no date literal, using today", filename);
                (self.today)().format("%Y-%m-%d").to_string()
            });

        let excerpt = first_match(region, ".article-body p")
            .map(collapsed_text)
            .map(truncate_excerpt)
            .map(|text| escape_text(&text))
            .unwrap_or_default();

        Post {
            id: 0,
            title,
            slug: slug_from_filename(filename),
            date,
            category,
            excerpt,
            content_url: format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename),
            tags: Vec::new(),
        }
    }
}

fn first_match<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_excerpt(text: String) -> String {
    if text.chars().count() > EXCERPT_LIMIT {
        let kept: String = text.chars().take(EXCERPT_KEEP).collect();
        format!("{kept}...")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> Clock {
        Arc::new(|| NaiveDate::from_ymd_opt(2025, 11, 25).unwrap())
    }

    #[test]
    fn page_header_is_outside_the_article_region() {
        let html = r#"<html><body>
            <header><a class="logo"><h1>Site Logo</h1><span>Insights</span></a></header>
            <article>
              <div class="article-header"><span> Drug
                Discovery </span><h1>AI <em>in</em> Pharma</h1><p>March 3, 2025</p></div>
              <div class="article-body"><p>First   paragraph.</p><p>Second.</p></div>
            </article></body></html>"#;
        let post = MetadataExtractor::default()
            .with_clock(fixed_clock())
            .extract_html("AI in Pharma.html", html);
        assert_eq!(post.category, "Drug Discovery");
        assert_eq!(post.title, "AI in Pharma");
        assert_eq!(post.date, "March 3, 2025");
        assert_eq!(post.excerpt, "First paragraph.");
        assert_eq!(post.slug, "ai-in-pharma");
        assert_eq!(post.content_url, "/posts/AI in Pharma.html");
    }

    #[test]
    fn escaped_markup_in_the_article_stays_escaped() {
        let html = r#"<article>
            <div class="article-header"><span>R&amp;D</span><h1>Using the &lt;canvas&gt; tag</h1></div>
            <div class="article-body"><p>Wrap it in &lt;script&gt;alert(1)&lt;/script&gt; never.</p></div>
            </article>"#;
        let post = MetadataExtractor::default().extract_html("canvas.html", html);
        assert_eq!(post.category, "R&D");
        assert_eq!(post.title, "Using the &lt;canvas&gt; tag");
        assert_eq!(post.excerpt, "Wrap it in &lt;script&gt;alert(1)&lt;/script&gt; never.");
    }

    #[test]
    fn missing_pieces_use_defaults() {
        let post = MetadataExtractor::new("/posts/")
            .with_clock(fixed_clock())
            .extract_html("empty.html", "<html><body><p>no metadata</p></body></html>");
        assert_eq!(post.category, "Uncategorized");
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.date, "2025-11-25");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.content_url, "/posts/empty.html");
    }

    #[test]
    fn long_excerpt_is_truncated_to_150_chars() {
        let body = "word ".repeat(60);
        let html = format!(r#"<article><div class="article-body"><p>{body}</p></div></article>"#);
        let post = MetadataExtractor::default().extract_html("a.html", &html);
        assert_eq!(post.excerpt.chars().count(), 150);
        assert!(post.excerpt.ends_with("..."));
    }

    #[test]
    fn undecodable_bytes_are_reported() {
        let err = MetadataExtractor::default()
            .extract("bad.html", b"\xFF\xFE\x00\xD8")
            .unwrap_err();
        assert!(err.to_string().starts_with("bad.html"));
    }
}
