//! Publishing a submitted article.
//!
//! A submission carries four labelled sections, either as `### Post title`
//! headings or as `Post title:` label lines:
//!
//! ```text
//! ### Post title
//! Enzyme Design With Diffusion Models
//! ### Category
//! Biotech
//! ### Summary
//! One line for the listing.
//! ### Body HTML
//! <p>...</p>
//! ```
//!
//! The article page is written to `{posts_dir}/{slug}.html` and the new entry
//! goes to the top of the feed.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use press_core::Post;
use press_logging::{press_debug, press_info, press_warn};
use thiserror::Error;

use crate::filename::slugify_title;
use crate::generate::ArticleTemplate;
use crate::index::feed_to_json;
use crate::persist::{write_atomic, AtomicFileWriter, PersistError};

/// Lines carrying these markers are chat-tool citation debris, not content.
const ARTIFACT_MARKERS: &[&str] = &["contentReference", "oaicite"];
const PUBLISH_TAG: &str = "[publish]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub category: String,
    pub summary: String,
    pub body_html: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("missing required fields: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("cannot read feed {}: {source}", path.display())]
    ReadFeed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse feed {}: {source}", path.display())]
    ParseFeed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize feed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("cannot write: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub post: Post,
    pub page_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Category,
    Summary,
    Body,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Title => "Post title",
            Field::Category => "Category",
            Field::Summary => "Summary",
            Field::Body => "Body HTML",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        match name.to_ascii_lowercase().as_str() {
            "post title" | "title" => Some(Field::Title),
            "category" => Some(Field::Category),
            "summary" => Some(Field::Summary),
            "body html" => Some(Field::Body),
            _ => None,
        }
    }

    /// `### Name` or `Name:` on a line of its own.
    fn from_marker(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("###") {
            return Self::from_name(name);
        }
        Self::from_name(line.strip_suffix(':')?)
    }
}

/// Splits a submission into its sections. A missing title falls back to
/// `fallback_title` with any leading `[Publish]` tag removed.
pub fn parse_submission(text: &str, fallback_title: &str) -> Result<Submission, SubmissionError> {
    let cleaned: Vec<&str> = text
        .lines()
        .filter(|line| !ARTIFACT_MARKERS.iter().any(|marker| line.contains(marker)))
        .collect();

    let mut sections: [(Field, String); 4] = [
        (Field::Title, String::new()),
        (Field::Category, String::new()),
        (Field::Summary, String::new()),
        (Field::Body, String::new()),
    ];
    let mut current = None;
    for line in &cleaned {
        if let Some(field) = Field::from_marker(line) {
            current = Some(field);
            continue;
        }
        if let Some(field) = current {
            if let Some((_, content)) = sections.iter_mut().find(|(f, _)| *f == field) {
                content.push_str(line.trim_end());
                content.push('\n');
            }
        }
    }
    let [(_, title), (_, category), (_, summary), (_, body_html)] =
        sections.map(|(field, content)| (field, content.trim().to_string()));

    let title = non_empty(title)
        .or_else(|| inline_value(&cleaned, "post title"))
        .or_else(|| non_empty(strip_publish_tag(fallback_title)))
        .unwrap_or_default();
    let category = non_empty(category)
        .or_else(|| inline_value(&cleaned, "category"))
        .unwrap_or_default();

    let missing: Vec<&'static str> = [
        (Field::Title, &title),
        (Field::Category, &category),
        (Field::Summary, &summary),
        (Field::Body, &body_html),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field.label())
    .collect();
    if !missing.is_empty() {
        return Err(SubmissionError::Missing(missing));
    }

    Ok(Submission {
        title,
        category,
        summary,
        body_html,
    })
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// `Post title: Value` written on one line.
fn inline_value(lines: &[&str], label: &str) -> Option<String> {
    lines.iter().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        let name = name.trim().trim_start_matches('#').trim();
        let value = value.trim();
        (name.eq_ignore_ascii_case(label) && !value.is_empty()).then(|| value.to_string())
    })
}

fn strip_publish_tag(title: &str) -> String {
    let title = title.trim();
    match title.get(..PUBLISH_TAG.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(PUBLISH_TAG) => {
            title[PUBLISH_TAG.len()..].trim().to_string()
        }
        _ => title.to_string(),
    }
}

/// Where a publication goes and how its page looks.
#[derive(Debug, Clone)]
pub struct PublishTarget<'a> {
    pub posts_dir: &'a Path,
    pub feed_path: &'a Path,
    pub public_prefix: &'a str,
    pub template: &'a ArticleTemplate,
}

/// Writes the article page and puts its entry first in the feed. The slug
/// avoids every slug already in the feed and every page already on disk.
pub fn publish_submission(
    submission: &Submission,
    target: &PublishTarget<'_>,
    today: NaiveDate,
) -> Result<Published, PublishError> {
    let mut posts = load_feed(target.feed_path)?;

    let base = slugify_title(&submission.title);
    let base = if base.is_empty() { "post".to_string() } else { base };
    let taken: HashSet<&str> = posts.iter().map(|post| post.slug.as_str()).collect();
    let slug = free_slug(&base, &taken, target.posts_dir);
    let id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
    let date = today.format("%B %-d, %Y").to_string();

    let html = target.template.render_parts(
        &submission.category,
        &submission.title,
        &date,
        &submission.body_html,
    );
    let page_path =
        AtomicFileWriter::new(target.posts_dir.to_path_buf()).write(&format!("{slug}.html"), &html)?;

    let post = Post {
        id,
        title: submission.title.clone(),
        slug: slug.clone(),
        date,
        category: submission.category.clone(),
        excerpt: submission.summary.clone(),
        content_url: format!("{}/{slug}.html", target.public_prefix.trim_end_matches('/')),
        tags: Vec::new(),
    };
    posts.insert(0, post.clone());
    let json = feed_to_json(&posts).map_err(PublishError::Serialize)?;
    write_atomic(target.feed_path, &json)?;

    press_info!("Published {} as {} (id {})", page_path.display(), slug, id);
    Ok(Published { post, page_path })
}

fn load_feed(path: &Path) -> Result<Vec<Post>, PublishError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            press_warn!("No feed at {}, starting a new one", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PublishError::ReadFeed {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&raw).map_err(|source| PublishError::ParseFeed {
        path: path.to_path_buf(),
        source,
    })
}

fn free_slug(base: &str, taken: &HashSet<&str>, posts_dir: &Path) -> String {
    let is_free = |candidate: &str| {
        !taken.contains(candidate) && !posts_dir.join(format!("{candidate}.html")).exists()
    };
    let mut candidate = base.to_string();
    let mut suffix = 2;
    while !is_free(&candidate) {
        press_debug!("Slug {} is taken", candidate);
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    candidate
}
