//! Article generator: plain-text outline to a static article page.
//!
//! Outline format, one item per non-blank line:
//!
//! ```text
//! Category
//! Title
//! November 25, 2025
//! ## Section header
//! - list item
//! Paragraph text
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use press_logging::press_info;
use thiserror::Error;

use crate::filename::slugify_title;
use crate::persist::{AtomicFileWriter, PersistError};

const HEADING_MARKER: &str = "## ";
const LIST_MARKER: &str = "- ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error(
        "text file must have at least 4 lines (category, title, date, content), found {found}"
    )]
    TooShort { found: usize },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("file \"{}\" not found", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error("title \"{title}\" produces an empty file name")]
    EmptySlug { title: String },
    #[error("cannot write article: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub category: String,
    pub title: String,
    pub date: String,
    pub body: Vec<Block>,
}

pub fn parse_outline(text: &str) -> Result<Outline, OutlineError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let [category, title, date, body @ ..] = lines.as_slice() else {
        return Err(OutlineError::TooShort { found: lines.len() });
    };
    if body.is_empty() {
        return Err(OutlineError::TooShort { found: lines.len() });
    }

    let mut blocks: Vec<Block> = Vec::new();
    for line in body {
        if let Some(heading) = line.strip_prefix(HEADING_MARKER) {
            blocks.push(Block::Heading(heading.to_string()));
        } else if let Some(item) = line.strip_prefix(LIST_MARKER) {
            match blocks.last_mut() {
                Some(Block::List(items)) => items.push(item.to_string()),
                _ => blocks.push(Block::List(vec![item.to_string()])),
            }
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    Ok(Outline {
        category: category.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        body: blocks,
    })
}

impl Outline {
    pub fn slug(&self) -> String {
        slugify_title(&self.title)
    }

    /// Body markup. Text is inserted verbatim.
    pub fn body_html(&self) -> String {
        let mut html = String::new();
        for block in &self.body {
            match block {
                Block::Heading(text) => {
                    html.push_str(&format!("\n                <h2>{text}</h2>\n"));
                }
                Block::Paragraph(text) => {
                    html.push_str(&format!("                <p>{text}</p>\n"));
                }
                Block::List(items) => {
                    html.push_str("                <ul>\n");
                    for item in items {
                        html.push_str(&format!("                    <li>{item}</li>\n"));
                    }
                    html.push_str("                </ul>\n");
                }
            }
        }
        html
    }
}

/// The fixed page template every generated article uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTemplate {
    pub site_name: String,
    pub contact_email: String,
    pub year: i32,
}

impl ArticleTemplate {
    pub fn new(site_name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            contact_email: contact_email.into(),
            year: Local::now().year(),
        }
    }

    pub fn render(&self, outline: &Outline) -> String {
        self.render_parts(
            &outline.category,
            &outline.title,
            &outline.date,
            &outline.body_html(),
        )
    }

    /// Renders a page around ready-made body markup. Every argument is
    /// inserted verbatim.
    pub fn render_parts(&self, category: &str, title: &str, date: &str, body_html: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {site}</title>
    <link rel="stylesheet" href="../assets/css/style.css">
</head>
<body>
    <header>
        <div class="container nav-container">
            <a href="../index.html" class="logo">
                <div class="logo-text">
                    <strong>{site}</strong>
                </div>
            </a>
            <nav>
                <a href="../index.html" class="btn btn-outline">Back to Home</a>
            </nav>
        </div>
    </header>

    <main>
        <article class="container article">
            <div class="article-header">
                <span class="article-category">{category}</span>
                <h1>{title}</h1>
                <p class="article-date">{date}</p>
            </div>

            <div class="article-body">
{body}
            </div>
        </article>
    </main>

    <footer>
        <div class="container footer-content">
            <div>
                <p>&copy; {year} {site}. All rights reserved.</p>
            </div>
            <div>
                <p>Contact: <a href="mailto:{email}">{email}</a></p>
            </div>
        </div>
    </footer>
</body>
</html>
"#,
            site = self.site_name,
            body = body_html,
            year = self.year,
            email = self.contact_email,
        )
    }
}

/// Converts the outline at `input` into `{posts_dir}/{slug}.html`.
/// Every input error is reported before anything is written.
pub fn generate_article(
    input: &Path,
    posts_dir: &Path,
    template: &ArticleTemplate,
) -> Result<PathBuf, GenerateError> {
    if !input.exists() {
        return Err(GenerateError::NotFound(input.to_path_buf()));
    }
    let text = fs::read_to_string(input).map_err(|source| GenerateError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let outline = parse_outline(&text)?;
    let slug = outline.slug();
    if slug.is_empty() {
        return Err(GenerateError::EmptySlug {
            title: outline.title,
        });
    }

    let html = template.render(&outline);
    let path = AtomicFileWriter::new(posts_dir.to_path_buf()).write(&format!("{slug}.html"), &html)?;
    press_info!("Created {}", path.display());
    Ok(path)
}
