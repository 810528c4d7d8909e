use std::fs;

use press_engine::{generate_article, parse_outline, ArticleTemplate, Block, GenerateError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const OUTLINE: &str = "\
Drug Discovery

AI Models for Clinical Trials!
November 25, 2025
Opening paragraph about trials.
## Why it matters
- Faster recruitment
- Better endpoints
- Lower cost
## Next steps
Closing thoughts.
";

fn template() -> ArticleTemplate {
    ArticleTemplate {
        site_name: "Lab Notes".to_string(),
        contact_email: "hello@example.org".to_string(),
        year: 2025,
    }
}

fn write_outline(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("outline.txt");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn headers_and_list_render_in_order() {
    let outline = parse_outline(OUTLINE).unwrap();
    assert_eq!(outline.category, "Drug Discovery");
    assert_eq!(outline.title, "AI Models for Clinical Trials!");
    assert_eq!(outline.date, "November 25, 2025");
    assert_eq!(
        outline.body,
        vec![
            Block::Paragraph("Opening paragraph about trials.".into()),
            Block::Heading("Why it matters".into()),
            Block::List(vec![
                "Faster recruitment".into(),
                "Better endpoints".into(),
                "Lower cost".into(),
            ]),
            Block::Heading("Next steps".into()),
            Block::Paragraph("Closing thoughts.".into()),
        ]
    );

    let html = outline.body_html();
    assert_eq!(html.matches("<h2>").count(), 2);
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 3);
    let first_h2 = html.find("<h2>Why it matters</h2>").unwrap();
    let list = html.find("<ul>").unwrap();
    let second_h2 = html.find("<h2>Next steps</h2>").unwrap();
    assert!(first_h2 < list && list < second_h2);
    assert!(html.find("</ul>").unwrap() < second_h2);
}

#[test]
fn article_is_written_under_title_slug() {
    let input_dir = TempDir::new().unwrap();
    let posts_dir = TempDir::new().unwrap();
    let input = write_outline(&input_dir, OUTLINE);

    let path = generate_article(&input, posts_dir.path(), &template()).unwrap();
    assert_eq!(
        path,
        posts_dir.path().join("ai-models-for-clinical-trials.html")
    );

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>AI Models for Clinical Trials! - Lab Notes</title>"));
    assert!(html.contains(r#"<span class="article-category">Drug Discovery</span>"#));
    assert!(html.contains("<h1>AI Models for Clinical Trials!</h1>"));
    assert!(html.contains("&copy; 2025 Lab Notes"));
    assert!(html.contains("mailto:hello@example.org"));
}

#[test]
fn short_outline_is_rejected_before_writing() {
    let input_dir = TempDir::new().unwrap();
    let posts_dir = TempDir::new().unwrap();
    let input = write_outline(&input_dir, "Category\nTitle\n\nNovember 1, 2025\n");

    let err = generate_article(&input, posts_dir.path(), &template()).unwrap_err();
    assert!(matches!(err, GenerateError::Outline(_)));
    assert_eq!(fs::read_dir(posts_dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_input_is_reported() {
    let posts_dir = TempDir::new().unwrap();
    let missing = posts_dir.path().join("nope.txt");
    let err = generate_article(&missing, posts_dir.path(), &template()).unwrap_err();
    assert!(matches!(err, GenerateError::NotFound(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn punctuation_only_title_is_rejected() {
    let input_dir = TempDir::new().unwrap();
    let posts_dir = TempDir::new().unwrap();
    let input = write_outline(&input_dir, "Cat\n!!!\nMay 1, 2025\nBody\n");

    let err = generate_article(&input, posts_dir.path(), &template()).unwrap_err();
    assert!(matches!(err, GenerateError::EmptySlug { .. }));
    assert_eq!(fs::read_dir(posts_dir.path()).unwrap().count(), 0);
}
