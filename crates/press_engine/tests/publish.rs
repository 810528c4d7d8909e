use std::fs;

use chrono::NaiveDate;
use press_core::Post;
use press_engine::{
    build_feed_index, parse_submission, publish_submission, ArticleTemplate, MetadataExtractor,
    PublishError, PublishTarget,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn template() -> ArticleTemplate {
    ArticleTemplate {
        site_name: "Lab Notes".into(),
        contact_email: "hello@example.org".into(),
        year: 2025,
    }
}

fn submission(title: &str) -> String {
    format!(
        "### Post title\n{title}\n### Category\nBiotech\n### Summary\nWhy diffusion helps.\n\
         ### Body HTML\n<p>Enzymes &amp; models.</p>\n<h2>Setup</h2>\n"
    )
}

#[test]
fn published_article_leads_the_feed_and_reindexes_cleanly() {
    let site = TempDir::new().unwrap();
    let posts_dir = site.path().join("posts");
    let feed_path = posts_dir.join("posts.json");
    let template = template();
    let target = PublishTarget {
        posts_dir: &posts_dir,
        feed_path: &feed_path,
        public_prefix: "/posts",
        template: &template,
    };
    let today = NaiveDate::from_ymd_opt(2025, 12, 8).unwrap();

    let first = parse_submission(&submission("Enzyme Design"), "").unwrap();
    let published = publish_submission(&first, &target, today).unwrap();
    assert_eq!(published.post.slug, "enzyme-design");
    assert_eq!(published.post.id, 1);
    assert_eq!(published.post.date, "December 8, 2025");
    assert_eq!(published.post.content_url, "/posts/enzyme-design.html");

    let page = fs::read_to_string(&published.page_path).unwrap();
    assert!(page.contains("<h1>Enzyme Design</h1>"));
    assert!(page.contains("<p>Enzymes &amp; models.</p>"));

    let again = publish_submission(&first, &target, today).unwrap();
    assert_eq!(again.post.slug, "enzyme-design-2");
    assert_eq!(again.post.id, 2);

    let feed: Vec<Post> = serde_json::from_str(&fs::read_to_string(&feed_path).unwrap()).unwrap();
    let slugs: Vec<_> = feed.iter().map(|post| post.slug.as_str()).collect();
    assert_eq!(slugs, vec!["enzyme-design-2", "enzyme-design"]);
    assert_eq!(feed[0].excerpt, "Why diffusion helps.");

    // The generated page carries everything the index builder reads back.
    let summary = build_feed_index(&posts_dir, &feed_path, &MetadataExtractor::default()).unwrap();
    assert_eq!(summary.written, 2);
    let rebuilt: Vec<Post> =
        serde_json::from_str(&fs::read_to_string(&feed_path).unwrap()).unwrap();
    assert!(rebuilt.iter().all(|post| post.title == "Enzyme Design"
        && post.category == "Biotech"
        && post.date == "December 8, 2025"
        && post.excerpt == "Enzymes &amp; models."));
}

#[test]
fn existing_page_on_disk_reserves_its_slug() {
    let site = TempDir::new().unwrap();
    let posts_dir = site.path().join("posts");
    fs::create_dir(&posts_dir).unwrap();
    fs::write(posts_dir.join("enzyme-design.html"), "<h1>old</h1>").unwrap();
    let feed_path = posts_dir.join("posts.json");
    let template = template();
    let target = PublishTarget {
        posts_dir: &posts_dir,
        feed_path: &feed_path,
        public_prefix: "/posts/",
        template: &template,
    };

    let published = publish_submission(
        &parse_submission(&submission("Enzyme Design"), "").unwrap(),
        &target,
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
    )
    .unwrap();
    assert_eq!(published.post.slug, "enzyme-design-2");
    assert_eq!(published.post.content_url, "/posts/enzyme-design-2.html");
}

#[test]
fn corrupt_feed_is_not_overwritten() {
    let site = TempDir::new().unwrap();
    let posts_dir = site.path().to_path_buf();
    let feed_path = posts_dir.join("posts.json");
    fs::write(&feed_path, "[{broken").unwrap();
    let template = template();
    let target = PublishTarget {
        posts_dir: &posts_dir,
        feed_path: &feed_path,
        public_prefix: "/posts",
        template: &template,
    };

    let err = publish_submission(
        &parse_submission(&submission("Anything"), "").unwrap(),
        &target,
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, PublishError::ParseFeed { .. }));
    assert_eq!(fs::read_to_string(&feed_path).unwrap(), "[{broken");
    assert!(!posts_dir.join("anything.html").exists());
}
