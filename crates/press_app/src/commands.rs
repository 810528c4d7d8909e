//! Entry points of the command-line tools. The binaries only set up logging,
//! load the configuration and report the outcome.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Local;
use press_core::{render_page, FeedView, PageContext, RenderOptions};
use press_engine::{
    build_feed_index, generate_article, parse_submission, publish_submission, ArticleTemplate,
    FeedLoader, FeedSource, FetchSettings, IndexSummary, MetadataExtractor, PublishTarget,
    Published, SiteConfig,
};
use press_logging::press_info;

pub const TXT_TO_HTML_USAGE: &str = "Usage: txt-to-html <input.txt>\n\
Line 1: Category\n\
Line 2: Title\n\
Line 3: Date (e.g., November 25, 2025)\n\
Line 4+: Content (use ## for section headers, - for list items)";

pub const RENDER_FEED_USAGE: &str =
    "Usage: render-feed <posts.json path or URL> [category|all] [--search <term>]";

pub const PUBLISH_USAGE: &str = "Usage: publish <submission.txt> [--title <fallback title>]\n\
Sections: Post title, Category, Summary, Body HTML (as \"### Name\" or \"Name:\" lines)";

/// Regenerates the feed index from the article pages.
pub fn run_generate_posts(config: &SiteConfig) -> anyhow::Result<IndexSummary> {
    let extractor = MetadataExtractor::new(config.public_prefix.clone());
    let summary = build_feed_index(&config.posts_dir, &config.feed_path, &extractor)?;
    press_info!(
        "Successfully updated {} with {} articles",
        summary.feed_path.display(),
        summary.written
    );
    Ok(summary)
}

/// Converts the outline named by the first argument into an article page.
pub fn run_txt_to_html(args: &[String], config: &SiteConfig) -> anyhow::Result<PathBuf> {
    let Some(input) = args.first() else {
        bail!("missing input file\n{TXT_TO_HTML_USAGE}");
    };
    let template = ArticleTemplate::new(config.site_name.clone(), config.contact_email.clone());
    let path = generate_article(Path::new(input), &config.posts_dir, &template)
        .with_context(|| format!("cannot convert {input}"))?;
    press_info!("Review the generated file, then run generate-posts to publish it");
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFeedArgs {
    pub source: FeedSource,
    pub context: PageContext,
    pub search: Option<String>,
}

impl RenderFeedArgs {
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut positional = Vec::new();
        let mut search = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--search" {
                let Some(term) = iter.next() else {
                    bail!("--search needs a term\n{RENDER_FEED_USAGE}");
                };
                search = Some(term.clone());
            } else {
                positional.push(arg.as_str());
            }
        }

        let (source, context) = match positional.as_slice() {
            [source] => (*source, PageContext::Home),
            [source, category] if category.eq_ignore_ascii_case("all") => {
                (*source, PageContext::All)
            }
            [source, category] => (*source, PageContext::Category(category.to_string())),
            _ => bail!("{RENDER_FEED_USAGE}"),
        };
        Ok(Self {
            source: FeedSource::parse(source),
            context,
            search,
        })
    }
}

/// Loads the feed and renders the listing for the requested page. A feed
/// that cannot be loaded renders the error placeholder rather than failing.
pub async fn run_render_feed(args: &RenderFeedArgs, config: &SiteConfig) -> anyhow::Result<String> {
    let loader = FeedLoader::new(FetchSettings::default())?;
    let view = FeedView::from_load(loader.load(&args.source).await);

    let page_path = match &args.context {
        PageContext::Category(name) => format!("/category/{name}.html"),
        PageContext::Home => "/index.html".to_string(),
        PageContext::All => "/articles.html".to_string(),
    };
    let options = RenderOptions {
        categories: config.categories.clone(),
        category_descriptions: config.category_descriptions.clone(),
        ..RenderOptions::for_page_path(&page_path)
    };

    let mut page = render_page(&view, &args.context, &options);
    if let Some(term) = &args.search {
        let visible = page.search(term);
        press_info!("{} of {} articles match \"{}\"", visible, page.cards.len(), term);
    }
    Ok(page.to_html())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishArgs {
    pub input: PathBuf,
    pub fallback_title: String,
}

impl PublishArgs {
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        match args {
            [input] => Ok(Self {
                input: PathBuf::from(input),
                fallback_title: String::new(),
            }),
            [input, flag, title] if flag == "--title" => Ok(Self {
                input: PathBuf::from(input),
                fallback_title: title.clone(),
            }),
            _ => bail!("{PUBLISH_USAGE}"),
        }
    }
}

/// Publishes a submission file: writes the article page and prepends its
/// entry to the feed.
pub fn run_publish(args: &PublishArgs, config: &SiteConfig) -> anyhow::Result<Published> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let submission = parse_submission(&text, &args.fallback_title)
        .with_context(|| format!("{}\n{PUBLISH_USAGE}", args.input.display()))?;
    let template = ArticleTemplate::new(config.site_name.clone(), config.contact_email.clone());
    let target = PublishTarget {
        posts_dir: &config.posts_dir,
        feed_path: &config.feed_path,
        public_prefix: &config.public_prefix,
        template: &template,
    };
    let published = publish_submission(&submission, &target, Local::now().date_naive())?;
    press_info!(
        "Published \"{}\" with id {}",
        published.post.title,
        published.post.id
    );
    Ok(published)
}
