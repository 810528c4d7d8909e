//! Article listing markup: featured block, cards and category chips.
//!
//! Post titles and excerpts are stored in the feed as HTML text, with the
//! author's character references kept, and are inserted verbatim. Category
//! names are plain text and are escaped here.

use std::collections::BTreeMap;

use crate::date::format_display_date;
use crate::html::{encode_component, escape_html, escape_text};
use crate::search::{Card, CardList};
use crate::{FeedView, Placeholder, Post};

const DEFAULT_DESCRIPTION: &str = "Browse recent articles in this focus area.";

/// Which listing the current page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContext {
    /// Featured article plus every card.
    Home,
    /// Header, featured article and cards of one category.
    Category(String),
    /// Every card, no featured block.
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix that leads from the current page back to the site root, e.g. `../`.
    pub base_prefix: String,
    /// Chip list. When empty, categories are taken from the feed in order of
    /// first appearance.
    pub categories: Vec<String>,
    pub category_descriptions: BTreeMap<String, String>,
}

impl RenderOptions {
    /// Options for a page at `path`; pages under `/category/` or `/posts/`
    /// link one directory up.
    pub fn for_page_path(path: &str) -> Self {
        let base_prefix = if path.contains("/category/") || path.contains("/posts/") {
            "../"
        } else {
            ""
        };
        Self {
            base_prefix: base_prefix.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryHeader {
    pub title: String,
    pub heading: String,
    pub description: String,
}

/// Rendered listing for one page context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub header: Option<CategoryHeader>,
    pub featured: Option<String>,
    pub chips: String,
    pub cards: CardList,
    pub placeholder: Option<Placeholder>,
}

impl RenderedPage {
    fn placeholder(header: Option<CategoryHeader>, placeholder: Placeholder) -> Self {
        Self {
            header,
            featured: None,
            chips: String::new(),
            cards: CardList::default(),
            placeholder: Some(placeholder),
        }
    }

    pub fn search(&mut self, term: &str) -> usize {
        self.cards.search(term)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            out.push_str(&format!(
                "<header class=\"category-header\">\n<h2 id=\"categoryTitle\">{}</h2>\n<h3 id=\"categoryHeading\">{}</h3>\n<p id=\"categoryDescription\">{}</p>\n</header>\n",
                header.title, header.heading, header.description
            ));
        }
        if let Some(featured) = &self.featured {
            out.push_str(&format!(
                "<section id=\"featuredArticle\" class=\"featured-article\">{featured}</section>\n"
            ));
        }
        if !self.chips.is_empty() {
            out.push_str(&format!(
                "<nav id=\"categoryLinks\" class=\"category-chips\">{}</nav>\n",
                self.chips
            ));
        }
        let body = match self.placeholder {
            Some(placeholder) => placeholder.to_html(),
            None => self.cards.to_html(),
        };
        out.push_str(&format!("<div id=\"articlesList\">\n{body}\n</div>\n"));
        out
    }
}

pub fn render_page(view: &FeedView, context: &PageContext, options: &RenderOptions) -> RenderedPage {
    let header = match context {
        PageContext::Category(name) => Some(category_header(name, options)),
        PageContext::Home | PageContext::All => None,
    };
    let posts = match view {
        FeedView::Failed => return RenderedPage::placeholder(header, Placeholder::LoadFailed),
        FeedView::Empty => return RenderedPage::placeholder(header, Placeholder::ComingSoon),
        FeedView::Loaded(posts) => posts,
    };

    let chips = render_category_chips(&chip_categories(posts, options), options);
    let scoped: Vec<&Post> = match context {
        PageContext::Category(name) => posts
            .iter()
            .filter(|post| post.category.eq_ignore_ascii_case(name))
            .collect(),
        PageContext::Home | PageContext::All => posts.iter().collect(),
    };
    if scoped.is_empty() {
        return RenderedPage {
            chips,
            ..RenderedPage::placeholder(header, Placeholder::CategoryEmpty)
        };
    }

    let featured = match context {
        PageContext::All => None,
        PageContext::Home | PageContext::Category(_) => Some(render_featured(scoped[0], options)),
    };
    let cards = scoped
        .iter()
        .map(|post| render_card(post, options))
        .collect();

    RenderedPage {
        header,
        featured,
        chips,
        cards: CardList::new(cards),
        placeholder: None,
    }
}

pub fn render_card(post: &Post, options: &RenderOptions) -> Card {
    let inner = format!(
        "\n<p class=\"article-card__meta\">{meta}</p>\n<h4>{title}</h4>\n<p>{summary}</p>\n<a href=\"{href}\">Read article →</a>\n",
        meta = meta_line(post, options),
        title = post.title,
        summary = post.excerpt,
        href = article_href(post, options),
    );
    let tags = std::iter::once(post.category.as_str())
        .chain(post.tags.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    Card::new(inner, escape_html(tags.trim()))
}

pub fn render_featured(post: &Post, options: &RenderOptions) -> String {
    format!(
        "\n<p class=\"article-card__meta\">{meta}</p>\n<h3>{title}</h3>\n<p>{summary}</p>\n<a href=\"{href}\">Read the latest →</a>\n",
        meta = meta_line(post, options),
        title = post.title,
        summary = post.excerpt,
        href = article_href(post, options),
    )
}

pub fn render_category_chips(categories: &[String], options: &RenderOptions) -> String {
    categories
        .iter()
        .map(|category| {
            format!(
                r#"<a class="category-chip" href="{}">{}</a>"#,
                category_href(category, options),
                escape_text(category)
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// `Tools & Tips` links to `{base}category/tools-and-tips.html`.
pub fn category_href(category: &str, options: &RenderOptions) -> String {
    let slug = category
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace('&', "and");
    format!(
        "{}category/{}.html",
        options.base_prefix,
        encode_component(&slug)
    )
}

pub fn article_href(post: &Post, options: &RenderOptions) -> String {
    if post.content_url.starts_with('/') || post.content_url.contains("://") {
        post.content_url.clone()
    } else if !post.content_url.is_empty() {
        format!("{}{}", options.base_prefix, post.content_url)
    } else {
        format!("{}posts/{}.html", options.base_prefix, post.slug)
    }
}

fn meta_line(post: &Post, options: &RenderOptions) -> String {
    format!(
        r#"<a href="{}">{}</a> · {}"#,
        category_href(&post.category, options),
        escape_text(&post.category),
        format_display_date(&post.date)
    )
}

fn chip_categories(posts: &[Post], options: &RenderOptions) -> Vec<String> {
    if !options.categories.is_empty() {
        return options.categories.clone();
    }
    let mut seen: Vec<String> = Vec::new();
    for post in posts {
        if !seen.contains(&post.category) {
            seen.push(post.category.clone());
        }
    }
    seen
}

fn category_header(name: &str, options: &RenderOptions) -> CategoryHeader {
    CategoryHeader {
        title: format!("{} articles", escape_text(name)),
        heading: format!("Latest in {}", escape_text(name)),
        description: options
            .category_descriptions
            .get(name)
            .cloned()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
    }
}
