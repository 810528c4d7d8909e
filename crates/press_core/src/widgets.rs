//! Markup for the like / share / comment bar.
//!
//! Comment text comes from visitors and is always escaped.

use crate::html::escape_html;
use crate::share::{linkedin_share_url, x_share_url};
use crate::view_model::{CommentsView, ComposerView, EngageViewModel, LikeControlView};
use crate::{Comment, GiscusConfig};

const GISCUS_SCRIPT: &str = "https://giscus.app/client.js";

/// The whole engagement section of an article page.
pub fn render_engage_bar(view: &EngageViewModel, page_url: &str, title: &str) -> String {
    format!(
        r#"<section id="engage" class="engage"><div class="engage-actions">{like}{share}</div><div id="comments-container">{composer}{comments}</div></section>"#,
        like = render_like_button(&view.like),
        share = render_share_bar(page_url, title),
        composer = render_composer(&view.composer),
        comments = render_comments(&view.comments),
    )
}

pub fn render_like_button(view: &LikeControlView) -> String {
    let class = if view.liked { "like-btn liked" } else { "like-btn" };
    let disabled = if view.enabled { "" } else { " disabled" };
    let notice = view
        .notice
        .as_deref()
        .map(|notice| format!(r#"<p class="engage-notice">{}</p>"#, escape_html(notice)))
        .unwrap_or_default();
    format!(
        r#"<button id="like-btn" class="{class}" aria-pressed="{pressed}"{disabled}>♥ <span id="like-count">{count}</span></button>{notice}"#,
        pressed = view.liked,
        count = view.count,
    )
}

pub fn render_share_bar(page_url: &str, title: &str) -> String {
    format!(
        r#"<div class="share-bar"><a id="share-linkedin" href="{}" target="_blank" rel="noopener">LinkedIn</a><a id="share-x" href="{}" target="_blank" rel="noopener">X</a><button id="share-copy" data-url="{}">Copy link</button></div>"#,
        escape_html(&linkedin_share_url(page_url)),
        escape_html(&x_share_url(page_url, title)),
        escape_html(page_url),
    )
}

pub fn render_composer(view: &ComposerView) -> String {
    match view {
        ComposerView::SignInPlaceholder => {
            r#"<button id="comment-signin" class="comment-composer comment-composer--placeholder">Sign in to join the discussion</button>"#
                .to_string()
        }
        ComposerView::Editor {
            author,
            avatar,
            draft,
            submit_label,
            submit_enabled,
            error,
        } => {
            let avatar = avatar
                .as_deref()
                .map(|url| format!(r#"<img class="comment-avatar" src="{}" alt="">"#, escape_html(url)))
                .unwrap_or_default();
            let disabled = if *submit_enabled { "" } else { " disabled" };
            let error = error
                .as_deref()
                .map(|message| format!(r#"<p class="comment-error">{}</p>"#, escape_html(message)))
                .unwrap_or_default();
            format!(
                r#"<form id="comment-form" class="comment-composer">{avatar}<span class="comment-author">{author}</span><textarea id="comment-input"{disabled}>{draft}</textarea><button id="comment-submit" type="submit"{disabled}>{label}</button>{error}</form>"#,
                author = escape_html(author),
                draft = escape_html(draft),
                label = escape_html(submit_label),
            )
        }
        ComposerView::Giscus(config) => render_giscus_embed(config),
        ComposerView::Disabled { notice } => format!(
            r#"<p class="comment-composer comment-composer--disabled">{}</p>"#,
            escape_html(notice)
        ),
    }
}

pub fn render_comments(view: &CommentsView) -> String {
    match view {
        CommentsView::Hidden => String::new(),
        CommentsView::Loading => r#"<p class="comments-status">Loading comments...</p>"#.to_string(),
        CommentsView::Empty => {
            r#"<p class="comments-status">No comments yet. Be the first to share your thoughts.</p>"#
                .to_string()
        }
        CommentsView::Failed(message) => format!(
            r#"<p class="comments-status comments-status--error">Could not load comments: {}</p>"#,
            escape_html(message)
        ),
        CommentsView::List(comments) => {
            let items = comments
                .iter()
                .map(render_comment)
                .collect::<Vec<_>>()
                .join("");
            format!(r#"<ul id="comments-list" class="comments-list">{items}</ul>"#)
        }
    }
}

fn render_comment(comment: &Comment) -> String {
    let avatar = comment
        .user_avatar
        .as_deref()
        .map(|url| format!(r#"<img class="comment-avatar" src="{}" alt="">"#, escape_html(url)))
        .unwrap_or_default();
    format!(
        r#"<li class="comment">{avatar}<span class="comment-author">{author}</span><time datetime="{iso}">{date}</time><p>{content}</p></li>"#,
        author = escape_html(&comment.user_name),
        iso = comment.created_at.to_rfc3339(),
        date = comment.created_at.format("%b %-d, %Y"),
        content = escape_html(&comment.content),
    )
}

/// Script tag that mounts the discussion widget, mapped by page path.
pub fn render_giscus_embed(config: &GiscusConfig) -> String {
    let attributes = [
        ("data-repo", config.repo.as_str()),
        ("data-repo-id", config.repo_id.as_str()),
        ("data-category", config.category.as_str()),
        ("data-category-id", config.category_id.as_str()),
        ("data-mapping", "pathname"),
        ("data-strict", "0"),
        ("data-reactions-enabled", "1"),
        ("data-emit-metadata", "0"),
        ("data-input-position", "top"),
        ("data-theme", "light"),
        ("data-lang", "en"),
        ("crossorigin", "anonymous"),
    ]
    .iter()
    .map(|(name, value)| format!(r#" {name}="{}""#, escape_html(value)))
    .collect::<String>();
    format!(r#"<script src="{GISCUS_SCRIPT}"{attributes} async></script>"#)
}
