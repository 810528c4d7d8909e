//! Engagement bar snapshots and form submissions, wired from `press.ron`.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use press_core::{
    article_id_from_path, render_engage_bar, unescape_html, CommentsMode, CommentsView,
    EngageFeatures, FormEncoding, FormFeedback, FormSubmission, User,
};
use press_engine::{
    AuthProvider, AuthStatus, CommentStore, EngageServices, EngageSession, FileLikeStorage,
    FormRelayClient, MetadataExtractor, RestCommentStore, SiteConfig, StaticAuthProvider,
};
use press_logging::{press_debug, press_info, press_warn};

pub const AUTH_READY_TIMEOUT: Duration = Duration::from_secs(5);
pub const COMMENTS_TIMEOUT: Duration = Duration::from_secs(10);

pub const RENDER_ENGAGE_USAGE: &str = "Usage: render-engage <article slug or file> [--user <id>]";
pub const SUBMIT_FORM_USAGE: &str =
    "Usage: submit-form [--json] [--success <text>] <name=value>...";
pub const CONTACT_SUCCESS: &str = "Thanks! Your message was sent.";

/// Features and services for the engagement bar as configured. The like book
/// lives under `state_dir`; the comment store is only built when the
/// configuration enables it.
pub fn engage_services(
    config: &SiteConfig,
    auth: Arc<dyn AuthProvider>,
) -> anyhow::Result<(EngageFeatures, EngageServices)> {
    let features = config.engage.features();
    let comments: Option<Arc<dyn CommentStore>> = match features.comments {
        CommentsMode::Store => Some(Arc::new(
            RestCommentStore::new(&config.engage.store_url, &config.engage.store_anon_key)
                .context("cannot set up the comment store")?,
        )),
        CommentsMode::Giscus(_) | CommentsMode::Disabled { .. } => None,
    };
    let services = EngageServices {
        likes: Arc::new(FileLikeStorage::new(config.state_dir.clone())),
        comments,
        auth,
    };
    Ok((features, services))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEngageArgs {
    pub page: String,
    pub user: Option<String>,
}

impl RenderEngageArgs {
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut page = None;
        let mut user = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--user" {
                let Some(id) = iter.next() else {
                    bail!("--user needs an id\n{RENDER_ENGAGE_USAGE}");
                };
                user = Some(id.clone());
            } else if page.is_none() {
                page = Some(arg.clone());
            } else {
                bail!("{RENDER_ENGAGE_USAGE}");
            }
        }
        let Some(page) = page else {
            bail!("{RENDER_ENGAGE_USAGE}");
        };
        Ok(Self { page, user })
    }
}

/// Renders the engagement section of one article as the given visitor sees
/// it once sign-in state and comments have loaded.
pub async fn run_render_engage(
    args: &RenderEngageArgs,
    config: &SiteConfig,
) -> anyhow::Result<String> {
    let filename = if args.page.ends_with(".html") {
        args.page.clone()
    } else {
        format!("{}.html", args.page)
    };
    let page_path = config.posts_dir.join(&filename);
    let bytes =
        fs::read(&page_path).with_context(|| format!("cannot read {}", page_path.display()))?;
    let post = MetadataExtractor::new(config.public_prefix.clone()).extract(&filename, &bytes)?;

    let auth = Arc::new(StaticAuthProvider::new(AuthStatus::Ready(
        args.user.clone().map(User::new),
    )));
    let (features, services) = engage_services(config, auth)?;
    let mut session = EngageSession::start(
        article_id_from_path(&post.content_url),
        features,
        services,
    );

    match session.wait_for_auth(AUTH_READY_TIMEOUT).await {
        Ok(Some(user)) => press_debug!("Rendering for {}", user.id),
        Ok(None) => press_debug!("Rendering for a signed-out visitor"),
        Err(err) => press_warn!("Sign-in state unavailable: {}", err),
    }
    let settled = tokio::time::timeout(COMMENTS_TIMEOUT, async {
        while session.view().comments == CommentsView::Loading {
            if !session.pump().await {
                break;
            }
        }
    })
    .await;
    if settled.is_err() {
        press_warn!("Comments did not load within {:?}", COMMENTS_TIMEOUT);
    }
    session.pump_pending();

    let view = session.view();
    session.teardown();
    Ok(render_engage_bar(
        &view,
        &post.content_url,
        &unescape_html(&post.title),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFormArgs {
    pub submission: FormSubmission,
}

impl SubmitFormArgs {
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut submission = FormSubmission::new(CONTACT_SUCCESS);
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => submission.encoding = FormEncoding::Json,
                "--success" => {
                    let Some(text) = iter.next() else {
                        bail!("--success needs a message\n{SUBMIT_FORM_USAGE}");
                    };
                    submission.success_template = text.clone();
                }
                field => {
                    let Some((name, value)) = field.split_once('=') else {
                        bail!("expected name=value, got \"{field}\"\n{SUBMIT_FORM_USAGE}");
                    };
                    submission = submission.field(name, value);
                }
            }
        }
        if submission.fields.is_empty() {
            bail!("{SUBMIT_FORM_USAGE}");
        }
        Ok(Self { submission })
    }
}

/// Sends the form to the configured relay. The error carries the feedback
/// line a visitor would see.
pub async fn run_submit_form(
    args: &SubmitFormArgs,
    config: &SiteConfig,
) -> anyhow::Result<FormFeedback> {
    let Some(endpoint) = config.form_endpoint.as_deref() else {
        bail!("no form_endpoint in press.ron");
    };
    let client = FormRelayClient::new(endpoint)?;
    match client.submit(&args.submission).await {
        Ok(feedback) => {
            press_info!("{}", feedback.text());
            Ok(feedback)
        }
        Err(err) => Err(anyhow!(err.clone()).context(err.feedback().text().to_string())),
    }
}
