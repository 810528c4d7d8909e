//! Runtime for the engagement bar of one article page.
//!
//! The session owns the pure [`EngageState`], runs the effects returned by
//! `update` against the configured services and feeds their results back as
//! messages. Everything is driven from the task that owns the session.

use std::sync::Arc;
use std::time::Duration;

use press_core::{update, Effect, EngageFeatures, EngageState, EngageViewModel, LikeBook, Msg, User};
use press_logging::{press_debug, press_info, press_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::auth::{wait_for_auth_ready, AuthProvider, AuthStatus, ReadinessError};
use crate::comments::CommentStore;
use crate::likes_store::LikeStorage;

/// External services the session talks to.
#[derive(Clone)]
pub struct EngageServices {
    pub likes: Arc<dyn LikeStorage>,
    /// `None` when no comment store is configured.
    pub comments: Option<Arc<dyn CommentStore>>,
    pub auth: Arc<dyn AuthProvider>,
}

pub struct EngageSession {
    state: EngageState,
    services: EngageServices,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    cancel: CancellationToken,
}

impl EngageSession {
    /// Loads the like book, subscribes to auth changes and requests the
    /// comment list. Must be called inside a tokio runtime.
    pub fn start(
        article_id: impl Into<String>,
        features: EngageFeatures,
        services: EngageServices,
    ) -> Self {
        let likes = services.likes.load().unwrap_or_else(|err| {
            press_warn!("Starting with no likes: {}", err);
            LikeBook::new()
        });
        let state = EngageState::new(article_id, features, likes);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        spawn_auth_forwarder(services.auth.clone(), msg_tx.clone(), cancel.clone());
        press_info!("Engagement session started for {}", state.article_id());

        let mut session = Self {
            state,
            services,
            msg_tx,
            msg_rx,
            cancel,
        };
        session.dispatch(Msg::Opened);
        session
    }

    pub fn state(&self) -> &EngageState {
        &self.state
    }

    pub fn view(&self) -> EngageViewModel {
        self.state.view()
    }

    /// Applies `msg` and runs the resulting effects. Returns the new view
    /// when something visible changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<EngageViewModel> {
        let (mut state, effects) = update(self.state.clone(), msg);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
        view
    }

    /// Waits for the next message from a finished effect or the auth
    /// provider and applies it. Returns `false` once the session is torn down.
    pub async fn pump(&mut self) -> bool {
        let msg = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return false,
            msg = self.msg_rx.recv() => msg,
        };
        match msg {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Applies every message that is already waiting. Returns how many were applied.
    pub fn pump_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Waits until the auth provider has loaded, bounded by `timeout`.
    pub async fn wait_for_auth(&self, timeout: Duration) -> Result<Option<User>, ReadinessError> {
        wait_for_auth_ready(self.services.auth.as_ref(), timeout, &self.cancel).await
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stops the auth subscription and abandons in-flight effects.
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            press_debug!("Engagement session for {} torn down", self.state.article_id());
            self.cancel.cancel();
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::PersistLikes(book) => {
                if let Err(err) = self.services.likes.save(&book) {
                    press_warn!("Could not save likes: {}", err);
                }
            }
            Effect::OpenSignIn => {
                let auth = self.services.auth.clone();
                self.spawn(async move {
                    if let Err(err) = auth.open_sign_in().await {
                        press_warn!("Sign-in prompt failed: {}", err);
                    }
                    None
                });
            }
            Effect::FetchComments { article_id } => {
                let Some(store) = self.services.comments.clone() else {
                    self.send(Msg::CommentsFailed(
                        "Comment store is not configured.".to_string(),
                    ));
                    return;
                };
                self.spawn(async move {
                    Some(match store.list(&article_id).await {
                        Ok(comments) => Msg::CommentsLoaded(comments),
                        Err(err) => {
                            press_warn!("Loading comments for {} failed: {}", article_id, err);
                            Msg::CommentsFailed(err.to_string())
                        }
                    })
                });
            }
            Effect::InsertComment(comment) => {
                let Some(store) = self.services.comments.clone() else {
                    self.send(Msg::CommentPostFailed(
                        "Comment store is not configured.".to_string(),
                    ));
                    return;
                };
                self.spawn(async move {
                    Some(match store.insert(&comment).await {
                        Ok(()) => Msg::CommentPosted,
                        Err(err) => {
                            press_warn!("Posting comment failed: {}", err);
                            Msg::CommentPostFailed(err.to_string())
                        }
                    })
                });
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = Option<Msg>> + Send + 'static,
    {
        let msg_tx = self.msg_tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                msg = task => {
                    if let Some(msg) = msg {
                        let _ = msg_tx.send(msg);
                    }
                }
            }
        });
    }
}

impl Drop for EngageSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn spawn_auth_forwarder(
    auth: Arc<dyn AuthProvider>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    cancel: CancellationToken,
) {
    let mut rx = auth.subscribe();
    tokio::spawn(async move {
        loop {
            let status = rx.borrow_and_update().clone();
            if let AuthStatus::Ready(user) = status {
                if msg_tx.send(Msg::AuthChanged(user)).is_err() {
                    break;
                }
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    });
}
