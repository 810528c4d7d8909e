use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use press_core::User;
use press_logging::press_debug;
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// What the external auth provider reports about the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// The provider has not finished loading.
    #[default]
    Loading,
    Ready(Option<User>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("auth provider not ready after {0:?}")]
    Timeout(Duration),
    #[error("waiting for the auth provider was cancelled")]
    Cancelled,
    #[error("auth provider went away")]
    Closed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("sign-in unavailable: {0}")]
    Unavailable(String),
}

/// Seam to the hosted sign-in service. Status changes are published on a
/// watch channel; the latest value is always the current visitor.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<AuthStatus>;
    async fn open_sign_in(&self) -> Result<(), AuthError>;
}

/// Resolves once the provider reports `Ready`, giving up after `timeout` or
/// when `cancel` fires.
pub async fn wait_for_auth_ready(
    provider: &dyn AuthProvider,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Option<User>, ReadinessError> {
    let mut rx = provider.subscribe();
    let ready = async {
        loop {
            let status = rx.borrow_and_update().clone();
            if let AuthStatus::Ready(user) = status {
                return Ok(user);
            }
            if rx.changed().await.is_err() {
                return Err(ReadinessError::Closed);
            }
        }
    };
    tokio::select! {
        _ = cancel.cancelled() => Err(ReadinessError::Cancelled),
        result = tokio::time::timeout(timeout, ready) => {
            result.unwrap_or(Err(ReadinessError::Timeout(timeout)))
        }
    }
}

/// In-process provider driven by the caller. Used by tests and by tools that
/// render the engagement bar for a fixed visitor.
#[derive(Debug)]
pub struct StaticAuthProvider {
    tx: watch::Sender<AuthStatus>,
    sign_in_requests: AtomicUsize,
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new(AuthStatus::Loading)
    }
}

impl StaticAuthProvider {
    pub fn new(status: AuthStatus) -> Self {
        let (tx, _rx) = watch::channel(status);
        Self {
            tx,
            sign_in_requests: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, status: AuthStatus) {
        self.tx.send_replace(status);
    }

    pub fn sign_in(&self, user: User) {
        self.set(AuthStatus::Ready(Some(user)));
    }

    pub fn sign_out(&self) {
        self.set(AuthStatus::Ready(None));
    }

    pub fn sign_in_requests(&self) -> usize {
        self.sign_in_requests.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl AuthProvider for StaticAuthProvider {
    fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.tx.subscribe()
    }

    async fn open_sign_in(&self) -> Result<(), AuthError> {
        let count = self.sign_in_requests.fetch_add(1, Ordering::Relaxed) + 1;
        press_debug!("sign-in prompt requested ({} so far)", count);
        Ok(())
    }
}
