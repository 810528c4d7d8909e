#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The engagement bar was mounted on an article page.
    Opened,
    /// The auth provider reported a sign-in (`Some`) or sign-out (`None`).
    AuthChanged(Option<crate::User>),
    /// User clicked the like control.
    LikeClicked,
    /// User clicked the sign-in placeholder shown instead of the composer.
    SignInRequested,
    /// User edited the comment text box.
    DraftChanged(String),
    /// User clicked the comment submit control.
    CommentSubmitted,
    /// Comment store returned the comment list for the article.
    CommentsLoaded(Vec<crate::Comment>),
    /// Comment store could not be read.
    CommentsFailed(String),
    /// Comment store accepted the insert.
    CommentPosted,
    /// Comment store rejected the insert; carries the raw error message.
    CommentPostFailed(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
