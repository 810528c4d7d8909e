#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the auth provider to show its sign-in prompt.
    OpenSignIn,
    /// Write the whole like book to local storage right away.
    PersistLikes(crate::LikeBook),
    FetchComments { article_id: String },
    InsertComment(crate::NewComment),
}
