use press_logging::{press_debug, press_warn};

use crate::state::CommentsState;
use crate::{CommentsMode, Effect, EngageState, LikesMode, Msg, NewComment};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: EngageState, msg: Msg) -> (EngageState, Vec<Effect>) {
    let effects = match msg {
        Msg::Opened => {
            if state.features().comments != CommentsMode::Store {
                return (state, Vec::new());
            }
            state.set_comments(CommentsState::Loading);
            vec![Effect::FetchComments {
                article_id: state.article_id().to_string(),
            }]
        }
        Msg::AuthChanged(user) => {
            state.set_user(user);
            Vec::new()
        }
        Msg::LikeClicked => {
            if let LikesMode::Disabled { notice } = &state.features().likes {
                press_warn!("Like ignored: {}", notice);
                return (state, Vec::new());
            }
            let Some(user_id) = state.user().map(|user| user.id.clone()) else {
                return (state, vec![Effect::OpenSignIn]);
            };
            let liked = state.toggle_like(&user_id);
            press_debug!("article={} liked={}", state.article_id(), liked);
            vec![Effect::PersistLikes(state.likes().clone())]
        }
        Msg::SignInRequested => {
            if state.user().is_none() && state.features().comments == CommentsMode::Store {
                vec![Effect::OpenSignIn]
            } else {
                Vec::new()
            }
        }
        Msg::DraftChanged(text) => {
            // The text box is read-only while a post is in flight.
            if !state.is_posting() {
                state.set_draft(text);
            }
            Vec::new()
        }
        Msg::CommentSubmitted => {
            if state.is_posting() || state.features().comments != CommentsMode::Store {
                return (state, Vec::new());
            }
            let content = state.draft().trim().to_string();
            if content.is_empty() {
                return (state, Vec::new());
            }
            let Some(comment) = state
                .user()
                .map(|user| NewComment::from_user(state.article_id(), user, &content))
            else {
                return (state, vec![Effect::OpenSignIn]);
            };
            state.begin_posting();
            vec![Effect::InsertComment(comment)]
        }
        Msg::CommentPosted => {
            state.finish_posting(None);
            vec![Effect::FetchComments {
                article_id: state.article_id().to_string(),
            }]
        }
        Msg::CommentPostFailed(message) => {
            state.finish_posting(Some(message));
            Vec::new()
        }
        Msg::CommentsLoaded(comments) => {
            state.set_comments(CommentsState::Loaded(comments));
            Vec::new()
        }
        Msg::CommentsFailed(message) => {
            state.set_comments(CommentsState::Failed(message));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
