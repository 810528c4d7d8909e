//! Press engine: filesystem and network IO around the pure core.
mod auth;
mod comments;
mod config;
mod decode;
mod engage;
mod extract;
mod feed;
mod filename;
mod generate;
mod index;
mod likes_store;
mod persist;
mod publish;
mod relay;

pub use auth::{
    wait_for_auth_ready, AuthError, AuthProvider, AuthStatus, ReadinessError, StaticAuthProvider,
};
pub use comments::{CommentStore, RestCommentStore, StoreError};
pub use config::{EngageConfig, SiteConfig};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engage::{EngageServices, EngageSession};
pub use extract::{Clock, ExtractError, MetadataExtractor};
pub use feed::{FeedLoadError, FeedLoader, FeedSource, FetchSettings};
pub use filename::{slug_from_filename, slugify_title, unique_slug};
pub use generate::{
    generate_article, parse_outline, ArticleTemplate, Block, GenerateError, Outline, OutlineError,
};
pub use index::{build_feed_index, collect_posts, feed_to_json, IndexError, IndexSummary};
pub use likes_store::{
    FileLikeStorage, LikeStorage, LikeStorageError, MemoryLikeStorage, LIKES_KEY,
};
pub use persist::{ensure_output_dir, write_atomic, AtomicFileWriter, PersistError};
pub use publish::{
    parse_submission, publish_submission, PublishError, PublishTarget, Published, Submission,
    SubmissionError,
};
pub use relay::{FormRelayClient, RelayError};
