//! Feed index builder: scans article pages and rewrites `posts.json`.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use press_core::{sort_newest_first, Post};
use press_logging::{press_info, press_trace, press_warn};
use thiserror::Error;

use crate::extract::MetadataExtractor;
use crate::filename::unique_slug;
use crate::persist::{write_atomic, PersistError};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot read posts directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize feed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot write feed: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub feed_path: PathBuf,
    pub scanned: usize,
    pub written: usize,
    pub skipped: Vec<String>,
}

/// Extracts every `*.html` page in `posts_dir` and returns the feed entries,
/// newest first. Files that cannot be read or decoded are listed in the
/// second element and left out.
pub fn collect_posts(
    posts_dir: &Path,
    extractor: &MetadataExtractor,
) -> Result<(Vec<Post>, Vec<String>), IndexError> {
    let read_dir_err = |source| IndexError::ReadDir {
        path: posts_dir.to_path_buf(),
        source,
    };
    let mut filenames = Vec::new();
    for entry in fs::read_dir(posts_dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            press_warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if name.ends_with(".html") && entry.path().is_file() {
            filenames.push(name.to_string());
        }
    }
    filenames.sort();

    let mut posts = Vec::with_capacity(filenames.len());
    let mut skipped = Vec::new();
    let mut taken = HashSet::new();
    for filename in filenames {
        press_trace!("Reading {}", filename);
        let bytes = match fs::read(posts_dir.join(&filename)) {
            Ok(bytes) => bytes,
            Err(err) => {
                press_warn!("Skipping {}: {}", filename, err);
                skipped.push(filename);
                continue;
            }
        };
        let mut post = match extractor.extract(&filename, &bytes) {
            Ok(post) => post,
            Err(err) => {
                press_warn!("Skipping {}", err);
                skipped.push(filename);
                continue;
            }
        };
        post.slug = unique_slug(&post.slug, &mut taken);
        post.id = posts.len() as u64 + 1;
        press_info!("Processed: {} ({})", post.title, post.category);
        posts.push(post);
    }

    sort_newest_first(&mut posts);
    Ok((posts, skipped))
}

/// Pretty JSON with two-space indentation and a trailing newline.
pub fn feed_to_json(posts: &[Post]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(posts)?;
    json.push('\n');
    Ok(json)
}

/// Rebuilds the feed file at `feed_path` from the pages in `posts_dir`.
/// The previous feed is replaced atomically and survives a failed write.
pub fn build_feed_index(
    posts_dir: &Path,
    feed_path: &Path,
    extractor: &MetadataExtractor,
) -> Result<IndexSummary, IndexError> {
    let (posts, skipped) = collect_posts(posts_dir, extractor)?;
    let scanned = posts.len() + skipped.len();
    press_info!("Found {} HTML files in {}", scanned, posts_dir.display());

    let json = feed_to_json(&posts)?;
    let feed_path = write_atomic(feed_path, &json)?;
    press_info!(
        "Updated {} with {} articles",
        feed_path.display(),
        posts.len()
    );

    Ok(IndexSummary {
        feed_path,
        scanned,
        written: posts.len(),
        skipped,
    })
}
