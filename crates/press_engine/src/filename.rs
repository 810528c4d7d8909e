use std::collections::HashSet;
use std::path::Path;

/// Slug for an article file: the stem lowercased, every character outside
/// `[a-z0-9_-]` mapped to `-`, hyphen runs collapsed and trimmed. Never empty.
pub fn slug_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename);
    let mapped: String = stem
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let slug = collapse_hyphens(&mapped);
    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

/// Slug for an article title: lowercase, characters outside `[a-z0-9\s-]`
/// dropped, whitespace runs become `-`, hyphen runs collapsed. May be empty.
pub fn slugify_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();
    let joined = kept.split_whitespace().collect::<Vec<_>>().join("-");
    collapse_hyphens(&joined)
}

/// Returns `slug` or, when taken, the first free `slug-2`, `slug-3`, ...
pub fn unique_slug(slug: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = slug.to_string();
    let mut suffix = 2;
    while taken.contains(&candidate) {
        candidate = format!("{slug}-{suffix}");
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn collapse_hyphens(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_hyphen = false;
    for c in input.chars() {
        if c == '-' {
            if !prev_hyphen {
                compacted.push(c);
            }
            prev_hyphen = true;
        } else {
            compacted.push(c);
            prev_hyphen = false;
        }
    }
    compacted.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_slugs_are_url_safe() {
        assert_eq!(slug_from_filename("AI in Pharma.html"), "ai-in-pharma");
        assert_eq!(slug_from_filename("gene_editing--2025.html"), "gene_editing-2025");
        assert_eq!(slug_from_filename("Ünïcode.html"), "n-code");
        assert_eq!(slug_from_filename("???.html"), "post");
    }

    #[test]
    fn title_slug_strips_punctuation() {
        assert_eq!(slugify_title("AI & the Future: Drug Discovery"), "ai-the-future-drug-discovery");
        assert_eq!(slugify_title("  Multi   space -- title "), "multi-space-title");
        assert_eq!(slugify_title("!!!"), "");
    }

    #[test]
    fn duplicate_slugs_get_numeric_suffixes() {
        let mut taken = HashSet::new();
        assert_eq!(unique_slug("post", &mut taken), "post");
        assert_eq!(unique_slug("post", &mut taken), "post-2");
        assert_eq!(unique_slug("post", &mut taken), "post-3");
    }
}
