//! Client-side search over rendered article cards.
//!
//! Every search starts again from the pristine card markup, so clearing the
//! search term reproduces the unsearched render byte for byte.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

use crate::html::{decode_char_ref, MAX_REF_BODY};

const HIDDEN_CLASS: &str = "card--hidden";

/// A rendered article card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    tags: String,
    pristine: String,
    html: String,
    text: String,
    hidden: bool,
}

impl Card {
    pub fn new(inner_html: String, tags: String) -> Self {
        let text = visible_text(&inner_html);
        Self {
            tags,
            html: inner_html.clone(),
            pristine: inner_html,
            text,
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Plain text of the card, one line per block element.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn inner_html(&self) -> &str {
        &self.html
    }

    pub fn to_html(&self) -> String {
        let class = if self.hidden {
            format!("article-card {HIDDEN_CLASS}")
        } else {
            "article-card".to_string()
        };
        format!(
            r#"<article class="{class}" data-tags="{tags}">{html}</article>"#,
            tags = self.tags,
            html = self.html
        )
    }

    fn reset(&mut self) {
        self.html.clone_from(&self.pristine);
        self.hidden = false;
    }

    fn apply(&mut self, term: &str) -> bool {
        self.reset();
        if term.is_empty() {
            return true;
        }
        let matched = !find_case_insensitive(&self.text, term).is_empty();
        self.hidden = !matched;
        if matched {
            self.html = highlight(&self.pristine, term);
        }
        matched
    }
}

/// The card set of one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardList {
    cards: Vec<Card>,
}

impl CardList {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Filters the cards by `term` (trimmed, case-insensitive) and marks
    /// matches. Returns the number of visible cards.
    pub fn search(&mut self, term: &str) -> usize {
        let term = term.trim();
        self.cards
            .iter_mut()
            .map(|card| card.apply(term))
            .filter(|visible| *visible)
            .count()
    }

    pub fn to_html(&self) -> String {
        self.cards.iter().map(Card::to_html).collect::<Vec<_>>().join("\n")
    }
}

/// Wraps every case-insensitive occurrence of `term` found in a text node of
/// `html` in `<mark>`. Character references match as the character they
/// stand for and are never split. Tags and attribute values are left untouched.
pub fn highlight(html: &str, term: &str) -> String {
    let mut out = String::with_capacity(html.len() + 16);
    for segment in segments(html) {
        match segment {
            Segment::Tag(tag) => out.push_str(tag),
            Segment::Text(text) => highlight_text(text, term, &mut out),
        }
    }
    out
}

fn highlight_text(text: &str, term: &str, out: &mut String) {
    let units = text_units(text);
    let decoded: String = units.iter().map(|unit| unit.decoded).collect();
    let decoded_starts: Vec<usize> = units
        .iter()
        .scan(0, |offset, unit| {
            let start = *offset;
            *offset += unit.decoded.len_utf8();
            Some(start)
        })
        .collect();
    let source_at = |decoded_offset: usize| match decoded_starts.binary_search(&decoded_offset) {
        Ok(idx) => Some(units[idx].source_start),
        Err(idx) if idx == units.len() => Some(text.len()),
        Err(_) => None,
    };

    let mut last = 0;
    for (start, end) in find_case_insensitive(&decoded, term) {
        let (Some(start), Some(end)) = (source_at(start), source_at(end)) else {
            continue;
        };
        out.push_str(&text[last..start]);
        out.push_str("<mark>");
        out.push_str(&text[start..end]);
        out.push_str("</mark>");
        last = end;
    }
    out.push_str(&text[last..]);
}

/// One character of markup text: a literal character or a whole
/// character reference such as `&amp;`.
struct TextUnit {
    source_start: usize,
    decoded: char,
}

fn text_units(text: &str) -> Vec<TextUnit> {
    let mut units = Vec::with_capacity(text.len());
    let mut idx = 0;
    while let Some(c) = text[idx..].chars().next() {
        let reference = (c == '&')
            .then(|| reference_at(&text[idx + 1..]))
            .flatten();
        match reference {
            Some((decoded, len)) => {
                units.push(TextUnit { source_start: idx, decoded });
                idx += 1 + len;
            }
            None => {
                units.push(TextUnit { source_start: idx, decoded: c });
                idx += c.len_utf8();
            }
        }
    }
    units
}

/// Parses `name;` or `#123;` at the start of `rest`. Returns the character
/// and the length consumed including the `;`. References that cannot be
/// decoded still form one unit that matches nothing.
fn reference_at(rest: &str) -> Option<(char, usize)> {
    let end = rest
        .char_indices()
        .take(MAX_REF_BODY + 1)
        .find(|(_, c)| *c == ';')
        .map(|(idx, _)| idx)?;
    let body = &rest[..end];
    let well_formed = !body.is_empty()
        && body
            .chars()
            .enumerate()
            .all(|(pos, c)| c.is_ascii_alphanumeric() || (pos == 0 && c == '#'));
    if !well_formed {
        return None;
    }
    Some((decode_char_ref(body).unwrap_or(char::REPLACEMENT_CHARACTER), end + 1))
}

/// Byte ranges of non-overlapping case-insensitive matches of `needle`.
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let mut matches = Vec::new();
    if needle.is_empty() {
        return matches;
    }
    let mut start = 0;
    while start < haystack.len() {
        match match_len_at(&haystack[start..], needle) {
            Some(len) => {
                matches.push((start, start + len));
                start += len;
            }
            None => {
                start += haystack[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    matches
}

fn match_len_at(haystack: &str, needle: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for expected in needle.chars() {
        let (_, actual) = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(idx, _)| idx))
}

enum Segment<'a> {
    Tag(&'a str),
    Text(&'a str),
}

fn segments(html: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = html;
    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => {
                let end = rest.find('>').map_or(rest.len(), |idx| idx + 1);
                out.push(Segment::Tag(&rest[..end]));
                rest = &rest[end..];
            }
            Some(idx) => {
                out.push(Segment::Text(&rest[..idx]));
                rest = &rest[idx..];
            }
            None => {
                out.push(Segment::Text(rest));
                rest = "";
            }
        }
    }
    out
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "nav", "ol", "p",
    "pre", "section", "table", "tr", "ul",
];

/// Rendered text of a card: inline content flows together, block elements
/// start new lines, whitespace collapses and references are decoded.
fn visible_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut lines = vec![String::new()];
    for child in fragment.root_element().children() {
        collect_text(child, &mut lines);
    }
    lines
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, lines: &mut Vec<String>) {
    match node.value() {
        Node::Text(text) => {
            if let Some(line) = lines.last_mut() {
                line.push_str(text);
            }
        }
        Node::Element(element) => {
            let name = element.name();
            if name == "script" || name == "style" {
                return;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                lines.push(String::new());
            }
            for child in node.children() {
                collect_text(child, lines);
            }
            if block {
                lines.push(String::new());
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn highlight_skips_markup() {
        let html = r#"<a href="/pharma.html">Pharma</a> <p>pharma news</p>"#;
        assert_eq!(
            highlight(html, "PHARMA"),
            r#"<a href="/pharma.html"><mark>Pharma</mark></a> <p><mark>pharma</mark> news</p>"#
        );
    }

    #[test]
    fn case_insensitive_matching_handles_non_ascii() {
        assert_eq!(find_case_insensitive("Ökologie und öl", "ö"), vec![(0, 2), (14, 16)]);
        assert!(find_case_insensitive("abc", "").is_empty());
        assert_eq!(find_case_insensitive("aaaa", "aa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn visible_text_joins_blocks() {
        let card = Card::new("<h4>Title</h4>\n  <p>Body</p>".into(), String::new());
        assert_eq!(card.text(), "Title\nBody");
    }

    #[test]
    fn inline_markup_stays_on_one_line() {
        let card = Card::new(
            "<p><a href=\"/c.html\">Pharma</a> · Jun 2</p><h4>AI <em>in</em> Pharma</h4><a href=\"/x\">Read</a>"
                .into(),
            String::new(),
        );
        assert_eq!(card.text(), "Pharma · Jun 2\nAI in Pharma\nRead");
    }

    #[test]
    fn term_across_inline_tags_keeps_card_visible() {
        let mut list = CardList::new(vec![Card::new(
            "<h4>AI <em>in</em> Pharma</h4>".into(),
            String::new(),
        )]);
        assert_eq!(list.search("ai in pharma"), 1);
        assert!(!list.cards()[0].is_hidden());
    }

    #[test]
    fn references_match_as_characters_and_are_never_split() {
        let mut list = CardList::new(vec![Card::new(
            "<h4>R&amp;D roundup</h4>".into(),
            String::new(),
        )]);
        assert_eq!(list.search("amp"), 0);
        assert_eq!(list.cards()[0].inner_html(), "<h4>R&amp;D roundup</h4>");

        assert_eq!(list.search("r&d"), 1);
        assert_eq!(
            list.cards()[0].inner_html(),
            "<h4><mark>R&amp;D</mark> roundup</h4>"
        );
        assert_eq!(list.cards()[0].text(), "R&D roundup");
    }

    #[test]
    fn escaped_markup_is_searchable_text() {
        assert_eq!(
            highlight("<p>Using the &lt;canvas&gt; tag</p>", "<CANVAS>"),
            "<p>Using the <mark>&lt;canvas&gt;</mark> tag</p>"
        );
        assert_eq!(highlight("<p>A &bogus; & b</p>", "b"), "<p>A &bogus; & <mark>b</mark></p>");
    }
}
