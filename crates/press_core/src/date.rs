use chrono::{DateTime, NaiveDate};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];

/// Parses the date formats that appear in feeds and article headers:
/// `2025-06-01`, `June 1, 2025`, `Jun 1, 2025`, `06/01/2025` and RFC 3339.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Formats a feed date as `Jun 1, 2025`. Unparseable input is returned as-is.
pub fn format_display_date(raw: &str) -> String {
    match parse_post_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Finds the earliest `Month Day, Year` literal in `text`, e.g. `November 25, 2025`.
pub fn find_month_day_year(text: &str) -> Option<&str> {
    let mut best: Option<(usize, usize)> = None;
    for month in MONTHS {
        let mut from = 0;
        while let Some(pos) = text[from..].find(month) {
            let start = from + pos;
            let after = start + month.len();
            let at_word_start = text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            if at_word_start {
                if let Some(len) = match_day_year(&text[after..]) {
                    if best.map_or(true, |(s, _)| start < s) {
                        best = Some((start, after + len));
                    }
                    break;
                }
            }
            from = after;
        }
    }
    best.map(|(start, end)| &text[start..end])
}

/// Matches ` D, YYYY` or ` DD, YYYY` at the start of `rest`, returning its byte length.
fn match_day_year(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b' ') {
        return None;
    }
    let day_digits = count_digits(&bytes[1..]);
    if !(1..=2).contains(&day_digits) {
        return None;
    }
    let mut i = 1 + day_digits;
    if !rest[i..].starts_with(", ") {
        return None;
    }
    i += 2;
    if count_digits(&bytes[i..]) != 4 {
        return None;
    }
    Some(i + 4)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
