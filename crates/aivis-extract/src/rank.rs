//! Rank recovery from list-shaped answers.
//!
//! Rules are tried in a fixed priority order and the first one that yields a
//! result wins:
//! 1. numbered list items (`3. Brand` / `3) Brand`)
//! 2. bullet lines, ranked by position among bullets
//! 3. ordinal words (`first` … `fifth`, `1st` … `5th`)
//! 4. a "top N" / "best N" phrase anywhere in the text (rank unknown)
//!
//! Text that mixes numbered and bulleted structure resolves by this order,
//! not by which structure looks more intentional.

use std::sync::LazyLock;

use regex::Regex;

/// Context marker when the brand sits in a "top N" answer without a position.
pub const TOP_SECTION_CONTEXT: &str = "mentioned_in_top_section";
/// Context marker when no ranking rule matched.
pub const NOT_RANKED_CONTEXT: &str = "mentioned_not_ranked";

const BULLET_MARKERS: &[char] = &['•', '-', '*', '●'];

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\p{L}\p{N}$€£.,])(\d{1,3})[.)]").expect("valid list marker regex")
});
static TOP_N_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:top|best)\s+\d+").expect("valid top-n regex"));
static ORDINAL_RES: LazyLock<Vec<(Regex, u32)>> = LazyLock::new(|| {
    [
        ("first", 1),
        ("second", 2),
        ("third", 3),
        ("fourth", 4),
        ("fifth", 5),
        ("1st", 1),
        ("2nd", 2),
        ("3rd", 3),
        ("4th", 4),
        ("5th", 5),
    ]
    .into_iter()
    .map(|(word, value)| {
        let re = Regex::new(&format!(r"(?i)\b{word}\b[:\s]+([^\n]+)")).expect("valid ordinal regex");
        (re, value)
    })
    .collect()
});

/// Recovered rank plus the text that justified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankMatch {
    pub rank: Option<u32>,
    pub context: String,
}

/// One item of a numbered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub number: u32,
    /// Item text after the marker, with surrounding emphasis stripped.
    pub body: &'a str,
    /// Marker plus body as it appears in the source (`"2. Foo"`).
    pub fragment: &'a str,
}

/// Split `text` into numbered list items.
///
/// A marker is one to three digits followed by `.` or `)`, at line start or
/// after any character that is not alphanumeric, a currency sign or a
/// separator (so `**1. Foo**` and `(1) Foo` count), and not followed by
/// another digit (so `4.5 stars` is not a marker). An item runs until the
/// next marker or the end of its line, which lets inline lists such as
/// `1. Acme 2. Foo` split per item.
#[must_use]
pub fn numbered_items(text: &str) -> Vec<ListItem<'_>> {
    let markers: Vec<(usize, usize, usize, u32)> = LIST_MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let digits = caps.get(1)?;
            if text[whole.end()..].starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }
            let number = digits.as_str().parse::<u32>().ok().filter(|n| *n > 0)?;
            Some((whole.start(), digits.start(), whole.end(), number))
        })
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, &(_, number_start, marker_end, number))| {
            let line_end = text[marker_end..]
                .find('\n')
                .map_or(text.len(), |off| marker_end + off);
            let next_marker = markers
                .get(i + 1)
                .map_or(text.len(), |&(start, ..)| start);
            let item_end = line_end.min(next_marker).max(marker_end);

            let body = text[marker_end..item_end]
                .trim()
                .trim_start_matches("**")
                .trim_end_matches("**")
                .trim();
            let fragment = text[number_start..item_end]
                .trim_end()
                .trim_end_matches("**");

            ListItem {
                number,
                body,
                fragment,
            }
        })
        .collect()
}

/// Rank of the first numbered item whose text contains `name` (case-insensitive).
///
/// Shared by brand rank extraction and competitor rank recovery so both use
/// the identical pattern.
#[must_use]
pub fn numbered_rank(text: &str, name: &str) -> Option<(u32, String)> {
    let needle = name.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    numbered_items(text)
        .into_iter()
        .find(|item| item.body.to_lowercase().contains(&needle))
        .map(|item| (item.number, item.fragment.to_string()))
}

/// Extract the brand's rank from `text`. `brand_lower` is the lowercase
/// canonical brand name.
#[must_use]
pub fn extract_rank(text: &str, brand_lower: &str) -> RankMatch {
    if let Some((rank, context)) = numbered_rank(text, brand_lower) {
        return RankMatch {
            rank: Some(rank),
            context,
        };
    }

    if let Some((rank, context)) = bullet_rank(text, brand_lower) {
        return RankMatch {
            rank: Some(rank),
            context,
        };
    }

    if let Some((rank, context)) = ordinal_rank(text, brand_lower) {
        return RankMatch {
            rank: Some(rank),
            context,
        };
    }

    if TOP_N_RE.is_match(text) && text.to_lowercase().contains(brand_lower) {
        return RankMatch {
            rank: None,
            context: TOP_SECTION_CONTEXT.to_string(),
        };
    }

    RankMatch {
        rank: None,
        context: NOT_RANKED_CONTEXT.to_string(),
    }
}

fn bullet_rank(text: &str, brand_lower: &str) -> Option<(u32, String)> {
    let mut position = 0u32;
    for line in text.lines() {
        let stripped = line.trim();
        if stripped.starts_with(BULLET_MARKERS) {
            position += 1;
            if stripped.to_lowercase().contains(brand_lower) {
                return Some((position, stripped.to_string()));
            }
        }
    }
    None
}

fn ordinal_rank(text: &str, brand_lower: &str) -> Option<(u32, String)> {
    for (re, value) in ORDINAL_RES.iter() {
        for caps in re.captures_iter(text) {
            let Some(following) = caps.get(1) else {
                continue;
            };
            if following.as_str().to_lowercase().contains(brand_lower) {
                return Some((*value, following.as_str().trim().to_string()));
            }
        }
    }
    None
}
