//! Plain-text cleanup for titles and descriptions coming out of feeds and
//! index records. Upstream documents mix HTML fragments, entity escapes and
//! raw control characters; display fields get one uniform treatment.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([0-9]+|[xX][0-9a-fA-F]+);").unwrap());

/// Normalize a raw markup fragment into bounded plain text.
///
/// Stages, in order: strip tags, decode HTML entities, drop escape and
/// control characters, collapse whitespace runs and trim. When `cap` is set
/// and the result is longer, it is cut at `cap` characters and a single
/// ellipsis is appended, so the output never exceeds `cap + 1` characters.
pub fn sanitize(raw: Option<&str>, cap: Option<usize>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let stripped = strip_tags(raw);
    let decoded = decode_entities(&stripped);
    let cleaned: String = decoded.chars().filter(|c| !is_escape_char(*c)).collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    match cap {
        Some(cap) if collapsed.chars().count() > cap => {
            let mut cut: String = collapsed.chars().take(cap).collect();
            cut.push('…');
            cut
        }
        _ => collapsed,
    }
}

/// Remove everything between `<` and `>`, keeping the text in between.
pub fn strip_tags(input: &str) -> String {
    input
        .chars()
        .fold((String::new(), false), |(mut text, in_tag), c| match c {
            '<' => (text, true),
            '>' => (text, false),
            _ if !in_tag => {
                text.push(c);
                (text, in_tag)
            }
            _ => (text, in_tag),
        })
        .0
}

/// Decode numeric references and the named entities feeds actually emit.
/// Numeric forms first and `&amp;` last: each reference is decoded once.
pub fn decode_entities(input: &str) -> String {
    let decoded = NUMERIC_ENTITY.replace_all(input, |caps: &Captures| {
        let code = &caps[1];
        let value = if let Some(hex) = code.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()
        } else {
            code.parse::<u32>().ok()
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&hellip;", "…")
        .replace("&mdash;", "\u{2014}")
        .replace("&ndash;", "\u{2013}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&rsquo;", "\u{2019}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&amp;", "&")
}

fn is_escape_char(c: char) -> bool {
    matches!(
        c,
        '\\' | '\u{0008}' | '\u{000c}' | '\n' | '\r' | '\t' | '\u{000b}'
    )
}
