use std::sync::LazyLock;

use regex::{Captures, Regex};

static BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
/// A paragraph end swallows a line break that directly follows it
static PARAGRAPH_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>(?:\s*<br\s*/?>)?").unwrap());
static PARAGRAPH_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<p>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap()
});

/// Convert a macro's HTML content to line-broken plain text.
///
/// Paragraph ends and line breaks become `\n` (a break right after a
/// paragraph end does not add a second one), paragraph openings vanish,
/// `&nbsp;` becomes a plain space, every other tag is stripped and the
/// remaining entities are decoded. Quick copy and context-menu insertion both
/// go through here so they always agree.
pub fn html_to_text(html: &str) -> String {
    let text = PARAGRAPH_CLOSE.replace_all(html, "\n");
    let text = BREAK_TAG.replace_all(&text, "\n");
    let text = PARAGRAPH_OPEN.replace_all(&text, "");
    let text = text.replace("&nbsp;", " ");
    let text = ANY_TAG.replace_all(&text, "");
    decode_entities(&text)
}

/// Decode named and numeric character references in a single pass.
///
/// Named references use the full HTML5 table. Numeric references to NUL,
/// surrogates or past U+10FFFF decode to U+FFFD. Unrecognized names are left
/// untouched.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            match body.strip_prefix('#') {
                Some(num) => decode_numeric(num).to_string(),
                None => html_escape::decode_html_entities(&caps[0]).into_owned(),
            }
        })
        .into_owned()
}

fn decode_numeric(num: &str) -> char {
    let code = match num.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => num.parse::<u32>(),
    };
    match code {
        Ok(0) | Err(_) => char::REPLACEMENT_CHARACTER,
        Ok(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}
