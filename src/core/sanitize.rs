// src/core/sanitize.rs

/// Decode the handful of entities that survive into attribute values and
/// regex-extracted fragments. The DOM path never needs this.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Scholar wraps titles and meta text in LRE/PDF bidi marks (U+202A…U+202E).
pub fn strip_bidi(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}'))
        .collect()
}

/// "1,234" → 1234, "12 345" → 12345. Empty or digit-free → None.
pub fn parse_count(s: &str) -> Option<u32> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { return None; }
    digits.parse().ok()
}

/// Key used to match papers across scrapes: whitespace collapsed, case folded.
pub fn title_key(title: &str) -> String {
    normalize_ws(title).to_lowercase()
}
