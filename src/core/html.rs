// src/core/html.rs
//
// DOM helpers over `scraper`, plus the regex-era fallbacks for when the
// DOM path comes back empty.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::sanitize::{normalize_entities, normalize_ws, strip_bidi};

/// A fetched page: the raw text (for regex fallbacks) and its parsed DOM.
pub struct Page<'a> {
    pub raw: &'a str,
    pub dom: Html,
}

impl<'a> Page<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self { raw, dom: Html::parse_document(raw) }
    }

    pub fn first(&self, sel: &Selector) -> Option<ElementRef<'_>> {
        self.dom.select(sel).next()
    }

    pub fn has(&self, sel: &Selector) -> bool {
        self.first(sel).is_some()
    }

    /// Trimmed, whitespace-collapsed text of every match, in document order.
    pub fn texts(&self, sel: &Selector) -> Vec<String> {
        self.dom.select(sel).map(text_of).collect()
    }
}

/// Build a selector from a literal. Only ever called with constants, so a
/// parse failure is a programming error.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&strip_bidi(&el.text().collect::<String>()))
}

pub fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(text_of).filter(|t| !t.is_empty())
}

/// Inner HTML fragments of every capture-group-1 match.
pub fn captures_all<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Remove all tags, decode the common entities, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&strip_bidi(&normalize_entities(&out)))
}
