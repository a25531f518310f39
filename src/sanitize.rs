//! Input Sanitizer
//!
//! Every user-entered string goes through `sanitize` before it reaches
//! application state or storage. Two passes:
//! 1. drop executable/embedding elements together with their content,
//!    and HTML comments (an unterminated one runs to the end of input)
//! 2. strip whatever tag-like `<...` text is left
//!
//! The output contains no `<`, so sanitizing twice changes nothing.

use regex::Regex;
use std::sync::OnceLock;

/// Elements removed along with everything inside them
const DANGEROUS_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "svg", "math",
];

static BLOCK_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn block_patterns() -> &'static [Regex] {
    BLOCK_PATTERNS.get_or_init(|| {
        let mut patterns: Vec<Regex> = DANGEROUS_ELEMENTS
            .iter()
            .map(|name| {
                Regex::new(&format!(r"(?is)<{name}\b[^>]*>.*?(?:</{name}\s*>|$)"))
                    .expect("Invalid element pattern")
            })
            .collect();
        patterns.push(Regex::new(r"(?s)<!--.*?(?:-->|$)").expect("Invalid comment pattern"));
        patterns
    })
}

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]*>?").expect("Invalid tag pattern"))
}

/// Strip markup from user input
pub fn sanitize(input: &str) -> String {
    let mut clean = input.to_string();
    for pattern in block_patterns() {
        clean = pattern.replace_all(&clean, "").into_owned();
    }
    tag_pattern().replace_all(&clean, "").into_owned()
}
