//! String canonicalization shared by every matching stage
//!
//! All functions here are total: any input, including the empty string,
//! produces a string, never an error. The core-key reduction is an
//! explicit ordered sequence of named steps; the order is a contract
//! relied on by the fuzzy matcher and pinned by the tests below.

/// Collapse internal whitespace, trim, lowercase. Used for matching
/// spreadsheet column headers.
pub fn normalize_header(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Uppercase, then strip all whitespace, hyphens, periods, and
/// underscores. Used for matching city/landmark names.
pub fn normalize_location_key(s: &str) -> String {
    s.to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '_'))
        .collect()
}

/// Lowercase and strip all whitespace. Used for route-matching keys.
pub fn normalize_simple(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Content of the last `(...)` group in the string, trimmed; empty
/// string when there is no complete group.
pub fn extract_parenthetical_code(s: &str) -> String {
    let Some(open) = s.rfind('(') else {
        return String::new();
    };
    let rest = &s[open + 1..];
    match rest.find(')') {
        Some(close) => rest[..close].trim().to_string(),
        None => String::new(),
    }
}

/// Branch-name prefix ignored by the core-key reduction
const CORE_KEY_PREFIX: &str = "safexpress";

/// Facility-role suffixes ignored by the core-key reduction
const CORE_KEY_SUFFIXES: &[&str] = &["hub", "sds", "inbound", "outbound"];

/// Heavily normalized form of a location/route name used for substring
/// matching. Steps, in order: strip parentheticals, hyphens to spaces,
/// strip non-alphanumerics, collapse whitespace and lowercase, strip the
/// leading branch prefix token, strip a trailing facility-role token,
/// strip remaining spaces.
pub fn core_key(s: &str) -> String {
    let s = strip_parentheticals(s);
    let s = hyphens_to_spaces(&s);
    let s = strip_non_alphanumeric(&s);
    let s = collapse_whitespace(&s).to_lowercase();
    let s = strip_prefix_token(&s, CORE_KEY_PREFIX);
    let s = strip_suffix_token(&s, CORE_KEY_SUFFIXES);
    s.replace(' ', "")
}

/// Remove every `(...)` group, including the parentheses
pub fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

pub fn hyphens_to_spaces(s: &str) -> String {
    s.replace('-', " ")
}

/// Keep alphanumerics and whitespace only
pub fn strip_non_alphanumeric(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_prefix_token(s: &str, token: &str) -> String {
    match s.strip_prefix(token) {
        Some(rest) if rest.starts_with(' ') => rest.trim_start().to_string(),
        _ => s.to_string(),
    }
}

fn strip_suffix_token(s: &str, tokens: &[&str]) -> String {
    for token in tokens {
        if let Some(rest) = s.strip_suffix(token) {
            if rest.ends_with(' ') {
                return rest.trim_end().to_string();
            }
        }
    }
    s.to_string()
}
