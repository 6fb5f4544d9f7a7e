// src/utils.rs
use once_cell::sync::Lazy;
use regex::Regex;

static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+\.[a-zA-Z0-9]+$").expect("valid domain regex"));

static SUBDOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z0-9-]+\.){2,}[a-zA-Z]{2,}").expect("valid subdomain regex"));

static SITE_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^site:\S+$").expect("valid site query regex"));

static COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9][0-9',]*").expect("valid count regex"));

/// Check a target domain against the two-label `name.tld` shape.
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// Pull the first host-like run of at least three labels out of a URL.
pub fn extract_subdomain(url: &str) -> Option<&str> {
    SUBDOMAIN_RE.find(url).map(|m| m.as_str())
}

/// A query made of a lone `site:` operator enumerates hosts rather than content.
pub fn is_subdomain_query(query: &str) -> bool {
    SITE_ONLY_RE.is_match(query.trim())
}

/// Collapse every whitespace run in scraped text to a single space, so a
/// title always fits on one output line.
pub fn normalize_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the first number (with `,` or `'` grouping) out of a result-stats line.
pub fn parse_result_count(text: &str) -> Option<u64> {
    let digits: String = COUNT_RE
        .find(text)?
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
