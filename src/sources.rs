//! Source lists for results: cited URLs plus fact-checking references.
//!
//! Cited URLs are canonicalized so the same article cited twice, or cited
//! through an aggregator redirect, is listed once.

use url::Url;

use crate::signals::citations::URL_PATTERN;

// ── Tracking and redirect tables ─────────────────────────────────────

static TRACKING_QUERY_PREFIXES: &[&str] = &["utm_"];
static TRACKING_QUERY_KEYS: &[&str] = &["fbclid", "gclid", "oc", "ved", "cid", "mc_cid", "mc_eid"];

/// Aggregator hosts and the query keys that carry the real target.
static REDIRECT_HOSTS: &[(&str, &[&str])] = &[
    ("news.google.", &["url", "u", "q"]),
    ("l.facebook.com", &["u"]),
    ("out.reddit.com", &["url"]),
];

// Sentence punctuation that trails a URL in running text.
const TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', '"', '\''];

// ── URL canonicalization ─────────────────────────────────────────────

fn is_tracking_key(key: &str) -> bool {
    let key = key.to_lowercase();
    TRACKING_QUERY_KEYS.contains(&key.as_str())
        || TRACKING_QUERY_PREFIXES.iter().any(|p| key.starts_with(p))
}

fn redirect_target(parsed: &Url) -> Option<String> {
    let host = parsed.host_str()?;
    let (_, keys) = REDIRECT_HOSTS
        .iter()
        .find(|(pattern, _)| host.contains(pattern))?;
    parsed.query_pairs().find_map(|(key, value)| {
        let candidate = value.trim();
        let is_target = keys.contains(&key.to_lowercase().as_str())
            && (candidate.starts_with("http://") || candidate.starts_with("https://"));
        is_target.then(|| candidate.to_string())
    })
}

fn strip_tracking(mut parsed: Url) -> String {
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_key(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }
    parsed.set_fragment(None);
    parsed.to_string()
}

/// Canonical form of a cited URL, or `None` when it does not parse.
pub fn canonicalize_url(raw: &str) -> Option<String> {
    let raw = raw.trim().trim_end_matches(TRAILING);
    let parsed = Url::parse(raw).ok()?;
    if let Some(target) = redirect_target(&parsed) {
        return Url::parse(&target).ok().map(strip_tracking);
    }
    Some(strip_tracking(parsed))
}

/// Canonical URLs cited in `text`, de-duplicated in order of appearance.
// ── Source lists ─────────────────────────────────────────────────────

pub fn cited_sources(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in URL_PATTERN.find_iter(text) {
        if let Some(url) = canonicalize_url(m.as_str()) {
            if !seen.contains(&url) {
                seen.push(url);
            }
        }
    }
    seen
}

/// Cited sources followed by the fact-checking references not already cited.
pub fn collect_sources(text: &str, fact_check: &[String]) -> Vec<String> {
    let mut sources = cited_sources(text);
    for reference in fact_check {
        if !sources.contains(reference) {
            sources.push(reference.clone());
        }
    }
    sources
}
