//! Source citations: attribution phrases and inline URLs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{flag, per, Signal};

static CITATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"according to",
        r"study shows?",
        r"research indicates?",
        r"experts? say",
        r"officials? said",
        r"reports? suggest",
        r"data shows?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub(crate) static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceCitations {
    pub citation_count: f64,
    pub url_count: f64,
    pub has_sources: bool,
    /// Citations and URLs per word.
    pub source_density: f64,
}

impl Signal for SourceCitations {
    fn features(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("citation_count", self.citation_count),
            ("url_count", self.url_count),
            ("has_sources", flag(self.has_sources)),
            ("source_density", self.source_density),
        ]
    }
}

pub fn analyze_source_citations(text: &str) -> SourceCitations {
    let haystack = text.to_lowercase();
    let citations: usize = CITATION_PATTERNS
        .iter()
        .map(|re| re.find_iter(&haystack).count())
        .sum();
    let urls = URL_PATTERN.find_iter(text).count();

    SourceCitations {
        citation_count: citations as f64,
        url_count: urls as f64,
        has_sources: citations > 0 || urls > 0,
        source_density: per((citations + urls) as f64, text.split_whitespace().count()),
    }
}
