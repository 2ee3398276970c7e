use std::collections::BTreeMap;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::analysis::signals::visible_text;
use crate::filter::LinkScope;

/// Path segments that mark a link target as part of the course catalog
const COURSE_PATH_SEGMENTS: &[&str] = &["course", "courses", "catalog", "curriculum", "program"];

/// Anchor-text vocabulary that marks a link as course-related
const COURSE_VOCABULARY: &[&str] = &[
    "course",
    "learn",
    "training",
    "lesson",
    "enroll",
    "curriculum",
];

/// Per-keyword density, keyed by the lowercased keyword.
///
/// Densities are occurrence counts divided by the page's total token count,
/// so they always fall in [0, 1]. The map is ordered, so repeated analysis
/// of identical input serializes identically.
pub type KeywordProfile = BTreeMap<String, f64>;

/// Where on the page an internal link was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkContext {
    Navigation,
    Content,
    Footer,
}

/// An internal link with its derived weight.
///
/// Weight is always in [1, 5]; it is computed from the link target and
/// anchor text, never stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    pub href: String,
    pub anchor_text: String,
    pub context: LinkContext,
    pub weight: u8,
}

/// Counts tokens longer than two characters in stripped page text.
///
/// Short tokens are excluded to keep stray single letters and particles
/// from skewing the count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().filter(|t| t.len() > 2).count()
}

/// Counts every whitespace-separated token, with no length filter.
///
/// This is the denominator used for keyword density, shared by all
/// keywords for comparability.
pub fn total_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Computes case-insensitive whole-word densities for each target keyword.
pub fn keyword_densities(text: &str, keywords: &[String]) -> KeywordProfile {
    let total = total_tokens(text);
    let mut profile = KeywordProfile::new();

    for keyword in keywords {
        let key = keyword.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }

        let density = if total == 0 {
            0.0
        } else {
            // Whole-word, case-insensitive occurrence count
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&key));
            let matches = match Regex::new(&pattern) {
                Ok(re) => re.find_iter(text).count(),
                Err(_) => 0,
            };
            matches as f64 / total as f64
        };

        profile.insert(key, density);
    }

    profile
}

/// Extracts the internal links of a page with their contexts and weights
pub fn extract_internal_links(markup: &str, scope: &LinkScope) -> Vec<InternalLink> {
    let doc = Html::parse_document(markup);
    let anchor_selector = Selector::parse("a").unwrap();

    let mut links = Vec::new();
    for anchor in doc.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !scope.is_internal(href) {
            continue;
        }

        let anchor_text = anchor
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let context = classify_context(&anchor);
        let weight = link_weight(href, &anchor_text, scope);

        links.push(InternalLink {
            href: href.to_string(),
            anchor_text,
            context,
            weight,
        });
    }

    ::log::debug!("Found {} internal links", links.len());
    links
}

/// Classifies a link by its enclosing markup. The nearest wrapping
/// nav/header/footer element wins; anything else is page content.
fn classify_context(anchor: &ElementRef) -> LinkContext {
    for ancestor in anchor.ancestors() {
        if let Some(element) = ElementRef::wrap(ancestor) {
            match element.value().name() {
                "nav" | "header" => return LinkContext::Navigation,
                "footer" => return LinkContext::Footer,
                _ => {}
            }
        }
    }
    LinkContext::Content
}

/// Derives a link weight from the target path and anchor text.
///
/// Base 1, +2 for a course/catalog path segment, +1 for course vocabulary
/// in the anchor text, +1 for anchor text between 4 and 49 characters,
/// clamped to 5.
fn link_weight(href: &str, anchor_text: &str, scope: &LinkScope) -> u8 {
    let mut weight: u8 = 1;

    let path = scope
        .normalize(href)
        .map(|u| u.path().to_lowercase())
        .unwrap_or_else(|| href.to_lowercase());
    if path
        .split('/')
        .any(|segment| COURSE_PATH_SEGMENTS.contains(&segment))
    {
        weight += 2;
    }

    let anchor_lower = anchor_text.to_lowercase();
    if COURSE_VOCABULARY.iter().any(|v| anchor_lower.contains(v)) {
        weight += 1;
    }

    let anchor_chars = anchor_text.chars().count();
    if (4..=49).contains(&anchor_chars) {
        weight += 1;
    }

    weight.min(5)
}

/// Full content analysis of a page: word count, keyword densities and the
/// weighted internal-link inventory
pub fn analyze(markup: &str, keywords: &[String], scope: &LinkScope) -> ContentProfile {
    let text = visible_text(markup);

    ContentProfile {
        word_count: word_count(&text),
        keywords: keyword_densities(&text, keywords),
        internal_links: extract_internal_links(markup, scope),
    }
}

/// Result of content analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProfile {
    /// Tokens longer than two characters in the stripped page text
    pub word_count: usize,
    /// Density per target keyword
    pub keywords: KeywordProfile,
    /// Same-site links with derived weights
    pub internal_links: Vec<InternalLink>,
}

impl ContentProfile {
    /// Target keywords that never appear in the page text
    pub fn absent_keywords(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .filter(|(_, density)| **density == 0.0)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}
