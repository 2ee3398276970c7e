use serde::{Deserialize, Serialize};

use crate::analysis::content::ContentProfile;
use crate::analysis::signals::PageSignals;

// Fixed deductions, one per check
const PENALTY_MISSING_TITLE: i32 = 15;
const PENALTY_MISSING_DESCRIPTION: i32 = 10;
const PENALTY_MISSING_OG_TITLE: i32 = 5;
const PENALTY_NO_STRUCTURED_DATA: i32 = 8;
const PENALTY_MISSING_LANG: i32 = 5;
const PENALTY_NO_HEADINGS: i32 = 10;
const PENALTY_MISSING_ALT_CAP: i32 = 10;

/// How serious an audit finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Which aspect of the page a finding concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Meta,
    Structure,
    Performance,
    Accessibility,
}

/// A single audit finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoIssue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl SeoIssue {
    fn new(
        severity: Severity,
        category: IssueCategory,
        message: &str,
        fix: Option<&str>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.to_string(),
            fix: fix.map(|f| f.to_string()),
        }
    }
}

/// Counters reported alongside the audit, always present and non-negative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetrics {
    pub meta_tags: u32,
    pub structured_data: u32,
    pub images: u32,
    pub links: u32,
    pub headings: u32,
}

/// Result of a single SEO audit.
///
/// `score` is the post-penalty clamped value, never negative, never above
/// 100. Issues keep their detection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoAuditResult {
    pub score: u8,
    pub issues: Vec<SeoIssue>,
    pub recommendations: Vec<String>,
    pub metrics: SeoMetrics,
}

impl SeoAuditResult {
    /// The fixed degenerate result used when the page could not be
    /// retrieved. No partial checks are run in that case.
    pub fn fetch_failure() -> Self {
        Self {
            score: 0,
            issues: vec![SeoIssue::new(
                Severity::Error,
                IssueCategory::Meta,
                "failed to retrieve page for audit",
                None,
            )],
            recommendations: vec![
                "Fix page accessibility before re-auditing".to_string(),
            ],
            metrics: SeoMetrics::default(),
        }
    }
}

/// Audits extracted page signals with the fixed penalty table
pub fn audit(signals: &PageSignals) -> SeoAuditResult {
    audit_with_content(signals, None)
}

/// Audits page signals, adding keyword-aware recommendations when a
/// content profile is supplied.
///
/// Each check deducts its fixed amount at most once; detection order is
/// stable so issue lists are comparable across runs.
pub fn audit_with_content(
    signals: &PageSignals,
    content: Option<&ContentProfile>,
) -> SeoAuditResult {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    if !signals.has_title {
        score -= PENALTY_MISSING_TITLE;
        issues.push(SeoIssue::new(
            Severity::Error,
            IssueCategory::Meta,
            "Page is missing a <title> tag",
            Some("Add a descriptive title of 30-60 characters"),
        ));
    }

    if !signals.has_description {
        score -= PENALTY_MISSING_DESCRIPTION;
        issues.push(SeoIssue::new(
            Severity::Error,
            IssueCategory::Meta,
            "Page is missing a meta description",
            Some("Add a meta description summarizing the page in 50-160 characters"),
        ));
    }

    if !signals.has_open_graph_title {
        score -= PENALTY_MISSING_OG_TITLE;
        issues.push(SeoIssue::new(
            Severity::Warning,
            IssueCategory::Meta,
            "Page is missing an og:title tag",
            Some("Add Open Graph tags so shared links render a preview"),
        ));
    }

    if signals.structured_data_block_count == 0 {
        score -= PENALTY_NO_STRUCTURED_DATA;
        issues.push(SeoIssue::new(
            Severity::Warning,
            IssueCategory::Structure,
            "No structured data blocks found",
            Some("Embed JSON-LD describing the page content"),
        ));
    }

    if !signals.has_lang_attribute {
        score -= PENALTY_MISSING_LANG;
        issues.push(SeoIssue::new(
            Severity::Error,
            IssueCategory::Accessibility,
            "The <html> element has no lang attribute",
            Some("Declare the document language, e.g. lang=\"en\""),
        ));
    }

    if signals.heading_count == 0 {
        score -= PENALTY_NO_HEADINGS;
        issues.push(SeoIssue::new(
            Severity::Error,
            IssueCategory::Structure,
            "Page has no headings of any level",
            Some("Structure the content under h1-h6 headings"),
        ));
    }

    let missing_alt = signals.images_missing_alt();
    if signals.image_count > 0 && missing_alt > 0 {
        score -= (2 * missing_alt as i32).min(PENALTY_MISSING_ALT_CAP);
        issues.push(SeoIssue::new(
            Severity::Warning,
            IssueCategory::Accessibility,
            &format!("{} of {} images lack alt text", missing_alt, signals.image_count),
            Some("Give every meaningful image a descriptive alt attribute"),
        ));
    }

    let score = score.max(0) as u8;

    let mut recommendations = vec![band_recommendation(score).to_string()];
    if let Some(profile) = content {
        for keyword in profile.absent_keywords() {
            recommendations.push(format!(
                "Target keyword \"{}\" does not appear in the page text",
                keyword
            ));
        }
    }

    ::log::debug!("SEO audit scored {} with {} issues", score, issues.len());

    SeoAuditResult {
        score,
        issues,
        recommendations,
        metrics: metrics_from_signals(signals),
    }
}

/// Chooses the summary recommendation for a final score
fn band_recommendation(score: u8) -> &'static str {
    if score >= 90 {
        "Excellent - consider micro-optimizations"
    } else if score >= 70 {
        "Good - focus on structured data and image coverage"
    } else {
        "Needs significant improvement - start with meta tags and structured data"
    }
}

fn metrics_from_signals(signals: &PageSignals) -> SeoMetrics {
    // meta_tags counts the meta signals that are present: title,
    // description and og:title
    let meta_tags = [
        signals.has_title,
        signals.has_description,
        signals.has_open_graph_title,
    ]
    .iter()
    .filter(|present| **present)
    .count() as u32;

    SeoMetrics {
        meta_tags,
        structured_data: signals.structured_data_block_count,
        images: signals.image_count,
        links: signals.link_count,
        headings: signals.heading_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect_signals() -> PageSignals {
        PageSignals {
            has_title: true,
            title_length: 42,
            has_description: true,
            description_length: 120,
            has_open_graph_title: true,
            has_lang_attribute: true,
            heading_count: 5,
            h1_count: 1,
            image_count: 3,
            images_with_alt: 3,
            structured_data_block_count: 1,
            link_count: 12,
        }
    }

    #[test]
    fn test_perfect_page_scores_100_with_no_issues() {
        let result = audit(&perfect_signals());

        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.recommendations,
            vec!["Excellent - consider micro-optimizations".to_string()]
        );
    }

    #[test]
    fn test_each_check_deducts_its_fixed_penalty() {
        let base = audit(&perfect_signals()).score;

        let cases: Vec<(PageSignals, u8)> = vec![
            (
                PageSignals {
                    has_title: false,
                    title_length: 0,
                    ..perfect_signals()
                },
                15,
            ),
            (
                PageSignals {
                    has_description: false,
                    description_length: 0,
                    ..perfect_signals()
                },
                10,
            ),
            (
                PageSignals {
                    has_open_graph_title: false,
                    ..perfect_signals()
                },
                5,
            ),
            (
                PageSignals {
                    structured_data_block_count: 0,
                    ..perfect_signals()
                },
                8,
            ),
            (
                PageSignals {
                    has_lang_attribute: false,
                    ..perfect_signals()
                },
                5,
            ),
            (
                PageSignals {
                    heading_count: 0,
                    h1_count: 0,
                    ..perfect_signals()
                },
                10,
            ),
        ];

        for (signals, penalty) in cases {
            let result = audit(&signals);
            assert_eq!(result.score, base - penalty);
            assert_eq!(result.issues.len(), 1);
        }
    }

    #[test]
    fn test_missing_alt_penalty_is_capped() {
        let cases = [(0u32, 0i32), (4, 8), (5, 10), (100, 10)];

        for (missing, penalty) in cases {
            let signals = PageSignals {
                image_count: missing.max(1) + 10,
                images_with_alt: missing.max(1) + 10 - missing,
                ..perfect_signals()
            };
            let result = audit(&signals);
            assert_eq!(result.score as i32, 100 - penalty, "missing={}", missing);
        }
    }

    #[test]
    fn test_no_images_means_no_alt_penalty() {
        let signals = PageSignals {
            image_count: 0,
            images_with_alt: 0,
            ..perfect_signals()
        };
        assert_eq!(audit(&signals).score, 100);
    }

    #[test]
    fn test_score_never_negative_and_band_recommendation() {
        let result = audit(&PageSignals::default());

        // Every check fails: 100 - 15 - 10 - 5 - 8 - 5 - 10 = 47
        assert_eq!(result.score, 47);
        assert_eq!(result.issues.len(), 6);
        assert_eq!(
            result.recommendations[0],
            "Needs significant improvement - start with meta tags and structured data"
        );
    }

    #[test]
    fn test_mid_band_recommendation() {
        // Only og:title and structured data missing: 100 - 5 - 8 = 87
        let signals = PageSignals {
            has_open_graph_title: false,
            structured_data_block_count: 0,
            ..perfect_signals()
        };
        let result = audit(&signals);

        assert_eq!(result.score, 87);
        assert_eq!(
            result.recommendations[0],
            "Good - focus on structured data and image coverage"
        );
    }

    #[test]
    fn test_fetch_failure_result_is_degenerate() {
        let result = SeoAuditResult::fetch_failure();

        assert_eq!(result.score, 0);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert_eq!(result.issues[0].message, "failed to retrieve page for audit");
        assert_eq!(result.metrics, SeoMetrics::default());
        assert_eq!(
            result.recommendations,
            vec!["Fix page accessibility before re-auditing".to_string()]
        );
    }

    #[test]
    fn test_metrics_reflect_signals() {
        let result = audit(&perfect_signals());

        assert_eq!(result.metrics.meta_tags, 3);
        assert_eq!(result.metrics.structured_data, 1);
        assert_eq!(result.metrics.images, 3);
        assert_eq!(result.metrics.links, 12);
        assert_eq!(result.metrics.headings, 5);
    }

    #[test]
    fn test_absent_keyword_recommendation() {
        use crate::analysis::content::ContentProfile;
        use std::collections::BTreeMap;

        let mut keywords = BTreeMap::new();
        keywords.insert("rust course".to_string(), 0.0);
        keywords.insert("training".to_string(), 0.02);
        let profile = ContentProfile {
            word_count: 100,
            keywords,
            internal_links: Vec::new(),
        };

        let result = audit_with_content(&perfect_signals(), Some(&profile));
        assert_eq!(result.recommendations.len(), 2);
        assert!(result.recommendations[1].contains("rust course"));
    }
}
