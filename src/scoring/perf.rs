use serde::{Deserialize, Serialize};

use crate::vitals::PerformanceMetrics;

// Metric thresholds (milliseconds, except bundle counts)
const TTFB_GOOD_MS: f64 = 800.0;
const TTFB_NEEDS_IMPROVEMENT_MS: f64 = 1800.0;
const FCP_GOOD_MS: f64 = 1800.0;
const FCP_NEEDS_IMPROVEMENT_MS: f64 = 3000.0;
const JS_BUNDLES_HIGH: u32 = 10;
const JS_BUNDLES_EXCESSIVE: u32 = 15;
const DCL_SLOW_MS: f64 = 2000.0;
const DCL_VERY_SLOW_MS: f64 = 3000.0;

/// Letter grade derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Maps a score onto the non-overlapping grade bands, top-down
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            Grade::A
        } else if score >= 80 {
            Grade::B
        } else if score >= 70 {
            Grade::C
        } else if score >= 60 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Graded performance report with its recommendation/critical split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub score: u8,
    pub grade: Grade,
    pub metrics: PerformanceMetrics,
    pub recommendations: Vec<String>,
    pub critical_issues: Vec<String>,
}

/// Scores page-load metrics with weighted deductions from 100.
///
/// Each category deducts at most its weight ceiling. Critical vs.
/// non-critical classification is fixed per metric: a TTFB breach is
/// always critical, everything else is a recommendation.
pub fn score(metrics: &PerformanceMetrics) -> PerformanceReport {
    let mut score: i32 = 100;
    let mut recommendations = Vec::new();
    let mut critical_issues = Vec::new();

    // TTFB, weight ceiling 25
    if metrics.ttfb > TTFB_NEEDS_IMPROVEMENT_MS {
        score -= 25;
        critical_issues.push(format!(
            "Time to first byte is {:.0}ms - investigate server response time",
            metrics.ttfb
        ));
    } else if metrics.ttfb > TTFB_GOOD_MS {
        score -= 15;
        critical_issues.push(format!(
            "Time to first byte is {:.0}ms - consider caching or a closer edge",
            metrics.ttfb
        ));
    }

    // FCP, weight ceiling 20
    if metrics.fcp > FCP_NEEDS_IMPROVEMENT_MS {
        score -= 20;
        recommendations.push("Reduce first contentful paint: inline critical CSS and defer non-essential scripts".to_string());
    } else if metrics.fcp > FCP_GOOD_MS {
        score -= 12;
        recommendations
            .push("First contentful paint is above 1.8s - trim render-blocking resources".to_string());
    }

    // Script bundles, weight ceiling 15
    if metrics.js_bundle_count > JS_BUNDLES_EXCESSIVE {
        score -= 15;
        recommendations.push(format!(
            "{} script bundles loaded - bundle or code-split aggressively",
            metrics.js_bundle_count
        ));
    } else if metrics.js_bundle_count > JS_BUNDLES_HIGH {
        score -= 8;
        recommendations.push(format!(
            "{} script bundles loaded - consider consolidating",
            metrics.js_bundle_count
        ));
    }

    // DOMContentLoaded, weight ceiling 15
    if metrics.dom_content_loaded > DCL_VERY_SLOW_MS {
        score -= 15;
        recommendations
            .push("DOMContentLoaded exceeds 3s - defer scripts and reduce DOM size".to_string());
    } else if metrics.dom_content_loaded > DCL_SLOW_MS {
        score -= 8;
        recommendations.push("DOMContentLoaded exceeds 2s - audit synchronous work".to_string());
    }

    let score = score.max(0) as u8;

    ::log::debug!(
        "Performance score {} ({:?}) with {} critical issues",
        score,
        Grade::from_score(score),
        critical_issues.len()
    );

    PerformanceReport {
        score,
        grade: Grade::from_score(score),
        metrics: metrics.clone(),
        recommendations,
        critical_issues,
    }
}
