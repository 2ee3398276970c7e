use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::signals;
use crate::fetch::PageFetcher;
use crate::scoring::{perf, seo};
use crate::vitals::{self, TimingSnapshot, WebVitalsSample};

/// The one fixed optional suggestion every dashboard carries
const OPTIONAL_SUGGESTION: &str =
    "Serve images in next-gen formats and front static assets with a CDN";

/// Recommendations partitioned by urgency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub critical: Vec<String>,
    pub important: Vec<String>,
    pub optional: Vec<String>,
}

/// Deterministic deltas against the previous report for the same URL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub improvement: f64,
    pub regression: f64,
}

/// The score pair a report is later compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardScores {
    pub seo: u8,
    pub performance: u8,
}

impl DashboardScores {
    /// Mean of the two scores, the basis for trend deltas
    fn combined(&self) -> f64 {
        (self.seo as f64 + self.performance as f64) / 2.0
    }
}

/// Unified quality report for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub timestamp: DateTime<Utc>,
    pub core_web_vitals: WebVitalsSample,
    pub seo_score: u8,
    pub performance_score: u8,
    pub recommendations: RecommendationSet,
    pub trends: TrendDelta,
}

impl DashboardReport {
    /// The scores a later report compares itself against
    pub fn scores(&self) -> DashboardScores {
        DashboardScores {
            seo: self.seo_score,
            performance: self.performance_score,
        }
    }
}

/// Composes the unified report for a page.
///
/// The three upstream computations are independent and issued
/// concurrently; the composer waits for all of them (or their fallbacks)
/// before producing a report. A failed fetch degrades the SEO side to the
/// fixed zero-score result, it is not retried.
pub async fn compose(
    url: &str,
    fetcher: &dyn PageFetcher,
    timeout: Duration,
    snapshot: &TimingSnapshot,
    observed_vitals: (f64, f64, f64),
    previous: Option<DashboardScores>,
) -> DashboardReport {
    let seo_task = async {
        match fetcher.fetch(url, timeout).await {
            Ok(markup) => seo::audit(&signals::extract(&markup)),
            Err(e) => {
                ::log::warn!("Audit fetch for {} failed: {}", url, e);
                seo::SeoAuditResult::fetch_failure()
            }
        }
    };
    let perf_task = async { perf::score(&vitals::collect(snapshot)) };
    let vitals_task = async {
        let (lcp, inp, cls) = observed_vitals;
        WebVitalsSample::classify(lcp, inp, cls)
    };

    let (seo_result, perf_report, core_web_vitals) = tokio::join!(seo_task, perf_task, vitals_task);

    let current = DashboardScores {
        seo: seo_result.score,
        performance: perf_report.score,
    };

    DashboardReport {
        timestamp: Utc::now(),
        core_web_vitals,
        seo_score: current.seo,
        performance_score: current.performance,
        recommendations: RecommendationSet {
            critical: perf_report.critical_issues,
            important: perf_report.recommendations,
            optional: vec![OPTIONAL_SUGGESTION.to_string()],
        },
        trends: trend_delta(current, previous),
    }
}

/// Positive and negative parts of the change in combined score since the
/// previous report. First report for a URL yields zero deltas.
fn trend_delta(current: DashboardScores, previous: Option<DashboardScores>) -> TrendDelta {
    let Some(prev) = previous else {
        return TrendDelta {
            improvement: 0.0,
            regression: 0.0,
        };
    };

    let change = current.combined() - prev.combined();
    TrendDelta {
        improvement: change.max(0.0),
        regression: (-change).max(0.0),
    }
}
