use serde::{Deserialize, Serialize};

// Core Web Vitals thresholds (milliseconds, except CLS which is unitless)
const LCP_GOOD_MS: f64 = 2500.0;
const LCP_NEEDS_IMPROVEMENT_MS: f64 = 4000.0;
const INP_GOOD_MS: f64 = 100.0;
const INP_NEEDS_IMPROVEMENT_MS: f64 = 300.0;
const CLS_GOOD: f64 = 0.1;
const CLS_NEEDS_IMPROVEMENT: f64 = 0.25;

/// Millisecond offsets from a browser navigation timing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationTiming {
    pub navigation_start: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub dom_content_loaded_event_start: f64,
    pub dom_content_loaded_event_end: f64,
}

/// One browser resource timing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTiming {
    /// Resource URL
    pub name: String,
    /// Load duration in milliseconds
    pub duration: f64,
}

/// A set of timing entries captured from a page context.
///
/// `navigation` is None when no timing API was available (e.g. the engine
/// runs outside a browser); the collector then falls back to default
/// metrics instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSnapshot {
    pub navigation: Option<NavigationTiming>,
    pub resources: Vec<ResourceTiming>,
}

/// Aggregated page-load metrics, serialized with the wire field names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(rename = "TTFB")]
    pub ttfb: f64,
    #[serde(rename = "FCP")]
    pub fcp: f64,
    #[serde(rename = "DOMContentLoaded")]
    pub dom_content_loaded: f64,
    #[serde(rename = "ResourceLoad")]
    pub resource_load: f64,
    #[serde(rename = "JSBundleCount")]
    pub js_bundle_count: u32,
    #[serde(rename = "CSSBundleCount")]
    pub css_bundle_count: u32,
}

/// Types of resources referenced by resource timing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// JavaScript bundles
    Script,
    /// CSS bundles
    Stylesheet,
    /// Images and other media
    Media,
    /// Anything else (documents, fonts, XHR, ...)
    Other,
}

impl AssetType {
    /// Determines the asset type from a resource URL
    pub fn from_url(url: &str) -> Self {
        // Ignore query string and fragment when matching the extension
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_lowercase();

        if path.ends_with(".js") || path.ends_with(".mjs") {
            ::log::debug!("Classifying as Script: {}", url);
            AssetType::Script
        } else if path.ends_with(".css") {
            ::log::debug!("Classifying as Stylesheet: {}", url);
            AssetType::Stylesheet
        } else if path.ends_with(".jpg")
            || path.ends_with(".jpeg")
            || path.ends_with(".png")
            || path.ends_with(".gif")
            || path.ends_with(".webp")
            || path.ends_with(".svg")
        {
            ::log::debug!("Classifying as Media: {}", url);
            AssetType::Media
        } else {
            ::log::debug!("Classifying as Other: {}", url);
            AssetType::Other
        }
    }
}

/// Reduces a timing snapshot to the aggregated performance metrics.
///
/// Negative timing differences clamp to zero; a snapshot with no
/// navigation entry yields the all-zero default metrics.
pub fn collect(snapshot: &TimingSnapshot) -> PerformanceMetrics {
    let Some(nav) = &snapshot.navigation else {
        ::log::debug!("No navigation timing available, using default metrics");
        return PerformanceMetrics::default();
    };

    let ttfb = (nav.response_start - nav.request_start).max(0.0);
    let fcp = (nav.dom_content_loaded_event_start - nav.navigation_start).max(0.0);
    let dom_content_loaded = (nav.dom_content_loaded_event_end - nav.navigation_start).max(0.0);

    let resource_load = snapshot
        .resources
        .iter()
        .map(|r| r.duration.max(0.0))
        .sum();
    let js_bundle_count = snapshot
        .resources
        .iter()
        .filter(|r| AssetType::from_url(&r.name) == AssetType::Script)
        .count() as u32;
    let css_bundle_count = snapshot
        .resources
        .iter()
        .filter(|r| AssetType::from_url(&r.name) == AssetType::Stylesheet)
        .count() as u32;

    PerformanceMetrics {
        ttfb,
        fcp,
        dom_content_loaded,
        resource_load,
        js_bundle_count,
        css_bundle_count,
    }
}

/// Quality band of a Core Web Vitals sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalsStatus {
    Good,
    NeedsImprovement,
    Poor,
}

/// A Core Web Vitals sample with its derived status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebVitalsSample {
    pub lcp: f64,
    pub inp: f64,
    pub cls: f64,
    pub status: VitalsStatus,
}

impl WebVitalsSample {
    /// Classifies a sample against the fixed Core Web Vitals thresholds.
    ///
    /// The poor check runs first so a single bad metric always dominates.
    pub fn classify(lcp: f64, inp: f64, cls: f64) -> Self {
        let status = if lcp > LCP_NEEDS_IMPROVEMENT_MS
            || inp > INP_NEEDS_IMPROVEMENT_MS
            || cls > CLS_NEEDS_IMPROVEMENT
        {
            VitalsStatus::Poor
        } else if lcp > LCP_GOOD_MS || inp > INP_GOOD_MS || cls > CLS_GOOD {
            VitalsStatus::NeedsImprovement
        } else {
            VitalsStatus::Good
        };

        Self {
            lcp,
            inp,
            cls,
            status,
        }
    }
}
