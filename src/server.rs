use std::collections::HashMap;
use std::error::Error;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use futures::FutureExt;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::analysis::{content, signals};
use crate::config::ServerConfig;
use crate::dashboard::{self, DashboardReport, DashboardScores};
use crate::fetch::{HttpFetcher, PageFetcher, calculate_timeout};
use crate::filter::LinkScope;
use crate::scoring::seo::{self, SeoAuditResult};
use crate::vitals::{NavigationTiming, TimingSnapshot};

const ERR_URL_REQUIRED: &str = "URL is required for SEO audit";
const ERR_SEO_AUDIT: &str = "Failed to perform SEO audit";
const ERR_DASHBOARD: &str = "Failed to generate performance dashboard";
const ERR_STORE_METRIC: &str = "Failed to store performance metric";

/// Upper bound on distinct URLs held in the client-sample store
const SAMPLE_STORE_CAP: usize = 1000;

/// Metric names the store accepts from clients; anything else is dropped
/// so the unauthenticated endpoint cannot grow the store without bound
const KNOWN_METRICS: &[&str] = &["lcp", "inp", "fid", "cls", "ttfb", "fcp", "domcontentloaded"];

/// Latest client-observed timing value per (url, metric)
#[derive(Debug, Default)]
pub struct SampleStore {
    pages: HashMap<String, HashMap<String, f64>>,
}

impl SampleStore {
    /// Record one sample; the latest value wins, negatives clamp to zero.
    /// Samples for metrics outside the known set are dropped.
    pub fn record(&mut self, url: &str, metric: &str, value: f64) {
        let name = metric.trim().to_lowercase();
        if !KNOWN_METRICS.contains(&name.as_str()) {
            ::log::debug!("Ignoring unknown metric {} for {}", metric, url);
            return;
        }

        if !self.pages.contains_key(url) && self.pages.len() >= SAMPLE_STORE_CAP {
            ::log::warn!("Sample store full, dropping sample for {}", url);
            return;
        }

        self.pages.entry(url.to_string()).or_default().insert(name, value.max(0.0));
    }

    fn metric(&self, url: &str, name: &str) -> Option<f64> {
        self.pages.get(url).and_then(|m| m.get(name)).copied()
    }

    /// Latest observed lcp/inp/cls for a URL, zeros when never reported.
    /// `fid` is accepted as the legacy name for `inp`.
    pub fn observed_vitals(&self, url: &str) -> (f64, f64, f64) {
        let lcp = self.metric(url, "lcp").unwrap_or(0.0);
        let inp = self
            .metric(url, "inp")
            .or_else(|| self.metric(url, "fid"))
            .unwrap_or(0.0);
        let cls = self.metric(url, "cls").unwrap_or(0.0);
        (lcp, inp, cls)
    }

    /// Rebuild a timing snapshot from client-observed navigation samples.
    /// Without any, the collector's no-page-context default applies.
    pub fn timing_snapshot(&self, url: &str) -> TimingSnapshot {
        let ttfb = self.metric(url, "ttfb");
        let fcp = self.metric(url, "fcp");
        let dcl = self.metric(url, "domcontentloaded");

        if ttfb.is_none() && fcp.is_none() && dcl.is_none() {
            return TimingSnapshot::default();
        }

        TimingSnapshot {
            navigation: Some(NavigationTiming {
                navigation_start: 0.0,
                request_start: 0.0,
                response_start: ttfb.unwrap_or(0.0),
                dom_content_loaded_event_start: fcp.unwrap_or(0.0),
                dom_content_loaded_event_end: dcl.unwrap_or(0.0),
            }),
            resources: Vec::new(),
        }
    }
}

/// Shared state behind the HTTP surface
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub config: ServerConfig,
    pub samples: Mutex<SampleStore>,
    pub last_reports: Mutex<HashMap<String, DashboardScores>>,
}

impl AppState {
    pub fn new(config: ServerConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            config,
            samples: Mutex::new(SampleStore::default()),
            last_reports: Mutex::new(HashMap::new()),
        }
    }
}

/// Builds the audit router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/seo/audit", post(seo_audit))
        .route(
            "/performance/dashboard",
            get(performance_dashboard).post(record_metric),
        )
        .with_state(state)
}

/// Runs the HTTP server until shutdown
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config, Arc::new(HttpFetcher::new())));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    ::log::info!("Audit server listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SeoAuditRequest {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricSample {
    metric: String,
    value: f64,
    url: String,
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn success<T: serde::Serialize>(data: T) -> axum::response::Response {
    Json(serde_json::json!({ "success": true, "data": data })).into_response()
}

/// POST /seo/audit
///
/// A fetch failure is not an HTTP error: it degrades to the fixed
/// zero-score result and still answers 200.
async fn seo_audit(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SeoAuditRequest>>,
) -> impl IntoResponse {
    let url = match body
        .and_then(|Json(req)| req.url)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
    {
        Some(url) => url,
        None => return bad_request(ERR_URL_REQUIRED),
    };

    match AssertUnwindSafe(run_seo_audit(&state, &url))
        .catch_unwind()
        .await
    {
        Ok(result) => success(result),
        Err(cause) => {
            ::log::error!("SEO audit for {} panicked: {:?}", url, cause);
            internal_error(ERR_SEO_AUDIT)
        }
    }
}

async fn run_seo_audit(state: &AppState, url: &str) -> SeoAuditResult {
    let timeout = calculate_timeout(state.config.engine.fetch_timeout_ms, url.len());

    let markup = match state.fetcher.fetch(url, timeout).await {
        Ok(markup) => markup,
        Err(e) => {
            ::log::warn!("Audit fetch for {} failed: {}", url, e);
            return SeoAuditResult::fetch_failure();
        }
    };

    let page_signals = signals::extract(&markup);
    let keywords = &state.config.engine.keywords;
    if keywords.is_empty() {
        return seo::audit(&page_signals);
    }

    // Keyword-aware recommendations need the content profile, which in
    // turn needs a link scope rooted at the audited URL
    match LinkScope::new(url) {
        Ok(scope) => {
            let profile = content::analyze(&markup, keywords, &scope);
            seo::audit_with_content(&page_signals, Some(&profile))
        }
        Err(_) => seo::audit(&page_signals),
    }
}

/// GET /performance/dashboard?url=
async fn performance_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| state.config.engine.site_root.clone());

    match AssertUnwindSafe(run_dashboard(&state, &url))
        .catch_unwind()
        .await
    {
        Ok(report) => success(report),
        Err(cause) => {
            ::log::error!("Dashboard for {} panicked: {:?}", url, cause);
            internal_error(ERR_DASHBOARD)
        }
    }
}

async fn run_dashboard(state: &AppState, url: &str) -> DashboardReport {
    let timeout = calculate_timeout(state.config.engine.fetch_timeout_ms, url.len());

    let (snapshot, observed) = {
        let samples = state.samples.lock().await;
        (samples.timing_snapshot(url), samples.observed_vitals(url))
    };
    let previous = state.last_reports.lock().await.get(url).copied();

    let report = dashboard::compose(
        url,
        state.fetcher.as_ref(),
        timeout,
        &snapshot,
        observed,
        previous,
    )
    .await;

    state
        .last_reports
        .lock()
        .await
        .insert(url.to_string(), report.scores());

    report
}

/// POST /performance/dashboard
///
/// Fire-and-forget recording of a single client-observed timing sample.
async fn record_metric(
    State(state): State<Arc<AppState>>,
    Json(sample): Json<MetricSample>,
) -> impl IntoResponse {
    let store = async {
        state
            .samples
            .lock()
            .await
            .record(&sample.url, &sample.metric, sample.value);
    };

    match AssertUnwindSafe(store).catch_unwind().await {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(cause) => {
            ::log::error!("Storing metric {} panicked: {:?}", sample.metric, cause);
            internal_error(ERR_STORE_METRIC)
        }
    }
}
