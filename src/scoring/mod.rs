pub mod perf;
pub mod seo;

pub use perf::{Grade, PerformanceReport};
pub use seo::{IssueCategory, SeoAuditResult, SeoIssue, SeoMetrics, Severity};
