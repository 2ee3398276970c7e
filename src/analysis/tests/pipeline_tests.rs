use crate::analysis::{content, signals};
use crate::filter::LinkScope;
use crate::scoring::seo;

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE_PAGE: &str = r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Practical Rust Training for Teams</title>
            <meta name="description" content="Instructor-led Rust courses with real projects.">
            <meta property="og:title" content="Practical Rust Training">
            <script type="application/ld+json">{"@type":"Course","name":"Practical Rust"}</script>
        </head>
        <body>
            <nav><a href="/courses">Browse courses</a></nav>
            <h1>Rust training that sticks</h1>
            <p>Our rust curriculum covers ownership, lifetimes and async in depth.</p>
            <img src="/pairing.webp" alt="Engineers pairing on Rust code">
            <a href="/courses/async">Async Rust course</a>
            <footer><a href="/imprint">Imprint</a></footer>
        </body>
        </html>"#;

    #[test]
    fn test_full_pipeline_on_a_healthy_page() {
        let page_signals = signals::extract(COURSE_PAGE);
        let scope = LinkScope::new("https://example.com/").unwrap();
        let profile = content::analyze(COURSE_PAGE, &["rust".to_string()], &scope);

        let result = seo::audit_with_content(&page_signals, Some(&profile));

        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
        // Keyword present, so only the band recommendation remains
        assert_eq!(result.recommendations.len(), 1);

        assert_eq!(profile.internal_links.len(), 3);
        assert!(profile.keywords["rust"] > 0.0);
    }

    #[test]
    fn test_extraction_feeds_scoring_consistently() {
        // Strip the structured data block and the audit must lose exactly
        // that check's penalty
        let without_ld = COURSE_PAGE.replace(
            r#"<script type="application/ld+json">{"@type":"Course","name":"Practical Rust"}</script>"#,
            "",
        );

        let full = seo::audit(&signals::extract(COURSE_PAGE));
        let reduced = seo::audit(&signals::extract(&without_ld));

        assert_eq!(full.score - reduced.score, 8);
        assert_eq!(reduced.issues.len(), 1);
    }

    #[test]
    fn test_scores_stay_in_bounds_across_inputs() {
        let inputs = [
            "",
            "plain text only",
            COURSE_PAGE,
            "<html><body><img src=a><img src=b><img src=c><img src=d><img src=e><img src=f></body></html>",
        ];

        for markup in inputs {
            let result = seo::audit(&signals::extract(markup));
            assert!(result.score <= 100);
        }
    }
}
