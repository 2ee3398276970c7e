use crate::analysis::signals::{self, PageSignals};

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title> Practical Rust Training </title>
            <meta name="description" content="Hands-on Rust courses for working engineers.">
            <meta property="og:title" content="Practical Rust Training">
            <script type="application/ld+json">{"@type":"Course"}</script>
            <script type="application/ld+json">{"@type":"Organization"}</script>
        </head>
        <body>
            <h1>Learn Rust</h1>
            <h2>Why Rust</h2>
            <h2>Curriculum</h2>
            <img src="/hero.webp" alt="Students pairing on Rust code">
            <img src="/logo.svg" alt="">
            <img src="/banner.png">
            <a href="/courses">Courses</a>
            <a href="/pricing">Pricing</a>
            <a href="https://twitter.com/example">Twitter</a>
        </body>
        </html>"#;

    #[test]
    fn test_extract_full_page() {
        let signals = signals::extract(FULL_PAGE);

        assert!(signals.has_title);
        assert_eq!(signals.title_length, "Practical Rust Training".len());
        assert!(signals.has_description);
        assert_eq!(
            signals.description_length,
            "Hands-on Rust courses for working engineers.".len()
        );
        assert!(signals.has_open_graph_title);
        assert!(signals.has_lang_attribute);
        assert_eq!(signals.heading_count, 3);
        assert_eq!(signals.h1_count, 1);
        assert_eq!(signals.image_count, 3);
        // An empty alt="" does not count as covered
        assert_eq!(signals.images_with_alt, 1);
        assert_eq!(signals.images_missing_alt(), 2);
        assert_eq!(signals.structured_data_block_count, 2);
        assert_eq!(signals.link_count, 3);
    }

    #[test]
    fn test_extract_empty_markup_defaults() {
        let signals = signals::extract("");
        assert_eq!(signals, PageSignals::default());
    }

    #[test]
    fn test_extract_bare_text_defaults() {
        let signals = signals::extract("just some text, no markup");

        assert!(!signals.has_title);
        assert!(!signals.has_description);
        assert_eq!(signals.heading_count, 0);
        assert_eq!(signals.link_count, 0);
    }

    #[test]
    fn test_extract_tolerates_malformed_markup() {
        // Unclosed tags and stray brackets must not break extraction
        let signals = signals::extract("<html><body><h1>Hi<h2>There<img src=x");

        assert_eq!(signals.heading_count, 2);
        assert_eq!(signals.h1_count, 1);
        assert_eq!(signals.image_count, 1);
    }

    #[test]
    fn test_empty_title_is_not_present() {
        let signals = signals::extract("<html><head><title>   </title></head><body></body></html>");

        assert!(!signals.has_title);
        assert_eq!(signals.title_length, 0);
    }

    #[test]
    fn test_description_without_content_still_counts_as_present() {
        let signals = signals::extract(
            r#"<html><head><meta name="description"></head><body><p>hi</p></body></html>"#,
        );

        assert!(signals.has_description);
        assert_eq!(signals.description_length, 0);
    }

    #[test]
    fn test_empty_lang_is_not_present() {
        let signals = signals::extract(r#"<html lang=""><body><p>hi</p></body></html>"#);
        assert!(!signals.has_lang_attribute);
    }

    #[test]
    fn test_visible_text_strips_tags_and_collapses_whitespace() {
        let text = signals::visible_text(
            "<html><body><h1>Learn   Rust</h1>\n<p>Ownership,\nexplained.</p></body></html>",
        );
        assert_eq!(text, "Learn Rust Ownership, explained.");
    }
}
