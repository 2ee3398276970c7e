use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Structural signals extracted from page markup.
///
/// Counts are exact tag-occurrence counts; presence flags are boolean
/// existence checks (any occurrence suffices). Missing signals stay at
/// their zero/false defaults, so extraction never fails on malformed
/// markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    pub has_title: bool,
    pub title_length: usize,
    pub has_description: bool,
    pub description_length: usize,
    pub has_open_graph_title: bool,
    pub has_lang_attribute: bool,
    pub heading_count: u32,
    pub h1_count: u32,
    pub image_count: u32,
    pub images_with_alt: u32,
    pub structured_data_block_count: u32,
    pub link_count: u32,
}

impl PageSignals {
    /// Number of images that carry no usable alt text.
    pub fn images_missing_alt(&self) -> u32 {
        self.image_count.saturating_sub(self.images_with_alt)
    }
}

/// Extracts structural signals from raw page markup.
pub fn extract(markup: &str) -> PageSignals {
    let doc = Html::parse_document(markup);

    // Title presence and length
    let title_selector = Selector::parse("head title").unwrap();
    let title_text = doc
        .select(&title_selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string());

    // Meta description. Presence is an existence check on the tag; the
    // length comes from the content attribute when there is one.
    let description_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let description = doc.select(&description_selector).next();
    let has_description = description.is_some();
    let description_length = description
        .and_then(|e| e.value().attr("content"))
        .map(str::len)
        .unwrap_or(0);

    // Open Graph title
    let og_title_selector = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    let has_open_graph_title = doc.select(&og_title_selector).next().is_some();

    // lang attribute on the root element
    let has_lang_attribute = doc
        .root_element()
        .value()
        .attr("lang")
        .map(|l| !l.trim().is_empty())
        .unwrap_or(false);

    // Headings of any level, h1 separately
    let heading_selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let h1_selector = Selector::parse("h1").unwrap();
    let heading_count = doc.select(&heading_selector).count() as u32;
    let h1_count = doc.select(&h1_selector).count() as u32;

    // Images and alt coverage. An empty alt="" does not count as covered.
    let img_selector = Selector::parse("img").unwrap();
    let image_count = doc.select(&img_selector).count() as u32;
    let images_with_alt = doc
        .select(&img_selector)
        .filter(|e| {
            e.value()
                .attr("alt")
                .map(|a| !a.trim().is_empty())
                .unwrap_or(false)
        })
        .count() as u32;

    // JSON-LD structured data blocks
    let structured_data_selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let structured_data_block_count = doc.select(&structured_data_selector).count() as u32;

    // Anchors
    let link_selector = Selector::parse("a").unwrap();
    let link_count = doc.select(&link_selector).count() as u32;

    let signals = PageSignals {
        has_title: title_text.as_deref().map(|t| !t.is_empty()).unwrap_or(false),
        title_length: title_text.as_deref().map(|t| t.len()).unwrap_or(0),
        has_description,
        description_length,
        has_open_graph_title,
        has_lang_attribute,
        heading_count,
        h1_count,
        image_count,
        images_with_alt,
        structured_data_block_count,
        link_count,
    };

    ::log::debug!(
        "Extracted signals: {} headings, {} images ({} with alt), {} links",
        signals.heading_count,
        signals.image_count,
        signals.images_with_alt,
        signals.link_count
    );

    signals
}

/// Extracts the visible text of a page with tags stripped and whitespace
/// collapsed to single spaces.
pub fn visible_text(markup: &str) -> String {
    let doc = Html::parse_document(markup);

    let body_selector = Selector::parse("body").unwrap();
    doc.select(&body_selector)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
