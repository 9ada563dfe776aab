//! Normalization of raw feed items into [`NewsArticle`]s.
//!
//! Google News titles carry the publisher as a trailing `" - Source"`
//! segment and descriptions are small HTML fragments. This module splits the
//! former and flattens the latter to plain text.

use itertools::Itertools;
use scraper::{Html, Selector};

use crate::config::NewsConfig;
use crate::models::{FeedItem, NewsArticle};
use crate::utils::truncate_chars;

const SOURCE_DELIMITER: &str = " - ";

/// Split a `"Title - Source"` string into `(title, source)`.
///
/// The last segment is the source; the remaining segments are rejoined with
/// the delimiter so titles that contain `" - "` themselves survive intact.
/// Without a delimiter, or with an empty trailing segment, the source is
/// `fallback`.
///
/// ```ignore
/// assert_eq!(split_title("Foo Bar - Times of India", "Google News"),
///            ("Foo Bar".to_string(), "Times of India".to_string()));
/// ```
pub fn split_title(raw: &str, fallback: &str) -> (String, String) {
    if !raw.contains(SOURCE_DELIMITER) {
        return (raw.trim().to_string(), fallback.to_string());
    }

    let mut parts: Vec<&str> = raw.split(SOURCE_DELIMITER).collect();
    let source = parts.pop().unwrap_or_default().trim();
    let title = parts.iter().join(SOURCE_DELIMITER).trim().to_string();
    let source = if source.is_empty() { fallback } else { source };
    (title, source.to_string())
}

/// Remove all markup from an HTML fragment, decode entities and trim.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

/// `src` of the first `<img>` in an HTML fragment.
pub fn first_image_src(html: &str) -> Option<String> {
    let selector = Selector::parse("img[src]").ok()?;
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}

/// Turn a raw feed item into an article.
///
/// Returns `None` when the cleaned title or the link is empty; such items are
/// never shown.
pub fn normalize_item(item: &FeedItem, config: &NewsConfig) -> Option<NewsArticle> {
    let (title, source) = split_title(&item.title, &config.fallback_source);
    let link = item.link.trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let description = item
        .description
        .as_deref()
        .map(strip_markup)
        .map(|text| truncate_chars(&text, config.description_max_chars))
        .filter(|text| !text.is_empty());

    let image = item
        .description
        .as_deref()
        .and_then(first_image_src)
        .or_else(|| item.media_url.clone());

    Some(NewsArticle {
        title,
        link: link.to_string(),
        publicationDate: item.pub_date.trim().to_string(),
        source,
        description,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: link.to_string(),
            pub_date: "Tue, 07 May 2025 08:00:00 GMT".to_string(),
            ..FeedItem::default()
        }
    }

    #[test]
    fn test_split_title_with_source() {
        let (title, source) = split_title("Foo Bar - Times of India", "Google News");
        assert_eq!(title, "Foo Bar");
        assert_eq!(source, "Times of India");
    }

    #[test]
    fn test_split_title_without_delimiter() {
        let (title, source) = split_title("Foo Bar", "Google News");
        assert_eq!(title, "Foo Bar");
        assert_eq!(source, "Google News");
    }

    #[test]
    fn test_split_title_keeps_inner_delimiters() {
        let (title, source) = split_title("Goa - A Beach Wedding - Story - Herald", "Google News");
        assert_eq!(title, "Goa - A Beach Wedding - Story");
        assert_eq!(source, "Herald");
    }

    #[test]
    fn test_split_title_hyphenated_word_is_not_a_delimiter() {
        let (title, source) = split_title("Sun-kissed vows in Goa", "Google News");
        assert_eq!(title, "Sun-kissed vows in Goa");
        assert_eq!(source, "Google News");
    }

    #[test]
    fn test_split_title_empty_source_falls_back() {
        let (title, source) = split_title("Foo Bar - ", "Google News");
        assert_eq!(title, "Foo Bar");
        assert_eq!(source, "Google News");
    }

    #[test]
    fn test_strip_markup() {
        let html = r##"<a href="https://x.test">Golden Hour</a>&nbsp;<font color="#6f6f6f">Herald</font> "##;
        assert_eq!(strip_markup(html), "Golden Hour\u{a0}Herald");
        assert_eq!(strip_markup("  plain text  "), "plain text");
        assert_eq!(strip_markup("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_first_image_src() {
        let html = r#"<p>hi</p><img alt="x"><img src="https://cdn.test/a.jpg"><img src="https://cdn.test/b.jpg">"#;
        assert_eq!(first_image_src(html), Some("https://cdn.test/a.jpg".to_string()));
        assert_eq!(first_image_src("<p>no image</p>"), None);
    }

    #[test]
    fn test_normalize_requires_title_and_link() {
        let config = NewsConfig::default();
        assert!(normalize_item(&item("", "https://x.test"), &config).is_none());
        assert!(normalize_item(&item("Title - Src", ""), &config).is_none());
        assert!(normalize_item(&item(" - Src", "https://x.test"), &config).is_none());
        assert!(normalize_item(&item("Title - Src", "https://x.test"), &config).is_some());
    }

    #[test]
    fn test_normalize_truncates_description() {
        let config = NewsConfig::default();
        let mut raw = item("Title - Src", "https://x.test");
        raw.description = Some(format!("<p>{}</p>", "w".repeat(450)));
        let article = normalize_item(&raw, &config).unwrap();
        assert_eq!(article.description.unwrap().chars().count(), 200);
    }

    #[test]
    fn test_normalize_description_absent_or_blank() {
        let config = NewsConfig::default();
        let raw = item("Title - Src", "https://x.test");
        assert_eq!(normalize_item(&raw, &config).unwrap().description, None);

        let mut blank = raw.clone();
        blank.description = Some("<br/>   ".to_string());
        assert_eq!(normalize_item(&blank, &config).unwrap().description, None);
    }

    #[test]
    fn test_normalize_image_prefers_description_then_media() {
        let config = NewsConfig::default();
        let mut raw = item("Title - Src", "https://x.test");
        raw.media_url = Some("https://cdn.test/media.jpg".to_string());
        assert_eq!(
            normalize_item(&raw, &config).unwrap().image.as_deref(),
            Some("https://cdn.test/media.jpg")
        );

        raw.description = Some(r#"<img src="https://cdn.test/inline.jpg">text"#.to_string());
        assert_eq!(
            normalize_item(&raw, &config).unwrap().image.as_deref(),
            Some("https://cdn.test/inline.jpg")
        );
    }

    #[test]
    fn test_normalize_uses_configured_fallback() {
        let config = NewsConfig {
            fallback_source: "Press".to_string(),
            ..NewsConfig::default()
        };
        let article = normalize_item(&item("No delimiter here", "https://x.test"), &config).unwrap();
        assert_eq!(article.source, "Press");
        assert_eq!(article.title, "No delimiter here");
        assert_eq!(article.publicationDate, "Tue, 07 May 2025 08:00:00 GMT");
    }
}
