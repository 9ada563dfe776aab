//! RSS feed extraction.
//!
//! The upstream document is walked with `quick-xml`'s pull reader rather than
//! deserialized as a whole, so one broken item cannot discard the items read
//! before it. [`FeedItems`] yields one [`FeedItem`] per `<item>` block;
//! [`parse_articles`] normalizes them and applies the result cap.
//!
//! # Field rules
//!
//! - The first non-empty `title`, `link`, `pubDate` and `description` in a
//!   block win.
//! - Text, CDATA and entity references inside a field are concatenated;
//!   markup nested in a field contributes only its text.
//! - A malformed document ends extraction; items completed so far are kept.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::{debug, instrument, warn};

use crate::config::NewsConfig;
use crate::models::{FeedItem, NewsArticle};
use crate::normalize::normalize_item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
    Description,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            b"description" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Fields collected so far for the open `<item>`.
#[derive(Debug, Default)]
struct ItemDraft {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    description: Option<String>,
    media_url: Option<String>,
}

impl ItemDraft {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::PubDate => &mut self.pub_date,
            Field::Description => &mut self.description,
        }
    }

    /// Record a field value unless an earlier element already supplied a
    /// non-empty one. Empty elements such as `<title/>` never block a later value.
    fn offer(&mut self, field: Field, value: &str) {
        let slot = self.slot(field);
        if slot.as_deref().is_none_or(str::is_empty) {
            *slot = Some(value.trim().to_string());
        }
    }

    fn finish(self) -> FeedItem {
        FeedItem {
            title: self.title.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            pub_date: self.pub_date.unwrap_or_default(),
            description: self.description,
            media_url: self.media_url,
        }
    }
}

/// Lazy iterator over the `<item>` blocks of an RSS document, in document order.
pub struct FeedItems<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

impl<'a> FeedItems<'a> {
    pub fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
            done: false,
        }
    }
}

impl Iterator for FeedItems<'_> {
    type Item = FeedItem;

    fn next(&mut self) -> Option<FeedItem> {
        if self.done {
            return None;
        }

        let mut draft: Option<ItemDraft> = None;
        // open field and its accumulated text
        let mut field: Option<(Field, String)> = None;
        // elements opened inside the open field
        let mut field_depth = 0usize;
        // <item> elements opened inside the open item
        let mut nested_items = 0usize;

        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    warn!(
                        position = self.reader.buffer_position(),
                        error = %e,
                        "Malformed feed; keeping items read so far"
                    );
                    self.done = true;
                    return None;
                }
            };

            match event {
                Event::Start(e) => {
                    let Some(current) = draft.as_mut() else {
                        if e.name().as_ref() == b"item" {
                            draft = Some(ItemDraft::default());
                        }
                        continue;
                    };
                    if field.is_some() {
                        field_depth += 1;
                        continue;
                    }
                    let name = e.name();
                    if name.as_ref() == b"item" {
                        nested_items += 1;
                    } else if let Some(f) = Field::from_tag(name.as_ref()) {
                        field = Some((f, String::new()));
                        field_depth = 0;
                    } else if current.media_url.is_none() {
                        current.media_url = media_url(&e);
                    }
                }
                Event::Empty(e) => {
                    let Some(current) = draft.as_mut() else {
                        continue;
                    };
                    if field.is_some() {
                        continue;
                    }
                    if let Some(f) = Field::from_tag(e.name().as_ref()) {
                        current.offer(f, "");
                    } else if current.media_url.is_none() {
                        current.media_url = media_url(&e);
                    }
                }
                Event::Text(e) => {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&e.decode().unwrap_or_default());
                    }
                }
                Event::CData(e) => {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&e.decode().unwrap_or_default());
                    }
                }
                Event::GeneralRef(e) => {
                    if let Some((_, buf)) = field.as_mut() {
                        push_reference(buf, &e);
                    }
                }
                Event::End(e) => {
                    let Some(current) = draft.as_mut() else {
                        continue;
                    };
                    if field.is_some() {
                        if field_depth > 0 {
                            field_depth -= 1;
                        } else if let Some((f, buf)) = field.take() {
                            current.offer(f, &buf);
                        }
                        continue;
                    }
                    if e.name().as_ref() == b"item" {
                        if nested_items > 0 {
                            nested_items -= 1;
                        } else if let Some(finished) = draft.take() {
                            return Some(finished.finish());
                        }
                    }
                }
                Event::Eof => {
                    if draft.is_some() {
                        debug!("Feed ended inside an unclosed item");
                    }
                    self.done = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

/// Append the text an entity or character reference stands for.
///
/// Unknown named entities are kept verbatim.
fn push_reference(buf: &mut String, reference: &BytesRef<'_>) {
    if let Ok(Some(ch)) = reference.resolve_char_ref() {
        buf.push(ch);
        return;
    }
    let name = reference.decode().unwrap_or_default();
    match resolve_predefined_entity(&name) {
        Some(text) => buf.push_str(text),
        None => {
            buf.push('&');
            buf.push_str(&name);
            buf.push(';');
        }
    }
}

/// Image URL carried by a `<media:content>`, `<media:thumbnail>` or image
/// `<enclosure>` element.
fn media_url(e: &BytesStart<'_>) -> Option<String> {
    let is_image = match e.name().as_ref() {
        b"media:content" => attribute(e, "medium").is_none_or(|m| m == "image"),
        b"media:thumbnail" => true,
        b"enclosure" => attribute(e, "type").is_some_and(|t| t.starts_with("image/")),
        _ => false,
    };
    if !is_image {
        return None;
    }
    attribute(e, "url").filter(|url| !url.is_empty())
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    let attr = e.try_get_attribute(key).ok()??;
    let raw = String::from_utf8_lossy(&attr.value);
    let value = match unescape(&raw) {
        Ok(value) => value.into_owned(),
        Err(_) => raw.to_string(),
    };
    Some(value.trim().to_string())
}

/// Extract and normalize up to `config.max_articles` articles from a feed body.
///
/// Items failing normalization (empty title or link) are skipped and do not
/// count toward the cap. Blocks after the cap is reached are never read.
#[instrument(level = "debug", skip_all, fields(bytes = xml.len()))]
pub fn parse_articles(xml: &str, config: &NewsConfig) -> Vec<NewsArticle> {
    let articles: Vec<NewsArticle> = FeedItems::new(xml)
        .filter_map(|item| normalize_item(&item, config))
        .take(config.max_articles)
        .collect();
    debug!(count = articles.len(), "Extracted articles from feed");
    articles
}
