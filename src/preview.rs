//! Link-preview metadata for unfurled share links.

use crate::models::ListPayload;
use serde::{Deserialize, Serialize};

/// Marker appended when a summary leaves items out.
pub const ELLIPSIS: &str = "...";

/// Settings for preview rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    /// How many items a text summary shows.
    pub max_items: usize,
    /// Provider name reported in oEmbed documents.
    pub provider_name: String,
    /// Provider URL reported in oEmbed documents.
    pub provider_url: String,
    /// Embed width in pixels.
    pub width: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_items: 5,
            provider_name: "List Jiggler".to_string(),
            provider_url: "https://listjiggler.com".to_string(),
            width: 400,
        }
    }
}

/// Title and description shown when a link is unfurled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    pub title: String,
    pub description: String,
}

/// An oEmbed "rich" response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OEmbed {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub title: String,
    pub provider_name: String,
    pub provider_url: String,
    pub width: u32,
    pub height: u32,
    pub html: String,
}

/// Numbered summary of the first `max_items` items, followed by
/// [`ELLIPSIS`] on its own line when more remain.
pub fn summarize(payload: &ListPayload, max_items: usize) -> String {
    let mut lines: Vec<String> = payload
        .items
        .iter()
        .take(max_items)
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect();

    if payload.items.len() > max_items {
        lines.push(ELLIPSIS.to_string());
    }

    lines.join("\n")
}

/// Preview metadata for a decoded list.
pub fn link_preview(payload: &ListPayload, settings: &PreviewSettings) -> LinkPreview {
    LinkPreview {
        title: payload.title.clone(),
        description: summarize(payload, settings.max_items),
    }
}

/// Build an oEmbed document rendering the whole list as an ordered list.
pub fn oembed(payload: &ListPayload, settings: &PreviewSettings) -> OEmbed {
    let items: String = payload
        .items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();

    let html = format!(
        "<div class=\"list-jiggler\"><h3>{}</h3><ol>{}</ol></div>",
        escape_html(&payload.title),
        items
    );

    OEmbed {
        kind: "rich".to_string(),
        version: "1.0".to_string(),
        title: payload.title.clone(),
        provider_name: settings.provider_name.clone(),
        provider_url: settings.provider_url.clone(),
        width: settings.width,
        height: embed_height(payload.items.len()),
        html,
    }
}

/// Header allowance plus one row per item.
fn embed_height(item_count: usize) -> u32 {
    let rows = u32::try_from(item_count).unwrap_or(u32::MAX);
    rows.saturating_mul(24).saturating_add(60)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> ListPayload {
        ListPayload::new("Numbers", (1..=n).map(|i| format!("item {i}")).collect())
    }

    #[test]
    fn test_summary_short_list() {
        assert_eq!(summarize(&list(2), 5), "1. item 1\n2. item 2");
    }

    #[test]
    fn test_summary_exactly_limit_has_no_ellipsis() {
        let summary = summarize(&list(5), 5);
        assert_eq!(summary.lines().count(), 5);
        assert!(!summary.contains(ELLIPSIS));
    }

    #[test]
    fn test_summary_truncates_with_ellipsis() {
        let summary = summarize(&list(7), 5);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "5. item 5");
        assert_eq!(lines[5], "...");
    }

    #[test]
    fn test_summary_empty_list() {
        assert_eq!(summarize(&list(0), 5), "");
    }

    #[test]
    fn test_link_preview() {
        let preview = link_preview(&list(3), &PreviewSettings::default());
        assert_eq!(preview.title, "Numbers");
        assert!(preview.description.starts_with("1. item 1"));
    }

    #[test]
    fn test_oembed_document() {
        let payload = ListPayload::new("<Best> & worst", vec!["a<b".into(), "c".into()]);
        let doc = oembed(&payload, &PreviewSettings::default());

        assert_eq!(doc.kind, "rich");
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.width, 400);
        assert_eq!(doc.height, 60 + 2 * 24);
        assert!(doc.html.contains("<h3>&lt;Best&gt; &amp; worst</h3>"));
        assert!(doc.html.contains("<li>a&lt;b</li><li>c</li>"));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "rich");
        assert_eq!(json["provider_name"], "List Jiggler");
    }
}
