//! Feed document model and JSON output.
//!
//! Absent optional values are left out of the JSON rather than written as
//! `null`; timestamps are ISO-8601 strings.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::Result;

/// Format version embedded in every feed document.
pub const FEED_VERSION: &str = "obento-feed/1";

/// One menu item in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Stable identifier (`<feed id>:<romanized name>`)
    pub id: String,
    /// Item name as written on the page
    pub title: String,
    /// Page update time
    pub updated: NaiveDateTime,
    /// Price in yen
    pub price: u32,
    /// Image URL, or a local path once the image has been cached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Entry {
    /// Point the entry at a different image location.
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

/// A chain's menu as a feed of entries, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    /// Format version
    pub version: &'static str,
    /// Feed id
    pub id: String,
    /// Feed title (chain name)
    pub title: String,
    /// Page update time
    pub updated: NaiveDateTime,
    /// Entries in block encounter order
    pub entries: Vec<Entry>,
}

impl Feed {
    /// Create a feed.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        updated: NaiveDateTime,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            version: FEED_VERSION,
            id: id.into(),
            title: title.into(),
            updated,
            entries,
        }
    }

    /// Serialize to UTF-8 JSON; non-ASCII text is written as is.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn updated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 11, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn entry(image: Option<&str>) -> Entry {
        Entry {
            id: "dondon:gyuudon".to_string(),
            title: "牛丼".to_string(),
            updated: updated(),
            price: 480,
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn test_absent_image_is_omitted() {
        let json = serde_json::to_value(entry(None)).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["price"], 480);
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let json = serde_json::to_value(entry(Some("http://example.com/a.jpg"))).unwrap();
        assert_eq!(json["updated"], "2013-11-21T00:00:00");
        assert_eq!(json["image"], "http://example.com/a.jpg");
    }

    #[test]
    fn test_feed_json_keeps_japanese_and_version() {
        let feed = Feed::new("dondon", "どんどん", updated(), vec![entry(None)]);
        let json = feed.to_json(false).unwrap();
        assert!(json.contains("どんどん"));
        assert!(json.contains("牛丼"));
        assert!(json.contains(FEED_VERSION));
    }

    #[test]
    fn test_pretty_output() {
        let feed = Feed::new("dondon", "どんどん", updated(), Vec::new());
        assert!(feed.to_json(true).unwrap().contains('\n'));
        assert!(!feed.to_json(false).unwrap().contains('\n'));
    }

    #[test]
    fn test_image_rewrite() {
        let e = entry(Some("http://example.com/a.jpg")).with_image(Some("cache/a.jpg".to_string()));
        assert_eq!(e.image.as_deref(), Some("cache/a.jpg"));
    }
}
