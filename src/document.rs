//! Narrow view of an HTML document tree.
//!
//! The pipeline only ever selects nodes, reads their text and reads one
//! attribute. [`HtmlNode`] captures exactly that, so any HTML library can
//! back it; [`ScraperNode`] is the `scraper`-based implementation.

use scraper::{ElementRef, Html, Selector};

/// Capabilities the pipeline needs from a document node.
pub trait HtmlNode: Sized {
    /// All descendants matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<Self>;

    /// First descendant matching `selector`.
    fn select_one(&self, selector: &str) -> Option<Self> {
        self.select(selector).into_iter().next()
    }

    /// Concatenated text of the node and its descendants.
    fn text(&self) -> String;

    /// Attribute value, if present.
    fn attr(&self, name: &str) -> Option<String>;
}

/// A parsed HTML page.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a whole document; malformed markup is repaired, never rejected.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The root element.
    pub fn root(&self) -> ScraperNode<'_> {
        ScraperNode(self.html.root_element())
    }
}

/// [`HtmlNode`] over a `scraper` element.
#[derive(Debug, Clone, Copy)]
pub struct ScraperNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode for ScraperNode<'a> {
    fn select(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(selector) => self.0.select(&selector).map(ScraperNode).collect(),
            Err(e) => {
                log::warn!("Invalid selector '{}': {:?}", selector, e);
                Vec::new()
            },
        }
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><table><tr>
        <td><div>牛丼 豚丼 各 480円<img src="img/don.jpg"></div></td>
        <td><div>特盛 <b>580円</b></div></td>
    </tr></table></body></html>"#;

    #[test]
    fn test_select_blocks() {
        let doc = HtmlDocument::parse(PAGE);
        let blocks = doc.root().select("td > div");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text(), "特盛 580円");
    }

    #[test]
    fn test_select_one_and_attr() {
        let doc = HtmlDocument::parse(PAGE);
        let blocks = doc.root().select("td > div");
        let img = blocks[0].select_one("img").unwrap();
        assert_eq!(img.attr("src").as_deref(), Some("img/don.jpg"));
        assert!(img.attr("alt").is_none());
        assert!(blocks[1].select_one("img").is_none());
    }

    #[test]
    fn test_invalid_selector_selects_nothing() {
        let doc = HtmlDocument::parse(PAGE);
        assert!(doc.root().select("td >>> [").is_empty());
    }
}
