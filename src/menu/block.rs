//! Raw text blocks scraped from the menu page.

use reqwest::Url;

use crate::document::HtmlNode;

/// Text of one menu-category node and the image shown with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    text: String,
    image: Option<String>,
}

impl RawBlock {
    /// Block from already-extracted parts.
    pub fn new(text: impl Into<String>, image: Option<String>) -> Self {
        Self {
            text: text.into(),
            image,
        }
    }

    /// Read a block node: its text and its first `img`, resolved against `page_url`.
    pub fn from_node<N: HtmlNode>(node: &N, page_url: &str) -> Self {
        let image = node
            .select_one("img")
            .and_then(|img| img.attr("src"))
            .map(|src| resolve_url(page_url, &src));
        Self::new(node.text(), image)
    }

    /// Block text, unnormalized.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute image URL, if the block has an image.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Resolve `href` against `base`; unresolvable input is kept as written.
pub fn resolve_url(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::warn!("Cannot resolve '{}' against '{}': {}", href, base, e);
            href.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve_url("http://www.dondon.co.jp/menu/index.html", "img/don.jpg"),
            "http://www.dondon.co.jp/menu/img/don.jpg"
        );
        assert_eq!(
            resolve_url("http://www.dondon.co.jp/menu/index.html", "/img/don.jpg"),
            "http://www.dondon.co.jp/img/don.jpg"
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(
            resolve_url("http://a.example/menu/", "https://b.example/x.png"),
            "https://b.example/x.png"
        );
    }

    #[test]
    fn test_unparsable_base_keeps_href() {
        assert_eq!(resolve_url("not a url", "img/x.jpg"), "img/x.jpg");
    }

    #[test]
    fn test_from_node() {
        let doc = HtmlDocument::parse(
            r#"<div id="a">牛丼 480円<img src="a.jpg"><img src="b.jpg"></div><div id="b">豚丼 380円</div>"#,
        );
        let root = doc.root();
        let a = RawBlock::from_node(&root.select_one("#a").unwrap(), "http://example.com/menu/");
        assert_eq!(a.text(), "牛丼 480円");
        assert_eq!(a.image(), Some("http://example.com/menu/a.jpg"));

        let b = RawBlock::from_node(&root.select_one("#b").unwrap(), "http://example.com/menu/");
        assert!(b.image().is_none());
    }
}
