//! Configuration for menu extraction.
//!
//! Everything here is a plain value with sensible defaults; there is no
//! config file. [`MenuSource::dondon`] carries the constants for the one
//! page layout the tokenizer is tuned to.

use std::path::PathBuf;

/// Marker strings recognized by the menu tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Literal stripped from block text before tokenizing (`new!`)
    pub new_marker: String,
    /// Suffix that makes a token a price (`円`)
    pub currency_suffix: char,
    /// Token meaning "each": the preceding names share the next price (`各`)
    pub group_marker: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            new_marker: "new!".to_string(),
            currency_suffix: '円',
            group_marker: "各".to_string(),
        }
    }

    /// Set the stripped "new" marker.
    pub fn with_new_marker(mut self, marker: impl Into<String>) -> Self {
        self.new_marker = marker.into();
        self
    }

    /// Set the currency suffix.
    pub fn with_currency_suffix(mut self, suffix: char) -> Self {
        self.currency_suffix = suffix;
        self
    }

    /// Set the shared-price marker.
    pub fn with_group_marker(mut self, marker: impl Into<String>) -> Self {
        self.group_marker = marker.into();
        self
    }
}

/// One restaurant chain's menu page and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSource {
    /// Feed id, also the prefix of every entry id
    pub id: String,
    /// Feed title
    pub name: String,
    /// Page URL (`http(s):` or `file:`)
    pub url: String,
    /// Where the fetched page is cached; `None` disables caching
    pub cache_path: Option<PathBuf>,
    /// Page encoding label (`shift_jis`, `euc-jp`, ...); UTF-8 when `None`
    pub encoding: Option<String>,
    /// CSS selector of the per-category block nodes
    pub block_selector: String,
    /// Regex with one capture group around the page's update stamp
    pub updated_pattern: String,
    /// strftime-style format of the captured stamp
    pub updated_format: String,
}

impl MenuSource {
    /// Source with default selector and stamp settings.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            cache_path: None,
            encoding: None,
            block_selector: "td > div".to_string(),
            updated_pattern: r"(\d{4}\.\d{2}\.\d{2})更新".to_string(),
            updated_format: "%Y.%m.%d".to_string(),
        }
    }

    /// どんどん (dondon.co.jp) menu page.
    pub fn dondon() -> Self {
        Self::new("dondon", "どんどん", "http://www.dondon.co.jp/menu/index.html")
            .with_cache_path("cache/dondon_menu.html")
            .with_encoding("shift_jis")
    }

    /// Read the page from somewhere else (e.g. a `file:` copy).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Cache the fetched page at `path`.
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Disable caching.
    pub fn without_cache(mut self) -> Self {
        self.cache_path = None;
        self
    }

    /// Decode the page with the given encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Select block nodes with `selector`.
    pub fn with_block_selector(mut self, selector: impl Into<String>) -> Self {
        self.block_selector = selector.into();
        self
    }

    /// Locate the update stamp with `pattern` and parse it with `format`.
    pub fn with_updated(mut self, pattern: impl Into<String>, format: impl Into<String>) -> Self {
        self.updated_pattern = pattern.into();
        self.updated_format = format.into();
        self
    }
}

/// Pipeline-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Tokenizer markers
    pub tokenizer: TokenizerConfig,
    /// Emit indented JSON
    pub pretty: bool,
}

impl PipelineConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tokenizer markers.
    pub fn with_tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Emit indented JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_defaults() {
        let config = TokenizerConfig::default();
        assert_eq!(config.new_marker, "new!");
        assert_eq!(config.currency_suffix, '円');
        assert_eq!(config.group_marker, "各");
    }

    #[test]
    fn test_dondon_preset() {
        let source = MenuSource::dondon();
        assert_eq!(source.id, "dondon");
        assert_eq!(source.encoding.as_deref(), Some("shift_jis"));
        assert_eq!(source.cache_path, Some(PathBuf::from("cache/dondon_menu.html")));
        assert_eq!(source.block_selector, "td > div");
    }

    #[test]
    fn test_source_builders() {
        let source = MenuSource::dondon()
            .with_url("file:./sample/menu.html")
            .without_cache()
            .with_updated(r"(\d+)", "%Y");
        assert_eq!(source.url, "file:./sample/menu.html");
        assert!(source.cache_path.is_none());
        assert_eq!(source.updated_format, "%Y");
    }
}
