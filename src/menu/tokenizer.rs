//! Menu block tokenizer and price attribution.
//!
//! Block text on the menu page is a loose run of names and prices:
//!
//! ```text
//! 特盛 580円                 one name, one price
//! 牛丼 豚丼 各 480円         "各" (each): every name before it costs 480円
//! 丼 並 380円 大盛 480円     leading words prefix every ungrouped name
//! ```
//!
//! Tokens are classified by shape only: the group marker, anything ending
//! in the currency suffix (a price), and everything else (a name).

use regex::Regex;

use crate::config::TokenizerConfig;
use crate::error::{Error, Result};
use crate::text::width::{normalize, WidthOptions};

/// A menu item with its price attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Item name as written on the page
    pub name: String,
    /// Price in yen
    pub price: u32,
}

impl MenuItem {
    /// Create a menu item.
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A name paired with its still-unparsed price token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceToken {
    name: String,
    price: String,
}

impl PriceToken {
    fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw price token, suffix included.
    pub fn price(&self) -> &str {
        &self.price
    }
}

/// Splits block text into tokens and attributes prices to names.
#[derive(Debug, Clone)]
pub struct MenuTokenizer {
    config: TokenizerConfig,
    /// Whitespace directly before the currency suffix
    re_space_before_suffix: Regex,
    /// Group marker glued to a following digit
    re_group_before_digit: Regex,
}

impl MenuTokenizer {
    /// Tokenizer for the given markers.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let suffix = regex::escape(&config.currency_suffix.to_string());
        let group = regex::escape(&config.group_marker);
        Ok(Self {
            re_space_before_suffix: Regex::new(&format!(r"\s+{}", suffix))?,
            re_group_before_digit: Regex::new(&format!(r"{}(\d)", group))?,
            config,
        })
    }

    /// Markers in use.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Normalize raw block text and split it into tokens.
    ///
    /// Digits and ASCII are narrowed first, so full-width prices and a
    /// full-width `ｎｅｗ！` marker are handled like their narrow forms.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = normalize(text, &WidthOptions::CLEANUP);
        let text = if self.config.new_marker.is_empty() {
            text
        } else {
            text.replace(&self.config.new_marker, "")
        };
        let suffix = self.config.currency_suffix.to_string();
        let text = self
            .re_space_before_suffix
            .replace_all(&text, regex::NoExpand(&suffix));
        let spaced = format!("{} ${{1}}", self.config.group_marker.replace('$', "$$"));
        let text = self.re_group_before_digit.replace_all(&text, spaced.as_str());

        text.split_whitespace().map(str::to_string).collect()
    }

    /// Attribute price tokens to names in a single left-to-right pass.
    ///
    /// A price with no token before it names nothing and is dropped; the
    /// prefix is still fixed (empty) at that point.
    ///
    /// On the group marker every token before it is collected as a name.
    /// Names already collected are added again on each later marker, and
    /// the collection is never cleared after a price; both reproduce the
    /// page-specific behavior this was built against and are kept as is.
    pub fn attribute(&self, tokens: &[String]) -> Vec<PriceToken> {
        let mut attributed = Vec::new();
        let mut collected: Vec<&str> = Vec::new();
        let mut prefix: Option<String> = None;

        for (i, token) in tokens.iter().enumerate() {
            if *token == self.config.group_marker {
                collected.extend(tokens[..i].iter().map(String::as_str));
            } else if token.ends_with(self.config.currency_suffix) {
                if !collected.is_empty() {
                    attributed.extend(collected.iter().map(|name| PriceToken::new(*name, token)));
                } else {
                    let prefix = prefix.get_or_insert_with(|| tokens[..i.saturating_sub(1)].join(" "));
                    if i == 0 {
                        log::debug!("Price '{}' has no name before it, skipped", token);
                        continue;
                    }
                    let name = format!("{} {}", prefix, tokens[i - 1]);
                    attributed.push(PriceToken::new(name.trim(), token));
                }
            }
        }

        attributed
    }

    /// Parse a price token such as `480円` or `税込480円`.
    pub fn parse_price(&self, token: &str) -> Result<u32> {
        parse_price(token, self.config.currency_suffix)
    }

    /// Full block extraction: tokenize, attribute, parse prices.
    ///
    /// Text without price tokens yields no items. A price token without
    /// digits is an error.
    pub fn extract_items(&self, text: &str) -> Result<Vec<MenuItem>> {
        let tokens = self.tokenize(text);
        let items = self
            .attribute(&tokens)
            .into_iter()
            .map(|pt| Ok(MenuItem::new(pt.name, self.parse_price(&pt.price)?)))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("{} tokens, {} items", tokens.len(), items.len());
        Ok(items)
    }
}

/// Drop leading non-digits and the trailing `suffix`, then parse the digits.
///
/// Thousands separators are allowed (`1,280円`); any other non-digit after
/// the first digit makes the token invalid.
pub fn parse_price(token: &str, suffix: char) -> Result<u32> {
    let invalid = || Error::InvalidPrice(token.to_string());
    let body = token.strip_suffix(suffix).unwrap_or(token);
    let digits: String = body
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .filter(|&c| c != THOUSANDS_SEPARATOR)
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse().map_err(|_| invalid())
}

/// Digit grouping mark in prices, after width normalization.
const THOUSANDS_SEPARATOR: char = ',';
