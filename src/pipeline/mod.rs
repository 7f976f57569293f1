//! Menu page to feed pipeline.
//!
//! ```text
//! page ─▶ [Fetcher] ─▶ HTML ─▶ [HtmlNode::select] ─▶ RawBlock[]
//!                        │                              │
//!                        ▼                              ▼
//!               update stamp (era dates)      [MenuTokenizer] ─▶ MenuItem[]
//!                        │                              │
//!                        └──────────▶ [EntryBuilder] ◀──┘ (Transliterator ids)
//!                                          │
//!                                          ▼
//!                                        Feed
//! ```
//!
//! The pipeline borrows the [`Transliterator`]; build that once and share it
//! between pipelines.

use chrono::NaiveDateTime;
use regex::Regex;

use crate::config::{MenuSource, PipelineConfig};
use crate::document::{HtmlDocument, HtmlNode};
use crate::error::Result;
use crate::feed::{Entry, Feed};
use crate::fetch::Fetcher;
use crate::menu::{EntryBuilder, MenuTokenizer, RawBlock};
use crate::text::era::parse_updated;
use crate::text::transliterate::Transliterator;

/// Orchestrates block extraction, tokenizing and entry building.
#[derive(Debug)]
pub struct MenuPipeline<'a> {
    config: PipelineConfig,
    tokenizer: MenuTokenizer,
    entries: EntryBuilder<'a>,
}

impl<'a> MenuPipeline<'a> {
    /// Pipeline with default configuration.
    pub fn new(transliterator: &'a Transliterator) -> Result<Self> {
        Self::with_config(transliterator, PipelineConfig::default())
    }

    /// Pipeline with custom configuration.
    pub fn with_config(transliterator: &'a Transliterator, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            tokenizer: MenuTokenizer::new(config.tokenizer.clone())?,
            entries: EntryBuilder::new(transliterator),
            config,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Entries for one block, in the order the block lists them.
    pub fn block_entries(
        &self,
        block: &RawBlock,
        base_id: &str,
        updated: NaiveDateTime,
    ) -> Result<Vec<Entry>> {
        let items = self.tokenizer.extract_items(block.text())?;
        Ok(self.entries.build(&items, base_id, updated, block.image()))
    }

    /// Feed for an already-parsed page.
    pub fn document_feed<N: HtmlNode>(&self, source: &MenuSource, root: &N) -> Result<Feed> {
        let pattern = Regex::new(&source.updated_pattern)?;
        let updated = parse_updated(&root.text(), &pattern, &source.updated_format)?;

        let mut entries = Vec::new();
        let blocks = root.select(&source.block_selector);
        for (index, node) in blocks.iter().enumerate() {
            let block = RawBlock::from_node(node, &source.url);
            let block_entries = self.block_entries(&block, &source.id, updated)?;
            if block_entries.is_empty() {
                log::debug!("Block {} has no priced items", index);
            }
            entries.extend(block_entries);
        }

        log::info!(
            "{}: {} entries from {} blocks (updated {})",
            source.id,
            entries.len(),
            blocks.len(),
            updated
        );
        Ok(Feed::new(&source.id, &source.name, updated, entries))
    }

    /// Feed for raw page HTML.
    pub fn page_feed(&self, source: &MenuSource, html: &str) -> Result<Feed> {
        let document = HtmlDocument::parse(html);
        self.document_feed(source, &document.root())
    }

    /// Fetch the source page and build its feed.
    ///
    /// `Ok(None)` when the page could not be fetched.
    pub fn fetch_feed<F: Fetcher + ?Sized>(&self, source: &MenuSource, fetcher: &F) -> Result<Option<Feed>> {
        let html = fetcher.fetch_text(
            &source.url,
            source.cache_path.as_deref(),
            source.encoding.as_deref(),
        );
        match html {
            Some(html) => self.page_feed(source, &html).map(Some),
            None => {
                log::warn!("{}: page unavailable, skipped", source.id);
                Ok(None)
            },
        }
    }

    /// Serialize a feed with the configured layout.
    pub fn render(&self, feed: &Feed) -> Result<String> {
        feed.to_json(self.config.pretty)
    }
}
