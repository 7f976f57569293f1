// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Obento Feed
//!
//! Menu feed extraction for Japanese restaurant chain pages: scraped block
//! text in, priced menu entries with stable romanized ids out.
//!
//! ## Pipeline
//!
//! - **Width normalization**: half/full-width digits, ASCII and kana ([`text::width`])
//! - **Era dates**: `平成25年` to `2013` before date parsing ([`text::era`])
//! - **Transliteration**: kanji/kana/Latin to hiragana or Hepburn romaji ([`text::transliterate`])
//! - **Tokenizing**: names and prices, including shared `各` prices ([`menu::tokenizer`])
//! - **Entries**: ids, timestamps and images per item ([`menu::entry`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use obento_feed::config::MenuSource;
//! use obento_feed::fetch::CachedFetcher;
//! use obento_feed::pipeline::MenuPipeline;
//! use obento_feed::text::Transliterator;
//!
//! # fn main() -> obento_feed::Result<()> {
//! let transliterator = Transliterator::new()?;
//! let pipeline = MenuPipeline::new(&transliterator)?;
//! let fetcher = CachedFetcher::new()?;
//!
//! if let Some(feed) = pipeline.fetch_feed(&MenuSource::dondon(), &fetcher)? {
//!     println!("{}", pipeline.render(&feed)?);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Text processing core
pub mod menu;
pub mod text;

// Collaborators: fetching, HTML access, output model
pub mod document;
pub mod feed;
pub mod fetch;

// Orchestration
pub mod pipeline;

pub use config::{MenuSource, PipelineConfig, TokenizerConfig};
pub use error::{Error, Result};
pub use feed::{Entry, Feed};
pub use menu::{MenuItem, MenuTokenizer, RawBlock};
pub use pipeline::MenuPipeline;
pub use text::Transliterator;
