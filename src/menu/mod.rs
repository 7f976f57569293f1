//! Menu extraction: block text to priced items to feed entries.

pub mod block;
pub mod entry;
pub mod tokenizer;

pub use block::RawBlock;
pub use entry::EntryBuilder;
pub use tokenizer::{MenuItem, MenuTokenizer, PriceToken};
