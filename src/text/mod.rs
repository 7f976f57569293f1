//! Japanese text handling: width normalization, era dates, transliteration.

pub mod era;
pub mod transliterate;
pub mod width;

pub use era::{convert_era_date, parse_updated};
#[cfg(feature = "ipadic")]
pub use transliterate::LinderaReadings;
pub use transliterate::{ReadingSource, Segment, StaticReadings, Transliterator};
pub use width::{normalize, to_fullwidth, to_halfwidth, Width, WidthOptions};
