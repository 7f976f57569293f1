//! Japanese era (gengō) date conversion.
//!
//! Menu pages stamp their last update either with a Gregorian year
//! (`2025年11月21日`) or with an era year (`平成25年11月21日`). Era years are
//! rewritten to Gregorian digits first, then the whole string goes through
//! chrono's strftime-style parser.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::text::width::{normalize, Width, WidthOptions};

lazy_static! {
    /// Two non-space characters, optional whitespace, then a digit run
    static ref RE_ERA_YEAR: Regex = Regex::new(r"(\S\S)\s*(\d+)").unwrap();
}

/// Era names and the Gregorian year preceding each era's year 1.
const ERAS: &[(&str, i64)] = &[("昭和", 1925), ("平成", 1988), ("令和", 2018)];

/// Gregorian year for `era_year` of the named era, if the era is known.
///
/// Year 0 is plain arithmetic (`平成0` is 1988); the `元年` spelling is not
/// recognized.
pub fn gregorian_year(era: &str, era_year: i64) -> Option<i64> {
    ERAS.iter()
        .find(|(name, _)| *name == era)
        .map(|(_, base)| base + era_year)
}

/// Replace every `<era><year>` span in `text` with its Gregorian year.
///
/// Spans whose two leading characters are not an era name are left exactly as
/// they were, so Gregorian dates pass through unchanged. Full-width era years
/// (`平成２５`) are read like narrow ones.
pub fn substitute_eras(text: &str) -> String {
    let narrow_digits = WidthOptions::new().with_digit(Width::Half);
    RE_ERA_YEAR
        .replace_all(text, |caps: &regex::Captures| {
            let year = normalize(&caps[2], &narrow_digits).parse::<i64>().ok();
            match year.and_then(|y| gregorian_year(&caps[1], y)) {
                Some(gregorian) => gregorian.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Parse an era-or-Gregorian date string with a strftime-style `format`.
///
/// Formats without time fields resolve to midnight.
///
/// # Examples
///
/// ```
/// use obento_feed::text::era::convert_era_date;
///
/// let date = convert_era_date("最終更新日平成25年11月21日", "最終更新日%Y年%m月%d日").unwrap();
/// assert_eq!(date.format("%Y-%m-%d").to_string(), "2013-11-21");
/// ```
pub fn convert_era_date(text: &str, format: &str) -> Result<NaiveDateTime> {
    let substituted = substitute_eras(text);

    match NaiveDateTime::parse_from_str(&substituted, format) {
        Ok(datetime) => Ok(datetime),
        Err(_) => NaiveDate::parse_from_str(&substituted, format)
            .map(|date| date.and_time(chrono::NaiveTime::MIN))
            .map_err(|source| Error::DateParse {
                input: substituted,
                format: format.to_string(),
                source,
            }),
    }
}

/// Find the page's update stamp with `pattern` and convert it with `format`.
///
/// `pattern` must contain a capture group around the date text; the first
/// match wins.
pub fn parse_updated(page_text: &str, pattern: &Regex, format: &str) -> Result<NaiveDateTime> {
    let stamp = pattern
        .captures(page_text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| Error::UpdatedNotFound(pattern.as_str().to_string()))?;
    log::debug!("Update stamp: {}", stamp.as_str());
    convert_era_date(stamp.as_str(), format)
}
