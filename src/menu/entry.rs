//! Turns attributed menu items into feed entries.

use chrono::NaiveDateTime;

use crate::feed::Entry;
use crate::menu::tokenizer::MenuItem;
use crate::text::transliterate::Transliterator;

/// Separator between the feed id and the romanized item name.
pub const ID_SEPARATOR: char = ':';

/// Builds entries, deriving ids from the romanized item names.
#[derive(Debug, Clone, Copy)]
pub struct EntryBuilder<'a> {
    transliterator: &'a Transliterator,
}

impl<'a> EntryBuilder<'a> {
    /// Builder over a shared transliterator.
    pub fn new(transliterator: &'a Transliterator) -> Self {
        Self { transliterator }
    }

    /// `<base_id>:<romaji without whitespace>`.
    ///
    /// Two items with the same reading get the same id; nothing here
    /// deduplicates them.
    pub fn entry_id(&self, base_id: &str, name: &str) -> String {
        let roman = self.transliterator.to_roman(name);
        format!("{}{}{}", base_id, ID_SEPARATOR, strip_whitespace(&roman))
    }

    /// One entry per item, in item order, all sharing `updated` and `image`.
    pub fn build(
        &self,
        items: &[MenuItem],
        base_id: &str,
        updated: NaiveDateTime,
        image: Option<&str>,
    ) -> Vec<Entry> {
        items
            .iter()
            .map(|item| Entry {
                id: self.entry_id(base_id, &item.name),
                title: item.name.clone(),
                updated,
                price: item.price,
                image: image.map(str::to_string),
            })
            .collect()
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::transliterate::StaticReadings;
    use chrono::NaiveDate;

    fn transliterator() -> Transliterator {
        Transliterator::with_readings(
            StaticReadings::new()
                .with_word("牛丼", "ぎゅうどん")
                .with_word("豚丼", "ぶたどん")
                .with_word("特盛", "とくもり"),
        )
    }

    fn updated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_build_entries() {
        let t = transliterator();
        let items = vec![MenuItem::new("牛丼", 480), MenuItem::new("豚丼", 480)];
        let entries = EntryBuilder::new(&t).build(&items, "dondon", updated(), Some("http://x/y.jpg"));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "dondon:gyuudon");
        assert_eq!(entries[0].title, "牛丼");
        assert_eq!(entries[1].id, "dondon:butadon");
        assert_eq!(entries[1].price, 480);
        assert!(entries.iter().all(|e| e.image.as_deref() == Some("http://x/y.jpg")));
    }

    #[test]
    fn test_whitespace_removed_from_id() {
        let t = transliterator();
        let id = EntryBuilder::new(&t).entry_id("dondon", "特盛 牛丼");
        assert_eq!(id, "dondon:tokumorigyuudon");
    }

    #[test]
    fn test_ids_are_deterministic() {
        let t = transliterator();
        let builder = EntryBuilder::new(&t);
        let items = vec![MenuItem::new("特盛 牛丼", 680), MenuItem::new("Aセット", 500)];
        let first = builder.build(&items, "dondon", updated(), None);
        let second = builder.build(&items, "dondon", updated(), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_ids_pass_through() {
        let t = transliterator();
        let items = vec![MenuItem::new("牛丼", 480), MenuItem::new("牛丼", 580)];
        let entries = EntryBuilder::new(&t).build(&items, "dondon", updated(), None);
        assert_eq!(entries[0].id, entries[1].id);
        assert_eq!(entries.len(), 2);
    }
}
