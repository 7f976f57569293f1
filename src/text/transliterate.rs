//! Phonetic transliteration of mixed kanji/kana/Latin text.
//!
//! Menu item names become identifiers through their reading, so the same name
//! must always produce the same output. The pipeline is:
//!
//! ```text
//! text ─▶ width::READING ─▶ ReadingSource (kanji → kana) ─▶ katakana → hiragana
//!                                                             │
//!                         to_hiragana ◀── letter names ◀──────┤
//!                         to_roman    ◀── Hepburn table ◀─────┘
//! ```
//!
//! Kanji readings need a dictionary, which is the only expensive part. It is
//! held by the [`Transliterator`] value: build it once and share it by
//! reference. It is never mutated after construction.

use std::collections::BTreeMap;

use phf::phf_map;

use crate::error::Result;
use crate::text::width::{normalize, WidthOptions};

/// One piece of segmented text with its kana reading, if the source knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text as it appears in the input
    pub surface: String,
    /// Reading in katakana or hiragana
    pub reading: Option<String>,
}

impl Segment {
    /// Segment without a reading.
    pub fn plain(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            reading: None,
        }
    }
}

/// Source of kanji readings.
///
/// Implementations must be total: text they cannot read comes back as plain
/// segments so the caller can pass it through.
pub trait ReadingSource: Send + Sync {
    /// Split `text` into segments covering it completely and in order.
    fn segment(&self, text: &str) -> Vec<Segment>;

    /// Name of the backend, for logging.
    fn name(&self) -> &'static str;
}

/// Word-to-reading table with longest-match lookup.
///
/// Useful for pinning readings of shop-specific words, and as a
/// dictionary-free backend.
#[derive(Debug, Clone, Default)]
pub struct StaticReadings {
    words: BTreeMap<String, String>,
    longest: usize,
}

impl StaticReadings {
    /// Empty table: every character passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word and its reading.
    pub fn with_word(mut self, word: impl Into<String>, reading: impl Into<String>) -> Self {
        let word = word.into();
        self.longest = self.longest.max(word.chars().count());
        self.words.insert(word, reading.into());
        self
    }
}

impl FromIterator<(String, String)> for StaticReadings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (word, reading)| table.with_word(word, reading))
    }
}

impl ReadingSource for StaticReadings {
    fn segment(&self, text: &str) -> Vec<Segment> {
        let chars: Vec<char> = text.chars().collect();
        let mut segments = Vec::new();
        let mut pending = String::new();
        let mut i = 0;

        'outer: while i < chars.len() {
            let max = self.longest.min(chars.len() - i);
            for len in (1..=max).rev() {
                let candidate: String = chars[i..i + len].iter().collect();
                if let Some(reading) = self.words.get(&candidate) {
                    if !pending.is_empty() {
                        segments.push(Segment::plain(std::mem::take(&mut pending)));
                    }
                    segments.push(Segment {
                        surface: candidate,
                        reading: Some(reading.clone()),
                    });
                    i += len;
                    continue 'outer;
                }
            }
            pending.push(chars[i]);
            i += 1;
        }

        if !pending.is_empty() {
            segments.push(Segment::plain(pending));
        }
        segments
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(feature = "ipadic")]
pub use self::lindera_readings::LinderaReadings;

#[cfg(feature = "ipadic")]
mod lindera_readings {
    use std::borrow::Cow;

    use lindera::dictionary::load_dictionary;
    use lindera::mode::Mode;
    use lindera::segmenter::Segmenter;

    use super::{ReadingSource, Segment};
    use crate::error::{Error, Result};

    /// IPADIC column holding the katakana reading.
    const READING_DETAIL: usize = 7;

    /// Morphological segmentation with the embedded IPADIC dictionary.
    pub struct LinderaReadings {
        segmenter: Segmenter,
    }

    impl LinderaReadings {
        /// Load the embedded dictionary.
        pub fn new() -> Result<Self> {
            let dictionary = load_dictionary("embedded://ipadic")
                .map_err(|e| Error::Dictionary(format!("Failed to load IPADIC: {}", e)))?;
            Ok(Self {
                segmenter: Segmenter::new(Mode::Normal, dictionary, None),
            })
        }
    }

    impl ReadingSource for LinderaReadings {
        fn segment(&self, text: &str) -> Vec<Segment> {
            match self.segmenter.segment(Cow::Borrowed(text)) {
                Ok(mut tokens) => tokens
                    .iter_mut()
                    .map(|token| {
                        let surface = token.surface.to_string();
                        let reading = token
                            .get_detail(READING_DETAIL)
                            .filter(|r| *r != "*")
                            .map(str::to_string);
                        Segment { surface, reading }
                    })
                    .collect(),
                Err(e) => {
                    log::warn!("Segmentation failed for '{}': {}", text, e);
                    vec![Segment::plain(text)]
                },
            }
        }

        fn name(&self) -> &'static str {
            "lindera-ipadic"
        }
    }
}

/// Spoken names of Latin letters, in hiragana.
static LETTER_NAMES: phf::Map<char, &'static str> = phf_map! {
    'a' => "えー", 'b' => "びー", 'c' => "しー", 'd' => "でぃー", 'e' => "いー",
    'f' => "えふ", 'g' => "じー", 'h' => "えいち", 'i' => "あい", 'j' => "じぇー",
    'k' => "けー", 'l' => "える", 'm' => "えむ", 'n' => "えぬ", 'o' => "おー",
    'p' => "ぴー", 'q' => "きゅー", 'r' => "あーる", 's' => "えす", 't' => "てぃー",
    'u' => "ゆー", 'v' => "ぶい", 'w' => "だぶりゅ", 'x' => "えっくす", 'y' => "わい",
    'z' => "ぜっと",
};

/// Hepburn romanization of single hiragana.
static KANA_ROMAJI: phf::Map<char, &'static str> = phf_map! {
    'あ' => "a", 'い' => "i", 'う' => "u", 'え' => "e", 'お' => "o",
    'か' => "ka", 'き' => "ki", 'く' => "ku", 'け' => "ke", 'こ' => "ko",
    'が' => "ga", 'ぎ' => "gi", 'ぐ' => "gu", 'げ' => "ge", 'ご' => "go",
    'さ' => "sa", 'し' => "shi", 'す' => "su", 'せ' => "se", 'そ' => "so",
    'ざ' => "za", 'じ' => "ji", 'ず' => "zu", 'ぜ' => "ze", 'ぞ' => "zo",
    'た' => "ta", 'ち' => "chi", 'つ' => "tsu", 'て' => "te", 'と' => "to",
    'だ' => "da", 'ぢ' => "ji", 'づ' => "zu", 'で' => "de", 'ど' => "do",
    'な' => "na", 'に' => "ni", 'ぬ' => "nu", 'ね' => "ne", 'の' => "no",
    'は' => "ha", 'ひ' => "hi", 'ふ' => "fu", 'へ' => "he", 'ほ' => "ho",
    'ば' => "ba", 'び' => "bi", 'ぶ' => "bu", 'べ' => "be", 'ぼ' => "bo",
    'ぱ' => "pa", 'ぴ' => "pi", 'ぷ' => "pu", 'ぺ' => "pe", 'ぽ' => "po",
    'ま' => "ma", 'み' => "mi", 'む' => "mu", 'め' => "me", 'も' => "mo",
    'や' => "ya", 'ゆ' => "yu", 'よ' => "yo",
    'ら' => "ra", 'り' => "ri", 'る' => "ru", 'れ' => "re", 'ろ' => "ro",
    'わ' => "wa", 'ゐ' => "i", 'ゑ' => "e", 'を' => "o", 'ん' => "n",
    'ぁ' => "a", 'ぃ' => "i", 'ぅ' => "u", 'ぇ' => "e", 'ぉ' => "o",
    'ゃ' => "ya", 'ゅ' => "yu", 'ょ' => "yo", 'ゎ' => "wa",
    'ゔ' => "vu", 'ゕ' => "ka", 'ゖ' => "ke",
};

/// Hepburn romanization of two-kana combinations (yōon and loanword sounds).
static DIGRAPH_ROMAJI: phf::Map<&'static str, &'static str> = phf_map! {
    "きゃ" => "kya", "きゅ" => "kyu", "きょ" => "kyo",
    "ぎゃ" => "gya", "ぎゅ" => "gyu", "ぎょ" => "gyo",
    "しゃ" => "sha", "しゅ" => "shu", "しょ" => "sho", "しぇ" => "she",
    "じゃ" => "ja", "じゅ" => "ju", "じょ" => "jo", "じぇ" => "je",
    "ちゃ" => "cha", "ちゅ" => "chu", "ちょ" => "cho", "ちぇ" => "che",
    "ぢゃ" => "ja", "ぢゅ" => "ju", "ぢょ" => "jo",
    "にゃ" => "nya", "にゅ" => "nyu", "にょ" => "nyo",
    "ひゃ" => "hya", "ひゅ" => "hyu", "ひょ" => "hyo",
    "びゃ" => "bya", "びゅ" => "byu", "びょ" => "byo",
    "ぴゃ" => "pya", "ぴゅ" => "pyu", "ぴょ" => "pyo",
    "みゃ" => "mya", "みゅ" => "myu", "みょ" => "myo",
    "りゃ" => "rya", "りゅ" => "ryu", "りょ" => "ryo",
    "てぃ" => "ti", "でぃ" => "di", "とぅ" => "tu", "どぅ" => "du",
    "ふぁ" => "fa", "ふぃ" => "fi", "ふぇ" => "fe", "ふぉ" => "fo",
    "うぃ" => "wi", "うぇ" => "we", "うぉ" => "wo",
    "ゔぁ" => "va", "ゔぃ" => "vi", "ゔぇ" => "ve", "ゔぉ" => "vo",
    "つぁ" => "tsa",
};

/// Converts text to hiragana or Hepburn romaji.
///
/// Construct once; conversions take `&self` and never fail.
pub struct Transliterator {
    readings: Box<dyn ReadingSource>,
}

impl std::fmt::Debug for Transliterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transliterator")
            .field("readings", &self.readings.name())
            .finish()
    }
}

impl Transliterator {
    /// Transliterator with the default reading backend.
    ///
    /// With the `ipadic` feature this loads the embedded dictionary, which
    /// takes a moment; without it kanji pass through unread.
    pub fn new() -> Result<Self> {
        #[cfg(feature = "ipadic")]
        let readings: Box<dyn ReadingSource> = Box::new(LinderaReadings::new()?);
        #[cfg(not(feature = "ipadic"))]
        let readings: Box<dyn ReadingSource> = Box::new(StaticReadings::new());

        log::info!("Transliterator ready ({} readings)", readings.name());
        Ok(Self { readings })
    }

    /// Transliterator over a caller-supplied reading backend.
    pub fn with_readings(readings: impl ReadingSource + 'static) -> Self {
        Self {
            readings: Box::new(readings),
        }
    }

    /// Name of the reading backend in use.
    pub fn backend(&self) -> &'static str {
        self.readings.name()
    }

    /// Convert text to hiragana, spelling Latin letters by their names.
    ///
    /// Digits, punctuation and characters without a reading pass through.
    pub fn to_hiragana(&self, text: &str) -> String {
        let kana = self.kana(text).to_lowercase();
        let mut out = String::with_capacity(kana.len() * 2);
        for c in kana.chars() {
            match LETTER_NAMES.get(&c) {
                Some(name) => out.push_str(name),
                None => out.push(c),
            }
        }
        out
    }

    /// Convert text to lower-case Hepburn romaji.
    pub fn to_roman(&self, text: &str) -> String {
        romanize(&self.kana(text)).to_lowercase()
    }

    /// Width-normalized text with kanji replaced by readings, all kana as hiragana.
    fn kana(&self, text: &str) -> String {
        let normalized = normalize(text, &WidthOptions::READING);
        let mut out = String::with_capacity(normalized.len());
        for segment in self.readings.segment(&normalized) {
            match segment.reading {
                Some(reading) if segment.surface.chars().any(is_kanji) => out.push_str(&reading),
                _ => out.push_str(&segment.surface),
            }
        }
        katakana_to_hiragana(&out)
    }
}

/// Map full-width katakana to hiragana; everything else is unchanged.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ァ'..='ヶ' | 'ヽ' | 'ヾ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Romanize hiragana text; non-kana characters pass through.
pub fn romanize(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == 'っ' {
            // Geminate the next consonant; "tch" before ch-sounds
            if let Some((next, _)) = romaji_at(&chars, i + 1) {
                if next.starts_with("ch") {
                    out.push('t');
                } else if let Some(first) = next.chars().next().filter(|f| !is_vowel(*f)) {
                    out.push(first);
                }
            }
            i += 1;
            continue;
        }

        if c == 'ー' {
            if let Some(vowel) = out.chars().last().filter(|v| is_vowel(*v)) {
                out.push(vowel);
            }
            i += 1;
            continue;
        }

        match romaji_at(&chars, i) {
            Some((romaji, used)) => {
                out.push_str(romaji);
                i += used;
            },
            None => {
                out.push(c);
                i += 1;
            },
        }
    }

    out
}

/// Romaji for the kana at `i`, preferring two-kana combinations.
fn romaji_at(chars: &[char], i: usize) -> Option<(&'static str, usize)> {
    if i + 1 < chars.len() {
        let pair: String = chars[i..i + 2].iter().collect();
        if let Some(romaji) = DIGRAPH_ROMAJI.get(pair.as_str()) {
            return Some((*romaji, 2));
        }
    }
    chars
        .get(i)
        .and_then(|c| KANA_ROMAJI.get(c))
        .map(|romaji| (*romaji, 1))
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// CJK ideographs, including the iteration mark 々.
pub fn is_kanji(c: char) -> bool {
    matches!(
        c,
        '\u{3005}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transliterator() -> Transliterator {
        Transliterator::with_readings(
            StaticReadings::new()
                .with_word("仮", "カリ")
                .with_word("牛丼", "ギュウドン")
                .with_word("牛", "ウシ")
                .with_word("特盛", "トクモリ"),
        )
    }

    #[test]
    fn test_to_hiragana_mixed_text() {
        let t = transliterator();
        assert_eq!(t.to_hiragana("ひラ仮Na"), "ひらかりえぬえー");
    }

    #[test]
    fn test_to_roman_mixed_text() {
        let t = transliterator();
        assert_eq!(t.to_roman("ひラ仮Ｎa"), "hirakarina");
    }

    #[test]
    fn test_longest_match_wins() {
        let t = transliterator();
        assert_eq!(t.to_roman("牛丼"), "gyuudon");
        assert_eq!(t.to_roman("牛"), "ushi");
    }

    #[test]
    fn test_half_width_kana_read() {
        let t = transliterator();
        assert_eq!(t.to_hiragana("ｶﾚｰ"), "かれー");
        assert_eq!(t.to_roman("ｶﾚｰ"), "karee");
    }

    #[test]
    fn test_unread_kanji_pass_through() {
        let t = Transliterator::with_readings(StaticReadings::new());
        assert_eq!(t.to_roman("豚丼"), "豚丼");
        assert_eq!(t.to_hiragana("豚丼"), "豚丼");
    }

    #[test]
    fn test_sokuon_and_yoon() {
        assert_eq!(romanize("きっぷ"), "kippu");
        assert_eq!(romanize("まっちゃ"), "matcha");
        assert_eq!(romanize("きゃべつ"), "kyabetsu");
        assert_eq!(romanize("しょうゆ"), "shouyu");
        assert_eq!(romanize("てぃー"), "tii");
    }

    #[test]
    fn test_trailing_sokuon_dropped() {
        assert_eq!(romanize("あっ"), "a");
    }

    #[test]
    fn test_romanize_keeps_digits_and_spaces() {
        assert_eq!(romanize("からあげ 5こ"), "karaage 5ko");
    }

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("ギュウドン"), "ぎゅうどん");
        assert_eq!(katakana_to_hiragana("ヴ"), "ゔ");
        assert_eq!(katakana_to_hiragana("ABC漢"), "ABC漢");
    }

    #[test]
    fn test_roman_is_lowercase() {
        let t = transliterator();
        assert_eq!(t.to_roman("BIG牛丼"), "biggyuudon");
    }

    #[test]
    fn test_static_segments_cover_input() {
        let table = StaticReadings::new().with_word("牛丼", "ぎゅうどん");
        let segments = table.segment("特製牛丼大盛");
        let joined: String = segments.iter().map(|s| s.surface.as_str()).collect();
        assert_eq!(joined, "特製牛丼大盛");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].reading.as_deref(), Some("ぎゅうどん"));
    }

    #[test]
    fn test_static_from_iter() {
        let table: StaticReadings = vec![("丼".to_string(), "ドン".to_string())]
            .into_iter()
            .collect();
        let t = Transliterator::with_readings(table);
        assert_eq!(t.to_roman("丼"), "don");
    }

    #[test]
    fn test_transliterator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transliterator>();
    }
}
