//! Half-width / full-width character normalization.
//!
//! Scraped Japanese pages mix narrow and wide renderings of the same
//! characters (`１` vs `1`, `ｶﾞ` vs `ガ`). This module rewrites each character
//! class independently:
//!
//! - **digit**: `０`-`９` (U+FF10-U+FF19) and `0`-`9`
//! - **ascii**: the rest of the full-width ASCII block (U+FF01-U+FF5E) and
//!   U+0021-U+007E, plus the ideographic space (U+3000) and U+0020
//! - **kana**: the half-width katakana block (U+FF61-U+FF9F) and full-width
//!   katakana with CJK punctuation
//!
//! A class with no requested width passes through untouched. Every function
//! here is total: no character is ever rejected.

use phf::phf_map;

/// Target rendering for one character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Narrow rendering (`1`, `A`, `ｱ`)
    Half,
    /// Wide rendering (`１`, `Ａ`, `ア`)
    Full,
}

/// Per-class width selection.
///
/// `None` leaves that class as it is found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidthOptions {
    /// Width for decimal digits
    pub digit: Option<Width>,
    /// Width for ASCII letters, symbols and the space
    pub ascii: Option<Width>,
    /// Width for katakana and kana punctuation
    pub kana: Option<Width>,
}

impl WidthOptions {
    /// General text cleanup: digits and ASCII narrow, kana untouched.
    pub const CLEANUP: WidthOptions = WidthOptions {
        digit: Some(Width::Half),
        ascii: Some(Width::Half),
        kana: None,
    };

    /// Pre-pass before reading lookup: digits and ASCII narrow, kana wide.
    pub const READING: WidthOptions = WidthOptions {
        digit: Some(Width::Half),
        ascii: Some(Width::Half),
        kana: Some(Width::Full),
    };

    /// Options that leave every class untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the digit width.
    pub fn with_digit(mut self, width: Width) -> Self {
        self.digit = Some(width);
        self
    }

    /// Select the ASCII width.
    pub fn with_ascii(mut self, width: Width) -> Self {
        self.ascii = Some(width);
        self
    }

    /// Select the kana width.
    pub fn with_kana(mut self, width: Width) -> Self {
        self.kana = Some(width);
        self
    }
}

const HALF_VOICED_MARK: char = '\u{FF9E}';
const HALF_SEMI_VOICED_MARK: char = '\u{FF9F}';

/// Half-width katakana block to full-width katakana / punctuation.
static HALF_TO_FULL_KANA: phf::Map<char, char> = phf_map! {
    '｡' => '。', '｢' => '「', '｣' => '」', '､' => '、', '･' => '・',
    'ｦ' => 'ヲ', 'ｧ' => 'ァ', 'ｨ' => 'ィ', 'ｩ' => 'ゥ', 'ｪ' => 'ェ',
    'ｫ' => 'ォ', 'ｬ' => 'ャ', 'ｭ' => 'ュ', 'ｮ' => 'ョ', 'ｯ' => 'ッ',
    'ｰ' => 'ー',
    'ｱ' => 'ア', 'ｲ' => 'イ', 'ｳ' => 'ウ', 'ｴ' => 'エ', 'ｵ' => 'オ',
    'ｶ' => 'カ', 'ｷ' => 'キ', 'ｸ' => 'ク', 'ｹ' => 'ケ', 'ｺ' => 'コ',
    'ｻ' => 'サ', 'ｼ' => 'シ', 'ｽ' => 'ス', 'ｾ' => 'セ', 'ｿ' => 'ソ',
    'ﾀ' => 'タ', 'ﾁ' => 'チ', 'ﾂ' => 'ツ', 'ﾃ' => 'テ', 'ﾄ' => 'ト',
    'ﾅ' => 'ナ', 'ﾆ' => 'ニ', 'ﾇ' => 'ヌ', 'ﾈ' => 'ネ', 'ﾉ' => 'ノ',
    'ﾊ' => 'ハ', 'ﾋ' => 'ヒ', 'ﾌ' => 'フ', 'ﾍ' => 'ヘ', 'ﾎ' => 'ホ',
    'ﾏ' => 'マ', 'ﾐ' => 'ミ', 'ﾑ' => 'ム', 'ﾒ' => 'メ', 'ﾓ' => 'モ',
    'ﾔ' => 'ヤ', 'ﾕ' => 'ユ', 'ﾖ' => 'ヨ',
    'ﾗ' => 'ラ', 'ﾘ' => 'リ', 'ﾙ' => 'ル', 'ﾚ' => 'レ', 'ﾛ' => 'ロ',
    'ﾜ' => 'ワ', 'ﾝ' => 'ン',
    'ﾞ' => '゛', 'ﾟ' => '゜',
};

/// Inverse of [`HALF_TO_FULL_KANA`] for characters without sound marks.
static FULL_TO_HALF_KANA: phf::Map<char, char> = phf_map! {
    '。' => '｡', '「' => '｢', '」' => '｣', '、' => '､', '・' => '･',
    'ヲ' => 'ｦ', 'ァ' => 'ｧ', 'ィ' => 'ｨ', 'ゥ' => 'ｩ', 'ェ' => 'ｪ',
    'ォ' => 'ｫ', 'ャ' => 'ｬ', 'ュ' => 'ｭ', 'ョ' => 'ｮ', 'ッ' => 'ｯ',
    'ー' => 'ｰ',
    'ア' => 'ｱ', 'イ' => 'ｲ', 'ウ' => 'ｳ', 'エ' => 'ｴ', 'オ' => 'ｵ',
    'カ' => 'ｶ', 'キ' => 'ｷ', 'ク' => 'ｸ', 'ケ' => 'ｹ', 'コ' => 'ｺ',
    'サ' => 'ｻ', 'シ' => 'ｼ', 'ス' => 'ｽ', 'セ' => 'ｾ', 'ソ' => 'ｿ',
    'タ' => 'ﾀ', 'チ' => 'ﾁ', 'ツ' => 'ﾂ', 'テ' => 'ﾃ', 'ト' => 'ﾄ',
    'ナ' => 'ﾅ', 'ニ' => 'ﾆ', 'ヌ' => 'ﾇ', 'ネ' => 'ﾈ', 'ノ' => 'ﾉ',
    'ハ' => 'ﾊ', 'ヒ' => 'ﾋ', 'フ' => 'ﾌ', 'ヘ' => 'ﾍ', 'ホ' => 'ﾎ',
    'マ' => 'ﾏ', 'ミ' => 'ﾐ', 'ム' => 'ﾑ', 'メ' => 'ﾒ', 'モ' => 'ﾓ',
    'ヤ' => 'ﾔ', 'ユ' => 'ﾕ', 'ヨ' => 'ﾖ',
    'ラ' => 'ﾗ', 'リ' => 'ﾘ', 'ル' => 'ﾙ', 'レ' => 'ﾚ', 'ロ' => 'ﾛ',
    'ワ' => 'ﾜ', 'ン' => 'ﾝ',
    '゛' => 'ﾞ', '゜' => 'ﾟ',
};

/// Rewrite `text` according to `options`.
///
/// # Examples
///
/// ```
/// use obento_feed::text::width::{normalize, WidthOptions};
///
/// assert_eq!(normalize("Ａ１ア", &WidthOptions::CLEANUP), "A1ア");
/// assert_eq!(normalize("ｷﾞｭｳﾄﾞﾝ", &WidthOptions::READING), "ギュウドン");
/// ```
pub fn normalize(text: &str, options: &WidthOptions) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_digit(c) {
            match options.digit {
                Some(Width::Half) => out.push(digit_to_half(c)),
                Some(Width::Full) => out.push(digit_to_full(c)),
                None => out.push(c),
            }
        } else if is_ascii(c) {
            match options.ascii {
                Some(Width::Half) => out.push(ascii_to_half(c)),
                Some(Width::Full) => out.push(ascii_to_full(c)),
                None => out.push(c),
            }
        } else if is_kana(c) {
            match options.kana {
                Some(Width::Full) => {
                    let full = HALF_TO_FULL_KANA.get(&c).copied().unwrap_or(c);
                    // A trailing half-width sound mark folds into its base
                    let composed = match chars.peek() {
                        Some(&HALF_VOICED_MARK) => voiced(full),
                        Some(&HALF_SEMI_VOICED_MARK) => semi_voiced(full),
                        _ => None,
                    };
                    match composed {
                        Some(composed) => {
                            chars.next();
                            out.push(composed);
                        },
                        None => out.push(full),
                    }
                },
                Some(Width::Half) => push_half_kana(&mut out, c),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Narrow the selected classes, leaving the others untouched.
pub fn to_halfwidth(text: &str, digit: bool, ascii: bool, kana: bool) -> String {
    normalize(text, &flags(Width::Half, digit, ascii, kana))
}

/// Widen the selected classes, leaving the others untouched.
pub fn to_fullwidth(text: &str, digit: bool, ascii: bool, kana: bool) -> String {
    normalize(text, &flags(Width::Full, digit, ascii, kana))
}

fn flags(width: Width, digit: bool, ascii: bool, kana: bool) -> WidthOptions {
    WidthOptions {
        digit: digit.then_some(width),
        ascii: ascii.then_some(width),
        kana: kana.then_some(width),
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

fn is_ascii(c: char) -> bool {
    matches!(c, '\u{21}'..='\u{7E}' | ' ' | '\u{3000}' | '\u{FF01}'..='\u{FF5E}') && !is_digit(c)
}

fn is_kana(c: char) -> bool {
    HALF_TO_FULL_KANA.contains_key(&c)
        || FULL_TO_HALF_KANA.contains_key(&c)
        || decompose(c).is_some()
}

fn digit_to_half(c: char) -> char {
    shift(c, '０', '0')
}

fn digit_to_full(c: char) -> char {
    shift(c, '0', '０')
}

fn ascii_to_half(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => shift(c, '\u{FF01}', '!'),
        _ => c,
    }
}

fn ascii_to_full(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => shift(c, '!', '\u{FF01}'),
        _ => c,
    }
}

/// Move `c` from the block starting at `from` to the block starting at `to`.
fn shift(c: char, from: char, to: char) -> char {
    if c < from {
        return c;
    }
    char::from_u32(c as u32 - from as u32 + to as u32).unwrap_or(c)
}

fn push_half_kana(out: &mut String, c: char) {
    if let Some(&half) = FULL_TO_HALF_KANA.get(&c) {
        out.push(half);
    } else if let Some((base, mark)) = decompose(c) {
        out.push(base);
        out.push(mark);
    } else {
        out.push(c);
    }
}

/// Voiced (dakuten) form of a full-width katakana.
fn voiced(c: char) -> Option<char> {
    match c {
        'ウ' => Some('ヴ'),
        'カ' | 'キ' | 'ク' | 'ケ' | 'コ' | 'サ' | 'シ' | 'ス' | 'セ' | 'ソ' | 'タ' | 'チ' | 'ツ'
        | 'テ' | 'ト' | 'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(c as u32 + 1),
        _ => None,
    }
}

/// Semi-voiced (handakuten) form of a full-width katakana.
fn semi_voiced(c: char) -> Option<char> {
    match c {
        'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(c as u32 + 2),
        _ => None,
    }
}

/// Split a voiced/semi-voiced katakana into half-width base and mark.
fn decompose(c: char) -> Option<(char, char)> {
    if c == 'ヴ' {
        return Some(('ｳ', HALF_VOICED_MARK));
    }
    let code = c as u32;
    for (offset, mark) in [(1, HALF_VOICED_MARK), (2, HALF_SEMI_VOICED_MARK)] {
        let Some(base) = code.checked_sub(offset).and_then(char::from_u32) else {
            continue;
        };
        let recomposed = if offset == 1 { voiced(base) } else { semi_voiced(base) };
        if recomposed == Some(c) {
            if let Some(&half) = FULL_TO_HALF_KANA.get(&base) {
                return Some((half, mark));
            }
        }
    }
    None
}
