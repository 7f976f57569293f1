//! Property tests: the text layer is total and deterministic.

use obento_feed::config::TokenizerConfig;
use obento_feed::menu::MenuTokenizer;
use obento_feed::text::era::substitute_eras;
use obento_feed::text::transliterate::{StaticReadings, Transliterator};
use obento_feed::text::width::{normalize, Width, WidthOptions};
use proptest::prelude::*;

fn transliterator() -> Transliterator {
    Transliterator::with_readings(
        StaticReadings::new()
            .with_word("牛丼", "ぎゅうどん")
            .with_word("特盛", "とくもり"),
    )
}

fn width() -> impl Strategy<Value = Option<Width>> {
    prop_oneof![Just(None), Just(Some(Width::Half)), Just(Some(Width::Full))]
}

proptest! {
    #[test]
    fn normalize_is_total(text in "\\PC*", digit in width(), ascii in width(), kana in width()) {
        let options = WidthOptions { digit, ascii, kana };
        let once = normalize(&text, &options);
        prop_assert_eq!(once, normalize(&text, &options));
    }

    #[test]
    fn cleanup_is_idempotent(text in "[ぁ-んァ-ヶｦ-ﾟA-Za-zＡ-Ｚａ-ｚ0-9０-９ 　]*") {
        let once = normalize(&text, &WidthOptions::CLEANUP);
        prop_assert_eq!(normalize(&once, &WidthOptions::CLEANUP), once);
    }

    #[test]
    fn untouched_classes_pass_through(text in "[ぁ-ん一-龥]*") {
        prop_assert_eq!(normalize(&text, &WidthOptions::READING), text);
    }

    #[test]
    fn roman_is_lowercase_and_deterministic(text in "[ぁ-んァ-ヶｦ-ﾟA-Za-zＡ-Ｚ0-9 牛丼特盛]*") {
        let t = transliterator();
        let roman = t.to_roman(&text);
        prop_assert!(!roman.chars().any(char::is_uppercase));
        prop_assert_eq!(roman, t.to_roman(&text));
    }

    #[test]
    fn hiragana_has_no_latin_letters(text in "[ァ-ヶA-Za-z牛丼]*") {
        let t = transliterator();
        let hiragana = t.to_hiragana(&text);
        prop_assert!(!hiragana.chars().any(|c| c.is_ascii_alphabetic()));
        prop_assert_eq!(hiragana, t.to_hiragana(&text));
    }

    #[test]
    fn tokenizer_never_panics(text in "[牛丼各円 0-9a-z!]*") {
        let tokenizer = MenuTokenizer::new(TokenizerConfig::default()).unwrap();
        let _ = tokenizer.extract_items(&text);
    }

    #[test]
    fn non_era_text_unchanged(text in "[0-9年月日更新 ]*") {
        prop_assert_eq!(substitute_eras(&text), text);
    }
}

#[cfg(feature = "ipadic")]
#[test]
fn test_dictionary_readings() {
    let t = Transliterator::new().unwrap();
    let roman = t.to_roman("牛丼");
    assert!(!roman.is_empty());
    assert!(roman.chars().all(|c| c.is_ascii_lowercase()), "{}", roman);

    let again = Transliterator::new().unwrap();
    assert_eq!(again.to_roman("特盛 牛丼"), t.to_roman("特盛 牛丼"));
    assert_eq!(t.to_hiragana("カレー"), "かれー");
}
