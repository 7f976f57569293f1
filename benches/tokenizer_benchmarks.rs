//! Benchmarks for block tokenizing and transliteration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use obento_feed::config::TokenizerConfig;
use obento_feed::menu::MenuTokenizer;
use obento_feed::text::transliterate::{StaticReadings, Transliterator};
use obento_feed::text::width::{normalize, WidthOptions};

const BLOCK: &str = "ｎｅｗ！牛丼 豚丼 カレー 各４８０円 特盛 ５８０ 円 定食 A 600円 B 700円";

fn bench_tokenizer(c: &mut Criterion) {
    let tokenizer = MenuTokenizer::new(TokenizerConfig::default()).unwrap();
    c.bench_function("extract_items", |b| {
        b.iter(|| tokenizer.extract_items(black_box(BLOCK)).unwrap())
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_reading", |b| {
        b.iter(|| normalize(black_box(BLOCK), &WidthOptions::READING))
    });
}

fn bench_transliterate(c: &mut Criterion) {
    let t = Transliterator::with_readings(
        StaticReadings::new()
            .with_word("牛丼", "ぎゅうどん")
            .with_word("豚丼", "ぶたどん")
            .with_word("特盛", "とくもり"),
    );
    c.bench_function("to_roman", |b| b.iter(|| t.to_roman(black_box("特盛 牛丼 カレーセット"))));
}

criterion_group!(benches, bench_tokenizer, bench_normalize, bench_transliterate);
criterion_main!(benches);
