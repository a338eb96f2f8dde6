//! Invariants that hold for any note.

use proptest::prelude::*;

use lecture_digest::keywords::KeywordExtractor;
use lecture_digest::nlp::chunker::chunk;
use lecture_digest::nlp::tokenizer::segment;
use lecture_digest::{summarize, Language, SummaryConfig, SummaryType};

const VOCAB: &[&str] = &[
    "인공지능은", "기술이다", "데이터를", "신경망", "학습", "모델의", "gradient", "tensor",
    "kernel", "graph", "vector", "matrix", "loss", "2024", "the", "and",
];

const ENDINGS: &[&str] = &[".", "!", "?", "다."];

fn sentence() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(VOCAB), 1..8),
        prop::sample::select(ENDINGS),
    )
        .prop_map(|(words, end)| format!("{}{}", words.join(" "), end))
}

fn note() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 1..12).prop_map(|s| s.join(" "))
}

fn language() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::Korean), Just(Language::English)]
}

proptest! {
    #[test]
    fn keyword_extraction_is_deterministic(text in note(), lang in language(), seed in any::<u64>()) {
        let sentences = segment(&text, lang);
        let extractor = KeywordExtractor::new(lang);
        let first = extractor.extract(chunk(&sentences, 64), 10, seed);
        let second = extractor.extract(chunk(&sentences, 64), 10, seed);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chunk_size_does_not_change_keywords(text in note(), size in 1usize..200) {
        let sentences = segment(&text, Language::Korean);
        let extractor = KeywordExtractor::new(Language::Korean);
        let whole = extractor.extract(chunk(&sentences, usize::MAX), 20, 42);
        let split = extractor.extract(chunk(&sentences, size), 20, 42);
        prop_assert_eq!(whole, split);
    }

    #[test]
    fn selection_is_an_ordered_subsequence(text in note(), n in 1usize..10, lang in language()) {
        let config = SummaryConfig::default()
            .with_language(lang)
            .with_summary_type(SummaryType::Sentences)
            .with_summary_sentences(n);
        let result = summarize(&text, &config);
        let all = segment(&text, lang);

        prop_assert!(result.sentences.len() <= n);
        prop_assert_eq!(result.sentences.len(), n.min(all.len()));
        for pair in result.sentences.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
        for s in &result.sentences {
            prop_assert_eq!(&s.text, &all[s.index].text);
        }
    }

    #[test]
    fn keyword_count_is_capped(text in note(), max in 1usize..30, core in 1usize..10) {
        let config = SummaryConfig::default()
            .with_summary_type(SummaryType::Keywords)
            .with_max_keywords(max)
            .with_core_count(core);
        let result = summarize(&text, &config);

        prop_assert!(result.keywords().count() <= max);
        prop_assert!(result.core_keywords.len() <= core);
        prop_assert!(result.keywords().all(|k| k.frequency >= 1));
    }

    #[test]
    fn chunks_reproduce_the_sentence_list(text in note(), size in 1usize..300) {
        let sentences = segment(&text, Language::Korean);
        let rejoined: Vec<_> = chunk(&sentences, size)
            .flat_map(|c| c.sentences.iter().cloned())
            .collect();
        prop_assert_eq!(rejoined, sentences);
    }

    #[test]
    fn compression_ratio_is_a_fraction(text in note(), lang in language()) {
        let config = SummaryConfig::default().with_language(lang);
        let stats = summarize(&text, &config).statistics;
        prop_assert!(stats.compression_ratio > 0.0);
        prop_assert!(stats.compression_ratio <= 1.0);
    }

    #[test]
    fn summary_never_has_more_sentences_than_document(
        text in note(),
        bold in any::<bool>(),
        lang in language(),
    ) {
        let text = if bold { format!("# Notes\n**{text}**") } else { text };
        let config = SummaryConfig::default().with_language(lang).with_summary_sentences(20);
        let stats = summarize(&text, &config).statistics;
        prop_assert!(stats.summary_sentence_count <= stats.sentence_count);
    }
}

#[test]
fn compression_ratio_is_zero_for_empty_text() {
    let stats = summarize("", &SummaryConfig::default()).statistics;
    assert_eq!(stats.compression_ratio, 0.0);
    assert_eq!(stats.char_count, 0);
}
