//! Frequency-based keyword extraction
//!
//! Counts normalized tokens across all chunks of a document, drops
//! stopwords, numbers and one-character tokens, and ranks the survivors:
//!
//! 1. Descending frequency
//! 2. Ascending first-occurrence sentence
//! 3. Seeded shuffle, applied only inside groups still tied on 1 and 2
//!
//! Tied groups are first laid out in token order, so the shuffle input and
//! therefore the output only depend on the text and the seed.

use std::borrow::Cow;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use crate::nlp::chunker::Chunk;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Segmenter;
use crate::types::{Keyword, KeywordTier, Language, Token, TokenKind};

/// Configuration for keyword extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// How many top keywords are labeled core
    pub core_count: usize,
    /// Minimum keyword length in characters
    pub min_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            core_count: 5,
            min_chars: 2,
        }
    }
}

/// Keyword extractor for one language
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    config: ExtractorConfig,
    segmenter: Segmenter,
    stopwords: Cow<'static, StopwordFilter>,
}

impl KeywordExtractor {
    /// Create an extractor using the built-in stopwords for `language`
    pub fn new(language: Language) -> Self {
        Self {
            config: ExtractorConfig::default(),
            segmenter: Segmenter::new(language),
            stopwords: Cow::Borrowed(StopwordFilter::builtin(language)),
        }
    }

    /// Replace the stopword table
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = Cow::Owned(stopwords);
        self
    }

    /// Set how many top keywords are labeled core
    pub fn with_core_count(mut self, core_count: usize) -> Self {
        self.config.core_count = core_count;
        self
    }

    /// Set minimum keyword length in characters
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.config.min_chars = min_chars;
        self
    }

    /// Extract at most `max_keywords` keywords, highest score first.
    ///
    /// The same chunks and seed always produce the same list.
    pub fn extract<'a>(
        &self,
        chunks: impl IntoIterator<Item = Chunk<'a>>,
        max_keywords: usize,
        seed: u64,
    ) -> Vec<Keyword> {
        let mut counter = Counter::default();
        let mut token_offset = 0;

        for chunk in chunks {
            for sentence in chunk.sentences {
                let tokens =
                    self.segmenter
                        .tokenize_sentence(&sentence.text, sentence.index, token_offset);
                token_offset += tokens.len();
                for token in &tokens {
                    if self.is_candidate(token) {
                        counter.add(token);
                    }
                }
            }
        }

        self.rank(counter.into_keywords(), max_keywords, seed)
    }

    /// Extract from already tokenized text.
    pub fn extract_from_tokens(
        &self,
        tokens: &[Token],
        max_keywords: usize,
        seed: u64,
    ) -> Vec<Keyword> {
        let mut counter = Counter::default();
        for token in tokens.iter().filter(|t| self.is_candidate(t)) {
            counter.add(token);
        }
        self.rank(counter.into_keywords(), max_keywords, seed)
    }

    fn is_candidate(&self, token: &Token) -> bool {
        token.kind != TokenKind::Numeric
            && token.norm.chars().count() >= self.config.min_chars
            && !self.stopwords.is_stopword(&token.norm)
            && !self.stopwords.is_stopword(&token.text)
    }

    /// Order candidates, break remaining ties with the seed, truncate and
    /// label tiers.
    fn rank(&self, mut keywords: Vec<Keyword>, max_keywords: usize, seed: u64) -> Vec<Keyword> {
        keywords.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then(a.first_sentence.cmp(&b.first_sentence))
                .then(a.first_token.cmp(&b.first_token))
        });

        let mut rng = StdRng::seed_from_u64(seed);
        let mut start = 0;
        while start < keywords.len() {
            let key = (keywords[start].frequency, keywords[start].first_sentence);
            let end = keywords[start..]
                .iter()
                .position(|k| (k.frequency, k.first_sentence) != key)
                .map_or(keywords.len(), |offset| start + offset);
            if end - start > 1 {
                keywords[start..end].shuffle(&mut rng);
            }
            start = end;
        }

        keywords.truncate(max_keywords);
        for (rank, keyword) in keywords.iter_mut().enumerate() {
            keyword.tier = if rank < self.config.core_count {
                KeywordTier::Core
            } else {
                KeywordTier::Secondary
            };
        }
        keywords
    }
}

/// Frequency table keeping first-occurrence order
#[derive(Debug, Default)]
struct Counter {
    index: FxHashMap<String, usize>,
    keywords: Vec<Keyword>,
}

impl Counter {
    fn add(&mut self, token: &Token) {
        match self.index.get(&token.norm) {
            Some(&i) => {
                let keyword = &mut self.keywords[i];
                keyword.frequency += 1;
                keyword.score = keyword.frequency as f64;
            }
            None => {
                self.index.insert(token.norm.clone(), self.keywords.len());
                let mut keyword = Keyword::new(token.norm.clone(), 1, token.sentence_idx);
                keyword.first_token = token.token_idx;
                self.keywords.push(keyword);
            }
        }
    }

    fn into_keywords(self) -> Vec<Keyword> {
        self.keywords
    }
}
