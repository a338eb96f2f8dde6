//! Summary assembly and statistics
//!
//! Combines the selected sentences, ranked keywords and topic buckets into a
//! [`SummaryResult`] according to the requested [`SummaryType`], and
//! computes statistics over the sentences the pipeline segmented. Character
//! counts use the raw document text.

use serde::Serialize;

use super::scorer::Selection;
use crate::nlp::tokenizer::Segmenter;
use crate::topics::TopicBucket;
use crate::types::{Document, Keyword, Language, Sentence, SummaryType};

/// Document and summary size figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Sentences the document was segmented into
    pub sentence_count: usize,
    /// Word tokens in those sentences
    pub word_count: usize,
    /// Characters in the original document
    pub char_count: usize,
    /// Sentences in the summary
    pub summary_sentence_count: usize,
    /// Characters in the rendered summary text
    pub summary_length: usize,
    /// `summary_length / char_count`, clamped to 1.0; 0 for empty documents
    /// and for empty summaries
    pub compression_ratio: f64,
}

impl Statistics {
    /// Compression ratio as a percentage with one decimal, e.g. `"12.5%"`.
    pub fn compression_percent(&self) -> String {
        format!("{:.1}%", self.compression_ratio * 100.0)
    }
}

/// The structured digest of one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    /// Source identifier of the document
    pub source: String,
    pub language: Language,
    pub summary_type: SummaryType,
    /// Selected sentences in document order
    pub sentences: Vec<Sentence>,
    /// Top-ranked keywords
    pub core_keywords: Vec<Keyword>,
    /// Remaining ranked keywords
    pub secondary_keywords: Vec<Keyword>,
    /// Topic buckets in priority order
    pub topics: Vec<TopicBucket>,
    pub statistics: Statistics,
}

impl SummaryResult {
    /// Core then secondary keywords, in rank order.
    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.core_keywords.iter().chain(self.secondary_keywords.iter())
    }

    /// Surfaces of the top `limit` keywords.
    pub fn key_concepts(&self, limit: usize) -> Vec<&str> {
        self.keywords().take(limit).map(|k| k.text.as_str()).collect()
    }

    /// Selected sentences joined by single spaces.
    pub fn sentence_text(&self) -> String {
        join_sentences(&self.sentences)
    }

    /// The summary as plain text: the sentence paragraph and the keyword
    /// line, whichever are present, separated by a newline.
    pub fn summary_text(&self) -> String {
        render_text(&self.sentences, self.keywords())
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty() && self.core_keywords.is_empty()
    }
}

/// Builds [`SummaryResult`]s
#[derive(Debug, Clone, Default)]
pub struct SummaryAssembler {
    segmenter: Segmenter,
}

impl SummaryAssembler {
    pub fn new(language: Language) -> Self {
        Self {
            segmenter: Segmenter::new(language),
        }
    }

    /// Assemble the digest for `document`.
    ///
    /// `segmented` holds every sentence the document was split into, after
    /// any preprocessing. Keywords are expected in rank order with tiers
    /// already assigned.
    pub fn assemble(
        &self,
        document: &Document,
        segmented: &[Sentence],
        summary_type: SummaryType,
        selection: Selection,
        ranked_keywords: Vec<Keyword>,
        buckets: Vec<TopicBucket>,
    ) -> SummaryResult {
        let sentences = if summary_type.includes_sentences() {
            selection.sentences
        } else {
            Vec::new()
        };

        let (core_keywords, secondary_keywords, topics) = if summary_type.includes_keywords() {
            let (core, secondary): (Vec<_>, Vec<_>) =
                ranked_keywords.into_iter().partition(Keyword::is_core);
            (core, secondary, buckets)
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };

        let summary_length = render_text(
            &sentences,
            core_keywords.iter().chain(secondary_keywords.iter()),
        )
        .chars()
        .count();
        let statistics =
            self.statistics(document, segmented, sentences.len(), summary_length);

        SummaryResult {
            source: document.source.clone(),
            language: document.language,
            summary_type,
            sentences,
            core_keywords,
            secondary_keywords,
            topics,
            statistics,
        }
    }

    /// Statistics of the segmented document plus the summary size.
    ///
    /// Sentence and word counts come from `segmented`, so they agree with
    /// the sentences a summary can select from.
    pub fn statistics(
        &self,
        document: &Document,
        segmented: &[Sentence],
        summary_sentence_count: usize,
        summary_length: usize,
    ) -> Statistics {
        let word_count = self.segmenter.tokenize(segmented).len();
        let char_count = document.char_len();

        let compression_ratio = if char_count == 0 {
            0.0
        } else {
            (summary_length as f64 / char_count as f64).min(1.0)
        };

        Statistics {
            sentence_count: segmented.len(),
            word_count,
            char_count,
            summary_sentence_count,
            summary_length,
            compression_ratio,
        }
    }
}

fn join_sentences(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_text<'a>(sentences: &[Sentence], keywords: impl Iterator<Item = &'a Keyword>) -> String {
    let keyword_line = keywords.map(|k| k.text.as_str()).collect::<Vec<_>>().join(", ");
    [join_sentences(sentences), keyword_line]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
