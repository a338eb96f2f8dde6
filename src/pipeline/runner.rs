//! Pipeline runner: stage execution and artifact flow.
//!
//! [`DigestPipeline`] holds the stage components built from one
//! [`SummaryConfig`]. Calling [`DigestPipeline::run`] executes the stages in
//! order, threading artifacts between them and notifying a
//! [`PipelineObserver`] at each boundary:
//!
//! 1. Preprocess (Markdown cleanup, optional)
//! 2. Segment into sentences
//! 3. Chunk sentences
//! 4. Extract keywords across all chunks
//! 5. Score sentences per chunk and select
//! 6. Classify keywords into topics
//! 7. Assemble the result
//!
//! Every stage is total: a run never fails, and an empty document yields an
//! empty result.

use std::borrow::Cow;

use crate::keywords::KeywordExtractor;
use crate::nlp::chunker::{chunk, Chunk};
use crate::nlp::preprocess::preprocess;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Segmenter;
use crate::pipeline::config::SummaryConfig;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, STAGE_ASSEMBLE, STAGE_CHUNK, STAGE_KEYWORDS,
    STAGE_PREPROCESS, STAGE_SEGMENT, STAGE_SENTENCES, STAGE_TOPICS,
};
use crate::summarizer::assembler::{SummaryAssembler, SummaryResult};
use crate::summarizer::scorer::{self, SentenceScorer};
use crate::topics::TopicClassifier;
use crate::types::{Document, Sentence};

// ---------------------------------------------------------------------------
// Tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage. The span lives until the end
/// of the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// DigestPipeline
// ============================================================================

/// The digest stages configured for one language and one set of limits.
#[derive(Debug, Clone)]
pub struct DigestPipeline {
    config: SummaryConfig,
    segmenter: Segmenter,
    extractor: KeywordExtractor,
    scorer: SentenceScorer,
    classifier: TopicClassifier,
    assembler: SummaryAssembler,
}

impl DigestPipeline {
    /// Build the stages for `config`.
    ///
    /// The config is taken as given; run [`SummaryConfig::validate`] first
    /// to reject zero limits. A zero limit here just yields empty output.
    pub fn new(config: &SummaryConfig) -> Self {
        let language = config.language;
        let mut extractor = KeywordExtractor::new(language)
            .with_core_count(config.core_count)
            .with_min_chars(config.min_keyword_chars);
        if !config.extra_stopwords.is_empty() {
            let mut stopwords = StopwordFilter::new(language);
            stopwords.add_stopwords(&config.extra_stopwords);
            extractor = extractor.with_stopwords(stopwords);
        }

        Self {
            config: config.clone(),
            segmenter: Segmenter::new(language),
            extractor,
            scorer: SentenceScorer::new(language),
            classifier: TopicClassifier::new(),
            assembler: SummaryAssembler::new(language),
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Digest one document.
    ///
    /// The document's own language is ignored in favor of the configured
    /// one, so a batch is processed uniformly. The seed is re-applied for
    /// every call: the same document and config always give the same result.
    pub fn run(&self, document: &Document, observer: &mut impl PipelineObserver) -> SummaryResult {
        let cfg = &self.config;
        tracing::debug!(
            source = %document.source,
            chars = document.char_len(),
            language = %cfg.language,
            summary_type = %cfg.summary_type,
            "digesting document"
        );

        // Stage 0: Preprocess
        let text: Cow<'_, str> = {
            trace_stage!(STAGE_PREPROCESS);
            observer.on_stage_start(STAGE_PREPROCESS);
            let clock = StageClock::start();
            let text = if cfg.strip_markdown {
                Cow::Owned(preprocess(&document.text))
            } else {
                Cow::Borrowed(document.text.as_str())
            };
            observer.on_stage_end(STAGE_PREPROCESS, &StageReport::new(clock.elapsed()));
            text
        };

        // Stage 1: Segment
        let sentences: Vec<Sentence> = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let sentences = self.segmenter.segment(&text);
            let report = StageReport::new(clock.elapsed()).with_items(sentences.len());
            observer.on_stage_end(STAGE_SEGMENT, &report);
            sentences
        };

        // Stage 2: Chunk
        let chunks: Vec<Chunk<'_>> = {
            trace_stage!(STAGE_CHUNK);
            observer.on_stage_start(STAGE_CHUNK);
            let clock = StageClock::start();
            let chunks: Vec<Chunk<'_>> = chunk(&sentences, cfg.chunk_size).collect();
            for c in &chunks {
                tracing::trace!(
                    index = c.index,
                    first_sentence = ?c.first_sentence(),
                    sentences = c.len(),
                    chars = c.char_len(),
                    "chunk"
                );
                observer.on_chunk(c);
            }
            let report = StageReport::new(clock.elapsed()).with_items(chunks.len());
            observer.on_stage_end(STAGE_CHUNK, &report);
            chunks
        };

        // Stage 3: Keywords
        let keywords = {
            trace_stage!(STAGE_KEYWORDS);
            observer.on_stage_start(STAGE_KEYWORDS);
            let clock = StageClock::start();
            let keywords =
                self.extractor
                    .extract(chunks.iter().copied(), cfg.max_keywords, cfg.seed);
            let report = StageReport::new(clock.elapsed()).with_items(keywords.len());
            observer.on_stage_end(STAGE_KEYWORDS, &report);
            keywords
        };

        // Stage 4: Sentences
        let selection = {
            trace_stage!(STAGE_SENTENCES);
            observer.on_stage_start(STAGE_SENTENCES);
            let clock = StageClock::start();
            let scored: Vec<Sentence> = chunks
                .iter()
                .flat_map(|c| self.scorer.score_chunk(*c, &keywords))
                .collect();
            let selection = scorer::select(scored, cfg.summary_sentences);
            let report = StageReport::new(clock.elapsed()).with_items(selection.len());
            observer.on_stage_end(STAGE_SENTENCES, &report);
            selection
        };

        // Stage 5: Topics
        let buckets = {
            trace_stage!(STAGE_TOPICS);
            observer.on_stage_start(STAGE_TOPICS);
            let clock = StageClock::start();
            let buckets = self.classifier.classify(&keywords);
            let classified = buckets.iter().map(|b| b.len()).sum();
            let report = StageReport::new(clock.elapsed()).with_items(classified);
            observer.on_stage_end(STAGE_TOPICS, &report);
            buckets
        };

        // Stage 6: Assemble
        trace_stage!(STAGE_ASSEMBLE);
        observer.on_stage_start(STAGE_ASSEMBLE);
        let clock = StageClock::start();
        let result = self.assembler.assemble(
            document,
            &sentences,
            cfg.summary_type,
            selection,
            keywords,
            buckets,
        );
        let report = StageReport::new(clock.elapsed()).with_items(result.statistics.summary_length);
        observer.on_stage_end(STAGE_ASSEMBLE, &report);

        tracing::debug!(
            source = %result.source,
            sentences = result.sentences.len(),
            keywords = result.core_keywords.len() + result.secondary_keywords.len(),
            ratio = result.statistics.compression_ratio,
            "document digested"
        );
        result
    }
}
