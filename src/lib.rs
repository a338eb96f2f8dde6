//! # lecture-digest
//!
//! Rule-based digests of Korean and English lecture notes.
//!
//! A document is segmented into sentences, grouped into size-bounded
//! chunks, and mined for frequency-ranked keywords. Sentences are scored by
//! keyword density and the best ones are kept in document order. Keywords
//! are sorted into four topic buckets, and the result carries statistics
//! about the original text.
//!
//! Everything is deterministic: the same text, configuration and seed
//! always produce the same digest.
//!
//! ## Quick start
//!
//! ```
//! use lecture_digest::{summarize, Language, SummaryConfig};
//!
//! let config = SummaryConfig::default().with_language(Language::English);
//! let result = summarize(
//!     "Binary search halves the range. Binary search needs sorted input.",
//!     &config,
//! );
//! assert!(result.key_concepts(2).contains(&"binary"));
//! assert_eq!(result.sentences.len(), 2);
//! ```

pub mod errors;
pub mod keywords;
pub mod nlp;
pub mod notes;
pub mod pipeline;
pub mod report;
pub mod summarizer;
pub mod topics;
pub mod types;

pub use errors::{DigestError, Result};
pub use keywords::KeywordExtractor;
pub use nlp::chunker::{chunk, Chunk};
pub use nlp::tokenizer::Segmenter;
pub use pipeline::{DigestPipeline, NoopObserver, PipelineObserver, SummaryConfig};
pub use report::{render_markdown, MarkdownWriter};
pub use summarizer::{Statistics, SummaryResult};
pub use topics::{Topic, TopicBucket, TopicClassifier};
pub use types::{Document, Keyword, KeywordTier, Language, Sentence, SummaryType};

/// Digest `text` with `config`, using the configured language.
pub fn summarize(text: &str, config: &SummaryConfig) -> SummaryResult {
    let document = Document::new("", text, config.language);
    DigestPipeline::new(config).run(&document, &mut NoopObserver)
}
