//! Keyword extraction
//!
//! Frequency-ranked keyword candidates with seeded, reproducible
//! tie-breaking and a core/secondary split.

pub mod extractor;

pub use extractor::{ExtractorConfig, KeywordExtractor};
