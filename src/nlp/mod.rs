//! Natural Language Processing components
//!
//! This module provides Markdown cleanup, sentence segmentation, word
//! tokenization, stopword filtering and sentence-aligned chunking.

pub mod chunker;
pub mod preprocess;
pub mod stopwords;
pub mod tokenizer;
