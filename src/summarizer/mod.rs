//! Summarization components
//!
//! Keyword-density sentence scoring with order-preserving selection, and
//! assembly of the final digest with its statistics.

pub mod assembler;
pub mod scorer;

pub use assembler::{Statistics, SummaryAssembler, SummaryResult};
pub use scorer::{Selection, SentenceScorer};
