//! Digest pipeline
//!
//! This module provides the configuration and its validation rules, the
//! stage observer hooks, and the runner that threads a document through
//! segmentation, chunking, keyword extraction, sentence selection, topic
//! classification and assembly.

pub mod config;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod validation;

pub use config::SummaryConfig;
pub use observer::{NoopObserver, PipelineObserver, StageReport};
pub use runner::DigestPipeline;
pub use validation::{ValidationEngine, ValidationReport};
