//! Digest configuration.
//!
//! A [`SummaryConfig`] selects the summary type and language and sets the
//! size caps and the seed. It can be built in code, loaded from JSON, and
//! is checked by the [`super::validation::ValidationEngine`] before any
//! document reaches the core.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "summary_type": "mixed",
//!   "language": "ko",
//!   "max_keywords": 50,
//!   "chunk_size": 8000,
//!   "summary_sentences": 5,
//!   "seed": 42,
//!   "core_count": 5,
//!   "min_keyword_chars": 2,
//!   "extra_stopwords": ["강의", "slide"],
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::validation::{ValidationEngine, ValidationReport};
use crate::errors::{DigestError, Result};
use crate::types::{Language, SummaryType};

pub const DEFAULT_MAX_KEYWORDS: usize = 50;
pub const DEFAULT_CHUNK_SIZE: usize = 8000;
pub const DEFAULT_SUMMARY_SENTENCES: usize = 5;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CORE_COUNT: usize = 5;
pub const DEFAULT_MIN_KEYWORD_CHARS: usize = 2;

/// Configuration for one digest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Which parts of the digest to populate.
    #[serde(default)]
    pub summary_type: SummaryType,

    /// Language rules; unsupported tags fall back to English.
    #[serde(default)]
    pub language: Language,

    /// Hard cap on reported keywords.
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Advisory chunk size in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Hard cap on extracted sentences.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Seed for keyword tie-breaking. Re-applied for every document.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// How many top keywords are reported as core.
    #[serde(default = "default_core_count")]
    pub core_count: usize,

    /// Shortest keyword candidate, in characters of the normalized term.
    #[serde(default = "default_min_keyword_chars")]
    pub min_keyword_chars: usize,

    /// Words filtered out on top of the built-in stopword table.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Strip Markdown formatting before segmentation.
    #[serde(default = "default_true")]
    pub strip_markdown: bool,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_summary_sentences() -> usize {
    DEFAULT_SUMMARY_SENTENCES
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_core_count() -> usize {
    DEFAULT_CORE_COUNT
}

fn default_min_keyword_chars() -> usize {
    DEFAULT_MIN_KEYWORD_CHARS
}

fn default_true() -> bool {
    true
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            summary_type: SummaryType::default(),
            language: Language::default(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            seed: DEFAULT_SEED,
            core_count: DEFAULT_CORE_COUNT,
            min_keyword_chars: DEFAULT_MIN_KEYWORD_CHARS,
            extra_stopwords: Vec::new(),
            strip_markdown: true,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl SummaryConfig {
    /// Parse a config from JSON text. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DigestError::io(path, e))?;
        Self::from_json(&text).map_err(|source| DigestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_summary_type(mut self, summary_type: SummaryType) -> Self {
        self.summary_type = summary_type;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_summary_sentences(mut self, summary_sentences: usize) -> Self {
        self.summary_sentences = summary_sentences;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_core_count(mut self, core_count: usize) -> Self {
        self.core_count = core_count;
        self
    }

    pub fn with_strip_markdown(mut self, strip: bool) -> Self {
        self.strip_markdown = strip;
        self
    }

    pub fn with_min_keyword_chars(mut self, min_keyword_chars: usize) -> Self {
        self.min_keyword_chars = min_keyword_chars;
        self
    }

    pub fn with_extra_stopwords<S: Into<String>>(
        mut self,
        words: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Run the default validation rules.
    ///
    /// Returns the report (possibly carrying warnings) when there are no
    /// errors, and [`DigestError::InvalidConfig`] otherwise.
    pub fn validate(&self) -> Result<ValidationReport> {
        let engine = ValidationEngine::with_defaults();
        tracing::debug!(rules = ?engine.rule_names(), "validating config");
        let report = engine.validate(self);
        if report.has_errors() {
            Err(DigestError::InvalidConfig(report))
        } else {
            Ok(report)
        }
    }
}
