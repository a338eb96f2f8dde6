//! Core data types
//!
//! Documents, tokens, sentences and keywords shared by every stage of the
//! digest pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language rules used for segmentation, stopwords and particle handling.
///
/// Deserializes from any string; unsupported tags fall back to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    Korean,
    English,
}

impl Language {
    /// Short tag used in configs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ko" | "kor" | "korean" => Language::Korean,
            // Anything unrecognised uses the Latin-oriented rules
            _ => Language::English,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Language::parse(value))
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::parse(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which parts of the digest are populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryType {
    /// Core/secondary keywords and topic buckets only
    Keywords,
    /// Extracted sentences only
    Sentences,
    /// Everything
    #[default]
    Mixed,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Keywords => "keywords",
            SummaryType::Sentences => "sentences",
            SummaryType::Mixed => "mixed",
        }
    }

    /// Whether keyword lists and topic buckets are reported.
    pub fn includes_keywords(&self) -> bool {
        matches!(self, SummaryType::Keywords | SummaryType::Mixed)
    }

    /// Whether the extracted sentence list is reported.
    pub fn includes_sentences(&self) -> bool {
        matches!(self, SummaryType::Sentences | SummaryType::Mixed)
    }
}

impl std::str::FromStr for SummaryType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "keywords" | "keyword" => Ok(SummaryType::Keywords),
            "sentences" | "sentence" => Ok(SummaryType::Sentences),
            "mixed" => Ok(SummaryType::Mixed),
            other => Err(format!(
                "unknown summary type \"{other}\" (expected keywords, sentences or mixed)"
            )),
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Source identifier (usually the file stem)
    pub source: String,
    /// Raw text
    pub text: String,
    /// Language rules to apply
    pub language: Language,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>, language: Language) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            language,
        }
    }

    /// Length of the text in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Script class of a word token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Contiguous Hangul run
    Hangul,
    /// Latin letters, possibly mixed with digits
    Latin,
    /// Digits only
    Numeric,
}

/// A word token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appears in the document
    pub text: String,
    /// Normalized form used for counting: lowercased for Latin,
    /// particle-stripped for Hangul
    pub norm: String,
    pub kind: TokenKind,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Token index within the document
    pub token_idx: usize,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        norm: impl Into<String>,
        kind: TokenKind,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            norm: norm.into(),
            kind,
            sentence_idx,
            token_idx,
        }
    }
}

/// A sentence with its position and importance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    /// The sentence text, trimmed
    pub text: String,
    /// Position in the document (0-based), used to restore original order
    pub index: usize,
    /// Start byte offset in the segmented text
    pub start: usize,
    /// End byte offset in the segmented text
    pub end: usize,
    /// Importance score assigned by the sentence scorer
    pub score: f64,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            index,
            start,
            end,
            score: 0.0,
        }
    }

    /// Length of the sentence in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Rank band of an extracted keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordTier {
    Core,
    Secondary,
}

/// An extracted keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    /// Normalized surface form
    pub text: String,
    /// Number of occurrences in the document
    pub frequency: usize,
    /// Ranking score
    pub score: f64,
    /// Index of the sentence where the keyword first appears
    pub first_sentence: usize,
    /// Token index of the first occurrence
    pub first_token: usize,
    pub tier: KeywordTier,
}

impl Keyword {
    pub fn new(text: impl Into<String>, frequency: usize, first_sentence: usize) -> Self {
        Self {
            text: text.into(),
            frequency,
            score: frequency as f64,
            first_sentence,
            first_token: 0,
            tier: KeywordTier::Secondary,
        }
    }

    pub fn is_core(&self) -> bool {
        self.tier == KeywordTier::Core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_fallback() {
        assert_eq!("ko".parse::<Language>().unwrap(), Language::Korean);
        assert_eq!("Korean".parse::<Language>().unwrap(), Language::Korean);
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        // Unsupported tags fall back to English rules
        assert_eq!("fr".parse::<Language>().unwrap(), Language::English);
        assert_eq!("".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn test_summary_type_parse() {
        assert_eq!("mixed".parse::<SummaryType>().unwrap(), SummaryType::Mixed);
        assert_eq!(
            "Keywords".parse::<SummaryType>().unwrap(),
            SummaryType::Keywords
        );
        assert!("bullet".parse::<SummaryType>().is_err());
    }

    #[test]
    fn test_summary_type_sections() {
        assert!(SummaryType::Keywords.includes_keywords());
        assert!(!SummaryType::Keywords.includes_sentences());
        assert!(SummaryType::Sentences.includes_sentences());
        assert!(!SummaryType::Sentences.includes_keywords());
        assert!(SummaryType::Mixed.includes_keywords());
        assert!(SummaryType::Mixed.includes_sentences());
    }

    #[test]
    fn test_document_char_len_counts_hangul_as_one() {
        let doc = Document::new("n", "한국어 text", Language::Korean);
        assert_eq!(doc.char_len(), 8);
        assert!(!doc.is_empty());
        assert!(Document::new("e", "  \n", Language::English).is_empty());
    }

    #[test]
    fn test_language_serde_tags() {
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
        let lang: Language = serde_json::from_str("\"korean\"").unwrap();
        assert_eq!(lang, Language::Korean);
        assert_eq!(serde_json::to_string(&Language::Korean).unwrap(), "\"ko\"");
    }
}
