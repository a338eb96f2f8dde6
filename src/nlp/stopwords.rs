//! Stopword filtering
//!
//! English stopwords come from the `stop-words` crate with a small
//! lecture-notes supplement; Korean stopwords are a curated table of
//! particles, copulas, demonstratives and light verbs. The built-in filters
//! are loaded once and shared read-only.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::types::Language;

static KOREAN: LazyLock<StopwordFilter> = LazyLock::new(|| StopwordFilter::new(Language::Korean));
static ENGLISH: LazyLock<StopwordFilter> =
    LazyLock::new(|| StopwordFilter::new(Language::English));

/// Particles, copulas and function words that carry no topic on their own.
const KOREAN_STOPWORDS: &[&str] = &[
    "이", "그", "저", "것", "수", "있", "하", "되", "되다", "있다", "하다", "없다", "의", "가",
    "을", "를", "에", "에서", "로", "으로", "와", "과", "도", "는", "은", "이다", "다", "및",
    "등", "또는", "그리고", "그러나", "하지만", "또한", "즉", "이런", "그런", "저런", "이것",
    "그것", "저것", "여기", "거기", "때문", "위해", "통해", "대해", "대한", "같은", "같이",
    "있는", "하는", "되는", "한다", "된다", "있고", "하고", "되고", "우리", "매우", "가장",
    "모든", "각", "더", "또", "안", "못", "경우", "정도", "부분",
];

/// Words common in lecture notes that the generic English list misses.
const ENGLISH_SUPPLEMENT: &[&str] = &[
    "also", "using", "used", "use", "via", "etc", "e.g", "i.e", "example", "lecture", "note",
    "notes", "slide", "chapter",
];

/// Case-insensitive stopword set
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Lowercased stopwords
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl StopwordFilter {
    /// Create a new stopword filter for the given language
    pub fn new(language: Language) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Shared, load-once filter for a language.
    pub fn builtin(language: Language) -> &'static StopwordFilter {
        match language {
            Language::Korean => &KOREAN,
            Language::English => &ENGLISH,
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let mut filter = Self {
            stopwords: FxHashSet::default(),
        };
        filter.add_stopwords(words);
        filter
    }

    /// Add words to the filter; blank entries are skipped.
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        self.stopwords.extend(
            words
                .iter()
                .map(|w| w.as_ref().trim())
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase),
        );
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: Language) -> FxHashSet<String> {
        match language {
            Language::Korean => {
                // Mixed notes still carry English function words
                let mut set = Self::english_stopwords();
                set.extend(KOREAN_STOPWORDS.iter().map(|s| s.to_string()));
                set
            }
            Language::English => Self::english_stopwords(),
        }
    }

    fn english_stopwords() -> FxHashSet<String> {
        get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_string())
            .chain(ENGLISH_SUPPLEMENT.iter().map(|s| s.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new(Language::English);

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The")); // case insensitive
        assert!(filter.is_stopword("is"));
        assert!(filter.is_stopword("using"));
        assert!(!filter.is_stopword("machine"));
        assert!(!filter.is_stopword("learning"));
    }

    #[test]
    fn test_korean_stopwords() {
        let filter = StopwordFilter::new(Language::Korean);

        assert!(filter.is_stopword("그리고"));
        assert!(filter.is_stopword("에서"));
        assert!(filter.is_stopword("the"));
        assert!(!filter.is_stopword("인공지능"));
        assert!(!filter.is_stopword("알고리즘"));
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["custom", "words"]);

        assert!(filter.is_stopword("custom"));
        assert!(filter.is_stopword("words"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["extra"]);
        assert!(filter.is_stopword("extra"));
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_extend_builtin_skips_blank() {
        let mut filter = StopwordFilter::new(Language::Korean);
        let before = filter.len();
        filter.add_stopwords(&["강의".to_string(), " ".to_string(), "Epoch ".to_string()]);

        assert_eq!(filter.len(), before + 2);
        assert!(filter.is_stopword("강의"));
        assert!(filter.is_stopword("EPOCH"));
        assert!(!StopwordFilter::from_list::<&str>(&[]).is_stopword("the"));
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = StopwordFilter::builtin(Language::Korean);
        let b = StopwordFilter::builtin(Language::Korean);
        assert!(std::ptr::eq(a, b));
        assert!(a.is_stopword("및"));
    }
}
