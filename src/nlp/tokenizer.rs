//! Sentence segmentation and word tokenization
//!
//! Sentence candidates come from Unicode sentence boundaries (UAX #29), which
//! already break after terminal punctuation plus trailing closers and after
//! every line break. English text then re-joins candidates that end in a
//! common abbreviation (`e.g.`, `Dr.`) or a single-letter initial.
//!
//! Words are Unicode word segments containing a letter or digit, further
//! split where Hangul meets another script, so `AI기술` gives `AI` and
//! `기술`. Hangul tokens have one trailing particle or copula ending removed
//! for counting.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Language, Sentence, Token, TokenKind};

/// Lowercased English abbreviations whose trailing period is not a boundary.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "dr", "mr", "mrs", "ms", "prof", "fig", "eq", "approx",
];

/// Trailing particles and copula/light-verb endings, longest first.
const KOREAN_ENDINGS: &[&str] = &[
    "에서는", "에게서", "으로는", "으로서", "으로써", "이라는", "이라고", "입니다", "합니다",
    "됩니다", "에서", "에게", "으로", "이다", "이며", "이고", "이란", "라는", "부터", "까지",
    "처럼", "보다", "한다", "된다", "하는", "되는", "하고", "하여", "해서", "했다", "와", "과",
    "은", "는", "이", "가", "을", "를", "의", "에", "로", "도", "만", "다",
];

/// Minimum characters left after stripping a Korean ending.
const MIN_STEM_CHARS: usize = 2;

/// Language-aware sentence and word segmenter
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    language: Language,
}

impl Segmenter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Split text into trimmed, non-empty sentences in document order.
    ///
    /// Text that yields no boundaries becomes a single sentence.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        // Start of a candidate held back by the abbreviation guard
        let mut held: Option<usize> = None;

        for (offset, piece) in text.split_sentence_bound_indices() {
            let start = held.take().unwrap_or(offset);
            let end = offset + piece.len();
            if !ends_line(piece) && self.ends_with_abbreviation(piece.trim_end()) {
                held = Some(start);
                continue;
            }
            self.push_sentence(text, start, end, &mut sentences);
        }
        if let Some(start) = held {
            self.push_sentence(text, start, text.len(), &mut sentences);
        }

        if sentences.is_empty() && !text.trim().is_empty() {
            // Degrade to one sentence holding the whole text
            let trimmed = text.trim();
            let offset = text.len() - text.trim_start().len();
            sentences.push(Sentence::new(trimmed, 0, offset, offset + trimmed.len()));
        }

        sentences
    }

    /// Tokenize every sentence, numbering tokens across the document.
    pub fn tokenize(&self, sentences: &[Sentence]) -> Vec<Token> {
        let mut tokens = Vec::new();
        for sentence in sentences {
            let offset = tokens.len();
            tokens.extend(self.tokenize_sentence(&sentence.text, sentence.index, offset));
        }
        tokens
    }

    /// Tokenize a single span into word tokens.
    pub fn tokenize_sentence(&self, text: &str, sentence_idx: usize, offset: usize) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (_, word) in text.split_word_bound_indices() {
            for run in script_runs(word) {
                let (kind, norm) = if run.chars().any(is_hangul) {
                    (TokenKind::Hangul, strip_korean_ending(run).to_string())
                } else if run.chars().any(char::is_alphabetic) {
                    (TokenKind::Latin, run.to_lowercase())
                } else {
                    (TokenKind::Numeric, run.to_string())
                };
                let token_idx = offset + tokens.len();
                tokens.push(Token::new(run, norm, kind, sentence_idx, token_idx));
            }
        }
        tokens
    }

    fn push_sentence(&self, text: &str, start: usize, end: usize, out: &mut Vec<Sentence>) {
        if start >= end {
            return;
        }
        let span = &text[start..end];
        let trimmed = span.trim();
        if trimmed.is_empty() {
            return;
        }
        let lead = span.len() - span.trim_start().len();
        let s = start + lead;
        out.push(Sentence::new(trimmed, out.len(), s, s + trimmed.len()));
    }

    /// Whether a candidate ends in `<abbreviation>.` and should run on.
    fn ends_with_abbreviation(&self, candidate: &str) -> bool {
        if self.language != Language::English {
            return false;
        }
        let Some(before) = candidate.strip_suffix('.') else {
            return false;
        };
        let word = before
            .rsplit(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("");
        if word.is_empty() {
            return false;
        }
        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            return first.is_uppercase();
        }
        ABBREVIATIONS.contains(&word.to_lowercase().as_str())
    }
}

fn ends_line(piece: &str) -> bool {
    piece.ends_with(|c: char| matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'))
}

/// Split a word segment where Hangul meets another script, keeping only
/// runs that hold a letter or digit.
fn script_runs(word: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in word.char_indices() {
        if !c.is_alphanumeric() {
            continue;
        }
        let hangul = is_hangul(c);
        match current {
            Some(prev) if prev != hangul => {
                runs.push(&word[start..idx]);
                start = idx;
            }
            None => start = idx,
            _ => {}
        }
        current = Some(hangul);
    }
    if current.is_some() {
        runs.push(&word[start..]);
    }
    runs
}

/// Split text into sentences with the given language rules.
pub fn segment(text: &str, language: Language) -> Vec<Sentence> {
    Segmenter::new(language).segment(text)
}

/// Remove one trailing particle or ending from a Hangul word.
pub fn strip_korean_ending(word: &str) -> &str {
    for ending in KOREAN_ENDINGS {
        if let Some(stem) = word.strip_suffix(ending) {
            if stem.chars().count() >= MIN_STEM_CHARS {
                return stem;
            }
        }
    }
    word
}

/// Hangul syllables and jamo blocks.
pub fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7AF}' |
        '\u{1100}'..='\u{11FF}' |
        '\u{3130}'..='\u{318F}' |
        '\u{A960}'..='\u{A97F}' |
        '\u{D7B0}'..='\u{D7FF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "인공지능은 컴퓨터 과학의 한 분야이다. 머신러닝은 인공지능의 핵심 기술이다. 딥러닝은 신경망 기반 기술이다.";

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_korean_sentences() {
        let sentences = segment(SAMPLE, Language::Korean);
        assert_eq!(
            texts(&sentences),
            vec![
                "인공지능은 컴퓨터 과학의 한 분야이다.",
                "머신러닝은 인공지능의 핵심 기술이다.",
                "딥러닝은 신경망 기반 기술이다."
            ]
        );
        for (i, s) in sentences.iter().enumerate() {
            assert_eq!(s.index, i);
            assert_eq!(&SAMPLE[s.start..s.end], s.text);
        }
    }

    #[test]
    fn test_english_sentences_and_abbreviations() {
        let text = "Gradient descent is common, e.g. in training. Is it fast? Yes! Dr. Kim says so.";
        let sentences = segment(text, Language::English);
        assert_eq!(
            texts(&sentences),
            vec![
                "Gradient descent is common, e.g. in training.",
                "Is it fast?",
                "Yes!",
                "Dr. Kim says so."
            ]
        );
    }

    #[test]
    fn test_decimal_is_not_boundary() {
        let sentences = segment("The rate is 0.01 here. Next.", Language::English);
        assert_eq!(texts(&sentences), vec!["The rate is 0.01 here.", "Next."]);
    }

    #[test]
    fn test_newlines_split_and_blank_lines_dropped() {
        let sentences = segment("제목\n\n  \n본문 내용입니다\n끝", Language::Korean);
        assert_eq!(texts(&sentences), vec!["제목", "본문 내용입니다", "끝"]);
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        let sentences = segment("He said \"stop.\" Then left.", Language::English);
        assert_eq!(texts(&sentences), vec!["He said \"stop.\"", "Then left."]);
    }

    #[test]
    fn test_no_terminal_is_single_sentence() {
        let sentences = segment("  just a fragment without end  ", Language::English);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "just a fragment without end");
    }

    #[test]
    fn test_empty_text() {
        assert!(segment("", Language::Korean).is_empty());
        assert!(segment(" \n\t ", Language::English).is_empty());
    }

    #[test]
    fn test_mixed_script_tokens() {
        let seg = Segmenter::new(Language::Korean);
        let tokens = seg.tokenize_sentence("AI기술은 GPU 2024년에 발전했다.", 0, 0);
        let surfaces: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(surfaces, vec!["AI", "기술은", "GPU", "2024", "년에", "발전했다"]);

        assert_eq!(tokens[0].kind, TokenKind::Latin);
        assert_eq!(tokens[0].norm, "ai");
        assert_eq!(tokens[1].kind, TokenKind::Hangul);
        assert_eq!(tokens[1].norm, "기술");
        assert_eq!(tokens[3].kind, TokenKind::Numeric);
        assert_eq!(tokens[5].norm, "발전");
    }

    #[test]
    fn test_strip_korean_ending() {
        assert_eq!(strip_korean_ending("인공지능은"), "인공지능");
        assert_eq!(strip_korean_ending("과학의"), "과학");
        assert_eq!(strip_korean_ending("분야이다"), "분야");
        assert_eq!(strip_korean_ending("학교에서"), "학교");
        // Too short to strip
        assert_eq!(strip_korean_ending("나는"), "나는");
        assert_eq!(strip_korean_ending("한"), "한");
    }

    #[test]
    fn test_tokenize_numbers_tokens_across_sentences() {
        let seg = Segmenter::new(Language::Korean);
        let sentences = seg.segment(SAMPLE);
        let tokens = seg.tokenize(&sentences);

        assert_eq!(tokens.len(), 13);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.token_idx, i);
        }
        assert_eq!(tokens.last().unwrap().sentence_idx, 2);
    }

    #[test]
    fn test_punctuation_is_not_a_token() {
        let seg = Segmenter::new(Language::English);
        assert_eq!(seg.tokenize_sentence("Hello, world! It's 2024.", 0, 0).len(), 4);
        assert!(seg.tokenize_sentence(" -- ... ", 0, 0).is_empty());
    }

    #[test]
    fn test_word_segments_keep_inner_punctuation() {
        let seg = Segmenter::new(Language::English);
        let tokens = seg.tokenize_sentence("It's 3.5 times faster, e.g. here.", 0, 0);
        let surfaces: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(surfaces, vec!["It's", "3.5", "times", "faster", "e.g", "here"]);
        assert_eq!(tokens[0].norm, "it's");
        assert_eq!(tokens[1].kind, TokenKind::Numeric);
    }

    #[test]
    fn test_abbreviation_before_capital_runs_on() {
        let text = "Use a framework, e.g. PyTorch. Prof. Lee and J. Smith agree.";
        let sentences = segment(text, Language::English);
        assert_eq!(
            texts(&sentences),
            vec!["Use a framework, e.g. PyTorch.", "Prof. Lee and J. Smith agree."]
        );
    }

    #[test]
    fn test_abbreviation_guard_is_english_only() {
        let sentences = segment("Dr. Kim. 다음 문장.", Language::Korean);
        assert_eq!(texts(&sentences), vec!["Dr.", "Kim.", "다음 문장."]);
    }

    #[test]
    fn test_crlf_and_cjk_terminals() {
        let sentences = segment("첫 줄\r\n둘째 문장이다。셋째", Language::Korean);
        assert_eq!(texts(&sentences), vec!["첫 줄", "둘째 문장이다。", "셋째"]);
    }
}
