//! Keyword-density sentence scoring and selection
//!
//! A sentence scores the sum of the document-level scores of the distinct
//! keywords it contains, divided by its word count so long sentences are
//! not favoured just for being long. Selection takes the best sentences
//! (earlier position wins ties) and returns them in document order.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::nlp::chunker::Chunk;
use crate::nlp::tokenizer::Segmenter;
use crate::types::{Keyword, Language, Sentence};

/// Sentences selected for a summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Selected sentences in document order
    pub sentences: Vec<Sentence>,
    /// Sum of the selected sentences' scores
    pub total_score: f64,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Selected sentences joined by single spaces.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Keyword-density sentence scorer
#[derive(Debug, Clone, Default)]
pub struct SentenceScorer {
    segmenter: Segmenter,
}

impl SentenceScorer {
    pub fn new(language: Language) -> Self {
        Self {
            segmenter: Segmenter::new(language),
        }
    }

    /// Score every sentence of a chunk, returning scored copies.
    pub fn score_chunk(&self, chunk: Chunk<'_>, keywords: &[Keyword]) -> Vec<Sentence> {
        let weights = weight_table(keywords);
        chunk
            .sentences
            .iter()
            .map(|s| self.scored(s, &weights))
            .collect()
    }

    /// Score a single sentence against a keyword list.
    pub fn score_sentence(&self, sentence: &Sentence, keywords: &[Keyword]) -> f64 {
        self.score_with(sentence, &weight_table(keywords))
    }

    /// Score all sentences and select at most `summary_sentences`.
    pub fn score_and_select(
        &self,
        sentences: &[Sentence],
        keywords: &[Keyword],
        summary_sentences: usize,
    ) -> Selection {
        let weights = weight_table(keywords);
        let scored: Vec<Sentence> = sentences.iter().map(|s| self.scored(s, &weights)).collect();
        select(scored, summary_sentences)
    }

    fn scored(&self, sentence: &Sentence, weights: &FxHashMap<&str, f64>) -> Sentence {
        let mut scored = sentence.clone();
        scored.score = self.score_with(sentence, weights);
        scored
    }

    fn score_with(&self, sentence: &Sentence, weights: &FxHashMap<&str, f64>) -> f64 {
        let tokens = self
            .segmenter
            .tokenize_sentence(&sentence.text, sentence.index, 0);
        if tokens.is_empty() {
            return 0.0;
        }

        let present: FxHashSet<&str> = tokens.iter().map(|t| t.norm.as_str()).collect();
        let total: f64 = present.iter().filter_map(|term| weights.get(term)).sum();
        total / tokens.len() as f64
    }
}

/// Pick the `summary_sentences` best-scored sentences, in document order.
///
/// Ties on score go to the earlier sentence. With fewer sentences than the
/// cap, every sentence is returned.
pub fn select(mut scored: Vec<Sentence>, summary_sentences: usize) -> Selection {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    scored.truncate(summary_sentences);
    scored.sort_by_key(|s| s.index);

    let total_score = scored.iter().map(|s| s.score).sum();
    Selection {
        sentences: scored,
        total_score,
    }
}

fn weight_table(keywords: &[Keyword]) -> FxHashMap<&str, f64> {
    keywords.iter().map(|k| (k.text.as_str(), k.score)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::chunker::chunk;
    use crate::nlp::tokenizer::segment;

    fn kw(text: &str, score: f64) -> Keyword {
        let mut k = Keyword::new(text, score as usize, 0);
        k.score = score;
        k
    }

    fn make_sentences() -> Vec<Sentence> {
        segment(
            "Machine learning is a subset of AI. \
             Deep learning uses neural networks. \
             AI is transforming industries. \
             Weather was nice.",
            Language::English,
        )
    }

    #[test]
    fn test_density_normalization() {
        let scorer = SentenceScorer::new(Language::English);
        let keywords = vec![kw("learning", 2.0), kw("ai", 2.0)];
        let sentences = make_sentences();

        // "Machine learning is a subset of AI" has 7 tokens, both keywords
        let s0 = scorer.score_sentence(&sentences[0], &keywords);
        assert!((s0 - 4.0 / 7.0).abs() < 1e-9);

        // "AI is transforming industries" has 4 tokens, one keyword
        let s2 = scorer.score_sentence(&sentences[2], &keywords);
        assert!((s2 - 2.0 / 4.0).abs() < 1e-9);

        assert_eq!(scorer.score_sentence(&sentences[3], &keywords), 0.0);
    }

    #[test]
    fn test_keyword_counted_once_per_sentence() {
        let scorer = SentenceScorer::new(Language::English);
        let sentence = Sentence::new("data data data", 0, 0, 14);
        let score = scorer.score_sentence(&sentence, &[kw("data", 3.0)]);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_selection_in_document_order() {
        let scorer = SentenceScorer::new(Language::English);
        let keywords = vec![kw("ai", 3.0), kw("industries", 1.0), kw("networks", 1.0)];
        let sentences = make_sentences();

        let selection = scorer.score_and_select(&sentences, &keywords, 2);
        assert_eq!(selection.len(), 2);

        // Sentence 2 scores highest, sentence 0 second; output is re-sorted
        let indices: Vec<_> = selection.sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(selection.total_score > 0.0);
    }

    #[test]
    fn test_ties_go_to_earlier_sentence() {
        let scored = vec![
            Sentence { score: 1.0, ..Sentence::new("a", 0, 0, 1) },
            Sentence { score: 2.0, ..Sentence::new("b", 1, 2, 3) },
            Sentence { score: 2.0, ..Sentence::new("c", 2, 4, 5) },
            Sentence { score: 2.0, ..Sentence::new("d", 3, 6, 7) },
        ];
        let selection = select(scored, 2);
        let texts: Vec<_> = selection.sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[test]
    fn test_fewer_sentences_than_cap() {
        let scorer = SentenceScorer::new(Language::English);
        let sentences = make_sentences();
        let selection = scorer.score_and_select(&sentences, &[], 10);

        assert_eq!(selection.len(), sentences.len());
        assert_eq!(selection.text(), sentences.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_score_chunk_matches_whole_document() {
        let scorer = SentenceScorer::new(Language::English);
        let keywords = vec![kw("learning", 2.0), kw("ai", 2.0)];
        let sentences = make_sentences();

        let per_chunk: Vec<Sentence> = chunk(&sentences, 40)
            .flat_map(|c| scorer.score_chunk(c, &keywords))
            .collect();
        assert_eq!(per_chunk.len(), sentences.len());

        let merged = select(per_chunk, 2);
        let whole = scorer.score_and_select(&sentences, &keywords, 2);
        assert_eq!(merged, whole);
    }

    #[test]
    fn test_empty_input() {
        let scorer = SentenceScorer::new(Language::Korean);
        let selection = scorer.score_and_select(&[], &[], 5);
        assert!(selection.is_empty());
        assert_eq!(selection.total_score, 0.0);
    }
}
