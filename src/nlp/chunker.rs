//! Sentence-aligned chunking
//!
//! Groups whole sentences into chunks of at most `chunk_size` characters.
//! Chunk size is measured as the member sentences joined by single spaces.
//! A sentence is never split; one longer than `chunk_size` forms its own
//! oversized chunk.

use crate::types::Sentence;

/// An ordered, borrowed run of a document's sentences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a> {
    /// Position of this chunk in the document
    pub index: usize,
    /// Member sentences, in document order
    pub sentences: &'a [Sentence],
}

impl<'a> Chunk<'a> {
    /// Characters in the member sentences joined by single spaces.
    pub fn char_len(&self) -> usize {
        joined_len(self.sentences)
    }

    /// Member sentences joined by single spaces.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Index of the first sentence in the document.
    pub fn first_sentence(&self) -> Option<usize> {
        self.sentences.first().map(|s| s.index)
    }
}

/// Lazy iterator over the chunks of a sentence slice
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    sentences: &'a [Sentence],
    chunk_size: usize,
    next_index: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sentences.is_empty() {
            return None;
        }

        // Always take at least one sentence
        let mut len = self.sentences[0].char_len();
        let mut take = 1;
        for sentence in &self.sentences[1..] {
            let next_len = len + 1 + sentence.char_len();
            if next_len > self.chunk_size {
                break;
            }
            len = next_len;
            take += 1;
        }

        let (head, rest) = self.sentences.split_at(take);
        self.sentences = rest;
        let chunk = Chunk {
            index: self.next_index,
            sentences: head,
        };
        self.next_index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.sentences.is_empty() {
            (0, Some(0))
        } else {
            (1, Some(self.sentences.len()))
        }
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}

/// Chunk sentences greedily into runs of at most `chunk_size` characters.
///
/// `chunk_size` is expected to be positive; zero puts every sentence in its
/// own chunk.
pub fn chunk(sentences: &[Sentence], chunk_size: usize) -> Chunks<'_> {
    Chunks {
        sentences,
        chunk_size,
        next_index: 0,
    }
}

fn joined_len(sentences: &[Sentence]) -> usize {
    let chars: usize = sentences.iter().map(Sentence::char_len).sum();
    chars + sentences.len().saturating_sub(1)
}
