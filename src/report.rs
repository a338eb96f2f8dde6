//! Markdown digest report
//!
//! Renders a [`SummaryResult`] as a Markdown document and writes it next to
//! other digests as `<stem>_summary.md`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{DigestError, Result};
use crate::summarizer::SummaryResult;

/// How many key concepts the report lists.
pub const KEY_CONCEPT_LIMIT: usize = 15;

/// File name suffix of written reports.
pub const REPORT_SUFFIX: &str = "_summary.md";

/// Markdown view of a digest.
///
/// Sentence, keyword and topic sections only appear when populated; the
/// statistics block is always present.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownReport<'a> {
    title: &'a str,
    result: &'a SummaryResult,
}

impl<'a> MarkdownReport<'a> {
    pub fn new(title: &'a str, result: &'a SummaryResult) -> Self {
        Self { title, result }
    }
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f, "# {} 요약", self.title)?;
        writeln!(f)?;

        if !result.sentences.is_empty() {
            writeln!(f, "## 핵심 내용 요약")?;
            writeln!(f)?;
            writeln!(f, "{}", result.sentence_text())?;
            writeln!(f)?;
        }

        if !result.core_keywords.is_empty() {
            writeln!(f, "## 키워드 요약")?;
            writeln!(f)?;
            for keyword in &result.core_keywords {
                writeln!(f, "- **{}** (빈도: {})", keyword.text, keyword.frequency)?;
            }
            if !result.secondary_keywords.is_empty() {
                let rest: Vec<&str> = result
                    .secondary_keywords
                    .iter()
                    .map(|k| k.text.as_str())
                    .collect();
                writeln!(f, "- **주요 키워드**: {}", rest.join(", "))?;
            }
            writeln!(f)?;
        }

        if result.topics.iter().any(|b| !b.is_empty()) {
            writeln!(f, "## 주제별 키워드")?;
            writeln!(f)?;
            for bucket in result.topics.iter().filter(|b| !b.is_empty()) {
                writeln!(f, "### {}", bucket.topic.label())?;
                let members: Vec<&str> = bucket.keywords.iter().map(|k| k.text.as_str()).collect();
                writeln!(f, "{}", members.join(", "))?;
                writeln!(f)?;
            }
        }

        let concepts = result.key_concepts(KEY_CONCEPT_LIMIT);
        if !concepts.is_empty() {
            writeln!(f, "## 핵심 개념")?;
            writeln!(f)?;
            for (i, concept) in concepts.iter().enumerate() {
                writeln!(f, "{}. **{}**", i + 1, concept)?;
            }
            writeln!(f)?;
        }

        let stats = &result.statistics;
        writeln!(f, "## 요약 통계")?;
        writeln!(f)?;
        writeln!(f, "- **원문 문장 수**: {}개", stats.sentence_count)?;
        writeln!(f, "- **원문 단어 수**: {}개", stats.word_count)?;
        writeln!(f, "- **원문 문자 수**: {}자", stats.char_count)?;
        writeln!(f, "- **요약 문장 수**: {}개", stats.summary_sentence_count)?;
        writeln!(f, "- **압축률**: {}", stats.compression_percent())?;

        if result.keywords().next().is_some() {
            writeln!(f)?;
            writeln!(f, "## 상세 키워드 목록")?;
            writeln!(f)?;
            for (i, keyword) in result.keywords().enumerate() {
                writeln!(f, "{}. **{}** (중요도: {:.3})", i + 1, keyword.text, keyword.score)?;
            }
        }
        Ok(())
    }
}

/// Render `result` as Markdown under the heading `title`.
pub fn render_markdown(title: &str, result: &SummaryResult) -> String {
    MarkdownReport::new(title, result).to_string()
}

/// Writes digest reports into one output directory.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    out_dir: PathBuf,
}

impl MarkdownWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path the report for `stem` is written to.
    pub fn report_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{stem}{REPORT_SUFFIX}"))
    }

    /// Write the report for `stem`, creating the output directory if
    /// needed. Returns the written path.
    pub fn write(&self, stem: &str, result: &SummaryResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.out_dir).map_err(|e| DigestError::io(&self.out_dir, e))?;
        let path = self.report_path(stem);
        std::fs::write(&path, render_markdown(stem, result))
            .map_err(|e| DigestError::io(&path, e))?;
        tracing::info!(path = %path.display(), "wrote digest");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DigestPipeline, NoopObserver, SummaryConfig};
    use crate::types::{Document, Language, SummaryType};

    const LECTURE: &str = "Binary search halves the search range. \
        Binary search requires sorted input. \
        The search algorithm runs in logarithmic time.";

    fn digest(summary_type: SummaryType) -> SummaryResult {
        let config = SummaryConfig::default()
            .with_language(Language::English)
            .with_summary_type(summary_type)
            .with_core_count(2);
        DigestPipeline::new(&config).run(
            &Document::new("search", LECTURE, Language::English),
            &mut NoopObserver,
        )
    }

    #[test]
    fn test_mixed_report_sections() {
        let md = render_markdown("search", &digest(SummaryType::Mixed));

        assert!(md.starts_with("# search 요약\n"));
        assert!(md.contains("## 핵심 내용 요약"));
        assert!(md.contains("## 키워드 요약"));
        assert!(md.contains("- **search** (빈도: 4)\n- **binary** (빈도: 2)\n- **주요 키워드**: "));
        assert!(!md.contains("기타"));
        assert!(md.contains("## 주제별 키워드"));
        assert!(md.contains("### 기술/방법\nalgorithm"));
        assert!(md.contains("## 핵심 개념"));
        assert!(md.contains("## 요약 통계"));
        assert!(md.contains("- **원문 문장 수**: 3개"));
        assert!(md.contains("## 상세 키워드 목록"));
        assert!(md.contains("1. **search** (중요도: 4.000)"));
    }

    #[test]
    fn test_sentences_report_omits_keyword_sections() {
        let md = render_markdown("search", &digest(SummaryType::Sentences));

        assert!(md.contains("## 핵심 내용 요약"));
        assert!(!md.contains("## 키워드 요약"));
        assert!(!md.contains("## 주제별 키워드"));
        assert!(!md.contains("## 상세 키워드 목록"));
        assert!(md.contains("## 요약 통계"));
    }

    #[test]
    fn test_keywords_report_omits_sentences() {
        let md = render_markdown("search", &digest(SummaryType::Keywords));

        assert!(!md.contains("## 핵심 내용 요약"));
        assert!(md.contains("## 키워드 요약"));
        assert!(md.contains("- **요약 문장 수**: 0개"));
    }

    #[test]
    fn test_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownWriter::new(dir.path().join("digests"));
        let result = digest(SummaryType::Mixed);

        let path = writer.write("week1", &result).unwrap();
        assert_eq!(path, dir.path().join("digests").join("week1_summary.md"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_markdown("week1", &result));
    }
}
