//! Note discovery and reading
//!
//! Finds lecture-note files under a directory and reads them as text.

use std::path::{Path, PathBuf};

use encoding_rs::{EUC_KR, UTF_8, WINDOWS_1252};
use walkdir::WalkDir;

use crate::errors::{DigestError, Result};
use crate::types::{Document, Language};

/// Extensions scanned when none are given.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".txt", ".md"];

/// Normalize extensions to lowercase without the leading dot.
///
/// Empty entries are dropped, so `" .TXT, md,"` gives `["txt", "md"]`.
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Split a comma-separated extension list, e.g. `".txt,.md"`.
pub fn parse_extensions(list: &str) -> Vec<String> {
    normalize_extensions(&list.split(',').collect::<Vec<_>>())
}

/// Recursively collect regular files under `dir` whose extension matches
/// one of `extensions` (case-insensitive, leading dot optional).
///
/// Paths are returned sorted. Entries that cannot be read are skipped with
/// a warning.
pub fn scan_notes<S: AsRef<str>>(dir: impl AsRef<Path>, extensions: &[S]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(DigestError::NotesDirMissing(dir.to_path_buf()));
    }
    let wanted = normalize_extensions(extensions);

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| wanted.iter().any(|w| w.eq_ignore_ascii_case(ext)))
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    tracing::debug!(dir = %dir.display(), found = files.len(), "scanned notes");
    Ok(files)
}

/// Read a note as text.
///
/// Decoding tries UTF-8 (a leading BOM is dropped), then EUC-KR with the
/// CP949 extensions, then Windows-1252, which accepts any byte sequence.
/// A non-UTF-8 decode is logged with the encoding that succeeded.
pub fn read_note(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DigestError::io(path, e))?;
    Ok(decode_note(path, &bytes))
}

fn decode_note(path: &Path, bytes: &[u8]) -> String {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
    ) {
        return text.into_owned();
    }
    for encoding in [EUC_KR, WINDOWS_1252] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            tracing::warn!(
                path = %path.display(),
                encoding = encoding.name(),
                "note is not valid UTF-8, decoded with fallback encoding"
            );
            return text.into_owned();
        }
    }
    // Windows-1252 maps every byte
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// Read a note into a [`Document`] whose source is the file stem.
pub fn load_document(path: impl AsRef<Path>, language: Language) -> Result<Document> {
    let path = path.as_ref();
    let text = read_note(path)?;
    Ok(Document::new(note_stem(path), text, language))
}

/// File stem used to name a note's digest.
pub fn note_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "note".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_extensions() {
        assert_eq!(parse_extensions(" .TXT, md,"), vec!["txt", "md"]);
        assert_eq!(normalize_extensions(&DEFAULT_EXTENSIONS), vec!["txt", "md"]);
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("week2")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.MD"), "a").unwrap();
        fs::write(dir.path().join("week2").join("c.md"), "c").unwrap();
        fs::write(dir.path().join("skip.pdf"), "x").unwrap();

        let files = scan_notes(dir.path(), &DEFAULT_EXTENSIONS).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.MD"),
                PathBuf::from("b.txt"),
                PathBuf::from("week2").join("c.md"),
            ]
        );
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_notes(&missing, &["txt"]),
            Err(DigestError::NotesDirMissing(_))
        ));
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_notes(dir.path(), &["txt"]).unwrap().is_empty());
    }

    #[test]
    fn test_read_note_cp949() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");
        let (bytes, _, unmappable) = EUC_KR.encode("인공지능은 컴퓨터 과학의 한 분야이다.");
        assert!(!unmappable);
        assert!(std::str::from_utf8(&bytes).is_err());
        fs::write(&path, &bytes).unwrap();

        assert_eq!(read_note(&path).unwrap(), "인공지능은 컴퓨터 과학의 한 분야이다.");
    }

    #[test]
    fn test_read_note_latin_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        // 0xFF is neither UTF-8 nor an EUC-KR lead byte
        fs::write(&path, b"ok \xFF end").unwrap();
        assert_eq!(read_note(&path).unwrap(), "ok \u{FF} end");
    }

    #[test]
    fn test_read_note_drops_utf8_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.md");
        fs::write(&path, "\u{FEFF}딥러닝 개요").unwrap();
        assert_eq!(read_note(&path).unwrap(), "딥러닝 개요");
    }

    #[test]
    fn test_load_document_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture01.md");
        fs::write(&path, "인공지능 개요").unwrap();

        let doc = load_document(&path, Language::Korean).unwrap();
        assert_eq!(doc.source, "lecture01");
        assert_eq!(doc.text, "인공지능 개요");
    }
}
