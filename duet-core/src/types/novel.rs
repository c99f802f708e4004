//! Novel, chapter and text block types handed to the exporter

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Matches the three conventional line breaks, longest first.
fn line_break() -> &'static Regex {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK.get_or_init(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"))
}

/// A titled block of multi-line text in one language
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    /// Block title
    pub title: String,

    /// Body text with embedded CRLF, CR or LF line breaks
    pub content: String,
}

impl TextBlock {
    /// Create a new text block
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Split the content on every line break. Empty lines are kept, so
    /// `""` yields one empty line and `"a\n"` yields `["a", ""]`.
    pub fn lines(&self) -> Vec<&str> {
        line_break().split(&self.content).collect()
    }

    /// Whether the content is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A chapter pairing the original text with its translation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    pub original: TextBlock,
    pub translation: TextBlock,
}

impl Chapter {
    /// Create a new chapter from its two text blocks
    pub fn new(original: TextBlock, translation: TextBlock) -> Self {
        Self {
            original,
            translation,
        }
    }
}

/// An ordered sequence of bilingual chapters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Novel {
    pub chapters: Vec<Chapter>,
}

impl Novel {
    /// Create an empty novel
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a novel from its JSON representation
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a chapter to the end of the novel
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// Builder-style variant of [`Novel::add_chapter`]
    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }
}

impl<'a> IntoIterator for &'a Novel {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.iter()
    }
}

impl FromIterator<Chapter> for Novel {
    fn from_iter<I: IntoIterator<Item = Chapter>>(iter: I) -> Self {
        Self {
            chapters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_on_all_breaks() {
        let block = TextBlock::new("t", "one\r\ntwo\rthree\nfour");
        assert_eq!(block.lines(), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_lines_keep_empty_entries() {
        assert_eq!(TextBlock::new("t", "").lines(), vec![""]);
        assert_eq!(TextBlock::new("t", "a\n\nb\n").lines(), vec!["a", "", "b", ""]);
        // "\n\r" is two breaks, not one
        assert_eq!(TextBlock::new("t", "a\n\rb").lines(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_blank_detection() {
        assert!(TextBlock::new("t", "").is_blank());
        assert!(TextBlock::new("t", " \r\n\t ").is_blank());
        assert!(!TextBlock::new("t", " x ").is_blank());
    }

    #[test]
    fn test_novel_serialization() {
        let novel = Novel::new().with_chapter(Chapter::new(
            TextBlock::new("Chapter 1", "Hello"),
            TextBlock::new("Chapitre 1", "Bonjour"),
        ));
        let json = serde_json::to_string(&novel).unwrap();
        let parsed = Novel::from_json(&json).unwrap();
        assert_eq!(parsed, novel);
        assert_eq!(parsed.len(), 1);
    }
}
