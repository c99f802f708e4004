//! Export record for one produced chapter

/// Ties a produced chapter's sequence number, file name, title and
/// manifest id together so every aggregate document agrees on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based position of the chapter in the input sequence
    pub sequence: usize,

    /// File name relative to `OEBPS/`, e.g. `9780010000009c000001.xhtml`
    pub file_name: String,

    /// Original-language chapter title
    pub title: String,

    /// Manifest and spine id, e.g. `c000001`
    pub id: String,
}

impl ManifestEntry {
    /// Build the record for the chapter at `sequence`, naming its file
    /// after the package identifier.
    pub fn new(sequence: usize, isbn: &str, title: impl Into<String>) -> Self {
        let id = chapter_id(sequence);
        Self {
            sequence,
            file_name: format!("{isbn}{id}.xhtml"),
            title: title.into(),
            id,
        }
    }
}

/// Zero-padded chapter identifier for a 1-based sequence number
pub fn chapter_id(sequence: usize) -> String {
    format!("c{sequence:06}")
}
