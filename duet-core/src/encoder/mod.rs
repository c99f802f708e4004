//! Encoders for turning a bilingual novel into an output format

mod archive;
mod documents;
mod epub;

pub use archive::{Archive, ArchiveEntry, Compression, MIMETYPE_PATH};
pub use documents::{
    encode_utf16, toc_page_name, DocumentBuilder, CONTAINER_PATH, NCX_PATH, OPF_PATH,
    STYLESHEET, STYLESHEET_NAME,
};
pub use epub::EpubExporter;

use crate::error::Result;
use crate::types::Novel;
use std::io::Write;

/// Trait for encoding novels to output formats
pub trait Encoder: Send + Sync {
    /// Encode a novel under `title` to a writer
    fn encode(&self, title: &str, novel: &Novel, writer: &mut dyn Write) -> Result<()>;

    /// Format name (e.g., "EPUB")
    fn format_name(&self) -> &str;

    /// File extension for this format
    fn file_extension(&self) -> &str;

    /// MIME type for this format
    fn mime_type(&self) -> &str;
}

/// Get an encoder by format name
pub fn encoder_for_format(format: &str) -> Option<Box<dyn Encoder>> {
    match format.to_lowercase().as_str() {
        "epub" | "epub2" => Some(Box::new(EpubExporter::new())),
        _ => None,
    }
}
