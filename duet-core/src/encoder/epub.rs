//! EPUB 2 export of a bilingual novel

use super::archive::{Archive, Compression, MIMETYPE_PATH};
use super::documents::{
    encode_utf16, toc_page_name, DocumentBuilder, CONTAINER_PATH, NCX_PATH, OPF_PATH,
    STYLESHEET, STYLESHEET_NAME,
};
use crate::config::ExportOptions;
use crate::error::{DuetError, Result};
use crate::identifier::Isbn;
use crate::types::{ManifestEntry, Novel};
use std::io::Write;
use std::path::Path;

const EPUB_MIME: &str = "application/epub+zip";

/// Exporter producing a store-only EPUB 2 package
#[derive(Debug, Clone, Default)]
pub struct EpubExporter {
    options: ExportOptions,
}

impl EpubExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export `novel` to `destination`. The destination's file stem is the
    /// book title and the seed of the package identifier.
    pub fn export(&self, destination: impl AsRef<Path>, novel: &Novel) -> Result<()> {
        let destination = destination.as_ref();
        let title = destination
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| DuetError::InvalidDestination(destination.display().to_string()))?;

        let archive = self.assemble(title, novel)?;
        archive.save(destination)?;

        tracing::info!(
            "Exported '{}' ({} entries) -> {}",
            title,
            archive.len(),
            destination.display()
        );
        Ok(())
    }

    /// Build every archive entry for `novel` without touching the filesystem.
    ///
    /// Entries are added as: chapter pages, TOC page, NCX, OPF, stylesheet,
    /// container descriptor, mimetype.
    pub fn assemble(&self, title: &str, novel: &Novel) -> Result<Archive> {
        let isbn = Isbn::synthesize(title)?;
        let date = self.options.resolve_date();
        let builder = DocumentBuilder::new(title, isbn.as_str(), &self.options.profile, date);

        let mut archive = Archive::new();
        archive.set_compression(Compression::Stored);
        archive.set_modified(date);

        let mut entries: Vec<ManifestEntry> = Vec::new();
        for (index, chapter) in novel.iter().enumerate() {
            let sequence = index + 1;
            let page = match builder.chapter(sequence, chapter) {
                Ok(Some(page)) => page,
                Ok(None) => {
                    tracing::debug!("Skipping blank chapter {}", sequence);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Rejecting chapter {}: {}", sequence, e);
                    return Err(e.into());
                }
            };

            let entry = ManifestEntry::new(sequence, isbn.as_str(), &chapter.original.title);
            tracing::debug!("Adding chapter {} as {}", sequence, entry.file_name);
            archive.add_entry(oebps(&entry.file_name), encode_utf16(&page))?;
            entries.push(entry);
        }

        archive.add_entry(
            oebps(&toc_page_name(isbn.as_str())),
            encode_utf16(&builder.toc_page(&entries)),
        )?;
        archive.add_entry(NCX_PATH, encode_utf16(&builder.ncx(&entries)))?;
        archive.add_entry(OPF_PATH, encode_utf16(&builder.opf(&entries)))?;
        archive.add_entry(oebps(STYLESHEET_NAME), encode_utf16(STYLESHEET))?;
        archive.add_entry(CONTAINER_PATH, encode_utf16(&builder.container()))?;
        archive.add_entry(MIMETYPE_PATH, EPUB_MIME.as_bytes().to_vec())?;

        tracing::info!(
            "Assembled '{}' as {} with {} of {} chapters",
            title,
            isbn,
            entries.len(),
            novel.len()
        );
        Ok(archive)
    }
}

/// Archive path of a file in the content directory
fn oebps(file_name: &str) -> String {
    format!("OEBPS/{file_name}")
}

impl super::Encoder for EpubExporter {
    fn encode(&self, title: &str, novel: &Novel, writer: &mut dyn Write) -> Result<()> {
        let bytes = self.assemble(title, novel)?.to_bytes()?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn format_name(&self) -> &str {
        "EPUB"
    }

    fn file_extension(&self) -> &str {
        "epub"
    }

    fn mime_type(&self) -> &str {
        EPUB_MIME
    }
}
