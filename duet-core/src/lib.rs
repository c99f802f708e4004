//! Duet Core Library
//!
//! Exports a bilingual novel (chapters pairing an original text with its
//! translation) as a single EPUB 2 package. The package identifier is a
//! synthetic ISBN derived from the book title.

pub mod config;
pub mod encoder;
pub mod error;
pub mod identifier;
pub mod types;

pub use config::{ExportOptions, PackageProfile};
pub use encoder::{Archive, Encoder, EpubExporter};
pub use error::{ArchiveError, ContentError, DuetError, IdentifierError, Result};
pub use identifier::{checksum_digit, stable_hash, synthesize_isbn, Isbn};
pub use types::{Chapter, ManifestEntry, Novel, TextBlock};

/// Export `novel` to `destination` with default options
pub fn export(destination: impl AsRef<std::path::Path>, novel: &Novel) -> Result<()> {
    EpubExporter::new().export(destination, novel)
}
