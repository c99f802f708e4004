//! In-memory archive of named entries, serialized as a zip container

use crate::error::{ArchiveError, DuetError};
use chrono::{Datelike, NaiveDate};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Path of the entry OCF readers expect as the first zip member
pub const MIMETYPE_PATH: &str = "mimetype";

/// Compression applied to archive entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Store entries as-is
    #[default]
    Stored,
    /// Deflate every entry except `mimetype`
    Deflated,
}

/// A single named entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub content: Vec<u8>,
}

/// Write-once mapping from archive path to bytes, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
    compression: Compression,
    modified: Option<NaiveDate>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    /// Stamp every entry with midnight of `date`
    pub fn set_modified(&mut self, date: NaiveDate) {
        self.modified = Some(date);
    }

    /// Add an entry. Each path may be added once.
    pub fn add_entry(
        &mut self,
        path: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<(), ArchiveError> {
        let path = path.into();
        if self.contains(&path) {
            return Err(ArchiveError::DuplicateEntry(path));
        }
        self.entries.push(ArchiveEntry { path, content });
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.content.as_slice())
    }

    /// Entries in the order they were added
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn timestamp(&self) -> zip::DateTime {
        self.modified
            .and_then(|date| {
                zip::DateTime::from_date_and_time(
                    date.year().clamp(1980, 2107) as u16,
                    date.month() as u8,
                    date.day() as u8,
                    0,
                    0,
                    0,
                )
                .ok()
            })
            .unwrap_or_default()
    }

    /// Serialize as a zip container. `mimetype` is written first and always
    /// stored; the rest follow in insertion order.
    pub fn write_zip<W: Write + Seek>(&self, writer: W) -> Result<W, ArchiveError> {
        let mut zip = ZipWriter::new(writer);
        let stored = FileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(self.timestamp());
        let options = match self.compression {
            Compression::Stored => stored,
            Compression::Deflated => stored.compression_method(CompressionMethod::Deflated),
        };

        let (mimetype, rest): (Vec<&ArchiveEntry>, Vec<&ArchiveEntry>) = self
            .entries
            .iter()
            .partition(|entry| entry.path == MIMETYPE_PATH);

        for entry in mimetype {
            zip.start_file(entry.path.as_str(), stored)?;
            zip.write_all(&entry.content).map_err(zip::result::ZipError::Io)?;
        }
        for entry in rest {
            zip.start_file(entry.path.as_str(), options)?;
            zip.write_all(&entry.content).map_err(zip::result::ZipError::Io)?;
        }

        Ok(zip.finish()?)
    }

    /// Serialize to an in-memory zip
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        Ok(self.write_zip(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Persist to `path` through a temporary file in the same directory, so
    /// a failed save never leaves a partial file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DuetError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        self.write_zip(temp.as_file_mut())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| ArchiveError::Persist(e.error))?;
        Ok(())
    }
}
