//! Core types for the bilingual novel and its export records

mod manifest;
mod novel;

pub use manifest::{chapter_id, ManifestEntry};
pub use novel::{Chapter, Novel, TextBlock};
