//! Export options

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed package metadata written into the OPF document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackageProfile {
    /// `dc:creator`
    pub creator: String,

    /// `dc:publisher`
    pub publisher: String,

    /// `dc:language` (ISO 639-1)
    pub language: String,
}

impl Default for PackageProfile {
    fn default() -> Self {
        Self {
            creator: "zunwno".to_string(),
            publisher: "ZT".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Options for a single export
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportOptions {
    pub profile: PackageProfile,

    /// Publication date. `None` uses today's local date.
    pub date: Option<NaiveDate>,
}

impl ExportOptions {
    /// Load options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pin the publication date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// The date to stamp on this export
    pub fn resolve_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}
