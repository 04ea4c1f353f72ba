//! Roster loading: parse the employee CSV into field-name → value records.
//!
//! The header row defines field names; each data row becomes a [`Record`]
//! keyed by those names, so extra columns flow through untouched and the
//! two required fields are looked up by name rather than position. The
//! discovered column list is kept on the [`Roster`] for diagnostics —
//! "why was my column ignored" is the most common support question for
//! tools like this, and echoing the header answers it immediately.

use crate::error::BadgeError;
use crate::outcome::SkipReason;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Required roster columns; both must be present and non-blank after
/// trimming for a record to produce a card.
pub const REQUIRED_FIELDS: [&str; 2] = ["name", "photo_location"];

/// One employee's field-name → value mapping, sourced from one CSV row.
#[derive(Debug, Clone)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Build a record directly from field pairs (used by tests).
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw field value, if the column exists.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value trimmed of surrounding whitespace, if non-empty.
    pub fn trimmed_field(&self, name: &str) -> Option<&str> {
        self.field(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Trimmed employee name, if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        self.trimmed_field("name")
    }

    /// Trimmed photo path (relative to the photo directory), if present
    /// and non-blank.
    pub fn photo_location(&self) -> Option<&str> {
        self.trimmed_field("photo_location")
    }

    /// Check the two required fields; returns the first violation found.
    pub fn validate(&self) -> Result<(), SkipReason> {
        for field in REQUIRED_FIELDS {
            match self.field(field) {
                None => return Err(SkipReason::MissingField(field.to_string())),
                Some(v) if v.trim().is_empty() => {
                    return Err(SkipReason::BlankField(field.to_string()))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// A parsed roster: the discovered columns plus all data rows.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Column names from the header row, in file order.
    pub columns: Vec<String>,
    /// One record per data row, in file order.
    pub records: Vec<Record>,
}

/// Load and parse the roster CSV.
///
/// Returns a typed error on any I/O or parse failure; the orchestrator
/// downgrades that to "zero records" so the run still completes, but the
/// failure stays inspectable in the run report rather than being swallowed.
pub fn load_records(path: &Path) -> Result<Roster, BadgeError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| BadgeError::RosterUnreadable {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| BadgeError::RosterUnreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();
    info!("Roster columns: {:?}", columns);

    let mut records = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        let fields = row.map_err(|e| BadgeError::RosterUnreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        records.push(Record { fields });
    }

    debug!("Loaded {} roster records", records.len());
    Ok(Roster { columns, records })
}
