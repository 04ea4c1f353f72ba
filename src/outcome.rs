//! Structured run report: per-card outcomes and run statistics.
//!
//! The original console-only reporting ("Skipping invalid record: …") is
//! preserved as tracing output, but every condition is also captured here as
//! a typed, serialisable value so callers and tests can branch on what
//! happened to each record instead of scraping log text.

use crate::error::PhotoError;
use serde::{Deserialize, Serialize};

/// Why a roster record was skipped without emitting a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// A required column is absent from the record entirely.
    MissingField(String),
    /// The field exists but is empty after trimming.
    BlankField(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingField(field) => write!(f, "missing required field '{field}'"),
            SkipReason::BlankField(field) => write!(f, "required field '{field}' is blank"),
        }
    }
}

/// What happened to one roster record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CardStatus {
    /// A page was appended to the document.
    Rendered {
        /// Whether a headshot was drawn. `false` means the photo was
        /// missing or undecodable; see `photo_error` on the outcome.
        photo_embedded: bool,
    },
    /// Validation failed; no page was emitted.
    Skipped { reason: SkipReason },
}

/// Per-record outcome, in roster order.
///
/// Indices are 0-based roster positions and advance over skipped records,
/// so `index` of a rendered card does not generally equal its page number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardOutcome {
    /// 0-based position of the record in the roster.
    pub index: usize,
    /// Trimmed employee name, if the record carried one.
    pub name: Option<String>,
    pub status: CardStatus,
    /// Set when the card rendered but its photo could not be used.
    pub photo_error: Option<PhotoError>,
}

impl CardOutcome {
    /// True when this record produced a page.
    pub fn rendered(&self) -> bool {
        matches!(self.status, CardStatus::Rendered { .. })
    }
}

/// Aggregate statistics for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Rows found in the roster (0 when loading failed).
    pub total_records: usize,
    /// Pages emitted — equals the number of valid records.
    pub rendered_cards: usize,
    /// Records dropped by validation.
    pub skipped_records: usize,
    /// Rendered cards whose photo was missing or undecodable.
    pub cards_without_photo: usize,
    /// Set when the roster itself could not be read; the run still
    /// completes with an empty document.
    pub load_error: Option<String>,
    /// Wall-clock duration of the whole run in milliseconds.
    pub total_duration_ms: u64,
}

/// Everything a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The serialised PDF document.
    pub pdf: Vec<u8>,
    /// Column names discovered in the roster header (diagnostic).
    pub columns: Vec<String>,
    /// One outcome per roster record, in input order.
    pub outcomes: Vec<CardOutcome>,
    pub stats: RunStats,
}

impl GenerationOutput {
    /// The machine-readable run report: everything except the PDF bytes.
    ///
    /// Used by the CLI's `--json` flag.
    pub fn report(&self) -> RunReport<'_> {
        RunReport {
            columns: &self.columns,
            outcomes: &self.outcomes,
            stats: &self.stats,
        }
    }
}

/// Serialisable view over a [`GenerationOutput`] without the PDF payload.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub columns: &'a [String],
    pub outcomes: &'a [CardOutcome],
    pub stats: &'a RunStats,
}
