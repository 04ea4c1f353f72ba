//! Error types for the cardpress library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`BadgeError`] — **Fatal**: the run cannot proceed at all (unreadable
//!   background template, unwritable output path, invalid configuration).
//!   Returned as `Err(BadgeError)` from the top-level `generate*` functions.
//!
//! * [`PhotoError`] — **Non-fatal**: one record's photo could not be used
//!   (file missing, undecodable image). The card is still rendered, just
//!   without a photo, and the condition is recorded in the per-card
//!   [`crate::outcome::CardOutcome`].
//!
//! Everything else — a missing roster file, a row with a blank required
//! field — is deliberately *not* an error: the generator favours best-effort
//! completion, and those conditions surface as typed outcomes the caller can
//! inspect instead of exceptions that would abort the batch.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the cardpress library.
///
/// Per-record conditions use [`PhotoError`] / [`crate::outcome::SkipReason`]
/// and are stored in the run report rather than propagated here.
#[derive(Debug, Error)]
pub enum BadgeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Roster CSV could not be opened or parsed.
    ///
    /// Note: the orchestrator treats this as "zero records" and still
    /// produces an (empty) document; it only reaches the caller through
    /// [`crate::outcome::RunStats::load_error`].
    #[error("Failed to read roster '{path}': {detail}")]
    RosterUnreadable { path: PathBuf, detail: String },

    /// Background template image missing or undecodable.
    ///
    /// The template is drawn on every page, so this is detected once at run
    /// start instead of failing identically on each card.
    #[error("Background template '{path}' could not be loaded: {detail}")]
    TemplateUnreadable { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The PDF backend rejected an operation (font registration,
    /// document serialisation).
    #[error("PDF document error: {0}")]
    Pdf(String),

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal, per-card photo failure.
///
/// The renderer converts either variant into "card rendered without a photo".
/// The two causes are kept distinct here so the run report can tell them
/// apart, even though the user-facing message treats them the same.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PhotoError {
    /// The resolved photo path does not exist.
    #[error("photo file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// The file exists but could not be decoded as an image.
    #[error("photo '{path}' could not be decoded: {detail}")]
    Undecodable { path: PathBuf, detail: String },
}
