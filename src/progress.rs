//! Progress-callback trait for per-card generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::BadgeConfigBuilder::progress_callback`] to receive
//! events as the pipeline processes each roster record.
//!
//! # Why callbacks instead of channels?
//!
//! The callback is the least-invasive integration point: callers can forward
//! events to a terminal progress bar, a log file, or a GUI without the
//! library knowing how the host application communicates. Generation is
//! strictly sequential today, but the trait is `Send + Sync` so a future
//! parallel renderer would not need an API break.

use std::sync::Arc;

use crate::outcome::SkipReason;

/// Called by the generation pipeline as it processes each roster record.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once after the roster is loaded, before any card is rendered.
    ///
    /// # Arguments
    /// * `total_records` — number of rows found in the roster (including
    ///   rows that will later fail validation)
    fn on_run_start(&self, total_records: usize) {
        let _ = total_records;
    }

    /// Called when a record's card has been appended to the document.
    ///
    /// # Arguments
    /// * `index`          — 0-based record index in roster order
    /// * `name`           — trimmed employee name as printed on the card
    /// * `photo_embedded` — whether a headshot was drawn
    fn on_card_rendered(&self, index: usize, name: &str, photo_embedded: bool) {
        let _ = (index, name, photo_embedded);
    }

    /// Called when a record fails validation and produces no page.
    fn on_card_skipped(&self, index: usize, reason: &SkipReason) {
        let _ = (index, reason);
    }

    /// Called once after every record has been attempted.
    ///
    /// # Arguments
    /// * `rendered` — pages actually emitted
    /// * `skipped`  — records that failed validation
    fn on_run_complete(&self, rendered: usize, skipped: usize) {
        let _ = (rendered, skipped);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BadgeConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;
