//! Generation entry points: the orchestrator that owns the output document
//! and the per-record loop.
//!
//! ## Error policy
//!
//! The run favours best-effort completion over hard failure. An unreadable
//! roster degrades to zero records; an invalid record is skipped; a missing
//! or broken photo downgrades to a card without a headshot. Each of those
//! is reported (tracing + run report), never thrown. Only conditions that
//! make the *document itself* impossible — unreadable template, failed PDF
//! serialisation, unwritable output path — return `Err`.

use crate::config::BadgeConfig;
use crate::error::BadgeError;
use crate::outcome::{CardOutcome, CardStatus, GenerationOutput, RunStats};
use crate::pipeline::compose::{CardRenderer, PhotoStep};
use crate::pipeline::roster::{self, Roster};
use printpdf::PdfDocument;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// The fixed-at-call-time input paths for one generation run.
///
/// Deliberately plain data — no environment variables, no persisted state.
#[derive(Debug, Clone)]
pub struct BadgeJob {
    /// Employee CSV with a header row (`name`, `photo_location`, …).
    pub roster: PathBuf,
    /// Background template image, stretched onto every card.
    pub template: PathBuf,
    /// Directory each record's `photo_location` is resolved against.
    pub photo_dir: PathBuf,
}

impl BadgeJob {
    pub fn new(
        roster: impl Into<PathBuf>,
        template: impl Into<PathBuf>,
        photo_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            roster: roster.into(),
            template: template.into(),
            photo_dir: photo_dir.into(),
        }
    }
}

/// Generate the badge document in memory.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(GenerationOutput)` on best-effort completion — including runs where
/// the roster could not be read at all (`stats.load_error` is set and the
/// PDF has zero pages).
///
/// # Errors
/// Returns `Err(BadgeError)` only for fatal conditions:
/// - background template missing or undecodable
/// - PDF serialisation failure
pub fn generate(job: &BadgeJob, config: &BadgeConfig) -> Result<GenerationOutput, BadgeError> {
    let total_start = Instant::now();
    info!("Starting badge generation from {}", job.roster.display());

    // ── Step 1: Open the output document ────────────────────────────────
    // `PdfDocument::empty` starts with no pages, so a run with zero valid
    // records really does produce a zero-page document.
    let doc = PdfDocument::empty(config.doc_title.as_str());
    let renderer = CardRenderer::new(&doc, &job.template, config)?;

    // ── Step 2: Load the roster ──────────────────────────────────────────
    // A load failure is reported and downgraded to an empty roster; the
    // run continues and produces an empty document.
    let (roster, load_error) = match roster::load_records(&job.roster) {
        Ok(r) => (r, None),
        Err(e) => {
            warn!("{e}");
            (
                Roster {
                    columns: Vec::new(),
                    records: Vec::new(),
                },
                Some(e.to_string()),
            )
        }
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(roster.records.len());
    }

    // ── Step 3: Per-record loop ──────────────────────────────────────────
    // The index advances for skipped records too, so outcome indices always
    // equal roster positions.
    let mut outcomes: Vec<CardOutcome> = Vec::with_capacity(roster.records.len());
    for (index, record) in roster.records.iter().enumerate() {
        match record.validate() {
            Err(reason) => {
                warn!("Skipping record {index}: {reason}");
                if let Some(ref cb) = config.progress_callback {
                    cb.on_card_skipped(index, &reason);
                }
                outcomes.push(CardOutcome {
                    index,
                    name: record.name().map(str::to_string),
                    status: CardStatus::Skipped { reason },
                    photo_error: None,
                });
            }
            Ok(()) => {
                // Validation guarantees both fields are present and non-blank.
                let name = record.name().unwrap_or_default();
                let photo_path = job.photo_dir.join(record.photo_location().unwrap_or_default());
                info!(
                    "Generating card for {} using photo {}",
                    name,
                    photo_path.display()
                );

                let (photo_embedded, photo_error) =
                    match renderer.render_card(name, &photo_path) {
                        PhotoStep::Embedded => (true, None),
                        PhotoStep::Omitted(e) => (false, Some(e)),
                    };

                if let Some(ref cb) = config.progress_callback {
                    cb.on_card_rendered(index, name, photo_embedded);
                }
                outcomes.push(CardOutcome {
                    index,
                    name: Some(name.to_string()),
                    status: CardStatus::Rendered { photo_embedded },
                    photo_error,
                });
            }
        }
    }

    // ── Step 4: Finalise the document exactly once ──────────────────────
    let pdf = doc
        .save_to_bytes()
        .map_err(|e| BadgeError::Pdf(e.to_string()))?;

    // ── Step 5: Compute stats ────────────────────────────────────────────
    let rendered = outcomes.iter().filter(|o| o.rendered()).count();
    let skipped = outcomes.len() - rendered;
    let without_photo = outcomes
        .iter()
        .filter(|o| matches!(o.status, CardStatus::Rendered { photo_embedded: false }))
        .count();

    let stats = RunStats {
        total_records: outcomes.len(),
        rendered_cards: rendered,
        skipped_records: skipped,
        cards_without_photo: without_photo,
        load_error,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(rendered, skipped);
    }
    info!(
        "Generation complete: {}/{} cards, {}ms",
        rendered, stats.total_records, stats.total_duration_ms
    );

    Ok(GenerationOutput {
        pdf,
        columns: roster.columns,
        outcomes,
        stats,
    })
}

/// Generate the badge document and write it to `output_path`.
///
/// Uses an atomic write (temp file + rename) so a failed run never leaves a
/// truncated PDF behind.
pub fn generate_to_file(
    job: &BadgeJob,
    output_path: impl AsRef<Path>,
    config: &BadgeConfig,
) -> Result<GenerationOutput, BadgeError> {
    let output = generate(job, config)?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BadgeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let tmp_path = path.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, &output.pdf).map_err(|e| BadgeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| BadgeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("ID cards written to {}", path.display());
    Ok(output)
}
