//! # cardpress
//!
//! Generate printable employee ID badge PDFs from CSV rosters.
//!
//! ## Why this crate?
//!
//! Badge printing is a recurring chore: HR exports a spreadsheet, somebody
//! opens a design tool, and an afternoon disappears. cardpress turns the
//! spreadsheet straight into a print-ready PDF — one fixed-size CR80 card
//! (3.375 × 2.125 in) per employee, composited from a background template,
//! a resampled headshot, and the employee's name. Bad rows and missing
//! photos never abort the batch; they are skipped or downgraded and
//! reported in a structured run report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! roster.csv
//!  │
//!  ├─ 1. Load      parse header + rows into field-name → value records
//!  ├─ 2. Validate  require non-blank `name` and `photo_location` per row
//!  ├─ 3. Resample  decode headshot, Lanczos-resize to 300×300 (in memory)
//!  ├─ 4. Compose   draw template, photo, name onto one page per record
//!  └─ 5. Save      serialise the document once, atomically
//! ```
//!
//! Processing is strictly sequential and single-pass; the output page order
//! equals roster order minus skipped records.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardpress::{generate_to_file, BadgeConfig, BadgeJob};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let job = BadgeJob::new("employees.csv", "id_template.png", "photos");
//!     let output = generate_to_file(&job, "id_cards.pdf", &BadgeConfig::default())?;
//!     eprintln!(
//!         "{} cards rendered, {} skipped",
//!         output.stats.rendered_cards, output.stats.skipped_records
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `cardpress` binary (clap + anyhow + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! cardpress = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod outcome;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BadgeConfig, BadgeConfigBuilder};
pub use error::{BadgeError, PhotoError};
pub use generate::{generate, generate_to_file, BadgeJob};
pub use outcome::{CardOutcome, CardStatus, GenerationOutput, RunStats, SkipReason};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
