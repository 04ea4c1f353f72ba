//! CLI binary for cardpress.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! [`BadgeJob`] + [`BadgeConfig`] and prints the run summary.

use anyhow::{Context, Result};
use cardpress::{
    generate_to_file, BadgeConfig, BadgeJob, GenerationProgressCallback, SkipReason,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar tick per roster record, with a
/// per-card log line above the bar.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} records",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Generating");
        Arc::new(Self { bar })
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_records: usize) {
        self.bar.set_length(total_records as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_records} roster records…"))
        ));
    }

    fn on_card_rendered(&self, index: usize, name: &str, photo_embedded: bool) {
        let note = if photo_embedded {
            dim("photo embedded")
        } else {
            yellow("no photo")
        };
        self.bar.println(format!(
            "  {} Card {:>3}  {:<24} {}",
            green("✓"),
            index + 1,
            name,
            note
        ));
        self.bar.inc(1);
    }

    fn on_card_skipped(&self, index: usize, reason: &SkipReason) {
        self.bar.println(format!(
            "  {} Card {:>3}  {}",
            yellow("⊘"),
            index + 1,
            yellow(&format!("skipped — {reason}"))
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _rendered: usize, _skipped: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic run: roster + template, PDF next to the roster
  cardpress employees.csv --template id_template.png

  # Photos live in their own directory
  cardpress employees.csv -t id_template.png -p profile_photos -o badges.pdf

  # Structured run report for scripting
  cardpress employees.csv -t id_template.png --json > report.json

  # Non-standard card stock
  cardpress employees.csv -t tag.png --card-width 4.0 --card-height 3.0

ROSTER FORMAT:
  UTF-8 CSV with a header row. Required columns: name, photo_location.
  Extra columns are ignored. photo_location is resolved relative to
  --photo-dir. Rows with a blank required field are skipped (no page);
  rows whose photo file is missing still get a card, without a photo.

EXIT STATUS:
  0  run completed (even with skipped records or missing photos)
  1  fatal error: unreadable template, unwritable output, bad config
"#;

/// Generate printable employee ID badge PDFs from a CSV roster.
#[derive(Parser, Debug)]
#[command(
    name = "cardpress",
    version,
    about = "Generate printable employee ID badge PDFs from a CSV roster",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Employee roster CSV (header row with name, photo_location).
    roster: PathBuf,

    /// Background template image drawn on every card.
    #[arg(short, long, env = "CARDPRESS_TEMPLATE")]
    template: PathBuf,

    /// Directory photo_location values are resolved against.
    #[arg(short, long, env = "CARDPRESS_PHOTO_DIR", default_value = ".")]
    photo_dir: PathBuf,

    /// Output PDF path.
    #[arg(short, long, env = "CARDPRESS_OUTPUT", default_value = "id_cards.pdf")]
    output: PathBuf,

    /// Card width in inches.
    #[arg(long, default_value_t = 3.375)]
    card_width: f64,

    /// Card height in inches.
    #[arg(long, default_value_t = 2.125)]
    card_height: f64,

    /// Square pixel size headshots are resampled to.
    #[arg(long, default_value_t = 300)]
    photo_px: u32,

    /// PDF document title.
    #[arg(long, default_value = "Employee ID Cards")]
    title: String,

    /// Print the structured run report as JSON to stdout.
    #[arg(long, env = "CARDPRESS_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "CARDPRESS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CARDPRESS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CARDPRESS_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build job + config ───────────────────────────────────────────────
    let job = BadgeJob::new(&cli.roster, &cli.template, &cli.photo_dir);

    let mut builder = BadgeConfig::builder()
        .card_size_in(cli.card_width, cli.card_height)
        .photo_px(cli.photo_px, cli.photo_px)
        .doc_title(cli.title.as_str());
    if show_progress {
        builder = builder.progress_callback(CliProgressCallback::new());
    }
    let config = builder.build().context("Invalid card configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let output = generate_to_file(&job, &cli.output, &config)
        .with_context(|| format!("Badge generation failed for {}", cli.roster.display()))?;

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output.report())?);
        return Ok(());
    }

    if !cli.quiet {
        let s = &output.stats;
        if let Some(ref load_error) = s.load_error {
            eprintln!("{} {}", yellow("⚠"), load_error);
        }
        eprintln!(
            "{} {} cards written to {}  {}",
            green("✔"),
            bold(&s.rendered_cards.to_string()),
            cli.output.display(),
            dim(&format!(
                "({} skipped, {} without photo, {}ms)",
                s.skipped_records, s.cards_without_photo, s.total_duration_ms
            ))
        );
    }

    Ok(())
}
