//! End-to-end tests for cardpress.
//!
//! Every test builds its fixtures (roster CSV, template image, photos) in a
//! fresh temp directory and asserts on the produced PDF with `lopdf`, so the
//! suite runs fully offline with no checked-in binary assets.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use cardpress::{
    generate, generate_to_file, BadgeConfig, BadgeJob, CardStatus, GenerationProgressCallback,
    PhotoError, SkipReason,
};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// A disposable workspace with a template image and a photos directory.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create fixture dir");
        let template = RgbImage::from_pixel(675, 425, Rgb([230, 230, 250]));
        template
            .save(dir.path().join("template.png"))
            .expect("save template");
        fs::create_dir(dir.path().join("photos")).expect("create photos dir");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write_roster(&self, contents: &str) -> PathBuf {
        let p = self.path().join("employees.csv");
        fs::write(&p, contents).expect("write roster");
        p
    }

    fn add_photo(&self, name: &str, w: u32, h: u32) {
        let img = RgbImage::from_pixel(w, h, Rgb([90, 120, 180]));
        img.save(self.path().join("photos").join(name))
            .expect("save photo");
    }

    fn job(&self, roster: &Path) -> BadgeJob {
        BadgeJob::new(
            roster,
            self.path().join("template.png"),
            self.path().join("photos"),
        )
    }
}

fn page_count(pdf: &[u8]) -> usize {
    lopdf::Document::load_mem(pdf)
        .expect("produced bytes must parse as PDF")
        .get_pages()
        .len()
}

fn media_box(pdf: &[u8]) -> (f64, f64) {
    let doc = lopdf::Document::load_mem(pdf).expect("parse PDF");
    let (_, first_page) = doc.get_pages().into_iter().next().expect("at least one page");
    let dict = doc
        .get_object(first_page)
        .and_then(|o| o.as_dict())
        .expect("page dict");
    let mbox = dict.get(b"MediaBox").expect("page MediaBox").as_array().expect("array");
    let num = |o: &lopdf::Object| -> f64 {
        match o {
            lopdf::Object::Integer(i) => *i as f64,
            lopdf::Object::Real(r) => *r as f64,
            other => panic!("unexpected MediaBox entry: {other:?}"),
        }
    };
    (num(&mbox[2]) - num(&mbox[0]), num(&mbox[3]) - num(&mbox[1]))
}

// ── The canonical three-record scenario ──────────────────────────────────────

#[test]
fn three_record_scenario_produces_two_pages() {
    let fx = Fixture::new();
    fx.add_photo("jane.jpg", 480, 640);
    let roster = fx.write_roster(
        "name,photo_location\n\
         Jane Doe,jane.jpg\n\
         ,bob.jpg\n\
         Cy Lee,missing.jpg\n",
    );

    let output = generate(&fx.job(&roster), &BadgeConfig::default()).expect("run completes");

    assert_eq!(page_count(&output.pdf), 2);
    assert_eq!(output.stats.total_records, 3);
    assert_eq!(output.stats.rendered_cards, 2);
    assert_eq!(output.stats.skipped_records, 1);
    assert_eq!(output.stats.cards_without_photo, 1);
    assert!(output.stats.load_error.is_none());

    // Page 1 = Jane with photo.
    assert_eq!(output.outcomes[0].name.as_deref(), Some("Jane Doe"));
    assert!(matches!(
        output.outcomes[0].status,
        CardStatus::Rendered { photo_embedded: true }
    ));

    // B produces nothing, reported as skipped on the blank name.
    assert!(matches!(
        &output.outcomes[1].status,
        CardStatus::Skipped { reason: SkipReason::BlankField(f) } if f == "name"
    ));

    // Page 2 = Cy Lee without photo, and the omission reason is recorded.
    assert_eq!(output.outcomes[2].name.as_deref(), Some("Cy Lee"));
    assert!(matches!(
        output.outcomes[2].status,
        CardStatus::Rendered { photo_embedded: false }
    ));
    assert!(matches!(
        output.outcomes[2].photo_error,
        Some(PhotoError::NotFound { .. })
    ));
}

/// Records every callback event so the wiring through the pipeline can be
/// asserted on, not just the trait methods in isolation.
#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl GenerationProgressCallback for EventLog {
    fn on_run_start(&self, total_records: usize) {
        self.push(format!("start {total_records}"));
    }

    fn on_card_rendered(&self, index: usize, name: &str, photo_embedded: bool) {
        self.push(format!("rendered {index} {name} photo={photo_embedded}"));
    }

    fn on_card_skipped(&self, index: usize, reason: &SkipReason) {
        self.push(format!("skipped {index} {reason}"));
    }

    fn on_run_complete(&self, rendered: usize, skipped: usize) {
        self.push(format!("complete {rendered} {skipped}"));
    }
}

#[test]
fn progress_callback_receives_every_pipeline_event() {
    let fx = Fixture::new();
    fx.add_photo("jane.jpg", 480, 640);
    let roster = fx.write_roster(
        "name,photo_location\n\
         Jane Doe,jane.jpg\n\
         ,bob.jpg\n\
         Cy Lee,missing.jpg\n",
    );

    let log = Arc::new(EventLog::default());
    let config = BadgeConfig::builder()
        .progress_callback(log.clone())
        .build()
        .unwrap();

    generate(&fx.job(&roster), &config).expect("run completes");

    let events = log.events.lock().unwrap();
    assert_eq!(
        *events,
        [
            "start 3",
            "rendered 0 Jane Doe photo=true",
            "skipped 1 required field 'name' is blank",
            "rendered 2 Cy Lee photo=false",
            "complete 2 1",
        ]
    );
}

// ── Degenerate inputs ────────────────────────────────────────────────────────

#[test]
fn header_only_roster_yields_zero_page_document() {
    let fx = Fixture::new();
    let roster = fx.write_roster("name,photo_location\n");

    let output = generate(&fx.job(&roster), &BadgeConfig::default()).expect("run completes");

    assert_eq!(page_count(&output.pdf), 0);
    assert_eq!(output.stats.rendered_cards, 0);
    assert_eq!(output.columns, ["name", "photo_location"]);
    assert!(output.stats.load_error.is_none());
}

#[test]
fn missing_roster_degrades_to_empty_document() {
    let fx = Fixture::new();
    let job = fx.job(&fx.path().join("no_such_roster.csv"));

    let output = generate(&job, &BadgeConfig::default()).expect("run still completes");

    assert_eq!(page_count(&output.pdf), 0);
    assert_eq!(output.stats.total_records, 0);
    let load_error = output.stats.load_error.expect("load failure recorded");
    assert!(load_error.contains("no_such_roster.csv"));
}

#[test]
fn unreadable_template_is_fatal() {
    let fx = Fixture::new();
    let roster = fx.write_roster("name,photo_location\nJane Doe,jane.jpg\n");
    let job = BadgeJob::new(
        &roster,
        fx.path().join("absent_template.png"),
        fx.path().join("photos"),
    );

    let err = generate(&job, &BadgeConfig::default()).unwrap_err();
    assert!(matches!(err, cardpress::BadgeError::TemplateUnreadable { .. }));
}

// ── Ordering and photo handling ──────────────────────────────────────────────

#[test]
fn page_order_matches_roster_order_minus_skips() {
    let fx = Fixture::new();
    for p in ["a.png", "c.png", "d.png"] {
        fx.add_photo(p, 64, 64);
    }
    let roster = fx.write_roster(
        "name,photo_location\n\
         Alice,a.png\n\
         Bob,   \n\
         Carol,c.png\n\
         Dave,d.png\n",
    );

    let output = generate(&fx.job(&roster), &BadgeConfig::default()).expect("run completes");

    assert_eq!(page_count(&output.pdf), 3);
    let rendered: Vec<&str> = output
        .outcomes
        .iter()
        .filter(|o| o.rendered())
        .map(|o| o.name.as_deref().unwrap())
        .collect();
    assert_eq!(rendered, ["Alice", "Carol", "Dave"]);
    // Indices advance over the skipped record.
    assert_eq!(
        output.outcomes.iter().map(|o| o.index).collect::<Vec<_>>(),
        [0, 1, 2, 3]
    );
}

#[test]
fn undecodable_photo_still_renders_the_card() {
    let fx = Fixture::new();
    fs::write(fx.path().join("photos").join("corrupt.jpg"), b"not an image").unwrap();
    let roster = fx.write_roster("name,photo_location\nEve,corrupt.jpg\n");

    let output = generate(&fx.job(&roster), &BadgeConfig::default()).expect("run completes");

    assert_eq!(page_count(&output.pdf), 1);
    assert!(matches!(
        output.outcomes[0].status,
        CardStatus::Rendered { photo_embedded: false }
    ));
    assert!(matches!(
        output.outcomes[0].photo_error,
        Some(PhotoError::Undecodable { .. })
    ));
}

#[test]
fn whitespace_in_fields_is_trimmed_not_fatal() {
    let fx = Fixture::new();
    fx.add_photo("jane.jpg", 64, 64);
    let roster = fx.write_roster("name,photo_location\n  Jane Doe  ,  jane.jpg  \n");

    let output = generate(&fx.job(&roster), &BadgeConfig::default()).expect("run completes");

    assert_eq!(output.stats.rendered_cards, 1);
    assert_eq!(output.outcomes[0].name.as_deref(), Some("Jane Doe"));
    assert!(matches!(
        output.outcomes[0].status,
        CardStatus::Rendered { photo_embedded: true }
    ));
}

// ── Geometry ─────────────────────────────────────────────────────────────────

#[test]
fn pages_use_configured_card_geometry() {
    let fx = Fixture::new();
    fx.add_photo("p.png", 64, 64);
    let roster = fx.write_roster("name,photo_location\nJane Doe,p.png\n");

    // Default CR80: 3.375 × 2.125 in = 243 × 153 pt.
    let output = generate(&fx.job(&roster), &BadgeConfig::default()).unwrap();
    let (w, h) = media_box(&output.pdf);
    assert!((w - 243.0).abs() < 0.5, "width {w} pt");
    assert!((h - 153.0).abs() < 0.5, "height {h} pt");

    // Geometry varies through config, no globals involved.
    let wide = BadgeConfig::builder().card_size_in(4.0, 3.0).build().unwrap();
    let output = generate(&fx.job(&roster), &wide).unwrap();
    let (w, h) = media_box(&output.pdf);
    assert!((w - 288.0).abs() < 0.5, "width {w} pt");
    assert!((h - 216.0).abs() < 0.5, "height {h} pt");
}

// ── Filesystem behaviour ─────────────────────────────────────────────────────

#[test]
fn run_leaves_no_temporary_files_behind() {
    let fx = Fixture::new();
    fx.add_photo("jane.jpg", 900, 900);
    fs::write(fx.path().join("photos").join("corrupt.jpg"), b"junk").unwrap();
    let roster = fx.write_roster(
        "name,photo_location\n\
         Jane Doe,jane.jpg\n\
         Eve,corrupt.jpg\n\
         Cy Lee,missing.jpg\n",
    );

    let listing = |dir: &Path| -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    };
    let before_root = listing(fx.path());
    let before_photos = listing(&fx.path().join("photos"));

    let output = generate(&fx.job(&roster), &BadgeConfig::default()).expect("run completes");
    assert_eq!(output.stats.rendered_cards, 3);

    // Resampled photos never touch disk, on success or failure paths.
    assert_eq!(listing(fx.path()), before_root);
    assert_eq!(listing(&fx.path().join("photos")), before_photos);
}

#[test]
fn generate_to_file_writes_atomically() {
    let fx = Fixture::new();
    fx.add_photo("jane.jpg", 64, 64);
    let roster = fx.write_roster("name,photo_location\nJane Doe,jane.jpg\n");
    let out_path = fx.path().join("out").join("id_cards.pdf");

    let output = generate_to_file(&fx.job(&roster), &out_path, &BadgeConfig::default())
        .expect("write succeeds");

    let on_disk = fs::read(&out_path).expect("output file exists");
    assert_eq!(on_disk, output.pdf);
    assert_eq!(page_count(&on_disk), 1);
    assert!(
        !out_path.with_extension("pdf.tmp").exists(),
        "temp file must be renamed away"
    );
}
