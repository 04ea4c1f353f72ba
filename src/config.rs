//! Configuration types for badge generation.
//!
//! All geometry and layout is controlled through [`BadgeConfig`], built via
//! its [`BadgeConfigBuilder`]. The card size, photo resolution, and text
//! position were once hard-coded constants; keeping them in one immutable
//! struct passed to every component means tests can vary the geometry
//! without touching shared state, and two runs can be diffed by serialising
//! their configs.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on the
//! documented defaults (standard CR80 ID-card geometry) for the rest.

use crate::error::BadgeError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimetres per inch; layout fields are specified in inches (the printing
/// convention) and converted once at draw time.
pub const MM_PER_INCH: f64 = 25.4;

/// Configuration for a badge-generation run.
///
/// Built via [`BadgeConfig::builder()`] or using [`BadgeConfig::default()`].
///
/// # Example
/// ```rust
/// use cardpress::BadgeConfig;
///
/// let config = BadgeConfig::builder()
///     .card_size_in(3.375, 2.125)
///     .photo_px(300, 300)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Card (and page) width in inches. Default: 3.375 — CR80 ID-card width.
    pub card_width_in: f64,

    /// Card (and page) height in inches. Default: 2.125 — CR80 ID-card height.
    ///
    /// Every page in the output document has exactly these dimensions; the
    /// background template is stretched to fill them.
    pub card_height_in: f64,

    /// Target pixel size every headshot is resampled to. Default: (300, 300).
    ///
    /// Both dimensions must be ≥ 1; the builder clamps, and the resampler
    /// re-clamps in case the field was mutated directly.
    ///
    /// 300 px at 300 DPI prints as one inch. Resampling is an asymmetric
    /// stretch, not an aspect-preserving crop — source photos are expected
    /// to be roughly square already, and a slight stretch beats cropping a
    /// face out of frame.
    pub photo_px: (u32, u32),

    /// Left/bottom offset of the photo sub-rectangle, in inches.
    /// Default: (1.9, 0.73).
    pub photo_offset_in: (f64, f64),

    /// Drawn size of the photo sub-rectangle, in inches. Default: (1.1, 1.1).
    pub photo_size_in: (f64, f64),

    /// Left/bottom baseline position of the name text, in inches.
    /// Default: (0.25, 0.22).
    pub name_offset_in: (f64, f64),

    /// Point size of the name text. Default: 12.0, Helvetica-Bold.
    pub name_size_pt: f64,

    /// Title written into the PDF document metadata.
    pub doc_title: String,

    /// Optional progress callback fired per card.
    ///
    /// `None` (the default) means no progress events; the CLI injects an
    /// indicatif-backed implementation here.
    #[serde(skip)]
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            card_width_in: 3.375,
            card_height_in: 2.125,
            photo_px: (300, 300),
            photo_offset_in: (1.9, 0.73),
            photo_size_in: (1.1, 1.1),
            name_offset_in: (0.25, 0.22),
            name_size_pt: 12.0,
            doc_title: "Employee ID Cards".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BadgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeConfig")
            .field("card_width_in", &self.card_width_in)
            .field("card_height_in", &self.card_height_in)
            .field("photo_px", &self.photo_px)
            .field("photo_offset_in", &self.photo_offset_in)
            .field("photo_size_in", &self.photo_size_in)
            .field("name_offset_in", &self.name_offset_in)
            .field("name_size_pt", &self.name_size_pt)
            .field("doc_title", &self.doc_title)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl BadgeConfig {
    /// Create a new builder for `BadgeConfig`.
    pub fn builder() -> BadgeConfigBuilder {
        BadgeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Card width in millimetres (the unit the PDF layer works in).
    pub fn card_width_mm(&self) -> f64 {
        self.card_width_in * MM_PER_INCH
    }

    /// Card height in millimetres.
    pub fn card_height_mm(&self) -> f64 {
        self.card_height_in * MM_PER_INCH
    }
}

/// Builder for [`BadgeConfig`].
#[derive(Debug)]
pub struct BadgeConfigBuilder {
    config: BadgeConfig,
}

impl BadgeConfigBuilder {
    pub fn card_size_in(mut self, width: f64, height: f64) -> Self {
        self.config.card_width_in = width;
        self.config.card_height_in = height;
        self
    }

    pub fn photo_px(mut self, width: u32, height: u32) -> Self {
        self.config.photo_px = (width.max(1), height.max(1));
        self
    }

    pub fn photo_offset_in(mut self, x: f64, y: f64) -> Self {
        self.config.photo_offset_in = (x, y);
        self
    }

    pub fn photo_size_in(mut self, width: f64, height: f64) -> Self {
        self.config.photo_size_in = (width, height);
        self
    }

    pub fn name_offset_in(mut self, x: f64, y: f64) -> Self {
        self.config.name_offset_in = (x, y);
        self
    }

    pub fn name_size_pt(mut self, pt: f64) -> Self {
        self.config.name_size_pt = pt;
        self
    }

    pub fn doc_title(mut self, title: impl Into<String>) -> Self {
        self.config.doc_title = title.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BadgeConfig, BadgeError> {
        let c = &self.config;
        if c.card_width_in <= 0.0 || c.card_height_in <= 0.0 {
            return Err(BadgeError::InvalidConfig(format!(
                "Card size must be positive, got {} × {} in",
                c.card_width_in, c.card_height_in
            )));
        }
        if c.name_size_pt <= 0.0 {
            return Err(BadgeError::InvalidConfig(format!(
                "Name text size must be positive, got {} pt",
                c.name_size_pt
            )));
        }
        Ok(self.config)
    }
}
