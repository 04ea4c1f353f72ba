//! Card composition: draw one badge page onto the PDF document.
//!
//! Each card is three draw operations at fixed positions — background
//! template stretched to the full card, resampled headshot in its
//! sub-rectangle, employee name in Helvetica-Bold — followed by a page
//! break. Layout is entirely position-driven from [`BadgeConfig`], never
//! computed from content size.
//!
//! The background template is decoded once when the renderer is built and
//! re-embedded per page. An unreadable template would fail every single
//! card the same way, so it is a fatal error at construction time rather
//! than a per-card warning.

use crate::config::{BadgeConfig, MM_PER_INCH};
use crate::error::{BadgeError, PhotoError};
use crate::pipeline::resample;
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocumentReference,
    PdfLayerReference,
};
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of the photo step for one card.
///
/// Either way the card itself renders; the variants only record whether a
/// headshot made it onto the page.
#[derive(Debug)]
pub enum PhotoStep {
    Embedded,
    Omitted(PhotoError),
}

/// Renders badge pages onto a shared PDF document.
pub struct CardRenderer<'a> {
    doc: &'a PdfDocumentReference,
    config: &'a BadgeConfig,
    font: IndirectFontRef,
    template: DynamicImage,
}

impl<'a> CardRenderer<'a> {
    /// Decode the background template and register the name font.
    pub fn new(
        doc: &'a PdfDocumentReference,
        template_path: &Path,
        config: &'a BadgeConfig,
    ) -> Result<Self, BadgeError> {
        let template = image::open(template_path).map_err(|e| BadgeError::TemplateUnreadable {
            path: template_path.to_path_buf(),
            detail: e.to_string(),
        })?;
        // Flatten to RGB8: the template fills the card, so transparency
        // has nothing to show through to.
        let template = DynamicImage::ImageRgb8(template.to_rgb8());
        debug!(
            "Template loaded: {} ({}x{} px)",
            template_path.display(),
            template.width(),
            template.height()
        );

        let font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| BadgeError::Pdf(e.to_string()))?;

        Ok(Self {
            doc,
            config,
            font,
            template,
        })
    }

    /// Append exactly one badge page for `name`, embedding the photo at
    /// `photo_path` when it can be resampled.
    ///
    /// `name` is expected pre-trimmed (validation already guarantees it is
    /// non-blank). A missing or undecodable photo downgrades to a card
    /// without a headshot — the two causes are logged identically on
    /// purpose; the returned [`PhotoStep`] keeps the distinction for the
    /// run report.
    pub fn render_card(&self, name: &str, photo_path: &Path) -> PhotoStep {
        let c = self.config;
        // Layout is held in f64 inches; printpdf's geometry types are f32,
        // so all conversions happen here at the drawing boundary.
        let (page, layer) = self.doc.add_page(
            Mm(c.card_width_mm() as f32),
            Mm(c.card_height_mm() as f32),
            "card",
        );
        let layer = self.doc.get_page(page).get_layer(layer);

        // Background, stretched to exactly fill the card from the origin.
        self.draw_image(
            &layer,
            &self.template,
            (0.0, 0.0),
            (c.card_width_in, c.card_height_in),
        );

        // Photo, when usable.
        let photo_step = match resample::resample_photo(photo_path, c.photo_px) {
            Ok(photo) => {
                self.draw_image(&layer, &photo, c.photo_offset_in, c.photo_size_in);
                PhotoStep::Embedded
            }
            Err(e) => {
                warn!("No photo drawn: {e}");
                PhotoStep::Omitted(e)
            }
        };

        let (name_x, name_y) = c.name_offset_in;
        layer.use_text(
            name,
            c.name_size_pt as f32,
            Mm((name_x * MM_PER_INCH) as f32),
            Mm((name_y * MM_PER_INCH) as f32),
            &self.font,
        );

        photo_step
    }

    /// Embed `img` so it covers the rectangle at `offset_in` sized
    /// `size_in` (both in inches from the bottom-left page origin).
    fn draw_image(
        &self,
        layer: &PdfLayerReference,
        img: &DynamicImage,
        offset_in: (f64, f64),
        size_in: (f64, f64),
    ) {
        let transform = fit_transform(img.width(), img.height(), offset_in, size_in);
        Image::from_dynamic_image(img).add_to_layer(layer.clone(), transform);
    }
}

/// Anchor DPI for embedded images; scale factors are computed against it.
const EMBED_DPI: f64 = 300.0;

/// Compute the transform that stretches a `px_w` × `px_h` image onto the
/// target rectangle, independent of the source pixel dimensions.
///
/// printpdf places an image at `px / dpi` inches; scaling by
/// `target_in * dpi / px` therefore lands it at exactly `target_in` inches.
fn fit_transform(px_w: u32, px_h: u32, offset_in: (f64, f64), size_in: (f64, f64)) -> ImageTransform {
    ImageTransform {
        translate_x: Some(Mm((offset_in.0 * MM_PER_INCH) as f32)),
        translate_y: Some(Mm((offset_in.1 * MM_PER_INCH) as f32)),
        scale_x: Some((size_in.0 * EMBED_DPI / px_w as f64) as f32),
        scale_y: Some((size_in.1 * EMBED_DPI / px_h as f64) as f32),
        dpi: Some(EMBED_DPI as f32),
        ..Default::default()
    }
}
