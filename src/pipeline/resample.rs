//! Photo resampling: decode a headshot and resize it to the badge's fixed
//! pixel resolution.
//!
//! ## Why Lanczos?
//!
//! Source photos arrive at arbitrary sizes — phone captures, scans, HR
//! exports — and are almost always downscaled here. Lanczos3 is the
//! highest-quality filter `image` offers for downscaling and the cost is
//! irrelevant at 300 × 300 output. The resize is `resize_exact`: an
//! asymmetric stretch, not an aspect-preserving crop, so a mildly
//! non-square source distorts slightly instead of losing part of the face.
//!
//! ## Why return an in-memory image?
//!
//! The PDF canvas accepts pixel buffers directly, so the resampled photo is
//! handed to the renderer as a `DynamicImage` and never touches disk. That
//! removes the temp-file-per-card scheme entirely — there is no file to
//! name uniquely, no deletion to guarantee on failure paths, and nothing
//! to leak.

use crate::error::PhotoError;
use image::{imageops::FilterType, DynamicImage};
use std::path::Path;
use tracing::debug;

/// Decode the image at `path` and resize it to exactly `target` pixels.
///
/// Fails distinctly when the path does not exist versus when the file
/// cannot be decoded; both are non-fatal — the caller renders the card
/// without a photo.
pub fn resample_photo(path: &Path, target: (u32, u32)) -> Result<DynamicImage, PhotoError> {
    if !path.exists() {
        return Err(PhotoError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let source = image::open(path).map_err(|e| PhotoError::Undecodable {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    // `photo_px` is a public config field, so a zero can arrive despite the
    // builder's clamp; a zero dimension would corrupt the placement math.
    let (tw, th) = (target.0.max(1), target.1.max(1));
    debug!(
        "Resampling {} ({}x{} → {}x{})",
        path.display(),
        source.width(),
        source.height(),
        tw,
        th
    );

    // RGB8 so the PDF embeds a plain 24-bit raster; badge photos have no
    // meaningful alpha and dropping it keeps one code path.
    let resized = source.resize_exact(tw, th, FilterType::Lanczos3);
    Ok(DynamicImage::ImageRgb8(resized.to_rgb8()))
}
