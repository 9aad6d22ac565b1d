//! Best-effort generation of resized image derivatives.

mod encode;
mod orientation;

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::VariantSpec;
use crate::models::{GenerationOutcome, VariantIssue};
use crate::naming::variant_sibling;

/// Generate the variant matrix for a source image.
///
/// For each width in `spec.widths` this writes a downscaled copy next to the
/// source as `{base}_{width}.{ext}`, plus `{base}_{width}.webp` when
/// `spec.webp` is set. Aspect ratio is preserved, upscaling never happens,
/// and EXIF rotation is baked into the pixels so viewers that ignore the tag
/// still see the right orientation.
///
/// The call never panics and never returns an error: a missing source yields
/// an empty outcome, an invalid spec is rejected as a [`VariantIssue::Spec`]
/// diagnostic, and a failed encode for one width is recorded without
/// aborting the remaining widths.
pub fn generate_variants(source_path: &Path, spec: &VariantSpec) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    if let Err(err) = spec.validate() {
        outcome.issues.push(VariantIssue::Spec(err));
        return outcome;
    }
    if !source_path.exists() {
        return outcome;
    }

    let source = match open_normalized(source_path) {
        Ok(image) => image,
        Err(err) => {
            outcome.issues.push(VariantIssue::decode(source_path, &err));
            return outcome;
        }
    };
    let source = orientation::normalize(source, orientation::read_orientation(source_path));
    let source_ext = source_path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned());

    for &width in &spec.widths {
        let copy = scale_to_fit(source.clone(), width);

        let primary_path = variant_sibling(source_path, width, None);
        match encode::write_primary(&copy, &primary_path, source_ext.as_deref(), spec.quality) {
            Ok(()) => {
                outcome.variants.jpg.insert(width, primary_path);
            }
            Err(err) => outcome.issues.push(VariantIssue::encode(&primary_path, &err)),
        }

        if spec.webp {
            let webp_path = variant_sibling(source_path, width, Some("webp"));
            match encode::write_webp(&copy, &webp_path, spec.quality) {
                Ok(()) => {
                    outcome.variants.webp.insert(width, webp_path);
                }
                Err(err) => outcome.issues.push(VariantIssue::encode(&webp_path, &err)),
            }
        }
    }

    outcome
}

/// Decode the source once and normalize its color mode.
///
/// Anything that is not already RGB8/RGBA8 (palette, greyscale, 16-bit) is
/// converted to RGB8 so the JPEG and WebP encoders can represent it.
fn open_normalized(path: &Path) -> Result<DynamicImage> {
    let image =
        image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    })
}

/// Downscale to fit within `width × 10·width`, preserving aspect ratio.
///
/// The generous height bound only binds for extreme aspect ratios; for
/// typical photographs the width constraint decides. A source already inside
/// the box is returned untouched — upscaling never happens.
fn scale_to_fit(image: DynamicImage, width: u32) -> DynamicImage {
    let max_height = width.saturating_mul(10);
    if image.width() > width || image.height() > max_height {
        image.resize(width, max_height, FilterType::Lanczos3)
    } else {
        image
    }
}
