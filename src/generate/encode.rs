//! Per-format encoders for variant output files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

/// Write the primary variant in the source's own encoding.
///
/// The format is picked from the source extension, case-insensitively, with
/// JPEG as the fallback for unrecognized extensions. Quality applies to the
/// lossy formats; others encode with their defaults.
pub(crate) fn write_primary(
    image: &DynamicImage,
    path: &Path,
    source_ext: Option<&str>,
    quality: u8,
) -> Result<()> {
    let format = source_ext
        .and_then(|ext| ImageFormat::from_extension(ext.to_ascii_lowercase()))
        .unwrap_or(ImageFormat::Jpeg);
    match format {
        ImageFormat::Jpeg => write_jpeg(image, path, quality),
        ImageFormat::WebP => write_webp(image, path, quality),
        other => image
            .save_with_format(path, other)
            .with_context(|| format!("failed to write {}", path.display())),
    }
}

fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<()> {
    // JPEG has no alpha channel.
    let flattened;
    let image = match image {
        DynamicImage::ImageRgba8(_) => {
            flattened = DynamicImage::ImageRgb8(image.to_rgb8());
            &flattened
        }
        _ => image,
    };

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
        .with_context(|| format!("failed to encode {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Write a lossy WebP variant at the given quality.
pub(crate) fn write_webp(image: &DynamicImage, path: &Path, quality: u8) -> Result<()> {
    let encoder = webp::Encoder::from_image(image)
        .map_err(|reason| anyhow!("webp encoder rejected input: {reason}"))?;
    let encoded = encoder.encode(f32::from(quality));
    std::fs::write(path, &*encoded)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
