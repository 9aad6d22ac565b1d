//! EXIF orientation handling.
//!
//! Variants are re-encoded without metadata, so the rotation recorded in the
//! source's `Orientation` tag must be baked into the pixels or thumbnails
//! would display sideways in viewers that honored the tag on the original.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag};
use image::DynamicImage;

/// Read the EXIF `Orientation` value (1-8) from a file, defaulting to 1
/// (no transform) when the file has no readable EXIF segment.
pub(crate) fn read_orientation(path: &Path) -> u32 {
    let Ok(file) = File::open(path) else {
        return 1;
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return 1;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1)
}

/// Apply an EXIF orientation value to the image pixels.
pub(crate) fn normalize(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

    use super::normalize;

    fn fixture() -> DynamicImage {
        // Single red pixel at the top-left of a 30x10 black image.
        let mut image = RgbImage::new(30, 10);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        DynamicImage::ImageRgb8(image)
    }

    #[test]
    fn identity_orientations_leave_the_image_alone() {
        assert_eq!(normalize(fixture(), 1).dimensions(), (30, 10));
        assert_eq!(normalize(fixture(), 0).dimensions(), (30, 10));
        assert_eq!(normalize(fixture(), 9).dimensions(), (30, 10));
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        for orientation in [5, 6, 7, 8] {
            assert_eq!(
                normalize(fixture(), orientation).dimensions(),
                (10, 30),
                "orientation {orientation}"
            );
        }
    }

    #[test]
    fn rotate_90_moves_the_corner_pixel() {
        let rotated = normalize(fixture(), 6);
        assert_eq!(rotated.get_pixel(9, 0), image::Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn horizontal_flip_mirrors_the_corner_pixel() {
        let flipped = normalize(fixture(), 2);
        assert_eq!(flipped.get_pixel(29, 0), image::Rgba([255, 0, 0, 255]));
    }
}
