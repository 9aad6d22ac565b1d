//! The shared naming convention linking an original asset to its variants.
//!
//! There is no manifest or database tying a derivative back to its source;
//! the filename pattern `{base}_{width}.{ext}` IS the durable link. The
//! generator (filesystem side) and the renderer (URL side) both derive names
//! through [`variant_url`], so the two computations cannot drift apart.

use std::path::{Path, PathBuf};

/// Derive the variant name for an original asset reference at a given width.
///
/// The reference may be a public URL or a bare file name; only the final
/// path segment is inspected. With `ext` of `None` the original extension is
/// kept (`/media/foo.jpg` → `/media/foo_800.jpg`); an explicit `ext`
/// replaces it (`/media/foo.jpg` + `"webp"` → `/media/foo_800.webp`).
///
/// An empty reference yields an empty string. The function is pure: it never
/// touches the filesystem and never checks that the named variant exists.
pub fn variant_url(original: &str, width: u32, ext: Option<&str>) -> String {
    if original.is_empty() {
        return String::new();
    }
    let (base, orig_ext) = split_extension(original);
    match ext {
        Some(ext) => format!("{base}_{width}.{ext}"),
        None => format!("{base}_{width}{orig_ext}"),
    }
}

/// Filesystem-side counterpart of [`variant_url`]: the path the generator
/// writes a variant to, next to its source file.
///
/// Defined by delegation to [`variant_url`] on the file name so the
/// generator and the URL resolver share one pattern computation.
pub fn variant_sibling(path: &Path, width: u32, ext: Option<&str>) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(variant_url(&name, width, ext))
}

/// Split a reference into `(base, extension)` where the extension starts at
/// the last `.` of the final path segment and includes the dot.
///
/// A dot-run at the start of the segment does not open an extension, so
/// `.env` has none and `archive.tar.gz` splits at `.gz`.
fn split_extension(reference: &str) -> (&str, &str) {
    let segment_start = reference.rfind('/').map_or(0, |slash| slash + 1);
    let segment = &reference[segment_start..];
    match segment.rfind('.') {
        Some(dot) if segment[..dot].chars().any(|c| c != '.') => {
            reference.split_at(segment_start + dot)
        }
        _ => (reference, ""),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{variant_sibling, variant_url};

    #[test]
    fn returns_empty_for_empty_reference() {
        assert_eq!(variant_url("", 400, None), "");
        assert_eq!(variant_url("", 400, Some("webp")), "");
    }

    #[test]
    fn inserts_width_before_the_extension() {
        assert_eq!(
            variant_url("/media/products/foo.jpg", 800, None),
            "/media/products/foo_800.jpg"
        );
    }

    #[test]
    fn replaces_extension_when_override_given() {
        assert_eq!(
            variant_url("/media/products/foo.jpg", 400, Some("webp")),
            "/media/products/foo_400.webp"
        );
    }

    #[test]
    fn appends_width_when_reference_has_no_extension() {
        assert_eq!(variant_url("/media/raw", 400, None), "/media/raw_400");
    }

    #[test]
    fn only_the_final_segment_is_inspected() {
        assert_eq!(
            variant_url("/v1.2/images/photo.png", 1200, None),
            "/v1.2/images/photo_1200.png"
        );
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(variant_url("/media/.env", 400, None), "/media/.env_400");
    }

    #[test]
    fn splits_at_the_last_dot_of_compound_extensions() {
        assert_eq!(
            variant_url("archive.tar.gz", 400, None),
            "archive.tar_400.gz"
        );
    }

    #[test]
    fn preserves_extension_case_verbatim() {
        assert_eq!(variant_url("/media/SHOT.JPG", 800, None), "/media/SHOT_800.JPG");
    }

    #[test]
    fn is_a_pure_function_of_its_inputs() {
        let first = variant_url("/media/foo.jpg", 800, Some("webp"));
        let second = variant_url("/media/foo.jpg", 800, Some("webp"));
        assert_eq!(first, second);
        assert!(first.ends_with("_800.webp"));
    }

    #[test]
    fn sibling_path_agrees_with_url_side() {
        let sibling = variant_sibling(Path::new("media/products/foo.jpg"), 800, None);
        assert_eq!(sibling, PathBuf::from("media/products/foo_800.jpg"));

        let webp = variant_sibling(Path::new("media/products/foo.jpg"), 800, Some("webp"));
        assert_eq!(webp, PathBuf::from("media/products/foo_800.webp"));
    }
}
