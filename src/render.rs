//! Markup rendering for responsive images.
//!
//! Pure string transformation from an original asset URL to a `<picture>`
//! fragment; no filesystem access, and no check that the referenced
//! derivatives exist. The fragment references whatever a prior generator run
//! with the matching [`VariantSpec`](crate::config::VariantSpec) would have
//! produced.

use crate::config::{DEFAULT_WIDTHS, VariantSpec};
use crate::naming::variant_url;

/// Presentation-side configuration for [`render_responsive_image`].
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Breakpoint widths the candidate lists are built from. Must match the
    /// widths the generator ran with or the markup references missing files.
    pub widths: Vec<u32>,
    /// URL of the static placeholder emitted when no source image exists.
    pub placeholder_url: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            widths: DEFAULT_WIDTHS.to_vec(),
            placeholder_url: "/static/images/placeholder.jpg".into(),
        }
    }
}

impl RenderSettings {
    /// Settings whose breakpoints mirror a generator spec, keeping the two
    /// sides of the naming contract on the same width list.
    pub fn from_spec(spec: &VariantSpec) -> Self {
        Self {
            widths: spec.widths.clone(),
            ..Self::default()
        }
    }
}

/// Render a `<picture>` fragment for an original asset URL.
///
/// With no URL (the asset was never uploaded) a plain `<img>` pointing at
/// the configured placeholder is emitted instead. Otherwise the fragment
/// carries a WebP `<source>` with one candidate per breakpoint, and a
/// fallback `<img>` in the original encoding whose primary `src` is the
/// middle breakpoint. All interpolated attribute values are escaped; the
/// returned fragment is safe to insert into an HTML document verbatim.
pub fn render_responsive_image(
    settings: &RenderSettings,
    image_url: Option<&str>,
    alt: &str,
    sizes: &str,
    class_attr: &str,
) -> String {
    let url = image_url.unwrap_or_default();
    if url.is_empty() {
        return plain_img(&settings.placeholder_url, alt, class_attr);
    }
    // The candidate lists would be empty with no breakpoints configured.
    let Some(&fallback_width) = settings.widths.get(settings.widths.len() / 2) else {
        return plain_img(url, alt, class_attr);
    };

    let webp_srcset = candidate_list(&settings.widths, url, Some("webp"));
    let original_srcset = candidate_list(&settings.widths, url, None);
    let default_src = variant_url(url, fallback_width, None);

    format!(
        "<picture>\
         <source type=\"image/webp\" srcset=\"{webp_srcset}\" sizes=\"{sizes}\">\
         <img src=\"{src}\" srcset=\"{original_srcset}\" sizes=\"{sizes}\" \
         alt=\"{alt}\" class=\"{class}\" loading=\"lazy\">\
         </picture>",
        webp_srcset = escape_attr(&webp_srcset),
        original_srcset = escape_attr(&original_srcset),
        src = escape_attr(&default_src),
        sizes = escape_attr(sizes),
        alt = escape_attr(alt),
        class = escape_attr(class_attr),
    )
}

/// Comma-joined `url width` candidate pairs for one encoding.
fn candidate_list(widths: &[u32], url: &str, ext: Option<&str>) -> String {
    widths
        .iter()
        .map(|&width| format!("{} {width}w", variant_url(url, width, ext)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn plain_img(src: &str, alt: &str, class_attr: &str) -> String {
    format!(
        "<img src=\"{src}\" alt=\"{alt}\" class=\"{class}\" loading=\"lazy\">",
        src = escape_attr(src),
        alt = escape_attr(alt),
        class = escape_attr(class_attr),
    )
}

/// Escape a value for interpolation into a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
