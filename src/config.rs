//! Generation parameters and their optional file-based discovery.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "variants.config.json";

/// Target widths produced when no configuration overrides them.
pub const DEFAULT_WIDTHS: [u32; 3] = [400, 800, 1200];

/// Encoder quality used when no configuration overrides it.
pub const DEFAULT_QUALITY: u8 = 85;

/// Parameters describing the variant matrix a generation run should produce.
///
/// The defaults (widths 400/800/1200, WebP on, quality 85) are the
/// interchange contract between the generator and the URL resolver: both
/// sides must agree on them for rendered markup to reference real files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VariantSpec {
    /// Ordered target widths, one primary variant file per entry.
    #[serde(alias = "sizes")]
    pub widths: Vec<u32>,
    /// Whether a WebP derivative is written alongside each primary variant.
    pub webp: bool,
    /// Encoder quality in `1..=100`, applied to JPEG and WebP output.
    pub quality: u8,
}

impl Default for VariantSpec {
    fn default() -> Self {
        Self {
            widths: DEFAULT_WIDTHS.to_vec(),
            webp: true,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl VariantSpec {
    /// Attempt to load a spec from `variants.config.json` in the provided
    /// directory.
    ///
    /// When the file does not exist or fails to parse we fall back to the
    /// default spec so callers can continue operating with the interchange
    /// contract values.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read a spec from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Check the configuration preconditions.
    ///
    /// A zero width or an out-of-range quality is a caller configuration
    /// error rejected here at the boundary, not something generation guesses
    /// its way through.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.widths.contains(&0) {
            return Err(SpecError::ZeroWidth);
        }
        if !(1..=100).contains(&self.quality) {
            return Err(SpecError::QualityOutOfRange(self.quality));
        }
        Ok(())
    }

    /// Width used as the primary `src` in rendered markup: the middle entry
    /// of the width list (800 for the default list), or `None` when the list
    /// is empty.
    pub fn fallback_width(&self) -> Option<u32> {
        self.widths.get(self.widths.len() / 2).copied()
    }
}

/// Violations of the [`VariantSpec`] preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A target width of zero was requested.
    #[error("target widths must be positive")]
    ZeroWidth,
    /// The encoder quality falls outside `1..=100`.
    #[error("quality must be within 1..=100, got {0}")]
    QualityOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{SpecError, VariantSpec};

    #[test]
    fn default_matches_the_interchange_contract() {
        let spec = VariantSpec::default();
        assert_eq!(spec.widths, vec![400, 800, 1200]);
        assert!(spec.webp);
        assert_eq!(spec.quality, 85);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn rejects_zero_widths_at_the_boundary() {
        let spec = VariantSpec {
            widths: vec![400, 0, 1200],
            ..VariantSpec::default()
        };
        assert_eq!(spec.validate(), Err(SpecError::ZeroWidth));
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let spec = VariantSpec {
            quality: 0,
            ..VariantSpec::default()
        };
        assert_eq!(spec.validate(), Err(SpecError::QualityOutOfRange(0)));

        let spec = VariantSpec {
            quality: 101,
            ..VariantSpec::default()
        };
        assert_eq!(spec.validate(), Err(SpecError::QualityOutOfRange(101)));
    }

    #[test]
    fn empty_width_list_is_valid() {
        let spec = VariantSpec {
            widths: Vec::new(),
            ..VariantSpec::default()
        };
        assert!(spec.validate().is_ok());
        assert_eq!(spec.fallback_width(), None);
    }

    #[test]
    fn fallback_width_is_the_middle_entry() {
        assert_eq!(VariantSpec::default().fallback_width(), Some(800));

        let spec = VariantSpec {
            widths: vec![320],
            ..VariantSpec::default()
        };
        assert_eq!(spec.fallback_width(), Some(320));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(VariantSpec::discover(dir.path()), VariantSpec::default());

        fs::write(dir.path().join("variants.config.json"), "not json").unwrap();
        assert_eq!(VariantSpec::discover(dir.path()), VariantSpec::default());
    }

    #[test]
    fn loads_spec_from_json() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("variants.config.json"),
            r#"{"widths": [320, 640], "webp": false, "quality": 70}"#,
        )
        .unwrap();

        let spec = VariantSpec::discover(dir.path());
        assert_eq!(spec.widths, vec![320, 640]);
        assert!(!spec.webp);
        assert_eq!(spec.quality, 70);
    }

    #[test]
    fn accepts_the_sizes_alias() {
        let spec: VariantSpec = serde_json::from_str(r#"{"sizes": [512]}"#).unwrap();
        assert_eq!(spec.widths, vec![512]);
        assert!(spec.webp);
    }
}
