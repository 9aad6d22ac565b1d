//! Data structures produced by a variant generation run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::{SpecError, VariantSpec};

/// Files produced by one generation run, keyed by encoding and width.
///
/// Every width the run completed has an entry in `jpg` (the original
/// encoding, whatever its actual format); `webp` entries exist only for
/// widths whose WebP encode was requested and succeeded independently.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSet {
    /// Primary variants in the source's own encoding, keyed by target width.
    pub jpg: BTreeMap<u32, PathBuf>,
    /// WebP variants, keyed by target width.
    pub webp: BTreeMap<u32, PathBuf>,
}

impl VariantSet {
    /// Whether the run produced no files at all.
    pub fn is_empty(&self) -> bool {
        self.jpg.is_empty() && self.webp.is_empty()
    }

    /// Total number of files recorded across both encodings.
    pub fn file_count(&self) -> usize {
        self.jpg.len() + self.webp.len()
    }
}

/// Result of a generation run: the files that were produced plus structured
/// diagnostics for anything that was not.
///
/// Generation is best-effort — the caller's primary workflow (persisting an
/// upload) must never block on it — so failures are reported here instead of
/// being raised. An outcome with issues still carries every variant written
/// before and after the failing step.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    /// Variant files written by the run.
    pub variants: VariantSet,
    /// Diagnostics for the steps that failed.
    pub issues: Vec<VariantIssue>,
}

impl GenerationOutcome {
    /// Whether the run completed without recording any diagnostics.
    pub fn ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether every width the spec requested has its primary variant.
    ///
    /// A missing or undecodable source yields an outcome that is NOT
    /// complete even though it may carry no issues.
    pub fn is_complete(&self, spec: &VariantSpec) -> bool {
        spec.widths.iter().all(|width| self.variants.jpg.contains_key(width))
    }
}

/// A single failed step within a generation run.
#[derive(Debug, Error)]
pub enum VariantIssue {
    /// The source image could not be decoded.
    #[error("could not decode {path}: {reason}")]
    Decode {
        /// Path of the source image.
        path: PathBuf,
        /// Underlying decoder failure.
        reason: String,
    },
    /// A variant file could not be encoded or written.
    #[error("could not write {path}: {reason}")]
    Encode {
        /// Path of the variant that failed.
        path: PathBuf,
        /// Underlying encoder or I/O failure.
        reason: String,
    },
    /// The spec failed its precondition check.
    #[error("invalid variant spec: {0}")]
    Spec(#[from] SpecError),
}

impl VariantIssue {
    pub(crate) fn decode(path: &Path, err: &anyhow::Error) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: format!("{err:#}"),
        }
    }

    pub(crate) fn encode(path: &Path, err: &anyhow::Error) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            reason: format!("{err:#}"),
        }
    }
}
