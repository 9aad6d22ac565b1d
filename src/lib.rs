#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod generate;
pub mod models;
pub mod naming;
pub mod render;

pub use config::{SpecError, VariantSpec};
pub use generate::generate_variants;
pub use models::{GenerationOutcome, VariantIssue, VariantSet};
pub use naming::{variant_sibling, variant_url};
pub use render::{RenderSettings, render_responsive_image};
