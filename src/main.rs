//! Command-line front end for the variant generator.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use responsive_variants::{VariantIssue, VariantSet, VariantSpec, generate_variants};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "responsive-variants",
    version,
    about = "Generate responsive image derivatives next to their sources."
)]
struct Cli {
    /// Source images to process.
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Comma-separated target widths, overriding the configured list.
    #[arg(long, value_delimiter = ',', value_name = "WIDTH")]
    sizes: Option<Vec<u32>>,

    /// Encoder quality (1-100), overriding the configured value.
    #[arg(long, value_name = "QUALITY")]
    quality: Option<u8>,

    /// Skip WebP derivatives.
    #[arg(long)]
    no_webp: bool,

    /// Explicit spec file; by default variants.config.json next to each
    /// image is used when present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a JSON summary of the produced files.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn spec_for(&self, image: &Path) -> VariantSpec {
        let mut spec = match &self.config {
            Some(path) => VariantSpec::from_path(path).unwrap_or_default(),
            None => VariantSpec::discover(image.parent().unwrap_or(Path::new("."))),
        };
        if let Some(sizes) = &self.sizes {
            spec.widths = sizes.clone();
        }
        if let Some(quality) = self.quality {
            spec.quality = quality;
        }
        if self.no_webp {
            spec.webp = false;
        }
        spec
    }
}

/// One processed source image in the `--json` report.
#[derive(Debug, Serialize)]
struct ImageSummary {
    source: String,
    variants: VariantSet,
    issues: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut summaries = Vec::new();
    let mut invalid_spec = false;

    for image in &cli.images {
        let spec = cli.spec_for(image);
        let outcome = generate_variants(image, &spec);

        for issue in &outcome.issues {
            eprintln!("{}: {issue}", image.display());
            if matches!(issue, VariantIssue::Spec(_)) {
                invalid_spec = true;
            }
        }

        if cli.json {
            summaries.push(ImageSummary {
                source: image.display().to_string(),
                variants: outcome.variants,
                issues: outcome.issues.iter().map(|issue| issue.to_string()).collect(),
            });
        } else {
            println!(
                "{}: {} variant file(s)",
                image.display(),
                outcome.variants.file_count()
            );
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&summaries) {
            Ok(report) => println!("{report}"),
            Err(err) => {
                eprintln!("could not serialize summary: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    // Generation itself is best-effort; only a misconfigured spec fails the
    // invocation.
    if invalid_spec {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
