use crate::cli::Settings;
use crate::pipeline::curate_directory;
use anyhow::Result;
use clap::Args;
use colored::*;
use combreta_bio::Curator;
use combreta_utils::{
    coverage_bar, format_percent, info, section_header, success, tree_section, warning,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct CurateArgs {
    /// Directory of raw `{species}_{marker}.fasta` downloads [default: sequences_raw]
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory for curated single-sequence files [default: sequences_curated]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum fraction of ambiguous bases (IUPAC N, Y, R, ...) a record may contain
    #[arg(long, value_name = "FRACTION")]
    pub max_ambiguous: Option<f64>,

    /// Residues per line in the curated files
    #[arg(long, value_name = "N")]
    pub line_width: Option<usize>,
}

pub fn run(args: CurateArgs, settings: &Settings) -> Result<()> {
    let paths = &settings.config.paths;
    let input_dir = args.input_dir.unwrap_or_else(|| PathBuf::from(&paths.raw_dir));
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&paths.curated_dir));
    let max_ambiguous = args
        .max_ambiguous
        .unwrap_or(settings.config.curation.max_ambiguous_fraction);
    if !(0.0..=1.0).contains(&max_ambiguous) {
        return Err(combreta_core::CombretaError::InvalidInput(format!(
            "--max-ambiguous must be within [0, 1], got {}",
            max_ambiguous
        ))
        .into());
    }
    let line_width = args
        .line_width
        .unwrap_or(settings.config.curation.line_width)
        .max(1);

    section_header("Sequence curation");
    info(&format!("Input:  {}", input_dir.display()));
    info(&format!("Output: {}", output_dir.display()));

    let catalog = &settings.catalog;
    let summary = curate_directory(
        &input_dir,
        &output_dir,
        catalog,
        &Curator::new(max_ambiguous),
        line_width,
    )?;

    if settings.is_verbose() {
        for pair in &summary.curated {
            println!(
                "  {} {:<40} x {:<10} {:>5} bp (score {}) -> {}",
                "✓".green(),
                pair.species,
                pair.marker,
                pair.length,
                pair.score,
                pair.path.display()
            );
        }
    }
    for (file, reason) in &summary.skipped {
        warning(&format!("{}: {}", file, reason));
    }

    tree_section(
        "Curation summary",
        vec![
            ("Files processed", summary.files_processed.to_string()),
            ("Files generated", summary.files_generated().to_string()),
        ],
        true,
    );

    section_header("Coverage by marker");
    let n_species = catalog.species.len();
    for marker in catalog.marker_names() {
        let covered = summary.marker_coverage(marker);
        println!(
            "  {:<12} │ {} │ {:>2}/{} species ({})",
            marker,
            coverage_bar(covered, n_species, 20).green(),
            covered,
            n_species,
            format_percent(covered, n_species)
        );
    }

    success(&format!(
        "{} files ready for alignment in {}",
        summary.files_generated(),
        output_dir.display()
    ));
    Ok(())
}
