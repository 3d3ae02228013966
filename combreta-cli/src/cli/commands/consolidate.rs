use crate::cli::Settings;
use crate::pipeline::consolidator::mafft_command;
use crate::pipeline::consolidate_directory;
use anyhow::Result;
use clap::Args;
use combreta_utils::{info, section_header, success, warning};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConsolidateArgs {
    /// Directory of curated per-pair files [default: sequences_curated]
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory for the per-marker multi-FASTA files [default: alignment_input]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: ConsolidateArgs, settings: &Settings) -> Result<()> {
    let paths = &settings.config.paths;
    let input_dir = args
        .input_dir
        .unwrap_or_else(|| PathBuf::from(&paths.curated_dir));
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&paths.consolidated_dir));

    section_header("Consolidation for MAFFT");
    info(&format!("Input:  {}", input_dir.display()));
    info(&format!("Output: {}", output_dir.display()));

    let results = consolidate_directory(&input_dir, &output_dir, &settings.catalog)?;

    for result in &results {
        match (&result.output, &result.stats) {
            (None, _) => warning(&format!("{:<12} no files found", result.marker)),
            (Some(_), None) => warning(&format!("{:<12} empty file", result.marker)),
            (Some(_), Some(stats)) => success(&format!(
                "{:<12} {:>2} sequences from {} files (length {:>4}-{:>4} bp, mean {:>6.1} bp)",
                result.marker, result.sequences, result.files, stats.min, stats.max, stats.mean
            )),
        }
    }

    let produced: Vec<&str> = results
        .iter()
        .filter(|r| r.output.is_some())
        .map(|r| r.marker.as_str())
        .collect();
    if !produced.is_empty() {
        section_header("Next step: alignment with MAFFT");
        println!("cd {}/\n", output_dir.display());
        for marker in produced {
            println!("{}", mafft_command(marker));
        }
    }
    Ok(())
}
