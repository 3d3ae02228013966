use anyhow::{Context, Result};
use clap::Args;
use combreta_bio::formats::fasta::{parse_fasta_with_case, ResidueCase};
use combreta_bio::formats::tnt::write_tnt;
use combreta_bio::Alignment;
use combreta_utils::{info, success};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConvertArgs {
    /// Aligned FASTA supermatrix
    #[arg(short, long, value_name = "FILE", default_value = "supermatrix.fasta")]
    pub input: PathBuf,

    /// TNT matrix to write
    #[arg(short, long, value_name = "FILE", default_value = "supermatrix.tnt")]
    pub output: PathBuf,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let sequences = parse_fasta_with_case(&args.input, ResidueCase::Preserve)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let alignment = Alignment::from_sequences(sequences)
        .with_context(|| format!("Invalid alignment in {}", args.input.display()))?;

    write_tnt(&args.output, &alignment)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info(&format!(
        "{} taxa x {} characters",
        alignment.n_taxa(),
        alignment.n_chars()
    ));
    success(&format!("TNT matrix written to {}", args.output.display()));
    Ok(())
}
