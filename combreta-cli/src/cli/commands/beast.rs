use crate::cli::Settings;
use anyhow::{Context, Result};
use clap::Args;
use combreta_bio::formats::beast::BeastDocument;
use combreta_bio::read_alignment;
use combreta_utils::{format_number, info, success, tree_section, warning};
use std::path::PathBuf;

#[derive(Args)]
pub struct BeastArgs {
    /// Aligned supermatrix (NEXUS or FASTA)
    #[arg(value_name = "ALIGNMENT")]
    pub input: PathBuf,

    /// BEAST 2 XML file to write
    #[arg(short, long, value_name = "FILE", default_value = "combretaceae_thesis.xml")]
    pub output: PathBuf,

    /// MCMC chain length
    #[arg(long)]
    pub chain_length: Option<u64>,

    /// Sampling interval for the state and all loggers
    #[arg(long)]
    pub sample_every: Option<u64>,
}

pub fn run(args: BeastArgs, settings: &Settings) -> Result<()> {
    let mut params = settings.config.beast.clone();
    if let Some(chain_length) = args.chain_length {
        params.chain_length = chain_length;
    }
    if let Some(every) = args.sample_every {
        if every == 0 {
            return Err(combreta_core::CombretaError::InvalidInput(
                "--sample-every must be greater than zero".to_string(),
            )
            .into());
        }
        params.store_every = every;
        params.log_every = every;
    }

    let alignment = read_alignment(&args.input)
        .with_context(|| format!("Failed to read alignment {}", args.input.display()))?;

    let doc = BeastDocument::new(&alignment, &params);
    let calibration = doc.calibration();
    for taxon in &calibration.missing {
        warning(&format!("Calibration taxon {} is not in the alignment", taxon));
    }
    if !calibration.is_usable() {
        warning("Fewer than two calibration taxa present; writing the document without a fossil calibration");
    }

    doc.write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info(&format!(
        "{} taxa x {} characters",
        alignment.n_taxa(),
        alignment.n_chars()
    ));
    tree_section(
        "Analysis",
        vec![
            ("Chain length", format_number(params.chain_length)),
            ("Sample every", format_number(params.log_every)),
            ("Log file", params.log_file.clone()),
            ("Trees file", params.trees_file.clone()),
            (
                "Calibration",
                if calibration.is_usable() {
                    format!(
                        "crown offset {} Ma on {} taxa",
                        params.calibration_offset,
                        calibration.present.len()
                    )
                } else {
                    "none".to_string()
                },
            ),
        ],
        true,
    );
    success(&format!("BEAST 2 XML written to {}", args.output.display()));
    Ok(())
}
