pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use combreta_core::{load_config, Catalog, Config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "combreta",
    version,
    about = "Sequence pipeline for a Combretaceae phylogeny",
    long_about = "Combreta downloads marker sequences from NCBI nucleotide, curates one \
                  sequence per species and marker, consolidates them per marker for \
                  alignment, and writes TNT and BEAST 2 inputs from the aligned supermatrix."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// TOML catalog of species and markers (defaults to the built-in thesis catalog)
    #[arg(long, value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download raw sequences for every species and marker from NCBI
    Fetch(commands::fetch::FetchArgs),

    /// Select the best sequence per species and marker
    Curate(commands::curate::CurateArgs),

    /// Merge curated files into one multi-FASTA per marker
    Consolidate(commands::consolidate::ConsolidateArgs),

    /// Convert an aligned FASTA supermatrix to a TNT matrix
    Convert(commands::convert::ConvertArgs),

    /// Write a BEAST 2 XML document for an alignment
    Beast(commands::beast::BeastArgs),
}

/// Configuration and catalog shared by every command
pub struct Settings {
    pub config: Config,
    pub catalog: Catalog,
    pub verbose: u8,
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                load_config(path)?
            }
            None => Config::default(),
        };

        let catalog = match &cli.catalog {
            Some(path) => {
                tracing::debug!("Loading catalog from {}", path.display());
                Catalog::load(path)?
            }
            None => Catalog::builtin(),
        };

        Ok(Self {
            config,
            catalog,
            verbose: cli.verbose,
        })
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_files() {
        let cli = Cli::parse_from(["combreta", "convert"]);
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.catalog.species.len(), 20);
        assert_eq!(settings.config.curation.line_width, 80);
        assert!(!settings.is_verbose());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["combreta", "curate", "-vv", "--config", "c.toml"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}
