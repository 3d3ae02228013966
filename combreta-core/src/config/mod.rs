//! Configuration types for Combreta

use crate::CombretaError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub entrez: EntrezConfig,
    #[serde(default)]
    pub curation: CurationConfig,
    #[serde(default)]
    pub beast: BeastConfig,
}

/// Working directories of the pipeline stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Raw downloads, one FASTA per (species, marker)
    #[serde(default = "default_raw_dir")]
    pub raw_dir: String,
    /// Curated single-sequence FASTA files
    #[serde(default = "default_curated_dir")]
    pub curated_dir: String,
    /// Per-marker multi-FASTA files ready for alignment
    #[serde(default = "default_consolidated_dir")]
    pub consolidated_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrezConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Contact address sent with every request; NCBI requires one
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default = "default_retmax")]
    pub retmax: usize,
    /// Fixed delay between requests; derived from the API key when unset
    #[serde(default)]
    pub pause_ms: Option<u64>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    #[serde(default = "default_max_ambiguous_fraction")]
    pub max_ambiguous_fraction: f64,
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

/// Numeric parameters of the generated BEAST 2 document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeastConfig {
    #[serde(default = "default_chain_length")]
    pub chain_length: u64,
    #[serde(default = "default_sample_interval")]
    pub store_every: u64,
    #[serde(default = "default_sample_interval")]
    pub log_every: u64,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_trees_file")]
    pub trees_file: String,
    #[serde(default = "default_clock_mean")]
    pub clock_mean: f64,
    #[serde(default = "default_clock_stdev")]
    pub clock_stdev: f64,
    #[serde(default = "default_clock_m")]
    pub clock_m: f64,
    #[serde(default = "default_clock_s")]
    pub clock_s: f64,
    #[serde(default = "default_birth_diff_rate")]
    pub birth_diff_rate: f64,
    #[serde(default = "default_relative_death_rate")]
    pub relative_death_rate: f64,
    /// Fossil offset in Ma
    #[serde(default = "default_calibration_offset")]
    pub calibration_offset: f64,
    #[serde(default = "default_calibration_m")]
    pub calibration_m: f64,
    #[serde(default = "default_calibration_s")]
    pub calibration_s: f64,
    #[serde(default = "default_calibration_taxa")]
    pub calibration_taxa: Vec<String>,
    #[serde(default = "default_sequence_width")]
    pub sequence_width: usize,
}

// Default value functions
fn default_raw_dir() -> String { "sequences_raw".to_string() }
fn default_curated_dir() -> String { "sequences_curated".to_string() }
fn default_consolidated_dir() -> String { "alignment_input".to_string() }
fn default_base_url() -> String { "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string() }
fn default_tool() -> String { "combreta".to_string() }
fn default_retmax() -> usize { 100 }
fn default_timeout_secs() -> u64 { 120 }
fn default_max_ambiguous_fraction() -> f64 { 0.20 }
fn default_line_width() -> usize { 80 }
fn default_chain_length() -> u64 { 50_000_000 }
fn default_sample_interval() -> u64 { 50_000 }
fn default_log_file() -> String { "thesis_beast.log".to_string() }
fn default_trees_file() -> String { "thesis_beast.trees".to_string() }
fn default_clock_mean() -> f64 { 0.001 }
fn default_clock_stdev() -> f64 { 0.1 }
fn default_clock_m() -> f64 { -6.907 }
fn default_clock_s() -> f64 { 1.25 }
fn default_birth_diff_rate() -> f64 { 0.01 }
fn default_relative_death_rate() -> f64 { 0.5 }
fn default_calibration_offset() -> f64 { 93.5 }
fn default_calibration_m() -> f64 { 1.5 }
fn default_calibration_s() -> f64 { 0.3 }
fn default_sequence_width() -> usize { 70 }
fn default_calibration_taxa() -> Vec<String> {
    [
        "Buchenavia_tetraphylla",
        "Conocarpus_erectus",
        "Laguncularia_racemosa",
        "Terminalia_catappa",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            curated_dir: default_curated_dir(),
            consolidated_dir: default_consolidated_dir(),
        }
    }
}

impl Default for EntrezConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: None,
            api_key: None,
            tool: default_tool(),
            retmax: default_retmax(),
            pause_ms: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EntrezConfig {
    /// Delay between consecutive requests.
    ///
    /// NCBI allows 10 requests/s with an API key and 3 without; the
    /// defaults stay under both limits.
    pub fn pause(&self) -> Duration {
        let ms = self
            .pause_ms
            .unwrap_or(if self.api_key.is_some() { 350 } else { 500 });
        Duration::from_millis(ms)
    }
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            max_ambiguous_fraction: default_max_ambiguous_fraction(),
            line_width: default_line_width(),
        }
    }
}

impl Default for BeastConfig {
    fn default() -> Self {
        Self {
            chain_length: default_chain_length(),
            store_every: default_sample_interval(),
            log_every: default_sample_interval(),
            log_file: default_log_file(),
            trees_file: default_trees_file(),
            clock_mean: default_clock_mean(),
            clock_stdev: default_clock_stdev(),
            clock_m: default_clock_m(),
            clock_s: default_clock_s(),
            birth_diff_rate: default_birth_diff_rate(),
            relative_death_rate: default_relative_death_rate(),
            calibration_offset: default_calibration_offset(),
            calibration_m: default_calibration_m(),
            calibration_s: default_calibration_s(),
            calibration_taxa: default_calibration_taxa(),
            sequence_width: default_sequence_width(),
        }
    }
}

impl Config {
    /// Reject values no stage can work with
    pub fn validate(&self) -> Result<(), CombretaError> {
        if !(0.0..=1.0).contains(&self.curation.max_ambiguous_fraction) {
            return Err(CombretaError::Configuration(format!(
                "curation.max_ambiguous_fraction must be within [0, 1], got {}",
                self.curation.max_ambiguous_fraction
            )));
        }
        if self.curation.line_width == 0 || self.beast.sequence_width == 0 {
            return Err(CombretaError::Configuration(
                "line widths must be greater than zero".to_string(),
            ));
        }
        if self.entrez.retmax == 0 {
            return Err(CombretaError::Configuration(
                "entrez.retmax must be greater than zero".to_string(),
            ));
        }
        if self.beast.store_every == 0 || self.beast.log_every == 0 {
            return Err(CombretaError::Configuration(
                "beast sampling intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, CombretaError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| CombretaError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), CombretaError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| CombretaError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.paths.raw_dir, "sequences_raw");
        assert_eq!(config.paths.curated_dir, "sequences_curated");
        assert_eq!(config.paths.consolidated_dir, "alignment_input");

        assert_eq!(config.entrez.retmax, 100);
        assert!(config.entrez.email.is_none());
        assert!(config.entrez.api_key.is_none());

        assert_eq!(config.curation.max_ambiguous_fraction, 0.20);
        assert_eq!(config.curation.line_width, 80);

        assert_eq!(config.beast.chain_length, 50_000_000);
        assert_eq!(config.beast.store_every, 50_000);
        assert_eq!(config.beast.calibration_offset, 93.5);
        assert_eq!(config.beast.calibration_taxa.len(), 4);
        assert_eq!(config.beast.sequence_width, 70);
    }

    #[test]
    fn test_pause_depends_on_api_key() {
        let mut entrez = EntrezConfig::default();
        assert_eq!(entrez.pause(), Duration::from_millis(500));

        entrez.api_key = Some("abc".to_string());
        assert_eq!(entrez.pause(), Duration::from_millis(350));

        entrez.pause_ms = Some(10);
        assert_eq!(entrez.pause(), Duration::from_millis(10));
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[entrez]
email = "someone@example.org"

[curation]
line_width = 60
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.entrez.email.as_deref(), Some("someone@example.org"));
        assert_eq!(config.curation.line_width, 60);
        assert_eq!(config.curation.max_ambiguous_fraction, 0.20);
        assert_eq!(config.beast.clock_m, -6.907);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[curation]\nmax_ambiguous_fraction = 1.5").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, CombretaError::Configuration(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.beast.chain_length = 1_000;
        config.entrez.api_key = Some("key".to_string());

        save_config(file.path(), &config).unwrap();
        let loaded = load_config(file.path()).unwrap();

        assert_eq!(loaded.beast.chain_length, 1_000);
        assert_eq!(loaded.entrez.api_key.as_deref(), Some("key"));
    }
}
