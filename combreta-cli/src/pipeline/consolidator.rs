//! Per-marker concatenation of curated files

use anyhow::{Context, Result};
use combreta_bio::formats::fasta::count_headers;
use combreta_bio::LengthStats;
use combreta_core::{consolidated_file_name, list_fasta_files, split_pair_stem, Catalog, CombretaError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerConsolidation {
    pub marker: String,
    pub files: usize,
    pub sequences: usize,
    /// Per-file sequence lengths; None when no file had sequence lines
    pub stats: Option<LengthStats>,
    /// None when the marker had no readable curated files
    pub output: Option<PathBuf>,
}

/// Residue count of a FASTA file: every non-header line, trimmed
fn sequence_length(content: &str) -> usize {
    content
        .lines()
        .filter(|l| !l.starts_with('>'))
        .map(|l| l.trim().len())
        .sum()
}

/// Concatenate `input_dir` files into `{marker}_all.fasta`, markers in catalog order
pub fn consolidate_directory(
    input_dir: &Path,
    output_dir: &Path,
    catalog: &Catalog,
) -> Result<Vec<MarkerConsolidation>> {
    let files = list_fasta_files(input_dir)?;

    let mut by_marker: HashMap<String, Vec<PathBuf>> = HashMap::new();
    for path in files {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match split_pair_stem(&stem) {
            Some((_, marker)) if catalog.marker(marker).is_some() => {
                by_marker.entry(marker.to_string()).or_default().push(path);
            }
            _ => tracing::debug!("Ignoring {}", path.display()),
        }
    }

    std::fs::create_dir_all(output_dir)
        .map_err(CombretaError::from)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut results = Vec::new();
    for marker in catalog.marker_names() {
        let mut merged = String::new();
        let mut files = 0;
        let mut sequences = 0;
        let mut lengths = Vec::new();
        for path in by_marker.get(marker).into_iter().flatten() {
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            files += 1;
            sequences += count_headers(&content);
            let length = sequence_length(&content);
            if length > 0 {
                lengths.push(length);
            }
            merged.push_str(&content);
        }

        if files == 0 {
            results.push(MarkerConsolidation {
                marker: marker.to_string(),
                files: 0,
                sequences: 0,
                stats: None,
                output: None,
            });
            continue;
        }

        let output = output_dir.join(consolidated_file_name(marker));
        std::fs::write(&output, &merged)
            .map_err(CombretaError::from)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!("Wrote {} ({} sequences)", output.display(), sequences);

        results.push(MarkerConsolidation {
            marker: marker.to_string(),
            files,
            sequences,
            stats: LengthStats::from_lengths(lengths),
            output: Some(output),
        });
    }

    Ok(results)
}

/// MAFFT command aligning a consolidated file
pub fn mafft_command(marker: &str) -> String {
    format!(
        "mafft --maxiterate 1000 --localpair {} > {}_aligned.fasta",
        consolidated_file_name(marker),
        marker
    )
}
