//! Curation of a directory of raw per-pair downloads

use anyhow::{Context, Result};
use combreta_bio::curation::{CurationOutcome, Curator};
use combreta_bio::formats::fasta::{parse_fasta, write_fasta};
use combreta_core::{list_fasta_files, split_pair_stem, Catalog, CombretaError};
use std::path::{Path, PathBuf};

/// A curated file that was written
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedPair {
    pub species: String,
    pub marker: String,
    pub length: usize,
    pub score: i64,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct CurationSummary {
    pub files_processed: usize,
    pub curated: Vec<CuratedPair>,
    /// Files left out, with the reason
    pub skipped: Vec<(String, String)>,
}

impl CurationSummary {
    pub fn files_generated(&self) -> usize {
        self.curated.len()
    }

    /// Species with a curated sequence for `marker`
    pub fn marker_coverage(&self, marker: &str) -> usize {
        self.curated.iter().filter(|c| c.marker == marker).count()
    }
}

/// Curate every `{species}_{marker}.fasta` of `input_dir` into `output_dir`
pub fn curate_directory(
    input_dir: &Path,
    output_dir: &Path,
    catalog: &Catalog,
    curator: &Curator,
    line_width: usize,
) -> Result<CurationSummary> {
    let files = list_fasta_files(input_dir)?;
    std::fs::create_dir_all(output_dir)
        .map_err(CombretaError::from)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut summary = CurationSummary::default();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some((species, marker_name)) = split_pair_stem(&stem) else {
            tracing::warn!("Skipping {} (unrecognised file name)", file_name);
            summary.skipped.push((file_name, "unrecognised file name".to_string()));
            continue;
        };
        let Some(marker) = catalog.marker(marker_name) else {
            tracing::warn!("Skipping {} (unknown marker '{}')", file_name, marker_name);
            summary
                .skipped
                .push((file_name, format!("unknown marker '{}'", marker_name)));
            continue;
        };

        summary.files_processed += 1;

        let sequences = match parse_fasta(&path) {
            Ok(seqs) => seqs,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", file_name, e);
                summary.skipped.push((file_name, format!("unreadable: {}", e)));
                continue;
            }
        };

        match curator.select(sequences, &marker.bounds) {
            CurationOutcome::Selected(selection) => {
                let score = selection.score;
                let record = selection.into_record(species);
                let out_path = output_dir.join(&file_name);
                write_fasta(&out_path, std::slice::from_ref(&record), line_width)
                    .with_context(|| format!("Failed to write {}", out_path.display()))?;
                tracing::info!("{} x {}: {} bp (score {})", species, marker.name, record.len(), score);

                summary.curated.push(CuratedPair {
                    species: species.to_string(),
                    marker: marker.name.clone(),
                    length: record.len(),
                    score,
                    path: out_path,
                });
            }
            CurationOutcome::NoValidSequences { total } => {
                tracing::warn!("{} x {}: no valid sequences ({} records)", species, marker.name, total);
                summary
                    .skipped
                    .push((file_name, "no valid sequences".to_string()));
            }
            CurationOutcome::AllDisqualified { candidates } => {
                tracing::warn!(
                    "{} x {}: all {} candidates discarded (low quality)",
                    species,
                    marker.name,
                    candidates
                );
                summary
                    .skipped
                    .push((file_name, "all sequences discarded".to_string()));
            }
        }
    }

    Ok(summary)
}
