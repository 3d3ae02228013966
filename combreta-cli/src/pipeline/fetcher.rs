//! Download loop over every (species, marker) pair of the catalog

use crate::download::{NucleotideDatabase, SearchHits};
use anyhow::{Context, Result};
use combreta_bio::formats::fasta::count_headers;
use combreta_core::{pair_file_name, Catalog, FunctionalGroup, Marker, Species};
use indicatif::ProgressBar;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    /// Data found under a synonym instead of the canonical name
    Synonym(String),
    DownloadError,
    NoData,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Synonym(name) => write!(f, "Synonym: {}", name),
            Self::DownloadError => write!(f, "Download error"),
            Self::NoData => write!(f, "No data"),
        }
    }
}

/// One row of the download summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    pub species: String,
    pub group: FunctionalGroup,
    pub marker: String,
    pub n_seqs: usize,
    pub status: FetchStatus,
    pub name_used: String,
    pub file: Option<PathBuf>,
}

impl FetchRecord {
    pub fn has_data(&self) -> bool {
        self.n_seqs > 0
    }
}

pub struct Fetcher<'a, D: NucleotideDatabase> {
    db: &'a D,
    catalog: &'a Catalog,
    output_dir: PathBuf,
    retmax: usize,
    pause: Duration,
}

impl<'a, D: NucleotideDatabase> Fetcher<'a, D> {
    pub fn new(db: &'a D, catalog: &'a Catalog, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            catalog,
            output_dir: output_dir.into(),
            retmax: 100,
            pause: Duration::from_millis(500),
        }
    }

    pub fn with_retmax(mut self, retmax: usize) -> Self {
        self.retmax = retmax;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn wait(&self) {
        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
    }

    /// Fetch every pair in catalog order
    pub fn run(&self, progress: &ProgressBar) -> Result<Vec<FetchRecord>> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let mut records = Vec::with_capacity(self.catalog.pair_count());
        for species in &self.catalog.species {
            for marker in &self.catalog.markers {
                progress.set_message(format!("{} [{}]", species.name, marker.name));
                let record = self.fetch_pair(species, marker);
                progress.inc(1);
                records.push(record);
                self.wait();
            }
        }
        Ok(records)
    }

    /// First query of the list that returns ids; search errors count as no result
    fn first_hit(&self, queries: &[String]) -> Option<(SearchHits, String)> {
        for query in queries {
            match self.db.search(query, self.retmax) {
                Ok(hits) if !hits.is_empty() => return Some((hits, query.clone())),
                Ok(_) => {
                    tracing::debug!("No hits for {}", query);
                    self.wait();
                }
                Err(e) => tracing::warn!("Search failed for {}: {}", query, e),
            }
        }
        None
    }

    /// Try the canonical name, then each synonym, stopping at the first hit.
    /// Failures are recorded as `DownloadError` so the run can continue.
    pub fn fetch_pair(&self, species: &Species, marker: &Marker) -> FetchRecord {
        let record = |n_seqs, status, name_used: &str, file| FetchRecord {
            species: species.name.clone(),
            group: species.group,
            marker: marker.name.clone(),
            n_seqs,
            status,
            name_used: name_used.to_string(),
            file,
        };

        for name in species.search_names() {
            if name != species.name {
                tracing::info!("{} [{}]: trying synonym {}", species.name, marker.name, name);
            }

            let Some((hits, query)) = self.first_hit(&marker.organism_queries(name)) else {
                tracing::info!("{} [{}]: no results for {}", species.name, marker.name, name);
                self.wait();
                continue;
            };
            tracing::info!(
                "{} [{}]: {} found, downloading {} ({})",
                species.name,
                marker.name,
                hits.count,
                hits.ids.len(),
                query
            );

            self.wait();
            let fasta = match self.db.fetch_fasta(&hits.ids) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    tracing::warn!("{} [{}]: download returned no data", species.name, marker.name);
                    return record(0, FetchStatus::DownloadError, name, None);
                }
                Err(e) => {
                    tracing::warn!("{} [{}]: download failed: {}", species.name, marker.name, e);
                    return record(0, FetchStatus::DownloadError, name, None);
                }
            };

            let path = self.output_dir.join(pair_file_name(&species.name, &marker.name));
            if let Err(e) = std::fs::write(&path, &fasta) {
                tracing::warn!("Failed to write {}: {}", path.display(), e);
                return record(0, FetchStatus::DownloadError, name, None);
            }

            let n_seqs = count_headers(&fasta);
            tracing::info!("Wrote {} ({} seqs)", path.display(), n_seqs);

            let status = if name == species.name {
                FetchStatus::Ok
            } else {
                FetchStatus::Synonym(name.to_string())
            };
            return record(n_seqs, status, name, Some(path));
        }

        record(0, FetchStatus::NoData, &species.name, None)
    }
}
