//! File naming shared by the pipeline stages
//!
//! Every stage after the download relies on the `{species}_{marker}.fasta`
//! convention: the marker is the text after the last `_` of the file stem.

use crate::{CombretaError, CombretaResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();

/// Local timestamp for console and metadata output
/// Returns format: YYYY-MM-DD HH:MM:SS
pub fn generate_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Replace every character that is not a word character, '-' or '.' with '_'
pub fn sanitize_name(text: &str) -> String {
    let re = UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^\w\-.]").expect("valid regex"));
    re.replace_all(text, "_").into_owned()
}

/// File name for one (species, marker) pair
pub fn pair_file_name(species: &str, marker: &str) -> String {
    format!("{}_{}.fasta", sanitize_name(species), marker)
}

/// File name of the per-marker multi-FASTA
pub fn consolidated_file_name(marker: &str) -> String {
    format!("{}_all.fasta", marker)
}

/// Split a file stem into (species, marker) at the last '_'
pub fn split_pair_stem(stem: &str) -> Option<(&str, &str)> {
    let (species, marker) = stem.rsplit_once('_')?;
    if species.is_empty() || marker.is_empty() {
        return None;
    }
    Some((species, marker))
}

/// All `*.fasta` files directly inside `dir`, sorted by file name
pub fn list_fasta_files(dir: &Path) -> CombretaResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CombretaError::NotFound(format!(
            "directory {} does not exist",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "fasta") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Laguncularia racemosa"), "Laguncularia_racemosa");
        assert_eq!(
            sanitize_name("Conocarpus erectus var. sericeus"),
            "Conocarpus_erectus_var._sericeus"
        );
        assert_eq!(sanitize_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_name("psaA-ycf3"), "psaA-ycf3");
    }

    #[test]
    fn test_pair_file_name() {
        assert_eq!(
            pair_file_name("Punica granatum", "trnH-psbA"),
            "Punica_granatum_trnH-psbA.fasta"
        );
        assert_eq!(consolidated_file_name("ITS"), "ITS_all.fasta");
    }

    #[test]
    fn test_split_pair_stem() {
        assert_eq!(
            split_pair_stem("Laguncularia_racemosa_ITS"),
            Some(("Laguncularia_racemosa", "ITS"))
        );
        assert_eq!(
            split_pair_stem("Trapa_natans_psaA-ycf3"),
            Some(("Trapa_natans", "psaA-ycf3"))
        );
        assert_eq!(split_pair_stem("nounderscore"), None);
        assert_eq!(split_pair_stem("_ITS"), None);
        assert_eq!(split_pair_stem("species_"), None);
    }
}
