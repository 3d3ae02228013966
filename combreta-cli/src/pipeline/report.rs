//! Download summary files and console report

use super::fetcher::FetchRecord;
use anyhow::{Context, Result};
use colored::*;
use combreta_core::{Catalog, CombretaError, FunctionalGroup};
use combreta_utils::{
    coverage_bar, create_standard_table, format_duration, format_number, format_percent,
    header_cell, section_header, tree_section, TreeNode,
};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "download_summary.csv";
pub const METADATA_FILE: &str = "metadata.txt";

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    species: &'a str,
    group: &'a str,
    marker: &'a str,
    n_seqs: usize,
    status: String,
    name_used: &'a str,
}

impl<'a> From<&'a FetchRecord> for SummaryRow<'a> {
    fn from(record: &'a FetchRecord) -> Self {
        Self {
            species: &record.species,
            group: record.group.code(),
            marker: &record.marker,
            n_seqs: record.n_seqs,
            status: record.status.to_string(),
            name_used: &record.name_used,
        }
    }
}

/// Write one CSV row per record
pub fn write_summary_csv(dir: &Path, records: &[FetchRecord]) -> Result<PathBuf> {
    let path = dir.join(SUMMARY_FILE);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(SummaryRow::from(record))?;
    }
    writer.flush().map_err(CombretaError::from)?;
    Ok(path)
}

/// Plain-text record of the run: date, contact, references, markers, species notes
pub fn render_metadata(catalog: &Catalog, started: &str, email: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "COMBRETACEAE PHYLOGENY - METADATA")?;
    writeln!(out, "{}\n", "═".repeat(80))?;
    writeln!(out, "Date: {}", started)?;
    writeln!(out, "Contact: {}", email)?;
    writeln!(out, "Species: {}", catalog.species.len())?;
    writeln!(out, "Markers: {}\n", catalog.markers.len())?;

    writeln!(out, "REFERENCES:")?;
    for reference in &catalog.references {
        writeln!(out, "  {}", reference)?;
    }

    writeln!(out, "\nMARKERS:")?;
    for marker in &catalog.markers {
        writeln!(out, "  {}: {} ({})", marker.name, marker.kind, marker.reference)?;
    }

    writeln!(out, "\n{}", "─".repeat(80))?;
    writeln!(out, "SPECIES NOTES:")?;
    for species in &catalog.species {
        writeln!(
            out,
            "  {} (Group {}): {}",
            species.name, species.group, species.notes
        )?;
    }
    Ok(out)
}

pub fn write_metadata(dir: &Path, catalog: &Catalog, started: &str, email: &str) -> Result<PathBuf> {
    let path = dir.join(METADATA_FILE);
    let text = render_metadata(catalog, started, email)?;
    std::fs::write(&path, text)
        .map_err(CombretaError::from)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Totals over a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTotals {
    pub files: usize,
    pub combinations: usize,
    pub sequences: usize,
    pub without_data: usize,
}

impl FetchTotals {
    pub fn from_records(records: &[FetchRecord], combinations: usize) -> Self {
        Self {
            files: records.iter().filter(|r| r.has_data()).count(),
            combinations,
            sequences: records.iter().map(|r| r.n_seqs).sum(),
            without_data: records.iter().filter(|r| !r.has_data()).count(),
        }
    }
}

/// (with data, total) per functional group, in group order
pub fn group_coverage(records: &[FetchRecord]) -> Vec<(FunctionalGroup, usize, usize)> {
    FunctionalGroup::ALL
        .iter()
        .map(|&group| {
            let rows: Vec<&FetchRecord> = records.iter().filter(|r| r.group == group).collect();
            let ok = rows.iter().filter(|r| r.has_data()).count();
            (group, ok, rows.len())
        })
        .filter(|(_, _, total)| *total > 0)
        .collect()
}

/// Species lacking data for at least one marker, in record order
pub fn missing_markers(records: &[FetchRecord]) -> Vec<(String, Vec<String>)> {
    let mut missing: Vec<(String, Vec<String>)> = Vec::new();
    for record in records.iter().filter(|r| !r.has_data()) {
        match missing.iter_mut().find(|(s, _)| *s == record.species) {
            Some((_, markers)) => markers.push(record.marker.clone()),
            None => missing.push((record.species.clone(), vec![record.marker.clone()])),
        }
    }
    missing
}

pub fn print_fetch_report(records: &[FetchRecord], catalog: &Catalog, elapsed_secs: u64) {
    section_header("Download summary");

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Species"),
        header_cell("Group"),
        header_cell("Marker"),
        header_cell("Seqs"),
        header_cell("Status"),
    ]);
    for r in records {
        table.add_row(vec![
            r.species.clone(),
            r.group.code().to_string(),
            r.marker.clone(),
            r.n_seqs.to_string(),
            r.status.to_string(),
        ]);
    }
    println!("{}", table);

    let totals = FetchTotals::from_records(records, catalog.pair_count());
    tree_section(
        "Totals",
        vec![
            (
                "Files generated",
                format!("{}/{}", totals.files, totals.combinations),
            ),
            ("Total sequences", format_number(totals.sequences)),
            ("Combinations without data", totals.without_data.to_string()),
            ("Coverage", format_percent(totals.files, totals.combinations)),
            ("Duration", format_duration(elapsed_secs)),
        ],
        true,
    );

    section_header("Coverage by group");
    for (group, ok, total) in group_coverage(records) {
        println!(
            "  {} {:<28} {} {}/{} ({})",
            group.code().bold(),
            group.label(),
            coverage_bar(ok, total, 20).green(),
            ok,
            total,
            format_percent(ok, total)
        );
    }

    let missing = missing_markers(records);
    if !missing.is_empty() {
        section_header("Species with missing markers");
        let tree = missing
            .into_iter()
            .fold(TreeNode::new(format!("{} species", catalog.species.len())), |root, (species, markers)| {
                root.add_child(
                    markers
                        .into_iter()
                        .fold(TreeNode::new(species), |node, m| node.add_child(TreeNode::new(m))),
                )
            });
        print!("{}", tree.render());
        println!(
            "\n  {}",
            "These species may need a manual search or exclusion from the final analysis".dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fetcher::FetchStatus;
    use combreta_test::TestEnvironment;
    use pretty_assertions::assert_eq;

    fn record(species: &str, group: FunctionalGroup, marker: &str, n: usize, status: FetchStatus) -> FetchRecord {
        FetchRecord {
            species: species.to_string(),
            group,
            marker: marker.to_string(),
            n_seqs: n,
            status,
            name_used: species.to_string(),
            file: None,
        }
    }

    fn sample() -> Vec<FetchRecord> {
        use FunctionalGroup::*;
        vec![
            record("Laguncularia racemosa", Mangrove, "ITS", 12, FetchStatus::Ok),
            record("Laguncularia racemosa", Mangrove, "matK", 0, FetchStatus::NoData),
            record(
                "Combretum indicum",
                PaleotropicalTerrestrial,
                "ITS",
                3,
                FetchStatus::Synonym("Quisqualis indica".to_string()),
            ),
            record("Combretum indicum", PaleotropicalTerrestrial, "matK", 0, FetchStatus::DownloadError),
        ]
    }

    #[test]
    fn test_summary_csv() {
        let env = TestEnvironment::new().unwrap();
        let path = write_summary_csv(&env.raw_dir(), &sample()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "species,group,marker,n_seqs,status,name_used");
        assert_eq!(lines[1], "Laguncularia racemosa,A,ITS,12,OK,Laguncularia racemosa");
        assert_eq!(lines[2], "Laguncularia racemosa,A,matK,0,No data,Laguncularia racemosa");
        assert_eq!(lines[3], "Combretum indicum,C,ITS,3,Synonym: Quisqualis indica,Combretum indicum");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_totals_and_coverage() {
        let records = sample();
        let totals = FetchTotals::from_records(&records, 4);
        assert_eq!(
            totals,
            FetchTotals {
                files: 2,
                combinations: 4,
                sequences: 15,
                without_data: 2
            }
        );

        let coverage = group_coverage(&records);
        assert_eq!(
            coverage,
            vec![
                (FunctionalGroup::Mangrove, 1, 2),
                (FunctionalGroup::PaleotropicalTerrestrial, 1, 2)
            ]
        );

        let missing = missing_markers(&records);
        assert_eq!(missing[0], ("Laguncularia racemosa".to_string(), vec!["matK".to_string()]));
        assert_eq!(missing.len(), 2);
    }

    #[test]
    fn test_metadata_lists_catalog() {
        let catalog = Catalog::builtin();
        let text = render_metadata(&catalog, "2026-01-15 10:00:00", "lab@example.org").unwrap();
        assert!(text.contains("Contact: lab@example.org"));
        assert!(text.contains("Species: 20"));
        assert!(text.contains("Markers: 5"));
        assert!(text.contains("Gere et al. (2015)"));
        assert!(text.contains("  matK: plastid_conserved"));
        assert!(text.contains("Laguncularia racemosa (Group A)"));
    }
}
