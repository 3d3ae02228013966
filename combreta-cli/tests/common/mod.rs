#![allow(dead_code)]

use assert_cmd::Command;
use combreta_test::{ambiguous_dna, fasta_document, random_dna, TestSequence};

pub use combreta_test::TestEnvironment;

pub fn combreta_cmd() -> Command {
    let mut cmd = Command::cargo_bin("combreta").unwrap();
    // Keep host settings out of the tests
    cmd.env_remove("NCBI_EMAIL")
        .env_remove("NCBI_API_KEY")
        .env_remove("RUST_LOG")
        .env("COMBRETA_LOG", "warn");
    cmd
}

/// Raw download with one clean near-optimal ITS record among worse ones
pub fn raw_its_download() -> String {
    fasta_document(&[
        TestSequence::new("MN100001.1", ambiguous_dna(640, 0.05, 11))
            .with_description("Laguncularia racemosa ITS1, partial sequence"),
        TestSequence::new("MN100002.1", ambiguous_dna(655, 0.25, 12))
            .with_description("Laguncularia racemosa internal transcribed spacer"),
        TestSequence::new("MN100003.1", random_dna(930, 13)).with_description("clone 2"),
    ])
}

/// Aligned supermatrix of the named taxa
pub fn supermatrix(taxa: &[&str], width: usize) -> String {
    let records: Vec<TestSequence> = taxa
        .iter()
        .enumerate()
        .map(|(i, name)| TestSequence::new(*name, random_dna(width, 100 + i as u64)))
        .collect();
    fasta_document(&records)
}

pub const CALIBRATION_TAXA: [&str; 4] = [
    "Buchenavia_tetraphylla",
    "Conocarpus_erectus",
    "Laguncularia_racemosa",
    "Terminalia_catappa",
];
