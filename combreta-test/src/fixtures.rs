//! Test fixtures and data generators

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// FASTA record used to assemble test inputs
#[derive(Debug, Clone)]
pub struct TestSequence {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl TestSequence {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            sequence: sequence.into(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Render as FASTA, wrapping the sequence at `width` columns (0 = no wrap)
    pub fn to_fasta_wrapped(&self, width: usize) -> String {
        let mut out = format!(">{}", self.id);
        if !self.description.is_empty() {
            out.push(' ');
            out.push_str(&self.description);
        }
        out.push('\n');

        if width == 0 {
            out.push_str(&self.sequence);
            out.push('\n');
        } else {
            let bytes = self.sequence.as_bytes();
            for chunk in bytes.chunks(width) {
                out.push_str(&String::from_utf8_lossy(chunk));
                out.push('\n');
            }
        }
        out
    }

    pub fn to_fasta(&self) -> String {
        self.to_fasta_wrapped(0)
    }
}

/// Concatenate records into one FASTA document
pub fn fasta_document(records: &[TestSequence]) -> String {
    records.iter().map(TestSequence::to_fasta).collect()
}

/// Deterministic random DNA of the given length
pub fn random_dna(length: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

/// DNA of the given length whose first `round(length * fraction)` bases are N
pub fn ambiguous_dna(length: usize, fraction: f64, seed: u64) -> String {
    let n_count = ((length as f64) * fraction).round() as usize;
    let mut seq = "N".repeat(n_count.min(length));
    seq.push_str(&random_dna(length - seq.len(), seed));
    seq
}
